/// A single extracted (and normalized) value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The selector matched nothing, or the attribute/property was absent.
    Missing,
    Text(String),
    Number(f64),
    /// Every match of an [`All`](crate::schema::Cardinality::All) field,
    /// in document order.
    List(Vec<Value>),
    /// Nested records of a [`GroupSpec`](crate::schema::GroupSpec).
    Records(Vec<Record>),
}

/// Field values in schema order.
///
/// Accessors never fail: absent or mistyped fields read as the type's
/// default, which is what lets extraction stay total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}
impl Record {
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(existing, _)| existing == name).map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Text value, or an empty string.
    pub fn text(&self, name: &str) -> String {
        self.optional(name).unwrap_or_default()
    }

    /// Text value, or `None` when the field is missing.
    pub fn optional(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Value::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    /// Numeric value; unknown or unreadable numbers are `0.0`.
    pub fn number(&self, name: &str) -> f64 {
        match self.get(name) {
            Some(Value::Number(n)) if n.is_finite() => *n,
            _ => 0.0,
        }
    }

    /// Text items of a repeated field, in document order.
    pub fn list(&self, name: &str) -> Vec<String> {
        match self.get(name) {
            Some(Value::List(values)) => values
                .iter()
                .filter_map(|value| match value {
                    Value::Text(text) => Some(text.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Nested records of a group, in document order.
    pub fn group(&self, name: &str) -> &[Record] {
        match self.get(name) {
            Some(Value::Records(records)) => records,
            _ => &[],
        }
    }
}
