//! Turns comic catalog HTML into typed records.
//!
//! The flow is one-directional: HTML is parsed into a [`Document`], a
//! [`PageSchema`](schema::PageSchema) says where each field lives, the
//! extractor reads and [normalizes](normalize) the raw strings into a
//! [`Record`], and the record is assembled into a domain [model](models).
//!
//! ```rust
//! use komik_extract::{Extractor, schema::SelectorSet};
//!
//! let html = r#"
//!     <div class="list-update_item">
//!         <a class="data-tooltip" href="https://komikcast.cz/komik/example/">
//!             <h3 class="title"> Example </h3>
//!             <div class="rating-bintang"><span style="width: 70%"></span></div>
//!         </a>
//!     </div>
//! "#;
//! let entries = Extractor::from_html(html).listing(&SelectorSet::default());
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].title, "Example");
//! assert_eq!(entries[0].rating, 7.0);
//! assert_eq!(entries[0].path, "/komik/example/");
//! ```

mod consts;
pub mod document;
pub mod error;
mod extract;
pub mod models;
pub mod normalize;
pub mod schema;

pub use crate::consts::DEFAULT_ORIGIN;
pub use crate::document::{Document, Node, Query};
pub use crate::extract::{Extractor, Record, Value, extract_list, extract_one};
