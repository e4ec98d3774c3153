//! Layered configuration for komik.
//!
//! Sources are merged in order, later ones winning:
//!
//! 1. Built-in defaults: one `komikcast` site profile.
//! 2. A TOML, YAML or JSON file, chosen by extension.
//! 3. `KOMIK_`-prefixed environment variables, with `__` separating nested
//!    keys (`KOMIK_FETCH__TIMEOUT_SECS=10`, `KOMIK_SITES__MIRROR__ORIGIN=...`).
//!
//! ```toml
//! default_site = "mirror"
//!
//! [fetch]
//! timeout_secs = 10
//!
//! [sites.mirror]
//! origin = "https://komikcast.example"
//! ```
//!
//! Site profiles are keyed by name; the key always wins over any `name` field
//! inside the profile. Fields a profile leaves out take the komikcast
//! defaults, including its URL templates and selector schemas.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use komik_pipeline::SiteProfile;
use komik_pipeline::fetch::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

pub const ENV_PREFIX: &str = "KOMIK_";
pub const DEFAULT_SITE: &str = "komikcast";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Profile used when the caller doesn't name one.
    pub default_site: String,
    pub sites: BTreeMap<String, SiteProfile>,
    pub fetch: FetchSettings,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            default_site: DEFAULT_SITE.to_string(),
            sites: BTreeMap::from([(DEFAULT_SITE.to_string(), SiteProfile::default())]),
            fetch: FetchSettings::default(),
        }
    }
}

/// Settings for the HTTP fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchSettings {
    pub user_agent: String,
    pub timeout_secs: u64,
}
impl Default for FetchSettings {
    fn default() -> Self {
        Self { user_agent: DEFAULT_USER_AGENT.to_string(), timeout_secs: DEFAULT_TIMEOUT.as_secs() }
    }
}
impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// `config.toml` in the platform's config directory, e.g.
    /// `~/.config/komik/config.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "komik").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads and validates configuration.
    ///
    /// An explicit `path` must exist. Without one, the [default
    /// path](Self::default_path) is used if there's a file there.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) if !path.is_file() => {
                exn::bail!(ErrorKind::Invalid(format!("config file {} does not exist", path.display())))
            },
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        };
        debug!(file = ?path, "loading configuration");
        Self::from_figment(Self::figment(path.as_deref())?)
    }

    /// The merged sources, for callers that want to layer more on top.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
            figment = match extension.as_deref() {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => exn::bail!(ErrorKind::Invalid(format!("unsupported config format: {}", path.display()))),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let mut config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        for (name, site) in &mut config.sites {
            site.name = name.clone();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.site(None)?;
        if self.fetch.timeout_secs == 0 {
            exn::bail!(ErrorKind::Invalid("fetch.timeout_secs must be positive".to_string()));
        }
        for (name, site) in &self.sites {
            let origin = url::Url::parse(&site.origin)
                .or_raise(|| ErrorKind::Invalid(format!("site {name} has an invalid origin")))?;
            if !matches!(origin.scheme(), "http" | "https") {
                exn::bail!(ErrorKind::Invalid(format!("site {name} origin must be http(s)")));
            }
            site.selectors.validate().or_raise(|| ErrorKind::Invalid(format!("site {name} has an invalid schema")))?;
        }
        Ok(())
    }

    /// The named profile, or the default one.
    pub fn site(&self, name: Option<&str>) -> Result<&SiteProfile> {
        let name = name.unwrap_or(&self.default_site);
        self.sites.get(name).ok_or_raise(|| ErrorKind::UnknownSite(name.to_string()))
    }
}
