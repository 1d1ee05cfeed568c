use crate::core::RuleSet;
use crate::error::{BuilderError, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

/// Token value shipped in sample configs; means "no live catalog"
pub const PLACEHOLDER_ACCESS_TOKEN: &str = "YOUR_PUBLIC_ACCESS_TOKEN_HERE";

static DEFAULT_STOREFRONT_DOMAIN: &str = "your-store.myshopify.com";
const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;

const STOREFRONT_DOMAIN_KEY: &str = "STOREFRONT_DOMAIN";
const ACCESS_TOKEN_KEY: &str = "STOREFRONT_ACCESS_TOKEN";
const PHONE_NUMBER_KEY: &str = "QUOTE_PHONE_NUMBER";
const CATALOG_TIMEOUT_KEY: &str = "CATALOG_TIMEOUT_SECS";
const ENFORCE_FORM_FACTOR_KEY: &str = "ENFORCE_FORM_FACTOR";

const ENV_KEYS: [&str; 5] = [
    STOREFRONT_DOMAIN_KEY,
    ACCESS_TOKEN_KEY,
    PHONE_NUMBER_KEY,
    CATALOG_TIMEOUT_KEY,
    ENFORCE_FORM_FACTOR_KEY,
];

/// On-disk form, every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    storefront_domain: Option<String>,
    storefront_access_token: Option<String>,
    quote_phone_number: Option<String>,
    catalog_timeout_secs: Option<u64>,
    enforce_form_factor: Option<bool>,
}

pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Defaults, overridden by any of the known environment variables
    pub fn new() -> Config {
        let config = Config::with_defaults();
        {
            let mut inner = config.write();
            for key in ENV_KEYS {
                if let Ok(value) = env::var(key) {
                    inner.insert(String::from(key), value);
                }
            }
        }
        config
    }

    /// Defaults only, environment ignored
    pub fn with_defaults() -> Config {
        let mut map = HashMap::new();
        map.insert(
            String::from(STOREFRONT_DOMAIN_KEY),
            String::from(DEFAULT_STOREFRONT_DOMAIN),
        );
        map.insert(
            String::from(ACCESS_TOKEN_KEY),
            String::from(PLACEHOLDER_ACCESS_TOKEN),
        );
        Config {
            inner: RwLock::new(map),
        }
    }

    // a poisoned lock still holds plain strings, so keep using them
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Overlay values from a TOML file; keys absent from the file keep
    /// their current value
    pub fn load_file(&self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.load_toml_str(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(())
    }

    pub fn load_toml_str(&self, text: &str) -> Result<()> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut inner = self.write();
        if let Some(domain) = file.storefront_domain {
            inner.insert(String::from(STOREFRONT_DOMAIN_KEY), domain);
        }
        if let Some(token) = file.storefront_access_token {
            inner.insert(String::from(ACCESS_TOKEN_KEY), token);
        }
        if let Some(phone) = file.quote_phone_number {
            inner.insert(String::from(PHONE_NUMBER_KEY), phone);
        }
        if let Some(secs) = file.catalog_timeout_secs {
            inner.insert(String::from(CATALOG_TIMEOUT_KEY), secs.to_string());
        }
        if let Some(enforce) = file.enforce_form_factor {
            inner.insert(String::from(ENFORCE_FORM_FACTOR_KEY), enforce.to_string());
        }
        Ok(())
    }

    pub fn get_storefront_domain(&self) -> String {
        self.read()
            .get(STOREFRONT_DOMAIN_KEY)
            .cloned()
            .unwrap_or_else(|| String::from(DEFAULT_STOREFRONT_DOMAIN))
    }

    pub fn set_storefront_domain(&self, domain: String) {
        self.write().insert(String::from(STOREFRONT_DOMAIN_KEY), domain);
    }

    pub fn get_access_token(&self) -> String {
        self.read()
            .get(ACCESS_TOKEN_KEY)
            .cloned()
            .unwrap_or_else(|| String::from(PLACEHOLDER_ACCESS_TOKEN))
    }

    pub fn set_access_token(&self, token: String) {
        self.write().insert(String::from(ACCESS_TOKEN_KEY), token);
    }

    /// A real token is set, so a live fetch is worth attempting
    pub fn is_storefront_configured(&self) -> bool {
        let token = self.get_access_token();
        !token.trim().is_empty() && token != PLACEHOLDER_ACCESS_TOKEN
    }

    pub fn get_phone_number(&self) -> Option<String> {
        self.read().get(PHONE_NUMBER_KEY).cloned()
    }

    pub fn set_phone_number(&self, phone: String) {
        self.write().insert(String::from(PHONE_NUMBER_KEY), phone);
    }

    /// Fetch timeout; an unreadable value falls back to the default
    pub fn get_catalog_timeout(&self) -> Duration {
        let secs = self
            .read()
            .get(CATALOG_TIMEOUT_KEY)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_CATALOG_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn enforce_form_factor(&self) -> bool {
        self.read()
            .get(ENFORCE_FORM_FACTOR_KEY)
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }

    pub fn set_enforce_form_factor(&self, enforce: bool) {
        self.write()
            .insert(String::from(ENFORCE_FORM_FACTOR_KEY), enforce.to_string());
    }

    /// Rule set matching the form factor setting
    pub fn rule_set(&self) -> RuleSet {
        if self.enforce_form_factor() {
            RuleSet::strict()
        } else {
            RuleSet::standard()
        }
    }

    /// Phone number for quotes, or an error naming the missing key
    pub fn require_phone_number(&self) -> Result<String> {
        self.get_phone_number()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| BuilderError::Config(format!("{PHONE_NUMBER_KEY} is not set")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::with_defaults();
        assert_eq!(config.get_storefront_domain(), DEFAULT_STOREFRONT_DOMAIN);
        assert!(!config.is_storefront_configured());
        assert!(config.get_phone_number().is_none());
        assert!(config.require_phone_number().is_err());
        assert_eq!(config.get_catalog_timeout(), Duration::from_secs(10));
        assert!(!config.enforce_form_factor());
        assert_eq!(config.rule_set().rules().len(), 2);
    }

    #[test]
    fn test_setters() {
        let config = Config::with_defaults();
        config.set_access_token("shpat_123".to_string());
        config.set_phone_number("910000000000".to_string());
        config.set_enforce_form_factor(true);
        assert!(config.is_storefront_configured());
        assert_eq!(config.require_phone_number().unwrap(), "910000000000");
        assert_eq!(config.rule_set().rules().len(), 3);
    }

    #[test]
    fn test_load_file_overlays_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "storefront_domain = \"parts.example.com\"\ncatalog_timeout_secs = 3\nenforce_form_factor = true"
        )
        .unwrap();

        let config = Config::with_defaults();
        config.set_phone_number("911111111111".to_string());
        config.load_file(file.path()).unwrap();

        assert_eq!(config.get_storefront_domain(), "parts.example.com");
        assert_eq!(config.get_catalog_timeout(), Duration::from_secs(3));
        assert!(config.enforce_form_factor());
        assert_eq!(config.get_phone_number().as_deref(), Some("911111111111"));
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let config = Config::with_defaults();
        let err = config.load_toml_str("mystery_key = 1").unwrap_err();
        assert!(matches!(err, BuilderError::Config(_)));
        assert!(config.load_file(Path::new("/nonexistent/rig.toml")).is_err());
    }
}
