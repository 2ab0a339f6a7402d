//! # Registry Configuration
//!
//! Build-time policy for the calculator registry, read from the `[registry]`
//! table of a TOML file and overridable from the environment:
//!
//! ```toml
//! [registry]
//! duplicate_policy = "last-wins"   # or "reject" (default)
//! strict = true                    # treat validation warnings as errors
//! ```
//!
//! | Variable                   | Overrides          |
//! |----------------------------|--------------------|
//! | `CALCKIT_DUPLICATE_POLICY` | `duplicate_policy` |
//! | `CALCKIT_STRICT`           | `strict`           |

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::coercion::is_truthy;
use crate::errors::{CatalogError, CatalogResult};
use crate::value::RawValue;

/// Environment variable overriding [`RegistryConfig::duplicate_policy`]
pub const ENV_DUPLICATE_POLICY: &str = "CALCKIT_DUPLICATE_POLICY";
/// Environment variable overriding [`RegistryConfig::strict`]
pub const ENV_STRICT: &str = "CALCKIT_STRICT";

/// What to do when two definitions share an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail the build with a structured error
    #[default]
    Reject,
    /// Keep the later definition at the earlier listing position
    LastWins,
}

impl DuplicatePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            DuplicatePolicy::Reject => "reject",
            DuplicatePolicy::LastWins => "last-wins",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "last-wins" | "lastwins" => Ok(DuplicatePolicy::LastWins),
            other => Err(format!("unknown duplicate policy '{}'", other)),
        }
    }
}

/// Registry build policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Promote validation warnings to errors
    pub strict: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    registry: RegistryConfig,
}

/// Boolean override values: the checkbox truthy forms, or an explicit "off" form
fn parse_flag(value: &str) -> Option<bool> {
    if is_truthy(&RawValue::from(value)) {
        return Some(true);
    }
    match value.trim().to_ascii_lowercase().as_str() {
        "false" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

impl RegistryConfig {
    /// Parse the `[registry]` table from TOML text. A missing table yields defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, String> {
        toml::from_str::<ConfigFile>(text)
            .map(|file| file.registry)
            .map_err(|e| e.to_string())
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| CatalogError::config(&shown, e.to_string()))?;
        let config = Self::from_toml_str(&text).map_err(|reason| CatalogError::config(&shown, reason))?;
        debug!(path = %shown, ?config, "loaded registry configuration");
        Ok(config)
    }

    /// Apply `CALCKIT_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Unparsable values are logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(policy) = lookup(ENV_DUPLICATE_POLICY) {
            match policy.parse() {
                Ok(policy) => self.duplicate_policy = policy,
                Err(reason) => warn!(variable = ENV_DUPLICATE_POLICY, %reason, "ignoring override"),
            }
        }
        if let Some(strict) = lookup(ENV_STRICT) {
            match parse_flag(&strict) {
                Some(strict) => self.strict = strict,
                None => warn!(variable = ENV_STRICT, value = %strict, "ignoring override"),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert!(!config.strict);
        assert_eq!(RegistryConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_parse_registry_table() {
        let config = RegistryConfig::from_toml_str(
            r#"
            [registry]
            duplicate_policy = "last-wins"
            strict = true
            "#,
        )
        .unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::LastWins);
        assert!(config.strict);
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let config = RegistryConfig::from_toml_str("[registry]\nstrict = true\n").unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert!(config.strict);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[registry]\nduplicate_policy = \"last-wins\"").unwrap();
        let config = RegistryConfig::load(file.path()).unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::LastWins);
    }

    #[test]
    fn test_load_errors_are_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(RegistryConfig::load(&missing).unwrap_err().error_code(), "CONFIG_ERROR");

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[registry]\nduplicate_policy = \"sometimes\"\n").unwrap();
        let err = RegistryConfig::load(&bad).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_overrides() {
        let config = RegistryConfig::default().with_overrides(|key| match key {
            ENV_DUPLICATE_POLICY => Some("LAST_WINS".to_string()),
            ENV_STRICT => Some("yes".to_string()),
            _ => None,
        });
        assert_eq!(config.duplicate_policy, DuplicatePolicy::LastWins);
        assert!(config.strict);

        let unchanged = RegistryConfig::default().with_overrides(|key| match key {
            ENV_DUPLICATE_POLICY => Some("maybe".to_string()),
            _ => None,
        });
        assert_eq!(unchanged, RegistryConfig::default());
    }

    #[test]
    fn test_invalid_strict_override_is_ignored() {
        let strict = RegistryConfig {
            strict: true,
            ..RegistryConfig::default()
        };
        let kept = strict.with_overrides(|key| (key == ENV_STRICT).then(|| "maybe".to_string()));
        assert!(kept.strict);

        let off = strict.with_overrides(|key| (key == ENV_STRICT).then(|| "off".to_string()));
        assert!(!off.strict);
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), None);
    }
}
