//! Pricing table loading: built-in defaults, optionally replaced by a JSON file.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use crate::{
    domain::{InvalidPricing, PricingConfig, PricingSource},
    util::persistence::{config_dir, write_json, PersistSaveError},
};

/// Environment variable naming an explicit pricing file.
pub const PRICING_FILE_ENV: &str = "QUOTE_PRICING_FILE";
const PRICING_FILE: &str = "pricing.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] InvalidPricing),
    #[error("config directory unavailable")]
    StorageUnavailable,
    #[error("{0} already exists; edit it instead")]
    AlreadyExists(PathBuf),
    #[error(transparent)]
    Write(#[from] PersistSaveError),
}

/// Outcome of a load. `warning` is set when an override existed but was rejected.
#[derive(Debug)]
pub struct LoadedPricing {
    pub config: PricingConfig,
    pub source: PricingSource,
    pub warning: Option<String>,
}

/// Path checked for a pricing override: `$QUOTE_PRICING_FILE`, else the config dir.
pub fn override_path() -> Option<PathBuf> {
    env::var_os(PRICING_FILE_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| config_dir().map(|dir| dir.join(PRICING_FILE)))
}

pub fn parse_pricing(json: &str, path: &Path) -> Result<PricingConfig, ConfigError> {
    let config: PricingConfig =
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

pub fn load_from_path(path: &Path) -> Result<PricingConfig, ConfigError> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pricing(&json, path)
}

/// Resolves the active pricing table. Never fails: a broken override falls back to
/// the built-in table and reports why.
pub fn load_pricing() -> LoadedPricing {
    load_pricing_from(override_path().as_deref())
}

fn load_pricing_from(path: Option<&Path>) -> LoadedPricing {
    let builtin = || LoadedPricing {
        config: PricingConfig::default(),
        source: PricingSource::Builtin,
        warning: None,
    };

    let Some(path) = path else {
        tracing::info!("no config directory; using built-in pricing");
        return builtin();
    };

    if !path.exists() {
        tracing::info!(path = %path.display(), "no pricing override; using built-in pricing");
        return builtin();
    }

    match load_from_path(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded pricing override");
            LoadedPricing {
                config,
                source: PricingSource::File(path.to_path_buf()),
                warning: None,
            }
        }
        Err(err) => {
            tracing::warn!(%err, "pricing override rejected; using built-in pricing");
            LoadedPricing {
                warning: Some(err.to_string()),
                ..builtin()
            }
        }
    }
}

/// Writes `config` to the override path so it can be edited by hand. Refuses to
/// replace an existing file.
pub fn write_editable_copy(config: &PricingConfig) -> Result<PathBuf, ConfigError> {
    let path = override_path().ok_or(ConfigError::StorageUnavailable)?;
    write_new_file(&path, config)?;
    Ok(path)
}

fn write_new_file(path: &Path, config: &PricingConfig) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    write_json(path, config)?;
    tracing::info!(path = %path.display(), "wrote editable pricing table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectCategory;

    fn scratch_dir() -> PathBuf {
        let dir = env::temp_dir().join(format!("quote-pricing-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_override_uses_builtin() {
        let dir = scratch_dir();
        let loaded = load_pricing_from(Some(&dir.join(PRICING_FILE)));
        assert_eq!(loaded.source, PricingSource::Builtin);
        assert!(loaded.warning.is_none());
        assert_eq!(loaded.config, PricingConfig::default());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn valid_override_replaces_builtin() {
        let dir = scratch_dir();
        let path = dir.join(PRICING_FILE);
        let mut custom = PricingConfig::default();
        custom.base_prices.insert(ProjectCategory::Landing, 499);
        write_new_file(&path, &custom).unwrap();

        let loaded = load_pricing_from(Some(&path));
        assert_eq!(loaded.source, PricingSource::File(path.clone()));
        assert_eq!(loaded.config.base_price(ProjectCategory::Landing), 499);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn broken_override_falls_back_with_warning() {
        let dir = scratch_dir();
        let path = dir.join(PRICING_FILE);
        fs::write(&path, "{ not json").unwrap();

        let loaded = load_pricing_from(Some(&path));
        assert_eq!(loaded.source, PricingSource::Builtin);
        assert!(loaded.warning.unwrap().contains("failed to parse"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn invalid_override_is_rejected() {
        let mut custom = PricingConfig::default();
        custom.price_range.max_multiplier = 0.5;
        let json = serde_json::to_string(&custom).unwrap();

        let err = parse_pricing(&json, Path::new("pricing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn currency_defaults_when_omitted() {
        let mut value = serde_json::to_value(PricingConfig::default()).unwrap();
        value.as_object_mut().unwrap().remove("currency_symbol");
        let config = parse_pricing(&value.to_string(), Path::new("pricing.json")).unwrap();
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn editable_copy_never_overwrites() {
        let dir = scratch_dir();
        let path = dir.join(PRICING_FILE);
        write_new_file(&path, &PricingConfig::default()).unwrap();

        let err = write_new_file(&path, &PricingConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
        fs::remove_dir_all(dir).unwrap();
    }
}
