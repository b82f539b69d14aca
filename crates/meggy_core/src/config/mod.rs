use crate::error::MeggyError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
pub const CONFIG_ENV_VAR: &str = "MEGGY_CONFIG_PATH";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Data file used when `MEGGY_DATA_PATH` is not set.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Tracing filter directive, e.g. `meggy_core=debug`.
    #[serde(default)]
    pub log: Option<String>,
    /// Extra keywords, each standing for the text that replaces it.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<MeggyError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub data_file: Option<PathBuf>,
    pub log: Option<String>,
    pub aliases: HashMap<String, String>,
}

pub fn config_path() -> Result<PathBuf, MeggyError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| MeggyError::config("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("meggy").join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| MeggyError::config("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("meggy")
            .join(CONFIG_FILE_NAME))
    }
}

/// Never fails: a broken config yields defaults plus the reason.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

pub fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, MeggyError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| MeggyError::config(format!("{}: {}", path.display(), err)))?;
    let config: Config = serde_json::from_str(&content).map_err(|err| {
        MeggyError::config(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    Ok(normalize_aliases(config))
}

// Alias keys are matched against lower-cased keywords.
fn normalize_aliases(mut config: Config) -> Config {
    config.aliases = config
        .aliases
        .into_iter()
        .filter_map(|(alias, value)| {
            let alias = alias.trim().to_lowercase();
            (!alias.is_empty() && !alias.contains(char::is_whitespace)).then_some((alias, value))
        })
        .collect();
    config
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(data_file) = overrides.data_file.as_ref() {
        merged.data_file = Some(data_file.clone());
    }
    if let Some(log) = overrides.log.as_ref() {
        merged.log = Some(log.clone());
    }
    for (alias, value) in overrides.aliases.iter() {
        merged
            .aliases
            .insert(alias.trim().to_lowercase(), value.clone());
    }

    merged
}

/// Replaces a leading alias with its expansion; other lines pass through.
pub fn expand_alias(line: &str, aliases: &HashMap<String, String>) -> String {
    let trimmed = line.trim_start();
    let (head, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    match aliases.get(&head.to_lowercase()) {
        Some(expansion) if rest.is_empty() => expansion.clone(),
        Some(expansion) => format!("{expansion} {rest}"),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Config, ConfigOverrides, expand_alias, load_config_from_path,
        load_config_with_fallback_from_path, merge_overrides,
    };
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("meggy-{nanos}-{file_name}"))
    }

    fn aliases(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(alias, value)| (alias.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn missing_config_is_default_without_error() {
        let result = load_config_with_fallback_from_path(&temp_path("missing.json"));

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn invalid_config_falls_back_with_error() {
        let path = temp_path("invalid.json");
        fs::write(&path, "{ not json").unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        assert_eq!(result.config, Config::default());
        assert_eq!(result.error.map(|err| err.code()), Some("config"));
    }

    #[test]
    fn valid_config_is_read_and_aliases_normalized() {
        let path = temp_path("valid.json");
        let content = serde_json::json!({
            "data_file": "/tmp/meggy-tasks.txt",
            "log": "debug",
            "aliases": { " LS ": "list", "two words": "ignored" }
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(
            loaded.data_file.as_deref(),
            Some(std::path::Path::new("/tmp/meggy-tasks.txt"))
        );
        assert_eq!(loaded.log.as_deref(), Some("debug"));
        assert_eq!(loaded.aliases, aliases(&[("ls", "list")]));
    }

    #[test]
    fn overrides_win_and_leave_base_untouched() {
        let base = Config {
            data_file: Some("a.txt".into()),
            log: None,
            aliases: aliases(&[("ls", "list")]),
        };
        let overrides = ConfigOverrides {
            data_file: Some("b.txt".into()),
            log: Some("info".into()),
            aliases: aliases(&[("LS", "list"), ("dl", "deadline")]),
        };

        let merged = merge_overrides(&base, &overrides);

        assert_eq!(base.data_file, Some("a.txt".into()));
        assert_eq!(merged.data_file, Some("b.txt".into()));
        assert_eq!(merged.log.as_deref(), Some("info"));
        assert_eq!(merged.aliases, aliases(&[("ls", "list"), ("dl", "deadline")]));
    }

    #[test]
    fn empty_overrides_return_clone() {
        let base = Config {
            data_file: None,
            log: Some("warn".into()),
            aliases: aliases(&[("ls", "list")]),
        };

        assert_eq!(merge_overrides(&base, &ConfigOverrides::default()), base);
    }

    #[test]
    fn expand_alias_rewrites_only_the_first_word() {
        let table = aliases(&[("ls", "list"), ("dl", "deadline")]);

        assert_eq!(expand_alias("LS", &table), "list");
        assert_eq!(
            expand_alias("dl essay /by friday", &table),
            "deadline essay /by friday"
        );
        assert_eq!(expand_alias("todo ls", &table), "todo ls");
    }
}
