use clap::Parser;
use meggy_core::config::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "A personal task-tracking agent", long_about = None)]
pub struct Cli {
    /// Data file to read and write, ahead of MEGGY_DATA_PATH and the config file
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE")]
    pub config_override: Vec<String>,

    /// Run one command and exit instead of starting a session
    ///
    /// Example: meggy deadline essay /by 12/3/2024 2359
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub line: Vec<String>,
}

impl Cli {
    /// The one-shot command, if any words were given.
    pub fn command_line(&self) -> Option<String> {
        (!self.line.is_empty()).then(|| self.line.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    DataFile,
    Log,
    Alias(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let (field, remainder) = key_raw
        .split_once('.')
        .map(|(field, rest)| (field.trim(), Some(rest.trim())))
        .unwrap_or((key_raw.trim(), None));

    let target = match (canonical_field(field).as_str(), remainder) {
        ("", _) => return Err("override key cannot be empty".to_string()),
        ("data_file" | "datafile", None) => ConfigOverrideTarget::DataFile,
        ("log", None) => ConfigOverrideTarget::Log,
        ("aliases" | "alias", Some(name)) if !name.is_empty() => {
            ConfigOverrideTarget::Alias(name.to_string())
        }
        ("aliases" | "alias", _) => {
            return Err("aliases override requires an alias name".to_string());
        }
        (other @ ("data_file" | "datafile" | "log"), Some(_)) => {
            return Err(format!("{other} override cannot have subfields"));
        }
        (other, _) => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

/// Folds every `--config-override` into one set of overrides.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::DataFile => overrides.data_file = Some(parsed.value.into()),
            ConfigOverrideTarget::Log => overrides.log = Some(parsed.value),
            ConfigOverrideTarget::Alias(name) => {
                overrides.aliases.insert(name, parsed.value);
            }
        }
    }
    Ok(overrides)
}

fn canonical_field(name: &str) -> String {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    cleaned.trim_matches('_').to_string()
}
