use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use crate::domain::{ScreenParameters, DATE_FROM_PARAMETER};
use crate::host::FALLBACK_LOCALE;

#[derive(Parser, Debug)]
#[command(name = "auditview", about = "Time-bucketed view of audit-log records")]
pub struct Cli {
    /// JSON export of the audit log (properties, rows, screen parameters)
    #[arg(long, env = "AUDITVIEW_DATA")]
    pub data: PathBuf,

    /// Lower bound of the audited range; selects month, day or hour grouping
    #[arg(long, env = "AUDITVIEW_DATE_FROM")]
    pub date_from: Option<String>,

    /// Extra screen parameter as KEY=VALUE (repeatable)
    #[arg(long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Locale used for user-facing text
    #[arg(long, env = "AUDITVIEW_LOCALE")]
    pub locale: Option<String>,

    /// TOML file with additional translations
    #[arg(long, env = "AUDITVIEW_LOCALIZATIONS")]
    pub localizations: Option<PathBuf>,

    /// Print the grouped view to stdout instead of starting the terminal UI
    #[arg(long)]
    pub plain: bool,

    /// Reload the data file when it changes
    #[arg(long)]
    pub watch: bool,

    /// UI tick interval in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: Option<u64>,

    /// Log file path
    #[arg(long, env = "AUDITVIEW_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

fn parse_key_value(input: &str) -> Result<(String, String), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", input))?;
    if key.is_empty() {
        return Err(format!("empty key in {:?}", input));
    }
    Ok((key.to_string(), value.to_string()))
}

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub locale: Option<String>,
    pub localizations: Option<PathBuf>,
    pub tick_ms: Option<u64>,
    pub watch: Option<bool>,
}

impl ConfigFile {
    pub fn load() -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        let config_path = config_dir.join("auditview").join("config.toml");
        let content = std::fs::read_to_string(config_path).ok()?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Option<Self> {
        match toml::from_str(content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring invalid config file: {}", e);
                None
            }
        }
    }
}

/// Command line merged over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data: PathBuf,
    pub screen_parameters: ScreenParameters,
    pub locale: String,
    pub localizations: Option<PathBuf>,
    pub plain: bool,
    pub watch: bool,
    pub tick_ms: u64,
}

impl Settings {
    pub fn resolve(cli: Cli, file: ConfigFile) -> Self {
        let mut screen_parameters: ScreenParameters = cli.params.into_iter().collect();
        if let Some(date_from) = cli.date_from {
            screen_parameters.insert(DATE_FROM_PARAMETER, date_from);
        }

        Self {
            data: cli.data,
            screen_parameters,
            locale: cli
                .locale
                .or(file.locale)
                .unwrap_or_else(|| FALLBACK_LOCALE.to_string()),
            localizations: cli.localizations.or(file.localizations),
            plain: cli.plain,
            watch: cli.watch || file.watch.unwrap_or(false),
            tick_ms: cli.tick_ms.or(file.tick_ms).unwrap_or(250).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_wins_over_config_file() {
        let cli = Cli::parse_from([
            "auditview",
            "--data",
            "audit.json",
            "--date-from",
            "2021-04-03T00:00:00",
            "--param",
            "Other=1",
            "--locale",
            "cs",
        ]);
        let file = ConfigFile::parse("locale = \"de\"\ntick_ms = 100\nwatch = true\n")
            .expect("valid config");

        let settings = Settings::resolve(cli, file);
        assert_eq!(settings.locale, "cs");
        assert_eq!(settings.tick_ms, 100);
        assert!(settings.watch);
        assert_eq!(
            settings.screen_parameters.get(DATE_FROM_PARAMETER),
            Some("2021-04-03T00:00:00")
        );
        assert_eq!(settings.screen_parameters.get("Other"), Some("1"));
    }

    #[test]
    fn defaults_without_config() {
        let cli = Cli::parse_from(["auditview", "--data", "audit.json", "--plain"]);
        let settings = Settings::resolve(cli, ConfigFile::default());
        assert_eq!(settings.locale, "en");
        assert_eq!(settings.tick_ms, 250);
        assert!(settings.plain);
        assert!(!settings.watch);
        assert!(settings.screen_parameters.is_empty());
    }

    #[test]
    fn param_requires_key_value() {
        assert_eq!(
            parse_key_value("A=b=c"),
            Ok(("A".to_string(), "b=c".to_string()))
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn invalid_config_file_is_ignored() {
        assert!(ConfigFile::parse("tick_ms = \"fast\"").is_none());
    }

    #[test]
    fn zero_tick_interval_is_rejected_or_raised() {
        let parsed = Cli::try_parse_from(["auditview", "--data", "audit.json", "--tick-ms", "0"]);
        assert!(parsed.is_err());

        let cli = Cli::parse_from(["auditview", "--data", "audit.json"]);
        let file = ConfigFile::parse("tick_ms = 0").expect("valid config");
        let settings = Settings::resolve(cli, file);
        assert_eq!(settings.tick_ms, 1);
    }
}
