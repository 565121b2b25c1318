use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::traits::{HostError, HostResult, Localizer};

pub const FALLBACK_LOCALE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Localization {
    pub locale: String,
    pub translations: HashMap<String, String>,
}

impl Localization {
    fn from_pairs(locale: &str, pairs: &[(&str, &str)]) -> Self {
        Self {
            locale: locale.to_string(),
            translations: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LocalizationFile {
    #[serde(default)]
    localizations: Vec<Localization>,
}

pub fn builtin_localizations() -> Vec<Localization> {
    vec![
        Localization::from_pairs(
            "en",
            &[
                ("empty", "No audit records for the selected period"),
                (
                    "recordSummary",
                    "{recordCount} changes made by {userCount} users",
                ),
            ],
        ),
        Localization::from_pairs(
            "de",
            &[
                ("empty", "Keine Audit-Einträge im gewählten Zeitraum"),
                (
                    "recordSummary",
                    "{recordCount} Änderungen von {userCount} Benutzern",
                ),
            ],
        ),
        Localization::from_pairs(
            "cs",
            &[
                ("empty", "Ve zvoleném období nejsou žádné záznamy auditu"),
                (
                    "recordSummary",
                    "Počet změn: {recordCount}, počet uživatelů: {userCount}",
                ),
            ],
        ),
    ]
}

/// Parse `[[localizations]]` tables from TOML.
pub fn parse_localizations(content: &str) -> HostResult<Vec<Localization>> {
    let file: LocalizationFile =
        toml::from_str(content).map_err(|e| HostError::ConfigError(e.to_string()))?;
    Ok(file.localizations)
}

pub fn load_localizations(path: &Path) -> HostResult<Vec<Localization>> {
    let content = std::fs::read_to_string(path)?;
    parse_localizations(&content)
}

/// Localizer over an in-memory catalog of translations.
#[derive(Debug, Clone)]
pub struct CatalogLocalizer {
    locale: String,
    catalog: HashMap<String, HashMap<String, String>>,
}

impl CatalogLocalizer {
    pub fn new(locale: impl Into<String>, localizations: Vec<Localization>) -> Self {
        let mut localizer = Self {
            locale: locale.into(),
            catalog: HashMap::new(),
        };
        localizer.extend(localizations);
        localizer
    }

    pub fn with_builtins(locale: impl Into<String>) -> Self {
        Self::new(locale, builtin_localizations())
    }

    /// Later entries override earlier ones key by key.
    pub fn extend(&mut self, localizations: Vec<Localization>) {
        for localization in localizations {
            self.catalog
                .entry(localization.locale)
                .or_default()
                .extend(localization.translations);
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        [self.locale.as_str(), FALLBACK_LOCALE]
            .iter()
            .find_map(|locale| self.catalog.get(*locale)?.get(key))
            .map(String::as_str)
    }
}

impl Localizer for CatalogLocalizer {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        let template = match self.lookup(key) {
            Some(template) => template,
            None => {
                tracing::warn!("Missing translation for {:?} in locale {}", key, self.locale);
                key
            }
        };
        interpolate(template, params)
    }
}

fn interpolate(template: &str, params: &[(&str, String)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}
