pub mod granularity;
pub mod property;
pub mod timestamp;

pub use granularity::*;
pub use property::*;
pub use timestamp::*;

use std::collections::HashMap;

/// Key/value context supplied by the host alongside the rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenParameters(HashMap<String, String>);

impl ScreenParameters {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Entries from `other` win over existing ones.
    pub fn merge(&mut self, other: ScreenParameters) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for ScreenParameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
