use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::traits::{DataTable, HostError, HostResult};
use crate::domain::{Property, ScreenParameters};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryRow {
    pub id: String,
    #[serde(default)]
    pub cells: HashMap<String, String>,
}

impl MemoryRow {
    pub fn new<I, K, V>(id: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: id.into(),
            cells: cells
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuditDocument {
    properties: Vec<Property>,
    #[serde(default)]
    rows: Vec<MemoryRow>,
    #[serde(default)]
    screen_parameters: HashMap<String, String>,
}

/// Data table backed by rows held in memory, typically loaded from a JSON
/// export of the audit log.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataTable {
    properties: Vec<Property>,
    rows: Vec<MemoryRow>,
    screen_parameters: ScreenParameters,
}

impl MemoryDataTable {
    pub fn new(properties: Vec<Property>, rows: Vec<MemoryRow>) -> Self {
        Self {
            properties,
            rows,
            screen_parameters: ScreenParameters::default(),
        }
    }

    pub fn with_screen_parameters(mut self, screen_parameters: ScreenParameters) -> Self {
        self.screen_parameters = screen_parameters;
        self
    }

    pub fn from_json(json: &str) -> HostResult<Self> {
        let doc: AuditDocument =
            serde_json::from_str(json).map_err(|e| HostError::ParseError(e.to_string()))?;
        Ok(Self {
            properties: doc.properties,
            rows: doc.rows,
            screen_parameters: ScreenParameters::new(doc.screen_parameters),
        })
    }

    pub fn load(path: &Path) -> HostResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_json(&content)?;
        tracing::info!(
            "Loaded {} audit rows from {}",
            table.rows.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parameters embedded in the loaded document.
    pub fn screen_parameters(&self) -> &ScreenParameters {
        &self.screen_parameters
    }
}

impl DataTable for MemoryDataTable {
    type Row = MemoryRow;

    fn rows(&self) -> &[MemoryRow] {
        &self.rows
    }

    fn property_by_id(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    fn cell_text(&self, row: &MemoryRow, property_id: &str) -> String {
        row.cells.get(property_id).cloned().unwrap_or_default()
    }

    fn row_id(&self, row: &MemoryRow) -> String {
        row.id.clone()
    }
}
