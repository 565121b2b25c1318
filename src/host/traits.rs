use thiserror::Error;

use crate::domain::{Property, ScreenParameters};

#[derive(Error, Debug)]
pub enum HostError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("config error: {0}")]
    ConfigError(String),
}

pub type HostResult<T> = Result<T, HostError>;

/// Read-only tabular data handed over by the host application.
pub trait DataTable {
    type Row;

    /// Rows in host order.
    fn rows(&self) -> &[Self::Row];

    fn property_by_id(&self, id: &str) -> Option<&Property>;

    /// Display text of one cell, empty when the row has no value.
    fn cell_text(&self, row: &Self::Row, property_id: &str) -> String;

    /// Stable identifier, used only as a rendering key.
    fn row_id(&self, row: &Self::Row) -> String;
}

/// Translation of user-facing text. `{name}` placeholders in the
/// translated template are filled from `params`.
pub trait Localizer {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String;
}

/// Accessor the host injects to supply the current screen parameters.
pub type ScreenParametersFn = Box<dyn Fn() -> Option<ScreenParameters>>;
