use serde::Deserialize;

pub const RECORD_CREATED: &str = "RecordCreated";
pub const REF_COLUMN_ID: &str = "refColumnId";
pub const OLD_VALUE: &str = "OldValue";
pub const NEW_VALUE: &str = "NewValue";
pub const RECORD_CREATED_BY: &str = "RecordCreatedBy";

/// Columns shown for every audit row, in display order.
pub const PROJECTED_PROPERTIES: [&str; 5] = [
    RECORD_CREATED,
    REF_COLUMN_ID,
    OLD_VALUE,
    NEW_VALUE,
    RECORD_CREATED_BY,
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Property {
    pub id: String,
    pub name: String,
}

impl Property {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
