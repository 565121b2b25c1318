use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("row {row_id}: cannot parse timestamp {value:?}")]
    InvalidTimestamp { row_id: String, value: String },
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("no group for bucket key {0}")]
    UnknownBucket(u32),
}

pub type AuditResult<T> = Result<T, AuditError>;
