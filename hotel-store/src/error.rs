use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a data store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record to {action} does not exist: no `{table}` with id `{id}`")]
    RecordNotFound {
        action: &'static str,
        table: String,
        id: String,
    },

    #[error("Foreign key constraint failed on the field: `{table}.{field}`")]
    ForeignKey { table: String, field: String },

    #[error("Unique constraint failed on the field: `{table}.{field}`")]
    UniqueConstraint { table: String, field: String },

    #[error("Unknown table: {table}")]
    UnknownTable { table: String },

    #[error("Invalid data for `{table}`: {message}")]
    InvalidData { table: String, message: String },
}

impl StoreError {
    pub fn not_found(action: &'static str, table: impl Into<String>, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            action,
            table: table.into(),
            id: id.into(),
        }
    }

    pub fn foreign_key(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ForeignKey {
            table: table.into(),
            field: field.into(),
        }
    }

    pub fn unique(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UniqueConstraint {
            table: table.into(),
            field: field.into(),
        }
    }

    pub fn unknown_table(table: impl Into<String>) -> Self {
        Self::UnknownTable { table: table.into() }
    }

    pub fn invalid(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidData {
            table: table.into(),
            message: message.into(),
        }
    }
}
