use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Invalid phone number: '{0}' (expected 8XXXXXXXXXX, +7XXXXXXXXXX or XXXXXXXXXX)")]
    InvalidPhone(String),

    #[error("Invalid price: '{0}' (expected a non-negative number)")]
    InvalidPrice(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u32 },

    #[error("Corrupt data in {table} row {row}, column {column}: {reason}")]
    DataCorruption {
        table: String,
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Api(String),
}

impl MenuError {
    /// Errors that leave the backing store in an unknown state and end the session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MenuError::DataCorruption { .. }
                | MenuError::Storage(_)
                | MenuError::Io(_)
                | MenuError::Serialization(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
