use thiserror::Error;

/// Storage layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Version conflict on {entity} {id}")]
    VersionConflict { entity: &'static str, id: uuid::Uuid },

    #[error("Duplicate {entity}: {value}")]
    Duplicate { entity: &'static str, value: String },

    #[error(transparent)]
    CoreError(#[from] folio_core::error::CoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
