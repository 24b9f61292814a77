use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown location '{id}'")]
    UnknownLocation { id: String },

    #[error("Unknown time granularity '{name}'")]
    UnknownGranularity { name: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Character creation incomplete: {missing} not chosen")]
    CharacterIncomplete { missing: &'static str },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
