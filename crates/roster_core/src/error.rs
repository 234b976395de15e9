use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Entity not found: {name}")]
    EntityNotFound { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl RosterError {
    /// Whether the caller can fix this by changing user input and retrying
    pub fn is_user_error(&self) -> bool {
        match self {
            RosterError::InvalidConfig(_) => true,
            RosterError::EntityNotFound { .. } => true,
            RosterError::ConfigParse(_) => true,
            RosterError::Io(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
