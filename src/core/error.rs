use thiserror::Error;

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table parse error: {0}")]
    TableParse(String),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<toml::de::Error> for CombatError {
    fn from(e: toml::de::Error) -> Self {
        CombatError::TableParse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CombatError>;
