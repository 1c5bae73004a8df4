use thiserror::Error;

/// Problems loading or validating a [`crate::GameConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read or write the config file")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid JSON")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Problems reading or writing the persisted best score
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not access the score file")]
    Io(#[from] std::io::Error),
    #[error("score file is corrupt")]
    Parse(#[from] serde_json::Error),
}
