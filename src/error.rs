use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // Preference store errors
    #[error("Preference store error: {0}")]
    Preference(String),

    // Network errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    // Rendering errors
    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SiteResult<T> = Result<T, SiteError>;
