// src/errors.rs
use thiserror::Error;

/// Reasons the simulator form is rejected before anything leaves the page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Tous les champs doivent être remplis.")]
    MissingFields,

    #[error("L'email est invalide.")]
    InvalidEmail,

    #[error("L'âge doit être compris entre 18 et 100.")]
    InvalidAge,
}

/// Failures of one submission attempt on the client side.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("{0}")]
    Transport(String),

    #[error("Une erreur est survenue lors du calcul de la prime.")]
    HttpStatus { status: u16 },

    #[error("{0}")]
    Parse(String),

    /// The server answered with an explicit `error` field.
    #[error("{0}")]
    Application(String),

    #[error("L'élément #{0} n'existe pas dans le DOM.")]
    MissingElement(String),
}

impl From<reqwest::Error> for SubmissionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SubmissionError::Parse(e.to_string())
        } else {
            SubmissionError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(e: serde_json::Error) -> Self {
        SubmissionError::Parse(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum SimulateurError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Les données soumises sont invalides")]
    InvalidData,

    #[error("Ancienneté du permis invalide")]
    InvalidLicenseSeniority(String),

    #[error("{0}")]
    Calculation(String),
}

pub type Result<T> = std::result::Result<T, SimulateurError>;
