use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaixaError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported statement format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown company: {0}")]
    UnknownCompany(String),

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Import of '{file}' failed: {source}")]
    Import {
        file: String,
        #[source]
        source: Box<CaixaError>,
    },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CaixaError>;
