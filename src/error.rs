use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Document error: {0}")]
    Docx(String),

    #[error("Missing sheet '{sheet}' in {file}")]
    MissingSheet { sheet: String, file: String },

    #[error("Unexpected statement layout: {0}")]
    Shape(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, RemitError>;
