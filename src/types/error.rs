use thiserror::Error;

/// pagetally error types
#[derive(Error, Debug)]
pub enum PageTallyError {
    /// No source log was supplied
    #[error("no input file selected")]
    InputMissing,

    /// The source log lacks the required columns or cannot be tokenized
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A user-supplied date bound is not `dd/mm/yyyy`
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Spreadsheet generation failed for a reason other than I/O
    #[error("render error: {0}")]
    Render(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for pagetally
pub type Result<T> = std::result::Result<T, PageTallyError>;

impl From<csv::Error> for PageTallyError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => PageTallyError::Io(io),
                other => PageTallyError::Parse(format!("{:?}", other)),
            }
        } else {
            PageTallyError::Parse(err.to_string())
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for PageTallyError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        match err {
            rust_xlsxwriter::XlsxError::IoError(io) => PageTallyError::Io(io),
            other => PageTallyError::Render(other.to_string()),
        }
    }
}
