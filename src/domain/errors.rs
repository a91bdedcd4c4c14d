#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    MissingTitle,
    MissingAuthor,
    InvalidYear(String),
    YearOutOfRange { year: i32, max: i32 },
    IndexOutOfRange { index: usize, len: usize },
}

impl DomainError {
    /// True for the errors raised by a blank title or author.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, DomainError::MissingTitle | DomainError::MissingAuthor)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::MissingTitle => write!(f, "Title is required"),
            DomainError::MissingAuthor => write!(f, "Author is required"),
            DomainError::InvalidYear(input) => {
                write!(f, "Invalid year: '{}'", input)
            }
            DomainError::YearOutOfRange { year, max } => {
                write!(f, "Year {} must be between 1 and {}", year, max)
            }
            DomainError::IndexOutOfRange { index, len } => {
                write!(f, "No book at position {} (library has {})", index, len)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
