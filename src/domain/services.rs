//! Validation and CSV interchange services for the book catalog.
//!
//! Form input arrives as raw text; [`BookValidator`] turns it into a
//! [`Book`] or a [`DomainError`]. [`CsvExporter`] moves a library in and
//! out of CSV files using the same validation rules.

use super::errors::{DomainError, DomainResult};
use super::models::{Book, Library};
use chrono::Datelike;
use serde::Deserialize;

/// Year pre-filled in the add form.
pub const DEFAULT_YEAR: i32 = 2023;

/// Returns the current calendar year from the local clock.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Returns the add form's starting year, never later than `current_year`.
pub fn default_year(current_year: i32) -> i32 {
    DEFAULT_YEAR.min(current_year).max(1)
}

/// Checks raw book input before it reaches the store.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::BookValidator;
///
/// let book = BookValidator::validate("Dune", "Frank Herbert", "1965", "Sci-Fi", true, 2024).unwrap();
/// assert_eq!(book.title, "Dune");
/// assert_eq!(book.year, 1965);
///
/// assert!(BookValidator::validate("", "Frank Herbert", "1965", "", false, 2024).is_err());
/// ```
pub struct BookValidator;

impl BookValidator {
    /// Validates form fields and builds a [`Book`].
    ///
    /// Title and author must contain something other than whitespace; the
    /// text is stored as typed. The year must be an integer between 1 and
    /// `current_year` inclusive. Genre may be empty.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks, checked in field order.
    pub fn validate(
        title: &str,
        author: &str,
        year: &str,
        genre: &str,
        read: bool,
        current_year: i32,
    ) -> DomainResult<Book> {
        if title.trim().is_empty() {
            return Err(DomainError::MissingTitle);
        }

        if author.trim().is_empty() {
            return Err(DomainError::MissingAuthor);
        }

        let year = Self::validate_year(year, current_year)?;

        Ok(Book::new(title, author, year, genre, read))
    }

    /// Parses a year and checks it lies in `1..=current_year`.
    pub fn validate_year(input: &str, current_year: i32) -> DomainResult<i32> {
        let year = input
            .trim()
            .parse::<i32>()
            .map_err(|_| DomainError::InvalidYear(input.to_string()))?;

        if (1..=current_year).contains(&year) {
            Ok(year)
        } else {
            Err(DomainError::YearOutOfRange {
                year,
                max: current_year,
            })
        }
    }
}

/// One CSV row before validation. Year stays textual so it goes through
/// the same checks as form input.
#[derive(Debug, Deserialize)]
struct CsvBookRecord {
    title: String,
    author: String,
    year: String,
    #[serde(default)]
    genre: String,
    read: bool,
}

pub struct CsvExporter;

impl CsvExporter {
    /// Writes every book to `filename` with a `title,author,year,genre,read`
    /// header, in library order. Returns the filename written.
    pub fn export_to_csv(library: &Library, filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;

        // serialize() only emits the header once it sees a row
        if library.is_empty() {
            writer
                .write_record(["title", "author", "year", "genre", "read"])
                .map_err(|e| e.to_string())?;
        }

        for book in library.books() {
            writer.serialize(book).map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())?;

        Ok(filename.to_string())
    }

    /// Reads and validates every row of a CSV file.
    ///
    /// The first bad row aborts the whole import, so callers either get all
    /// rows or none.
    pub fn import_from_csv(filename: &str, current_year: i32) -> Result<Vec<Book>, String> {
        let mut reader = csv::Reader::from_path(filename).map_err(|e| e.to_string())?;
        let mut books = Vec::new();

        for (row, record) in reader.deserialize::<CsvBookRecord>().enumerate() {
            // header occupies line 1
            let line = row + 2;
            let record = record.map_err(|e| format!("line {}: {}", line, e))?;
            let book = BookValidator::validate(
                &record.title,
                &record.author,
                &record.year,
                &record.genre,
                record.read,
                current_year,
            )
            .map_err(|e| format!("line {}: {}", line, e))?;
            books.push(book);
        }

        Ok(books)
    }
}
