//! The library store: one in-memory library mirrored to one file.
//!
//! Every mutation rewrites the whole storage file. Queries never touch
//! the disk.

use crate::domain::{Book, DomainError, Library, LibraryStatistics, SearchField};
use crate::infrastructure::{FileRepository, LoadOutcome, PersistenceError};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum StoreError {
    Domain(DomainError),
    Persistence(PersistenceError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Domain(e) => write!(f, "{}", e),
            StoreError::Persistence(e) => write!(f, "Could not save library: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Domain(e) => Some(e),
            StoreError::Persistence(e) => Some(e),
        }
    }
}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        StoreError::Domain(err)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        StoreError::Persistence(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Summary of a reload, for display to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadNotice {
    Loaded { count: usize },
    Missing,
    Corrupt { reason: String },
}

impl LoadNotice {
    pub fn is_warning(&self) -> bool {
        matches!(self, LoadNotice::Corrupt { .. })
    }

    pub fn message(&self) -> String {
        match self {
            LoadNotice::Loaded { count } => format!("Loaded {} books", count),
            LoadNotice::Missing => {
                "No existing library file found. Starting with an empty library.".to_string()
            }
            LoadNotice::Corrupt { .. } => {
                "Error loading library file. Starting with an empty library.".to_string()
            }
        }
    }
}

/// Owns the session's library and the file it is mirrored to.
///
/// # Examples
///
/// ```no_run
/// use bookshelf::application::LibraryStore;
/// use bookshelf::domain::{Book, SearchField};
/// use bookshelf::infrastructure::FileRepository;
///
/// let (mut store, _notice) = LibraryStore::open(FileRepository::new("library.txt"));
/// store.add(Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true)).unwrap();
/// assert_eq!(store.search("dune", SearchField::Title).len(), 1);
/// ```
#[derive(Debug)]
pub struct LibraryStore {
    library: Library,
    repository: FileRepository,
}

impl LibraryStore {
    /// Creates an empty store without reading the file.
    pub fn new(repository: FileRepository) -> Self {
        Self {
            library: Library::default(),
            repository,
        }
    }

    /// Creates a store and loads whatever the file holds.
    pub fn open(repository: FileRepository) -> (Self, LoadNotice) {
        let mut store = Self::new(repository);
        let notice = store.reload();
        (store, notice)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn repository(&self) -> &FileRepository {
        &self.repository
    }

    pub fn len(&self) -> usize {
        self.library.len()
    }

    pub fn is_empty(&self) -> bool {
        self.library.is_empty()
    }

    /// Appends a book and persists.
    ///
    /// No validation happens here. If the write fails the book stays in
    /// memory and the error is returned.
    pub fn add(&mut self, book: Book) -> StoreResult<()> {
        info!(title = %book.title, author = %book.author, "adding book");
        self.library.add(book);
        self.persist()
    }

    /// Appends several books with a single write. Returns how many were added.
    pub fn add_many(&mut self, books: Vec<Book>) -> StoreResult<usize> {
        let count = books.len();
        for book in books {
            self.library.add(book);
        }
        info!(count, "added books");
        self.persist()?;
        Ok(count)
    }

    /// Removes the book at `index` and persists.
    ///
    /// An out-of-range index is reported as
    /// [`DomainError::IndexOutOfRange`]; the library and the file are left
    /// as they were.
    pub fn remove(&mut self, index: usize) -> StoreResult<Book> {
        let len = self.library.len();
        let book = self
            .library
            .remove(index)
            .ok_or(DomainError::IndexOutOfRange { index, len })?;
        info!(index, title = %book.title, "removed book");
        self.persist()?;
        Ok(book)
    }

    pub fn search(&self, term: &str, field: SearchField) -> Vec<&Book> {
        self.library.search(term, field)
    }

    pub fn search_positions(&self, term: &str, field: SearchField) -> Vec<usize> {
        self.library.search_positions(term, field)
    }

    pub fn statistics(&self) -> LibraryStatistics {
        self.library.statistics()
    }

    /// Writes the full library to the storage file.
    pub fn persist(&self) -> StoreResult<()> {
        self.repository.save(&self.library).map_err(|e| {
            warn!(path = %self.repository.path().display(), error = %e, "failed to save library");
            StoreError::from(e)
        })?;
        debug!(books = self.library.len(), "library saved");
        Ok(())
    }

    /// Replaces the in-memory library with the file's contents.
    ///
    /// A missing or unreadable file leaves the store empty. Nothing is
    /// written back, so a corrupt file survives until the next mutation.
    pub fn reload(&mut self) -> LoadNotice {
        let path = self.repository.path().display().to_string();
        match self.repository.load() {
            LoadOutcome::Loaded(library) => {
                let count = library.len();
                self.library = library;
                info!(%path, count, "library loaded");
                LoadNotice::Loaded { count }
            }
            LoadOutcome::Missing => {
                self.library = Library::default();
                info!(%path, "no library file, starting empty");
                LoadNotice::Missing
            }
            LoadOutcome::Corrupt(reason) => {
                self.library = Library::default();
                warn!(%path, %reason, "library file unreadable, starting empty");
                LoadNotice::Corrupt { reason }
            }
        }
    }
}
