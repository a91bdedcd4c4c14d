use serde::{Deserialize, Serialize};

/// A single catalog entry.
///
/// Books carry no identity of their own; a book is addressed by its
/// position in the [`Library`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
    pub read: bool,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.read { "Read" } else { "Unread" }
    }

    /// Returns the value of the given field, as used by search.
    pub fn field(&self, field: SearchField) -> &str {
        match field {
            SearchField::Title => &self.title,
            SearchField::Author => &self.author,
        }
    }
}

/// Which book field a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Title,
    Author,
}

impl SearchField {
    pub fn toggle(self) -> Self {
        match self {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchField::Title => "Title",
            SearchField::Author => "Author",
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate counts over a library.
///
/// `percent_read` is kept unrounded; formatting is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LibraryStatistics {
    pub total: usize,
    pub read_count: usize,
    pub percent_read: f64,
}

impl LibraryStatistics {
    pub fn unread_count(&self) -> usize {
        self.total - self.read_count
    }
}

/// An ordered collection of books.
///
/// Serializes as a bare JSON array so the storage file holds nothing but
/// the books themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Appends a book to the end of the library.
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Removes the book at `index`, shifting every later book down by one.
    ///
    /// Returns `None` and leaves the library untouched when `index` is out
    /// of range.
    pub fn remove(&mut self, index: usize) -> Option<Book> {
        if index < self.books.len() {
            Some(self.books.remove(index))
        } else {
            None
        }
    }

    /// Returns the positions of every book whose `field` contains `term`,
    /// ignoring case. An empty term matches every book.
    pub fn search_positions(&self, term: &str, field: SearchField) -> Vec<usize> {
        let needle = term.to_lowercase();
        self.books
            .iter()
            .enumerate()
            .filter(|(_, book)| book.field(field).to_lowercase().contains(&needle))
            .map(|(index, _)| index)
            .collect()
    }

    /// Case-insensitive substring search, preserving library order.
    pub fn search(&self, term: &str, field: SearchField) -> Vec<&Book> {
        self.search_positions(term, field)
            .into_iter()
            .filter_map(|index| self.books.get(index))
            .collect()
    }

    pub fn statistics(&self) -> LibraryStatistics {
        let total = self.books.len();
        let read_count = self.books.iter().filter(|book| book.read).count();
        let percent_read = if total > 0 {
            read_count as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        LibraryStatistics {
            total,
            read_count,
            percent_read,
        }
    }
}
