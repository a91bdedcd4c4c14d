//! Application state for the terminal book catalog.
//!
//! [`App`] owns the [`LibraryStore`] for the session together with all UI
//! state. Every user intent is a method here; the presentation layer only
//! maps keys to these methods and draws the result.

use super::store::{LibraryStore, LoadNotice, StoreError};
use crate::domain::{Book, BookValidator, CsvExporter, DomainError, SearchField, default_year};
use tracing::{error, info};

/// The four navigable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Library,
    AddBook,
    Search,
    Statistics,
}

impl View {
    pub const ALL: [View; 4] = [View::Library, View::AddBook, View::Search, View::Statistics];

    pub fn title(self) -> &'static str {
        match self {
            View::Library => "View Library",
            View::AddBook => "Add Book",
            View::Search => "Search Books",
            View::Statistics => "Statistics",
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Library => 0,
            View::AddBook => 1,
            View::Search => 2,
            View::Statistics => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> View {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> View {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Represents the current mode of the application.
///
/// The mode decides how key presses are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation and shortcuts
    Normal,
    /// Typing into a form field or the search box
    Editing,
    /// Help overlay is displayed
    Help,
    /// CSV export dialog is open
    ExportCsv,
    /// CSV import dialog is open
    ImportCsv,
}

/// Rows of the add-book form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Author,
    Year,
    Genre,
    Read,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Author,
        FormField::Year,
        FormField::Genre,
        FormField::Read,
        FormField::Submit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Book Title",
            FormField::Author => "Author",
            FormField::Year => "Publication Year",
            FormField::Genre => "Genre",
            FormField::Read => "Have you read this book?",
            FormField::Submit => "Add Book",
        }
    }

    /// Fields edited as free text.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormField::Title | FormField::Author | FormField::Year | FormField::Genre
        )
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> FormField {
        Self::ALL[(self.position() + 1).min(Self::ALL.len() - 1)]
    }

    pub fn previous(self) -> FormField {
        Self::ALL[self.position().saturating_sub(1)]
    }
}

/// Raw contents of the add-book form.
#[derive(Debug, Clone, PartialEq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    pub read: bool,
    pub focus: FormField,
}

impl BookForm {
    pub fn new(current_year: i32) -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            year: default_year(current_year).to_string(),
            genre: String::new(),
            read: false,
            focus: FormField::Title,
        }
    }

    /// Text of a field as shown in the form.
    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Author => self.author.clone(),
            FormField::Year => self.year.clone(),
            FormField::Genre => self.genre.clone(),
            FormField::Read => (if self.read { "[x]" } else { "[ ]" }).to_string(),
            FormField::Submit => String::new(),
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Author => Some(&mut self.author),
            FormField::Year => Some(&mut self.year),
            FormField::Genre => Some(&mut self.genre),
            FormField::Read | FormField::Submit => None,
        }
    }
}

/// What the editing buffer is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Form(FormField),
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Main application state: the store plus everything the UI shows.
#[derive(Debug)]
pub struct App {
    /// The session's library and its storage file
    pub store: LibraryStore,
    /// Screen currently displayed
    pub view: View,
    /// Current application mode
    pub mode: AppMode,
    /// Highlighted entry in the library list (zero-based)
    pub selected_book: usize,
    /// Add-book form contents
    pub form: BookForm,
    /// Field being edited while in editing mode
    pub edit_target: Option<EditTarget>,
    /// Editing buffer for form fields
    pub input: String,
    /// Cursor position, in characters, within the active buffer
    pub cursor_position: usize,
    /// Field the search term is matched against
    pub search_field: SearchField,
    /// Search term
    pub search_query: String,
    /// Library positions matching the current search
    pub search_results: Vec<usize>,
    /// Temporary status message to display
    pub status_message: Option<StatusMessage>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Upper bound for publication years
    pub current_year: i32,
}

impl App {
    /// Builds the application around an opened store.
    ///
    /// The load notice becomes the first status message, so a missing or
    /// corrupt library file is visible as soon as the UI starts.
    pub fn new(store: LibraryStore, notice: LoadNotice, current_year: i32) -> Self {
        let kind = if notice.is_warning() {
            StatusKind::Warning
        } else {
            StatusKind::Info
        };
        let status_message = Some(StatusMessage::new(kind, notice.message()));

        Self {
            store,
            view: View::Library,
            mode: AppMode::Normal,
            selected_book: 0,
            form: BookForm::new(current_year),
            edit_target: None,
            input: String::new(),
            cursor_position: 0,
            search_field: SearchField::default(),
            search_query: String::new(),
            search_results: Vec::new(),
            status_message,
            help_scroll: 0,
            filename_input: String::new(),
            current_year,
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status_message = Some(StatusMessage::new(kind, text));
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    // ----- navigation -----

    pub fn set_view(&mut self, view: View) {
        self.view = view;
        self.clamp_selection();
    }

    pub fn next_view(&mut self) {
        self.set_view(self.view.next());
    }

    pub fn previous_view(&mut self) {
        self.set_view(self.view.previous());
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    // ----- library view -----

    pub fn select_next_book(&mut self) {
        if self.selected_book + 1 < self.store.len() {
            self.selected_book += 1;
        }
    }

    pub fn select_previous_book(&mut self) {
        self.selected_book = self.selected_book.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.store.len();
        if self.selected_book >= len {
            self.selected_book = len.saturating_sub(1);
        }
    }

    /// Removes the highlighted book from the library.
    pub fn remove_selected_book(&mut self) {
        match self.store.remove(self.selected_book) {
            Ok(book) => {
                self.set_status(
                    StatusKind::Success,
                    format!("'{}' removed successfully!", book.title),
                );
            }
            Err(StoreError::Domain(DomainError::IndexOutOfRange { .. })) => {
                self.set_status(StatusKind::Info, "Your library is empty!");
            }
            Err(e) => {
                error!(error = %e, "remove failed to persist");
                self.set_status(StatusKind::Error, e.to_string());
            }
        }
        self.library_changed();
    }

    /// Keeps derived UI state in step with the library after a mutation.
    fn library_changed(&mut self) {
        self.clamp_selection();
        self.perform_search();
    }

    // ----- add-book form -----

    pub fn focus_next_field(&mut self) {
        self.form.focus = self.form.focus.next();
    }

    pub fn focus_previous_field(&mut self) {
        self.form.focus = self.form.focus.previous();
    }

    /// Acts on the focused form row: edit text, toggle the checkbox, or
    /// submit.
    pub fn activate_field(&mut self) {
        match self.form.focus {
            FormField::Read => self.toggle_read(),
            FormField::Submit => self.submit_book(),
            field => self.start_editing(EditTarget::Form(field)),
        }
    }

    pub fn toggle_read(&mut self) {
        self.form.read = !self.form.read;
    }

    /// Steps the form year by `delta`, staying within `1..=current_year`.
    ///
    /// Unparseable text is replaced by the default year.
    pub fn step_year(&mut self, delta: i32) {
        let year = match self.form.year.trim().parse::<i32>() {
            Ok(year) => year.saturating_add(delta).clamp(1, self.current_year),
            Err(_) => default_year(self.current_year),
        };
        self.form.year = year.to_string();
    }

    /// Validates the form and adds the book.
    ///
    /// Once the book is added the form is reset, even if saving failed. On
    /// a validation error nothing is added and the form keeps its contents.
    pub fn submit_book(&mut self) {
        let result = BookValidator::validate(
            &self.form.title,
            &self.form.author,
            &self.form.year,
            &self.form.genre,
            self.form.read,
            self.current_year,
        );

        let book = match result {
            Ok(book) => book,
            Err(e) if e.is_missing_field() => {
                self.set_status(StatusKind::Error, "Title and author are required!");
                return;
            }
            Err(e) => {
                self.set_status(StatusKind::Error, e.to_string());
                return;
            }
        };

        let title = book.title.clone();
        match self.store.add(book) {
            Ok(()) => {
                self.set_status(
                    StatusKind::Success,
                    format!("'{}' added to your library!", title),
                );
            }
            Err(e) => {
                error!(error = %e, "add failed to persist");
                self.set_status(
                    StatusKind::Error,
                    format!("'{}' added but not saved: {}", title, e),
                );
            }
        }
        // the book is in memory either way; a second submit would duplicate it
        self.form = BookForm::new(self.current_year);
        self.library_changed();
    }

    // ----- editing -----

    /// Enters editing mode with the target's current text in the buffer.
    pub fn start_editing(&mut self, target: EditTarget) {
        let text = match target {
            EditTarget::Form(field) if field.is_text() => self.form.value(field),
            EditTarget::Form(_) => return,
            EditTarget::Search => self.search_query.clone(),
        };

        self.mode = AppMode::Editing;
        self.edit_target = Some(target);
        self.cursor_position = text.chars().count();
        match target {
            EditTarget::Form(_) => self.input = text,
            EditTarget::Search => {}
        }
        self.status_message = None;
    }

    /// Leaves editing mode, keeping what was typed.
    pub fn finish_editing(&mut self) {
        match self.edit_target.take() {
            Some(EditTarget::Form(field)) => {
                let text = std::mem::take(&mut self.input);
                if let Some(slot) = self.form.text_mut(field) {
                    *slot = text;
                }
                self.form.focus = field.next();
            }
            Some(EditTarget::Search) => self.perform_search(),
            None => {}
        }

        self.mode = AppMode::Normal;
        self.cursor_position = 0;
    }

    /// Leaves editing mode, discarding what was typed.
    pub fn cancel_editing(&mut self) {
        if self.edit_target.take() == Some(EditTarget::Search) {
            self.search_query.clear();
            self.search_results.clear();
        }
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    fn active_buffer(&self) -> Option<&String> {
        match (self.mode, self.edit_target) {
            (AppMode::Editing, Some(EditTarget::Form(_))) => Some(&self.input),
            (AppMode::Editing, Some(EditTarget::Search)) => Some(&self.search_query),
            (AppMode::ExportCsv | AppMode::ImportCsv, _) => Some(&self.filename_input),
            _ => None,
        }
    }

    fn active_buffer_mut(&mut self) -> Option<&mut String> {
        match (self.mode, self.edit_target) {
            (AppMode::Editing, Some(EditTarget::Form(_))) => Some(&mut self.input),
            (AppMode::Editing, Some(EditTarget::Search)) => Some(&mut self.search_query),
            (AppMode::ExportCsv | AppMode::ImportCsv, _) => Some(&mut self.filename_input),
            _ => None,
        }
    }

    fn buffer_changed(&mut self) {
        // search results follow the query as it is typed
        if self.edit_target == Some(EditTarget::Search) {
            self.perform_search();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.cursor_position;
        let Some(buffer) = self.active_buffer_mut() else {
            return;
        };
        let at = byte_index(buffer, cursor);
        buffer.insert(at, c);
        self.cursor_position += 1;
        self.buffer_changed();
    }

    pub fn delete_char_before_cursor(&mut self) {
        let cursor = self.cursor_position;
        if cursor == 0 {
            return;
        }
        let Some(buffer) = self.active_buffer_mut() else {
            return;
        };
        let at = byte_index(buffer, cursor - 1);
        buffer.remove(at);
        self.cursor_position -= 1;
        self.buffer_changed();
    }

    pub fn delete_char_at_cursor(&mut self) {
        let cursor = self.cursor_position;
        let Some(buffer) = self.active_buffer_mut() else {
            return;
        };
        if cursor < buffer.chars().count() {
            let at = byte_index(buffer, cursor);
            buffer.remove(at);
            self.buffer_changed();
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.active_buffer().map_or(0, |b| b.chars().count());
        if self.cursor_position < len {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.active_buffer().map_or(0, |b| b.chars().count());
    }

    // ----- search -----

    pub fn start_search(&mut self) {
        self.start_editing(EditTarget::Search);
    }

    pub fn toggle_search_field(&mut self) {
        self.search_field = self.search_field.toggle();
        self.perform_search();
    }

    /// Recomputes results for the current query.
    ///
    /// An empty query shows nothing rather than the whole library.
    pub fn perform_search(&mut self) {
        if self.search_query.is_empty() {
            self.search_results.clear();
        } else {
            self.search_results = self
                .store
                .search_positions(&self.search_query, self.search_field);
        }
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.search_results.clear();
    }

    /// Books matching the current search, in library order.
    pub fn search_result_books(&self) -> Vec<&Book> {
        self.search_results
            .iter()
            .filter_map(|index| self.store.library().get(*index))
            .collect()
    }

    // ----- CSV -----

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = "library.csv".to_string();
        self.cursor_position = self.filename_input.chars().count();
        self.status_message = None;
    }

    /// Switches to CSV import mode to prompt for a filename.
    pub fn start_csv_import(&mut self) {
        self.mode = AppMode::ImportCsv;
        self.filename_input = "books.csv".to_string();
        self.cursor_position = self.filename_input.chars().count();
        self.status_message = None;
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "library.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    pub fn get_csv_import_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "books.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Writes the library to the filename being entered.
    pub fn export_csv(&mut self) {
        let filename = self.get_csv_export_filename();
        let result = CsvExporter::export_to_csv(self.store.library(), &filename);
        self.set_csv_export_result(result);
    }

    /// Reads books from the filename being entered and adds them.
    pub fn import_csv(&mut self) {
        let filename = self.get_csv_import_filename();
        let result = CsvExporter::import_from_csv(&filename, self.current_year);
        self.set_csv_import_result(result);
    }

    pub fn set_csv_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                info!(%filename, "exported library to CSV");
                self.set_status(StatusKind::Success, format!("Exported to {}", filename));
            }
            Err(e) => {
                error!(error = %e, "CSV export failed");
                self.set_status(StatusKind::Error, format!("Export failed: {}", e));
            }
        }

        self.cancel_filename_input();
    }

    /// Appends imported books to the library; a failed import adds nothing.
    pub fn set_csv_import_result(&mut self, result: Result<Vec<Book>, String>) {
        match result {
            Ok(books) => match self.store.add_many(books) {
                Ok(count) => {
                    self.set_status(StatusKind::Success, format!("Imported {} books", count));
                }
                Err(e) => {
                    error!(error = %e, "import failed to persist");
                    self.set_status(StatusKind::Error, e.to_string());
                }
            },
            Err(e) => {
                error!(error = %e, "CSV import failed");
                self.set_status(StatusKind::Error, format!("Import failed: {}", e));
            }
        }

        self.cancel_filename_input();
        self.library_changed();
    }
}

/// Byte offset of the `char_index`-th character, or the end of `s`.
fn byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map_or(s.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::FileRepository;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    const YEAR: i32 = 2026;

    fn test_app() -> (TempDir, App) {
        let dir = tempdir().unwrap();
        let (store, notice) = LibraryStore::open(FileRepository::new(dir.path().join("library.txt")));
        (dir, App::new(store, notice, YEAR))
    }

    fn app_with_books() -> (TempDir, App) {
        let (dir, mut app) = test_app();
        app.store
            .add_many(vec![
                Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true),
                Book::new("Hobbit", "J.R.R. Tolkien", 1937, "Fantasy", false),
            ])
            .unwrap();
        (dir, app)
    }

    fn fill_form(app: &mut App, title: &str, author: &str) {
        app.form.title = title.to_string();
        app.form.author = author.to_string();
    }

    #[test]
    fn test_app_new_missing_file() {
        let (_dir, app) = test_app();
        assert_eq!(app.view, View::Library);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.form.year, "2023");
        assert!(app.search_query.is_empty());

        let status = app.status_message.unwrap();
        assert_eq!(status.kind, StatusKind::Info);
        assert!(status.text.starts_with("No existing library file found"));
    }

    #[test]
    fn test_app_new_loaded_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.txt");
        fs::write(
            &path,
            r#"[{"title":"Dune","author":"Frank Herbert","year":1965,"genre":"Sci-Fi","read":true}]"#,
        )
        .unwrap();

        let (store, notice) = LibraryStore::open(FileRepository::new(&path));
        let app = App::new(store, notice, YEAR);

        assert_eq!(app.store.len(), 1);
        assert_eq!(
            app.status_message,
            Some(StatusMessage::new(StatusKind::Info, "Loaded 1 books"))
        );
    }

    #[test]
    fn test_app_new_corrupt_file_warns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.txt");
        fs::write(&path, "garbage").unwrap();

        let (store, notice) = LibraryStore::open(FileRepository::new(&path));
        let app = App::new(store, notice, YEAR);

        assert!(app.store.is_empty());
        let status = app.status_message.unwrap();
        assert_eq!(status.kind, StatusKind::Warning);
        assert_eq!(
            status.text,
            "Error loading library file. Starting with an empty library."
        );
    }

    #[test]
    fn test_view_cycling() {
        let (_dir, mut app) = test_app();
        app.next_view();
        assert_eq!(app.view, View::AddBook);
        app.previous_view();
        app.previous_view();
        assert_eq!(app.view, View::Statistics);
        assert_eq!(View::from_index(2), Some(View::Search));
        assert_eq!(View::from_index(4), None);
    }

    #[test]
    fn test_submit_book_adds_and_resets_form() {
        let (_dir, mut app) = test_app();
        fill_form(&mut app, "Dune", "Frank Herbert");
        app.form.year = "1965".to_string();
        app.form.genre = "Sci-Fi".to_string();
        app.form.read = true;

        app.submit_book();

        assert_eq!(app.store.len(), 1);
        assert_eq!(
            app.store.library().get(0),
            Some(&Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true))
        );
        assert_eq!(
            app.status_message,
            Some(StatusMessage::new(
                StatusKind::Success,
                "'Dune' added to your library!"
            ))
        );
        assert_eq!(app.form, BookForm::new(YEAR));
    }

    #[test]
    fn test_submit_book_requires_title_and_author() {
        let (_dir, mut app) = test_app();
        fill_form(&mut app, "Dune", "");

        app.submit_book();

        assert!(app.store.is_empty());
        assert_eq!(
            app.status_message,
            Some(StatusMessage::new(
                StatusKind::Error,
                "Title and author are required!"
            ))
        );
        // form keeps what the user typed
        assert_eq!(app.form.title, "Dune");
    }

    #[test]
    fn test_submit_book_resets_form_when_save_fails() {
        let dir = tempdir().unwrap();
        let repo = FileRepository::new(dir.path().join("missing-dir").join("library.txt"));
        let (store, notice) = LibraryStore::open(repo);
        let mut app = App::new(store, notice, YEAR);
        fill_form(&mut app, "Dune", "Frank Herbert");

        app.submit_book();

        assert_eq!(app.store.len(), 1);
        let status = app.status_message.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.starts_with("'Dune' added but not saved:"));
        assert_eq!(app.form, BookForm::new(YEAR));

        // submitting the cleared form must not append a second copy
        app.submit_book();
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn test_submit_book_rejects_future_year() {
        let (_dir, mut app) = test_app();
        fill_form(&mut app, "Later", "Someone");
        app.form.year = "2030".to_string();

        app.submit_book();

        assert!(app.store.is_empty());
        let status = app.status_message.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("2030"));
    }

    #[test]
    fn test_step_year_bounded() {
        let (_dir, mut app) = test_app();
        app.form.year = YEAR.to_string();
        app.step_year(1);
        assert_eq!(app.form.year, "2026");

        app.form.year = "1".to_string();
        app.step_year(-1);
        assert_eq!(app.form.year, "1");

        app.step_year(5);
        assert_eq!(app.form.year, "6");

        app.form.year = "abc".to_string();
        app.step_year(1);
        assert_eq!(app.form.year, "2023");
    }

    #[test]
    fn test_editing_form_field() {
        let (_dir, mut app) = test_app();
        app.set_view(View::AddBook);
        app.activate_field();
        assert_eq!(app.mode, AppMode::Editing);
        assert_eq!(app.edit_target, Some(EditTarget::Form(FormField::Title)));

        for c in "Emma".chars() {
            app.insert_char(c);
        }
        app.finish_editing();

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.form.title, "Emma");
        assert_eq!(app.form.focus, FormField::Author);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_cancel_editing_discards_input() {
        let (_dir, mut app) = test_app();
        app.form.title = "Keep".to_string();
        app.start_editing(EditTarget::Form(FormField::Title));
        app.insert_char('!');
        app.cancel_editing();

        assert_eq!(app.form.title, "Keep");
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.edit_target.is_none());
    }

    #[test]
    fn test_activate_read_and_submit_rows() {
        let (_dir, mut app) = test_app();
        app.form.focus = FormField::Read;
        app.activate_field();
        assert!(app.form.read);
        assert_eq!(app.mode, AppMode::Normal);

        fill_form(&mut app, "Emma", "Jane Austen");
        app.form.focus = FormField::Submit;
        app.activate_field();
        assert_eq!(app.store.len(), 1);
        assert!(app.store.library().books()[0].read);
    }

    #[test]
    fn test_cursor_editing_multibyte() {
        let (_dir, mut app) = test_app();
        app.start_editing(EditTarget::Form(FormField::Author));
        for c in "Brontë".chars() {
            app.insert_char(c);
        }
        app.move_cursor_left();
        app.delete_char_before_cursor();
        assert_eq!(app.input, "Bronë");

        app.move_cursor_home();
        app.delete_char_at_cursor();
        assert_eq!(app.input, "ronë");

        app.move_cursor_end();
        assert_eq!(app.cursor_position, 4);
        app.insert_char('s');
        assert_eq!(app.input, "ronës");
    }

    #[test]
    fn test_remove_selected_book() {
        let (_dir, mut app) = app_with_books();
        app.select_next_book();
        assert_eq!(app.selected_book, 1);

        app.remove_selected_book();

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.selected_book, 0);
        assert_eq!(
            app.status_message.as_ref().map(|s| s.text.as_str()),
            Some("'Hobbit' removed successfully!")
        );
    }

    #[test]
    fn test_remove_from_empty_library() {
        let (_dir, mut app) = test_app();
        app.remove_selected_book();
        assert!(app.store.is_empty());
        assert_eq!(app.status_message.unwrap().kind, StatusKind::Info);
    }

    #[test]
    fn test_selection_bounds() {
        let (_dir, mut app) = app_with_books();
        app.select_previous_book();
        assert_eq!(app.selected_book, 0);
        app.select_next_book();
        app.select_next_book();
        assert_eq!(app.selected_book, 1);
    }

    #[test]
    fn test_live_search() {
        let (_dir, mut app) = app_with_books();
        app.set_view(View::Search);
        app.start_search();

        app.insert_char('H');
        assert_eq!(app.search_results, vec![1]);

        app.delete_char_before_cursor();
        assert!(app.search_results.is_empty());

        for c in "herbert".chars() {
            app.insert_char(c);
        }
        // title search does not look at authors
        assert!(app.search_results.is_empty());

        app.toggle_search_field();
        assert_eq!(app.search_field, SearchField::Author);
        assert_eq!(app.search_results, vec![0]);
        assert_eq!(app.search_result_books()[0].title, "Dune");

        app.finish_editing();
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.search_query, "herbert");
    }

    #[test]
    fn test_cancel_search_clears_query() {
        let (_dir, mut app) = app_with_books();
        app.start_search();
        app.insert_char('d');
        assert_eq!(app.search_results, vec![0]);

        app.cancel_editing();
        assert!(app.search_query.is_empty());
        assert!(app.search_results.is_empty());
    }

    #[test]
    fn test_search_results_follow_removal() {
        let (_dir, mut app) = app_with_books();
        app.search_query = "o".to_string();
        app.perform_search();
        assert_eq!(app.search_results, vec![1]);

        app.selected_book = 0;
        app.remove_selected_book();
        assert_eq!(app.search_results, vec![0]);
        assert_eq!(app.search_result_books()[0].title, "Hobbit");
    }

    #[test]
    fn test_csv_export_and_import() {
        let (dir, mut app) = app_with_books();
        let csv_path = dir.path().join("out.csv").to_str().unwrap().to_string();

        app.start_csv_export();
        assert_eq!(app.mode, AppMode::ExportCsv);
        assert_eq!(app.filename_input, "library.csv");
        app.filename_input = csv_path.clone();
        app.export_csv();
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.status_message.as_ref().unwrap().kind, StatusKind::Success);

        app.start_csv_import();
        assert_eq!(app.mode, AppMode::ImportCsv);
        app.filename_input = csv_path;
        app.import_csv();

        assert_eq!(app.store.len(), 4);
        assert_eq!(
            app.status_message.as_ref().map(|s| s.text.as_str()),
            Some("Imported 2 books")
        );
        assert!(app.filename_input.is_empty());
    }

    #[test]
    fn test_csv_import_failure_adds_nothing() {
        let (_dir, mut app) = app_with_books();
        app.set_csv_import_result(Err("line 2: Title is required".to_string()));

        assert_eq!(app.store.len(), 2);
        assert_eq!(
            app.status_message,
            Some(StatusMessage::new(
                StatusKind::Error,
                "Import failed: line 2: Title is required"
            ))
        );
    }

    #[test]
    fn test_filename_defaults() {
        let (_dir, mut app) = test_app();
        assert_eq!(app.get_csv_export_filename(), "library.csv");
        assert_eq!(app.get_csv_import_filename(), "books.csv");

        app.start_csv_import();
        app.cancel_filename_input();
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.filename_input.is_empty());
    }

    #[test]
    fn test_help_mode() {
        let (_dir, mut app) = test_app();
        app.help_scroll = 3;
        app.show_help();
        assert_eq!(app.mode, AppMode::Help);
        assert_eq!(app.help_scroll, 0);
        app.close_help();
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_form_field_order() {
        assert_eq!(FormField::Title.previous(), FormField::Title);
        assert_eq!(FormField::Genre.next(), FormField::Read);
        assert_eq!(FormField::Submit.next(), FormField::Submit);
        assert!(FormField::Year.is_text());
        assert!(!FormField::Read.is_text());
    }
}
