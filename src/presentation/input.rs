use super::ui::help_line_count;
use crate::application::{App, AppMode, FormField, View};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Editing => Self::handle_editing_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportCsv | AppMode::ImportCsv => Self::handle_filename_input_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('e') => app.start_csv_export(),
                KeyCode::Char('l') => app.start_csv_import(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Tab => {
                app.next_view();
                return;
            }
            KeyCode::BackTab => {
                app.previous_view();
                return;
            }
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(view) = c.to_digit(10).and_then(|d| View::from_index(d as usize - 1)) {
                    app.set_view(view);
                }
                return;
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.show_help();
                return;
            }
            _ => {}
        }

        match app.view {
            View::Library => Self::handle_library_view(app, key),
            View::AddBook => Self::handle_add_book_view(app, key),
            View::Search => Self::handle_search_view(app, key),
            View::Statistics => {}
        }
    }

    fn handle_library_view(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous_book(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_book(),
            KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_book(),
            KeyCode::Esc => app.clear_status(),
            _ => {}
        }
    }

    fn handle_add_book_view(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.focus_previous_field(),
            KeyCode::Down | KeyCode::Char('j') => app.focus_next_field(),
            KeyCode::Enter => app.activate_field(),
            KeyCode::Char(' ') if app.form.focus == FormField::Read => app.toggle_read(),
            KeyCode::Char('+') if app.form.focus == FormField::Year => app.step_year(1),
            KeyCode::Char('-') if app.form.focus == FormField::Year => app.step_year(-1),
            KeyCode::Esc => app.clear_status(),
            _ => {}
        }
    }

    fn handle_search_view(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Char('/') | KeyCode::Enter => app.start_search(),
            KeyCode::Char('t') => app.toggle_search_field(),
            KeyCode::Esc => app.clear_search(),
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            KeyCode::Backspace => app.delete_char_before_cursor(),
            KeyCode::Delete => app.delete_char_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        let max_scroll = help_line_count().saturating_sub(1);
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll = (app.help_scroll + 1).min(max_scroll);
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll = (app.help_scroll + 5).min(max_scroll);
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            KeyCode::End => {
                app.help_scroll = max_scroll;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => match app.mode {
                AppMode::ExportCsv => app.export_csv(),
                AppMode::ImportCsv => app.import_csv(),
                _ => {}
            },
            KeyCode::Esc => app.cancel_filename_input(),
            KeyCode::Backspace => app.delete_char_before_cursor(),
            KeyCode::Delete => app.delete_char_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }
}
