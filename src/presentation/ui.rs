use crate::application::{App, AppMode, EditTarget, FormField, StatusKind, View};
use crate::domain::Book;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_tabs(f, app, chunks[1]);
    match app.view {
        View::Library => render_library(f, app, chunks[2]),
        View::AddBook => render_add_book(f, app, chunks[2]),
        View::Search => render_search(f, app, chunks[2]),
        View::Statistics => render_statistics(f, app, chunks[2]),
    }
    render_status_bar(f, app, chunks[3]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "bookshelf - Personal Library Manager | {} | {} books",
        app.store.repository().path().display(),
        app.store.len()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| format!("{} {}", i + 1, view.title()));
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("Navigation"))
        .select(app.view.index())
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn book_line(book: &Book) -> Line<'static> {
    Line::from(vec![
        Span::styled(book.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" by {} ({})", book.author, book.year)),
    ])
}

fn book_detail_line(book: &Book) -> Line<'static> {
    let status_style = if book.read {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };
    Line::from(vec![
        Span::raw(format!("  Genre: {} | Status: ", book.genre)),
        Span::styled(book.status_label(), status_style),
    ])
}

fn render_library(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Your Library");

    if app.store.is_empty() {
        let empty = Paragraph::new("Your library is empty! Add some books to get started.")
            .block(block)
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .store
        .library()
        .books()
        .iter()
        .map(|book| ListItem::new(vec![book_line(book), book_detail_line(book)]))
        .collect();

    let list = List::new(items)
        .block(block.title_bottom("j/k: select | d: remove"))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected_book));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_add_book(f: &mut Frame, app: &App, area: Rect) {
    let editing_field = match (app.mode, app.edit_target) {
        (AppMode::Editing, Some(EditTarget::Form(field))) => Some(field),
        _ => None,
    };

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = field == app.form.focus;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let line = match field {
            FormField::Submit => Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("[ {} ]", field.label()), label_style),
            ]),
            FormField::Read => Line::from(vec![
                Span::raw(marker),
                Span::raw(app.form.value(field)),
                Span::raw(" "),
                Span::styled(field.label(), label_style),
            ]),
            _ => {
                let (value, value_style) = if editing_field == Some(field) {
                    (format!("{}_", app.input), Style::default().fg(Color::Green))
                } else {
                    (app.form.value(field), Style::default())
                };
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(format!("{:<18}", field.label()), label_style),
                    Span::styled(value, value_style),
                ])
            }
        };
        lines.push(line);
        lines.push(Line::default());
    }

    let hint = format!(
        "j/k: move | Enter: edit/toggle/submit | +/-: year (1-{})",
        app.current_year
    );
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Add a New Book")
            .title_bottom(hint),
    );
    f.render_widget(form, area);
}

fn render_search(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let editing = app.mode == AppMode::Editing && app.edit_target == Some(EditTarget::Search);
    let query = if editing {
        format!("{}_", app.search_query)
    } else {
        app.search_query.clone()
    };
    let input = Paragraph::new(query)
        .style(if editing {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        })
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Search by: {} (t to switch) | Enter {} to search:",
            app.search_field,
            app.search_field.label().to_lowercase()
        )));
    f.render_widget(input, chunks[0]);

    let results_block = Block::default().borders(Borders::ALL).title("Results");
    if app.search_query.is_empty() {
        f.render_widget(
            Paragraph::new("Press / to start typing.").block(results_block),
            chunks[1],
        );
        return;
    }

    let books = app.search_result_books();
    if books.is_empty() {
        let none = Paragraph::new(format!("No books found matching '{}'", app.search_query))
            .style(Style::default().fg(Color::Cyan))
            .block(results_block);
        f.render_widget(none, chunks[1]);
        return;
    }

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Found {} matching books:", books.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    for book in books {
        lines.push(Line::from(format!(
            "{} by {} ({}) - {} - {}",
            book.title,
            book.author,
            book.year,
            book.genre,
            book.status_label()
        )));
    }
    f.render_widget(Paragraph::new(lines).block(results_block), chunks[1]);
}

fn render_statistics(f: &mut Frame, app: &App, area: Rect) {
    let stats = app.store.statistics();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let metrics = Paragraph::new(vec![
        Line::from(format!("Total Books: {}", stats.total)),
        Line::from(format!(
            "Books Read:  {} ({:.1}%)",
            stats.read_count, stats.percent_read
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Library Statistics"));
    f.render_widget(metrics, chunks[0]);

    if stats.total == 0 {
        return;
    }

    let bars = [
        Bar::default()
            .value(stats.read_count as u64)
            .label(Line::from("Read"))
            .style(Style::default().fg(Color::Green)),
        Bar::default()
            .value(stats.unread_count() as u64)
            .label(Line::from("Unread"))
            .style(Style::default().fg(Color::LightRed)),
    ];
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Reading Status (number of books)"),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(4)
        .max(stats.total as u64);
    f.render_widget(chart, chunks[1]);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (input_text, style) = match app.mode {
        AppMode::Normal | AppMode::Editing => match &app.status_message {
            Some(status) => (status.text.clone(), status_style(status.kind)),
            None if app.mode == AppMode::Editing => (
                "Editing (Enter to keep, Esc to cancel)".to_string(),
                Style::default().fg(Color::Green),
            ),
            None => (
                "1-4/Tab: switch view | Ctrl+E: export CSV | Ctrl+L: import CSV | F1/?: help | q: quit"
                    .to_string(),
                Style::default(),
            ),
        },
        AppMode::Help => (
            "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
            Style::default().fg(Color::Cyan),
        ),
        AppMode::ExportCsv => (
            format!("Export CSV as: {} (Enter to export, Esc to cancel)", app.filename_input),
            Style::default().fg(Color::Magenta),
        ),
        AppMode::ImportCsv => (
            format!("Import CSV from: {} (Enter to import, Esc to cancel)", app.filename_input),
            Style::default().fg(Color::Green),
        ),
    };

    let status = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Info => Style::default().fg(Color::Cyan),
        StatusKind::Success => Style::default().fg(Color::Green),
        StatusKind::Warning => Style::default().fg(Color::Yellow),
        StatusKind::Error => Style::default().fg(Color::Red),
    }
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "bookshelf Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

/// Number of lines in the help text; the furthest the help can scroll.
pub fn help_line_count() -> usize {
    HELP_TEXT.lines().count()
}

const HELP_TEXT: &str = r#"BOOKSHELF - PERSONAL LIBRARY MANAGER

=== VIEWS ===
1               View Library     all books, newest last
2               Add Book         form for a new book
3               Search Books     search by title or author
4               Statistics       totals and a read/unread chart
Tab/Shift+Tab   Next / previous view

=== VIEW LIBRARY ===
↑↓ or j/k       Select a book
d / Delete      Remove the selected book

=== ADD BOOK ===
↑↓ or j/k       Move between fields
Enter           Edit a text field, toggle "read", or submit
Space           Toggle "read" when it is selected
+ / -           Step the year when it is selected
                Title and author are required
                Year must be between 1 and the current year

=== SEARCH BOOKS ===
/ or Enter      Start typing a search term
t               Switch between title and author
Esc             Clear the search
                Matching ignores case and finds partial words

=== WHILE TYPING ===
Enter           Keep the text
Esc             Discard the text
←→ Home End     Move the cursor

=== FILES ===
Ctrl+E          Export the library to a CSV file
Ctrl+L          Import books from a CSV file (title,author,year,genre,read)
                The library is saved automatically after every change

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home / End      Jump to top / bottom of help text
Esc/F1/?/q      Close this help window

q               Quit"#;
