use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use revpct::{coerce_input, AppendOutcome, Session};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Total,
    Rate,
}

impl Field {
    pub fn next(&self) -> Self {
        match self {
            Field::Total => Field::Rate,
            Field::Rate => Field::Total,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Field::Total => "Number",
            Field::Rate => "%",
        }
    }
}

pub struct App {
    pub session: Session,
    pub total_input: String,
    pub rate_input: String,
    pub focus: Field,
    pub state: TableState,
    pub status: Option<String>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let total_input = format_input(session.total());
        let rate_input = format_input(session.rate());

        Self {
            session,
            total_input,
            rate_input,
            focus: Field::Total,
            state: TableState::default(),
            status: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    /// Type one character into the focused field
    pub fn push_char(&mut self, c: char) {
        self.input_mut().push(c);
        self.input_changed();
    }

    pub fn backspace(&mut self) {
        if self.input_mut().pop().is_some() {
            self.input_changed();
        }
    }

    fn input_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Total => &mut self.total_input,
            Field::Rate => &mut self.rate_input,
        }
    }

    fn input_changed(&mut self) {
        match self.focus {
            Field::Total => self.session.set_total(coerce_input(&self.total_input)),
            Field::Rate => self.session.set_rate(coerce_input(&self.rate_input)),
        }
        self.status = None;
    }

    pub fn append(&mut self) {
        self.status = Some(match self.session.append() {
            AppendOutcome::Appended(entry) => {
                self.state.select(Some(self.session.entries().len() - 1));
                format!("Added {:.2} + {:.2}", entry.base, entry.amount)
            }
            AppendOutcome::AlreadyAdded => {
                "Already added - change an input to add again".to_string()
            }
            AppendOutcome::NothingToAppend => "Nothing to add".to_string(),
        });
    }

    pub fn clear(&mut self) {
        self.session.clear();
        self.state.select(None);
        self.status = Some("Results cleared".to_string());
    }

    pub fn next(&mut self) {
        let len = self.session.entries().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.session.entries().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Apply one key press. Returns `true` when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab => self.next_field(),
            KeyCode::Enter | KeyCode::Char('a') => self.append(),
            KeyCode::Char('c') => self.clear(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => self.push_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Home if !self.session.entries().is_empty() => self.state.select(Some(0)),
            KeyCode::End if !self.session.entries().is_empty() => {
                self.state.select(Some(self.session.entries().len() - 1));
            }
            _ => {}
        }

        false
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(4), // Inputs + current result
            Constraint::Min(0),    // Results table
            Constraint::Length(3), // Totals
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0]);
    render_inputs(f, chunks[1], app);
    render_table(f, chunks[2], app);
    render_totals(f, chunks[3], app);
    render_status_bar(f, chunks[4], app);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        "Calculate reverse percentage",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_inputs(f: &mut Frame, area: Rect, app: &App) {
    let input_spans = |field: Field, value: &str| {
        let style = if app.focus == field {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };
        let cursor = if app.focus == field { "▏" } else { " " };
        vec![
            Span::styled(format!("{}: ", field.label()), label_style()),
            Span::styled(format!("{:<12}", format!("{}{}", value, cursor)), style),
            Span::raw("   "),
        ]
    };

    let mut spans = input_spans(Field::Total, &app.total_input);
    spans.extend(input_spans(Field::Rate, &app.rate_input));

    let result_line = match app.session.current() {
        Some(entry) => Line::from(vec![
            Span::styled("original Val: ", label_style()),
            Span::styled(format!("{:.2}", entry.base), Style::default().fg(Color::Green)),
            Span::raw("   "),
            Span::styled("% Val: ", label_style()),
            Span::styled(format!("{:.2}", entry.amount), Style::default().fg(Color::Yellow)),
        ]),
        None => Line::from(Span::styled(
            "Enter a number and a percentage",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    };

    let panel = Paragraph::new(vec![Line::from(spans), result_line]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Input "),
    );

    f.render_widget(panel, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Results ");

    if app.session.entries().is_empty() {
        let empty = Paragraph::new(Span::styled(
            "  No results yet - press Enter to append",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header_cells = ["Original Number", "% Value", "%", "Total"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.session.entries().iter().map(|entry| {
        let cells = vec![
            Cell::from(format!("{:.2}", entry.base)),
            Cell::from(format!("{:.2}", entry.amount)).style(Style::default().fg(Color::Yellow)),
            Cell::from(format_input(entry.rate)),
            Cell::from(format!("{:.2}", entry.total())).style(Style::default().fg(Color::Green)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(18),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.session.aggregate() {
        Some(sums) => Line::from(vec![
            Span::styled("∑ original Val: ", label_style()),
            Span::raw(format!("{:.2}", sums.base_total)),
            Span::raw("   "),
            Span::styled("∑ % Val: ", label_style()),
            Span::raw(format!("{:.2}", sums.amount_total)),
            Span::raw("   "),
            Span::styled("∑ : ", label_style()),
            Span::styled(format!("{:.2}", sums.grand_total), Style::default().fg(Color::Green)),
        ]),
        None => Line::from(""),
    };

    let totals = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Totals "),
    );

    f.render_widget(totals, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![Span::styled(
        format!(" Rows: {} ", app.session.entries().len()),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(status) = &app.status {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(status.clone(), Style::default().fg(Color::Green)));
    }

    status_spans.push(Span::raw(" | "));
    if app.session.can_append() {
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Append | "));
    } else {
        status_spans.push(Span::styled("Enter", Style::default().fg(Color::DarkGray)));
        status_spans.push(Span::styled(" Append (added) | ", Style::default().fg(Color::DarkGray)));
    }
    status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Clear | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Field | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn label_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

/// Shortest decimal form, as typed into a field ("1000", "7.5")
fn format_input(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_new_app_shows_session_inputs() {
        let app = App::new(Session::new());

        assert_eq!(app.total_input, "1000");
        assert_eq!(app.rate_input, "10");
        assert_eq!(app.focus, Field::Total);
    }

    #[test]
    fn test_typing_updates_session() {
        let mut app = App::new(Session::new());

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.rate_input, "");
        assert!(app.session.current().is_none());

        type_text(&mut app, "19");
        assert_eq!(app.session.rate(), 19.0);

        press(&mut app, KeyCode::BackTab);
        for _ in 0..4 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "119");

        let entry = app.session.current().unwrap();
        assert_eq!(entry.base, 100.0);
        assert_eq!(entry.amount, 19.0);
    }

    #[test]
    fn test_enter_appends_once_until_input_changes() {
        let mut app = App::new(Session::new());

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.entries().len(), 1);
        assert_eq!(app.state.selected(), Some(0));

        type_text(&mut app, "0");
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.session.entries().len(), 2);
        assert_eq!(app.session.entries()[1].base, 9090.91);
    }

    #[test]
    fn test_clear_key() {
        let mut app = App::new(Session::new());
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('c'));

        assert!(app.session.entries().is_empty());
        assert!(app.session.can_append());
        assert_eq!(app.state.selected(), None);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(Session::new());

        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(press(&mut app, KeyCode::Esc));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!press(&mut app, KeyCode::Char('x')));
    }

    #[test]
    fn test_render_results_and_totals() {
        let mut app = App::new(Session::new());
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, ".");
        press(&mut app, KeyCode::Enter);

        let text = screen(&mut app);

        assert!(text.contains("Calculate reverse percentage"));
        assert!(text.contains("original Val: 909.09"));
        assert!(text.contains("Original Number"));
        assert!(text.contains("1818.18"));
        assert!(text.contains("181.82"));
        assert!(text.contains("2000.00"));
    }

    #[test]
    fn test_render_without_result() {
        let mut app = App::new(Session::with_inputs(0.0, 10.0));

        let text = screen(&mut app);

        assert!(text.contains("Enter a number and a percentage"));
        assert!(text.contains("No results yet"));
    }
}
