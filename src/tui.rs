use anyhow::{Result, anyhow};
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use std::io::stdout;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, warn};

use crate::app::{App, AppState, ApplyTicket, Effect, Event, InputMode, SearchTicket};
use crate::apply::{Confirmation, submit_and_confirm};
use crate::error::SearchError;
use crate::models::JobListing;
use crate::search::run_search;
use crate::services::Services;
use crate::theme::{ERROR_BG, ERROR_FG, ThemeColors};

const HEADER_HEIGHT: u16 = 6;
const CARD_HEIGHT: u16 = 10;
const DESCRIPTION_LINES: usize = 3;
const OTHER_COLUMNS: usize = 2;
const SEARCH_PLACEHOLDER: &str = "Search by title, skill, or company";

enum Message {
    Key(KeyEvent),
    Resize,
    InputClosed(String),
    SearchDone {
        seq: u64,
        result: Result<Vec<JobListing>, SearchError>,
    },
    ApplyDone {
        seq: u64,
        confirmation: Confirmation,
    },
}

pub async fn run_browse(app: App, services: Services) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, app, services).await;

    // Restore terminal
    let raw = disable_raw_mode();
    let screen = stdout().execute(LeaveAlternateScreen).map(|_| ());

    restore_outcome(result, raw, screen)
}

/// Every restore step has already run; the loop's own error is reported first.
fn restore_outcome(
    result: Result<()>,
    raw: std::io::Result<()>,
    screen: std::io::Result<()>,
) -> Result<()> {
    result?;
    raw?;
    screen?;
    Ok(())
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut app: App,
    services: Services,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx.clone());

    loop {
        terminal.draw(|frame| draw(frame, &app.state))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        match message {
            Message::Key(key) => {
                let Some(event) = key_to_event(key, &app.state) else {
                    continue;
                };
                match app.handle_event(event) {
                    Some(Effect::Quit) => break,
                    Some(Effect::Search(ticket)) => spawn_search(&services, ticket, tx.clone()),
                    Some(Effect::Apply(ticket)) => spawn_apply(&services, ticket, tx.clone()),
                    None => {}
                }
            }
            Message::Resize => {}
            Message::InputClosed(reason) => {
                return Err(anyhow!("terminal input closed: {}", reason));
            }
            Message::SearchDone { seq, result } => {
                app.state.finish_search(seq, result);
            }
            Message::ApplyDone { seq, confirmation } => {
                app.state.finish_apply(seq, confirmation);
            }
        }
    }

    info!("leaving browse view");
    Ok(())
}

fn spawn_input_reader(tx: UnboundedSender<Message>) {
    std::thread::spawn(move || loop {
        let message = match event::read() {
            Ok(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => Message::Key(key),
            Ok(TermEvent::Resize(..)) => Message::Resize,
            Ok(_) => continue,
            Err(e) => {
                warn!(error = %e, "failed to read terminal event");
                let _ = tx.send(Message::InputClosed(e.to_string()));
                break;
            }
        };
        if tx.send(message).is_err() {
            break;
        }
    });
}

fn spawn_search(services: &Services, ticket: SearchTicket, tx: UnboundedSender<Message>) {
    let source = Arc::clone(&services.source);
    tokio::spawn(async move {
        let result = run_search(source.as_ref(), &ticket.query).await;
        let _ = tx.send(Message::SearchDone {
            seq: ticket.seq,
            result,
        });
    });
}

fn spawn_apply(services: &Services, ticket: ApplyTicket, tx: UnboundedSender<Message>) {
    let webhook = Arc::clone(&services.webhook);
    let generator = Arc::clone(&services.generator);
    tokio::spawn(async move {
        let confirmation =
            submit_and_confirm(webhook.as_ref(), generator.as_ref(), &ticket.job).await;
        let _ = tx.send(Message::ApplyDone {
            seq: ticket.seq,
            confirmation,
        });
    });
}

pub fn key_to_event(key: KeyEvent, state: &AppState) -> Option<Event> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Event::Quit);
    }

    if state.modal.is_open {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('o') => {
                Some(Event::Dismiss)
            }
            KeyCode::Char('q') => Some(Event::Quit),
            _ => None,
        };
    }

    match state.input_mode {
        InputMode::Typing => match key.code {
            KeyCode::Enter => Some(Event::Submit),
            KeyCode::Esc | KeyCode::Tab => Some(Event::Back),
            KeyCode::Backspace => Some(Event::Backspace),
            KeyCode::Char(c) => Some(Event::Char(c)),
            _ => None,
        },
        InputMode::Browsing => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Event::Quit),
            KeyCode::Char('/') | KeyCode::Char('s') => Some(Event::FocusSearch),
            KeyCode::Down | KeyCode::Right | KeyCode::Tab | KeyCode::Char('j') | KeyCode::Char('l') => {
                Some(Event::Next)
            }
            KeyCode::Up | KeyCode::Left | KeyCode::BackTab | KeyCode::Char('k') | KeyCode::Char('h') => {
                Some(Event::Prev)
            }
            KeyCode::Enter | KeyCode::Char('a') => Some(Event::Submit),
            KeyCode::Char('r') => Some(Event::Refresh),
            KeyCode::Char('t') => Some(Event::ToggleTheme),
            _ => None,
        },
    }
}

// --- Rendering ---

pub fn draw(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(colors.bg_main).fg(colors.text_main)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, state, colors, chunks[0]);
    draw_body(frame, state, colors, chunks[1]);
    draw_footer(frame, state, colors, chunks[2]);

    if state.modal.is_open {
        draw_modal(frame, state, colors, area);
    }
}

fn draw_header(frame: &mut Frame, state: &AppState, colors: &ThemeColors, area: Rect) {
    frame.render_widget(Block::default().style(Style::default().bg(colors.header_bg)), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let toggle = format!("{} mode [t] ", state.theme.toggled());
    frame.render_widget(
        Paragraph::new(toggle)
            .alignment(Alignment::Right)
            .style(Style::default().fg(colors.header_subtext)),
        rows[0],
    );

    frame.render_widget(
        Paragraph::new("Find Your Dream Job")
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(colors.header_text)
                    .add_modifier(Modifier::BOLD),
            ),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new("Discover opportunities tailored to you")
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors.header_subtext)),
        rows[2],
    );

    let typing = state.input_mode == InputMode::Typing && !state.modal.is_open;
    let text = if state.query.is_empty() && !typing {
        Line::from(Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default().fg(colors.text_sub),
        ))
    } else {
        let mut spans = vec![Span::styled(
            state.query.as_str(),
            Style::default().fg(colors.text_main),
        )];
        if typing {
            spans.push(Span::styled("▏", Style::default().fg(colors.brand)));
        }
        Line::from(spans)
    };
    let border = if typing { colors.brand } else { colors.border };
    let search = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title_bottom(Line::from(" [enter] Search ").alignment(Alignment::Right))
            .style(Style::default().bg(colors.bg_card)),
    );
    frame.render_widget(search, centered_width(rows[3], 64));
}

fn draw_body(frame: &mut Frame, state: &AppState, colors: &ThemeColors, area: Rect) {
    let mut constraints = Vec::new();
    if state.loading {
        constraints.push(Constraint::Length(3));
    }
    if state.error.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area.inner(Margin::new(2, 1)));
    let mut next = 0;

    if state.loading {
        frame.render_widget(
            Paragraph::new("Loading jobs...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(colors.text_sub)),
            chunks[next],
        );
        next += 1;
    }

    if let Some(error) = &state.error {
        let banner = Paragraph::new(error.as_str())
            .style(Style::default().fg(ERROR_FG).bg(ERROR_BG))
            .block(
                Block::default()
                    .borders(Borders::LEFT)
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(ERROR_FG))
                    .padding(Padding::new(1, 1, 1, 0)),
            );
        frame.render_widget(banner, chunks[next]);
        next += 1;
    }

    let rest = chunks[next];
    if state.loading {
        return;
    }
    if state.has_jobs() {
        draw_grids(frame, state, colors, rest);
    } else if state.error.is_none() {
        let prompt = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Ready to find your next opportunity?",
                Style::default()
                    .fg(colors.text_main)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Use the search bar above to explore job listings"),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors.text_sub));
        frame.render_widget(prompt, rest);
    }
}

fn draw_grids(frame: &mut Frame, state: &AppState, colors: &ThemeColors, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let heading = Style::default()
        .fg(colors.text_main)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Span::styled("Top job picks for you", heading)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new("Based on your profile")
            .alignment(Alignment::Right)
            .style(Style::default().fg(colors.text_sub)),
        chunks[0],
    );

    let best_columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[1]);
    for (i, job) in state.best_jobs.iter().enumerate() {
        let selected = state.selected == i;
        draw_card(frame, job, CardKind::Best, selected, colors, best_columns[i]);
    }

    if state.other_jobs.is_empty() {
        return;
    }

    frame.render_widget(
        Paragraph::new(Span::styled("More jobs for you", heading)),
        chunks[3],
    );

    let grid = chunks[4];
    let visible_rows = usize::from((grid.height / CARD_HEIGHT).max(1));
    let selected_row = state
        .selected
        .checked_sub(state.best_jobs.len())
        .map(|i| i / OTHER_COLUMNS)
        .unwrap_or(0);
    let first_row = (selected_row + 1).saturating_sub(visible_rows);

    let rows = state.other_jobs.chunks(OTHER_COLUMNS).enumerate();
    for (row_index, jobs) in rows.skip(first_row).take(visible_rows) {
        let top = (row_index - first_row) as u16 * CARD_HEIGHT;
        let row_area = Rect {
            y: grid.y + top,
            height: CARD_HEIGHT.min(grid.height.saturating_sub(top)),
            ..grid
        };
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, OTHER_COLUMNS as u32); OTHER_COLUMNS])
            .split(row_area);
        for (col, job) in jobs.iter().enumerate() {
            let index = state.best_jobs.len() + row_index * OTHER_COLUMNS + col;
            let selected = state.selected == index;
            draw_card(frame, job, CardKind::Other, selected, colors, columns[col]);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardKind {
    Best,
    Other,
}

fn draw_card(
    frame: &mut Frame,
    job: &JobListing,
    kind: CardKind,
    selected: bool,
    colors: &ThemeColors,
    area: Rect,
) {
    let area = area.inner(Margin::new(1, 0));
    let block = match kind {
        CardKind::Best => Block::default()
            .borders(Borders::ALL)
            .border_type(if selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(Style::default().fg(if selected { colors.brand } else { colors.border }))
            .style(Style::default().bg(colors.bg_card)),
        CardKind::Other => {
            let block = Block::default()
                .padding(Padding::uniform(1))
                .style(Style::default().bg(colors.bg_card_secondary));
            if selected {
                block
                    .borders(Borders::LEFT)
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(colors.brand))
            } else {
                block
            }
        }
    };
    let inner_width = usize::from(block.inner(area).width.max(1));

    let title_color = match kind {
        CardKind::Best => colors.brand,
        CardKind::Other => colors.text_main,
    };
    let location = match kind {
        CardKind::Best => job.location.clone(),
        CardKind::Other => format!("{} • {}", job.location, job.time_posted),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            job.title.as_str(),
            Style::default().fg(title_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            job.company_name.as_str(),
            Style::default().fg(colors.text_sub),
        )),
        Line::from(Span::styled(location, Style::default().fg(colors.text_sub))),
        Line::from(Span::styled(
            job.website_url.as_str(),
            Style::default()
                .fg(colors.brand)
                .add_modifier(Modifier::UNDERLINED),
        )),
    ];
    for text in clamp_lines(&job.description, inner_width, DESCRIPTION_LINES) {
        lines.push(Line::from(Span::styled(text, Style::default().fg(colors.text_sub))));
    }
    while lines.len() < 4 + DESCRIPTION_LINES {
        lines.push(Line::from(""));
    }

    let label = match kind {
        CardKind::Best => "[ Apply Now ]",
        CardKind::Other => "[ Apply ]",
    };
    let button = if selected {
        Style::default()
            .fg(colors.bg_card)
            .bg(colors.brand)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.brand).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(label, button)));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(frame: &mut Frame, state: &AppState, colors: &ThemeColors, area: Rect) {
    let help = if state.modal.is_open {
        if state.modal.is_generating {
            " waiting for confirmation...  ctrl-c:quit"
        } else {
            " enter:ok  q:quit"
        }
    } else {
        match state.input_mode {
            InputMode::Typing => " type to search  enter:search  esc:browse  ctrl-c:quit",
            InputMode::Browsing => {
                " j/k:select  enter:apply  /:search  r:refresh  t:theme  q:quit"
            }
        }
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(colors.text_sub)),
        area,
    );
}

fn draw_modal(frame: &mut Frame, state: &AppState, colors: &ThemeColors, area: Rect) {
    let modal = &state.modal;
    let width = area.width.saturating_sub(4).min(64);
    let height = area.height.saturating_sub(2).min(11);
    let rect = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.brand))
        .title(Line::from(format!(" {} ", modal.title)).alignment(Alignment::Center))
        .padding(Padding::horizontal(2))
        .style(Style::default().bg(colors.bg_card));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let heading = if modal.is_generating {
        "⏳ Processing..."
    } else {
        "✅ Success!"
    };
    frame.render_widget(
        Paragraph::new(heading).alignment(Alignment::Center).style(
            Style::default()
                .fg(colors.brand)
                .add_modifier(Modifier::BOLD),
        ),
        rows[0],
    );

    let message_style = if modal.is_generating {
        Style::default().fg(colors.text_sub)
    } else {
        Style::default().fg(colors.text_main)
    };
    frame.render_widget(
        Paragraph::new(modal.message.as_str())
            .alignment(Alignment::Center)
            .style(message_style)
            .wrap(Wrap { trim: true }),
        rows[2],
    );

    if !modal.is_generating {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "[ OK ]",
                Style::default()
                    .fg(colors.bg_card)
                    .bg(colors.brand)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            rows[3],
        );
    }
}

fn centered_width(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Wraps `text` to `width` and keeps at most `max` lines, marking a cut with `…`.
pub fn clamp_lines(text: &str, width: usize, max: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    let wrapped = textwrap::wrap(text, width.max(1));
    let truncated = wrapped.len() > max;
    let mut lines: Vec<String> = wrapped.into_iter().take(max).map(|l| l.into_owned()).collect();

    if truncated {
        if let Some(last) = lines.last_mut() {
            if last.chars().count() >= width {
                last.pop();
            }
            last.push('…');
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tests::record;
    use crate::theme::Theme;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_restore_reports_loop_error_first() {
        let io_err = || std::io::Error::other("tty gone");

        let err = restore_outcome(Err(anyhow!("loop failed")), Err(io_err()), Ok(())).unwrap_err();
        assert_eq!(err.to_string(), "loop failed");

        let err = restore_outcome(Ok(()), Err(io_err()), Ok(())).unwrap_err();
        assert_eq!(err.to_string(), "tty gone");

        let err = restore_outcome(Ok(()), Ok(()), Err(io_err())).unwrap_err();
        assert_eq!(err.to_string(), "tty gone");

        assert!(restore_outcome(Ok(()), Ok(()), Ok(())).is_ok());
    }

    fn render(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 48)).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn state_with_jobs(n: usize) -> AppState {
        let mut state = AppState::new(Theme::Light);
        let ticket = state.begin_search();
        let jobs = (0..n)
            .map(|i| JobListing::from_external(record(i), i, 7))
            .collect();
        state.finish_search(ticket.seq, Ok(jobs));
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_empty_state_prompt() {
        let screen = render(&AppState::new(Theme::Light));
        assert!(screen.contains("Find Your Dream Job"));
        assert!(screen.contains("Ready to find your next opportunity?"));
        assert!(screen.contains("Use the search bar above to explore job listings"));
        assert!(screen.contains("dark mode [t]"));
    }

    #[test]
    fn test_loading_indicator() {
        let mut state = AppState::new(Theme::Dark);
        state.begin_search();
        let screen = render(&state);
        assert!(screen.contains("Loading jobs..."));
        assert!(!screen.contains("Ready to find your next opportunity?"));
        assert!(screen.contains("light mode [t]"));
    }

    #[test]
    fn test_error_banner_replaces_prompt() {
        let mut state = AppState::new(Theme::Light);
        let ticket = state.begin_search();
        state.finish_search(ticket.seq, Err(SearchError::Fetch { status: 500 }));

        let screen = render(&state);
        assert!(screen.contains("API request failed with status 500"));
        assert!(!screen.contains("Ready to find your next opportunity?"));
        assert!(!screen.contains("Top job picks for you"));
    }

    #[test]
    fn test_grids_render_both_sections() {
        let screen = render(&state_with_jobs(7));
        assert!(screen.contains("Top job picks for you"));
        assert!(screen.contains("Based on your profile"));
        assert!(screen.contains("More jobs for you"));
        assert!(screen.contains("Job 0"));
        assert!(screen.contains("Job 6"));
        assert!(screen.contains("Apply Now"));
        assert!(screen.contains("City 3 • Just now"));
    }

    #[test]
    fn test_best_only_hides_other_section() {
        let screen = render(&state_with_jobs(2));
        assert!(screen.contains("Job 1"));
        assert!(!screen.contains("More jobs for you"));
        assert!(!screen.contains("Just now"));
    }

    #[test]
    fn test_modal_states() {
        let mut state = state_with_jobs(3);
        let job = state.best_jobs[0].clone();
        let ticket = state.begin_apply(job);

        let screen = render(&state);
        assert!(screen.contains("Processing..."));
        assert!(screen.contains("Generating your confirmation message..."));
        assert!(!screen.contains("[ OK ]"));

        state.finish_apply(
            ticket.seq,
            Confirmation {
                title: "Application Submitted".into(),
                message: "Your application for Job 0 at Company 0 has been submitted successfully!"
                    .into(),
            },
        );
        let screen = render(&state);
        assert!(screen.contains("Success!"));
        assert!(screen.contains("[ OK ]"));
        assert!(screen.contains("Application Submitted"));
    }

    #[test]
    fn test_key_mapping_depends_on_mode() {
        let mut state = AppState::new(Theme::Light);
        assert_eq!(key_to_event(key(KeyCode::Char('q')), &state), Some(Event::Char('q')));
        assert_eq!(key_to_event(key(KeyCode::Enter), &state), Some(Event::Submit));

        state.input_mode = InputMode::Browsing;
        assert_eq!(key_to_event(key(KeyCode::Char('q')), &state), Some(Event::Quit));
        assert_eq!(key_to_event(key(KeyCode::Char('j')), &state), Some(Event::Next));
        assert_eq!(key_to_event(key(KeyCode::Char('t')), &state), Some(Event::ToggleTheme));
        assert_eq!(key_to_event(key(KeyCode::Char('/')), &state), Some(Event::FocusSearch));

        state.modal.is_open = true;
        assert_eq!(key_to_event(key(KeyCode::Enter), &state), Some(Event::Dismiss));
        assert_eq!(key_to_event(key(KeyCode::Char('j')), &state), None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_event(ctrl_c, &state), Some(Event::Quit));
    }

    #[test]
    fn test_clamp_lines() {
        let text = "one two three four five six seven eight nine ten";
        let lines = clamp_lines(text, 10, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with('…'));
        assert!(lines.iter().all(|l| l.chars().count() <= 10));

        let short = clamp_lines("short text", 40, 3);
        assert_eq!(short, vec!["short text".to_string()]);

        assert!(clamp_lines("", 10, 3).is_empty());
    }
}
