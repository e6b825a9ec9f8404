//! TUI rendering with ratatui

use super::app::{App, InputMode, MessageStyle};
use crate::core::{Mark, Pattern, Word};
use crate::solver::Strategy;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Candidate lists at or below this size are shown word by word
const CANDIDATE_LIST_LIMIT: usize = 12;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_main_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);
    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("WORDLE BOT - Assistant")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_main_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),      // Current guess info
            Constraint::Percentage(50), // Candidates
            Constraint::Percentage(50), // History
        ])
        .split(area);

    render_current_guess(f, app, chunks[0]);
    render_candidates(f, app, chunks[1]);
    render_history(f, app, chunks[2]);
}

const fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::Exact => Color::Green,
        Mark::Present => Color::Yellow,
        Mark::Absent => Color::DarkGray,
    }
}

/// A guess as colored letter tiles
fn word_tiles(word: &Word, pattern: Pattern) -> Vec<Span<'static>> {
    word.as_str()
        .chars()
        .zip(pattern.marks())
        .map(|(letter, mark)| {
            Span::styled(
                format!(" {letter} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(mark_color(mark))
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect()
}

fn render_current_guess(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Current Guess ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let Some(guess) = app.suggestion else {
        let text = if app.input_mode == InputMode::Finished {
            "Game over"
        } else {
            "No suggestion available"
        };
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let content = vec![
        Line::from(vec![
            Span::raw("Suggested: "),
            Span::styled(
                guess.word.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Score:     {}", guess.score)),
        Line::from(format!(
            "Expected:  {:.1} candidates remain",
            guess.expected_remaining
        )),
        Line::from(format!("Round:     {}", app.game.round() + 1)),
    ];

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_candidates(f: &mut Frame, app: &App, area: Rect) {
    let count = app.candidates_count();
    let vocab = app.solver.vocabulary();

    let content = if count == 0 {
        vec![Line::from("No candidates left")]
    } else if count <= CANDIDATE_LIST_LIMIT {
        app.game
            .candidates()
            .iter()
            .map(|id| {
                let style = if app.suggestion.is_some_and(|s| s.id == id) {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Green)
                };
                Line::from(Span::styled(format!("  {}", vocab.word(id)), style))
            })
            .collect()
    } else {
        vec![Line::from(format!("{count} candidates remaining"))]
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Candidates ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );

    f.render_widget(paragraph, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let history_items: Vec<ListItem> = app
        .game
        .history()
        .iter()
        .enumerate()
        .map(|(i, round)| {
            let mut spans = vec![Span::raw(format!("{}: ", i + 1))];
            spans.extend(word_tiles(&round.guess, round.pattern));
            spans.push(Span::raw(format!(
                " {} {} left",
                round.pattern.to_emoji(),
                round.remaining
            )));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let history =
        List::new(history_items).block(Block::default().title(" History ").borders(Borders::ALL));

    f.render_widget(history, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_search_progress(f, app, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_search_progress(f: &mut Frame, app: &App, area: Rect) {
    let total = app.solver.vocabulary().len();
    let remaining = app.candidates_count();
    let eliminated = total.saturating_sub(remaining);
    let percent = if total == 0 {
        0
    } else {
        (eliminated * 100 / total) as u16
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Eliminated ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(percent.min(100))
        .label(format!("{eliminated}/{total} words ruled out"));

    f.render_widget(gauge, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::Finished => (
            " Game over | Press 'n' for new game or 'q' to quit ",
            "",
            Color::Green,
        ),
        InputMode::Feedback => (
            " Enter Feedback (G=Green Y=Yellow -=Gray, or emojis) ",
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let strategy = Paragraph::new(format!("Strategy: {}", app.solver.strategy().name()))
        .alignment(Alignment::Center);
    f.render_widget(strategy, chunks[0]);

    let stats_text = format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.total_games,
        app.stats.win_rate() * 100.0
    );
    f.render_widget(
        Paragraph::new(stats_text).alignment(Alignment::Center),
        chunks[1],
    );

    let help_text = match app.input_mode {
        InputMode::Finished => "q: Quit | n: New Game",
        InputMode::Feedback => "q: Quit | n: New Game | u: Undo | Enter: Submit",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
