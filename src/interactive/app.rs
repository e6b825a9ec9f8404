//! TUI application state and logic

use crate::core::{Pattern, Word, WordId};
use crate::solver::{
    Game, GameState, LetterFrequencyTable, PartitionStrategy, Solver, Strategy, StrategyKind,
};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Messages kept on screen
const MESSAGE_LIMIT: usize = 5;

/// Application state
pub struct App<'a> {
    pub solver: &'a Solver<'a, StrategyKind>,
    pub game: Game<'a, StrategyKind>,
    pub suggestion: Option<Suggestion>,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    pub input_mode: InputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Waiting for the feedback to the current suggestion
    Feedback,
    /// Game over; only new game or quit
    Finished,
}

/// The guess currently proposed, with how it rates against the candidates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion {
    pub id: WordId,
    pub word: Word,
    /// Distinct-letter frequency score within the candidates
    pub score: u32,
    /// Expected candidates left after this guess
    pub expected_remaining: f64,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    /// Wins by round count, index 0 is one round
    pub distribution: Vec<usize>,
}

impl Statistics {
    fn record(&mut self, solved: bool, rounds: usize) {
        self.total_games += 1;
        if solved {
            self.games_won += 1;
            if self.distribution.len() < rounds {
                self.distribution.resize(rounds, 0);
            }
            self.distribution[rounds - 1] += 1;
        }
    }

    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.games_won as f64 / self.total_games as f64
        }
    }
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(solver: &'a Solver<'a, StrategyKind>) -> Self {
        let mut app = Self {
            solver,
            game: solver.new_game(),
            suggestion: None,
            input_buffer: String::new(),
            messages: Vec::new(),
            stats: Statistics::default(),
            should_quit: false,
            input_mode: InputMode::Feedback,
        };
        app.add_message(
            &format!(
                "Welcome! Suggestions use the {} strategy.",
                solver.strategy().name()
            ),
            MessageStyle::Info,
        );
        app.add_message(
            "Enter feedback pattern (e.g., 'GY-GY' or '🟩🟨⬜🟩🟨')",
            MessageStyle::Info,
        );
        app.compute_suggestion();
        app
    }

    /// Ask the strategy for the next guess and rate it
    pub fn compute_suggestion(&mut self) {
        match self.game.suggest() {
            Ok(id) => {
                let vocab = self.solver.vocabulary();
                let candidates = self.game.candidates();
                let word = vocab.word(id);
                let table =
                    LetterFrequencyTable::from_words(candidates.iter().map(|c| vocab.word(c)));
                let cost = PartitionStrategy::cost(id, candidates, vocab);

                self.suggestion = Some(Suggestion {
                    id,
                    word,
                    score: table.score(&word),
                    expected_remaining: cost as f64 / candidates.len() as f64,
                });
            }
            Err(e) => {
                self.suggestion = None;
                self.add_message(&format!("No suggestion: {e}"), MessageStyle::Error);
            }
        }
    }

    pub fn handle_feedback(&mut self, feedback: &str) {
        let Some(pattern) = Pattern::parse(feedback) else {
            self.add_message("Invalid pattern! Use G/Y/- or 🟩🟨⬜", MessageStyle::Error);
            return;
        };
        let Some(suggestion) = self.suggestion else {
            self.add_message(
                "No guess to give feedback on. Press 'u' to undo or 'n' for a new game.",
                MessageStyle::Error,
            );
            return;
        };

        self.input_buffer.clear();
        match self.game.apply(suggestion.id, pattern) {
            Ok(GameState::Solved) => {
                let rounds = self.game.round();
                self.stats.record(true, rounds);
                self.input_mode = InputMode::Finished;
                self.suggestion = None;

                let noun = if rounds == 1 { "guess" } else { "guesses" };
                self.add_message(
                    &format!("Solved: {} in {rounds} {noun}!", suggestion.word),
                    MessageStyle::Success,
                );
                self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
            }
            Ok(GameState::Exhausted) => {
                self.stats.record(false, self.game.round());
                self.input_mode = InputMode::Finished;
                self.suggestion = None;
                self.add_message("Out of rounds.", MessageStyle::Error);
                self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
            }
            Ok(_) if self.game.candidates().is_empty() => {
                self.suggestion = None;
                self.add_message(
                    "No candidates remain - pattern may be incorrect. Press 'u' to undo.",
                    MessageStyle::Error,
                );
            }
            Ok(_) => {
                let remaining = self.game.candidates().len();
                self.compute_suggestion();
                self.add_message(
                    &format!("{remaining} candidates remaining"),
                    MessageStyle::Info,
                );
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    pub fn new_game(&mut self) {
        self.game = self.solver.new_game();
        self.input_buffer.clear();
        self.messages.clear();
        self.input_mode = InputMode::Feedback;
        self.add_message("New game started!", MessageStyle::Info);
        self.compute_suggestion();
    }

    /// Drop the last round by replaying the ones before it
    pub fn undo_last(&mut self) {
        let history = self.game.history();
        let Some(keep) = history.len().checked_sub(1) else {
            self.add_message("Nothing to undo!", MessageStyle::Error);
            return;
        };

        let replayed = self
            .solver
            .replay(history[..keep].iter().map(|r| (&r.guess, r.pattern)));
        match replayed {
            Ok(game) => {
                self.game = game;
                self.input_buffer.clear();
                self.compute_suggestion();
                self.add_message("Undone!", MessageStyle::Info);
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MESSAGE_LIMIT {
            self.messages.remove(0);
        }
    }

    #[must_use]
    pub fn candidates_count(&self) -> usize {
        self.game.candidates().len()
    }

    /// Handle one key press; returns whether the app should keep running
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match (self.input_mode, code) {
            (_, KeyCode::Char('c')) if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            (_, KeyCode::Char('q')) => self.should_quit = true,
            (_, KeyCode::Char('n')) => self.new_game(),
            (InputMode::Finished, _) => {}
            (InputMode::Feedback, KeyCode::Char('u')) => self.undo_last(),
            (InputMode::Feedback, KeyCode::Char(c)) => self.input_buffer.push(c),
            (InputMode::Feedback, KeyCode::Backspace) => {
                self.input_buffer.pop();
            }
            (InputMode::Feedback, KeyCode::Enter) => {
                let input = self.input_buffer.clone();
                self.handle_feedback(&input);
            }
            _ => {}
        }
        !self.should_quit
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if !app.handle_key(key.code, key.modifiers) {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vocabulary;
    use crate::index::PatternIndex;
    use crate::solver::SolverConfig;

    fn fixture() -> (Vocabulary, PatternIndex) {
        let vocab = Vocabulary::parse("apple grape table cable maple").unwrap();
        let index = PatternIndex::build(&vocab);
        (vocab, index)
    }

    fn suggested(app: &App) -> String {
        app.suggestion.unwrap().word.to_string()
    }

    fn type_feedback(app: &mut App, feedback: &str) {
        for c in feedback.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
    }

    #[test]
    fn starts_with_a_suggestion() {
        let (vocab, index) = fixture();
        let solver =
            Solver::new(StrategyKind::default(), &vocab, &index, SolverConfig::default()).unwrap();
        let app = App::new(&solver);

        let suggestion = app.suggestion.unwrap();
        assert_eq!(suggestion.word.as_str(), "MAPLE");
        assert_eq!(suggestion.score, 18);
        assert_eq!(app.candidates_count(), 5);
    }

    #[test]
    fn feedback_narrows_then_solves() {
        let (vocab, index) = fixture();
        let solver =
            Solver::new(StrategyKind::default(), &vocab, &index, SolverConfig::default()).unwrap();
        let mut app = App::new(&solver);

        type_feedback(&mut app, "-YGGG");
        assert_eq!(app.candidates_count(), 1);
        assert_eq!(suggested(&app), "APPLE");
        assert!(app.input_buffer.is_empty());

        type_feedback(&mut app, "🟩🟩🟩🟩🟩");
        assert_eq!(app.input_mode, InputMode::Finished);
        assert_eq!(app.stats.games_won, 1);
        assert_eq!(app.stats.distribution, vec![0, 1]);
        assert_eq!(app.messages.last().unwrap().style, MessageStyle::Info);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let (vocab, index) = fixture();
        let solver =
            Solver::new(StrategyKind::default(), &vocab, &index, SolverConfig::default()).unwrap();
        let mut app = App::new(&solver);

        type_feedback(&mut app, "GGX");
        assert_eq!(app.messages.last().unwrap().style, MessageStyle::Error);
        assert_eq!(app.game.round(), 0);
    }

    #[test]
    fn contradictory_feedback_then_undo() {
        let (vocab, index) = fixture();
        let solver =
            Solver::new(StrategyKind::default(), &vocab, &index, SolverConfig::default()).unwrap();
        let mut app = App::new(&solver);

        type_feedback(&mut app, "-----");
        assert_eq!(app.candidates_count(), 0);
        assert!(app.suggestion.is_none());
        assert_eq!(app.messages.last().unwrap().style, MessageStyle::Error);

        app.handle_key(KeyCode::Char('u'), KeyModifiers::NONE);
        assert_eq!(app.game.round(), 0);
        assert_eq!(app.candidates_count(), 5);
        assert_eq!(suggested(&app), "MAPLE");

        app.undo_last();
        assert_eq!(app.messages.last().unwrap().text, "Nothing to undo!");
    }

    #[test]
    fn running_out_of_rounds_finishes() {
        let (vocab, index) = fixture();
        let solver = Solver::new(
            StrategyKind::default(),
            &vocab,
            &index,
            SolverConfig { max_rounds: 1 },
        )
        .unwrap();
        let mut app = App::new(&solver);

        type_feedback(&mut app, "-YGGG");
        assert_eq!(app.input_mode, InputMode::Finished);
        assert_eq!(app.stats.total_games, 1);
        assert_eq!(app.stats.games_won, 0);

        // Feedback keys are ignored once finished
        app.handle_key(KeyCode::Char('G'), KeyModifiers::NONE);
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn new_game_and_quit_keys() {
        let (vocab, index) = fixture();
        let solver =
            Solver::new(StrategyKind::default(), &vocab, &index, SolverConfig::default()).unwrap();
        let mut app = App::new(&solver);

        type_feedback(&mut app, "-YGGG");
        assert!(app.handle_key(KeyCode::Char('n'), KeyModifiers::NONE));
        assert_eq!(app.game.round(), 0);
        assert_eq!(app.input_mode, InputMode::Feedback);

        assert!(!app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn win_rate_counts_losses() {
        let mut stats = Statistics::default();
        stats.record(true, 3);
        stats.record(false, 6);
        assert!((stats.win_rate() - 0.5).abs() < 1e-9);
        assert_eq!(stats.distribution, vec![0, 0, 1]);
    }
}
