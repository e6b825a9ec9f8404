//! Formatting utilities for terminal output

use super::display::{RenderConfig, RenderStyle};
use crate::core::{Mark, Pattern, Word};
use colored::{Color, Colorize};
use indicatif::ProgressStyle;

/// Terminal color used for a feedback mark
#[must_use]
pub const fn mark_color(mark: Mark) -> Color {
    match mark {
        Mark::Exact => Color::Green,
        Mark::Present => Color::Yellow,
        Mark::Absent => Color::BrightBlack,
    }
}

/// Pattern as `G`/`Y`/`-` letters, the same form [`Pattern::parse`] accepts
///
/// # Examples
/// ```
/// use wordle_bot::core::Pattern;
/// use wordle_bot::output::formatters::pattern_code;
///
/// let p = Pattern::parse("GY-GY").unwrap();
/// assert_eq!(pattern_code(p), "GY-GY");
/// ```
#[must_use]
pub fn pattern_code(pattern: Pattern) -> String {
    pattern
        .marks()
        .iter()
        .map(|mark| match mark {
            Mark::Exact => 'G',
            Mark::Present => 'Y',
            Mark::Absent => '-',
        })
        .collect()
}

/// Apply a color only when the config asks for it
#[must_use]
pub fn tint(text: &str, color: Color, config: &RenderConfig) -> String {
    if config.color {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

/// Bold heading text, colored when enabled
#[must_use]
pub fn heading(text: &str, config: &RenderConfig) -> String {
    if config.color {
        text.bright_cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

/// A guess painted with its feedback
///
/// - `Letters` with color: each letter tinted by its mark
/// - `Letters` without color: the word followed by its `G`/`Y`/`-` code
/// - `Emoji`: the word followed by colored squares
#[must_use]
pub fn paint_guess(guess: &Word, pattern: Pattern, config: &RenderConfig) -> String {
    match config.style {
        RenderStyle::Emoji => format!("{guess} {}", pattern.to_emoji()),
        RenderStyle::Letters if config.color => guess
            .as_str()
            .chars()
            .zip(pattern.marks())
            .map(|(letter, mark)| {
                letter
                    .to_string()
                    .color(mark_color(mark))
                    .bold()
                    .to_string()
            })
            .collect(),
        RenderStyle::Letters => format!("{guess} {}", pattern_code(pattern)),
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value.is_nan() {
        return "░".repeat(width);
    }

    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Progress style for indicatif bars, falling back to the default bar if the
/// template is rejected
#[must_use]
pub fn progress_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> RenderConfig {
        RenderConfig {
            color: false,
            style: RenderStyle::Letters,
        }
    }

    #[test]
    fn pattern_code_round_trips_through_parse() {
        for pattern in Pattern::all() {
            assert_eq!(Pattern::parse(&pattern_code(pattern)), Some(pattern));
        }
    }

    #[test]
    fn pattern_code_all_absent() {
        assert_eq!(pattern_code(Pattern::new(0)), "-----");
        assert_eq!(pattern_code(Pattern::PERFECT), "GGGGG");
    }

    #[test]
    fn paint_without_color_shows_code() {
        let guess = Word::new("maple").unwrap();
        let target = Word::new("apple").unwrap();
        let pattern = Pattern::calculate(&guess, &target);

        assert_eq!(paint_guess(&guess, pattern, &plain()), "MAPLE -YGGG");
    }

    #[test]
    fn paint_emoji_style() {
        let config = RenderConfig {
            color: false,
            style: RenderStyle::Emoji,
        };
        let guess = Word::new("crane").unwrap();
        assert_eq!(
            paint_guess(&guess, Pattern::PERFECT, &config),
            "CRANE 🟩🟩🟩🟩🟩"
        );
    }

    #[test]
    fn tint_respects_config() {
        assert_eq!(tint("hello", Color::Red, &plain()), "hello");
        assert_eq!(heading("Title", &plain()), "Title");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
        assert_eq!(create_progress_bar(9.0, 3.0, 4), "████");
    }
}
