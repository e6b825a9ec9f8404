//! Feedback pattern calculation and representation
//!
//! A pattern encodes the feedback from a guess using base-3 encoding:
//! - 0 = Absent (letter not in the target, or all copies already used)
//! - 1 = Present (letter in the target, wrong position)
//! - 2 = Exact (letter in the correct position)
//!
//! The pattern is stored as a single u8 value (0-242), where each position
//! contributes digit × 3^position to the total.

use super::word::{ALPHABET_SIZE, WORD_LENGTH, Word, letter_index};

/// Feedback for a single guess position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Absent,
    Present,
    Exact,
}

impl Mark {
    const fn digit(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Exact => 2,
        }
    }

    const fn from_digit(digit: u8) -> Self {
        match digit {
            2 => Self::Exact,
            1 => Self::Present,
            _ => Self::Absent,
        }
    }
}

/// Feedback pattern for a guess
///
/// Value range: 0-242 (3^5 = 243 possible patterns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern(u8);

impl Pattern {
    /// All exact (perfect match)
    pub const PERFECT: Self = Self(242); // 2 + 2×3 + 2×9 + 2×27 + 2×81

    /// Number of distinct patterns
    pub const COUNT: usize = 243;

    /// Create a new pattern from a raw value
    ///
    /// # Panics
    /// Panics in debug mode if value >= 243
    #[inline]
    #[must_use]
    pub const fn new(value: u8) -> Self {
        debug_assert!(value < 243, "Pattern value must be < 243");
        Self(value)
    }

    /// Get the raw pattern value (0-242)
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Pattern value as a table index
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a perfect match (all exact)
    #[inline]
    #[must_use]
    pub const fn is_perfect(self) -> bool {
        self.0 == Self::PERFECT.0
    }

    /// Iterate over every pattern code in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=Self::PERFECT.0).map(Self)
    }

    /// Calculate the pattern when `guess` is played against `target`
    ///
    /// Duplicate letters are handled in two passes: exact matches consume their
    /// target letter first, then remaining guess letters claim what is left of
    /// the target, left to right.
    ///
    /// # Examples
    /// ```
    /// use wordle_bot::core::{Mark, Pattern, Word};
    ///
    /// let guess = Word::new("speed").unwrap();
    /// let target = Word::new("abide").unwrap();
    /// let pattern = Pattern::calculate(&guess, &target);
    ///
    /// // ABIDE has a single E, so only the first E is marked present
    /// assert_eq!(
    ///     pattern.marks(),
    ///     [Mark::Absent, Mark::Absent, Mark::Present, Mark::Absent, Mark::Present]
    /// );
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, target: &Word) -> Self {
        let guess = guess.chars();
        let target = target.chars();

        let mut marks = [Mark::Absent; WORD_LENGTH];
        let mut unmatched = [0u8; ALPHABET_SIZE];

        // First pass: exact matches, tally the target letters they leave behind
        // Allow: Index needed to compare guess[i] with target[i] and set marks[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if guess[i] == target[i] {
                marks[i] = Mark::Exact;
            } else {
                unmatched[letter_index(target[i])] += 1;
            }
        }

        // Second pass: misplaced letters draw from the leftover tally
        for (mark, &letter) in marks.iter_mut().zip(guess) {
            if *mark == Mark::Exact {
                continue;
            }
            let remaining = &mut unmatched[letter_index(letter)];
            if *remaining > 0 {
                *mark = Mark::Present;
                *remaining -= 1;
            }
        }

        Self::from_marks(marks)
    }

    /// Encode per-position marks as a base-3 pattern
    #[must_use]
    pub fn from_marks(marks: [Mark; WORD_LENGTH]) -> Self {
        let mut pattern = 0u8;
        let mut multiplier = 1u8;
        for mark in marks {
            pattern += mark.digit() * multiplier;
            multiplier = multiplier.wrapping_mul(3);
        }
        Self(pattern)
    }

    /// Decode the pattern into per-position marks
    #[must_use]
    pub fn marks(self) -> [Mark; WORD_LENGTH] {
        let mut marks = [Mark::Absent; WORD_LENGTH];
        let mut val = self.0;
        for mark in &mut marks {
            *mark = Mark::from_digit(val % 3);
            val /= 3;
        }
        marks
    }

    /// Count the number of exact feedback squares
    #[must_use]
    pub fn count_exact(self) -> usize {
        self.marks().iter().filter(|&&m| m == Mark::Exact).count()
    }

    /// Count the number of present-but-misplaced feedback squares
    #[must_use]
    pub fn count_present(self) -> usize {
        self.marks().iter().filter(|&&m| m == Mark::Present).count()
    }

    /// Parse a pattern from a string like "GY-GY" or "🟩🟨⬜🟩🟨"
    ///
    /// Accepts:
    /// - 'G'/'g'/'2'/🟩 for exact
    /// - 'Y'/'y'/'1'/🟨 for present
    /// - '-'/'_'/'.'/'0'/⬜/⬛ for absent
    ///
    /// # Examples
    /// ```
    /// use wordle_bot::core::Pattern;
    ///
    /// let p1 = Pattern::parse("GY-GY").unwrap();
    /// let p2 = Pattern::parse("🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(p1, p2);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.trim().chars().collect();
        let chars: [char; WORD_LENGTH] = chars.try_into().ok()?;

        let mut marks = [Mark::Absent; WORD_LENGTH];
        for (mark, ch) in marks.iter_mut().zip(chars) {
            *mark = match ch {
                'G' | 'g' | '2' | '🟩' => Mark::Exact,
                'Y' | 'y' | '1' | '🟨' => Mark::Present,
                '-' | '_' | '.' | '0' | '⬜' | '⬛' => Mark::Absent,
                _ => return None,
            };
        }

        Some(Self::from_marks(marks))
    }

    /// Convert pattern to emoji string
    ///
    /// # Examples
    /// ```
    /// use wordle_bot::core::Pattern;
    ///
    /// let p = Pattern::parse("GY-GY").unwrap();
    /// assert_eq!(p.to_emoji(), "🟩🟨⬜🟩🟨");
    /// ```
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.marks()
            .iter()
            .map(|mark| match mark {
                Mark::Exact => '🟩',
                Mark::Present => '🟨',
                Mark::Absent => '⬜',
            })
            .collect()
    }
}

impl std::str::FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid pattern string: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(guess: &str, target: &str) -> Pattern {
        Pattern::calculate(&Word::new(guess).unwrap(), &Word::new(target).unwrap())
    }

    #[test]
    fn pattern_perfect_constant() {
        assert_eq!(Pattern::PERFECT.value(), 242);
        assert!(Pattern::PERFECT.is_perfect());
        assert_eq!(Pattern::PERFECT.count_exact(), 5);
        assert_eq!(Pattern::PERFECT.count_present(), 0);
    }

    #[test]
    fn pattern_all_absent() {
        let pattern = feedback("abcde", "fghij");
        assert_eq!(pattern.value(), 0);
        assert_eq!(pattern.count_exact(), 0);
        assert_eq!(pattern.count_present(), 0);
    }

    #[test]
    fn pattern_self_is_perfect() {
        for word in ["crane", "slate", "speed", "zzzzz", "aaaaa"] {
            assert_eq!(feedback(word, word), Pattern::PERFECT);
        }
    }

    #[test]
    fn duplicate_guess_letter_limited_by_target() {
        // ABIDE has one E: only the first unmatched E is present
        let pattern = feedback("speed", "abide");
        assert_eq!(
            pattern.marks(),
            [
                Mark::Absent,
                Mark::Absent,
                Mark::Present,
                Mark::Absent,
                Mark::Present
            ]
        );
        assert_eq!(pattern.value(), 90);
    }

    #[test]
    fn duplicate_letters_both_present() {
        // ERASE has two E's, so both E's in SPEED are present
        let pattern = feedback("speed", "erase");
        assert_eq!(pattern.value(), 37);
        assert_eq!(pattern.count_present(), 3);
    }

    #[test]
    fn exact_match_consumes_before_present() {
        // ROBOT vs FLOOR: the second O is exact, the first is present
        let pattern = feedback("robot", "floor");
        assert_eq!(pattern.value(), 58);
        assert_eq!(pattern.count_exact(), 1);
        assert_eq!(pattern.count_present(), 2);

        // APPLE vs MAPLE: P at 2 is exact, so the P at 1 finds no spare P
        let pattern = feedback("apple", "maple");
        assert_eq!(
            pattern.marks(),
            [
                Mark::Present,
                Mark::Absent,
                Mark::Exact,
                Mark::Exact,
                Mark::Exact
            ]
        );
    }

    #[test]
    fn feedback_is_not_symmetric() {
        assert_ne!(feedback("speed", "abide"), feedback("abide", "speed"));
    }

    #[test]
    fn marked_letters_never_exceed_target_counts() {
        let words = ["speed", "abide", "erase", "robot", "floor", "geese", "eerie", "apple"];
        for g in words {
            for t in words {
                let guess = Word::new(g).unwrap();
                let target = Word::new(t).unwrap();
                let marks = Pattern::calculate(&guess, &target).marks();

                let exact_positions = (0..WORD_LENGTH)
                    .filter(|&i| guess.char_at(i) == target.char_at(i))
                    .count();
                assert_eq!(
                    marks.iter().filter(|&&m| m == Mark::Exact).count(),
                    exact_positions
                );

                let target_counts = target.letter_counts();
                let mut hit_counts = [0u8; ALPHABET_SIZE];
                for (i, mark) in marks.iter().enumerate() {
                    if *mark != Mark::Absent {
                        hit_counts[letter_index(guess.char_at(i))] += 1;
                    }
                }
                for letter in 0..ALPHABET_SIZE {
                    assert!(hit_counts[letter] <= target_counts[letter], "{g} vs {t}");
                }
            }
        }
    }

    #[test]
    fn marks_round_trip_every_code() {
        for pattern in Pattern::all() {
            assert_eq!(Pattern::from_marks(pattern.marks()), pattern);
        }
        assert_eq!(Pattern::all().count(), Pattern::COUNT);
    }

    #[test]
    fn pattern_parse_valid() {
        let p1 = Pattern::parse("GYG--").unwrap();
        let p2 = Pattern::parse("🟩🟨🟩⬜⬜").unwrap();
        let p3 = Pattern::parse("gyg__").unwrap();
        let p4: Pattern = "21200".parse().unwrap();

        assert_eq!(p1, p2);
        assert_eq!(p1, p3);
        assert_eq!(p1, p4);
        // 2 + 1×3 + 2×9 = 23
        assert_eq!(p1.value(), 23);
    }

    #[test]
    fn pattern_parse_invalid() {
        assert!(Pattern::parse("GYGGYX").is_none());
        assert!(Pattern::parse("GYG").is_none());
        assert!(Pattern::parse("GXGGY").is_none());
        assert!(Pattern::parse("").is_none());
    }

    #[test]
    fn pattern_to_emoji() {
        assert_eq!(Pattern::new(0).to_emoji(), "⬜⬜⬜⬜⬜");
        assert_eq!(Pattern::PERFECT.to_emoji(), "🟩🟩🟩🟩🟩");
    }
}
