//! Delay annotation parsing.
//!
//! The provider reports lateness as free text ("1 Hours, 15 Minutes Late",
//! "30 minutes late"). We read every `<number> <unit>` pair out of it and
//! add the result to the scheduled time. Anything we don't recognise is
//! skipped, so a malformed annotation simply means no adjustment.

use chrono::Duration;

use crate::domain::Timestamp;

/// Turns a delay annotation into an adjusted time.
///
/// Implementations must be total: every input yields a timestamp, and text
/// they cannot read leaves `base` unchanged.
pub trait DelayParser {
    fn adjust(&self, annotation: &str, base: Timestamp) -> Timestamp;
}

/// The provider's phrasing: `<integer> hour[s]` and `<integer> minute[s]`
/// pairs, in any case, separated by spaces and/or commas.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordPairParser;

impl DelayParser for WordPairParser {
    fn adjust(&self, annotation: &str, base: Timestamp) -> Timestamp {
        DelayAnnotation::parse(annotation).apply(base)
    }
}

/// Adjust `base` by the delay in `annotation` using [`WordPairParser`].
///
/// # Examples
///
/// ```
/// use board_server::board::adjust;
/// use board_server::domain::parse_timestamp;
///
/// let t = parse_timestamp("2023-01-01T12:00:00-05:00").unwrap();
/// let later = adjust("1 Hours, 15 Minutes Late", t);
/// assert_eq!(later, parse_timestamp("2023-01-01T13:15:00-05:00").unwrap());
///
/// // Abbreviations aren't recognised
/// assert_eq!(adjust("2 hrs late", t), t);
/// ```
pub fn adjust(annotation: &str, base: Timestamp) -> Timestamp {
    WordPairParser.adjust(annotation, base)
}

/// A non-negative delay read from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DelayAnnotation {
    hours: u64,
    minutes: u64,
}

impl DelayAnnotation {
    /// Read every `<number> <unit>` pair in `text`.
    ///
    /// Hours and minutes accumulate across pairs. Tokens that are not part
    /// of such a pair, including "late" and "early", are ignored.
    pub fn parse(text: &str) -> Self {
        let text = text.to_lowercase();
        let tokens: Vec<&str> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        let mut delay = Self::default();
        for pair in tokens.windows(2) {
            let Ok(value) = pair[0].parse::<u32>() else {
                continue;
            };
            let value = u64::from(value);
            match pair[1] {
                "hour" | "hours" => delay.hours = delay.hours.saturating_add(value),
                "minute" | "minutes" => delay.minutes = delay.minutes.saturating_add(value),
                _ => {}
            }
        }
        delay
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }

    /// The delay as a duration, or `None` if it is too large to represent.
    pub fn duration(&self) -> Option<Duration> {
        let total = self.hours.checked_mul(60)?.checked_add(self.minutes)?;
        Duration::try_minutes(i64::try_from(total).ok()?)
    }

    /// `base` plus this delay.
    ///
    /// A delay that would leave the representable time range leaves `base`
    /// unchanged.
    pub fn apply(&self, base: Timestamp) -> Timestamp {
        self.duration()
            .and_then(|d| base.checked_add_signed(d))
            .unwrap_or(base)
    }
}
