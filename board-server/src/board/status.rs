//! Display status for a train at a station.
//!
//! The provider gives each stop a status code and a free-text comment per
//! direction. The board shows one short string derived from both:
//!
//! | status      | comment               | shown                 |
//! |-------------|-----------------------|-----------------------|
//! | `Station`   | anything              | `At Station`          |
//! | not Enroute | anything              | the status verbatim   |
//! | `Enroute`   | `NaN Minutes Early`   | `Unknown`             |
//! | `Enroute`   | `0 Minutes Early`     | `On time`             |
//! | `Enroute`   | contains `Late`       | `Now <adjusted time>` |
//! | `Enroute`   | anything else         | the comment verbatim  |

use std::fmt;

use crate::domain::{Timestamp, format_board_time};

use super::delay::{DelayParser, WordPairParser};

/// Comment the provider sends when it has no estimate.
const UNKNOWN_ESTIMATE: &str = "NaN Minutes Early";

/// Comment the provider sends for a train running to schedule.
const ON_TIME: &str = "0 Minutes Early";

/// Provider status codes the board treats specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProviderStatus<'a> {
    Station,
    Enroute,
    Other(&'a str),
}

impl<'a> ProviderStatus<'a> {
    fn from_code(code: &'a str) -> Self {
        match code {
            "Station" => ProviderStatus::Station,
            "Enroute" => ProviderStatus::Enroute,
            other => ProviderStatus::Other(other),
        }
    }
}

/// The shapes of comment that change what an enroute train shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentShape {
    UnknownEstimate,
    OnTime,
    Late,
    Other,
}

impl CommentShape {
    fn of(comment: &str) -> Self {
        match comment {
            UNKNOWN_ESTIMATE => CommentShape::UnknownEstimate,
            ON_TIME => CommentShape::OnTime,
            c if c.contains("Late") => CommentShape::Late,
            _ => CommentShape::Other,
        }
    }
}

/// What the status column shows for one train.
///
/// Borrowed from the inputs and rendered through `Display`; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus<'a> {
    AtStation,
    /// A status code with no special meaning, shown as-is.
    Status(&'a str),
    Unknown,
    OnTime,
    /// Running late; expected at the adjusted time.
    Now(Timestamp),
    /// An enroute comment with no special meaning, shown as-is.
    Comment(&'a str),
}

impl fmt::Display for DisplayStatus<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayStatus::AtStation => f.write_str("At Station"),
            DisplayStatus::Status(s) | DisplayStatus::Comment(s) => f.write_str(s),
            DisplayStatus::Unknown => f.write_str("Unknown"),
            DisplayStatus::OnTime => f.write_str("On time"),
            DisplayStatus::Now(t) => write!(f, "Now {}", format_board_time(t)),
        }
    }
}

/// Resolves provider status and comment into display text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusResolver<P = WordPairParser> {
    parser: P,
}

impl<P: DelayParser> StatusResolver<P> {
    /// Create a resolver that reads delays with `parser`.
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Classify a train's status.
    ///
    /// `scheduled` is the timetable time for this direction; it is only
    /// consulted when the train is running late.
    pub fn classify<'a>(
        &self,
        status: &'a str,
        comment: &'a str,
        scheduled: Timestamp,
    ) -> DisplayStatus<'a> {
        match (ProviderStatus::from_code(status), CommentShape::of(comment)) {
            (ProviderStatus::Station, _) => DisplayStatus::AtStation,
            (ProviderStatus::Other(code), _) => DisplayStatus::Status(code),
            (ProviderStatus::Enroute, CommentShape::UnknownEstimate) => DisplayStatus::Unknown,
            (ProviderStatus::Enroute, CommentShape::OnTime) => DisplayStatus::OnTime,
            (ProviderStatus::Enroute, CommentShape::Late) => {
                DisplayStatus::Now(self.parser.adjust(comment, scheduled))
            }
            (ProviderStatus::Enroute, CommentShape::Other) => DisplayStatus::Comment(comment),
        }
    }

    /// The status column text.
    pub fn resolve(&self, status: &str, comment: &str, scheduled: Timestamp) -> String {
        self.classify(status, comment, scheduled).to_string()
    }
}

/// Status column text using the default delay parser.
///
/// # Examples
///
/// ```
/// use board_server::board::resolve;
/// use board_server::domain::parse_timestamp;
///
/// let t = parse_timestamp("2023-01-01T12:00:00").unwrap();
/// assert_eq!(resolve("Enroute", "2 Hours Late", t), "Now 2:00p");
/// assert_eq!(resolve("Enroute", "0 Minutes Early", t), "On time");
/// assert_eq!(resolve("Station", "2 Hours Late", t), "At Station");
/// ```
pub fn resolve(status: &str, comment: &str, scheduled: Timestamp) -> String {
    StatusResolver::<WordPairParser>::default().resolve(status, comment, scheduled)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::parse_timestamp;
    use proptest::prelude::*;

    fn base() -> Timestamp {
        parse_timestamp("2024-03-15T08:00:00-04:00").unwrap()
    }

    proptest! {
        /// "Station" wins regardless of comment
        #[test]
        fn station_always_at_station(comment in ".{0,40}") {
            prop_assert_eq!(resolve("Station", &comment, base()), "At Station");
        }

        /// Unrecognised statuses are shown verbatim
        #[test]
        fn unknown_status_verbatim(status in "[A-Za-z ]{0,20}", comment in ".{0,40}") {
            prop_assume!(status != "Station" && status != "Enroute");
            prop_assert_eq!(resolve(&status, &comment, base()), status);
        }

        /// Late enroute trains always show "Now <time>"
        #[test]
        fn late_always_now(minutes in 1u32..600) {
            let comment = format!("{} Minutes Late", minutes);
            let shown = resolve("Enroute", &comment, base());
            prop_assert!(shown.starts_with("Now "));
            prop_assert!(shown.ends_with('a') || shown.ends_with('p'));
        }
    }
}
