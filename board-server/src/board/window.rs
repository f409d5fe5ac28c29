//! Choosing which trains a board shows.
//!
//! A board lists trains whose scheduled time falls strictly inside a window
//! around the current instant, earliest first, up to a fixed cap.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{BoardKind, ScheduledTrain};

/// Window and cap for a station board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardWindow {
    /// How far back from now a scheduled time is still shown (hours).
    pub lookback_hours: f64,

    /// How far ahead of now a scheduled time is shown (hours).
    pub lookahead_hours: f64,

    /// Maximum number of trains per board.
    pub max_trains: usize,
}

impl BoardWindow {
    /// Create a new window with the given parameters.
    pub fn new(lookback_hours: f64, lookahead_hours: f64, max_trains: usize) -> Self {
        Self {
            lookback_hours,
            lookahead_hours,
            max_trains,
        }
    }

    /// Returns the lookback as a Duration.
    pub fn lookback(&self) -> Duration {
        hours_to_duration(self.lookback_hours)
    }

    /// Returns the lookahead as a Duration.
    pub fn lookahead(&self) -> Duration {
        hours_to_duration(self.lookahead_hours)
    }

    /// The open interval `(start, end)` around `now`.
    ///
    /// Bounds that would leave the representable range are clamped to it.
    pub fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = now
            .checked_sub_signed(self.lookback())
            .unwrap_or(if self.lookback() > Duration::zero() {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            });
        let end = now
            .checked_add_signed(self.lookahead())
            .unwrap_or(if self.lookahead() > Duration::zero() {
                DateTime::<Utc>::MAX_UTC
            } else {
                DateTime::<Utc>::MIN_UTC
            });
        (start, end)
    }

    /// Select trains for a board, using the current time.
    pub fn select<'a>(
        &self,
        trains: &'a [ScheduledTrain],
        kind: BoardKind,
    ) -> Vec<&'a ScheduledTrain> {
        self.select_at(trains, kind, Utc::now())
    }

    /// Select trains for a board as of `now`.
    ///
    /// Keeps trains whose scheduled time for `kind` lies strictly between
    /// `now - lookback` and `now + lookahead`, sorts them by that time
    /// (ties keep input order), and keeps at most `max_trains`.
    pub fn select_at<'a>(
        &self,
        trains: &'a [ScheduledTrain],
        kind: BoardKind,
        now: DateTime<Utc>,
    ) -> Vec<&'a ScheduledTrain> {
        let (start, end) = self.bounds(now);

        let mut selected: Vec<(DateTime<Utc>, &ScheduledTrain)> = trains
            .iter()
            .filter_map(|train| {
                let t = train.scheduled(kind)?.with_timezone(&Utc);
                (start < t && t < end).then_some((t, train))
            })
            .collect();

        // Stable, so trains scheduled at the same instant keep feed order.
        selected.sort_by_key(|(t, _)| *t);
        selected.truncate(self.max_trains);

        tracing::debug!(
            ?kind,
            candidates = trains.len(),
            shown = selected.len(),
            "selected board trains"
        );

        selected.into_iter().map(|(_, train)| train).collect()
    }
}

impl Default for BoardWindow {
    fn default() -> Self {
        Self {
            lookback_hours: 1.0,
            lookahead_hours: 3.0,
            max_trains: 10,
        }
    }
}

/// Select trains for a board with an explicit window, using the current time.
///
/// Equivalent to `BoardWindow::new(lookback_hours, lookahead_hours, limit)
/// .select(trains, kind)`.
pub fn select(
    trains: &[ScheduledTrain],
    kind: BoardKind,
    lookback_hours: f64,
    lookahead_hours: f64,
    limit: usize,
) -> Vec<&ScheduledTrain> {
    BoardWindow::new(lookback_hours, lookahead_hours, limit).select(trains, kind)
}

/// Convert fractional hours to a duration, saturating at the extremes.
fn hours_to_duration(hours: f64) -> Duration {
    if hours.is_nan() {
        return Duration::zero();
    }
    // `as` saturates out-of-range floats.
    let millis = (hours * 3_600_000.0).round() as i64;
    Duration::milliseconds(millis.max(-i64::MAX))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::TrainId;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn trains_from(offsets: &[Option<i64>]) -> Vec<ScheduledTrain> {
        offsets
            .iter()
            .enumerate()
            .map(|(i, off)| ScheduledTrain {
                train_id: TrainId::new(i.to_string()),
                train_number: i as u32,
                route_name: String::new(),
                origin: String::new(),
                destination: String::new(),
                scheduled_departure: off.map(|m| (now() + Duration::minutes(m)).fixed_offset()),
                scheduled_arrival: None,
                status: String::new(),
                departure_comment: None,
                arrival_comment: None,
            })
            .collect()
    }

    proptest! {
        /// Output is capped, sorted, inside the window, and stable
        #[test]
        fn selection_invariants(
            offsets in proptest::collection::vec(proptest::option::of(-600i64..600), 0..40),
            lookback in 0u32..8,
            lookahead in 0u32..8,
            limit in 0usize..15,
        ) {
            let trains = trains_from(&offsets);
            let w = BoardWindow::new(f64::from(lookback), f64::from(lookahead), limit);
            let (start, end) = w.bounds(now());
            let out = w.select_at(&trains, BoardKind::Departure, now());

            prop_assert!(out.len() <= limit);

            let times: Vec<_> = out
                .iter()
                .map(|t| t.scheduled_departure.unwrap().with_timezone(&Utc))
                .collect();
            for t in &times {
                prop_assert!(start < *t && *t < end);
            }
            for pair in out.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!(a.scheduled_departure <= b.scheduled_departure);
                if a.scheduled_departure == b.scheduled_departure {
                    let ia: usize = a.train_id.as_str().parse().unwrap();
                    let ib: usize = b.train_id.as_str().parse().unwrap();
                    prop_assert!(ia < ib);
                }
            }

            // Nothing inside the window was dropped except by the cap.
            let eligible = trains
                .iter()
                .filter(|t| t.scheduled_departure.is_some_and(|d| {
                    let d = d.with_timezone(&Utc);
                    start < d && d < end
                }))
                .count();
            prop_assert_eq!(out.len(), eligible.min(limit));
        }
    }
}
