//! Station codes and the station directory entry.

use std::fmt;

use super::TrainId;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid 3-letter station code (e.g. `NYP`, `WAS`, `CHI`).
///
/// Station codes are always 3 uppercase ASCII letters. Any `StationCode`
/// value is valid by construction.
///
/// # Examples
///
/// ```
/// use board_server::domain::StationCode;
///
/// let nyp = StationCode::parse("NYP").unwrap();
/// assert_eq!(nyp.as_str(), "NYP");
///
/// // Lowercase is rejected by `parse`...
/// assert!(StationCode::parse("nyp").is_err());
/// // ...but accepted by `parse_normalized`
/// assert_eq!(StationCode::parse_normalized(" nyp ").unwrap(), nyp);
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("NY").is_err());
/// assert!(StationCode::parse("NYPX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode([u8; 3]);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidStationCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidStationCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(StationCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse user input: trims whitespace and uppercases before validating.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station from the provider's station directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub code: StationCode,
    pub name: String,
    pub city: String,
    pub state: String,
    /// Trains the provider lists as serving this station.
    pub trains: Vec<TrainId>,
}

impl Station {
    /// Whether this station matches a search query.
    ///
    /// Case-insensitive substring match against name, city, code or state.
    /// An empty query matches every station.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [
            self.name.as_str(),
            self.city.as_str(),
            self.code.as_str(),
            self.state.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }

    /// Whether the provider lists the given train at this station.
    pub fn lists_train(&self, id: &TrainId) -> bool {
        self.trains.contains(id)
    }

    /// "Name Station - City, State", as shown in search results.
    pub fn label(&self) -> String {
        format!("{} Station - {}, {}", self.name, self.city, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station() -> Station {
        Station {
            code: StationCode::parse("NYP").unwrap(),
            name: "New York Penn".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            trains: vec![TrainId::new("66-17"), TrainId::new("2150-17")],
        }
    }

    #[test]
    fn parse_valid_codes() {
        assert!(StationCode::parse("NYP").is_ok());
        assert!(StationCode::parse("WAS").is_ok());
        assert!(StationCode::parse("AAA").is_ok());
        assert!(StationCode::parse("ZZZ").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(StationCode::parse("nyp").is_err());
        assert!(StationCode::parse("Nyp").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(StationCode::parse("").is_err());
        assert!(StationCode::parse("NY").is_err());
        assert!(StationCode::parse("NYPX").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(StationCode::parse("N1P").is_err());
        assert!(StationCode::parse("N P").is_err());
        assert!(StationCode::parse("NÖP").is_err());
    }

    #[test]
    fn normalized_parse() {
        let code = StationCode::parse_normalized("  was\n").unwrap();
        assert_eq!(code.as_str(), "WAS");
        assert!(StationCode::parse_normalized("wa").is_err());
    }

    #[test]
    fn display_and_debug() {
        let code = StationCode::parse("CHI").unwrap();
        assert_eq!(code.to_string(), "CHI");
        assert_eq!(format!("{:?}", code), "StationCode(CHI)");
    }

    #[test]
    fn search_matches_any_field_case_insensitively() {
        let s = station();
        assert!(s.matches("penn"));
        assert!(s.matches("NEW YORK"));
        assert!(s.matches("nyp"));
        assert!(s.matches("ny"));
        assert!(s.matches(""));
        assert!(!s.matches("chicago"));
    }

    #[test]
    fn lists_train() {
        let s = station();
        assert!(s.lists_train(&TrainId::new("66-17")));
        assert!(!s.lists_train(&TrainId::new("67-17")));
    }

    #[test]
    fn label_format() {
        assert_eq!(station().label(), "New York Penn Station - New York, NY");
    }
}
