//! Station identity and station records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::location::Coordinates;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A station identifier, unique within a dataset.
///
/// Codes are stored trimmed and are never empty; interior spaces are kept.
/// Ordering is plain byte-wise lexicographic order, which is what route
/// tie-breaking relies on.
///
/// # Examples
///
/// ```
/// use rail_server::domain::StationCode;
///
/// let kgx = StationCode::parse(" KGX ").unwrap();
/// assert_eq!(kgx.as_str(), "KGX");
///
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("   ").is_err());
/// assert_eq!(StationCode::parse(" KING X ").unwrap().as_str(), "KING X");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        Ok(StationCode(trimmed.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationCode {
    type Error = InvalidStationCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StationCode::parse(&value)
    }
}

impl From<StationCode> for String {
    fn from(code: StationCode) -> Self {
        code.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated station: the node type of the rail graph.
///
/// Stations are immutable once the graph is built. Several stations may
/// share a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub code: StationCode,
    pub name: String,
    pub city: String,
    pub location: Coordinates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StationCode::parse("KGX").is_ok());
        assert!(StationCode::parse("MAN").is_ok());
        assert!(StationCode::parse("x-1").is_ok());
        assert!(StationCode::parse("910GLDS").is_ok());
    }

    #[test]
    fn parse_trims() {
        let code = StationCode::parse("  EDB\t").unwrap();
        assert_eq!(code.as_str(), "EDB");
    }

    #[test]
    fn reject_empty() {
        assert!(StationCode::parse("").is_err());
        assert!(StationCode::parse("   ").is_err());
    }

    #[test]
    fn keeps_interior_whitespace() {
        let code = StationCode::parse(" KING X ").unwrap();
        assert_eq!(code.as_str(), "KING X");
        assert_ne!(code, StationCode::parse("KINGX").unwrap());
    }

    #[test]
    fn empty_error_message() {
        let err = StationCode::parse(" ").unwrap_err();
        assert_eq!(err.to_string(), "invalid station code: must not be empty");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = StationCode::parse("ABC").unwrap();
        let b = StationCode::parse("ABD").unwrap();
        let c = StationCode::parse("AB").unwrap();
        assert!(a < b);
        assert!(c < a);
    }

    #[test]
    fn display_and_debug() {
        let code = StationCode::parse("PAD").unwrap();
        assert_eq!(format!("{}", code), "PAD");
        assert_eq!(format!("{:?}", code), "StationCode(PAD)");
    }

    #[test]
    fn serde_uses_plain_string() {
        let code = StationCode::parse("LDS").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"LDS\"");

        let back: StationCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);

        assert!(serde_json::from_str::<StationCode>("\"\"").is_err());
    }
}
