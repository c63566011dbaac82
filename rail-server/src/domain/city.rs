//! City name normalization.

use std::fmt;

/// Case-normalized city name used as a lookup key.
///
/// Two spellings that differ only in case or surrounding whitespace map to
/// the same key, so "London", " london" and "LONDON" are one city.
///
/// ```
/// use rail_server::domain::CityKey;
///
/// assert_eq!(CityKey::new(" London "), CityKey::new("LONDON"));
/// assert!(CityKey::new("   ").is_none());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityKey(String);

impl CityKey {
    /// Normalize a city name. Returns `None` for blank names.
    pub fn new(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(CityKey(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CityKey({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_and_whitespace_insensitive() {
        let a = CityKey::new("Manchester").unwrap();
        let b = CityKey::new("  MANCHESTER\n").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "manchester");
    }

    #[test]
    fn non_ascii_lowercased() {
        let a = CityKey::new("ÉDIMBOURG").unwrap();
        assert_eq!(a.as_str(), "édimbourg");
    }

    #[test]
    fn blank_is_none() {
        assert!(CityKey::new("").is_none());
        assert!(CityKey::new(" \t").is_none());
    }
}
