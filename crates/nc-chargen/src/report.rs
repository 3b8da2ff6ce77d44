//! Soft failures a generation records instead of raising.

use std::fmt;

use serde::Serialize;

/// A pick that delivered fewer items than requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    /// What was being picked, e.g. `"tribe gifts"`.
    pub what: String,
    /// How many were asked for.
    pub requested: usize,
    /// How many were actually granted.
    pub granted: usize,
}

impl Shortfall {
    /// A shortfall when `granted < requested`, else `None`.
    pub fn check(what: impl Into<String>, requested: usize, granted: usize) -> Option<Self> {
        (granted < requested).then(|| Self {
            what: what.into(),
            requested,
            granted,
        })
    }

    /// Items that could not be granted.
    pub fn missing(&self) -> usize {
        self.requested - self.granted
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: granted {} of {}",
            self.what, self.granted, self.requested
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_reports_under_delivery() {
        assert!(Shortfall::check("perks", 3, 3).is_none());
        assert!(Shortfall::check("perks", 3, 4).is_none());
        let s = Shortfall::check("perks", 5, 2).unwrap();
        assert_eq!(s.missing(), 3);
        assert_eq!(s.to_string(), "perks: granted 2 of 5");
    }
}
