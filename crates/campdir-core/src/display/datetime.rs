//! Date, time and range display utilities.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// A `Timestamp` rendered in the system timezone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// An operating season or session span with either end possibly unknown.
pub struct Season(pub Option<Date>, pub Option<Date>);

impl Season {
    /// False when neither end is known and there is nothing to show.
    pub fn is_known(&self) -> bool {
        self.0.is_some() || self.1.is_some()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = |d: &Date| d.strftime("%b %-d, %Y").to_string();
        match (&self.0, &self.1) {
            (Some(from), Some(to)) => write!(f, "{} – {}", day(from), day(to)),
            (Some(from), None) => write!(f, "from {}", day(from)),
            (None, Some(to)) => write!(f, "until {}", day(to)),
            (None, None) => write!(f, "dates not announced"),
        }
    }
}

/// A price span in whole currency units.
pub struct PriceRange(pub Option<u32>, pub Option<u32>);

impl PriceRange {
    pub fn is_known(&self) -> bool {
        self.0.is_some() || self.1.is_some()
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0, self.1) {
            (Some(min), Some(max)) if min == max => write!(f, "${min}"),
            (Some(min), Some(max)) => write!(f, "${min} – ${max}"),
            (Some(min), None) => write!(f, "from ${min}"),
            (None, Some(max)) => write!(f, "up to ${max}"),
            (None, None) => write!(f, "price on request"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_season_display() {
        let season = Season(Some(date(2026, 6, 1)), Some(date(2026, 8, 15)));
        assert_eq!(season.to_string(), "Jun 1, 2026 – Aug 15, 2026");
        assert_eq!(Season(None, Some(date(2026, 8, 15))).to_string(), "until Aug 15, 2026");
        assert!(!Season(None, None).is_known());
    }

    #[test]
    fn test_price_range_display() {
        assert_eq!(PriceRange(Some(900), Some(2400)).to_string(), "$900 – $2400");
        assert_eq!(PriceRange(Some(500), Some(500)).to_string(), "$500");
        assert_eq!(PriceRange(None, Some(300)).to_string(), "up to $300");
    }
}
