//! Directory search parameters.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Sort order for directory listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    /// Ascending by minimum price
    PriceAsc,
    /// Descending by maximum price
    PriceDesc,
    /// Ascending by opening day
    DateAsc,
    /// Descending by opening day
    DateDesc,
    /// Fresh shuffle on every request
    Random,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::DateAsc => "date_asc",
            SortKey::DateDesc => "date_desc",
            SortKey::Random => "random",
        }
    }

    /// Parses a sort key, falling back to name ascending for anything
    /// unrecognized.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name_asc" | "name" => Ok(SortKey::NameAsc),
            "name_desc" => Ok(SortKey::NameDesc),
            "price_asc" | "price" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "date_asc" | "date" => Ok(SortKey::DateAsc),
            "date_desc" => Ok(SortKey::DateDesc),
            "random" => Ok(SortKey::Random),
            _ => Err(format!("Invalid sort key: {s}")),
        }
    }
}

/// Everything a visitor can ask of the public directory.
///
/// Each field is independent; `None` (or an empty search string) leaves that
/// dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampQuery {
    /// Case-insensitive substring matched across the camp's text fields
    pub search: Option<String>,
    pub sort: SortKey,
    /// Exact two-letter state code
    pub state: Option<String>,
    /// Single type term id
    pub type_id: Option<u64>,
    /// Single week (duration) term id
    pub week_id: Option<u64>,
    pub price_min: Option<u32>,
    pub price_max: Option<u32>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
    /// 1-indexed page number; clamped into range when the query runs
    pub page: u32,
    /// When set and nothing is filtered, the listing is not queried at all
    pub lazy: bool,
}

impl CampQuery {
    /// Query for the first page of every approved camp.
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Default::default()
        }
    }

    /// The trimmed search text, or `None` when it is empty.
    pub fn search_text(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// True when any search text or filter dimension is active.
    pub fn has_criteria(&self) -> bool {
        self.search_text().is_some()
            || self.state.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.type_id.is_some()
            || self.week_id.is_some()
            || self.price_min.is_some()
            || self.price_max.is_some()
            || self.date_from.is_some()
            || self.date_to.is_some()
    }

    /// Builds a query from already-decoded querystring pairs.
    ///
    /// Recognized keys are `camp_search`, `camp_sort`, `filter_state`,
    /// `filter_type`, `filter_duration`, `filter_price_min`,
    /// `filter_price_max`, `filter_date_from`, `filter_date_to` and
    /// `camp_page`. Empty or unparseable values are treated as absent.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::new();

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "camp_search" => query.search = Some(value.to_string()),
                "camp_sort" => query.sort = SortKey::parse_or_default(value),
                "filter_state" => query.state = Some(value.to_ascii_uppercase()),
                "filter_type" => query.type_id = value.parse().ok(),
                "filter_duration" => query.week_id = value.parse().ok(),
                "filter_price_min" => query.price_min = value.parse().ok(),
                "filter_price_max" => query.price_max = value.parse().ok(),
                "filter_date_from" => query.date_from = value.parse().ok(),
                "filter_date_to" => query.date_to = value.parse().ok(),
                "camp_page" => query.page = value.parse().unwrap_or(1),
                _ => {}
            }
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sort_falls_back_to_name() {
        assert_eq!(SortKey::parse_or_default("popularity"), SortKey::NameAsc);
        assert_eq!(SortKey::parse_or_default("PRICE_DESC"), SortKey::PriceDesc);
    }

    #[test]
    fn test_from_pairs_reads_every_filter() {
        let query = CampQuery::from_pairs([
            ("camp_search", "lake"),
            ("camp_sort", "date_desc"),
            ("filter_state", "ny"),
            ("filter_type", "3"),
            ("filter_duration", "7"),
            ("filter_price_min", "1000"),
            ("filter_price_max", "5000"),
            ("filter_date_from", "2026-06-01"),
            ("filter_date_to", "2026-06-30"),
            ("camp_page", "2"),
        ]);

        assert_eq!(query.search.as_deref(), Some("lake"));
        assert_eq!(query.sort, SortKey::DateDesc);
        assert_eq!(query.state.as_deref(), Some("NY"));
        assert_eq!(query.type_id, Some(3));
        assert_eq!(query.week_id, Some(7));
        assert_eq!(query.price_min, Some(1000));
        assert_eq!(query.price_max, Some(5000));
        assert_eq!(query.date_from, Some(jiff::civil::date(2026, 6, 1)));
        assert_eq!(query.date_to, Some(jiff::civil::date(2026, 6, 30)));
        assert_eq!(query.page, 2);
        assert!(query.has_criteria());
    }

    #[test]
    fn test_from_pairs_ignores_garbage() {
        let query = CampQuery::from_pairs([
            ("camp_search", "   "),
            ("filter_type", "abc"),
            ("filter_date_from", "June"),
            ("camp_page", "last"),
            ("utm_source", "newsletter"),
        ]);

        assert_eq!(query, CampQuery::new());
        assert!(!query.has_criteria());
    }

    #[test]
    fn test_blank_search_is_not_a_criterion() {
        let query = CampQuery {
            search: Some("  ".to_string()),
            ..CampQuery::new()
        };
        assert_eq!(query.search_text(), None);
        assert!(!query.has_criteria());
    }
}
