//! Directory listing results.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Fixed number of camps per directory page.
pub const PAGE_SIZE: u32 = 20;

/// Number of activity names carried on each summary.
pub const ACTIVITY_PREVIEW: usize = 4;

/// A camp as shown on a directory page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampSummary {
    pub id: u64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub logo_url: Option<String>,
    pub opening_day: Option<Date>,
    pub closing_day: Option<Date>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub internal_link: Option<String>,
    pub type_names: Vec<String>,
    pub week_names: Vec<String>,
    /// At most [`ACTIVITY_PREVIEW`] names
    pub activity_names: Vec<String>,
    /// Total linked activities, including those not previewed
    pub activity_count: u32,
}

impl CampSummary {
    /// Activities linked to the camp but left out of the preview.
    pub fn hidden_activities(&self) -> u32 {
        self.activity_count
            .saturating_sub(u32::try_from(self.activity_names.len()).unwrap_or(u32::MAX))
    }
}

/// One page of a filtered directory listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampPage {
    pub items: Vec<CampSummary>,
    /// Camps matching the filters across all pages
    pub total: u64,
    /// Page actually returned, after clamping
    pub page: u32,
    pub total_pages: u32,
    pub page_size: u32,
}

impl CampPage {
    /// Total page count for a result size; zero results give zero pages.
    pub fn page_count(total: u64, page_size: u32) -> u32 {
        u32::try_from(total.div_ceil(u64::from(page_size.max(1)))).unwrap_or(u32::MAX)
    }

    /// Clamps a requested 1-indexed page into `1..=total_pages`.
    pub fn clamp_page(requested: u32, total_pages: u32) -> u32 {
        requested.max(1).min(total_pages.max(1))
    }
}

/// Outcome of a directory query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Listing {
    /// Lazy mode with no criteria: nothing was queried yet
    NotQueried,
    Page(CampPage),
}

impl Listing {
    /// The page, if a query was issued.
    pub fn page(&self) -> Option<&CampPage> {
        match self {
            Listing::Page(page) => Some(page),
            Listing::NotQueried => None,
        }
    }

    /// Unwraps into the page, treating `NotQueried` as an empty first page.
    pub fn into_page(self) -> CampPage {
        match self {
            Listing::Page(page) => page,
            Listing::NotQueried => CampPage {
                items: Vec::new(),
                total: 0,
                page: 1,
                total_pages: 0,
                page_size: PAGE_SIZE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(CampPage::page_count(0, PAGE_SIZE), 0);
        assert_eq!(CampPage::page_count(20, PAGE_SIZE), 1);
        assert_eq!(CampPage::page_count(21, PAGE_SIZE), 2);
        assert_eq!(CampPage::page_count(45, PAGE_SIZE), 3);
        assert_eq!(CampPage::page_count(u64::MAX, 1), u32::MAX);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(CampPage::clamp_page(0, 3), 1);
        assert_eq!(CampPage::clamp_page(2, 3), 2);
        assert_eq!(CampPage::clamp_page(99, 3), 3);
        assert_eq!(CampPage::clamp_page(5, 0), 1);
    }
}
