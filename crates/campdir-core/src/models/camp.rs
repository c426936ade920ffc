//! Camp record definition and the write-side profile payload.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Accommodation, Faq, Session, Term};
use crate::error::{DirectoryError, Result};

/// A complete camp record with its linked taxonomy terms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Camp {
    pub id: u64,
    pub name: String,
    /// Only approved camps are visible to public queries
    pub approved: bool,
    pub featured: bool,
    pub city: Option<String>,
    /// Two-letter upper-case state code
    pub state: Option<String>,
    pub zip: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    /// Free-form activity description used by text search
    pub activities_text: Option<String>,
    pub director_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_day: Option<Date>,
    pub closing_day: Option<Date>,
    /// Lowest advertised price, whole currency units
    pub min_price: Option<u32>,
    /// Highest advertised price, whole currency units
    pub max_price: Option<u32>,
    pub logo_url: Option<String>,
    /// Canonical detail-page URL
    pub internal_link: Option<String>,
    pub rating: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub types: Vec<Term>,
    #[serde(default)]
    pub weeks: Vec<Term>,
    #[serde(default)]
    pub activities: Vec<Term>,
}

/// Term ids selected for each taxonomy axis when saving a camp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampTerms {
    pub types: Vec<u64>,
    pub weeks: Vec<u64>,
    pub activities: Vec<u64>,
}

/// Profile payload for creating or fully replacing a camp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCamp {
    pub name: String,
    pub approved: bool,
    pub featured: bool,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub activities_text: Option<String>,
    pub director_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_day: Option<Date>,
    pub closing_day: Option<Date>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub logo_url: Option<String>,
    pub internal_link: Option<String>,
    pub rating: Option<f64>,
    pub terms: CampTerms,
}

impl NewCamp {
    /// Creates a payload with just a name; everything else empty.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Checks the profile and normalizes the state code in place.
    ///
    /// Stops at the first problem, the same way camp signup rejects a form.
    pub fn validate(&mut self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DirectoryError::invalid_input("name", "Camp name is required"));
        }
        self.name = self.name.trim().to_string();

        if let Some(state) = self.state.take() {
            let state = state.trim().to_ascii_uppercase();
            if !state.is_empty() {
                if !is_state_code(&state) {
                    return Err(DirectoryError::invalid_input(
                        "state",
                        format!("'{state}' is not a two-letter state code"),
                    ));
                }
                self.state = Some(state);
            }
        }

        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(DirectoryError::invalid_input(
                    "min_price",
                    format!("Minimum price {min} exceeds maximum price {max}"),
                ));
            }
        }

        if let (Some(open), Some(close)) = (self.opening_day, self.closing_day) {
            if open > close {
                return Err(DirectoryError::invalid_input(
                    "opening_day",
                    format!("Opening day {open} is after closing day {close}"),
                ));
            }
        }

        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(DirectoryError::invalid_input(
                    "rating",
                    format!("Rating {rating} must be between 0 and 5"),
                ));
            }
        }

        Ok(())
    }
}

impl From<&Camp> for NewCamp {
    /// Starting point for edits that change only a few fields.
    fn from(camp: &Camp) -> Self {
        Self {
            name: camp.name.clone(),
            approved: camp.approved,
            featured: camp.featured,
            city: camp.city.clone(),
            state: camp.state.clone(),
            zip: camp.zip.clone(),
            address: camp.address.clone(),
            description: camp.description.clone(),
            activities_text: camp.activities_text.clone(),
            director_name: camp.director_name.clone(),
            email: camp.email.clone(),
            phone: camp.phone.clone(),
            website: camp.website.clone(),
            opening_day: camp.opening_day,
            closing_day: camp.closing_day,
            min_price: camp.min_price,
            max_price: camp.max_price,
            logo_url: camp.logo_url.clone(),
            internal_link: camp.internal_link.clone(),
            rating: camp.rating,
            terms: CampTerms {
                types: camp.types.iter().map(|t| t.id).collect(),
                weeks: camp.weeks.iter().map(|t| t.id).collect(),
                activities: camp.activities.iter().map(|t| t.id).collect(),
            },
        }
    }
}

/// A camp with every detail record shown on its profile page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampProfile {
    pub camp: Camp,
    pub accommodations: Vec<Accommodation>,
    pub faqs: Vec<Faq>,
    pub sessions: Vec<Session>,
}

/// True for a two-letter ASCII alphabetic code.
pub fn is_state_code(value: &str) -> bool {
    value.len() == 2 && value.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_normalizes_state() {
        let mut camp = NewCamp {
            state: Some(" ny ".to_string()),
            ..NewCamp::named("  Lake Placid Summer Camp ")
        };
        camp.validate().expect("valid camp");
        assert_eq!(camp.state.as_deref(), Some("NY"));
        assert_eq!(camp.name, "Lake Placid Summer Camp");
    }

    #[test]
    fn test_validate_blank_state_becomes_none() {
        let mut camp = NewCamp {
            state: Some("  ".to_string()),
            ..NewCamp::named("Camp")
        };
        camp.validate().expect("valid camp");
        assert_eq!(camp.state, None);
    }

    #[test]
    fn test_validate_stops_at_first_error() {
        let mut camp = NewCamp {
            state: Some("New York".to_string()),
            min_price: Some(500),
            max_price: Some(100),
            ..NewCamp::named("")
        };
        match camp.validate() {
            Err(DirectoryError::InvalidInput { field, .. }) => assert_eq!(field, "name"),
            other => panic!("expected name error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_inverted_ranges() {
        let mut prices = NewCamp {
            min_price: Some(500),
            max_price: Some(100),
            ..NewCamp::named("Camp")
        };
        assert!(matches!(
            prices.validate(),
            Err(DirectoryError::InvalidInput { ref field, .. }) if field == "min_price"
        ));

        let mut dates = NewCamp {
            opening_day: Some(jiff::civil::date(2026, 8, 1)),
            closing_day: Some(jiff::civil::date(2026, 6, 1)),
            ..NewCamp::named("Camp")
        };
        assert!(matches!(
            dates.validate(),
            Err(DirectoryError::InvalidInput { ref field, .. }) if field == "opening_day"
        ));
    }

    #[test]
    fn test_validate_rating_range() {
        let mut camp = NewCamp {
            rating: Some(5.5),
            ..NewCamp::named("Camp")
        };
        assert!(camp.validate().is_err());
        camp.rating = Some(4.5);
        assert!(camp.validate().is_ok());
    }
}
