//! Per-camp detail records shown on a camp profile.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};

/// Lodging option offered by a camp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Accommodation {
    pub id: u64,
    pub camp_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<u32>,
}

/// Frequently asked question with its answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Faq {
    pub id: u64,
    pub camp_id: u64,
    pub question: String,
    pub answer: String,
    pub sort_order: i64,
}

/// A bookable session with its own dates and price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub id: u64,
    pub camp_id: u64,
    pub name: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub price: Option<u32>,
    pub notes: Option<String>,
}

/// Accommodation as submitted; `id` is `None` for a new record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccommodationInput {
    pub id: Option<u64>,
    pub camp_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<u32>,
}

impl AccommodationInput {
    pub fn validate(&mut self) -> Result<()> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(DirectoryError::invalid_input(
                "name",
                "Accommodation name is required",
            ));
        }
        Ok(())
    }
}

/// FAQ as submitted. Without a `sort_order` a new FAQ goes last and an
/// edited one keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqInput {
    pub id: Option<u64>,
    pub camp_id: u64,
    pub question: String,
    pub answer: String,
    pub sort_order: Option<i64>,
}

impl FaqInput {
    pub fn validate(&mut self) -> Result<()> {
        self.question = self.question.trim().to_string();
        self.answer = self.answer.trim().to_string();
        if self.question.is_empty() {
            return Err(DirectoryError::invalid_input("question", "Question is required"));
        }
        if self.answer.is_empty() {
            return Err(DirectoryError::invalid_input("answer", "Answer is required"));
        }
        Ok(())
    }
}

/// Session as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInput {
    pub id: Option<u64>,
    pub camp_id: u64,
    pub name: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub price: Option<u32>,
    pub notes: Option<String>,
}

impl SessionInput {
    pub fn validate(&mut self) -> Result<()> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(DirectoryError::invalid_input("name", "Session name is required"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(DirectoryError::invalid_input(
                    "end_date",
                    "Session cannot end before it starts",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_session_dates_must_be_ordered() {
        let mut session = SessionInput {
            camp_id: 1,
            name: "Week 1".to_string(),
            start_date: Some(date(2026, 7, 10)),
            end_date: Some(date(2026, 7, 3)),
            ..Default::default()
        };
        assert!(matches!(
            session.validate(),
            Err(DirectoryError::InvalidInput { ref field, .. }) if field == "end_date"
        ));

        session.end_date = Some(date(2026, 7, 10));
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_faq_trims_and_requires_text() {
        let mut faq = FaqInput {
            camp_id: 1,
            question: "  Is lunch included? ".to_string(),
            answer: String::new(),
            ..Default::default()
        };
        assert!(faq.validate().is_err());
        assert_eq!(faq.question, "Is lunch included?");
    }
}
