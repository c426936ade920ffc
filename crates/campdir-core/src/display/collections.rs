//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles the empty case with a one-line message and otherwise
//! writes its items one after another using their own Display format.

use std::fmt;

use crate::models::{CampSummary, Credential, Faq, Message, Taxonomy, Term};

/// Newtype wrapper for displaying camp summaries (favorites, featured
/// camps) outside of a paginated listing.
///
/// # Examples
///
/// ```rust
/// use campdir_core::{display::CampSummaries, models::CampSummary};
///
/// let camp = CampSummary {
///     id: 1,
///     name: "Camp Birchwood".to_string(),
///     city: Some("Lake Placid".to_string()),
///     state: Some("NY".to_string()),
///     logo_url: None,
///     opening_day: None,
///     closing_day: None,
///     min_price: None,
///     max_price: None,
///     internal_link: None,
///     type_names: vec![],
///     week_names: vec![],
///     activity_names: vec![],
///     activity_count: 0,
/// };
/// let output = CampSummaries(vec![camp]).to_string();
/// assert!(output.contains("## Camp Birchwood (ID: 1)"));
/// ```
pub struct CampSummaries(pub Vec<CampSummary>);

impl CampSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CampSummary> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a CampSummaries {
    type Item = &'a CampSummary;
    type IntoIter = std::slice::Iter<'a, CampSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for CampSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No camps found.")
        } else {
            for camp in &self.0 {
                write!(f, "{camp}")?;
            }
            Ok(())
        }
    }
}

/// Terms of one taxonomy in curated order, under a heading naming the axis.
pub struct Terms {
    pub taxonomy: Taxonomy,
    pub terms: Vec<Term>,
}

impl Terms {
    pub fn new(taxonomy: Taxonomy, terms: Vec<Term>) -> Self {
        Self { taxonomy, terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }
}

impl fmt::Display for Terms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} terms", self.taxonomy)?;
        writeln!(f)?;
        if self.terms.is_empty() {
            return writeln!(f, "No terms found.");
        }
        for term in &self.terms {
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

/// Messages received by a camp.
pub struct Messages(pub Vec<Message>);

impl Messages {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages not yet marked read.
    pub fn unread(&self) -> usize {
        self.0.iter().filter(|m| !m.read).count()
    }
}

impl fmt::Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No messages.");
        }
        writeln!(f, "{} messages, {} unread", self.len(), self.unread())?;
        writeln!(f)?;
        for message in &self.0 {
            write!(f, "{message}")?;
        }
        Ok(())
    }
}

/// FAQ entries of a camp in display order.
pub struct Faqs(pub Vec<Faq>);

impl Faqs {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Faqs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No FAQ entries.")
        } else {
            for faq in &self.0 {
                write!(f, "{faq}")?;
            }
            Ok(())
        }
    }
}

/// Stored logins with their secrets masked.
pub struct Credentials(pub Vec<Credential>);

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No stored credentials.");
        }
        writeln!(f, "## Credentials")?;
        writeln!(f)?;
        for credential in &self.0 {
            write!(f, "{credential}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn message(id: u64, read: bool) -> Message {
        Message {
            id,
            parent_id: 1,
            camp_id: 2,
            subject: format!("Question {id}"),
            body: "Do you offer bus service?".to_string(),
            read,
            created_at: Timestamp::from_second(1_782_000_000).unwrap(),
        }
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(CampSummaries(vec![]).to_string(), "No camps found.\n");
        assert_eq!(Messages(vec![]).to_string(), "No messages.\n");
        assert_eq!(Faqs(vec![]).to_string(), "No FAQ entries.\n");
        assert!(Terms::new(Taxonomy::Week, vec![])
            .to_string()
            .contains("## Duration terms"));
    }

    #[test]
    fn test_messages_count_unread() {
        let messages = Messages(vec![message(1, true), message(2, false), message(3, false)]);
        let output = messages.to_string();
        assert!(output.starts_with("3 messages, 2 unread\n"));
        assert!(output.contains("### 2. Question 2 (unread)"));
        assert!(output.contains("### 1. Question 1\n"));
    }

    #[test]
    fn test_credentials_never_show_secrets() {
        let credential = Credential {
            id: 4,
            camp_id: Some(2),
            label: "Booking portal".to_string(),
            username: "birchwood".to_string(),
            notes: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };
        let output = Credentials(vec![credential]).to_string();
        assert!(output.contains("- **Booking portal** (ID: 4): `birchwood` / ••••••••, camp 2"));
        assert_eq!(Credentials(vec![]).to_string(), "No stored credentials.\n");
    }
}
