//! Display implementations for domain models.
//!
//! Every implementation writes Markdown so the same text works in the
//! terminal renderer and as MCP tool output. Kept apart from the model
//! definitions so data structures stay free of presentation logic.

use std::fmt;

use super::datetime::{LocalDateTime, PriceRange, Season};
use crate::models::{
    Accommodation, Camp, CampPage, CampProfile, CampSummary, ContactSubmission, Credential,
    DigestReport, EmailStatus, Faq, Listing, Message, NotificationKind, Parent, PasswordReset,
    QueueStats, QueueStatus, QueuedNotification, Session, Settings, SortKey, Taxonomy, Term,
};

/// Placeholder shown wherever a stored secret would go.
pub const MASKED_SECRET: &str = "••••••••";

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// "City, ST 12345" from whichever parts are present.
fn location(city: Option<&str>, state: Option<&str>, zip: Option<&str>) -> Option<String> {
    let mut out = String::new();
    if let Some(city) = city {
        out.push_str(city);
    }
    if let Some(state) = state {
        if !out.is_empty() {
            out.push_str(", ");
        }
        out.push_str(state);
    }
    if let Some(zip) = zip {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(zip);
    }
    (!out.is_empty()).then_some(out)
}

fn term_list(terms: &[Term]) -> String {
    terms
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}. {} (`{}`)", self.id, self.name, self.slug)?;
        if !self.active {
            write!(f, " _inactive_")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Camp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        let status = if self.approved { "Approved" } else { "Pending approval" };
        if self.featured {
            writeln!(f, "- Status: {status}, featured")?;
        } else {
            writeln!(f, "- Status: {status}")?;
        }
        if let Some(loc) = location(
            self.city.as_deref(),
            self.state.as_deref(),
            self.zip.as_deref(),
        ) {
            writeln!(f, "- Location: {loc}")?;
        }
        if let Some(address) = &self.address {
            writeln!(f, "- Address: {address}")?;
        }
        writeln!(f, "- Season: {}", Season(self.opening_day, self.closing_day))?;
        writeln!(f, "- Price: {}", PriceRange(self.min_price, self.max_price))?;
        if let Some(rating) = self.rating {
            writeln!(f, "- Rating: {rating:.1}/5")?;
        }
        if let Some(director) = &self.director_name {
            writeln!(f, "- Director: {director}")?;
        }
        if let Some(email) = &self.email {
            writeln!(f, "- Email: {email}")?;
        }
        if let Some(phone) = &self.phone {
            writeln!(f, "- Phone: {phone}")?;
        }
        if let Some(website) = &self.website {
            writeln!(f, "- Website: {website}")?;
        }
        if let Some(link) = &self.internal_link {
            writeln!(f, "- Profile: {link}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        if let Some(activities) = &self.activities_text {
            writeln!(f)?;
            writeln!(f, "{activities}")?;
        }

        for (axis, terms) in [
            (Taxonomy::Type, &self.types),
            (Taxonomy::Week, &self.weeks),
            (Taxonomy::Activity, &self.activities),
        ] {
            if !terms.is_empty() {
                writeln!(f)?;
                writeln!(f, "**{axis}**: {}", term_list(terms))?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for CampProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.camp)?;

        if !self.sessions.is_empty() {
            writeln!(f, "\n## Sessions")?;
            writeln!(f)?;
            for session in &self.sessions {
                write!(f, "{session}")?;
            }
        }
        if !self.accommodations.is_empty() {
            writeln!(f, "\n## Accommodations")?;
            writeln!(f)?;
            for accommodation in &self.accommodations {
                write!(f, "{accommodation}")?;
            }
        }
        if !self.faqs.is_empty() {
            writeln!(f, "\n## FAQ")?;
            writeln!(f)?;
            for faq in &self.faqs {
                write!(f, "{faq}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for CampSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        if let Some(loc) = location(self.city.as_deref(), self.state.as_deref(), None) {
            writeln!(f, "- **Location**: {loc}")?;
        }
        let season = Season(self.opening_day, self.closing_day);
        if season.is_known() {
            writeln!(f, "- **Season**: {season}")?;
        }
        let price = PriceRange(self.min_price, self.max_price);
        if price.is_known() {
            writeln!(f, "- **Price**: {price}")?;
        }
        if !self.type_names.is_empty() {
            writeln!(f, "- **Type**: {}", self.type_names.join(", "))?;
        }
        if !self.week_names.is_empty() {
            writeln!(f, "- **Duration**: {}", self.week_names.join(", "))?;
        }
        if !self.activity_names.is_empty() {
            write!(f, "- **Activities**: {}", self.activity_names.join(", "))?;
            let hidden = self.hidden_activities();
            if hidden > 0 {
                write!(f, " (+{hidden} more)")?;
            }
            writeln!(f)?;
        }
        if let Some(link) = &self.internal_link {
            writeln!(f, "- **Profile**: {link}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for CampPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "No camps match your search.");
        }

        let noun = if self.total == 1 { "camp" } else { "camps" };
        writeln!(
            f,
            "{} {noun}, page {} of {}",
            self.total, self.page, self.total_pages
        )?;
        writeln!(f)?;
        for item in &self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::NotQueried => {
                writeln!(f, "Enter a search or choose a filter to browse camps.")
            }
            Listing::Page(page) => write!(f, "{page}"),
        }
    }
}

impl fmt::Display for Accommodation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}**", self.name)?;
        if let Some(capacity) = self.capacity {
            write!(f, " (sleeps {capacity})")?;
        }
        if let Some(desc) = &self.description {
            write!(f, ": {desc}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Faq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {} (ID: {})", self.question, self.id)?;
        writeln!(f)?;
        writeln!(f, "{}", self.answer)?;
        writeln!(f)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}**: {}", self.name, Season(self.start_date, self.end_date))?;
        if let Some(price) = self.price {
            write!(f, ", ${price}")?;
        }
        if let Some(notes) = &self.notes {
            write!(f, " ({notes})")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.full_name())?;
        writeln!(f)?;
        writeln!(f, "- Email: {}", self.email)?;
        if let Some(phone) = &self.phone {
            writeln!(f, "- Phone: {phone}")?;
        }
        if let Some(loc) = location(self.city.as_deref(), self.state.as_deref(), None) {
            writeln!(f, "- Location: {loc}")?;
        }
        if let Some(children) = self.children_count {
            writeln!(f, "- Children: {children}")?;
        }
        writeln!(f, "- Welcome email: {}", self.welcome_email_status)?;
        writeln!(f, "- Registered: {}", LocalDateTime(&self.created_at))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.read { "" } else { " (unread)" };
        writeln!(f, "### {}. {}{marker}", self.id, self.subject)?;
        writeln!(f)?;
        writeln!(
            f,
            "- From parent {} to camp {}",
            self.parent_id, self.camp_id
        )?;
        writeln!(f, "- Sent: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;
        writeln!(f, "{}", self.body.trim())?;
        writeln!(f)
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{}** (ID: {}): `{}` / {MASKED_SECRET}",
            self.label, self.id, self.username
        )?;
        if let Some(camp_id) = self.camp_id {
            write!(f, ", camp {camp_id}")?;
        }
        if let Some(notes) = &self.notes {
            write!(f, " - {notes}")?;
        }
        writeln!(f)
    }
}

/// The code itself only travels by email.
impl fmt::Display for PasswordReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Reset code issued to parent {}, valid until {} (email {})",
            self.parent_id,
            LocalDateTime(&self.expires_at),
            self.email_status
        )
    }
}

impl fmt::Display for ContactSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Contact submission {}", self.id)?;
        writeln!(f)?;
        writeln!(f, "- From: {} <{}>", self.name, self.email)?;
        if let Some(subject) = &self.subject {
            writeln!(f, "- Subject: {subject}")?;
        }
        writeln!(f, "- Email status: {}", self.email_status)?;
        writeln!(f, "- Received: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;
        writeln!(f, "{}", self.message.trim())
    }
}

impl fmt::Display for QueuedNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {}. [{}] {} → {} ({})",
            self.id, self.kind, self.subject, self.recipient, self.status
        )?;
        if let Some(error) = &self.error {
            write!(f, ": {error}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for QueueStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Notification queue")?;
        writeln!(f)?;
        writeln!(f, "- Pending: {}", self.pending)?;
        writeln!(f, "- Sending: {}", self.sending)?;
        writeln!(f, "- Sent: {}", self.sent)?;
        writeln!(f, "- Failed: {}", self.failed)
    }
}

impl fmt::Display for DigestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ran {
            writeln!(f, "Digest run complete.")?;
        } else {
            writeln!(f, "Digest not due yet; only direct notifications were sent.")?;
        }
        writeln!(f)?;
        writeln!(f, "- Emails sent: {}", self.emails_sent)?;
        writeln!(f, "- Items sent: {}", self.items_sent)?;
        writeln!(f, "- Items failed: {}", self.items_failed)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Settings")?;
        writeln!(f)?;
        writeln!(f, "- site_name: {}", self.site_name)?;
        writeln!(
            f,
            "- admin_email: {}",
            self.admin_email.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(f, "- from_email: {}", self.from_email)?;
        writeln!(f, "- digest_hour: {}", self.digest_hour)?;
        match self.last_digest_date {
            Some(date) => writeln!(f, "- last_digest_date: {date}"),
            None => writeln!(f, "- last_digest_date: (never)"),
        }
    }
}
