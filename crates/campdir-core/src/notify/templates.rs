//! HTML email templates.

use std::fmt::Write;

use super::OutgoingEmail;
use crate::models::{
    Camp, ContactSubmission, Message, Parent, PasswordReset, QueuedNotification, Settings,
};

/// Escapes text for inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escaped text with line breaks kept.
fn paragraph(text: &str) -> String {
    escape_html(text.trim()).replace('\n', "<br>\n")
}

fn layout(site_name: &str, heading: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<body style=\"font-family: sans-serif;\">\n\
         <h2>{}</h2>\n{content}\n<hr>\n<p style=\"color: #777;\">{}</p>\n</body>\n</html>\n",
        escape_html(heading),
        escape_html(site_name)
    )
}

fn email(settings: &Settings, to: &str, subject: String, html_body: String) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        from: settings.from_email.clone(),
        subject,
        html_body,
    }
}

/// Welcome email for a newly registered parent.
pub fn welcome(settings: &Settings, parent: &Parent) -> OutgoingEmail {
    let content = format!(
        "<p>Hi {},</p>\n<p>Thanks for joining {}. You can now save camps to your \
         favorites and message camp directors directly.</p>",
        escape_html(&parent.first_name),
        escape_html(&settings.site_name)
    );
    email(
        settings,
        &parent.email,
        format!("Welcome to {}", settings.site_name),
        layout(&settings.site_name, "Welcome!", &content),
    )
}

/// Tells the site admin about a new parent account.
pub fn registration_notice(settings: &Settings, admin: &str, parent: &Parent) -> OutgoingEmail {
    let mut content = String::from("<table>\n");
    let rows = [
        ("Name", Some(parent.full_name())),
        ("Email", Some(parent.email.clone())),
        ("Phone", parent.phone.clone()),
        ("City", parent.city.clone()),
        ("State", parent.state.clone()),
        ("Children", parent.children_count.map(|n| n.to_string())),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            let _ = writeln!(
                content,
                "<tr><th align=\"left\">{label}</th><td>{}</td></tr>",
                escape_html(&value)
            );
        }
    }
    content.push_str("</table>");

    email(
        settings,
        admin,
        format!("New parent registration: {}", parent.full_name()),
        layout(&settings.site_name, "New parent registration", &content),
    )
}

/// Confirms receipt to the person who used the contact form.
pub fn contact_acknowledgment(settings: &Settings, submission: &ContactSubmission) -> OutgoingEmail {
    let content = format!(
        "<p>Hi {},</p>\n<p>We received your message and will get back to you soon.</p>\n\
         <blockquote>{}</blockquote>",
        escape_html(&submission.name),
        paragraph(&submission.message)
    );
    email(
        settings,
        &submission.email,
        format!("We received your message - {}", settings.site_name),
        layout(&settings.site_name, "Thanks for reaching out", &content),
    )
}

/// Forwards a contact submission to the site admin.
pub fn contact_notice(settings: &Settings, admin: &str, submission: &ContactSubmission) -> OutgoingEmail {
    let subject = submission.subject.as_deref().unwrap_or("(no subject)");
    let content = format!(
        "<p><strong>From:</strong> {} &lt;{}&gt;</p>\n<p><strong>Subject:</strong> {}</p>\n<p>{}</p>",
        escape_html(&submission.name),
        escape_html(&submission.email),
        escape_html(subject),
        paragraph(&submission.message)
    );
    email(
        settings,
        admin,
        format!("Contact form: {subject}"),
        layout(&settings.site_name, "New contact form submission", &content),
    )
}

/// Password reset code for a parent. The expiry is shown in UTC.
pub fn password_reset(settings: &Settings, parent: &Parent, reset: &PasswordReset) -> OutgoingEmail {
    let content = format!(
        "<p>Hi {},</p>\n<p>A password reset was requested for your {} account. \
         Use this code to choose a new password:</p>\n\
         <p style=\"font-size: 1.3em;\"><code>{}</code></p>\n\
         <p>The code works once and expires at {} UTC. If you did not ask for a \
         reset, you can ignore this email.</p>",
        escape_html(&parent.first_name),
        escape_html(&settings.site_name),
        escape_html(&reset.token),
        reset.expires_at.strftime("%Y-%m-%d %H:%M")
    );
    email(
        settings,
        &parent.email,
        format!("Reset your {} password", settings.site_name),
        layout(&settings.site_name, "Password reset", &content),
    )
}

/// Subject and HTML fragment of a digest entry announcing a parent's message.
pub fn message_digest_item(camp: &Camp, parent: &Parent, message: &Message) -> (String, String) {
    let subject = format!("New message for {}: {}", camp.name, message.subject);
    let body = format!(
        "<p><strong>{}</strong> &lt;{}&gt; wrote about <em>{}</em>:</p>\n<p><strong>{}</strong></p>\n<p>{}</p>",
        escape_html(&parent.full_name()),
        escape_html(&parent.email),
        escape_html(&camp.name),
        escape_html(&message.subject),
        paragraph(&message.body)
    );
    (subject, body)
}

/// Subject and full HTML body telling a director their camp is now listed.
pub fn camp_approved(settings: &Settings, camp: &Camp) -> (String, String) {
    let content = format!(
        "<p>Good news: <strong>{}</strong> has been approved and is now listed in the {} directory.</p>",
        escape_html(&camp.name),
        escape_html(&settings.site_name)
    );
    (
        format!("{} is now listed", camp.name),
        layout(&settings.site_name, "Your camp is live", &content),
    )
}

/// Combines a recipient's pending digest entries into one email.
pub fn digest(settings: &Settings, recipient: &str, items: &[QueuedNotification]) -> OutgoingEmail {
    let mut content = format!(
        "<p>You have {} new notification{} since the last digest.</p>\n",
        items.len(),
        if items.len() == 1 { "" } else { "s" }
    );
    for item in items {
        let _ = writeln!(
            content,
            "<div style=\"margin-bottom: 1.5em;\">\n<h3>{}</h3>\n{}\n</div>",
            escape_html(&item.subject),
            item.body
        );
    }

    email(
        settings,
        recipient,
        format!("{} daily digest ({} new)", settings.site_name, items.len()),
        layout(&settings.site_name, "Your daily digest", &content),
    )
}
