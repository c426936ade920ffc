//! Taxonomy axes and their terms.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three independent classification axes a camp can be linked to.
///
/// Each axis owns a term table and a pivot table; all SQL that touches
/// taxonomy data goes through these accessors instead of string table names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Taxonomy {
    /// Camp type, e.g. "Day Camp" or "Sleepaway"
    Type,
    /// Session duration, e.g. "2 Weeks"
    #[serde(alias = "duration")]
    Week,
    /// Offered activity, e.g. "Canoeing"
    Activity,
}

impl Taxonomy {
    /// All axes in display order.
    pub const ALL: [Taxonomy; 3] = [Taxonomy::Type, Taxonomy::Week, Taxonomy::Activity];

    /// Name of the term table for this axis.
    pub fn table(&self) -> &'static str {
        match self {
            Taxonomy::Type => "camp_types",
            Taxonomy::Week => "camp_weeks",
            Taxonomy::Activity => "camp_activities",
        }
    }

    /// Name of the camp pivot table for this axis.
    pub fn link_table(&self) -> &'static str {
        match self {
            Taxonomy::Type => "camp_type_links",
            Taxonomy::Week => "camp_week_links",
            Taxonomy::Activity => "camp_activity_links",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Taxonomy::Type => "type",
            Taxonomy::Week => "week",
            Taxonomy::Activity => "activity",
        }
    }

    /// Human readable label used in headings and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Taxonomy::Type => "Type",
            Taxonomy::Week => "Duration",
            Taxonomy::Activity => "Activity",
        }
    }
}

impl FromStr for Taxonomy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "type" | "types" => Ok(Taxonomy::Type),
            "week" | "weeks" | "duration" => Ok(Taxonomy::Week),
            "activity" | "activities" => Ok(Taxonomy::Activity),
            _ => Err(format!("Invalid taxonomy: {s}")),
        }
    }
}

/// A named, orderable classification value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Term {
    pub id: u64,
    pub taxonomy: Taxonomy,
    pub name: String,
    /// URL-safe identifier, unique within the taxonomy
    pub slug: String,
    pub active: bool,
    /// Curated rank; lower sorts first
    pub sort_order: i64,
}

/// Derives a URL-safe slug: lowercase ASCII alphanumerics with every other
/// run of characters collapsed to a single `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Day Camp"), "day-camp");
        assert_eq!(slugify("  2 Weeks!! "), "2-weeks");
        assert_eq!(slugify("Arts & Crafts"), "arts-crafts");
        assert_eq!(slugify("Équitation"), "quitation");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_taxonomy_tables_are_distinct() {
        let tables: Vec<_> = Taxonomy::ALL.iter().map(Taxonomy::table).collect();
        let links: Vec<_> = Taxonomy::ALL.iter().map(Taxonomy::link_table).collect();
        assert_eq!(tables, ["camp_types", "camp_weeks", "camp_activities"]);
        assert_eq!(
            links,
            ["camp_type_links", "camp_week_links", "camp_activity_links"]
        );
    }

    #[test]
    fn test_taxonomy_from_str() {
        assert_eq!("duration".parse::<Taxonomy>(), Ok(Taxonomy::Week));
        assert_eq!("Types".parse::<Taxonomy>(), Ok(Taxonomy::Type));
        assert!("colour".parse::<Taxonomy>().is_err());
    }
}
