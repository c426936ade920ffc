//! Parameter structures for directory operations.
//!
//! These structures are shared by every interface (CLI, MCP) without
//! framework-specific derives. Interface layers wrap them: the CLI converts
//! its clap argument structs into them, and the MCP server deserializes them
//! directly (with `JsonSchema` derived when the `schema` feature is on).
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Dates travel as `YYYY-MM-DD` strings and are parsed on conversion; a
//! value that does not parse is treated as absent, like a bad querystring
//! value.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{CampQuery, FaqInput, SortKey, Taxonomy};

/// Generic parameters for operations requiring just an ID.
///
/// Used for show_camp, toggle_approval, approve/unapprove, message reads
/// and reveal_credential.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for a directory search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SearchCamps {
    /// Free text matched against name, location, description, activities
    /// and contact fields
    pub search: Option<String>,
    /// One of name_asc, name_desc, price_asc, price_desc, date_asc,
    /// date_desc, random (default name_asc)
    pub sort: Option<String>,
    /// Two-letter state code
    pub state: Option<String>,
    /// Camp type term ID
    pub type_id: Option<u64>,
    /// Duration (week) term ID
    pub week_id: Option<u64>,
    /// Lower bound of the price range
    pub price_min: Option<u32>,
    /// Upper bound of the price range
    pub price_max: Option<u32>,
    /// Start of the date range (YYYY-MM-DD)
    pub date_from: Option<String>,
    /// End of the date range (YYYY-MM-DD)
    pub date_to: Option<String>,
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Return nothing until at least one filter is set
    #[serde(default)]
    pub lazy: bool,
}

impl From<&SearchCamps> for CampQuery {
    fn from(params: &SearchCamps) -> Self {
        let parse_date = |value: &Option<String>| value.as_deref().and_then(|v| v.trim().parse().ok());
        CampQuery {
            search: params.search.clone(),
            sort: params
                .sort
                .as_deref()
                .map(SortKey::parse_or_default)
                .unwrap_or_default(),
            state: params
                .state
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_ascii_uppercase),
            type_id: params.type_id,
            week_id: params.week_id,
            price_min: params.price_min,
            price_max: params.price_max,
            date_from: parse_date(&params.date_from),
            date_to: parse_date(&params.date_to),
            page: params.page.unwrap_or(1),
            lazy: params.lazy,
        }
    }
}

/// Parameters for the featured carousel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FeaturedCamps {
    /// Maximum number of camps (default 10)
    pub limit: Option<u32>,
}

/// Parameters for listing the terms of one taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTerms {
    /// Taxonomy: type, week or activity
    pub taxonomy: Taxonomy,
    /// Only list active terms
    #[serde(default)]
    pub active_only: bool,
}

/// Parameters for persisting a drag-and-drop term order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ReorderTerms {
    /// Taxonomy: type, week or activity
    pub taxonomy: Taxonomy,
    /// Term IDs in their new order; the first gets rank 0
    pub ids: Vec<u64>,
}

/// Parameters for adding or removing a favorite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ToggleFavorite {
    /// Parent account ID
    pub parent_id: u64,
    /// Camp ID
    pub camp_id: u64,
}

/// Parameters for creating or editing a FAQ entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SaveFaq {
    /// FAQ ID to edit; omit to create a new entry
    pub id: Option<u64>,
    /// Camp the FAQ belongs to
    pub camp_id: u64,
    pub question: String,
    pub answer: String,
    /// Display position; new entries go last when omitted
    pub sort_order: Option<i64>,
}

impl From<SaveFaq> for FaqInput {
    fn from(params: SaveFaq) -> Self {
        FaqInput {
            id: params.id,
            camp_id: params.camp_id,
            question: params.question,
            answer: params.answer,
            sort_order: params.sort_order,
        }
    }
}

/// Parameters addressing a record owned by a camp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CampRecord {
    /// Camp that owns the record
    pub camp_id: u64,
    /// Record ID
    pub id: u64,
}

/// Parameters for flushing the notification queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RunDigest {
    /// Send digest items even when the daily digest is not due yet
    #[serde(default)]
    pub force: bool,
}

/// Parameters for listing stored credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListCredentials {
    /// Only credentials attached to this camp
    pub camp_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_search_params_convert_to_query() {
        let params = SearchCamps {
            search: Some("lake".to_string()),
            sort: Some("price_desc".to_string()),
            state: Some(" ny ".to_string()),
            date_from: Some("2026-06-01".to_string()),
            date_to: Some("sometime".to_string()),
            ..Default::default()
        };
        let query = CampQuery::from(&params);

        assert_eq!(query.sort, SortKey::PriceDesc);
        assert_eq!(query.state.as_deref(), Some("NY"));
        assert_eq!(query.date_from, Some(date(2026, 6, 1)));
        assert_eq!(query.date_to, None);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_unknown_sort_falls_back() {
        let params = SearchCamps {
            sort: Some("stars".to_string()),
            ..Default::default()
        };
        assert_eq!(CampQuery::from(&params).sort, SortKey::NameAsc);
    }

    #[test]
    fn test_taxonomy_accepts_duration_alias() {
        let params: ListTerms =
            serde_json::from_str(r#"{"taxonomy": "duration"}"#).expect("valid params");
        assert_eq!(params.taxonomy, Taxonomy::Week);
        assert!(!params.active_only);
    }
}
