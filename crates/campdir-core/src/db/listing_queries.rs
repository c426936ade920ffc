//! Public directory listing: filtered, sorted, paginated camp summaries.
//!
//! [`ListingSql`] turns a [`CampQuery`] into parameterized SQL. The composed
//! statement always restricts to approved camps, joins the type and week
//! pivots only when those filters are set (so both must match), and groups
//! on the camp id before the page window is applied so a camp with several
//! matching pivot rows is listed once.

use log::debug;
use rusqlite::{params, Connection, ToSql};

use super::utils::{contains_pattern, date_to_sql, get_id, get_optional_date};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{
        CampPage, CampQuery, CampSummary, Listing, SortKey, Taxonomy, ACTIVITY_PREVIEW,
        PAGE_SIZE,
    },
};

/// Columns read by [`build_summary_from_row`], qualified by the `c` alias.
pub(crate) const SUMMARY_COLUMNS: &str = "c.id, c.name, c.city, c.state, c.logo_url, c.opening_day, c.closing_day, c.min_price, c.max_price, c.internal_link";

/// Camp fields matched by free-text search.
const SEARCH_FIELDS: [&str; 11] = [
    "c.name",
    "c.city",
    "c.state",
    "c.zip",
    "c.address",
    "c.description",
    "c.activities_text",
    "c.director_name",
    "c.email",
    "c.phone",
    "c.website",
];

/// SQL fragments and bound values composed from a [`CampQuery`].
pub struct ListingSql {
    joins: Vec<String>,
    conditions: Vec<String>,
    params: Vec<Box<dyn ToSql>>,
    order_by: &'static str,
}

impl ListingSql {
    /// Composes the filter, join and ordering clauses for a query.
    pub fn compose(query: &CampQuery) -> Self {
        let mut joins = Vec::new();
        let mut conditions = vec!["c.approved = 1".to_string()];
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        // Join parameters precede WHERE parameters in the statement text.
        if let Some(type_id) = query.type_id {
            joins.push(format!(
                "JOIN {} tl ON tl.camp_id = c.id AND tl.term_id = ?",
                Taxonomy::Type.link_table()
            ));
            params.push(Box::new(type_id as i64));
        }
        if let Some(week_id) = query.week_id {
            joins.push(format!(
                "JOIN {} wl ON wl.camp_id = c.id AND wl.term_id = ?",
                Taxonomy::Week.link_table()
            ));
            params.push(Box::new(week_id as i64));
        }

        if let Some(text) = query.search_text() {
            let pattern = contains_pattern(text);
            let clauses: Vec<String> = SEARCH_FIELDS
                .iter()
                .map(|field| format!("{field} LIKE ? ESCAPE '\\'"))
                .collect();
            conditions.push(format!("({})", clauses.join(" OR ")));
            for _ in SEARCH_FIELDS {
                params.push(Box::new(pattern.clone()));
            }
        }

        if let Some(state) = query.state.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            conditions.push("c.state = ?".to_string());
            params.push(Box::new(state.to_ascii_uppercase()));
        }

        // Range overlap: camp [min, max] intersects [filter_min, filter_max].
        // A camp missing either bound never matches a price filter.
        if query.price_min.is_some() || query.price_max.is_some() {
            conditions.push("c.min_price IS NOT NULL AND c.max_price IS NOT NULL".to_string());
            if let Some(max) = query.price_max {
                conditions.push("c.min_price <= ?".to_string());
                params.push(Box::new(max));
            }
            if let Some(min) = query.price_min {
                conditions.push("c.max_price >= ?".to_string());
                params.push(Box::new(min));
            }
        }

        // Same overlap rule for the operating season.
        if query.date_from.is_some() || query.date_to.is_some() {
            conditions
                .push("c.opening_day IS NOT NULL AND c.closing_day IS NOT NULL".to_string());
            if let Some(to) = date_to_sql(query.date_to) {
                conditions.push("c.opening_day <= ?".to_string());
                params.push(Box::new(to));
            }
            if let Some(from) = date_to_sql(query.date_from) {
                conditions.push("c.closing_day >= ?".to_string());
                params.push(Box::new(from));
            }
        }

        Self {
            joins,
            conditions,
            params,
            order_by: order_by_clause(query.sort),
        }
    }

    fn from_where(&self) -> String {
        let mut sql = String::from("FROM camps c");
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }
        sql.push_str(" WHERE ");
        sql.push_str(&self.conditions.join(" AND "));
        sql
    }

    /// Statement counting distinct matching camps.
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(DISTINCT c.id) {}", self.from_where())
    }

    /// Statement selecting one page; takes the filter parameters followed by
    /// `LIMIT` and `OFFSET`.
    pub fn page_sql(&self) -> String {
        format!(
            "SELECT {SUMMARY_COLUMNS} {} GROUP BY c.id ORDER BY {} LIMIT ? OFFSET ?",
            self.from_where(),
            self.order_by
        )
    }

    /// Bound filter values, in statement order.
    pub fn params(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|b| &**b).collect()
    }
}

fn order_by_clause(sort: SortKey) -> &'static str {
    match sort {
        SortKey::NameAsc => "c.name COLLATE NOCASE ASC, c.id ASC",
        SortKey::NameDesc => "c.name COLLATE NOCASE DESC, c.id ASC",
        SortKey::PriceAsc => {
            "c.min_price IS NULL, c.min_price ASC, c.name COLLATE NOCASE ASC, c.id ASC"
        }
        SortKey::PriceDesc => {
            "c.max_price IS NULL, c.max_price DESC, c.name COLLATE NOCASE ASC, c.id ASC"
        }
        SortKey::DateAsc => {
            "c.opening_day IS NULL, c.opening_day ASC, c.name COLLATE NOCASE ASC, c.id ASC"
        }
        SortKey::DateDesc => {
            "c.opening_day IS NULL, c.opening_day DESC, c.name COLLATE NOCASE ASC, c.id ASC"
        }
        // Reshuffled on every request; consecutive pages are independent draws.
        SortKey::Random => "RANDOM()",
    }
}

fn build_summary_from_row(row: &rusqlite::Row) -> rusqlite::Result<CampSummary> {
    Ok(CampSummary {
        id: get_id(row, 0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        logo_url: row.get(4)?,
        opening_day: get_optional_date(row, 5)?,
        closing_day: get_optional_date(row, 6)?,
        min_price: row.get(7)?,
        max_price: row.get(8)?,
        internal_link: row.get(9)?,
        type_names: Vec::new(),
        week_names: Vec::new(),
        activity_names: Vec::new(),
        activity_count: 0,
    })
}

/// Names of active terms of one axis linked to a camp, in curated order.
fn term_names(
    conn: &Connection,
    axis: Taxonomy,
    camp_id: u64,
    limit: Option<usize>,
) -> Result<Vec<String>> {
    let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    let sql = format!(
        "SELECT t.name FROM {} t \
         WHERE t.active = 1 AND t.id IN (SELECT term_id FROM {} WHERE camp_id = ?1) \
         ORDER BY t.sort_order, t.name COLLATE NOCASE, t.id LIMIT ?2",
        axis.table(),
        axis.link_table()
    );
    let mut stmt = conn
        .prepare_cached(&sql)
        .db_context("Failed to prepare term name query")?;
    let rows = stmt
        .query_map(params![camp_id as i64, limit], |row| row.get(0))
        .db_context("Failed to query term names")?
        .collect::<std::result::Result<Vec<String>, _>>()
        .db_context("Failed to fetch term names");
    rows
}

fn active_term_count(conn: &Connection, axis: Taxonomy, camp_id: u64) -> Result<u32> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} t \
         WHERE t.active = 1 AND t.id IN (SELECT term_id FROM {} WHERE camp_id = ?1)",
        axis.table(),
        axis.link_table()
    );
    conn.query_row(&sql, params![camp_id as i64], |row| row.get(0))
        .db_context("Failed to count camp terms")
}

/// Runs a statement selecting [`SUMMARY_COLUMNS`] and attaches term names
/// and the activity preview to every row.
pub(crate) fn query_summaries(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<Vec<CampSummary>> {
    let mut stmt = conn.prepare(sql).db_context("Failed to prepare listing query")?;
    let mut summaries = stmt
        .query_map(params, build_summary_from_row)
        .db_context("Failed to query camps")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch camps")?;

    for summary in &mut summaries {
        summary.type_names = term_names(conn, Taxonomy::Type, summary.id, None)?;
        summary.week_names = term_names(conn, Taxonomy::Week, summary.id, None)?;
        summary.activity_names =
            term_names(conn, Taxonomy::Activity, summary.id, Some(ACTIVITY_PREVIEW))?;
        summary.activity_count = active_term_count(conn, Taxonomy::Activity, summary.id)?;
    }

    Ok(summaries)
}

impl super::Database {
    /// Runs a directory query.
    ///
    /// Returns [`Listing::NotQueried`] for a lazy query without criteria.
    /// Otherwise the count, the page and its enrichment are read from one
    /// snapshot; any failure discards everything read so far.
    pub fn search_camps(&self, query: &CampQuery) -> Result<Listing> {
        if query.lazy && !query.has_criteria() {
            return Ok(Listing::NotQueried);
        }

        let composed = ListingSql::compose(query);
        let filter_params = composed.params();

        let tx = self
            .connection
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        let total: i64 = tx
            .query_row(&composed.count_sql(), &filter_params[..], |row| row.get(0))
            .db_context("Failed to count camps")?;
        let total = u64::try_from(total).unwrap_or_default();

        let total_pages = CampPage::page_count(total, PAGE_SIZE);
        let page = CampPage::clamp_page(query.page, total_pages);
        let limit = i64::from(PAGE_SIZE);
        let offset = i64::from(page - 1) * limit;

        let mut page_params = filter_params;
        page_params.push(&limit);
        page_params.push(&offset);

        let items = query_summaries(&tx, &composed.page_sql(), &page_params)?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!(
            "Directory query matched {total} camps; returning page {page}/{total_pages} ({} items)",
            items.len()
        );

        Ok(Listing::Page(CampPage {
            items,
            total,
            page,
            total_pages,
            page_size: PAGE_SIZE,
        }))
    }

    /// Approved, featured camps for the carousel, best rated first.
    pub fn featured_camps(&self, limit: u32) -> Result<Vec<CampSummary>> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM camps c \
             WHERE c.approved = 1 AND c.featured = 1 \
             ORDER BY c.rating IS NULL, c.rating DESC, c.name COLLATE NOCASE, c.id LIMIT ?1"
        );
        query_summaries(&self.connection, &sql, &[&i64::from(limit)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_unfiltered_query_only_gates_on_approval() {
        let sql = ListingSql::compose(&CampQuery::new());
        assert_eq!(
            sql.count_sql(),
            "SELECT COUNT(DISTINCT c.id) FROM camps c WHERE c.approved = 1"
        );
        assert!(sql.params().is_empty());
    }

    #[test]
    fn test_blank_search_is_omitted() {
        let query = CampQuery {
            search: Some("   ".to_string()),
            ..CampQuery::new()
        };
        let sql = ListingSql::compose(&query);
        assert!(!sql.count_sql().contains("LIKE"));
        assert!(sql.params().is_empty());
    }

    #[test]
    fn test_search_binds_every_field() {
        let query = CampQuery {
            search: Some("lake".to_string()),
            ..CampQuery::new()
        };
        let sql = ListingSql::compose(&query);
        assert_eq!(sql.count_sql().matches("LIKE ?").count(), SEARCH_FIELDS.len());
        assert_eq!(sql.params().len(), SEARCH_FIELDS.len());
    }

    #[test]
    fn test_type_and_week_filters_both_join() {
        let query = CampQuery {
            type_id: Some(1),
            week_id: Some(2),
            ..CampQuery::new()
        };
        let sql = ListingSql::compose(&query).page_sql();
        assert!(sql.contains("JOIN camp_type_links tl"));
        assert!(sql.contains("JOIN camp_week_links wl"));
        assert!(sql.contains("GROUP BY c.id"));
    }

    #[test]
    fn test_price_filter_excludes_missing_bounds() {
        let query = CampQuery {
            price_min: Some(1000),
            ..CampQuery::new()
        };
        let sql = ListingSql::compose(&query).count_sql();
        assert!(sql.contains("c.min_price IS NOT NULL AND c.max_price IS NOT NULL"));
        assert!(sql.contains("c.max_price >= ?"));
        assert!(!sql.contains("c.min_price <= ?"));
    }

    #[test]
    fn test_date_filter_uses_overlap() {
        let query = CampQuery {
            date_from: Some(date(2026, 6, 1)),
            date_to: Some(date(2026, 6, 30)),
            ..CampQuery::new()
        };
        let composed = ListingSql::compose(&query);
        let sql = composed.count_sql();
        assert!(sql.contains("c.opening_day <= ?"));
        assert!(sql.contains("c.closing_day >= ?"));
        assert_eq!(composed.params().len(), 2);
    }

    #[test]
    fn test_random_sort() {
        let query = CampQuery {
            sort: SortKey::Random,
            ..CampQuery::new()
        };
        assert!(ListingSql::compose(&query).page_sql().contains("ORDER BY RANDOM()"));
    }
}
