//! MCP tool handler implementations.
//!
//! Each handler runs one directory operation as [`Actor::Admin`] and returns
//! the Markdown rendering of its result as tool text.

use std::sync::Arc;

use campdir_core::{
    display::{CampSummaries, Credentials, Faqs, OperationStatus, Terms, UpdateResult},
    models::Actor,
    params as core, CampQuery, Directory,
};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::to_mcp_error;

const ACTOR: Actor = Actor::Admin;

/// Transparent MCP wrapper around a core parameter type.
///
/// Deserialization and the JSON schema both pass straight through to `T`,
/// so the core types stay free of rmcp.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T> McpParams<T>
where
    T: JsonSchema,
{
    pub fn into_inner(self) -> T {
        self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CampRecord = McpParams<core::CampRecord>;
pub type FeaturedCamps = McpParams<core::FeaturedCamps>;
pub type ListCredentials = McpParams<core::ListCredentials>;
pub type ListTerms = McpParams<core::ListTerms>;
pub type ReorderTerms = McpParams<core::ReorderTerms>;
pub type RunDigest = McpParams<core::RunDigest>;
pub type SaveFaq = McpParams<core::SaveFaq>;
pub type SearchCamps = McpParams<core::SearchCamps>;
pub type ToggleFavorite = McpParams<core::ToggleFavorite>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(output: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        output.to_string(),
    )]))
}

pub struct McpHandlers {
    directory: Arc<Directory>,
}

impl McpHandlers {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }

    pub async fn search_camps(&self, Parameters(params): Parameters<SearchCamps>) -> McpResult {
        debug!("search_camps: {params:?}");

        let listing = self
            .directory
            .search_camps(CampQuery::from(params.as_ref()))
            .await
            .map_err(|e| to_mcp_error("Failed to search camps", &e))?;
        text(listing)
    }

    pub async fn featured_camps(
        &self,
        Parameters(params): Parameters<FeaturedCamps>,
    ) -> McpResult {
        debug!("featured_camps: {params:?}");

        let limit = params.as_ref().limit.unwrap_or(10);
        let camps = self
            .directory
            .featured_camps(limit)
            .await
            .map_err(|e| to_mcp_error("Failed to load featured camps", &e))?;
        text(CampSummaries(camps))
    }

    pub async fn show_camp(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_camp: {params:?}");

        let id = params.as_ref().id;
        let profile = self
            .directory
            .camp_profile(ACTOR, id)
            .await
            .map_err(|e| to_mcp_error("Failed to load camp", &e))?;
        match profile {
            Some(profile) => text(profile),
            None => text(OperationStatus::failure(format!(
                "Camp with ID {id} not found"
            ))),
        }
    }

    pub async fn toggle_approval(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("toggle_approval: {params:?}");

        let id = params.as_ref().id;
        let approved = self
            .directory
            .toggle_approval(ACTOR, id)
            .await
            .map_err(|e| to_mcp_error("Failed to toggle approval", &e))?;
        let message = if approved {
            format!("Camp {id} is now approved and listed")
        } else {
            format!("Camp {id} is no longer approved")
        };
        text(OperationStatus::success(message))
    }

    pub async fn list_terms(&self, Parameters(params): Parameters<ListTerms>) -> McpResult {
        debug!("list_terms: {params:?}");

        let core::ListTerms {
            taxonomy,
            active_only,
        } = params.into_inner();
        let terms = self
            .directory
            .list_terms(taxonomy, active_only)
            .await
            .map_err(|e| to_mcp_error("Failed to list terms", &e))?;
        text(Terms::new(taxonomy, terms))
    }

    pub async fn reorder_terms(&self, Parameters(params): Parameters<ReorderTerms>) -> McpResult {
        debug!("reorder_terms: {params:?}");

        let core::ReorderTerms { taxonomy, ids } = params.into_inner();
        let terms = self
            .directory
            .reorder_terms(ACTOR, taxonomy, ids)
            .await
            .map_err(|e| to_mcp_error("Failed to reorder terms", &e))?;
        text(Terms::new(taxonomy, terms))
    }

    pub async fn toggle_favorite(
        &self,
        Parameters(params): Parameters<ToggleFavorite>,
    ) -> McpResult {
        debug!("toggle_favorite: {params:?}");

        let core::ToggleFavorite { parent_id, camp_id } = params.into_inner();
        let saved = self
            .directory
            .toggle_favorite(ACTOR, parent_id, camp_id)
            .await
            .map_err(|e| to_mcp_error("Failed to toggle favorite", &e))?;
        let message = if saved {
            format!("Camp {camp_id} saved to parent {parent_id}'s favorites")
        } else {
            format!("Camp {camp_id} removed from parent {parent_id}'s favorites")
        };
        text(OperationStatus::success(message))
    }

    pub async fn list_faqs(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("list_faqs: {params:?}");

        let faqs = self
            .directory
            .list_faqs(params.as_ref().id)
            .await
            .map_err(|e| to_mcp_error("Failed to list FAQ entries", &e))?;
        text(Faqs(faqs))
    }

    pub async fn save_faq(&self, Parameters(params): Parameters<SaveFaq>) -> McpResult {
        debug!("save_faq: {params:?}");

        let faq = self
            .directory
            .save_faq(ACTOR, params.into_inner().into())
            .await
            .map_err(|e| to_mcp_error("Failed to save FAQ entry", &e))?;
        text(UpdateResult::new(faq))
    }

    pub async fn delete_faq(&self, Parameters(params): Parameters<CampRecord>) -> McpResult {
        debug!("delete_faq: {params:?}");

        let core::CampRecord { camp_id, id } = params.into_inner();
        self.directory
            .delete_faq(ACTOR, camp_id, id)
            .await
            .map_err(|e| to_mcp_error("Failed to delete FAQ entry", &e))?;
        text(OperationStatus::success(format!(
            "Deleted FAQ {id} from camp {camp_id}"
        )))
    }

    pub async fn list_credentials(
        &self,
        Parameters(params): Parameters<ListCredentials>,
    ) -> McpResult {
        debug!("list_credentials: {params:?}");

        let credentials = self
            .directory
            .list_credentials(ACTOR, params.as_ref().camp_id)
            .await
            .map_err(|e| to_mcp_error("Failed to list credentials", &e))?;
        text(Credentials(credentials))
    }

    pub async fn reveal_credential(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("reveal_credential: {params:?}");

        let id = params.as_ref().id;
        let secret = self
            .directory
            .reveal_credential(ACTOR, id)
            .await
            .map_err(|e| to_mcp_error("Failed to reveal credential", &e))?;
        text(format!("Credential {id} secret: `{secret}`\n"))
    }

    pub async fn run_digest(&self, Parameters(params): Parameters<RunDigest>) -> McpResult {
        debug!("run_digest: {params:?}");

        let report = self
            .directory
            .run_digest(ACTOR, params.as_ref().force)
            .await
            .map_err(|e| to_mcp_error("Failed to run digest", &e))?;
        text(report)
    }
}

#[cfg(test)]
mod tests {
    use campdir_core::{
        models::{CredentialInput, Taxonomy},
        DirectoryBuilder, NewCamp,
    };
    use tempfile::TempDir;

    use super::*;

    async fn handlers() -> (TempDir, Arc<Directory>, McpHandlers) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let directory = DirectoryBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .expect("Failed to build directory");
        let directory = Arc::new(directory);
        let handlers = McpHandlers::new(directory.clone());
        (temp_dir, directory, handlers)
    }

    fn params<T: JsonSchema + serde::de::DeserializeOwned>(json: &str) -> Parameters<McpParams<T>> {
        Parameters(serde_json::from_str(json).expect("Failed to parse params"))
    }

    fn body(result: CallToolResult) -> String {
        serde_json::to_string(&result).expect("Failed to serialize result")
    }

    #[tokio::test]
    async fn test_toggle_approval_lists_camp() {
        let (_dir, directory, handlers) = handlers().await;
        let camp = directory
            .create_camp(ACTOR, NewCamp::named("Camp Kettle Pond"))
            .await
            .expect("Failed to create camp");

        let json = format!(r#"{{"id": {}}}"#, camp.id);
        let result = handlers
            .toggle_approval(params(&json))
            .await
            .expect("toggle failed");
        assert!(body(result).contains("now approved"));

        let listing = handlers
            .search_camps(params(r#"{"search": "kettle"}"#))
            .await
            .expect("search failed");
        assert!(body(listing).contains("Camp Kettle Pond"));
    }

    #[tokio::test]
    async fn test_reorder_terms_accepts_duration_alias() {
        let (_dir, directory, handlers) = handlers().await;
        let one = directory
            .create_term(ACTOR, Taxonomy::Week, "1 Week".to_string(), None, true)
            .await
            .expect("Failed to create term");
        let two = directory
            .create_term(ACTOR, Taxonomy::Week, "2 Weeks".to_string(), None, true)
            .await
            .expect("Failed to create term");

        let json = format!(r#"{{"taxonomy": "duration", "ids": [{}, {}]}}"#, two.id, one.id);
        handlers
            .reorder_terms(params(&json))
            .await
            .expect("reorder failed");

        let terms = directory
            .list_terms(Taxonomy::Week, false)
            .await
            .expect("Failed to list terms");
        assert_eq!(terms[0].id, two.id);
    }

    #[tokio::test]
    async fn test_unknown_camp_is_invalid_params() {
        let (_dir, _directory, handlers) = handlers().await;

        let error = handlers
            .delete_faq(params(r#"{"camp_id": 77, "id": 1}"#))
            .await
            .expect_err("delete should fail");
        assert_eq!(error.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_credentials_listed_masked_and_revealed_on_request() {
        let (_dir, directory, handlers) = handlers().await;
        let credential = directory
            .save_credential(
                ACTOR,
                CredentialInput {
                    label: "Booking portal".to_string(),
                    username: "birchwood".to_string(),
                    secret: "s3cret-pass".to_string(),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to save credential");

        let listing = handlers
            .list_credentials(params("{}"))
            .await
            .expect("list failed");
        let listing = body(listing);
        assert!(listing.contains("Booking portal"));
        assert!(!listing.contains("s3cret-pass"));

        let json = format!(r#"{{"id": {}}}"#, credential.id);
        let revealed = handlers
            .reveal_credential(params(&json))
            .await
            .expect("reveal failed");
        assert!(body(revealed).contains("s3cret-pass"));

        let error = handlers
            .reveal_credential(params(r#"{"id": 999}"#))
            .await
            .expect_err("unknown credential");
        assert_eq!(error.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }
}
