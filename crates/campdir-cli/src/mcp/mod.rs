//! MCP server for the camp directory.
//!
//! Exposes the public search, the featured carousel and the administrative
//! operations an assistant needs to curate listings as MCP tools over stdio.

use std::sync::Arc;

use anyhow::Result;
use campdir_core::Directory;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    CampRecord, FeaturedCamps, Id, ListCredentials, ListTerms, McpResult, ReorderTerms,
    RunDigest, SaveFaq, SearchCamps, ToggleFavorite,
};

const INSTRUCTIONS: &str = r#"campdir is a directory of summer camps. Parents browse approved camps; administrators curate the listings.

## Core Concepts
- **Camps**: listings with location, season dates, a price range and linked terms. Only approved camps appear in searches.
- **Taxonomies**: three independent term lists, `type`, `week` (session length, alias `duration`) and `activity`.
- **Notifications**: outgoing email is queued. `run_digest` sends immediate notices and, once a day, one digest per recipient.

## Searching
`search_camps` combines every filter with AND:
- `search` matches name, city, state, description, activities and contact fields
- `state`, `type_id`, `week_id` narrow by location and terms
- `price_min`/`price_max` and `date_from`/`date_to` (YYYY-MM-DD) keep camps whose range overlaps the requested one
- `sort` is one of name_asc, name_desc, price_asc, price_desc, date_asc, date_desc, random
- results come 20 per page; `page` starts at 1

## Tool Categories
- **Browsing**: search_camps, featured_camps, show_camp, list_terms, list_faqs
- **Curation**: toggle_approval, reorder_terms, save_faq, delete_faq
- **Parents**: toggle_favorite
- **Mail**: run_digest
- **Credentials**: list_credentials, reveal_credential

All tools act with administrator rights."#;

#[derive(Clone)]
pub struct CampdirMcpServer {
    directory: Arc<Directory>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CampdirMcpServer {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory: Arc::new(directory),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.directory.clone())
    }

    #[tool(
        name = "search_camps",
        description = "Search the approved camps. All filters are optional and combine with AND: free text, state, camp type ID, week ID, price range and date range. Price and date filters keep camps whose range overlaps the requested one. Returns one page of 20 camps with the total count."
    )]
    async fn search_camps(&self, params: Parameters<SearchCamps>) -> McpResult {
        self.handlers().search_camps(params).await
    }

    #[tool(
        name = "featured_camps",
        description = "List the featured carousel: approved, featured camps with the best rated first. Optional limit, default 10."
    )]
    async fn featured_camps(&self, params: Parameters<FeaturedCamps>) -> McpResult {
        self.handlers().featured_camps(params).await
    }

    #[tool(
        name = "show_camp",
        description = "Show a camp's full profile by ID: contact details, season, prices, linked terms, accommodations, FAQ and sessions. Works for unapproved camps too."
    )]
    async fn show_camp(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_camp(params).await
    }

    #[tool(
        name = "toggle_approval",
        description = "Flip a camp's approval. Approving a camp lists it in searches and queues a notice to the camp director; unapproving hides it again."
    )]
    async fn toggle_approval(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().toggle_approval(params).await
    }

    #[tool(
        name = "list_terms",
        description = "List the terms of one taxonomy (type, week or activity) in display order. Set active_only to hide inactive terms."
    )]
    async fn list_terms(&self, params: Parameters<ListTerms>) -> McpResult {
        self.handlers().list_terms(params).await
    }

    #[tool(
        name = "reorder_terms",
        description = "Save a new display order for one taxonomy. Pass every term ID to rank, first to last. Fails without changing anything if an ID does not belong to the taxonomy."
    )]
    async fn reorder_terms(&self, params: Parameters<ReorderTerms>) -> McpResult {
        self.handlers().reorder_terms(params).await
    }

    #[tool(
        name = "toggle_favorite",
        description = "Add a camp to a parent's favorites, or remove it if already saved. Only approved camps can be saved."
    )]
    async fn toggle_favorite(&self, params: Parameters<ToggleFavorite>) -> McpResult {
        self.handlers().toggle_favorite(params).await
    }

    #[tool(
        name = "list_faqs",
        description = "List the FAQ entries of a camp in display order. Pass the camp ID as id."
    )]
    async fn list_faqs(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().list_faqs(params).await
    }

    #[tool(
        name = "save_faq",
        description = "Create a FAQ entry for a camp, or edit one by passing its id. Question and answer are required; new entries go last unless sort_order is given."
    )]
    async fn save_faq(&self, params: Parameters<SaveFaq>) -> McpResult {
        self.handlers().save_faq(params).await
    }

    #[tool(
        name = "delete_faq",
        description = "Delete a FAQ entry. Both the camp ID and the entry ID are required and must match."
    )]
    async fn delete_faq(&self, params: Parameters<CampRecord>) -> McpResult {
        self.handlers().delete_faq(params).await
    }

    #[tool(
        name = "list_credentials",
        description = "List the logins kept on file, optionally only those attached to camp_id. Secrets are masked; use reveal_credential to read one."
    )]
    async fn list_credentials(&self, params: Parameters<ListCredentials>) -> McpResult {
        self.handlers().list_credentials(params).await
    }

    #[tool(
        name = "reveal_credential",
        description = "Return the secret of one stored credential by ID. Every reveal is logged."
    )]
    async fn reveal_credential(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().reveal_credential(params).await
    }

    #[tool(
        name = "run_digest",
        description = "Flush the notification queue. Immediate notices always go out; digest items are batched into one email per recipient when the daily digest hour has passed, or right away with force=true."
    )]
    async fn run_digest(&self, params: Parameters<RunDigest>) -> McpResult {
        self.handlers().run_digest(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for CampdirMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "campdir".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Serves MCP on stdin/stdout until the client disconnects or a signal
/// arrives.
pub async fn run_stdio_server(server: CampdirMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting campdir MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
