//! Core library for the camp directory.
//!
//! This crate holds the business logic behind the public camp directory:
//! the camp store and its three taxonomies, the filtered and paginated
//! listing query, the parent subsystem (registration, favorites, messages),
//! the public contact form, password reset codes, the admin's credential
//! store, and the notification queue with its daily director digest.
//!
//! # Layers
//!
//! - **Database** ([`db`]): synchronous SQLite access, one method per query
//! - **Directory** ([`directory`]): async facade that checks the calling
//!   [`Actor`] and sends mail through a [`Mailer`]
//! - **Display** ([`display`]): markdown formatting for terminal and MCP
//!   output
//!
//! # Quick Start
//!
//! ```rust
//! use campdir_core::{
//!     models::{Actor, CampQuery, NewCamp},
//!     DirectoryBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = DirectoryBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let camp = directory
//!     .create_camp(
//!         Actor::Admin,
//!         NewCamp {
//!             approved: true,
//!             state: Some("vt".to_string()),
//!             ..NewCamp::named("Camp Birchwood")
//!         },
//!     )
//!     .await?;
//! println!("Created camp: {}", camp);
//!
//! let query = CampQuery::from_pairs([("filter_state", "VT")]);
//! let listing = directory.search_camps(query).await?;
//! println!("{listing}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod directory;
pub mod display;
pub mod error;
pub mod models;
pub mod notify;
pub mod params;

// Re-export commonly used types
pub use db::Database;
pub use directory::{Directory, DirectoryBuilder};
pub use display::{
    CampSummaries, CreateResult, Credentials, DeleteResult, Faqs, LocalDateTime, Messages,
    OperationStatus, PriceRange, Season, Terms, UpdateResult,
};
pub use error::{DirectoryError, FieldError, Result};
pub use models::{
    Actor, Camp, CampPage, CampProfile, CampQuery, CampSummary, Listing, NewCamp, SortKey,
    Taxonomy, Term,
};
pub use notify::{LogMailer, Mailer, MemoryMailer, OutgoingEmail, SmtpMailer};
pub use params::{
    CampRecord, FeaturedCamps, Id, ListCredentials, ListTerms, ReorderTerms, RunDigest, SaveFaq,
    SearchCamps, ToggleFavorite,
};
