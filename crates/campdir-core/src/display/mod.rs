//! Display formatting and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections and operation results
//! so every interface prints the same Markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Collections &   │    │   Formatted     │
//! │ (Camp, Term...) │───▶│ Result Wrappers │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: [`CampSummaries`], [`Terms`], [`Messages`], [`Faqs`],
//!   [`Credentials`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`],
//!   [`OperationStatus`]
//! - [`datetime`]: timestamps, seasons and price ranges
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage
//!
//! ```rust
//! use campdir_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Camp 12 approved");
//! assert_eq!(status.to_string(), "Success: Camp 12 approved\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{CampSummaries, Credentials, Faqs, Messages, Terms};
pub use datetime::{LocalDateTime, PriceRange, Season};
pub use results::{CreateResult, DeleteResult, OperationStatus, UpdateResult};
