//! Data models for the camp directory.
//!
//! This module contains the domain types shared by the database layer, the
//! [`crate::Directory`] facade and the interfaces built on top of them.
//! Display implementations live in [`crate::display::models`] so that data
//! structures stay free of presentation logic.
//!
//! # Overview
//!
//! - [`Camp`] and [`NewCamp`]: the wide camp record and its write payload
//! - [`Taxonomy`] and [`Term`]: the three classification axes and their terms
//! - [`CampQuery`], [`SortKey`]: what a visitor asks of the directory
//! - [`Listing`], [`CampPage`], [`CampSummary`]: what the directory answers
//! - [`Actor`]: who is calling, used for capability checks
//! - Parent subsystem: [`Parent`], [`Message`], [`ContactSubmission`],
//!   [`PasswordReset`]
//! - Stored logins: [`Credential`] and [`CredentialInput`]
//! - Camp detail records: [`Accommodation`], [`Faq`], [`Session`]
//! - Notification queue: [`QueuedNotification`] and its status enums
//!
//! # Examples
//!
//! ```rust
//! use campdir_core::models::{CampQuery, SortKey};
//!
//! let query = CampQuery::from_pairs([("camp_search", "lake"), ("camp_sort", "price_asc")]);
//! assert_eq!(query.search_text(), Some("lake"));
//! assert_eq!(query.sort, SortKey::PriceAsc);
//! assert_eq!(query.page, 1);
//! ```

pub mod actor;
pub mod camp;
pub mod credential;
pub mod details;
pub mod listing;
pub mod notification;
pub mod parent;
pub mod query;
pub mod settings;
pub mod taxonomy;

pub use actor::Actor;
pub use camp::{Camp, CampProfile, CampTerms, NewCamp};
pub use credential::{Credential, CredentialInput};
pub use details::{Accommodation, AccommodationInput, Faq, FaqInput, Session, SessionInput};
pub use listing::{CampPage, CampSummary, Listing, ACTIVITY_PREVIEW, PAGE_SIZE};
pub use notification::{
    DigestReport, NotificationKind, QueueStats, QueueStatus, QueuedNotification,
};
pub use parent::{
    ContactForm, ContactSubmission, EmailStatus, Message, NewMessage, Parent,
    ParentRegistration, PasswordReset,
};
pub use query::{CampQuery, SortKey};
pub use settings::{SettingKey, Settings};
pub use taxonomy::{slugify, Taxonomy, Term};
