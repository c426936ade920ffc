//! Command-line argument definitions using clap
//!
//! Each command has a small clap-facing argument struct that converts into
//! the core parameter or model type it stands for:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params / Models → Directory
//! ```
//!
//! Clap attributes stay in this crate; the core types remain free of CLI
//! concerns and are shared with the MCP server.

use std::path::PathBuf;

use campdir_core::{
    models::{
        CampTerms, ContactForm, CredentialInput, NewCamp, NewMessage, ParentRegistration, Taxonomy,
    },
    params::SearchCamps,
};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;

/// Camp directory: listings, taxonomy, parents and notifications
///
/// Manages a directory of summer camps backed by a local SQLite database.
/// Run without a subcommand to print the first page of the public
/// directory, or use `serve` to expose the directory over MCP on stdio.
#[derive(Parser)]
#[command(version, about, name = "campdir")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/campdir/campdir.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Write outgoing email to the log instead of sending it. Without this
    /// flag mail goes through the SMTP relay in CAMPDIR_SMTP_HOST
    #[arg(long, global = true)]
    pub mail_dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage camps and browse the directory
    #[command(alias = "c")]
    Camp {
        #[command(subcommand)]
        command: CampCommands,
    },
    /// Manage camp types, weeks and activities
    #[command(alias = "t")]
    Term {
        #[command(subcommand)]
        command: TermCommands,
    },
    /// Parent accounts and favorites
    #[command(alias = "p")]
    Parent {
        #[command(subcommand)]
        command: ParentCommands,
    },
    /// Messages from parents to camps
    #[command(alias = "m")]
    Message {
        #[command(subcommand)]
        command: MessageCommands,
    },
    /// Submit the public contact form
    Contact(ContactArgs),
    /// Notification queue and the daily digest
    #[command(alias = "n")]
    Notify {
        #[command(subcommand)]
        command: NotifyCommands,
    },
    /// Site settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Logins kept on file for camps and partner sites
    Credential {
        #[command(subcommand)]
        command: CredentialCommands,
    },
    /// Start the MCP server
    Serve,
}

// ============================================================================
// Camps
// ============================================================================

/// Taxonomy axis as typed on the command line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum TaxonomyArg {
    /// Camp types (day camp, sleepaway, ...)
    Type,
    /// Session lengths
    #[value(alias = "duration")]
    Week,
    /// Activities offered
    Activity,
}

impl From<TaxonomyArg> for Taxonomy {
    fn from(val: TaxonomyArg) -> Self {
        match val {
            TaxonomyArg::Type => Taxonomy::Type,
            TaxonomyArg::Week => Taxonomy::Week,
            TaxonomyArg::Activity => Taxonomy::Activity,
        }
    }
}

/// Profile fields shared by `camp add` and `camp edit`. Anything left out
/// keeps its current value.
#[derive(ClapArgs, Default)]
pub struct CampProfileArgs {
    #[arg(long)]
    pub city: Option<String>,
    /// Two-letter state code
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub zip: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Free-form activity description (searchable)
    #[arg(long = "activities-text")]
    pub activities_text: Option<String>,
    #[arg(long = "director")]
    pub director_name: Option<String>,
    /// Contact email; receives message digests and the approval notice
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    /// First day of the season (YYYY-MM-DD)
    #[arg(long = "opens")]
    pub opening_day: Option<Date>,
    /// Last day of the season (YYYY-MM-DD)
    #[arg(long = "closes")]
    pub closing_day: Option<Date>,
    #[arg(long)]
    pub min_price: Option<u32>,
    #[arg(long)]
    pub max_price: Option<u32>,
    #[arg(long)]
    pub logo_url: Option<String>,
    /// Canonical detail-page URL
    #[arg(long = "link")]
    pub internal_link: Option<String>,
    /// Average rating, 0 to 5
    #[arg(long)]
    pub rating: Option<f64>,
    /// Type term IDs, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub types: Option<Vec<u64>>,
    /// Week term IDs, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub weeks: Option<Vec<u64>>,
    /// Activity term IDs, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub activities: Option<Vec<u64>>,
}

impl CampProfileArgs {
    /// Overwrites every field of `camp` that was given on the command line.
    pub fn apply_to(self, camp: &mut NewCamp) {
        fn set<T>(target: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *target = value;
            }
        }

        set(&mut camp.city, self.city);
        set(&mut camp.state, self.state);
        set(&mut camp.zip, self.zip);
        set(&mut camp.address, self.address);
        set(&mut camp.description, self.description);
        set(&mut camp.activities_text, self.activities_text);
        set(&mut camp.director_name, self.director_name);
        set(&mut camp.email, self.email);
        set(&mut camp.phone, self.phone);
        set(&mut camp.website, self.website);
        set(&mut camp.opening_day, self.opening_day);
        set(&mut camp.closing_day, self.closing_day);
        set(&mut camp.min_price, self.min_price);
        set(&mut camp.max_price, self.max_price);
        set(&mut camp.logo_url, self.logo_url);
        set(&mut camp.internal_link, self.internal_link);
        set(&mut camp.rating, self.rating);

        let CampTerms { types, weeks, activities } = &mut camp.terms;
        if let Some(ids) = self.types {
            *types = ids;
        }
        if let Some(ids) = self.weeks {
            *weeks = ids;
        }
        if let Some(ids) = self.activities {
            *activities = ids;
        }
    }
}

/// Create a camp
#[derive(ClapArgs)]
pub struct AddCampArgs {
    /// Camp name
    pub name: String,
    /// List the camp publicly right away
    #[arg(long)]
    pub approved: bool,
    /// Show the camp in the featured carousel
    #[arg(long)]
    pub featured: bool,
    #[command(flatten)]
    pub profile: CampProfileArgs,
}

impl From<AddCampArgs> for NewCamp {
    fn from(val: AddCampArgs) -> Self {
        let mut camp = NewCamp {
            approved: val.approved,
            featured: val.featured,
            ..NewCamp::named(val.name)
        };
        val.profile.apply_to(&mut camp);
        camp
    }
}

/// Edit a camp's profile
#[derive(ClapArgs)]
pub struct EditCampArgs {
    /// ID of the camp to edit
    pub id: u64,
    /// New camp name
    #[arg(long)]
    pub name: Option<String>,
    #[command(flatten)]
    pub profile: CampProfileArgs,
}

/// Search the public directory
#[derive(ClapArgs, Default)]
pub struct SearchCampsArgs {
    /// Free text matched against names, locations and descriptions
    pub search: Option<String>,
    /// Sort order
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
    /// Two-letter state code
    #[arg(long)]
    pub state: Option<String>,
    /// Camp type term ID
    #[arg(long = "type")]
    pub type_id: Option<u64>,
    /// Week (duration) term ID
    #[arg(long = "week", alias = "duration")]
    pub week_id: Option<u64>,
    #[arg(long)]
    pub price_min: Option<u32>,
    #[arg(long)]
    pub price_max: Option<u32>,
    /// Start of the date range (YYYY-MM-DD)
    #[arg(long = "from")]
    pub date_from: Option<String>,
    /// End of the date range (YYYY-MM-DD)
    #[arg(long = "to")]
    pub date_to: Option<String>,
    /// Page number, starting at 1
    #[arg(long, short)]
    pub page: Option<u32>,
}

impl From<SearchCampsArgs> for SearchCamps {
    fn from(val: SearchCampsArgs) -> Self {
        SearchCamps {
            search: val.search,
            sort: val.sort.map(|s| s.to_string()),
            state: val.state,
            type_id: val.type_id,
            week_id: val.week_id,
            price_min: val.price_min,
            price_max: val.price_max,
            date_from: val.date_from,
            date_to: val.date_to,
            page: val.page,
            lazy: false,
        }
    }
}

/// Listing sort order as typed on the command line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum SortArg {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    DateAsc,
    DateDesc,
    Random,
}

impl std::fmt::Display for SortArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            SortArg::NameAsc => "name_asc",
            SortArg::NameDesc => "name_desc",
            SortArg::PriceAsc => "price_asc",
            SortArg::PriceDesc => "price_desc",
            SortArg::DateAsc => "date_asc",
            SortArg::DateDesc => "date_desc",
            SortArg::Random => "random",
        };
        f.write_str(value)
    }
}

#[derive(Subcommand)]
pub enum CampCommands {
    /// Create a camp
    #[command(alias = "a")]
    Add(AddCampArgs),
    /// Show a camp with its sessions, lodging and FAQ
    #[command(alias = "s")]
    Show {
        /// ID of the camp to show
        id: u64,
    },
    /// Edit a camp's profile and links
    #[command(alias = "e")]
    Edit(EditCampArgs),
    /// Delete a camp and everything attached to it
    #[command(aliases = ["d", "rm"])]
    Delete {
        /// ID of the camp to delete
        id: u64,
        /// Confirm the deletion (required to prevent accidents)
        #[arg(long)]
        confirm: bool,
    },
    /// List a camp publicly
    Approve {
        /// ID of the camp to approve
        id: u64,
    },
    /// Hide a camp from the public directory
    Unapprove {
        /// ID of the camp to hide
        id: u64,
    },
    /// Add a camp to or remove it from the featured carousel
    Feature {
        /// ID of the camp
        id: u64,
        /// Remove the camp from the carousel instead
        #[arg(long)]
        off: bool,
    },
    /// Replace a camp's terms on one axis
    Link {
        /// ID of the camp
        id: u64,
        /// Taxonomy axis to replace
        #[arg(value_enum)]
        taxonomy: TaxonomyArg,
        /// Term IDs, comma-separated; empty clears the axis
        #[arg(value_delimiter = ',')]
        ids: Vec<u64>,
    },
    /// Search the public directory
    #[command(aliases = ["f", "ls"])]
    Search(SearchCampsArgs),
    /// Approved featured camps, best rated first
    Featured {
        /// Maximum number of camps
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
}

// ============================================================================
// Taxonomy
// ============================================================================

#[derive(Subcommand)]
pub enum TermCommands {
    /// Create a term at the end of the axis' order
    #[command(alias = "a")]
    Add {
        #[arg(value_enum)]
        taxonomy: TaxonomyArg,
        /// Display name
        name: String,
        /// URL slug; derived from the name when omitted
        #[arg(long)]
        slug: Option<String>,
        /// Create the term hidden from public pages
        #[arg(long)]
        inactive: bool,
    },
    /// List the terms of an axis in display order
    #[command(aliases = ["l", "ls"])]
    List {
        #[arg(value_enum)]
        taxonomy: TaxonomyArg,
        /// Only show active terms
        #[arg(long)]
        active_only: bool,
    },
    /// Rename a term or change its slug or visibility
    #[command(alias = "e")]
    Edit {
        #[arg(value_enum)]
        taxonomy: TaxonomyArg,
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        /// true to show the term publicly, false to hide it
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a term and unlink it from every camp
    #[command(aliases = ["d", "rm"])]
    Delete {
        #[arg(value_enum)]
        taxonomy: TaxonomyArg,
        id: u64,
        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,
    },
    /// Set the display order: listed IDs take positions 0, 1, 2, ...
    Reorder {
        #[arg(value_enum)]
        taxonomy: TaxonomyArg,
        #[arg(value_delimiter = ',', required = true)]
        ids: Vec<u64>,
    },
}

// ============================================================================
// Parents and messages
// ============================================================================

/// Register a parent account
#[derive(ClapArgs)]
pub struct RegisterParentArgs {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    /// Two-letter state code
    #[arg(long)]
    pub state: Option<String>,
    /// Number of children
    #[arg(long)]
    pub children: Option<u32>,
}

impl From<RegisterParentArgs> for ParentRegistration {
    fn from(val: RegisterParentArgs) -> Self {
        ParentRegistration {
            first_name: val.first_name,
            last_name: val.last_name,
            email: val.email,
            phone: val.phone,
            city: val.city,
            state: val.state,
            children_count: val.children,
        }
    }
}

#[derive(Subcommand)]
pub enum ParentCommands {
    /// Register a parent and send the welcome email
    #[command(alias = "r")]
    Register(RegisterParentArgs),
    /// Show a parent account
    #[command(alias = "s")]
    Show { id: u64 },
    /// Save or unsave a camp for a parent
    #[command(alias = "fav")]
    Favorite { parent_id: u64, camp_id: u64 },
    /// List a parent's saved camps
    Favorites { parent_id: u64 },
    /// Email a password reset code to the parent with this address
    ResetPassword { email: String },
    /// Check and consume a password reset code
    RedeemReset { token: String },
}

/// Send a message from a parent to a camp
#[derive(ClapArgs)]
pub struct SendMessageArgs {
    pub parent_id: u64,
    pub camp_id: u64,
    pub subject: String,
    pub body: String,
}

impl From<SendMessageArgs> for NewMessage {
    fn from(val: SendMessageArgs) -> Self {
        NewMessage {
            parent_id: val.parent_id,
            camp_id: val.camp_id,
            subject: val.subject,
            body: val.body,
        }
    }
}

#[derive(Subcommand)]
pub enum MessageCommands {
    /// Send a message; the camp's director gets it in the next digest
    Send(SendMessageArgs),
    /// Messages sent to a camp, newest first
    #[command(aliases = ["l", "ls"])]
    List { camp_id: u64 },
    /// Mark a message as read
    Read { id: u64 },
}

/// Submit the public contact form
#[derive(ClapArgs)]
pub struct ContactArgs {
    pub name: String,
    pub email: String,
    pub message: String,
    #[arg(long)]
    pub subject: Option<String>,
}

impl From<ContactArgs> for ContactForm {
    fn from(val: ContactArgs) -> Self {
        ContactForm {
            name: val.name,
            email: val.email,
            subject: val.subject,
            message: val.message,
        }
    }
}

// ============================================================================
// Notifications and settings
// ============================================================================

#[derive(Subcommand)]
pub enum NotifyCommands {
    /// Flush the queue; sends the digest when it is due
    Digest {
        /// Send the digest even if it is not due yet
        #[arg(long)]
        force: bool,
    },
    /// Queue counts per status
    Status,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show all settings
    Show,
    /// Change one setting
    Set {
        /// site_name, admin_email, from_email, digest_hour or last_digest_date
        key: String,
        value: String,
    },
}

// ============================================================================
// Credentials
// ============================================================================

/// Store a login, or replace one with --id
#[derive(ClapArgs)]
pub struct SaveCredentialArgs {
    pub label: String,
    pub username: String,
    pub secret: String,
    /// Replace the credential with this ID
    #[arg(long)]
    pub id: Option<u64>,
    /// Attach the credential to a camp
    #[arg(long)]
    pub camp_id: Option<u64>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<SaveCredentialArgs> for CredentialInput {
    fn from(val: SaveCredentialArgs) -> Self {
        CredentialInput {
            id: val.id,
            camp_id: val.camp_id,
            label: val.label,
            username: val.username,
            secret: val.secret,
            notes: val.notes,
        }
    }
}

#[derive(Subcommand)]
pub enum CredentialCommands {
    /// Store or replace a login
    Save(SaveCredentialArgs),
    /// List logins with their secrets masked
    #[command(aliases = ["l", "ls"])]
    List {
        #[arg(long)]
        camp_id: Option<u64>,
    },
    /// Print one login's secret
    Reveal { id: u64 },
    /// Delete a login
    Delete { id: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args_convert() {
        let args = SearchCampsArgs {
            search: Some("lake".to_string()),
            sort: Some(SortArg::PriceDesc),
            type_id: Some(3),
            ..Default::default()
        };
        let params = SearchCamps::from(args);
        assert_eq!(params.sort.as_deref(), Some("price_desc"));
        assert_eq!(params.type_id, Some(3));
        assert!(!params.lazy);
    }

    #[test]
    fn test_profile_args_only_override_given_fields() {
        let mut camp = NewCamp {
            city: Some("Stowe".to_string()),
            terms: CampTerms {
                types: vec![1],
                weeks: vec![2],
                activities: Vec::new(),
            },
            ..NewCamp::named("Camp Birchwood")
        };

        CampProfileArgs {
            state: Some("VT".to_string()),
            weeks: Some(vec![5, 6]),
            ..Default::default()
        }
        .apply_to(&mut camp);

        assert_eq!(camp.city.as_deref(), Some("Stowe"));
        assert_eq!(camp.state.as_deref(), Some("VT"));
        assert_eq!(camp.terms.types, [1]);
        assert_eq!(camp.terms.weeks, [5, 6]);
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
