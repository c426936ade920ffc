//! Command execution for the `campdir` binary.
//!
//! The command line is an operator tool: every command runs as
//! [`Actor::Admin`]. Results are rendered as Markdown through the
//! [`TerminalRenderer`].

use anyhow::{anyhow, bail, Context, Result};
use campdir_core::{
    display::{
        CampSummaries, CreateResult, Credentials, DeleteResult, Messages, OperationStatus, Terms,
        UpdateResult,
    },
    models::{Actor, Camp, CampQuery, NewCamp, SettingKey, Taxonomy, Term},
    params::SearchCamps,
    Directory,
};
use log::debug;

use crate::{
    args::{
        CampCommands, ContactArgs, CredentialCommands, EditCampArgs, MessageCommands,
        NotifyCommands, ParentCommands, SettingsCommands, TermCommands,
    },
    renderer::TerminalRenderer,
};

const ACTOR: Actor = Actor::Admin;

pub struct Cli {
    directory: Directory,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(directory: Directory, renderer: TerminalRenderer) -> Self {
        Self { directory, renderer }
    }

    fn render(&self, output: impl ToString) -> Result<()> {
        self.renderer.render(&output.to_string())
    }

    /// Prints one page of the public directory.
    pub async fn search(&self, params: &SearchCamps) -> Result<()> {
        debug!("search: {params:?}");
        let listing = self
            .directory
            .search_camps(CampQuery::from(params))
            .await
            .context("Failed to search camps")?;
        self.render(listing)
    }

    pub async fn handle_camp_command(&self, command: CampCommands) -> Result<()> {
        match command {
            CampCommands::Add(args) => {
                let camp = self
                    .directory
                    .create_camp(ACTOR, NewCamp::from(args))
                    .await
                    .context("Failed to create camp")?;
                self.render(CreateResult::new(camp))
            }
            CampCommands::Show { id } => {
                let profile = self
                    .directory
                    .camp_profile(ACTOR, id)
                    .await
                    .context("Failed to load camp")?
                    .ok_or_else(|| anyhow!("Camp with ID {id} not found"))?;
                self.render(profile)
            }
            CampCommands::Edit(args) => self.edit_camp(args).await,
            CampCommands::Delete { id, confirm } => {
                if !confirm {
                    bail!("Deleting camp {id} removes its sessions, FAQ and messages; re-run with --confirm");
                }
                let camp = self
                    .directory
                    .delete_camp(ACTOR, id)
                    .await
                    .context("Failed to delete camp")?;
                self.render(DeleteResult::new(camp))
            }
            CampCommands::Approve { id } => {
                self.directory
                    .set_approval(ACTOR, id, true)
                    .await
                    .context("Failed to approve camp")?;
                self.render(OperationStatus::success(format!("Camp {id} is now listed")))
            }
            CampCommands::Unapprove { id } => {
                self.directory
                    .set_approval(ACTOR, id, false)
                    .await
                    .context("Failed to unapprove camp")?;
                self.render(OperationStatus::success(format!(
                    "Camp {id} is hidden from the directory"
                )))
            }
            CampCommands::Feature { id, off } => {
                self.directory
                    .set_featured(ACTOR, id, !off)
                    .await
                    .context("Failed to update featured flag")?;
                let message = if off {
                    format!("Camp {id} removed from the carousel")
                } else {
                    format!("Camp {id} added to the carousel")
                };
                self.render(OperationStatus::success(message))
            }
            CampCommands::Link { id, taxonomy, ids } => {
                let axis = Taxonomy::from(taxonomy);
                let terms = self
                    .directory
                    .set_camp_terms(ACTOR, id, axis, ids)
                    .await
                    .context("Failed to link terms")?;
                self.render(Terms::new(axis, terms))
            }
            CampCommands::Search(args) => self.search(&SearchCamps::from(args)).await,
            CampCommands::Featured { limit } => {
                let camps = self
                    .directory
                    .featured_camps(limit)
                    .await
                    .context("Failed to load featured camps")?;
                self.render(CampSummaries(camps))
            }
        }
    }

    async fn edit_camp(&self, args: EditCampArgs) -> Result<()> {
        let EditCampArgs { id, name, profile } = args;

        let current = self
            .directory
            .get_camp(ACTOR, id)
            .await
            .context("Failed to load camp")?
            .ok_or_else(|| anyhow!("Camp with ID {id} not found"))?;

        let mut camp = NewCamp::from(&current);
        if let Some(name) = name {
            camp.name = name;
        }
        profile.apply_to(&mut camp);

        let updated = self
            .directory
            .update_camp(ACTOR, id, camp)
            .await
            .context("Failed to update camp")?;

        let mut changes = Vec::new();
        if updated.name != current.name {
            changes.push(format!("name: {} → {}", current.name, updated.name));
        }
        let place = |c: &Camp| (c.city.clone(), c.state.clone());
        if place(&updated) != place(&current) {
            changes.push("location".to_string());
        }
        if (updated.min_price, updated.max_price) != (current.min_price, current.max_price) {
            changes.push("prices".to_string());
        }
        if (updated.opening_day, updated.closing_day) != (current.opening_day, current.closing_day) {
            changes.push("season".to_string());
        }
        let term_ids = |terms: &[Term]| terms.iter().map(|t| t.id).collect::<Vec<_>>();
        if term_ids(&updated.types) != term_ids(&current.types)
            || term_ids(&updated.weeks) != term_ids(&current.weeks)
            || term_ids(&updated.activities) != term_ids(&current.activities)
        {
            changes.push("categories".to_string());
        }
        self.render(UpdateResult::with_changes(updated, changes))
    }

    pub async fn handle_term_command(&self, command: TermCommands) -> Result<()> {
        match command {
            TermCommands::Add {
                taxonomy,
                name,
                slug,
                inactive,
            } => {
                let term = self
                    .directory
                    .create_term(ACTOR, taxonomy.into(), name, slug, !inactive)
                    .await
                    .context("Failed to create term")?;
                self.render(CreateResult::new(term))
            }
            TermCommands::List {
                taxonomy,
                active_only,
            } => {
                let axis = Taxonomy::from(taxonomy);
                let terms = self
                    .directory
                    .list_terms(axis, active_only)
                    .await
                    .context("Failed to list terms")?;
                self.render(Terms::new(axis, terms))
            }
            TermCommands::Edit {
                taxonomy,
                id,
                name,
                slug,
                active,
            } => {
                let term = self
                    .directory
                    .update_term(ACTOR, taxonomy.into(), id, name, slug, active)
                    .await
                    .context("Failed to update term")?;
                self.render(UpdateResult::new(term))
            }
            TermCommands::Delete {
                taxonomy,
                id,
                confirm,
            } => {
                if !confirm {
                    bail!("Deleting term {id} unlinks it from every camp; re-run with --confirm");
                }
                let term = self
                    .directory
                    .delete_term(ACTOR, taxonomy.into(), id)
                    .await
                    .context("Failed to delete term")?;
                self.render(DeleteResult::new(term))
            }
            TermCommands::Reorder { taxonomy, ids } => {
                let axis = Taxonomy::from(taxonomy);
                let terms = self
                    .directory
                    .reorder_terms(ACTOR, axis, ids)
                    .await
                    .context("Failed to reorder terms")?;
                self.render(Terms::new(axis, terms))
            }
        }
    }

    pub async fn handle_parent_command(&self, command: ParentCommands) -> Result<()> {
        match command {
            ParentCommands::Register(args) => {
                let parent = self
                    .directory
                    .register_parent(args.into())
                    .await
                    .context("Failed to register parent")?;
                self.render(CreateResult::new(parent))
            }
            ParentCommands::Show { id } => {
                let parent = self
                    .directory
                    .get_parent(ACTOR, id)
                    .await
                    .context("Failed to load parent")?
                    .ok_or_else(|| anyhow!("Parent with ID {id} not found"))?;
                self.render(parent)
            }
            ParentCommands::Favorite { parent_id, camp_id } => {
                let saved = self
                    .directory
                    .toggle_favorite(ACTOR, parent_id, camp_id)
                    .await
                    .context("Failed to toggle favorite")?;
                let message = if saved {
                    format!("Camp {camp_id} saved to favorites")
                } else {
                    format!("Camp {camp_id} removed from favorites")
                };
                self.render(OperationStatus::success(message))
            }
            ParentCommands::Favorites { parent_id } => {
                let camps = self
                    .directory
                    .list_favorites(ACTOR, parent_id)
                    .await
                    .context("Failed to list favorites")?;
                self.render(CampSummaries(camps))
            }
            ParentCommands::ResetPassword { email } => {
                let reset = self
                    .directory
                    .request_password_reset(email.clone())
                    .await
                    .context("Failed to issue reset code")?;
                match reset {
                    Some(reset) => self.render(reset),
                    None => self.render(OperationStatus::failure(format!(
                        "No parent is registered with {email}"
                    ))),
                }
            }
            ParentCommands::RedeemReset { token } => {
                let parent = self
                    .directory
                    .redeem_password_reset(token)
                    .await
                    .context("Failed to redeem reset code")?;
                self.render(OperationStatus::success(format!(
                    "Reset code accepted for parent {} <{}>",
                    parent.id, parent.email
                )))
            }
        }
    }

    pub async fn handle_credential_command(&self, command: CredentialCommands) -> Result<()> {
        match command {
            CredentialCommands::Save(args) => {
                let credential = self
                    .directory
                    .save_credential(ACTOR, args.into())
                    .await
                    .context("Failed to save credential")?;
                self.render(CreateResult::new(credential))
            }
            CredentialCommands::List { camp_id } => {
                let credentials = self
                    .directory
                    .list_credentials(ACTOR, camp_id)
                    .await
                    .context("Failed to list credentials")?;
                self.render(Credentials(credentials))
            }
            CredentialCommands::Reveal { id } => {
                let secret = self
                    .directory
                    .reveal_credential(ACTOR, id)
                    .await
                    .context("Failed to reveal credential")?;
                self.render(secret)
            }
            CredentialCommands::Delete { id } => {
                let credential = self
                    .directory
                    .delete_credential(ACTOR, id)
                    .await
                    .context("Failed to delete credential")?;
                self.render(DeleteResult::new(credential))
            }
        }
    }

    pub async fn handle_message_command(&self, command: MessageCommands) -> Result<()> {
        match command {
            MessageCommands::Send(args) => {
                let message = self
                    .directory
                    .send_message(ACTOR, args.into())
                    .await
                    .context("Failed to send message")?;
                self.render(CreateResult::new(message))
            }
            MessageCommands::List { camp_id } => {
                let messages = self
                    .directory
                    .list_messages(ACTOR, camp_id)
                    .await
                    .context("Failed to list messages")?;
                self.render(Messages(messages))
            }
            MessageCommands::Read { id } => {
                self.directory
                    .mark_message_read(ACTOR, id)
                    .await
                    .context("Failed to mark message read")?;
                self.render(OperationStatus::success(format!("Message {id} marked read")))
            }
        }
    }

    pub async fn submit_contact(&self, args: ContactArgs) -> Result<()> {
        let submission = self
            .directory
            .submit_contact(args.into())
            .await
            .context("Failed to submit contact form")?;
        self.render(CreateResult::new(submission))
    }

    pub async fn handle_notify_command(&self, command: NotifyCommands) -> Result<()> {
        match command {
            NotifyCommands::Digest { force } => {
                let report = self
                    .directory
                    .run_digest(ACTOR, force)
                    .await
                    .context("Failed to run digest")?;
                self.render(report)
            }
            NotifyCommands::Status => {
                let stats = self
                    .directory
                    .queue_stats(ACTOR)
                    .await
                    .context("Failed to read queue")?;
                self.render(stats)
            }
        }
    }

    pub async fn handle_settings_command(&self, command: SettingsCommands) -> Result<()> {
        match command {
            SettingsCommands::Show => {
                let settings = self
                    .directory
                    .get_settings()
                    .await
                    .context("Failed to load settings")?;
                self.render(settings)
            }
            SettingsCommands::Set { key, value } => {
                let key: SettingKey = key.parse()?;
                let stored = self
                    .directory
                    .set_setting(ACTOR, key, value)
                    .await
                    .context("Failed to update setting")?;
                self.render(OperationStatus::success(format!(
                    "{} set to {stored}",
                    key.as_str()
                )))
            }
        }
    }
}
