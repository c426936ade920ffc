//! Camp records, approval and the public listing.

use log::info;

use super::Directory;
use crate::{
    db::Database,
    error::{DirectoryError, Result},
    models::{
        Actor, Camp, CampProfile, CampQuery, CampSummary, Listing, NewCamp, NotificationKind,
        Taxonomy, Term,
    },
    notify::templates,
};

/// Sets (or flips, when `approved` is `None`) the approval flag and queues
/// the "now listed" email when a camp becomes visible. The flag and the
/// queued email are written together or not at all.
fn apply_approval(db: &mut Database, id: u64, approved: Option<bool>) -> Result<bool> {
    db.atomically(|db| {
        let camp = db.get_camp(id)?.ok_or(DirectoryError::CampNotFound { id })?;
        let now_approved = approved.unwrap_or(!camp.approved);
        db.set_approval(id, now_approved)?;

        if now_approved && !camp.approved {
            info!("Camp {id} ({}) approved", camp.name);
            if let Some(email) = camp.email.as_deref() {
                let settings = db.get_settings()?;
                let (subject, body) = templates::camp_approved(&settings, &camp);
                db.enqueue(NotificationKind::Direct, email, &subject, &body)?;
            }
        }

        Ok(now_approved)
    })
}

impl Directory {
    /// Creates a camp. Only admins may create it approved or featured; for
    /// everyone else both flags start off.
    pub async fn create_camp(&self, actor: Actor, mut camp: NewCamp) -> Result<Camp> {
        if !actor.is_admin() {
            camp.approved = false;
            camp.featured = false;
        }
        self.with_database(move |db| db.create_camp(camp)).await
    }

    /// Replaces a camp's profile and links. Directors keep the current
    /// approval and featured flags whatever the payload says.
    pub async fn update_camp(&self, actor: Actor, id: u64, mut camp: NewCamp) -> Result<Camp> {
        actor.require_camp_editor(id, "edit this camp")?;

        self.with_database(move |db| {
            if !actor.is_admin() {
                let current = db.get_camp(id)?.ok_or(DirectoryError::CampNotFound { id })?;
                camp.approved = current.approved;
                camp.featured = current.featured;
            }
            db.update_camp(id, camp)
        })
        .await
    }

    /// Replaces the camp's links on one axis.
    pub async fn set_camp_terms(
        &self,
        actor: Actor,
        camp_id: u64,
        axis: Taxonomy,
        term_ids: Vec<u64>,
    ) -> Result<Vec<Term>> {
        actor.require_camp_editor(camp_id, "change this camp's categories")?;
        self.with_database(move |db| db.set_camp_terms(camp_id, axis, &term_ids))
            .await
    }

    /// Fetches a camp. Unapproved camps are only visible to admins and the
    /// camp's own director.
    pub async fn get_camp(&self, actor: Actor, id: u64) -> Result<Option<Camp>> {
        let camp = self.with_database(move |db| db.get_camp(id)).await?;
        Ok(camp.filter(|c| c.approved || actor.require_camp_editor(c.id, "view").is_ok()))
    }

    /// A camp with its sessions, accommodations and FAQs, under the same
    /// visibility rule as [`Directory::get_camp`].
    pub async fn camp_profile(&self, actor: Actor, id: u64) -> Result<Option<CampProfile>> {
        let profile = self
            .with_database(move |db| {
                let Some(camp) = db.get_camp(id)? else {
                    return Ok(None);
                };
                Ok(Some(CampProfile {
                    camp,
                    accommodations: db.list_accommodations(id)?,
                    faqs: db.list_faqs(id)?,
                    sessions: db.list_sessions(id)?,
                }))
            })
            .await?;

        Ok(profile.filter(|p| {
            p.camp.approved || actor.require_camp_editor(p.camp.id, "view").is_ok()
        }))
    }

    /// Deletes a camp with its links and child records.
    pub async fn delete_camp(&self, actor: Actor, id: u64) -> Result<Camp> {
        actor.require_admin("delete camps")?;
        self.with_database(move |db| db.delete_camp(id)).await
    }

    pub async fn set_approval(&self, actor: Actor, id: u64, approved: bool) -> Result<()> {
        actor.require_admin("approve camps")?;
        self.with_database(move |db| apply_approval(db, id, Some(approved)).map(|_| ()))
            .await
    }

    /// Flips a camp's approval and returns the new state.
    pub async fn toggle_approval(&self, actor: Actor, id: u64) -> Result<bool> {
        actor.require_admin("approve camps")?;
        self.with_database(move |db| apply_approval(db, id, None)).await
    }

    pub async fn set_featured(&self, actor: Actor, id: u64, featured: bool) -> Result<()> {
        actor.require_admin("feature camps")?;
        self.with_database(move |db| db.set_featured(id, featured))
            .await
    }

    /// Runs a public directory query.
    pub async fn search_camps(&self, query: CampQuery) -> Result<Listing> {
        self.with_database(move |db| db.search_camps(&query)).await
    }

    /// Approved featured camps, best rated first.
    pub async fn featured_camps(&self, limit: u32) -> Result<Vec<CampSummary>> {
        self.with_database(move |db| db.featured_camps(limit)).await
    }
}
