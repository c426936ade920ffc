//! Accommodations, FAQs and sessions. Admins and the camp's director may
//! edit them; anyone may read them.

use super::Directory;
use crate::{
    error::Result,
    models::{
        Accommodation, AccommodationInput, Actor, Faq, FaqInput, Session, SessionInput,
    },
};

impl Directory {
    pub async fn save_accommodation(
        &self,
        actor: Actor,
        input: AccommodationInput,
    ) -> Result<Accommodation> {
        actor.require_camp_editor(input.camp_id, "edit this camp's accommodations")?;
        self.with_database(move |db| db.save_accommodation(input)).await
    }

    pub async fn delete_accommodation(&self, actor: Actor, camp_id: u64, id: u64) -> Result<()> {
        actor.require_camp_editor(camp_id, "edit this camp's accommodations")?;
        self.with_database(move |db| db.delete_accommodation(camp_id, id))
            .await
    }

    pub async fn list_accommodations(&self, camp_id: u64) -> Result<Vec<Accommodation>> {
        self.with_database(move |db| db.list_accommodations(camp_id))
            .await
    }

    pub async fn save_faq(&self, actor: Actor, input: FaqInput) -> Result<Faq> {
        actor.require_camp_editor(input.camp_id, "edit this camp's FAQ")?;
        self.with_database(move |db| db.save_faq(input)).await
    }

    pub async fn delete_faq(&self, actor: Actor, camp_id: u64, id: u64) -> Result<()> {
        actor.require_camp_editor(camp_id, "edit this camp's FAQ")?;
        self.with_database(move |db| db.delete_faq(camp_id, id)).await
    }

    pub async fn list_faqs(&self, camp_id: u64) -> Result<Vec<Faq>> {
        self.with_database(move |db| db.list_faqs(camp_id)).await
    }

    pub async fn save_session(&self, actor: Actor, input: SessionInput) -> Result<Session> {
        actor.require_camp_editor(input.camp_id, "edit this camp's sessions")?;
        self.with_database(move |db| db.save_session(input)).await
    }

    pub async fn delete_session(&self, actor: Actor, camp_id: u64, id: u64) -> Result<()> {
        actor.require_camp_editor(camp_id, "edit this camp's sessions")?;
        self.with_database(move |db| db.delete_session(camp_id, id))
            .await
    }

    pub async fn list_sessions(&self, camp_id: u64) -> Result<Vec<Session>> {
        self.with_database(move |db| db.list_sessions(camp_id)).await
    }
}
