//! Taxonomy term management. Reads are public; writes are admin-only.

use super::Directory;
use crate::{
    error::Result,
    models::{Actor, Taxonomy, Term},
};

impl Directory {
    pub async fn create_term(
        &self,
        actor: Actor,
        axis: Taxonomy,
        name: String,
        slug: Option<String>,
        active: bool,
    ) -> Result<Term> {
        actor.require_admin("manage taxonomy terms")?;
        self.with_database(move |db| db.create_term(axis, &name, slug.as_deref(), active))
            .await
    }

    /// Changes any of a term's name, slug and active flag.
    pub async fn update_term(
        &self,
        actor: Actor,
        axis: Taxonomy,
        id: u64,
        name: Option<String>,
        slug: Option<String>,
        active: Option<bool>,
    ) -> Result<Term> {
        actor.require_admin("manage taxonomy terms")?;
        self.with_database(move |db| {
            db.update_term(axis, id, name.as_deref(), slug.as_deref(), active)
        })
        .await
    }

    pub async fn delete_term(&self, actor: Actor, axis: Taxonomy, id: u64) -> Result<Term> {
        actor.require_admin("manage taxonomy terms")?;
        self.with_database(move |db| db.delete_term(axis, id)).await
    }

    pub async fn list_terms(&self, axis: Taxonomy, active_only: bool) -> Result<Vec<Term>> {
        self.with_database(move |db| db.list_terms(axis, active_only))
            .await
    }

    /// Persists a drag-and-drop order and returns the axis in its new order.
    pub async fn reorder_terms(
        &self,
        actor: Actor,
        axis: Taxonomy,
        ordered_ids: Vec<u64>,
    ) -> Result<Vec<Term>> {
        actor.require_admin("reorder taxonomy terms")?;
        self.with_database(move |db| db.reorder_terms(axis, &ordered_ids))
            .await
    }
}
