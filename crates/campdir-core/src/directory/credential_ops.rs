//! Stored logins. Every operation is admin-only.

use log::info;

use super::Directory;
use crate::{
    error::Result,
    models::{Actor, Credential, CredentialInput},
};

impl Directory {
    pub async fn save_credential(&self, actor: Actor, input: CredentialInput) -> Result<Credential> {
        actor.require_admin("manage credentials")?;
        self.with_database(move |db| db.save_credential(input)).await
    }

    /// Credentials without their secrets, optionally for one camp.
    pub async fn list_credentials(&self, actor: Actor, camp_id: Option<u64>) -> Result<Vec<Credential>> {
        actor.require_admin("view credentials")?;
        self.with_database(move |db| db.list_credentials(camp_id))
            .await
    }

    /// Returns the secret of one credential.
    pub async fn reveal_credential(&self, actor: Actor, id: u64) -> Result<String> {
        actor.require_admin("reveal credentials")?;
        let secret = self
            .with_database(move |db| db.reveal_credential(id))
            .await?;
        info!("Credential {id} revealed to {actor:?}");
        Ok(secret)
    }

    pub async fn delete_credential(&self, actor: Actor, id: u64) -> Result<Credential> {
        actor.require_admin("manage credentials")?;
        self.with_database(move |db| db.delete_credential(id)).await
    }
}
