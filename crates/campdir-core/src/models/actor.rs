//! Who is performing an operation, and what they may do.

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};

/// The caller of a write operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Actor {
    /// Site administrator; may do everything
    Admin,
    /// Director of a single camp
    Director { camp_id: u64 },
    /// Registered parent
    Parent { parent_id: u64 },
    /// Anonymous visitor
    Visitor,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin)
    }

    /// Administrators only: approval, featuring, taxonomy and settings.
    pub fn require_admin(&self, action: &str) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DirectoryError::unauthorized(action))
        }
    }

    /// Admins, or the director of this camp.
    pub fn require_camp_editor(&self, camp_id: u64, action: &str) -> Result<()> {
        match self {
            Actor::Admin => Ok(()),
            Actor::Director { camp_id: own } if *own == camp_id => Ok(()),
            _ => Err(DirectoryError::unauthorized(action)),
        }
    }

    /// Admins, or the parent acting on their own account.
    pub fn require_parent(&self, parent_id: u64, action: &str) -> Result<()> {
        match self {
            Actor::Admin => Ok(()),
            Actor::Parent { parent_id: own } if *own == parent_id => Ok(()),
            _ => Err(DirectoryError::unauthorized(action)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_director_edits_only_own_camp() {
        let director = Actor::Director { camp_id: 7 };
        assert!(director.require_camp_editor(7, "edit camp").is_ok());
        assert!(matches!(
            director.require_camp_editor(8, "edit camp"),
            Err(DirectoryError::Unauthorized { .. })
        ));
        assert!(director.require_admin("approve camp").is_err());
    }

    #[test]
    fn test_admin_passes_every_check() {
        let admin = Actor::Admin;
        assert!(admin.require_admin("approve camp").is_ok());
        assert!(admin.require_camp_editor(1, "edit camp").is_ok());
        assert!(admin.require_parent(1, "toggle favorite").is_ok());
    }

    #[test]
    fn test_visitor_and_parent_limits() {
        assert!(Actor::Visitor.require_camp_editor(1, "edit camp").is_err());
        let parent = Actor::Parent { parent_id: 3 };
        assert!(parent.require_parent(3, "toggle favorite").is_ok());
        assert!(parent.require_parent(4, "toggle favorite").is_err());
    }
}
