//! Source of the authenticated user.

use crate::models::UserId;

/// Supplies the id of the signed-in user, if any.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}

/// Identity fixed at construction time (command line flag, tests).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<UserId>);

impl StaticIdentity {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self(Some(user_id.into()))
    }

    /// An identity with nobody signed in.
    pub fn anonymous() -> Self {
        Self(None)
    }

    /// Blank ids count as anonymous.
    pub fn from_option(user_id: Option<String>) -> Self {
        Self(
            user_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .map(UserId::new),
        )
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.0.clone()
    }
}
