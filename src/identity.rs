//! Administrator identity
//!
//! Authentication itself lives outside the core; the mutation path only
//! needs to know who to attribute an audit entry to.

/// Sentinel recorded when no identity is available.
pub const ANONYMOUS: &str = "anonymous";

/// External identity provider consumed by the mutation surfaces.
pub trait IdentityProvider: Send + Sync {
    /// Identity of the currently signed-in administrator, if any.
    fn current_identity(&self) -> Option<String>;
}

/// Fixed identity, set once at session start.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    email: Option<String>,
}

impl StaticIdentity {
    pub fn admin(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self { email: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> Option<String> {
        self.email.clone()
    }
}
