use academy_core::model::UserId;

/// Who the session belongs to.
///
/// Passed explicitly at construction so the player and certificate services
/// stay free of ambient global state and can be unit-tested with injected
/// identities. Anonymous sessions track progress locally but never persist
/// it and cannot request certificates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionIdentity {
    user: Option<UserId>,
}

impl SessionIdentity {
    /// Identity for a signed-in learner.
    #[must_use]
    pub fn user(user_id: UserId) -> Self {
        Self {
            user: Some(user_id),
        }
    }

    /// Identity for a visitor with no account.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
