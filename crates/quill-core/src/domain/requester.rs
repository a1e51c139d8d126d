use uuid::Uuid;

use crate::error::DomainError;

/// The actor issuing an operation, as resolved by the identity provider.
///
/// Passed explicitly into every controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requester {
    #[default]
    Anonymous,
    User(Uuid),
}

impl Requester {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Requester::Anonymous => None,
            Requester::User(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Requester::User(_))
    }

    /// Resolve the authenticated user id or fail with `Unauthorized`.
    pub fn require_authenticated(&self) -> Result<Uuid, DomainError> {
        self.user_id().ok_or(DomainError::Unauthorized)
    }

    /// Anonymous requesters never match an owner.
    pub fn is(&self, user_id: Uuid) -> bool {
        self.user_id() == Some(user_id)
    }
}
