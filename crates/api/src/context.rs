use scrawl_core::UserId;

/// Authenticated identity for a request.
///
/// Inserted by the bearer-token middleware after verification; handlers
/// receive it as an extension instead of consulting any ambient auth state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AuthedUser {
    user_id: UserId,
}

impl AuthedUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
