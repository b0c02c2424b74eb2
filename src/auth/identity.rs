use std::sync::Arc;

use crate::repositories::IdentityRepository;

/// Which identity collection a lookup runs against. Chosen by the route or
/// gate handling the request, never by anything inside a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySpace {
    User,
    Admin,
}

#[derive(Clone)]
pub struct IdentityDirectory {
    users: Arc<dyn IdentityRepository>,
    admins: Arc<dyn IdentityRepository>,
}

impl IdentityDirectory {
    pub fn new(users: Arc<dyn IdentityRepository>, admins: Arc<dyn IdentityRepository>) -> Self {
        Self { users, admins }
    }

    pub fn space(&self, space: IdentitySpace) -> &dyn IdentityRepository {
        match space {
            IdentitySpace::User => self.users.as_ref(),
            IdentitySpace::Admin => self.admins.as_ref(),
        }
    }

    pub fn users(&self) -> &dyn IdentityRepository {
        self.space(IdentitySpace::User)
    }

    pub fn admins(&self) -> &dyn IdentityRepository {
        self.space(IdentitySpace::Admin)
    }
}
