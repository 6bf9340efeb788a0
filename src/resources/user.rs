use crate::error::Result;
use crate::link::Links;
use crate::rest::AbiquoClient;
use serde::{Deserialize, Serialize};

pub const USER_MEDIA_TYPE: &str = "application/vnd.abiquo.user+json";

/// The authenticated user, as returned by `/login`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub(crate) links: Links,
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub nick: String,
    pub email: String,
    pub locale: String,
    pub active: bool,
}

crate::impl_dto!(User);

impl AbiquoClient {
    /// Log in with the client credentials and return the current user
    pub fn login(&self) -> Result<User> {
        self.get_json("login", USER_MEDIA_TYPE)
    }
}
