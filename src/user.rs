/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::api::segment;
use crate::errors::ImmichError;
use crate::macros::{client_debug, obj_from_path};
use crate::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Holds information returned from the Users API.
///
/// Fields the client does not use are kept in `extra`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    const BASE_URI: &'static str = "/api/users";

    /// Returns information for the authenticated user
    pub async fn me(client: Client) -> Result<User, ImmichError> {
        client_debug!(client.logger(), "Get my user");
        let path = format!("{}/me", Self::BASE_URI);
        let mut user: User = client.api().get(&path, None).await?;
        user.client = Some(client.clone());
        Ok(user)
    }

    /// Returns information for the specified user id, `None` if there is no such user
    pub async fn from_id(client: Client, id: &str) -> Result<Option<User>, ImmichError> {
        client_debug!(client.logger(), "Get user with id : {}", id);
        let path = format!("{}/{}", Self::BASE_URI, segment(id));
        Ok(obj_from_path!(client, &path, None, User))
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "name: {}, id: {}", self.name, self.id)
    }
}
