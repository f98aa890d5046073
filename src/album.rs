/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::api::{segment, ResponseCode};
use crate::errors::ImmichError;
use crate::macros::{client_debug, obj_from_path, objs_from_path};
use crate::parsers::from_album_user_role;
use crate::{AlbumUserRole, Asset, Client, User};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Holds information returned from the Albums API.
///
/// Fields the client does not use are kept in `extra`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    pub id: String,

    pub album_name: String,

    pub owner_id: Option<String>,

    pub owner: Option<User>,

    #[serde(default)]
    pub album_users: Vec<AlbumUser>,

    #[serde(default)]
    pub assets: Vec<Asset>,

    pub asset_count: Option<u64>,

    pub shared: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Member of an album
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AlbumUser {
    pub user: User,

    #[serde(deserialize_with = "from_album_user_role")]
    pub role: AlbumUserRole,
}

impl Album {
    const BASE_URI: &'static str = "/api/albums";

    /// Returns the album for `id`.
    ///
    /// `None` is returned without contacting the server when no id is given, and when the
    /// server does not know the album.
    pub async fn from_id(client: Client, id: Option<&str>) -> Result<Option<Self>, ImmichError> {
        client_debug!(client.logger(), "Get album with id : {:?}", id);
        let Some(id) = id else {
            return Ok(None);
        };
        let path = format!("{}/{}", Self::BASE_URI, segment(id));
        Ok(obj_from_path!(client, &path, None, Album))
    }

    /// Lists the albums visible to the user, optionally only those containing `asset_id`
    /// and/or only shared (or not shared) ones.
    pub async fn list(
        client: Client,
        asset_id: Option<&str>,
        shared: Option<bool>,
    ) -> Result<Vec<Self>, ImmichError> {
        client_debug!(
            client.logger(),
            "Get albums with asset_id : {:?} and shared : {:?}",
            asset_id,
            shared
        );
        let params = list_params(asset_id, shared);
        let params = (!params.is_empty()).then_some(params.as_slice());
        objs_from_path!(client, Self::BASE_URI, params, Album)
    }

    /// First album named exactly `name`.
    ///
    /// The full list is fetched when no candidate `albums` are given.
    pub async fn by_name(
        client: Client,
        name: &str,
        albums: Option<Vec<Album>>,
    ) -> Result<Option<Self>, ImmichError> {
        client_debug!(client.logger(), "Get album by name : {}", name);
        let albums = match albums {
            Some(albums) if !albums.is_empty() => albums,
            _ => Self::list(client, None, None).await?,
        };
        Ok(find_by_name(albums, name))
    }

    /// Creates an album with every owner as an editor
    pub async fn create(client: Client, name: &str, owner_ids: &[&str]) -> Result<(), ImmichError> {
        if client.logger().enabled(log::Level::Debug) {
            let mut owner_names = Vec::new();
            for owner_id in owner_ids {
                if let Ok(Some(user)) = User::from_id(client.clone(), owner_id).await {
                    owner_names.push(user.name);
                }
            }
            client_debug!(
                client.logger(),
                "Album creation name '{}' for users {:?}",
                name,
                owner_names
            );
        }

        let data = serde_json::to_vec(&CreateAlbumProps::new(name, owner_ids))?;
        client
            .api()
            .execute(
                Method::POST,
                Self::BASE_URI,
                Some(data),
                &[ResponseCode::Ok, ResponseCode::Created],
            )
            .await?;
        client_debug!(client.logger(), "Album creation successful");
        Ok(())
    }

    /// Deletes the album for `id`
    pub async fn delete_with_client(client: Client, id: &str) -> Result<(), ImmichError> {
        client_debug!(client.logger(), "Delete album with album_id : {}", id);
        let path = format!("{}/{}", Self::BASE_URI, segment(id));
        let data = serde_json::to_vec(&json!({}))?;
        client
            .api()
            .execute(Method::DELETE, &path, Some(data), &[ResponseCode::Ok])
            .await?;
        client_debug!(client.logger(), "Delete album done");
        Ok(())
    }

    /// Adds the assets to the album for `id`
    pub async fn add_assets_with_client(
        client: Client,
        id: &str,
        asset_ids: &[&str],
    ) -> Result<(), ImmichError> {
        client_debug!(client.logger(), "Add in album {} : {} assets", id, asset_ids.len());
        let path = format!("{}/{}/assets", Self::BASE_URI, segment(id));
        let data = serde_json::to_vec(&json!({ "ids": asset_ids }))?;
        client
            .api()
            .execute(
                Method::PUT,
                &path,
                Some(data),
                &[ResponseCode::Ok, ResponseCode::Created],
            )
            .await?;
        client_debug!(client.logger(), "Add assets to album successful");
        Ok(())
    }

    /// Deletes this album
    pub async fn delete(&self) -> Result<(), ImmichError> {
        Self::delete_with_client(self.client()?, &self.id).await
    }

    /// Adds the assets to this album
    pub async fn add_assets(&self, asset_ids: &[&str]) -> Result<(), ImmichError> {
        Self::add_assets_with_client(self.client()?, &self.id, asset_ids).await
    }

    fn client(&self) -> Result<Client, ImmichError> {
        self.client.clone().ok_or(ImmichError::ClientNotFound())
    }
}

impl std::fmt::Display for Album {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "name: {}, id: {}", self.album_name, self.id)
    }
}

/// Properties used in the creation of an Album
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumProps {
    pub album_name: String,
    pub album_users: Vec<AlbumUserProps>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AlbumUserProps {
    pub role: AlbumUserRole,
    pub user_id: String,
}

impl CreateAlbumProps {
    pub fn new(name: &str, owner_ids: &[&str]) -> Self {
        Self {
            album_name: name.to_string(),
            album_users: owner_ids
                .iter()
                .map(|id| AlbumUserProps {
                    role: AlbumUserRole::Editor,
                    user_id: id.to_string(),
                })
                .collect(),
        }
    }
}

fn list_params<'a>(asset_id: Option<&'a str>, shared: Option<bool>) -> Vec<(&'a str, &'a str)> {
    let mut params = Vec::new();
    if let Some(asset_id) = asset_id {
        params.push(("assetId", asset_id));
    }
    if let Some(shared) = shared {
        params.push(("shared", if shared { "true" } else { "false" }));
    }
    params
}

// First exact match in server order
fn find_by_name(albums: Vec<Album>, name: &str) -> Option<Album> {
    albums.into_iter().find(|a| a.album_name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(id: &str, name: &str) -> Album {
        serde_json::from_value(json!({
            "id": id,
            "albumName": name,
            "ownerId": "u1",
            "owner": {"id": "u1", "name": "Jane", "email": "jane@example.com"},
            "albumUsers": [
                {"role": "editor", "user": {"id": "u2", "name": "Joe", "email": "joe@example.com"}}
            ],
            "assetCount": 0,
            "hasSharedLink": false
        }))
        .unwrap()
    }

    #[test]
    fn album_parses_members() {
        let a = album("a1", "Holidays");
        assert_eq!(a.owner.as_ref().unwrap().name, "Jane");
        assert_eq!(a.album_users[0].role, AlbumUserRole::Editor);
        assert_eq!(a.album_users[0].user.id, "u2");
        assert!(a.assets.is_empty());
        assert_eq!(a.extra["hasSharedLink"], false);
    }

    #[test]
    fn list_params_combine_filters() {
        assert!(list_params(None, None).is_empty());
        assert_eq!(list_params(Some("x"), None), vec![("assetId", "x")]);
        assert_eq!(list_params(None, Some(false)), vec![("shared", "false")]);
        assert_eq!(
            list_params(Some("x"), Some(true)),
            vec![("assetId", "x"), ("shared", "true")]
        );
    }

    #[test]
    fn first_name_match_wins() {
        let albums = vec![album("a1", "A"), album("a2", "B"), album("a3", "B")];
        assert_eq!(find_by_name(albums.clone(), "B").unwrap().id, "a2");
        assert!(find_by_name(albums, "b").is_none());
    }

    #[test]
    fn owners_become_editors() {
        let props = serde_json::to_value(CreateAlbumProps::new("X", &["u1", "u2"])).unwrap();
        assert_eq!(
            props,
            json!({
                "albumName": "X",
                "albumUsers": [
                    {"role": "editor", "userId": "u1"},
                    {"role": "editor", "userId": "u2"}
                ]
            })
        );
    }
}
