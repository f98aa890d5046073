/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::api::{segment, ResponseCode};
use crate::errors::ImmichError;
use crate::macros::{client_debug, objs_from_path};
use crate::parsers::from_library_type;
use crate::{Client, LibraryType};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Holds information returned from the Libraries API.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    pub id: String,

    #[serde(default)]
    pub name: String,

    pub owner_id: Option<String>,

    #[serde(
        default,
        rename = "type",
        deserialize_with = "from_library_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub library_type: Option<LibraryType>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Library {
    const BASE_URI: &'static str = "/api/libraries";

    /// Lists libraries, optionally only those of `library_type`
    pub async fn list(
        client: Client,
        library_type: Option<LibraryType>,
    ) -> Result<Vec<Library>, ImmichError> {
        client_debug!(client.logger(), "Get libraries with library_type : {:?}", library_type);
        match library_type {
            Some(library_type) => {
                let library_type: &str = library_type.into();
                let params = vec![("type", library_type)];
                objs_from_path!(client, Self::BASE_URI, Some(params.as_slice()), Library)
            }
            None => objs_from_path!(client, Self::BASE_URI, None, Library),
        }
    }

    /// Scans the library for `id`.
    ///
    /// Without either flag the server decides what to refresh.
    pub async fn scan_with_client(
        client: Client,
        id: &str,
        refresh_all_files: Option<bool>,
        refresh_modified_files: Option<bool>,
    ) -> Result<(), ImmichError> {
        client_debug!(
            client.logger(),
            "Scan library with library_id : {} and refresh_all_files : {:?} and refresh_modified_files : {:?}",
            id,
            refresh_all_files,
            refresh_modified_files
        );
        let path = format!("{}/{}/scan", Self::BASE_URI, segment(id));
        let data = serde_json::to_vec(&scan_payload(refresh_all_files, refresh_modified_files))?;
        client
            .api()
            .execute(Method::POST, &path, Some(data), &[ResponseCode::NoContent])
            .await?;
        client_debug!(client.logger(), "Scan library done");
        Ok(())
    }

    /// Removes assets whose files are no longer present from the library for `id`
    pub async fn remove_offline_files_with_client(client: Client, id: &str) -> Result<(), ImmichError> {
        client_debug!(client.logger(), "Remove offline files with library_id : {}", id);
        let path = format!("{}/{}/removeOffline", Self::BASE_URI, segment(id));
        client
            .api()
            .execute(Method::POST, &path, None, &[ResponseCode::NoContent])
            .await?;
        client_debug!(client.logger(), "Remove offline files done");
        Ok(())
    }

    /// Scans this library
    pub async fn scan(
        &self,
        refresh_all_files: Option<bool>,
        refresh_modified_files: Option<bool>,
    ) -> Result<(), ImmichError> {
        let client = self.client.clone().ok_or(ImmichError::ClientNotFound())?;
        Self::scan_with_client(client, &self.id, refresh_all_files, refresh_modified_files).await
    }

    /// Removes offline files from this library
    pub async fn remove_offline_files(&self) -> Result<(), ImmichError> {
        let client = self.client.clone().ok_or(ImmichError::ClientNotFound())?;
        Self::remove_offline_files_with_client(client, &self.id).await
    }
}

impl std::fmt::Display for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "name: {}, id: {}", self.name, self.id)
    }
}

// Both flags or neither
fn scan_payload(refresh_all_files: Option<bool>, refresh_modified_files: Option<bool>) -> Value {
    if refresh_all_files.is_none() && refresh_modified_files.is_none() {
        return json!({});
    }
    json!({
        "refreshAllFiles": refresh_all_files.unwrap_or(false),
        "refreshModifiedFiles": refresh_modified_files.unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_without_flags_is_empty() {
        assert_eq!(scan_payload(None, None), json!({}));
    }

    #[test]
    fn scan_with_one_flag_sends_both() {
        assert_eq!(
            scan_payload(Some(true), None),
            json!({"refreshAllFiles": true, "refreshModifiedFiles": false})
        );
        assert_eq!(
            scan_payload(None, Some(true)),
            json!({"refreshAllFiles": false, "refreshModifiedFiles": true})
        );
    }

    #[test]
    fn library_type_is_read() {
        let lib: Library = serde_json::from_value(json!({
            "id": "l1",
            "name": "Photos",
            "ownerId": "u1",
            "type": "EXTERNAL",
            "importPaths": ["/mnt/photos"]
        }))
        .unwrap();
        assert_eq!(lib.library_type, Some(LibraryType::External));
        assert_eq!(lib.extra["importPaths"][0], "/mnt/photos");

        let lib: Library = serde_json::from_value(json!({"id": "l2", "name": "Other"})).unwrap();
        assert_eq!(lib.library_type, None);

        let lib: Library =
            serde_json::from_value(json!({"id": "l3", "name": "New", "type": "NETWORK"})).unwrap();
        assert_eq!(lib.library_type, None);
    }
}
