/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::api::{segment, ResponseCode};
use crate::errors::ImmichError;
use crate::macros::{client_debug, client_warn, obj_from_path, objs_from_path};
use crate::parsers::{
    sync_timestamp_now, validate_sync_timestamp, Timestamp, UPDATED_AFTER_FORMAT,
};
use crate::{AssetJob, Client};
use async_stream::try_stream;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::{pin_mut, Stream, StreamExt, TryStreamExt};
use image::DynamicImage;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Number of assets requested per page when listing
pub const PAGE_SIZE: usize = 100;

/// Path segment that marks files living in the server's upload location
pub const UPLOAD_PATH_MARKER: &str = "upload/";

/// Holds information returned from the Assets API.
///
/// Fields the client does not use are kept in `extra`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    pub id: String,

    pub device_asset_id: Option<String>,

    pub owner_id: Option<String>,

    pub library_id: Option<String>,

    pub original_path: Option<String>,

    pub original_file_name: Option<String>,

    pub is_external: Option<bool>,

    pub updated_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Whether the asset lives outside the upload location.
///
/// The server's `isExternal` flag wins when present, otherwise the original path is checked
/// for the upload location marker.
pub fn is_external_asset(asset: &Asset) -> bool {
    asset.is_external.unwrap_or_else(|| {
        asset.original_path.as_deref().is_some_and(|path| {
            !(path.starts_with(UPLOAD_PATH_MARKER) || path.contains(&format!("/{UPLOAD_PATH_MARKER}")))
        })
    })
}

/// Options for [`Asset::full_sync_for_user`]
#[derive(Debug, Clone)]
pub struct FullSyncParams {
    /// Cursor from a previous sync. Left out of the request when `None`.
    pub last_id: Option<String>,
    /// `%Y-%m-%dT%H:%M:%S.%fZ`, defaults to now
    pub updated_until: Option<String>,
    /// Drops assets last updated before this
    pub updated_after: Option<Timestamp>,
    pub limit: u32,
    /// Keeps only external assets when set
    pub is_external: bool,
}

impl Default for FullSyncParams {
    fn default() -> Self {
        Self {
            last_id: None,
            updated_until: None,
            updated_after: None,
            limit: 100,
            is_external: false,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct FullSyncPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    last_id: Option<&'a str>,
    limit: u32,
    updated_until: String,
    user_id: &'a str,
}

impl<'a> FullSyncPayload<'a> {
    fn new(user_id: &'a str, params: &'a FullSyncParams) -> Result<Self, ImmichError> {
        let updated_until = match &params.updated_until {
            Some(until) => {
                validate_sync_timestamp(until)?;
                until.clone()
            }
            None => sync_timestamp_now(),
        };
        Ok(Self {
            last_id: params.last_id.as_deref(),
            limit: params.limit,
            updated_until,
            user_id,
        })
    }
}

impl Asset {
    const BASE_URI: &'static str = "/api/assets";

    /// Pages through every asset, yielding one page at a time.
    ///
    /// `updated_after` is normalized to UTC once and sent with every page. The externality
    /// filter is applied to each page after it is fetched.
    pub fn pages(
        client: Client,
        is_external: Option<bool>,
        updated_after: Option<Timestamp>,
    ) -> impl Stream<Item = Result<Vec<Asset>, ImmichError>> {
        let updated_after = updated_after.map(|ts| ts.to_utc().format(UPDATED_AFTER_FORMAT).to_string());

        page_stream(PAGE_SIZE, move |skip| {
            let client = client.clone();
            let updated_after = updated_after.clone();
            async move {
                let take = PAGE_SIZE.to_string();
                let skip = skip.to_string();
                let mut params = vec![("take", take.as_str()), ("skip", skip.as_str())];
                if let Some(updated_after) = updated_after.as_deref() {
                    params.push(("updatedAfter", updated_after));
                }
                objs_from_path!(client, Self::BASE_URI, Some(params.as_slice()), Asset)
            }
        })
        .map_ok(move |page| filter_external(page, is_external))
    }

    /// Retrieves information about every asset as a stream
    pub fn stream(
        client: Client,
        is_external: Option<bool>,
        updated_after: Option<Timestamp>,
    ) -> impl Stream<Item = Result<Asset, ImmichError>> {
        Self::pages(client, is_external, updated_after)
            .map_ok(|page| futures::stream::iter(page.into_iter().map(Ok::<Asset, ImmichError>)))
            .try_flatten()
    }

    /// Retrieves every asset.
    ///
    /// Fails as a whole if any page fails. Pages already fetched are dropped.
    pub async fn list(
        client: Client,
        is_external: Option<bool>,
        updated_after: Option<Timestamp>,
    ) -> Result<Vec<Asset>, ImmichError> {
        client_debug!(
            client.logger(),
            "Get assets with is_external : {:?} and updated_after : {:?}",
            is_external,
            updated_after
        );
        let pages = Self::pages(client.clone(), is_external, updated_after);
        pin_mut!(pages);

        let mut assets = Vec::new();
        while let Some(page) = pages.next().await {
            assets.extend(page?);
        }
        client_debug!(client.logger(), "Response assets : {}", assets.len());
        Ok(assets)
    }

    /// Retrieves all of a user's assets as of the `updated_until` cursor
    pub async fn full_sync_for_user(
        client: Client,
        user_id: &str,
        params: &FullSyncParams,
    ) -> Result<Vec<Asset>, ImmichError> {
        let payload = FullSyncPayload::new(user_id, params)?;
        client_debug!(client.logger(), "Get full sync for user : {:?}", payload);

        let data = serde_json::to_vec(&payload)?;
        let assets: Vec<Asset> = client
            .api()
            .send_json(Method::POST, "/api/sync/full-sync", data, &[ResponseCode::Ok])
            .await?;

        let updated_after = params.updated_after.map(Timestamp::to_utc);
        let assets: Vec<Asset> = assets
            .into_iter()
            .filter(|a| updated_after.is_none_or(|after| a.updated_at.is_some_and(|u| u >= after)))
            .filter(|a| !params.is_external || is_external_asset(a))
            .map(|mut a| {
                a.client = Some(client.clone());
                a
            })
            .collect();
        client_debug!(client.logger(), "Response full sync : {} assets", assets.len());
        Ok(assets)
    }

    /// Retrieves `count` random assets
    pub async fn random(client: Client, count: u32) -> Result<Vec<Asset>, ImmichError> {
        client_debug!(client.logger(), "Get random with count : {}", count);
        let count = count.to_string();
        let params = vec![("count", count.as_str())];
        let path = format!("{}/random", Self::BASE_URI);
        objs_from_path!(client, &path, Some(params.as_slice()), Asset)
    }

    /// Ids of the authenticated user's assets that were uploaded from `device_id`
    pub async fn ids_by_device(client: Client, device_id: &str) -> Result<Vec<String>, ImmichError> {
        client_debug!(client.logger(), "Get all user assets by device id : {}", device_id);
        let path = format!("{}/device/{}", Self::BASE_URI, segment(device_id));
        let ids: Vec<String> = client.api().get(&path, None).await?;
        client_debug!(client.logger(), "Response asset ids : {}", ids.len());
        Ok(ids)
    }

    /// Returns information for the specified asset id, `None` if there is no such asset
    pub async fn from_id(client: Client, id: &str) -> Result<Option<Asset>, ImmichError> {
        client_debug!(client.logger(), "Get asset info with id : {}", id);
        let path = format!("{}/{}", Self::BASE_URI, segment(id));
        Ok(obj_from_path!(client, &path, None, Asset))
    }

    /// Downloads and decodes the original image for `id`.
    ///
    /// Anything that is not a decodable image is a [`ImmichError::DownloadFailed`].
    pub async fn download_with_client(client: Client, id: &str) -> Result<DynamicImage, ImmichError> {
        client_debug!(client.logger(), "Download asset with id : {}", id);
        let path = format!("{}/{}/original", Self::BASE_URI, segment(id));
        let body = client
            .api()
            .get_raw_opt(&path, None)
            .await?
            .ok_or_else(|| ImmichError::DownloadFailed(id.to_string(), "not found".into()))?;

        let image = decode_image(&body.content_type, &body.data).map_err(|reason| {
            client_warn!(
                client.logger(),
                "Failed to decode asset {}. Content-Type: {}",
                id,
                body.content_type
            );
            ImmichError::DownloadFailed(id.to_string(), reason)
        })?;
        client_debug!(client.logger(), "Download asset done");
        Ok(image)
    }

    /// Thumbnail bytes for `id`, `None` if there is no such asset
    pub async fn thumbnail(client: Client, id: &str) -> Result<Option<Bytes>, ImmichError> {
        client_debug!(client.logger(), "View asset with id : {}", id);
        let path = format!("{}/{}/thumbnail", Self::BASE_URI, segment(id));
        Ok(client.api().get_raw_opt(&path, None).await?.map(|body| body.data))
    }

    /// Permanently deletes the assets
    pub async fn delete_many(client: Client, ids: &[&str]) -> Result<(), ImmichError> {
        client_debug!(client.logger(), "Delete assets with assets_ids : {:?}", ids);
        let data = serde_json::to_vec(&json!({ "force": true, "ids": ids }))?;
        client
            .api()
            .execute(Method::DELETE, Self::BASE_URI, Some(data), &[ResponseCode::NoContent])
            .await?;
        client_debug!(client.logger(), "Delete assets done");
        Ok(())
    }

    /// Queues `job` for each of the assets
    pub async fn run_jobs(client: Client, ids: &[&str], job: AssetJob) -> Result<(), ImmichError> {
        client_debug!(client.logger(), "Run asset job {} for {} assets", job, ids.len());
        let data = serde_json::to_vec(&asset_job_payload(ids, job))?;
        let path = format!("{}/jobs", Self::BASE_URI);
        client
            .api()
            .execute(Method::POST, &path, Some(data), &[ResponseCode::NoContent])
            .await?;
        Ok(())
    }

    /// Downloads and decodes the original image of this asset
    pub async fn download(&self) -> Result<DynamicImage, ImmichError> {
        let client = self.client.clone().ok_or(ImmichError::ClientNotFound())?;
        Self::download_with_client(client, &self.id).await
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "id: {}, path: {}",
            self.id,
            self.original_path.as_deref().unwrap_or_default()
        )
    }
}

// Requests pages of `page_size` until one comes back short. The first error ends the stream.
fn page_stream<T, F, Fut>(page_size: usize, fetch_page: F) -> impl Stream<Item = Result<Vec<T>, ImmichError>>
where
    F: Fn(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>, ImmichError>>,
{
    try_stream! {
        let mut skip = 0;
        loop {
            let page = fetch_page(skip).await?;
            let is_done = page.len() < page_size;
            yield page;

            if is_done {
                break;
            }
            skip += page_size;
        }
    }
}

fn filter_external(page: Vec<Asset>, is_external: Option<bool>) -> Vec<Asset> {
    match is_external {
        Some(wanted) => page
            .into_iter()
            .filter(|a| is_external_asset(a) == wanted)
            .collect(),
        None => page,
    }
}

fn asset_job_payload(ids: &[&str], job: AssetJob) -> Value {
    let name: &'static str = job.into();
    json!({ "name": name, "assetIds": ids })
}

// The buffer is borrowed for the decode only and the decoded image owns its pixels.
fn decode_image(content_type: &str, data: &[u8]) -> Result<DynamicImage, String> {
    if !content_type.contains("image/") {
        return Err(format!("not an image: {content_type}"));
    }
    image::load_from_memory(data).map_err(|_| "unrecognized image data".to_string())
}
