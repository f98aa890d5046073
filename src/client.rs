/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::errors::ImmichError;
use crate::logging::ClientLogger;
use crate::parsers::Timestamp;
use crate::{
    Album, Asset, AssetJob, FullSyncParams, JobName, JobStatus, Library, LibraryType, User,
};
use bytes::Bytes;
use image::DynamicImage;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Handle to an Immich server.
///
/// Cloning is cheap, every clone shares the same connection pool. Nothing is cached
/// between calls.
///
/// ```rust,no_run
/// # async fn run() -> Result<(), immich::ImmichError> {
/// let client = immich::Client::new("https://immich.mydomain.com", "api-key")?;
/// let me = client.get_my_user().await?;
/// println!("Logged in as {}", me.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api_client: Arc<ApiClient>,
}

impl Client {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ImmichError> {
        Self::with_config(ClientConfig::new(base_url, api_key))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, ImmichError> {
        Ok(Self {
            api_client: Arc::new(ApiClient::new(&config)?),
        })
    }

    /// Builds a client from `IMMICH_BASE_URL` and `IMMICH_API_KEY`
    pub fn from_env() -> Result<Self, ImmichError> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Lower level interface for making requests directly
    pub fn api(&self) -> &ApiClient {
        &self.api_client
    }

    pub(crate) fn logger(&self) -> &ClientLogger {
        &self.api_client.logger
    }

    // Albums

    pub async fn get_album(&self, id: Option<&str>) -> Result<Option<Album>, ImmichError> {
        Album::from_id(self.clone(), id).await
    }

    pub async fn get_albums(
        &self,
        asset_id: Option<&str>,
        shared: Option<bool>,
    ) -> Result<Vec<Album>, ImmichError> {
        Album::list(self.clone(), asset_id, shared).await
    }

    pub async fn get_album_by_name(
        &self,
        name: &str,
        albums: Option<Vec<Album>>,
    ) -> Result<Option<Album>, ImmichError> {
        Album::by_name(self.clone(), name, albums).await
    }

    pub async fn create_album(&self, name: &str, owner_ids: &[&str]) -> Result<(), ImmichError> {
        Album::create(self.clone(), name, owner_ids).await
    }

    pub async fn delete_album(&self, id: &str) -> Result<(), ImmichError> {
        Album::delete_with_client(self.clone(), id).await
    }

    pub async fn add_assets_to_album(&self, id: &str, asset_ids: &[&str]) -> Result<(), ImmichError> {
        Album::add_assets_with_client(self.clone(), id, asset_ids).await
    }

    // Assets

    pub async fn get_assets(
        &self,
        is_external: Option<bool>,
        updated_after: Option<Timestamp>,
    ) -> Result<Vec<Asset>, ImmichError> {
        Asset::list(self.clone(), is_external, updated_after).await
    }

    pub async fn get_full_sync_for_user(
        &self,
        user_id: &str,
        params: &FullSyncParams,
    ) -> Result<Vec<Asset>, ImmichError> {
        Asset::full_sync_for_user(self.clone(), user_id, params).await
    }

    pub async fn get_random(&self, count: u32) -> Result<Vec<Asset>, ImmichError> {
        Asset::random(self.clone(), count).await
    }

    pub async fn get_all_user_assets_by_device_id(
        &self,
        device_id: &str,
    ) -> Result<Vec<String>, ImmichError> {
        Asset::ids_by_device(self.clone(), device_id).await
    }

    pub async fn get_asset_info(&self, id: &str) -> Result<Option<Asset>, ImmichError> {
        Asset::from_id(self.clone(), id).await
    }

    pub async fn download_asset(&self, id: &str) -> Result<DynamicImage, ImmichError> {
        Asset::download_with_client(self.clone(), id).await
    }

    pub async fn view_asset(&self, id: &str) -> Result<Option<Bytes>, ImmichError> {
        Asset::thumbnail(self.clone(), id).await
    }

    pub async fn delete_assets(&self, ids: &[&str]) -> Result<(), ImmichError> {
        Asset::delete_many(self.clone(), ids).await
    }

    pub async fn run_asset_jobs(&self, ids: &[&str], job: AssetJob) -> Result<(), ImmichError> {
        Asset::run_jobs(self.clone(), ids, job).await
    }

    // Libraries

    pub async fn get_libraries(
        &self,
        library_type: Option<LibraryType>,
    ) -> Result<Vec<Library>, ImmichError> {
        Library::list(self.clone(), library_type).await
    }

    pub async fn scan_library(
        &self,
        id: &str,
        refresh_all_files: Option<bool>,
        refresh_modified_files: Option<bool>,
    ) -> Result<(), ImmichError> {
        Library::scan_with_client(self.clone(), id, refresh_all_files, refresh_modified_files).await
    }

    pub async fn remove_offline_files(&self, id: &str) -> Result<(), ImmichError> {
        Library::remove_offline_files_with_client(self.clone(), id).await
    }

    // Jobs

    pub async fn get_all_jobs_status(&self) -> Result<BTreeMap<String, JobStatus>, ImmichError> {
        JobStatus::all(self.clone()).await
    }

    pub async fn get_job_status(&self, name: JobName) -> Result<Option<JobStatus>, ImmichError> {
        JobStatus::for_job(self.clone(), name).await
    }

    pub async fn send_job_command(
        &self,
        name: Option<JobName>,
        force: bool,
    ) -> Result<Option<JobStatus>, ImmichError> {
        JobStatus::send_command(self.clone(), name, force).await
    }

    // Users

    pub async fn get_my_user(&self) -> Result<User, ImmichError> {
        User::me(self.clone()).await
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, ImmichError> {
        User::from_id(self.clone(), id).await
    }
}
