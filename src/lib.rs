/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Immich
//!
//! Client library for the [Immich](https://immich.app) REST API.
//!
//! For further details on the Rest API refer to the [Immich API Docs](https://immich.app/docs/api)
//!
//! ## Features
//!
//! - Albums
//!     - List, look up by id or name
//!     - Create, delete and add assets
//! - Assets
//!     - Paged listing (as a `Vec` or a `Stream`), full sync, random picks
//!     - Download and decode originals, fetch thumbnails
//!     - Delete and run asset jobs
//! - Libraries: list, scan, remove offline files
//! - Jobs: queue status and commands
//! - Users: the authenticated user and lookups by id
//! - Lower level interface for handling the raw communication
//!
//! *Requests are authenticated with an API key created in the Immich user settings.*
//!
//! ## Usage
//!
//! ```rust,no_run
//! use immich::{Client, ClientConfig, ImmichError};
//! use std::time::Duration;
//!
//! async fn add_to_album(album_name: &str) -> Result<(), ImmichError> {
//!     let client = Client::with_config(
//!         ClientConfig::new("https://immich.mydomain.com", "api-key")
//!             .timeout(Duration::from_secs(30)),
//!     )?;
//!
//!     // Create the album if it is missing
//!     let me = client.get_my_user().await?;
//!     if client.get_album_by_name(album_name, None).await?.is_none() {
//!         client.create_album(album_name, &[me.id.as_str()]).await?;
//!     }
//!
//!     let Some(album) = client.get_album_by_name(album_name, None).await? else {
//!         return Ok(());
//!     };
//!     let picks = client.get_random(5).await?;
//!     let ids: Vec<&str> = picks.iter().map(|a| a.id.as_str()).collect();
//!     album.add_assets(&ids).await
//! }
//! ```
//!
//! Every operation returns a `Result`. Lookups that can legitimately find nothing return
//! `Ok(None)`; any failure from the server is an `Err` carrying the status code and body.
//!
pub mod album;
pub mod api;
pub mod asset;
pub mod client;
pub mod config;
pub mod errors;
pub mod job;
pub mod library;
pub mod logging;
mod macros;
mod parsers;
pub mod properties;
pub mod user;

pub use album::*;
pub use api::{ApiClient, ApiParams, RawBody, ResponseCode};
pub use asset::*;
pub use client::*;
pub use config::*;
pub use errors::*;
pub use job::*;
pub use library::*;
pub use parsers::Timestamp;
pub use properties::*;
pub use user::*;
