/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum ImmichError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("Client not found")]
    ClientNotFound(),

    #[error("API Response was error: {0}, msg: {1}")]
    ApiResponse(u16, String),

    #[error("Timestamp '{0}' does not match format %Y-%m-%dT%H:%M:%S.%fZ")]
    InvalidTimestamp(String),

    #[error("Download failed for asset: {0}. {1}")]
    DownloadFailed(String, String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}
