/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Background job queues on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, IntoStaticStr, Display)]
#[strum(serialize_all = "camelCase")]
pub enum JobName {
    ThumbnailGeneration,
    MetadataExtraction,
    VideoConversion,
    FaceDetection,
    FacialRecognition,
    SmartSearch,
    BackgroundTask,
    StorageTemplateMigration,
    Migration,
    Search,
    Sidecar,
    Library,
    Notifications,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum JobCommand {
    #[default]
    Start,
    Pause,
    Resume,
    Empty,
    ClearFailed,
}

/// Jobs that can be run against specific assets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum AssetJob {
    #[default]
    RegenerateThumbnail,
    RefreshMetadata,
    TranscodeVideo,
}

/// Library types the server filters on. Types this client does not know are read as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, IntoStaticStr, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LibraryType {
    Upload,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, IntoStaticStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlbumUserRole {
    Unknown,
    Editor,
    Viewer,
}
