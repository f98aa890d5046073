/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::api::ResponseCode;
use crate::errors::ImmichError;
use crate::macros::client_debug;
use crate::{Client, JobCommand, JobName};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Status of one job queue
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    #[serde(default)]
    pub job_counts: JobCounts,

    #[serde(default)]
    pub queue_status: QueueStatus,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct JobCounts {
    pub active: u64,
    pub completed: u64,
    pub failed: u64,
    pub delayed: u64,
    pub waiting: u64,
    pub paused: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct QueueStatus {
    pub is_active: bool,
    pub is_paused: bool,
}

impl JobStatus {
    const BASE_URI: &'static str = "/api/jobs";

    /// Status of every job queue, keyed by job name
    pub async fn all(client: Client) -> Result<BTreeMap<String, JobStatus>, ImmichError> {
        client_debug!(client.logger(), "Get all jobs status");
        client
            .api()
            .get::<BTreeMap<String, JobStatus>>(Self::BASE_URI, None)
            .await
    }

    /// Status of a single queue, picked out of the full listing
    pub async fn for_job(client: Client, name: JobName) -> Result<Option<JobStatus>, ImmichError> {
        client_debug!(client.logger(), "Get job status with name : {}", name);
        let mut all = Self::all(client).await?;
        Ok(all.remove(<&str>::from(name)))
    }

    /// Starts the queue for `name`. Nothing is sent when there is no name.
    pub async fn send_command(
        client: Client,
        name: Option<JobName>,
        force: bool,
    ) -> Result<Option<JobStatus>, ImmichError> {
        client_debug!(client.logger(), "Send job command with job_command : {:?}", name);
        let Some(name) = name else {
            return Ok(None);
        };
        Self::send_command_with(client, name, JobCommand::Start, force)
            .await
            .map(Some)
    }

    /// Sends any command to the queue for `name`
    pub async fn send_command_with(
        client: Client,
        name: JobName,
        command: JobCommand,
        force: bool,
    ) -> Result<JobStatus, ImmichError> {
        let path = format!("{}/{}", Self::BASE_URI, name);
        let data = serde_json::to_vec(&command_payload(command, force))?;
        let status: JobStatus = client
            .api()
            .send_json(Method::PUT, &path, data, &[ResponseCode::Ok])
            .await?;
        client_debug!(client.logger(), "Send job command : {:?}", status);
        Ok(status)
    }
}

fn command_payload(command: JobCommand, force: bool) -> Value {
    let command: &'static str = command.into();
    json!({ "command": command, "force": force })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_payload() {
        assert_eq!(
            command_payload(JobCommand::default(), false),
            json!({"command": "start", "force": false})
        );
        assert_eq!(
            command_payload(JobCommand::ClearFailed, true),
            json!({"command": "clear-failed", "force": true})
        );
    }

    #[test]
    fn statuses_parse_by_name() {
        let all: BTreeMap<String, JobStatus> = serde_json::from_value(json!({
            "sidecar": {
                "jobCounts": {"active": 1, "completed": 2, "failed": 0, "delayed": 0, "waiting": 3, "paused": 0},
                "queueStatus": {"isActive": true, "isPaused": false}
            },
            "library": {
                "jobCounts": {"active": 0, "completed": 0, "failed": 0, "delayed": 0, "waiting": 0},
                "queueStatus": {"isActive": false, "isPaused": true}
            }
        }))
        .unwrap();

        let sidecar = &all[<&str>::from(JobName::Sidecar)];
        assert_eq!(sidecar.job_counts.waiting, 3);
        assert!(sidecar.queue_status.is_active);
        assert!(all["library"].queue_status.is_paused);
        assert_eq!(all["library"].job_counts.paused, 0);
    }
}
