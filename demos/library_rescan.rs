/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate immich;

use anyhow::Result;
use chrono::{Duration, Utc};
use dotenvy::dotenv;
use immich::{AssetJob, Client, JobName, LibraryType};

// main
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    let client = Client::from_env()?;

    // Rescan every external library, picking up modified files as well as new ones
    for library in client.get_libraries(Some(LibraryType::External)).await? {
        println!("Scanning library {}", library);
        library.scan(None, Some(true)).await?;
        library.remove_offline_files().await?;
    }

    // Regenerate thumbnails for external assets touched in the last week
    let since = Utc::now() - Duration::days(7);
    let recent = client.get_assets(Some(true), Some(since.into())).await?;
    println!("{} external assets changed since {}", recent.len(), since);
    if !recent.is_empty() {
        let ids: Vec<&str> = recent.iter().map(|a| a.id.as_str()).collect();
        client.run_asset_jobs(&ids, AssetJob::RegenerateThumbnail).await?;
    }

    // Kick off the library queue and report where it stands
    if let Some(status) = client.send_job_command(Some(JobName::Library), false).await? {
        println!(
            "Library queue active: {}, waiting: {}",
            status.queue_status.is_active, status.job_counts.waiting
        );
    }
    Ok(())
}
