/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate immich;

use anyhow::Result;
use dotenvy::dotenv;
use immich::{Album, Asset, Client};

// Downloads a handful of random assets and reports what was decoded.
// Videos and other non-image assets are skipped.
async fn download_random_images(client: &Client, count: u32) -> Result<Vec<Asset>> {
    let mut downloaded = Vec::new();
    for asset in client.get_random(count).await? {
        match asset.download().await {
            Ok(image) => {
                println!(
                    "Downloaded {}\tsize: {}x{}",
                    asset,
                    image.width(),
                    image.height()
                );
                downloaded.push(asset);
            }
            Err(err) => println!("Skipping {}: {}", asset, err),
        }
    }
    Ok(downloaded)
}

// Puts the assets into the named album, creating it for the current user if needed.
async fn collect_into_album(client: &Client, album_name: &str, assets: &[Asset]) -> Result<()> {
    if assets.is_empty() {
        return Ok(());
    }
    let album = match client.get_album_by_name(album_name, None).await? {
        Some(album) => album,
        None => {
            let me = client.get_my_user().await?;
            client.create_album(album_name, &[me.id.as_str()]).await?;
            client
                .get_album_by_name(album_name, None)
                .await?
                .ok_or_else(|| anyhow::anyhow!("album {album_name} was not created"))?
        }
    };

    let ids: Vec<&str> = assets.iter().map(|a| a.id.as_str()).collect();
    album.add_assets(&ids).await?;
    println!("Added {} assets to {}", ids.len(), album);
    print_album(client, &album.id).await
}

async fn print_album(client: &Client, id: &str) -> Result<()> {
    let album: Option<Album> = client.get_album(Some(id)).await?;
    if let Some(album) = album {
        println!(
            "Album {} now has {} assets",
            album.album_name,
            album.asset_count.unwrap_or_default()
        );
    }
    Ok(())
}

// main
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    // IMMICH_BASE_URL and IMMICH_API_KEY. The API key is created in the user settings.
    let client = Client::from_env()?;

    let downloaded = download_random_images(&client, 5).await?;
    collect_into_album(&client, "Random picks", &downloaded).await?;
    Ok(())
}
