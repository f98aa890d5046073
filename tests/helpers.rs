/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use immich::{Client, ClientConfig};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub(crate) const ALBUM_KEYS: &[&str] = &[
    "albumName",
    "description",
    "albumThumbnailAssetId",
    "createdAt",
    "updatedAt",
    "id",
    "ownerId",
    "owner",
    "albumUsers",
    "shared",
    "hasSharedLink",
    "startDate",
    "endDate",
    "assets",
    "assetCount",
    "isActivityEnabled",
    "order",
];

pub(crate) const USER_KEYS: &[&str] = &["id", "email", "name", "profileImagePath", "avatarColor"];

pub(crate) const ASSET_KEYS: &[&str] = &[
    "id",
    "deviceAssetId",
    "ownerId",
    "deviceId",
    "libraryId",
    "type",
    "originalPath",
    "originalFileName",
    "thumbhash",
    "fileCreatedAt",
    "fileModifiedAt",
    "localDateTime",
    "updatedAt",
    "isFavorite",
    "isArchived",
    "isTrashed",
    "duration",
    "checksum",
    "isOffline",
    "hasMetadata",
];

// Client for the server named in .env (IMMICH_BASE_URL / IMMICH_API_KEY)
#[allow(dead_code)]
pub(crate) fn live_client() -> anyhow::Result<Client> {
    dotenvy::dotenv().ok();
    let _ = env_logger::builder().is_test(true).try_init();
    Ok(Client::with_config(ClientConfig::from_env()?)?)
}

// Client pointed at a port nothing listens on
#[allow(dead_code)]
pub(crate) fn offline_client() -> Client {
    Client::with_config(
        ClientConfig::new("http://127.0.0.1:9", "ABCDEFGHIJKLMNOPQRZTUVWXYZ0123456789")
            .log_level(LevelFilter::Off),
    )
    .unwrap()
}

#[allow(dead_code)]
pub(crate) fn assert_has_keys<T: Serialize>(obj: &T, keys: &[&str]) {
    let value = serde_json::to_value(obj).unwrap();
    let map = value.as_object().expect("expected a JSON object");
    for key in keys {
        assert!(map.contains_key(*key), "missing key '{}' in {}", key, value);
    }
}

// What the fake server answers, in order, one reply per connection
#[allow(dead_code)]
pub(crate) struct Reply {
    pub(crate) status: u16,
    pub(crate) content_type: &'static str,
    pub(crate) body: Vec<u8>,
    // Bytes announced in Content-Length but never sent
    pub(crate) missing: usize,
}

#[allow(dead_code)]
impl Reply {
    pub(crate) fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
            missing: 0,
        }
    }

    pub(crate) fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
            missing: 0,
        }
    }

    pub(crate) fn empty(status: u16) -> Self {
        Self::text(status, "")
    }

    pub(crate) fn truncated(status: u16, body: &str, missing: usize) -> Self {
        Self {
            missing,
            ..Self::text(status, body)
        }
    }
}

// A request as the fake server saw it
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub(crate) struct Seen {
    pub(crate) request_line: String,
    pub(crate) body: String,
}

#[allow(dead_code)]
impl Seen {
    pub(crate) fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

// Loopback server answering with `replies` and recording what it was sent
#[allow(dead_code)]
pub(crate) struct FakeServer {
    pub(crate) client: Client,
    seen: Arc<Mutex<Vec<Seen>>>,
}

#[allow(dead_code)]
impl FakeServer {
    pub(crate) async fn start(replies: Vec<Reply>) -> Self {
        Self::start_with(replies, |config| config).await
    }

    pub(crate) async fn start_with(
        replies: Vec<Reply>,
        configure: impl FnOnce(ClientConfig) -> ClientConfig,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let recorder = seen.clone();
        tokio::spawn(async move {
            for reply in replies {
                let (mut stream, _) = listener.accept().await.unwrap();
                let request = read_request(&mut stream).await;
                recorder.lock().unwrap().push(request);
                write_reply(&mut stream, &reply).await;
            }
        });

        let config =
            ClientConfig::new(&format!("http://{addr}"), "ABCDEFGHIJKLMNOPQRZTUVWXYZ0123456789")
                .log_level(LevelFilter::Off);
        let client = Client::with_config(configure(config)).unwrap();
        Self { client, seen }
    }

    pub(crate) fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

#[allow(dead_code)]
async fn read_request(stream: &mut TcpStream) -> Seen {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the request headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .map(|(_, value)| value.trim().parse::<usize>().unwrap())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the request body");
        buf.extend_from_slice(&chunk[..n]);
    }

    Seen {
        request_line: head.lines().next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string(),
    }
}

#[allow(dead_code)]
async fn write_reply(stream: &mut TcpStream, reply: &Reply) {
    let head = format!(
        "HTTP/1.1 {} Fake\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reply.status,
        reply.content_type,
        reply.body.len() + reply.missing
    );
    stream.write_all(head.as_bytes()).await.unwrap();
    stream.write_all(&reply.body).await.unwrap();
    let _ = stream.shutdown().await;
}

// Keeps every record a client emits
#[allow(dead_code)]
#[derive(Default)]
pub(crate) struct CaptureLogger {
    pub(crate) lines: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.lines
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}
