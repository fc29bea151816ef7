//! # Emergency Feed
//!
//! Read-only access to the emergency request collection. The database that
//! owns these records sits behind `EmergencyFeed`; this crate never writes
//! to it.
//!
//! Payloads are either a bare JSON array of requests or an object with an
//! `emergencies` array. Records that fail to parse are skipped with a
//! warning so one bad entry does not hide the rest.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;

use crate::core::emergency::EmergencyRequest;

const BUNDLED_EMERGENCIES: &str = include_str!("../../data/emergencies.json");

#[derive(Debug)]
pub enum FeedError {
    Network(String),
    Http { status: u16, message: String },
    Io(std::io::Error),
    Parse(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "network error: {msg}"),
            FeedError::Http { status, message } => {
                write!(f, "feed error (HTTP {status}): {message}")
            }
            FeedError::Io(e) => write!(f, "feed I/O error: {e}"),
            FeedError::Parse(msg) => write!(f, "feed parse error: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

#[async_trait]
pub trait EmergencyFeed: Send + Sync {
    /// Returns the name of the feed, for logs and the status line.
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<EmergencyRequest>, FeedError>;
}

/// Extracts requests from a feed payload.
pub fn parse_records(value: Value) -> Result<Vec<EmergencyRequest>, FeedError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("emergencies") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(FeedError::Parse(
                    "expected an array or an object with an `emergencies` array".to_string(),
                ));
            }
        },
        _ => return Err(FeedError::Parse("feed payload is not JSON array or object".to_string())),
    };

    let total = items.len();
    let records: Vec<EmergencyRequest> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping emergency record #{}: {}", i, e);
                None
            }
        })
        .collect();
    debug!("Parsed {}/{} emergency records", records.len(), total);
    Ok(records)
}

pub fn parse_records_str(json: &str) -> Result<Vec<EmergencyRequest>, FeedError> {
    let value: Value = serde_json::from_str(json).map_err(|e| FeedError::Parse(e.to_string()))?;
    parse_records(value)
}

// ============================================================================
// Implementations
// ============================================================================

pub struct HttpFeed {
    url: String,
    client: reqwest::Client,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EmergencyFeed for HttpFeed {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> Result<Vec<EmergencyRequest>, FeedError> {
        info!("Fetching emergencies from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Emergency feed error: {} - {}", status, message);
            return Err(FeedError::Http { status, message });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;
        parse_records(value)
    }
}

pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EmergencyFeed for FileFeed {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<Vec<EmergencyRequest>, FeedError> {
        info!("Reading emergencies from {}", self.path.display());
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(FeedError::Io)?;
        parse_records_str(&json)
    }
}

/// Demo requests compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledFeed;

#[async_trait]
impl EmergencyFeed for BundledFeed {
    fn name(&self) -> &str {
        "bundled"
    }

    async fn fetch(&self) -> Result<Vec<EmergencyRequest>, FeedError> {
        parse_records_str(BUNDLED_EMERGENCIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emergency::{BloodType, Urgency};
    use crate::test_support::scratch_dir;
    use std::fs;

    #[test]
    fn test_parse_array_skips_invalid_records() {
        let json = r#"[
            {"bloodType": "O-", "urgency": "Critical", "location": "Kolkata"},
            {"bloodType": "Z+", "urgency": "High", "location": "Nowhere"},
            {"urgency": "Low", "location": "Missing type"},
            {"bloodType": "B+", "urgency": "Soon", "location": "Mysuru"}
        ]"#;
        let records = parse_records_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].blood_type, BloodType::ONeg);
        assert_eq!(records[1].urgency, Urgency::Other("Soon".to_string()));
    }

    #[test]
    fn test_parse_wrapped_object() {
        let json = r#"{"emergencies": [{"bloodType": "A+", "urgency": "Low", "location": "Pune"}]}"#;
        assert_eq!(parse_records_str(json).unwrap().len(), 1);
        assert!(matches!(
            parse_records_str(r#"{"items": []}"#),
            Err(FeedError::Parse(_))
        ));
        assert!(matches!(parse_records_str("42"), Err(FeedError::Parse(_))));
    }

    #[tokio::test]
    async fn test_bundled_feed_is_valid() {
        let records = BundledFeed.fetch().await.unwrap();
        assert!(records.len() >= 6);
        assert!(records.iter().any(|r| r.urgency == Urgency::Critical));
    }

    #[tokio::test]
    async fn test_file_feed() {
        let dir = scratch_dir("feed");
        let path = dir.join("emergencies.json");
        fs::write(
            &path,
            r#"[{"bloodType": "AB+", "urgency": "Medium", "location": "Kochi"}]"#,
        )
        .unwrap();
        let records = FileFeed::new(&path).fetch().await.unwrap();
        assert_eq!(records[0].location, "Kochi");

        let missing = FileFeed::new(dir.join("absent.json")).fetch().await;
        assert!(matches!(missing, Err(FeedError::Io(_))));
    }
}
