use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MARKETPLACE_URL: &str = "https://www.facebook.com";

/// Every bounded wait the engine performs
///
/// Values are read and written as milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Default wait before interacting with an element
    #[serde(with = "millis")]
    pub element: Duration,
    /// Probe for optional controls that only some layouts show
    #[serde(with = "millis")]
    pub probe: Duration,
    /// Wait for a title to show up in "search your listings"
    #[serde(with = "millis")]
    pub search_result: Duration,
    /// Wait for the listing overlay to close after a delete
    #[serde(with = "millis")]
    pub deletion: Duration,
    /// Wait for the publish control to go away after publishing
    #[serde(with = "millis")]
    pub publish: Duration,
    /// Wait for the "Shared to your group" confirmation
    #[serde(with = "millis")]
    pub share_confirmation: Duration,
    /// Wait for the operator to finish signing in
    #[serde(with = "millis")]
    pub login: Duration,
    /// Delay between element polls
    #[serde(with = "millis")]
    pub poll_interval: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            element: Duration::from_secs(10),
            probe: Duration::from_secs(3),
            search_result: Duration::from_secs(10),
            deletion: Duration::from_secs(30),
            publish: Duration::from_secs(30),
            share_confirmation: Duration::from_secs(10),
            login: Duration::from_secs(300),
            poll_interval: Duration::from_millis(250),
        }
    }
}

impl Timeouts {
    /// Tiny timeouts for tests that exercise absent elements
    pub fn immediate() -> Self {
        let tick = Duration::from_millis(1);
        Self {
            element: tick,
            probe: tick,
            search_result: tick,
            deletion: tick,
            publish: tick,
            share_confirmation: tick,
            login: tick,
            poll_interval: tick,
        }
    }
}

/// Run settings, optionally read from a JSON config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Marketplace site the session signs in to
    pub marketplace_url: String,
    pub timeouts: Timeouts,
    /// Chrome binary to use instead of the platform defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,
    /// Persistent profile name holding the signed-in session
    pub profile: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            marketplace_url: DEFAULT_MARKETPLACE_URL.to_string(),
            timeouts: Timeouts::default(),
            chrome_path: None,
            profile: "default".to_string(),
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Reading settings from: {}", path.display());
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
