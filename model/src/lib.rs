use serde::{
    Serialize,
    Deserialize,
};

use std::fmt;

pub mod web;

/// The activity kinds the platform accepts. Anything else is rejected
/// before it reaches the config file.
#[derive(Clone, Copy, Serialize, Eq, PartialEq, Deserialize, Debug)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Playing,
    Streaming,
    Listening,
    Watching,
    Competing,
}

impl Default for ActivityKind {
    fn default() -> Self {
        ActivityKind::Playing
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ret = match self {
            ActivityKind::Playing   => "PLAYING",
            ActivityKind::Streaming => "STREAMING",
            ActivityKind::Listening => "LISTENING",
            ActivityKind::Watching  => "WATCHING",
            ActivityKind::Competing => "COMPETING",
        };

        write!(f, "{}", ret)
    }
}

/// The persisted presence configuration. One instance, file-backed, merged
/// key-by-key on every write. Keys absent from the file fall back to the
/// Default instance below.
#[derive(Clone, Serialize, Eq, PartialEq, Deserialize, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct PresenceConfig {
    pub enabled: bool,
    pub application_id: Option<String>,
    pub activity_kind: ActivityKind,
    pub name: Option<String>,
    pub details: Option<String>,
    pub state: Option<String>,
    pub large_image_key: Option<String>,
    pub large_image_text: Option<String>,
    pub small_image_key: Option<String>,
    pub small_image_text: Option<String>,
    pub button1_text: Option<String>,
    pub button1_url: Option<String>,
    pub button2_text: Option<String>,
    pub button2_url: Option<String>,
    pub start_timestamp: bool,
    pub party_size: Option<u64>,
    pub party_max: Option<u64>,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            application_id: None,
            activity_kind: ActivityKind::default(),
            name: Some("Custom Status".to_string()),
            details: None,
            state: None,
            large_image_key: None,
            large_image_text: None,
            small_image_key: None,
            small_image_text: None,
            button1_text: None,
            button1_url: None,
            button2_text: None,
            button2_url: None,
            start_timestamp: false,
            party_size: None,
            party_max: None,
        }
    }
}

fn scrub(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

impl PresenceConfig {
    /// Collapse empty-string fields to unset. Runs before every persist so
    /// the file never carries `""` where it means "no value".
    pub fn normalized(&self) -> Self {
        Self {
            application_id: scrub(&self.application_id),
            name: scrub(&self.name),
            details: scrub(&self.details),
            state: scrub(&self.state),
            large_image_key: scrub(&self.large_image_key),
            large_image_text: scrub(&self.large_image_text),
            small_image_key: scrub(&self.small_image_key),
            small_image_text: scrub(&self.small_image_text),
            button1_text: scrub(&self.button1_text),
            button1_url: scrub(&self.button1_url),
            button2_text: scrub(&self.button2_text),
            button2_url: scrub(&self.button2_url),
            ..self.clone()
        }
    }

    /// Wire names of the fields that must be set before the presence can be
    /// enabled, for use in rejection messages.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.application_id.is_none() {
            missing.push("applicationId");
        }
        if self.name.is_none() {
            missing.push("name");
        }

        missing
    }
}

/// One button on the activity card.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PresenceButton {
    pub label: String,
    pub url: String,
}

/// Party occupancy shown on the activity card.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PresenceParty {
    pub id: String,
    pub current: u64,
    pub max: u64,
}

/// The assembled activity, built fresh from a PresenceConfig on every apply.
/// Never persisted.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PresencePayload {
    pub application_id: String,
    pub name: String,
    pub kind: ActivityKind,
    pub url: Option<String>,
    pub details: Option<String>,
    pub state: Option<String>,
    pub large_image: Option<String>,
    pub large_text: Option<String>,
    pub small_image: Option<String>,
    pub small_text: Option<String>,
    pub buttons: Vec<PresenceButton>,
    pub party: Option<PresenceParty>,
    pub start: Option<u64>,
}

/// One row of an application's uploaded asset catalogue.
#[derive(Clone, Serialize, Eq, PartialEq, Deserialize, Debug)]
pub struct AssetDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
}
