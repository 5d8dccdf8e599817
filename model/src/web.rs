/// Request/reply shapes shared between the web API and anything that talks
/// to it. Every reply carries `success` plus whatever payload the endpoint
/// produces.

use serde::{
    Deserialize,
    Serialize,
};

use crate::{ActivityKind, AssetDescriptor, PresenceConfig};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiReply {
    pub success: bool,
    pub message: String,
}

impl ApiReply {
    pub fn ok<S: Into<String>>(message: S) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn err<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ConfigReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub config: PresenceConfig,
}

impl ConfigReply {
    pub fn new(config: PresenceConfig) -> Self {
        Self {
            success: true,
            message: None,
            config,
        }
    }

    pub fn with_message<S: Into<String>>(config: PresenceConfig, message: S) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            config,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StatusReply {
    pub success: bool,
    pub connected: bool,
    pub user: Option<String>,
    pub enabled: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AssetsReply {
    pub success: bool,
    pub assets: Vec<AssetDescriptor>,
}

/// Body of POST /api/quickset: the handful of fields worth setting in one
/// shot. Omitted fields keep their stored values.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuickSetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_kind: Option<ActivityKind>,
}
