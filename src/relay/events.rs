//! Outbound control messages sent by the relay itself

use serde::{Deserialize, Serialize};

use crate::error::RelayResult;

/// Greeting sent once to every new connection
pub const WELCOME_TEXT: &str = "Connected to Minecraft-Roblox relay server!";

/// Prompt sent to producers when a rescan is requested
pub const SCAN_REQUEST_TEXT: &str = "Please send a full scan of your data";

/// Relay-originated messages, tagged by `type`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlMessage {
    /// Sent on connect
    Welcome { message: String },
    /// Sent to producers only
    ScanRequest { message: String },
}

impl ControlMessage {
    pub fn welcome() -> Self {
        ControlMessage::Welcome {
            message: WELCOME_TEXT.to_string(),
        }
    }

    pub fn scan_request() -> Self {
        ControlMessage::ScanRequest {
            message: SCAN_REQUEST_TEXT.to_string(),
        }
    }

    /// Encode as a JSON text frame
    pub fn to_json(&self) -> RelayResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_welcome_serialization() {
        let json = ControlMessage::welcome().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "welcome");
        assert_eq!(value["message"], WELCOME_TEXT);
    }

    #[test]
    fn test_scan_request_serialization() {
        let json = ControlMessage::scan_request().to_json().unwrap();
        assert!(json.contains(r#""type":"scan_request""#));
    }

    #[test]
    fn test_control_message_parsing() {
        let json = r#"{"type":"scan_request","message":"go"}"#;
        let msg: ControlMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ControlMessage::ScanRequest { .. }));
    }
}
