use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Liveness classification of a single URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// A 2xx response was obtained
    Alive,
    /// The URL answered with a failing status, or failed in the prober
    Dead,
    /// The URL was rejected before any request was made
    Invalid,
    /// Every attempt failed without a single HTTP response
    Error,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Alive => "alive",
            LinkStatus::Dead => "dead",
            LinkStatus::Invalid => "invalid",
            LinkStatus::Error => "error",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking one URL.
///
/// `status_code` is only present when an HTTP response was actually received,
/// so a transport failure and a failing response stay distinguishable even
/// when both are classified as [`LinkStatus::Dead`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivenessResult {
    pub status: LinkStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LivenessResult {
    /// A 2xx response was received.
    pub fn alive(status_code: u16) -> Self {
        Self {
            status: LinkStatus::Alive,
            status_code: Some(status_code),
            description: None,
        }
    }

    /// A failing response was received, or `None` when nothing answered.
    pub fn dead(status_code: Option<u16>) -> Self {
        Self {
            status: LinkStatus::Dead,
            status_code,
            description: None,
        }
    }

    pub fn invalid() -> Self {
        Self {
            status: LinkStatus::Invalid,
            status_code: None,
            description: None,
        }
    }

    /// No response was ever obtained.
    pub fn error(description: Option<String>) -> Self {
        Self {
            status: LinkStatus::Error,
            status_code: None,
            description,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_alive(&self) -> bool {
        self.status == LinkStatus::Alive
    }

    pub fn is_not_alive(&self) -> bool {
        !self.is_alive()
    }

    /// Whether an HTTP response was received for this URL.
    pub fn has_response(&self) -> bool {
        self.status_code.is_some()
    }
}

impl fmt::Display for LivenessResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.status_code, &self.description) {
            (Some(code), _) => write!(f, "{} ({code})", self.status),
            (None, Some(desc)) => write!(f, "{} - {desc}", self.status),
            (None, None) => write!(f, "{}", self.status),
        }
    }
}

/// Mapping from every literal input URL to its result.
pub type ResultMap = HashMap<String, LivenessResult>;

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_liveness_result__when_alive__is_alive() {
        let result = LivenessResult::alive(200);

        assert!(result.is_alive());
        assert!(!result.is_not_alive());
        assert!(result.has_response());
    }

    #[test]
    fn test_liveness_result__when_dead_without_response__has_no_status_code() {
        let result = LivenessResult::dead(None);

        assert!(result.is_not_alive());
        assert!(!result.has_response());
        assert_eq!(result.status_code, None);
    }

    #[test]
    fn test_liveness_result__when_invalid__has_nothing_else() {
        let result = LivenessResult::invalid();

        assert_eq!(result.status, LinkStatus::Invalid);
        assert_eq!(result.status_code, None);
        assert_eq!(result.description, None);
    }

    #[test]
    fn test_liveness_result__to_string() {
        assert_eq!(LivenessResult::alive(200).to_string(), "alive (200)");
        assert_eq!(LivenessResult::dead(Some(404)).to_string(), "dead (404)");
        assert_eq!(
            LivenessResult::error(Some("connection refused".into())).to_string(),
            "error - connection refused"
        );
        assert_eq!(LivenessResult::invalid().to_string(), "invalid");
    }

    #[test]
    fn test_liveness_result__serializes_like_the_wire_format() -> serde_json::Result<()> {
        let alive = serde_json::to_value(LivenessResult::alive(200))?;
        assert_eq!(
            alive,
            serde_json::json!({ "status": "alive", "statusCode": 200 })
        );

        let invalid = serde_json::to_value(LivenessResult::invalid())?;
        assert_eq!(invalid, serde_json::json!({ "status": "invalid" }));

        let error = serde_json::to_value(LivenessResult::error(Some("dns".into())))?;
        assert_eq!(
            error,
            serde_json::json!({ "status": "error", "description": "dns" })
        );
        Ok(())
    }

    #[test]
    fn test_liveness_result__deserializes_without_optional_fields() -> serde_json::Result<()> {
        let result: LivenessResult = serde_json::from_str(r#"{"status":"dead"}"#)?;

        assert_eq!(result, LivenessResult::dead(None));
        Ok(())
    }

    #[test]
    fn test_link_status__display() {
        assert_eq!(LinkStatus::Alive.to_string(), "alive");
        assert_eq!(LinkStatus::Dead.to_string(), "dead");
        assert_eq!(LinkStatus::Invalid.to_string(), "invalid");
        assert_eq!(LinkStatus::Error.to_string(), "error");
    }
}
