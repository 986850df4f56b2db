//! Request DTOs for the admin API

use serde::Deserialize;
use serde_json::Value;

/// Request body for `PUT /cache/:key`
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The value to store, any JSON
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<f64>,
}

impl SetRequest {
    /// Validates the request against the key it targets.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        match self.ttl {
            Some(ttl) if !ttl.is_finite() || ttl <= 0.0 => {
                Some(format!("TTL must be a positive number of seconds, got {}", ttl))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"value": {"title": "Akira", "year": 1988}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, json!({"title": "Akira", "year": 1988}));
        assert!(req.ttl.is_none());
    }

    #[test]
    fn test_set_request_with_ttl() {
        let json = r#"{"value": "hello", "ttl": 0.5}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl, Some(0.5));
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            value: json!("test"),
            ttl: None,
        };
        assert!(req.validate("").is_some());
        assert!(req.validate("anime:1").is_none());
    }

    #[test]
    fn test_validate_ttl() {
        let req = SetRequest {
            value: json!(1),
            ttl: Some(0.0),
        };
        assert!(req.validate("k").is_some());

        let req = SetRequest {
            value: json!(1),
            ttl: Some(60.0),
        };
        assert!(req.validate("k").is_none());
    }
}
