use thiserror::Error;

/// Failure of a single request against the helpdesk API.
///
/// Transport and decoding problems carry no status code; [`ApiError::status`]
/// returns `None` for them.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Network error: invalid response body: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("{}", http_message(.status, .body))]
    Http { status: u16, body: String },
}

impl ApiError {
    pub fn network(message: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::Network {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn decode(message: impl Into<String>, source: Option<serde_json::Error>) -> Self {
        ApiError::Decode {
            message: message.into(),
            source,
        }
    }

    /// HTTP status of the failed response, `None` when no response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decoding failures are reported as a kind of network error.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. } | ApiError::Decode { .. })
    }

    /// Short human-readable category used when reporting the error.
    pub fn category(&self) -> String {
        match self {
            ApiError::Http { status, .. } => status_category(*status),
            _ => "Network error".to_string(),
        }
    }
}

fn http_message(status: &u16, body: &str) -> String {
    format!("{}: {}", status_category(*status), body)
}

/// Maps an HTTP status code to the phrase shown to the user.
pub fn status_category(status: u16) -> String {
    match status {
        400 => "Bad request".to_string(),
        401 => "Unauthorized".to_string(),
        403 => "Forbidden".to_string(),
        404 => "Not found".to_string(),
        500 => "Internal server error".to_string(),
        502 => "Bad gateway".to_string(),
        503 => "Service unavailable".to_string(),
        504 => "Gateway timeout".to_string(),
        other => format!("HTTP {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_have_distinct_categories() {
        let codes = [400, 401, 403, 404, 500, 502, 503, 504];
        let mut phrases: Vec<String> = codes.iter().map(|c| status_category(*c)).collect();
        phrases.sort();
        phrases.dedup();
        assert_eq!(phrases.len(), codes.len());
        assert!(phrases.iter().all(|p| !p.starts_with("HTTP ")));
    }

    #[test]
    fn other_statuses_fall_back_to_generic_phrase() {
        assert_eq!(status_category(418), "HTTP 418");
        assert_eq!(status_category(409), "HTTP 409");
    }

    #[test]
    fn http_error_exposes_status_and_body() {
        let err = ApiError::Http {
            status: 404,
            body: "ticket 7 not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "Not found: ticket 7 not found");
    }

    #[test]
    fn decode_error_is_a_network_error_without_status() {
        let err = ApiError::decode("empty body", None);
        assert_eq!(err.status(), None);
        assert!(err.is_network());
        assert_eq!(err.category(), "Network error");
    }
}
