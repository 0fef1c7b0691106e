//! OneDrive API error codes and the remote error type.

use serde::Deserialize;
use thiserror::Error;

/// OneDrive API error codes, as reported in the `error.code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Access denied
    AccessDenied,
    /// App made too many requests
    ActivityLimitReached,
    /// Unspecified server error
    GeneralException,
    /// Range header not satisfiable
    InvalidRange,
    /// Malformed or incorrect request
    InvalidRequest,
    /// Item does not exist
    ItemNotFound,
    /// Malware detected in the content
    MalwareDetected,
    /// Name already exists at the target location
    NameAlreadyExists,
    /// Action not allowed
    NotAllowed,
    /// Request not supported
    NotSupported,
    /// Item changed since the caller last read it
    ResourceModified,
    /// Delta token no longer valid
    ResyncRequired,
    /// Service temporarily unavailable
    ServiceNotAvailable,
    /// Storage quota exceeded
    QuotaLimitReached,
    /// Caller is not authenticated
    Unauthenticated,
    /// Unknown error
    Unknown,
}

impl From<&str> for ApiErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "accessDenied" => ApiErrorCode::AccessDenied,
            "activityLimitReached" => ApiErrorCode::ActivityLimitReached,
            "generalException" => ApiErrorCode::GeneralException,
            "invalidRange" => ApiErrorCode::InvalidRange,
            "invalidRequest" => ApiErrorCode::InvalidRequest,
            "itemNotFound" => ApiErrorCode::ItemNotFound,
            "malwareDetected" => ApiErrorCode::MalwareDetected,
            "nameAlreadyExists" => ApiErrorCode::NameAlreadyExists,
            "notAllowed" => ApiErrorCode::NotAllowed,
            "notSupported" => ApiErrorCode::NotSupported,
            "resourceModified" => ApiErrorCode::ResourceModified,
            "resyncRequired" => ApiErrorCode::ResyncRequired,
            "serviceNotAvailable" => ApiErrorCode::ServiceNotAvailable,
            "quotaLimitReached" => ApiErrorCode::QuotaLimitReached,
            "unauthenticated" => ApiErrorCode::Unauthenticated,
            _ => ApiErrorCode::Unknown,
        }
    }
}

impl ApiErrorCode {
    /// Get human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ApiErrorCode::AccessDenied => "Access denied",
            ApiErrorCode::ActivityLimitReached => "Activity limit reached",
            ApiErrorCode::GeneralException => "General exception",
            ApiErrorCode::InvalidRange => "Invalid range",
            ApiErrorCode::InvalidRequest => "Invalid request",
            ApiErrorCode::ItemNotFound => "Item not found",
            ApiErrorCode::MalwareDetected => "Malware detected",
            ApiErrorCode::NameAlreadyExists => "Name already exists",
            ApiErrorCode::NotAllowed => "Not allowed",
            ApiErrorCode::NotSupported => "Not supported",
            ApiErrorCode::ResourceModified => "Resource modified",
            ApiErrorCode::ResyncRequired => "Resync required",
            ApiErrorCode::ServiceNotAvailable => "Service not available",
            ApiErrorCode::QuotaLimitReached => "Quota limit reached",
            ApiErrorCode::Unauthenticated => "Unauthenticated",
            ApiErrorCode::Unknown => "Unknown error",
        }
    }
}

/// Error returned by an [`ItemApi`](crate::api::ItemApi) implementation.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Service answered with a non-success status.
    #[error("HTTP {status} ({}): {message}", .code.description())]
    Status {
        status: u16,
        code: ApiErrorCode,
        message: String,
    },

    /// Network request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file error while staging a transfer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed endpoint URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Path cannot be expressed as an API address.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Credential provider could not supply a token.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid or unexpected response from server.
    #[error("Invalid response from server")]
    InvalidResponse,
}

impl ApiError {
    /// Build a status error from a response body in the
    /// `{"error": {"code": ..., "message": ...}}` shape.
    ///
    /// Bodies that do not parse still produce an error carrying the status.
    pub fn from_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            error: Body,
        }

        #[derive(Deserialize)]
        struct Body {
            code: String,
            #[serde(default)]
            message: String,
        }

        match serde_json::from_str::<Envelope>(body) {
            Ok(envelope) => ApiError::Status {
                status,
                code: ApiErrorCode::from(envelope.error.code.as_str()),
                message: envelope.error.message,
            },
            Err(_) => ApiError::Status {
                status,
                code: ApiErrorCode::Unknown,
                message: body.chars().take(200).collect(),
            },
        }
    }

    /// Check if the remote system reported the item as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status: 404, .. }
                | ApiError::Status {
                    code: ApiErrorCode::ItemNotFound,
                    ..
                }
        )
    }

    /// Check if the request collided with an existing item.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status: 409, .. }
                | ApiError::Status {
                    code: ApiErrorCode::NameAlreadyExists,
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_conversion() {
        assert_eq!(ApiErrorCode::from("accessDenied"), ApiErrorCode::AccessDenied);
        assert_eq!(ApiErrorCode::from("itemNotFound"), ApiErrorCode::ItemNotFound);
        assert_eq!(
            ApiErrorCode::from("nameAlreadyExists"),
            ApiErrorCode::NameAlreadyExists
        );
        assert_eq!(
            ApiErrorCode::from("quotaLimitReached"),
            ApiErrorCode::QuotaLimitReached
        );
        assert_eq!(ApiErrorCode::from("somethingNew"), ApiErrorCode::Unknown);
    }

    #[test]
    fn test_error_code_descriptions() {
        assert_eq!(ApiErrorCode::ItemNotFound.description(), "Item not found");
        assert_eq!(ApiErrorCode::AccessDenied.description(), "Access denied");
        assert_eq!(ApiErrorCode::Unknown.description(), "Unknown error");
    }

    #[test]
    fn test_from_body_parses_envelope() {
        let err = ApiError::from_body(
            404,
            r#"{"error":{"code":"itemNotFound","message":"The resource could not be found."}}"#,
        );
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
        match err {
            ApiError::Status { code, message, .. } => {
                assert_eq!(code, ApiErrorCode::ItemNotFound);
                assert_eq!(message, "The resource could not be found.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_body_tolerates_garbage() {
        let err = ApiError::from_body(502, "<html>Bad gateway</html>");
        match err {
            ApiError::Status { status, code, .. } => {
                assert_eq!(status, 502);
                assert_eq!(code, ApiErrorCode::Unknown);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_body_unreadable_body_keeps_status() {
        let err = ApiError::from_body(503, "");
        match err {
            ApiError::Status {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 503);
                assert_eq!(code, ApiErrorCode::Unknown);
                assert!(message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_conflict_detection() {
        let by_status = ApiError::from_body(409, "");
        assert!(by_status.is_conflict());

        let by_code = ApiError::from_body(
            400,
            r#"{"error":{"code":"nameAlreadyExists","message":"x"}}"#,
        );
        assert!(by_code.is_conflict());
        assert!(!by_code.is_not_found());
    }
}
