use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Uniform success body: `{success: true, message, data}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

/// Uniform failure body: `{success: false, message, error?}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
        }
    }

    pub fn with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(detail.into()),
        }
    }
}

pub type Envelope<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn ok<T>(message: impl Into<String>, data: T) -> Envelope<T> {
    with_status(StatusCode::OK, message, data)
}

pub fn created<T>(message: impl Into<String>, data: T) -> Envelope<T> {
    with_status(StatusCode::CREATED, message, data)
}

fn with_status<T>(status: StatusCode, message: impl Into<String>, data: T) -> Envelope<T> {
    (
        status,
        Json(ApiResponse {
            success: true,
            message: message.into(),
            data,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_data_is_still_serialized() {
        let (status, Json(body)) = ok("Logged out", ());
        assert_eq!(status, StatusCode::OK);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("data").is_some());
        assert!(json["data"].is_null());
    }

    #[test]
    fn error_body_omits_empty_detail() {
        let json = serde_json::to_value(ErrorBody::new("User already exists")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "User already exists"}));
    }
}
