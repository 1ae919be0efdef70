use leptos::*;
use serde::Deserialize;
use serde_json::Value;

use super::types::ApiError;

pub const MSG_TIMEOUT: &str = "请求超时，请稍后重试";
pub const MSG_NETWORK: &str = "网络连接失败，请检查网络设置";
pub const MSG_FORBIDDEN: &str = "权限不足，无法访问该资源";
pub const MSG_RATE_LIMITED: &str = "请求过于频繁，请稍后重试";
pub const MSG_FALLBACK: &str = "请求失败";

/// Fixed status → message table shown when the body carries no message.
pub fn status_message(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("请求参数错误"),
        401 => Some("未授权，请重新登录"),
        403 => Some("拒绝访问"),
        404 => Some("请求的资源不存在"),
        408 => Some("请求超时"),
        500 => Some("服务器内部错误"),
        502 => Some("网关错误"),
        503 => Some("服务不可用"),
        504 => Some("网关超时"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Network,
    Timeout,
    Client,
    Server,
    Validation,
    Decode,
    Unknown,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

fn body_message(body: &ErrorBody) -> Option<String> {
    let detail = body.detail.as_ref().and_then(|value| match value {
        Value::String(text) => Some(text.clone()),
        _ => None,
    });
    body.message
        .clone()
        .or(detail)
        .or_else(|| body.error.clone())
        .filter(|text| !text.trim().is_empty())
}

fn status_code(status: u16) -> &'static str {
    match status {
        401 => "UNAUTHORIZED",
        403 => "FORBIDDEN",
        404 => "NOT_FOUND",
        408 => "TIMEOUT",
        429 => "RATE_LIMITED",
        400..=499 => "CLIENT_ERROR",
        _ => "SERVER_ERROR",
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            status: None,
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            status: None,
            details: None,
        }
    }

    pub fn network() -> Self {
        Self {
            error: MSG_NETWORK.to_string(),
            code: "NETWORK_ERROR".to_string(),
            status: None,
            details: None,
        }
    }

    pub fn timeout() -> Self {
        Self {
            error: MSG_TIMEOUT.to_string(),
            code: "TIMEOUT".to_string(),
            status: None,
            details: None,
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self {
            error: MSG_FALLBACK.to_string(),
            code: "DECODE_ERROR".to_string(),
            status: None,
            details: Some(Value::String(msg.into())),
        }
    }

    /// Builds the error for a non-2xx response.
    ///
    /// The body's own message wins; 403 and 429 use their dedicated copy;
    /// otherwise the status table applies, then the generic fallback.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<ErrorBody>(body).ok();
        let message = match status {
            403 => Some(MSG_FORBIDDEN.to_string()),
            429 => Some(MSG_RATE_LIMITED.to_string()),
            _ => None,
        }
        .or_else(|| parsed.as_ref().and_then(body_message))
        .or_else(|| status_message(status).map(str::to_string))
        .unwrap_or_else(|| MSG_FALLBACK.to_string());
        let code = parsed
            .as_ref()
            .and_then(|body| body.code.clone())
            .unwrap_or_else(|| status_code(status).to_string());
        let details = parsed.and_then(|body| body.detail).filter(|d| !d.is_string());
        Self {
            error: message,
            code,
            status: Some(status),
            details,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match (self.status, self.code.as_str()) {
            (Some(status), _) if status >= 500 => ErrorClass::Server,
            (Some(408), _) | (None, "TIMEOUT") => ErrorClass::Timeout,
            (Some(_), _) => ErrorClass::Client,
            (None, "NETWORK_ERROR") => ErrorClass::Network,
            (None, "VALIDATION_ERROR") => ErrorClass::Validation,
            (None, "DECODE_ERROR") => ErrorClass::Decode,
            _ => ErrorClass::Unknown,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// Whether the HTTP pipeline has already shown this error to the user.
    pub fn reported_by_client(&self) -> bool {
        matches!(
            self.class(),
            ErrorClass::Network | ErrorClass::Timeout | ErrorClass::Client | ErrorClass::Server
        )
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn body_message_wins_over_status_table() {
        let error = ApiError::from_status(400, &body(json!({ "message": "工号已存在" })));
        assert_eq!(error.error, "工号已存在");
        assert_eq!(error.status, Some(400));
        assert_eq!(error.class(), ErrorClass::Client);
    }

    #[test]
    fn fastapi_detail_string_is_used_as_message() {
        let error = ApiError::from_status(404, &body(json!({ "detail": "Schedule not found" })));
        assert_eq!(error.error, "Schedule not found");
        assert_eq!(error.code, "NOT_FOUND");
    }

    #[test]
    fn falls_back_to_status_table_then_generic_message() {
        assert_eq!(ApiError::from_status(502, b"").error, "网关错误");
        assert_eq!(ApiError::from_status(418, b"not json").error, MSG_FALLBACK);
        assert_eq!(ApiError::from_status(503, b"").class(), ErrorClass::Server);
    }

    #[test]
    fn forbidden_and_rate_limited_use_dedicated_copy() {
        let forbidden = ApiError::from_status(403, &body(json!({ "message": "nope" })));
        assert_eq!(forbidden.error, MSG_FORBIDDEN);
        assert_eq!(ApiError::from_status(429, b"").error, MSG_RATE_LIMITED);
    }

    #[test]
    fn classifies_transport_failures() {
        assert_eq!(ApiError::timeout().class(), ErrorClass::Timeout);
        assert_eq!(ApiError::network().class(), ErrorClass::Network);
        assert_eq!(ApiError::validation("x").class(), ErrorClass::Validation);
        assert!(ApiError::from_status(401, b"").is_unauthorized());
    }

    #[test]
    fn only_pipeline_errors_count_as_reported() {
        assert!(ApiError::from_status(500, b"").reported_by_client());
        assert!(ApiError::timeout().reported_by_client());
        assert!(!ApiError::validation("x").reported_by_client());
        assert!(!ApiError::decode("bad json").reported_by_client());
        assert!(!ApiError::unknown("boom").reported_by_client());
    }
}
