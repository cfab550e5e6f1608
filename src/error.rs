//! 前端错误类型
//!
//! 高内聚的错误定义：状态语义 + 消息 + 操作追踪栈。
//! 边界函数（如权限刷新）不把该类型泄漏给 UI，而是收敛成布尔或枚举结果。

use std::fmt;

use crate::web::HttpError;

/// 错误状态枚举，标注错误的语义类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorStatus {
    /// 网络层失败（含请求中止）
    Network,
    /// 服务端返回非 2xx 状态码
    Http,
    /// 401：令牌缺失或过期
    Unauthorized,
    /// 服务端信封 `success:false`
    Rejected,
    /// 响应体无法解析
    Decode,
}

impl ApiErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorStatus::Network => "NETWORK_ERROR",
            ApiErrorStatus::Http => "HTTP_ERROR",
            ApiErrorStatus::Unauthorized => "UNAUTHORIZED",
            ApiErrorStatus::Rejected => "REQUEST_REJECTED",
            ApiErrorStatus::Decode => "DECODE_ERROR",
        }
    }
}

/// API 调用错误
#[derive(Debug)]
pub struct ApiError {
    pub status: ApiErrorStatus,
    message: String,
    /// HTTP 状态码（仅 Http/Unauthorized 携带）
    http_status: Option<u16>,
    /// 操作追踪栈，如 "api.send" -> "profile"
    spans: Vec<String>,
}

impl ApiError {
    pub fn new(status: ApiErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            http_status: None,
            spans: Vec::new(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Network, message)
    }

    pub fn http(status: u16) -> Self {
        let mut e = Self::new(ApiErrorStatus::Http, format!("server returned {}", status));
        e.http_status = Some(status);
        e
    }

    pub fn unauthorized() -> Self {
        let mut e = Self::new(ApiErrorStatus::Unauthorized, "token missing or expired");
        e.http_status = Some(401);
        e
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Rejected, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Decode, message)
    }

    /// 添加操作追踪
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(operation.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == ApiErrorStatus::Unauthorized
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.error_code(), self.message)?;
        if !self.spans.is_empty() {
            write!(f, " | trace: {}", self.spans.join(" -> "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Network(msg) => ApiError::network(msg),
            HttpError::BuildFailed(msg) => ApiError::network(msg),
            HttpError::Parse(msg) => ApiError::decode(msg),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_trace() {
        let e = ApiError::http(503).in_op("api.send").in_op("profile");
        let text = e.to_string();
        assert!(text.starts_with("[HTTP_ERROR]"));
        assert!(text.contains("api.send -> profile"));
        assert_eq!(e.http_status(), Some(503));
    }

    #[test]
    fn unauthorized_is_distinguishable() {
        assert!(ApiError::unauthorized().is_unauthorized());
        assert!(!ApiError::http(500).is_unauthorized());
    }
}
