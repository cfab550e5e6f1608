//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 的轻量客户端。请求可以绑定一个 [`AbortGuard`]，
//! guard 被 drop 时浏览器会中止仍在途的请求，避免慢响应在调用方
//! 已经销毁之后才返回。

use laundrylobby_shared::protocol::HttpMethod;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

fn method_name(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
        HttpMethod::Put => "PUT",
        HttpMethod::Delete => "DELETE",
    }
}

/// HTTP 错误类型
#[derive(Debug)]
pub enum HttpError {
    /// 请求构建失败
    BuildFailed(String),
    /// 网络层失败（含请求被中止）
    Network(String),
    /// 响应体读取/解析失败
    Parse(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::BuildFailed(msg) => write!(f, "request build failed: {}", msg),
            HttpError::Network(msg) => write!(f, "network error: {}", msg),
            HttpError::Parse(msg) => write!(f, "response parse failed: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// 中止句柄：drop 时中止所有绑定到它的在途请求
pub struct AbortGuard {
    controller: Option<AbortController>,
}

impl AbortGuard {
    pub fn new() -> Self {
        Self {
            controller: AbortController::new().ok(),
        }
    }

    /// 绑定到该句柄的中止信号；调用方把信号交给在途请求，
    /// 句柄自身留在组件作用域里，组件卸载即中止
    pub fn signal(&self) -> Option<web_sys::AbortSignal> {
        self.controller.as_ref().map(|c| c.signal())
    }
}

impl Default for AbortGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AbortGuard {
    fn drop(&mut self) {
        if let Some(controller) = self.controller.take() {
            controller.abort();
        }
    }
}

/// HTTP 响应封装
pub struct HttpResponse {
    inner: Response,
}

impl HttpResponse {
    pub fn status(&self) -> u16 {
        self.inner.status()
    }

    /// 响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        self.inner.ok()
    }

    /// 读取响应体文本
    pub async fn text(self) -> Result<String, HttpError> {
        let promise = self
            .inner
            .text()
            .map_err(|e| HttpError::Parse(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::Parse(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| HttpError::Parse("body is not a string".to_string()))
    }
}

/// HTTP 请求构建器
pub struct HttpRequestBuilder {
    url: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
    body: Option<String>,
    signal: Option<web_sys::AbortSignal>,
}

impl HttpRequestBuilder {
    fn new(url: String, method: HttpMethod) -> Self {
        Self {
            url,
            method,
            headers: Vec::new(),
            body: None,
            signal: None,
        }
    }

    /// 添加请求头
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置 JSON 请求体
    pub fn json_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        self
    }

    /// 绑定中止信号
    pub fn abort_signal(mut self, signal: Option<web_sys::AbortSignal>) -> Self {
        self.signal = signal;
        self
    }

    /// 发送请求
    pub async fn send(self) -> Result<HttpResponse, HttpError> {
        let headers =
            Headers::new().map_err(|e| HttpError::BuildFailed(format!("headers: {:?}", e)))?;
        for (key, value) in &self.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::BuildFailed(format!("header {}: {:?}", key, e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(method_name(self.method));
        opts.set_headers(&headers.into());
        if let Some(body) = &self.body {
            opts.set_body(&JsValue::from_str(body));
        }
        if let Some(signal) = &self.signal {
            opts.set_signal(Some(signal));
        }

        let request = Request::new_with_str_and_init(&self.url, &opts)
            .map_err(|e| HttpError::BuildFailed(format!("{:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| HttpError::Network("window object unavailable".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| HttpError::Network(format!("{:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::Parse(format!("not a Response: {:?}", e)))?;

        Ok(HttpResponse { inner: response })
    }
}

/// 轻量级 HTTP 客户端
pub struct HttpClient;

impl HttpClient {
    pub fn request(method: HttpMethod, url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url.to_string(), method)
    }

    pub fn get(url: &str) -> HttpRequestBuilder {
        Self::request(HttpMethod::Get, url)
    }

    pub fn post(url: &str) -> HttpRequestBuilder {
        Self::request(HttpMethod::Post, url)
    }
}
