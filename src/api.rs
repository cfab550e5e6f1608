//! 平台 API 客户端
//!
//! 在 `web::http` 之上实现对 `ApiRequest` 协议的泛型发送：
//! 方法、路径、响应类型都由请求类型自己描述，这里只负责
//! 组装 URL、携带令牌、拆信封和集中处理 401。

use std::rc::Rc;

use laundrylobby_shared::protocol::{
    ApiRequest, BannerClickRequest, BannerImpressionRequest, BannerListRequest, BannerPage,
    Envelope, HttpMethod, LoginData, LoginRequest, PermissionStatus, PermissionStatusRequest,
    ProfileRequest, TenantBrandingRequest,
};
use laundrylobby_shared::tenant::TenantContext;
use laundrylobby_shared::watermark::Watermark;
use laundrylobby_shared::UserProfile;

use crate::error::{ApiError, ApiResult};
use crate::web::HttpClient;

/// API 客户端
///
/// 克隆成本低（内部只有字符串和 Rc），每个需要发请求的地方
/// 都可以拿一份自己的副本。
#[derive(Clone)]
pub struct LobbyApi {
    base_url: String,
    token: Option<String>,
    /// 401 集中处理钩子：由会话层注入"清除会话"动作，
    /// 各调用点不必各自实现 logout-on-401
    on_unauthorized: Option<Rc<dyn Fn()>>,
}

impl LobbyApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
            on_unauthorized: None,
        }
    }

    /// 携带 Bearer 令牌的副本
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 注入 401 处理钩子
    pub fn with_unauthorized_hook(mut self, hook: Rc<dyn Fn()>) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送请求并取出信封中的 `data`
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let envelope = self.exchange(req, None).await?;
        envelope
            .data
            .ok_or_else(|| ApiError::decode("envelope has no data").in_op(req.path()))
    }

    /// 发送请求并取出 `data`，在途期间绑定中止信号
    pub async fn send_aborting<R: ApiRequest>(
        &self,
        req: &R,
        signal: Option<web_sys::AbortSignal>,
    ) -> ApiResult<R::Response> {
        let envelope = self.exchange(req, signal).await?;
        envelope
            .data
            .ok_or_else(|| ApiError::decode("envelope has no data").in_op(req.path()))
    }

    /// 发送请求，只关心信封的 `success`，忽略 `data`
    ///
    /// 用于打点类端点（曝光、点击），服务端成功时不一定返回数据。
    pub async fn send_ok<R: ApiRequest>(&self, req: &R) -> ApiResult<()> {
        self.exchange(req, None).await?;
        Ok(())
    }

    async fn exchange<R: ApiRequest>(
        &self,
        req: &R,
        signal: Option<web_sys::AbortSignal>,
    ) -> ApiResult<Envelope<R::Response>> {
        let path = req.path();
        let mut builder = HttpClient::request(R::METHOD, &self.url(&path));

        if matches!(R::METHOD, HttpMethod::Post | HttpMethod::Put) {
            let body = serde_json::to_string(req).map_err(|e| ApiError::from(e).in_op(path.as_str()))?;
            builder = builder.json_body(body);
        }
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
        builder = builder.abort_signal(signal);

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::from(e).in_op(path.as_str()))?;

        if response.status() == 401 {
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return Err(ApiError::unauthorized().in_op(path));
        }
        if !response.ok() {
            return Err(ApiError::http(response.status()).in_op(path));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from(e).in_op(path.as_str()))?;
        let envelope: Envelope<R::Response> =
            serde_json::from_str(&text).map_err(|e| ApiError::from(e).in_op(path.as_str()))?;

        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "request rejected".to_string());
            return Err(ApiError::rejected(message).in_op(path));
        }
        Ok(envelope)
    }

    // =========================================================
    // 具体端点
    // =========================================================

    /// 登录
    pub async fn login(&self, req: &LoginRequest) -> ApiResult<LoginData> {
        self.send(req).await
    }

    /// 拉取当前用户档案（含权限、功能开关、租户归属）
    pub async fn profile(&self) -> ApiResult<UserProfile> {
        self.send(&ProfileRequest).await
    }

    /// 询问水位线之后是否有权限变更
    pub async fn permission_status(&self, since: Watermark) -> ApiResult<PermissionStatus> {
        self.send(&PermissionStatusRequest { since }).await
    }

    /// 拉取租户品牌信息；404 或 `success:false` 都按"租户不存在"处理
    pub async fn tenant_branding(
        &self,
        slug: &str,
        signal: Option<web_sys::AbortSignal>,
    ) -> ApiResult<TenantContext> {
        self.send_aborting(
            &TenantBrandingRequest {
                slug: slug.to_string(),
            },
            signal,
        )
        .await
    }

    /// 顾客横幅列表
    pub async fn banners(&self, page: u32, limit: u32) -> ApiResult<BannerPage> {
        self.send(&BannerListRequest { page, limit }).await
    }

    /// 横幅曝光打点
    pub async fn banner_impression(&self, id: &str) -> ApiResult<()> {
        self.send_ok(&BannerImpressionRequest { id: id.to_string() })
            .await
    }

    /// 横幅点击打点
    pub async fn banner_click(&self, id: &str) -> ApiResult<()> {
        self.send_ok(&BannerClickRequest { id: id.to_string() })
            .await
    }
}
