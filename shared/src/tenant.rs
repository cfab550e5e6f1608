//! 租户模型与租户标识解析
//!
//! 解析是纯函数：给定主机名、URL 路径和可选的历史记录值，
//! 按固定优先级推导出唯一的租户 slug。持久化等副作用由前端包装层负责。

use serde::{Deserialize, Serialize};

use crate::ROOT_DOMAIN;
use crate::template::LandingTemplate;

#[cfg(test)]
mod tests;

// =========================================================
// 领域模型
// =========================================================

/// 租户上下文，由 `/public/tenancy/branding/{slug}` 返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantContext {
    pub slug: String,
    pub business_name: String,
    #[serde(default)]
    pub branding: TenantBranding,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

/// 租户品牌配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TenantBranding {
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub secondary_color: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// 落地页模板名，原始字符串，展示前经 `LandingTemplate::from_name` 归一化
    #[serde(default)]
    pub landing_template: Option<String>,
}

impl TenantBranding {
    /// 归一化后的落地页模板
    pub fn template(&self) -> LandingTemplate {
        self.landing_template
            .as_deref()
            .map(LandingTemplate::from_name)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

// =========================================================
// 租户标识解析
// =========================================================

/// 基础设施占用的子域名，永远不会解析为租户
const RESERVED_SUBDOMAINS: &[&str] = &["www", "app", "api", "admin", "staging", "preview", "mail"];

/// 路由占用的首段路径，不能作为租户 slug
const RESERVED_PATH_SEGMENTS: &[&str] = &[
    "auth",
    "admin",
    "superadmin",
    "center-admin",
    "branch-admin",
    "staff",
    "customer",
    "dashboard",
    "pricing",
    "help",
    "public",
    "assets",
    "api",
];

/// 预览部署平台的域名后缀，其上的部署不绑定租户
const PREVIEW_DOMAIN_SUFFIXES: &[&str] = &[".pages.dev", ".vercel.app", ".netlify.app"];

/// 从主机名和路径解析租户 slug
///
/// 优先级：
/// 1. 平台根域名下的子域名（`acme.laundrylobby.com` -> `acme`）
/// 2. 第一个非保留路径段（`/acme/pricing` -> `acme`）
/// 3. 调用方传入的历史记录值（通常来自 sessionStorage）
///
/// 任何信号都不匹配时返回 `None`。纯函数，同样的输入永远得到同样的结果。
pub fn resolve_slug(hostname: &str, path: &str, stored: Option<&str>) -> Option<String> {
    if let Some(slug) = slug_from_hostname(hostname) {
        return Some(slug);
    }
    if let Some(slug) = slug_from_path(path) {
        return Some(slug);
    }
    stored
        .map(str::trim)
        .filter(|s| is_valid_slug(s))
        .map(str::to_string)
}

fn slug_from_hostname(hostname: &str) -> Option<String> {
    let hostname = hostname.trim().trim_end_matches('.').to_ascii_lowercase();

    // localhost、裸 IP、预览部署域名即使层级足够也不解析
    if hostname == "localhost" || hostname.ends_with(".localhost") || is_ipv4(&hostname) {
        return None;
    }
    if PREVIEW_DOMAIN_SUFFIXES
        .iter()
        .any(|suffix| hostname.ends_with(suffix))
    {
        return None;
    }

    // 必须是根域名下至少三级的域名：<slug>.laundrylobby.com
    let suffix = format!(".{}", ROOT_DOMAIN);
    let prefix = hostname.strip_suffix(&suffix)?;
    if prefix.is_empty() || prefix.contains('.') {
        // 根域名本身或更深的多级子域名都不是租户
        return None;
    }
    if RESERVED_SUBDOMAINS.contains(&prefix) {
        return None;
    }
    is_valid_slug(prefix).then(|| prefix.to_string())
}

fn slug_from_path(path: &str) -> Option<String> {
    let first = path.split('/').find(|segment| !segment.is_empty())?;
    let first = first.to_ascii_lowercase();
    if RESERVED_PATH_SEGMENTS.contains(&first.as_str()) {
        return None;
    }
    is_valid_slug(&first).then_some(first)
}

fn is_ipv4(hostname: &str) -> bool {
    let mut parts = 0;
    for part in hostname.split('.') {
        if part.parse::<u8>().is_err() {
            return false;
        }
        parts += 1;
    }
    parts == 4
}

/// slug 合法字符：小写字母、数字、中划线，且不以中划线开头/结尾
pub fn is_valid_slug(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
