use serde::{Deserialize, Serialize};

pub mod permission;
pub mod protocol;
pub mod realtime;
pub mod role;
pub mod template;
pub mod tenant;
pub mod watermark;

use permission::{FeatureFlags, PermissionSet};
use role::Role;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 平台根域名，租户以子域名形式挂载在其下
pub const ROOT_DOMAIN: &str = "laundrylobby.com";

/// Bearer Token 的 HTTP 头名称
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 当前登录用户的完整档案
///
/// 由 `/auth/profile` 返回。`permissions` / `features` / `tenancy_id`
/// 是权限同步层的同步目标，只能整体替换，不能逐项修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub permissions: PermissionSet,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub tenancy_id: Option<String>,
}

/// 客户端横幅广告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: String,
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub link_url: Option<String>,
}
