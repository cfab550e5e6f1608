//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM。只负责 URL path 与页面的映射；
//! 能否停留在某个页面由 `guard` 模块决定，这里不重复判断。

use laundrylobby_shared::tenant::is_valid_slug;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 平台/租户落地页
    #[default]
    Landing,
    /// 以租户品牌渲染的落地页（`/{slug}`）
    TenantLanding(String),
    /// 登录页
    Login,
    /// 价格页
    Pricing,
    /// 帮助页
    Help,
    /// 各角色的控制面板
    SuperAdminDashboard,
    AdminDashboard,
    BranchDashboard,
    StaffDashboard,
    CustomerDashboard,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.split('?').next().unwrap_or(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Landing,
            ["auth", "login"] | ["auth"] => Self::Login,
            ["pricing", ..] => Self::Pricing,
            ["help", ..] => Self::Help,
            ["superadmin", ..] => Self::SuperAdminDashboard,
            ["admin", ..] => Self::AdminDashboard,
            ["center-admin", ..] => Self::AdminDashboard,
            ["branch-admin", ..] => Self::BranchDashboard,
            ["staff", ..] => Self::StaffDashboard,
            ["customer", ..] => Self::CustomerDashboard,
            [slug] if is_valid_slug(slug) => Self::TenantLanding(slug.to_string()),
            _ => Self::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_map_to_pages() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Landing);
        assert_eq!(AppRoute::from_path("/auth/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/pricing"), AppRoute::Pricing);
        assert_eq!(
            AppRoute::from_path("/admin/dashboard"),
            AppRoute::AdminDashboard
        );
        assert_eq!(
            AppRoute::from_path("/customer/orders"),
            AppRoute::CustomerDashboard
        );
    }

    #[test]
    fn single_unreserved_segment_is_a_tenant_landing() {
        assert_eq!(
            AppRoute::from_path("/acme"),
            AppRoute::TenantLanding("acme".to_string())
        );
        // reserved segments are their own pages, never tenants
        assert_eq!(AppRoute::from_path("/pricing"), AppRoute::Pricing);
    }

    #[test]
    fn query_strings_are_ignored() {
        assert_eq!(AppRoute::from_path("/pricing?plan=pro"), AppRoute::Pricing);
    }

    #[test]
    fn garbage_paths_are_not_found() {
        assert_eq!(AppRoute::from_path("/no/such/page"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/Not-A-Slug!"), AppRoute::NotFound);
    }
}
