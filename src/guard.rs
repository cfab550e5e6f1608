//! 基于角色的路由守卫
//!
//! 表驱动：每个角色有一张禁止路径前缀表，命中即重定向到该角色的
//! 专属面板。决策函数是纯函数，路由服务在每次导航和相关状态变化
//! 时调用它并执行结果。
//!
//! 规则优先级（见 [`decide`]）：
//! 1. 未水合 -> 暂不决策（避免刷新时误判未登录闪跳）
//! 2. 未登录访问受保护前缀 -> 登录页
//! 3. 未知角色 -> 一律拒绝，重定向登录页（显式决策：不做 fail-open）
//! 4. 已登录访问登录页 -> 自己的面板
//! 5. 通用 `/dashboard` -> 角色专属面板
//! 6. 根路径 `/` 与租户落地页对非顾客角色 -> 面板（预览模式除外）
//! 7. 角色禁止表命中 -> 面板（预览模式放宽顾客侧路径）

use laundrylobby_shared::role::Role;

use crate::log_warn;
use crate::web::route::AppRoute;

#[cfg(test)]
mod tests;

/// 守卫决策
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 放行，渲染目标页面
    Allow,
    /// 重定向到指定路径，当前帧不渲染子组件
    Redirect(&'static str),
    /// 会话尚未水合，等待后重新评估
    Pending,
}

/// 守卫评估所需的会话快照
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    pub hydrated: bool,
    pub role: Option<Role>,
}

/// 登录页路径，亦是所有认证失败的重定向目标
pub const LOGIN_PATH: &str = "/auth/login";

/// 通用面板别名，访问时换成角色专属面板
const GENERIC_DASHBOARD: &str = "/dashboard";

/// 需要登录才能访问的路径前缀
const PROTECTED_PREFIXES: &[&str] = &[
    "/superadmin",
    "/admin",
    "/center-admin",
    "/branch-admin",
    "/staff",
    "/customer",
    "/dashboard",
];

/// 顾客侧（对外）路径前缀；预览模式对特权角色放宽这些前缀
const CUSTOMER_FACING_PREFIXES: &[&str] = &["/customer", "/pricing", "/help", "/auth"];

/// 各角色的禁止路径前缀表
fn denied_prefixes(role: &Role) -> &'static [&'static str] {
    match role {
        Role::SuperAdmin => &[
            "/admin",
            "/center-admin",
            "/branch-admin",
            "/staff",
            "/customer",
            "/pricing",
            "/help",
        ],
        Role::CenterAdmin => &[
            "/superadmin",
            "/branch-admin",
            "/staff",
            "/customer",
            "/pricing",
            "/help",
        ],
        Role::BranchAdmin => &[
            "/superadmin",
            "/admin",
            "/center-admin",
            "/staff",
            "/customer",
            "/pricing",
            "/help",
        ],
        Role::Support => &[
            "/superadmin",
            "/admin",
            "/center-admin",
            "/branch-admin",
            "/customer",
            "/pricing",
            "/help",
        ],
        Role::Customer => &[
            "/admin",
            "/center-admin",
            "/branch-admin",
            "/staff",
            "/superadmin",
        ],
        Role::Unknown(_) => &[],
    }
}

/// 路径前缀匹配：精确相等，或在段边界上的前缀
///
/// `/admin` 命中 `/admin` 和 `/admin/users`，不命中 `/administrator`。
fn path_has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path_has_prefix(path, prefix))
}

/// 单段非保留路径是租户品牌落地页，与根落地页同属顾客侧
fn is_tenant_landing(path: &str) -> bool {
    matches!(AppRoute::from_path(path), AppRoute::TenantLanding(_))
}

fn is_customer_facing(path: &str) -> bool {
    path == "/"
        || is_tenant_landing(path)
        || CUSTOMER_FACING_PREFIXES
            .iter()
            .any(|prefix| path_has_prefix(path, prefix))
}

/// 守卫决策函数（纯函数）
pub fn decide(path: &str, auth: &AuthSnapshot, preview_enabled: bool) -> GuardDecision {
    // 1. 等待水合完成再评估
    if !auth.hydrated {
        return GuardDecision::Pending;
    }

    let Some(role) = &auth.role else {
        // 2. 未登录：受保护前缀一律引导到登录页，公开页面放行
        if is_protected(path) {
            return GuardDecision::Redirect(LOGIN_PATH);
        }
        return GuardDecision::Allow;
    };

    // 3. 未知角色按拒绝处理；登录页本身放行，用户才有机会重新认证
    if let Role::Unknown(name) = role {
        if path_has_prefix(path, "/auth") {
            return GuardDecision::Allow;
        }
        log_warn!("[Guard] unknown role '{}', denying all routes.", name);
        return GuardDecision::Redirect(LOGIN_PATH);
    }

    let preview_active = preview_enabled && role.is_privileged();

    // 4. 已登录不再停留在登录页（预览模式下浏览对外页面除外）
    if path_has_prefix(path, "/auth") && !preview_active {
        return GuardDecision::Redirect(role.dashboard_path());
    }

    // 5. 通用 /dashboard 换成角色专属面板
    if path_has_prefix(path, GENERIC_DASHBOARD) {
        return GuardDecision::Redirect(role.dashboard_path());
    }

    // 6. 根路径与租户品牌落地页都是顾客侧页面，非顾客角色除预览外不停留
    if path == "/" || is_tenant_landing(path) {
        if *role == Role::Customer || preview_active {
            return GuardDecision::Allow;
        }
        return GuardDecision::Redirect(role.dashboard_path());
    }

    // 7. 角色禁止表
    for prefix in denied_prefixes(role) {
        if path_has_prefix(path, prefix) {
            if preview_active && is_customer_facing(path) {
                continue;
            }
            return GuardDecision::Redirect(role.dashboard_path());
        }
    }

    GuardDecision::Allow
}
