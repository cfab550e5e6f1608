//! 会话状态管理
//!
//! 持有当前登录用户、令牌与水合标志，通过 Context 在组件间共享。
//! 会话持久化到 localStorage，应用启动时由 [`init_session`] 重新水合；
//! `hydrated` 区分"尚未加载"与"已加载但未登录"，路由守卫在水合完成前
//! 不做任何重定向判断。
//!
//! [`apply_profile`] 是权限更新的唯一写入口：推送、手动刷新、轮询
//! 三条路径都汇聚到这里，整体替换 permissions/features/tenancy。

use std::rc::Rc;

use laundrylobby_shared::UserProfile;
use laundrylobby_shared::protocol::LoginRequest;
use laundrylobby_shared::role::Role;
use leptos::prelude::*;

use crate::api::LobbyApi;
use crate::config;
use crate::log_info;
use crate::web::LocalStorage;

/// 会话在 localStorage 中的固定键
const SESSION_STORAGE_KEY: &str = "laundrylobby_session";

/// 会话状态
#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SessionState {
    /// 当前用户档案（含角色、权限、功能开关、租户归属）
    pub user: Option<UserProfile>,
    /// Bearer 令牌
    pub token: Option<String>,
    /// 是否已从持久化存储完成水合
    #[serde(skip)]
    pub hydrated: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role.clone())
    }

    /// 用服务端档案整体替换本地缓存（权限更新的序列化点）
    ///
    /// 并发触发的多次更新以最后完成者为准，不做合并。
    pub fn apply_profile(&mut self, profile: UserProfile) {
        self.user = Some(profile);
    }

    /// 清空会话（保留水合标志）
    pub fn clear(&mut self) {
        self.user = None;
        self.token = None;
    }
}

/// 会话上下文：读写信号对
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    pub set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// 认证状态信号（供路由守卫注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

// =========================================================
// 持久化
// =========================================================

fn persist(state: &SessionState) {
    if state.is_authenticated() {
        if let Ok(json) = serde_json::to_string(state) {
            LocalStorage::set(SESSION_STORAGE_KEY, &json);
        }
    } else {
        LocalStorage::delete(SESSION_STORAGE_KEY);
    }
}

/// 从 localStorage 重新水合会话
///
/// 无论存储里有没有可用会话，结束时 `hydrated` 一定为 true。
/// 损坏的持久化内容直接丢弃。
pub fn init_session(ctx: &SessionContext) {
    let restored: Option<SessionState> = LocalStorage::get(SESSION_STORAGE_KEY)
        .and_then(|json| serde_json::from_str(&json).ok());
    if restored.is_none() {
        LocalStorage::delete(SESSION_STORAGE_KEY);
    }

    ctx.set_state.update(|state| {
        if let Some(stored) = restored {
            state.user = stored.user;
            state.token = stored.token;
        }
        state.hydrated = true;
    });
}

// =========================================================
// 会话操作
// =========================================================

/// 构造携带当前令牌的 API 客户端
///
/// 注入集中式 401 处理：令牌失效时清除会话（只清一次，避免
/// 多个在途请求同时 401 引发的重复登出），重定向由路由守卫
/// 的状态监听自动完成。
pub fn session_api(ctx: &SessionContext) -> Option<LobbyApi> {
    let token = ctx.state.get_untracked().token.clone()?;
    let state = ctx.state;
    let set_state = ctx.set_state;
    let hook: Rc<dyn Fn()> = Rc::new(move || {
        if state.get_untracked().is_authenticated() {
            log_info!("[Session] 401 received, clearing session.");
            set_state.update(|s| s.clear());
            LocalStorage::delete(SESSION_STORAGE_KEY);
        }
    });
    Some(
        LobbyApi::new(config::api_base_url())
            .with_token(token)
            .with_unauthorized_hook(hook),
    )
}

/// 登录并持久化会话
///
/// # Returns
/// 失败时返回用户可见的错误消息
pub async fn login(
    ctx: &SessionContext,
    email: String,
    password: String,
    tenancy: Option<String>,
) -> Result<(), String> {
    let api = LobbyApi::new(config::api_base_url());
    let request = LoginRequest {
        email,
        password,
        tenancy,
    };
    let data = api.login(&request).await.map_err(|e| e.message().to_string())?;

    ctx.set_state.update(|state| {
        state.user = Some(data.user);
        state.token = Some(data.token);
    });
    persist(&ctx.state.get_untracked());
    Ok(())
}

/// 注销并清除持久化会话
///
/// 不需要手动导航，路由守卫会监听会话状态变化并自动重定向。
pub fn logout(ctx: &SessionContext) {
    ctx.set_state.update(|state| state.clear());
    LocalStorage::delete(SESSION_STORAGE_KEY);
}

/// 用服务端档案更新会话并持久化（权限同步层的唯一写路径）
pub fn apply_profile(ctx: &SessionContext, profile: UserProfile) {
    ctx.set_state.update(|state| state.apply_profile(profile));
    persist(&ctx.state.get_untracked());
}

#[cfg(test)]
mod tests {
    use super::*;
    use laundrylobby_shared::permission::{FeatureFlags, PermissionSet};

    fn perms(json: &str) -> PermissionSet {
        serde_json::from_str(json).unwrap()
    }

    fn profile_with(permissions: PermissionSet, tenancy: Option<&str>) -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: "Dana".into(),
            email: "dana@example.com".into(),
            role: Role::CenterAdmin,
            permissions,
            features: FeatureFlags::default(),
            tenancy_id: tenancy.map(String::from),
        }
    }

    #[test]
    fn unhydrated_and_empty_are_distinct() {
        let state = SessionState::default();
        assert!(!state.hydrated);
        assert!(!state.is_authenticated());

        let mut hydrated = SessionState::default();
        hydrated.hydrated = true;
        assert!(hydrated.hydrated);
        assert!(!hydrated.is_authenticated());
    }

    #[test]
    fn apply_profile_replaces_permissions_atomically() {
        let old_perms = perms(r#"{"orders":{"read":true},"billing":{"read":true}}"#);

        let mut state = SessionState::default();
        state.apply_profile(profile_with(old_perms, Some("acme")));
        state.token = Some("tok".into());

        let new_perms = perms(r#"{"orders":{"read":true}}"#);
        state.apply_profile(profile_with(new_perms, Some("fresh")));

        let user = state.user.as_ref().unwrap();
        // 整体替换：被撤销的权限不会残留
        assert!(!user.permissions.allows("billing", "read"));
        assert!(user.permissions.allows("orders", "read"));
        assert_eq!(user.tenancy_id.as_deref(), Some("fresh"));
        // 令牌不受档案更新影响
        assert_eq!(state.token.as_deref(), Some("tok"));
    }

    #[test]
    fn concurrent_update_paths_converge() {
        // 推送、手动刷新、轮询三条路径都调用 apply_profile，
        // 最终状态等于最后一次应用的服务端档案，不会震荡
        let server_profile = profile_with(perms(r#"{"orders":{"create":true}}"#), Some("acme"));

        let mut state = SessionState::default();
        state.apply_profile(server_profile.clone()); // push
        state.apply_profile(server_profile.clone()); // manual refresh
        state.apply_profile(server_profile.clone()); // poll

        assert_eq!(state.user.as_ref(), Some(&server_profile));
    }

    #[test]
    fn clear_removes_identity_but_keeps_hydration() {
        let mut state = SessionState::default();
        state.hydrated = true;
        state.token = Some("tok".into());
        state.apply_profile(profile_with(PermissionSet::default(), None));

        state.clear();
        assert!(!state.is_authenticated());
        assert!(state.hydrated);
    }
}
