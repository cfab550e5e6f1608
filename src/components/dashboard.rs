use laundrylobby_shared::role::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::banners::BannerStrip;
use crate::components::icons::SignalDot;
use crate::prefs::{self, ColorScheme};
use crate::preview::use_preview;
use crate::realtime::{PermissionSync, SocketManager, SyncHealth, refresh_permissions};
use crate::session::{logout, use_session};
use crate::web::router::use_navigate;

/// 角色控制面板
///
/// 所有角色共用一个骨架：身份信息、实时连接状态、权限同步状态、
/// 手动刷新、预览模式开关（特权角色）与注销。具体业务区块不在
/// 本层的职责范围内。
#[component]
pub fn DashboardPage(
    /// 该面板对应的角色
    role: Role,
) -> impl IntoView {
    let session = use_session();
    let preview = use_preview();
    let socket = use_context::<send_wrapper::SendWrapper<SocketManager>>()
        .expect("SocketManager should be provided")
        .take();
    let sync = use_context::<send_wrapper::SendWrapper<PermissionSync>>()
        .expect("PermissionSync should be provided")
        .take();
    let navigate = use_navigate();

    let connected = socket.is_connected_signal();
    let health = sync.health_signal();

    let (refreshing, set_refreshing) = signal(false);
    let (notice, set_notice) = signal(Option::<(String, bool)>::None); // 消息, 是否出错

    let user_name = move || {
        session
            .state
            .get()
            .user
            .map(|u| u.name)
            .unwrap_or_default()
    };

    let on_refresh = move |_| {
        set_refreshing.set(true);
        set_notice.set(None);
        spawn_local(async move {
            // 手动刷新：失败是非致命的，提示后继续用旧权限
            if refresh_permissions(&session).await {
                set_notice.set(Some(("Permissions are up to date.".to_string(), false)));
            } else {
                set_notice.set(Some((
                    "Could not refresh permissions. Try again later.".to_string(),
                    true,
                )));
            }
            set_refreshing.set(false);
        });
    };

    let preview_role = role.clone();
    let on_preview_toggle = move |_| {
        if preview.state.get_untracked().enabled {
            // 关闭预览后守卫会把当前的顾客侧路径弹回面板
            preview.disable();
        } else if preview.enable(&preview_role) {
            navigate("/");
        }
    };

    let (scheme, set_scheme) = signal(prefs::color_scheme());
    let on_scheme_toggle = move |_| {
        let next = match scheme.get_untracked() {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        };
        prefs::set_color_scheme(next);
        set_scheme.set(next);
    };

    let on_logout = move |_| {
        // 重定向由路由守卫的状态监听处理
        logout(&session);
    };

    let health_badge = move || match health.get() {
        SyncHealth::Idle => ("badge-ghost", "sync off"),
        SyncHealth::Active => ("badge-success", "in sync"),
        SyncHealth::Degraded { .. } => ("badge-warning", "sync degraded"),
        SyncHealth::Failed => ("badge-error", "sync failed"),
    };

    let is_customer = role == Role::Customer;
    let is_privileged = role.is_privileged();
    let role_label = role.to_string();

    view! {
        <div
            class="min-h-screen bg-base-200"
            lang=prefs::locale()
            data-theme=move || match scheme.get() {
                ColorScheme::Light => "light",
                ColorScheme::Dark => "dark",
            }
        >
            <div class="navbar bg-base-100 shadow-sm">
                <div class="flex-1 gap-3 px-2">
                    <span class="text-xl font-bold">"LaundryLobby"</span>
                    <span class="badge badge-outline">{role_label}</span>
                    <SignalDot connected=connected />
                    <span class=move || format!("badge {}", health_badge().0)>
                        {move || health_badge().1}
                    </span>
                </div>
                <div class="flex-none gap-2 px-2">
                    <span class="text-sm text-base-content/70">{user_name}</span>
                    <Show when=move || is_privileged>
                        <button class="btn btn-sm btn-outline" on:click=on_preview_toggle.clone()>
                            {move || if preview.state.get().enabled {
                                "Exit preview"
                            } else {
                                "Preview as customer"
                            }}
                        </button>
                    </Show>
                    <button
                        class="btn btn-sm"
                        disabled=move || refreshing.get()
                        on:click=on_refresh
                    >
                        {move || if refreshing.get() { "Refreshing..." } else { "Refresh permissions" }}
                    </button>
                    <button class="btn btn-sm btn-ghost" on:click=on_scheme_toggle>
                        {move || match scheme.get() {
                            ColorScheme::Light => "Dark mode",
                            ColorScheme::Dark => "Light mode",
                        }}
                    </button>
                    <button class="btn btn-sm btn-ghost" on:click=on_logout>
                        "Sign out"
                    </button>
                </div>
            </div>

            <div class="p-4 space-y-4">
                <Show when=move || notice.get().is_some()>
                    <div
                        role="alert"
                        class=move || {
                            if notice.get().map(|(_, is_err)| is_err).unwrap_or(false) {
                                "alert alert-error text-sm py-2"
                            } else {
                                "alert alert-success text-sm py-2"
                            }
                        }
                    >
                        <span>{move || notice.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show when=move || is_customer>
                    <BannerStrip />
                </Show>
            </div>
        </div>
    }
}
