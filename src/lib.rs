//! LaundryLobby 前端应用
//!
//! 多租户洗衣服务平台的浏览器前端。采用 Context-Driven 的
//! 高内聚低耦合架构：
//! - `guard`: 基于角色的路由守卫（纯决策表）
//! - `session` / `preview`: 会话与预览模式状态管理
//! - `tenant`: 租户标识解析
//! - `realtime`: 单例实时连接、事件通道与权限同步
//! - `web`: 浏览器原生 API 封装（路由、存储、HTTP、WebSocket、定时器）
//! - `components`: UI 组件层

use laundrylobby_shared::role::Role;
use leptos::prelude::*;
use send_wrapper::SendWrapper;

// =========================================================
// 日志宏（wasm 走 console，原生测试走标准输出）
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info { ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into())) }
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info { ($($t:tt)*) => (println!($($t)*)) }

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn { ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into())) }
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn { ($($t:tt)*) => (eprintln!($($t)*)) }

pub(crate) use log_info;
pub(crate) use log_warn;

// =========================================================
// 模块
// =========================================================

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod prefs;
pub mod preview;
pub mod realtime;
pub mod session;
pub mod tenant;

pub(crate) mod web;

mod components {
    pub mod banners;
    pub mod dashboard;
    pub mod icons;
    pub mod info_pages;
    pub mod landing;
    pub mod login;
    pub mod not_found;
}

use components::dashboard::DashboardPage;
use components::info_pages::{HelpPage, PricingPage};
use components::landing::{LandingPage, TenantLandingPage};
use components::login::LoginPage;
use components::not_found::NotFoundPage;

use guard::AuthSnapshot;
use preview::PreviewContext;
use realtime::sync::DEFAULT_POLL_INTERVAL_MS;
use realtime::{EventBus, PermissionSync, SocketManager, SyncOptions};
use session::{SessionContext, init_session};
use web::route::AppRoute;
use web::router::{GuardView, Router, RouterOutlet};

/// 路由匹配函数：根据 AppRoute 枚举返回对应的视图组件
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::TenantLanding(slug) => view! { <TenantLandingPage slug=slug /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Pricing => view! { <PricingPage /> }.into_any(),
        AppRoute::Help => view! { <HelpPage /> }.into_any(),
        AppRoute::SuperAdminDashboard => {
            view! { <DashboardPage role=Role::SuperAdmin /> }.into_any()
        }
        AppRoute::AdminDashboard => view! { <DashboardPage role=Role::CenterAdmin /> }.into_any(),
        AppRoute::BranchDashboard => view! { <DashboardPage role=Role::BranchAdmin /> }.into_any(),
        AppRoute::StaffDashboard => view! { <DashboardPage role=Role::Support /> }.into_any(),
        AppRoute::CustomerDashboard => view! { <DashboardPage role=Role::Customer /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 会话上下文 + 从 localStorage 水合
    let session = SessionContext::new();
    provide_context(session);
    init_session(&session);

    // 2. 预览模式（纯内存）
    let preview = PreviewContext::new();
    provide_context(preview);

    // 3. 租户解析，写入 sessionStorage 供本标签页复用
    let _ = tenant::resolve_and_store();

    // 4. 实时层：事件通道、连接单例、权限同步
    let bus = EventBus::new();
    let socket = SocketManager::new(bus.clone());
    provide_context(SendWrapper::new(socket.clone()));

    let sync = PermissionSync::new(
        session,
        &bus,
        SyncOptions {
            auto_reload: true,
            on_change: None,
        },
    );
    provide_context(SendWrapper::new(sync.clone()));

    // 5. 实时层生命周期跟随会话：登录建连并开启轮询兜底，
    //    注销/令牌失效全部拆除；令牌变化由 connect 自行识别并重建
    Effect::new({
        let socket = socket.clone();
        let sync = sync.clone();
        move |_| {
            let state = session.state.get();
            match (state.is_authenticated(), state.token) {
                (true, Some(token)) => {
                    socket.connect(&token);
                    sync.start_periodic_sync(DEFAULT_POLL_INTERVAL_MS);
                }
                _ => {
                    socket.disconnect();
                    sync.stop_periodic_sync();
                }
            }
        }
    });

    // 6. 守卫输入信号：会话快照 + 预览开关（注入路由服务实现解耦）
    let guard_view = Signal::derive(move || {
        let state = session.state.get();
        GuardView {
            auth: AuthSnapshot {
                hydrated: state.hydrated,
                role: state.user.map(|u| u.role),
            },
            preview_enabled: preview.state.get().enabled,
        }
    });

    view! {
        <Router guard_view=guard_view>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
