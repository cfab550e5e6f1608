//! 路由服务模块 - 核心引擎
//!
//! 封装 History API，实现"监听 -> 守卫 -> 处理 -> 加载"的导航流程。
//! 守卫以信号形式注入（会话快照 + 预览开关），路由服务本身不认识
//! 会话，只执行 `guard::decide` 给出的决策，实现与状态层的解耦。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::guard::{self, AuthSnapshot, GuardDecision};
use crate::log_info;

use super::route::AppRoute;

/// 守卫评估输入的快照视图
#[derive(Debug, Clone, PartialEq)]
pub struct GuardView {
    pub auth: AuthSnapshot,
    pub preview_enabled: bool,
}

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向，不留中间历史）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
#[derive(Clone, Copy)]
pub struct RouterService {
    current_path: ReadSignal<String>,
    set_path: WriteSignal<String>,
    guard_view: Signal<GuardView>,
}

impl RouterService {
    fn new(guard_view: Signal<GuardView>) -> Self {
        let (current_path, set_path) = signal(current_path());
        Self {
            current_path,
            set_path,
            guard_view,
        }
    }

    /// 当前路径信号
    pub fn current_path(&self) -> ReadSignal<String> {
        self.current_path
    }

    /// 当前路径对应的守卫决策（响应式）
    pub fn decision(&self) -> GuardDecision {
        let view = self.guard_view.get();
        let path = self.current_path.get();
        guard::decide(&path, &view.auth, view.preview_enabled)
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.apply(path, true);
    }

    /// 执行一次导航请求
    ///
    /// # Arguments
    /// * `use_push` - true 使用 pushState，false 使用 replaceState
    fn apply(&self, path: &str, use_push: bool) {
        let view = self.guard_view.get_untracked();
        match guard::decide(path, &view.auth, view.preview_enabled) {
            GuardDecision::Allow | GuardDecision::Pending => {
                // Pending 只推迟渲染，不推迟地址变更；
                // 水合完成后守卫 Effect 会重新评估并在必要时重定向
                if use_push {
                    push_history_state(path);
                } else {
                    replace_history_state(path);
                }
                self.set_path.set(path.to_string());
            }
            GuardDecision::Redirect(target) => {
                log_info!("[Router] '{}' denied, redirecting to '{}'.", path, target);
                replace_history_state(target);
                self.set_path.set(target.to_string());
            }
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let service = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 也走完整的守卫流程
            service.apply(&current_path(), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活（与应用同生命周期）
        closure.forget();
    }

    /// 守卫状态变化时的自动重定向
    ///
    /// 水合完成、登录、注销、预览开关变化都会让守卫重新评估当前路径。
    fn setup_guard_effect(&self) {
        let service = *self;
        Effect::new(move |_| {
            let view = service.guard_view.get();
            let path = service.current_path.get();
            if let GuardDecision::Redirect(target) = guard::decide(&path, &view.auth, view.preview_enabled)
            {
                // 目标与当前路径相同时不再写信号，避免 Effect 自触发
                if path == target {
                    return;
                }
                log_info!(
                    "[Router] guard state changed, redirecting '{}' to '{}'.",
                    path,
                    target
                );
                replace_history_state(target);
                service.set_path.set(target.to_string());
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(guard_view: Signal<GuardView>) -> RouterService {
    let router = RouterService::new(guard_view);
    router.init_popstate_listener();
    router.setup_guard_effect();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 守卫输入信号（会话快照 + 预览开关）
    guard_view: Signal<GuardView>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(guard_view);
    children()
}

/// 路由出口组件
///
/// 守卫放行时渲染匹配的页面；水合未完成时渲染占位，
/// 避免未认证状态的误判闪跳。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || match router.decision() {
        GuardDecision::Pending | GuardDecision::Redirect(_) => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        GuardDecision::Allow => {
            let current = router.current_path().get();
            matcher(AppRoute::from_path(&current))
        }
    }
}
