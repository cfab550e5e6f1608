//! 预览模式
//!
//! 特权用户在不放弃自身角色的前提下浏览顾客侧页面。
//! 纯内存状态，从不持久化：刷新页面即退出预览。
//! 开启只对特权角色生效，守卫据此放宽顾客侧路径的拒绝规则。

use laundrylobby_shared::role::Role;
use leptos::prelude::*;

use crate::log_warn;

/// 预览模式状态
#[derive(Clone, Default, PartialEq)]
pub struct PreviewState {
    pub enabled: bool,
    /// 开启预览时的原角色，用于 UI 显示"以 X 身份预览"
    pub original_role: Option<Role>,
}

/// 预览模式上下文
#[derive(Clone, Copy)]
pub struct PreviewContext {
    pub state: ReadSignal<PreviewState>,
    set_state: WriteSignal<PreviewState>,
}

impl PreviewContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(PreviewState::default());
        Self { state, set_state }
    }

    pub fn enabled_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().enabled)
    }

    /// 尝试开启预览；只有特权角色允许，返回是否成功
    pub fn enable(&self, role: &Role) -> bool {
        if !role.is_privileged() {
            log_warn!("[Preview] role '{}' is not allowed to preview.", role);
            return false;
        }
        self.set_state.set(PreviewState {
            enabled: true,
            original_role: Some(role.clone()),
        });
        true
    }

    /// 关闭预览，任何时候都安全
    pub fn disable(&self) {
        self.set_state.set(PreviewState::default());
    }
}

impl Default for PreviewContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取预览上下文
pub fn use_preview() -> PreviewContext {
    use_context::<PreviewContext>().expect("PreviewContext should be provided")
}
