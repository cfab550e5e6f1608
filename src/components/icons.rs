//! 内联 SVG 图标组件

use leptos::prelude::*;

#[component]
pub fn WashingMachine() -> impl IntoView {
    view! {
        <svg xmlns="http://www.w3.org/2000/svg" class="h-8 w-8" fill="none" viewBox="0 0 24 24" stroke="currentColor" stroke-width="2">
            <rect x="4" y="2" width="16" height="20" rx="2" />
            <circle cx="12" cy="13" r="5" />
            <path stroke-linecap="round" d="M8 5h.01M11 5h2" />
        </svg>
    }
}

#[component]
pub fn SignalDot(
    /// 是否处于已连接状态
    connected: Signal<bool>,
) -> impl IntoView {
    view! {
        <span
            class=move || {
                if connected.get() {
                    "inline-block h-2 w-2 rounded-full bg-success"
                } else {
                    "inline-block h-2 w-2 rounded-full bg-error"
                }
            }
        ></span>
    }
}
