use leptos::prelude::*;

use crate::web::router::use_navigate;

/// 路由未匹配
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
            </div>
        </div>
    }
}

/// 租户不存在/未启用
#[component]
pub fn TenantNotFound(
    /// 解析出的 slug，用于提示
    slug: String,
) -> impl IntoView {
    let navigate = use_navigate();
    let go_home = move |_| navigate("/");

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center max-w-md">
                <h1 class="text-4xl font-bold">"Laundry not found"</h1>
                <p class="mt-4 text-base-content/70">
                    "We couldn't find a laundry service called \"" {slug} "\"."
                </p>
                <button class="btn btn-primary mt-6" on:click=go_home>
                    "Back to LaundryLobby"
                </button>
            </div>
        </div>
    }
}
