//! 价格页与帮助页
//!
//! 与落地页一样按租户模板整页切换；内容是占位级别的静态区块，
//! 具体文案与排版不在本层的职责范围内。

use laundrylobby_shared::template::LandingTemplate;
use leptos::prelude::*;

use crate::components::landing::{TenantLoad, load_tenant};
use crate::tenant;

fn resolved_template(load: &TenantLoad) -> LandingTemplate {
    match load {
        TenantLoad::Found(context) => context.branding.template(),
        _ => LandingTemplate::Original,
    }
}

#[component]
fn TemplatedInfoPage(
    title: &'static str,
    body: &'static str,
) -> impl IntoView {
    let (load, set_load) = signal(TenantLoad::default());
    if let Some(slug) = tenant::resolve_and_store() {
        load_tenant(slug, set_load);
    }

    move || {
        let template = resolved_template(&load.get());
        let theme = template.theme();
        // 整页模板切换：对模板枚举的直接 match，Original 兜底
        let header_class = match template {
            LandingTemplate::Minimal => "py-10 bg-base-300".to_string(),
            _ => format!("py-10 bg-gradient-to-r {}", theme.hero_gradient),
        };
        view! {
            <div class="min-h-screen bg-base-200">
                <header class=header_class>
                    <h1 class="text-4xl font-bold text-center text-neutral-content">{title}</h1>
                </header>
                <main class="max-w-2xl mx-auto p-6">
                    <p class="text-base-content/80">{body}</p>
                </main>
            </div>
        }
    }
}

#[component]
pub fn PricingPage() -> impl IntoView {
    view! {
        <TemplatedInfoPage
            title="Pricing"
            body="Per-item and per-kilo pricing is set by each laundry. Sign in to see the rates for your branch."
        />
    }
}

#[component]
pub fn HelpPage() -> impl IntoView {
    view! {
        <TemplatedInfoPage
            title="Help"
            body="Questions about pickups, deliveries or billing? Reach your laundry through the contact details on its landing page."
        />
    }
}
