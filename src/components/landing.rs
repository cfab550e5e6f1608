//! 落地页
//!
//! 平台根落地页与租户品牌落地页。租户上下文按 slug 拉取一次，
//! 只活在这棵子树里（不持久化）；拉取失败渲染"租户不存在"。
//! 整页模板就是对 `LandingTemplate` 的一个 match，`Original`
//! 是 default 分支，没有任何插件机制。

use std::cell::RefCell;
use std::rc::Rc;

use laundrylobby_shared::template::LandingTemplate;
use laundrylobby_shared::tenant::TenantContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::LobbyApi;
use crate::components::icons::WashingMachine;
use crate::components::not_found::TenantNotFound;
use crate::config;
use crate::tenant;
use crate::web::AbortGuard;
use crate::web::router::use_navigate;

/// 租户上下文的加载状态
#[derive(Clone, Default)]
pub enum TenantLoad {
    #[default]
    Loading,
    Found(TenantContext),
    Missing,
}

/// 按 slug 拉取租户上下文，在途请求与当前组件同生命周期
pub fn load_tenant(slug: String, set_tenant: WriteSignal<TenantLoad>) {
    let guard_slot: Rc<RefCell<Option<AbortGuard>>> =
        Rc::new(RefCell::new(Some(AbortGuard::new())));
    on_cleanup({
        let slot = send_wrapper::SendWrapper::new(guard_slot.clone());
        move || {
            // drop 即中止在途请求，慢响应不会打到已卸载的组件上
            slot.borrow_mut().take();
        }
    });

    let signal = guard_slot.borrow().as_ref().and_then(|g| g.signal());
    spawn_local(async move {
        let api = LobbyApi::new(config::api_base_url());
        match api.tenant_branding(&slug, signal).await {
            Ok(context) => set_tenant.set(TenantLoad::Found(context)),
            Err(_) => set_tenant.set(TenantLoad::Missing),
        }
        // 请求结束后释放句柄
        guard_slot.borrow_mut().take();
    });
}

/// 平台根落地页
///
/// 当前标签页能解析出租户时直接渲染该租户的品牌落地页，
/// 否则渲染平台默认模板。
#[component]
pub fn LandingPage() -> impl IntoView {
    match tenant::resolve_and_store() {
        Some(slug) => view! { <TenantLandingPage slug=slug /> }.into_any(),
        None => view! { <TemplatedLanding template=LandingTemplate::Original tenant=None /> }
            .into_any(),
    }
}

/// 租户品牌落地页
#[component]
pub fn TenantLandingPage(
    /// 租户 slug
    slug: String,
) -> impl IntoView {
    let (tenant, set_tenant) = signal(TenantLoad::default());
    load_tenant(slug.clone(), set_tenant);

    move || match tenant.get() {
        TenantLoad::Loading => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        TenantLoad::Missing => view! { <TenantNotFound slug=slug.clone() /> }.into_any(),
        TenantLoad::Found(context) => {
            let template = context.branding.template();
            view! { <TemplatedLanding template=template tenant=Some(context) /> }.into_any()
        }
    }
}

/// 整页模板切换：对模板枚举的直接 match
#[component]
fn TemplatedLanding(
    template: LandingTemplate,
    tenant: Option<TenantContext>,
) -> impl IntoView {
    match template {
        LandingTemplate::Minimal => view! { <MinimalLanding tenant=tenant /> }.into_any(),
        LandingTemplate::FreshSpin => view! { <FreshSpinLanding tenant=tenant /> }.into_any(),
        LandingTemplate::Starter => view! { <StarterLanding tenant=tenant /> }.into_any(),
        // default 分支：一切未识别配置的归宿
        LandingTemplate::Original => view! { <OriginalLanding tenant=tenant /> }.into_any(),
    }
}

fn business_name(tenant: &Option<TenantContext>) -> String {
    tenant
        .as_ref()
        .map(|t| t.business_name.clone())
        .unwrap_or_else(|| "LaundryLobby".to_string())
}

/// 模板共用的 hero 骨架
#[component]
fn LandingHero(
    template: LandingTemplate,
    tenant: Option<TenantContext>,
) -> impl IntoView {
    let theme = template.theme();
    let brand = template.brand();
    let name = business_name(&tenant);
    let navigate = use_navigate();
    let to_login = move |_| navigate("/auth/login");

    view! {
        <div class=format!("hero min-h-screen bg-gradient-to-br {}", theme.hero_gradient)>
            <div class="hero-content text-center text-neutral-content">
                <div class="max-w-md">
                    <div class="flex justify-center mb-4">
                        <WashingMachine />
                    </div>
                    <h1 class="text-5xl font-bold">{name}</h1>
                    <p class="py-6">{brand.tagline}</p>
                    <button class=format!("btn bg-{} border-none", theme.primary) on:click=to_login>
                        {brand.cta}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn OriginalLanding(tenant: Option<TenantContext>) -> impl IntoView {
    view! { <LandingHero template=LandingTemplate::Original tenant=tenant /> }
}

#[component]
fn MinimalLanding(tenant: Option<TenantContext>) -> impl IntoView {
    let name = business_name(&tenant);
    let navigate = use_navigate();
    let to_login = move |_| navigate("/auth/login");
    // Minimal 模板没有 hero 渐变，只有一行字和入口
    view! {
        <div class="flex flex-col items-center justify-center min-h-screen bg-base-200 gap-6">
            <h1 class="text-3xl font-semibold">{name}</h1>
            <p class="text-base-content/70">{LandingTemplate::Minimal.brand().tagline}</p>
            <button class="btn btn-neutral" on:click=to_login>
                {LandingTemplate::Minimal.brand().cta}
            </button>
        </div>
    }
}

#[component]
fn FreshSpinLanding(tenant: Option<TenantContext>) -> impl IntoView {
    view! { <LandingHero template=LandingTemplate::FreshSpin tenant=tenant /> }
}

#[component]
fn StarterLanding(tenant: Option<TenantContext>) -> impl IntoView {
    view! { <LandingHero template=LandingTemplate::Starter tenant=tenant /> }
}
