//! 顾客横幅条
//!
//! 加载第一页横幅，渲染后逐条上报曝光；点击先上报再跳转。
//! 打点失败静默忽略，不影响浏览。

use laundrylobby_shared::Banner;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::session::{session_api, use_session};

const BANNER_PAGE_SIZE: u32 = 5;

#[component]
pub fn BannerStrip() -> impl IntoView {
    let session = use_session();
    let (banners, set_banners) = signal(Vec::<Banner>::new());

    if let Some(api) = session_api(&session) {
        spawn_local(async move {
            if let Ok(page) = api.banners(1, BANNER_PAGE_SIZE).await {
                // 曝光打点：每条横幅一次
                for banner in &page.items {
                    let api = api.clone();
                    let id = banner.id.clone();
                    spawn_local(async move {
                        let _ = api.banner_impression(&id).await;
                    });
                }
                set_banners.set(page.items);
            }
        });
    }

    view! {
        <Show when=move || !banners.get().is_empty()>
            <div class="carousel w-full gap-2">
                <For
                    each=move || banners.get()
                    key=|banner| banner.id.clone()
                    children=move |banner: Banner| {
                        let session = use_session();
                        let id = banner.id.clone();
                        let link = banner.link_url.clone();
                        let on_click = move |_| {
                            let id = id.clone();
                            let link = link.clone();
                            if let Some(api) = session_api(&session) {
                                spawn_local(async move {
                                    let _ = api.banner_click(&id).await;
                                    if let (Some(window), Some(url)) =
                                        (web_sys::window(), link)
                                    {
                                        let _ = window.location().set_href(&url);
                                    }
                                });
                            }
                        };
                        view! {
                            <div class="carousel-item cursor-pointer" on:click=on_click>
                                <img
                                    src=banner.image_url.clone()
                                    alt=banner.title.clone()
                                    class="rounded-box h-32"
                                />
                            </div>
                        }
                    }
                />
            </div>
        </Show>
    }
}
