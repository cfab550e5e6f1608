//! 租户解析的浏览器侧包装
//!
//! 纯解析逻辑在 `laundrylobby_shared::tenant` 中；这里补上副作用：
//! 从 window.location 取输入、从 sessionStorage 读历史记录、
//! 并把解析结果写回 sessionStorage 供同一标签页内的后续组件复用。

use laundrylobby_shared::tenant::resolve_slug;

use crate::web::SessionStorage;

/// 最近一次解析出的租户 slug 在 sessionStorage 中的键
const TENANT_SLUG_KEY: &str = "laundrylobby_tenant";

/// 解析当前标签页的租户 slug 并持久化
///
/// 解析对同样的地址是幂等的；只有解析出新值时才写存储。
pub fn resolve_and_store() -> Option<String> {
    let location = web_sys::window()?.location();
    let hostname = location.hostname().ok()?;
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let stored = SessionStorage::get(TENANT_SLUG_KEY);

    let slug = resolve_slug(&hostname, &path, stored.as_deref())?;
    if stored.as_deref() != Some(slug.as_str()) {
        SessionStorage::set(TENANT_SLUG_KEY, &slug);
    }
    Some(slug)
}

/// 读取已存储的租户 slug（不触发重新解析）
pub fn stored_slug() -> Option<String> {
    SessionStorage::get(TENANT_SLUG_KEY)
}
