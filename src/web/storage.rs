//! 浏览器存储封装模块
//!
//! `LocalStorage`（跨会话持久）与 `SessionStorage`（标签页会话内有效）
//! 的统一封装。会话持久化、用户偏好走 LocalStorage；
//! 租户 slug 这类标签页级状态走 SessionStorage。

fn local() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn session() -> Option<web_sys::Storage> {
    web_sys::window()?.session_storage().ok()?
}

macro_rules! storage_impl {
    ($name:ident, $getter:ident) => {
        impl $name {
            /// 获取存储的字符串值；键不存在或存储不可用时返回 `None`
            pub fn get(key: &str) -> Option<String> {
                $getter()?.get_item(key).ok()?
            }

            /// 写入键值，返回操作是否成功
            pub fn set(key: &str, value: &str) -> bool {
                $getter()
                    .and_then(|s| s.set_item(key, value).ok())
                    .is_some()
            }

            /// 删除键，返回操作是否成功
            pub fn delete(key: &str) -> bool {
                $getter()
                    .and_then(|s| s.remove_item(key).ok())
                    .is_some()
            }
        }
    };
}

/// 持久存储（localStorage）
pub struct LocalStorage;
storage_impl!(LocalStorage, local);

/// 会话存储（sessionStorage）
pub struct SessionStorage;
storage_impl!(SessionStorage, session);
