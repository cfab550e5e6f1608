//! 用户本地偏好
//!
//! 语言与配色方案只是客户端偏好，各自存在独立的 localStorage 键下，
//! 与会话的生命周期无关（注销不清除）。

use crate::web::LocalStorage;

const LOCALE_KEY: &str = "laundrylobby_locale";
const SCHEME_KEY: &str = "laundrylobby_scheme";

const DEFAULT_LOCALE: &str = "en";

/// 配色方案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn from_str(s: &str) -> Self {
        match s {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }
}

pub fn locale() -> String {
    LocalStorage::get(LOCALE_KEY).unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

pub fn set_locale(locale: &str) {
    LocalStorage::set(LOCALE_KEY, locale);
}

pub fn color_scheme() -> ColorScheme {
    LocalStorage::get(SCHEME_KEY)
        .map(|s| ColorScheme::from_str(&s))
        .unwrap_or_default()
}

pub fn set_color_scheme(scheme: ColorScheme) {
    LocalStorage::set(SCHEME_KEY, scheme.as_str());
}
