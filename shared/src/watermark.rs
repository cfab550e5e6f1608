//! 权限同步水位线
//!
//! 记录最近一次成功同步的时刻，轮询时只向服务端询问该时刻之后
//! 是否有增量更新。

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// ISO-8601 格式的同步水位线
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watermark(DateTime<Utc>);

impl Watermark {
    /// 以当前时刻创建水位线
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// 推进到当前时刻
    ///
    /// 只在同步成功后调用，失败的同步不得推进水位线，
    /// 否则会漏掉失败窗口内的服务端变更。
    pub fn advance(&mut self) {
        self.0 = Utc::now();
    }

    /// URL 安全的 ISO-8601 表示（UTC，`Z` 后缀）
    pub fn to_query_value(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Display for Watermark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn query_value_is_utc_with_z_suffix() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let mark = Watermark::new(at);
        assert_eq!(mark.to_query_value(), "2026-03-14T09:26:53.000Z");
    }

    #[test]
    fn advance_is_monotonic() {
        let mut mark = Watermark::new(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
        let before = mark;
        mark.advance();
        assert!(mark > before);
    }
}
