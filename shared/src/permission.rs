//! 权限与功能开关模型
//!
//! 两者都是"缺失即拒绝"的查表结构：键不存在等同于 `false`。
//! 客户端永远不在本地授予权限，只整体替换从服务端拉取的集合。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 权限集合：模块 -> 操作 -> 是否允许
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(HashMap<String, HashMap<String, bool>>);

impl PermissionSet {
    /// 查询某模块下某操作是否被允许
    pub fn allows(&self, module: &str, action: &str) -> bool {
        self.0
            .get(module)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(false)
    }

    /// 权限集合中包含的模块名
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 仅供测试构造权限集合，生产构建中不可达
    #[cfg(test)]
    pub fn grant(&mut self, module: &str, action: &str) {
        self.0
            .entry(module.to_string())
            .or_default()
            .insert(action.to_string(), true);
    }
}

/// 功能开关：功能名 -> 是否启用
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags(HashMap<String, bool>);

impl FeatureFlags {
    /// 查询某功能是否启用，未知功能视为关闭
    pub fn enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 仅供测试构造功能开关，生产构建中不可达
    #[cfg(test)]
    pub fn switch_on(&mut self, name: &str) {
        self.0.insert(name.to_string(), true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_deny() {
        let set = PermissionSet::default();
        assert!(!set.allows("orders", "create"));

        let flags = FeatureFlags::default();
        assert!(!flags.enabled("pickup_scheduling"));
    }

    #[test]
    fn granted_permission_is_visible() {
        let mut set = PermissionSet::default();
        set.grant("orders", "create");
        assert!(set.allows("orders", "create"));
        assert!(!set.allows("orders", "delete"));
        assert!(!set.allows("billing", "create"));
    }

    #[test]
    fn deserializes_server_shape() {
        let set: PermissionSet =
            serde_json::from_str(r#"{"orders":{"create":true,"delete":false}}"#).unwrap();
        assert!(set.allows("orders", "create"));
        assert!(!set.allows("orders", "delete"));

        let flags: FeatureFlags =
            serde_json::from_str(r#"{"pickup_scheduling":true}"#).unwrap();
        assert!(flags.enabled("pickup_scheduling"));
    }
}
