//! 角色定义模块
//!
//! 角色始终来源于服务端，客户端只做解析与查表。
//! 未知的角色字符串保留为 `Role::Unknown`，由路由守卫统一按拒绝处理，
//! 而不是在反序列化阶段直接报错。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

/// 平台已知角色
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// 平台超级管理员
    SuperAdmin,
    /// 租户（洗衣中心）管理员
    CenterAdmin,
    /// 门店管理员
    BranchAdmin,
    /// 客服/支持人员
    Support,
    /// 普通顾客
    Customer,
    /// 服务端返回的无法识别的角色
    Unknown(String),
}

impl Role {
    /// 解析服务端的角色标识
    pub fn from_wire(name: &str) -> Self {
        match name {
            "super_admin" => Self::SuperAdmin,
            "center_admin" => Self::CenterAdmin,
            "branch_admin" => Self::BranchAdmin,
            "support" => Self::Support,
            "customer" => Self::Customer,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// 角色的服务端标识
    pub fn as_wire(&self) -> &str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::CenterAdmin => "center_admin",
            Self::BranchAdmin => "branch_admin",
            Self::Support => "support",
            Self::Customer => "customer",
            Self::Unknown(s) => s,
        }
    }

    /// 角色专属的控制面板路径
    ///
    /// `Unknown` 角色没有面板，守卫会在查表之前就将其拒绝，
    /// 这里返回登录页兜底。
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "/superadmin/dashboard",
            Self::CenterAdmin => "/admin/dashboard",
            Self::BranchAdmin => "/branch-admin/dashboard",
            Self::Support => "/staff/dashboard",
            Self::Customer => "/customer/dashboard",
            Self::Unknown(_) => "/auth/login",
        }
    }

    /// 是否为特权角色（允许开启预览模式浏览顾客页面）
    pub fn is_privileged(&self) -> bool {
        matches!(
            self,
            Self::SuperAdmin | Self::CenterAdmin | Self::BranchAdmin | Self::Support
        )
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Role::from_wire(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip_for_known_roles() {
        for name in [
            "super_admin",
            "center_admin",
            "branch_admin",
            "support",
            "customer",
        ] {
            assert_eq!(Role::from_wire(name).as_wire(), name);
        }
    }

    #[test]
    fn unrecognized_role_is_preserved_not_rejected() {
        let role: Role = serde_json::from_str("\"warehouse_bot\"").unwrap();
        assert_eq!(role, Role::Unknown("warehouse_bot".to_string()));
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"warehouse_bot\"");
    }

    #[test]
    fn only_staff_roles_are_privileged() {
        assert!(Role::SuperAdmin.is_privileged());
        assert!(Role::Support.is_privileged());
        assert!(!Role::Customer.is_privileged());
        assert!(!Role::Unknown("x".into()).is_privileged());
    }

    #[test]
    fn every_known_role_has_a_distinct_dashboard() {
        let paths = [
            Role::SuperAdmin.dashboard_path(),
            Role::CenterAdmin.dashboard_path(),
            Role::BranchAdmin.dashboard_path(),
            Role::Support.dashboard_path(),
            Role::Customer.dashboard_path(),
        ];
        let unique: std::collections::HashSet<_> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }
}
