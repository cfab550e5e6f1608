//! 实时通道的线上协议
//!
//! 服务端推送事件是 `{"event": ..., "payload": ...}` 形式的 JSON 帧。
//! 客户端建立连接后的第一帧是 [`ClientHello`] 握手（token 同时也出现在
//! 连接 URL 的查询参数里，兼容只认查询参数的传输层）。

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// 服务端推送事件（带类型的载荷，取代字符串事件名）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ServerEvent {
    /// 当前用户的权限集合发生了变化
    PermissionsUpdated {
        #[serde(default)]
        changed_modules: Vec<String>,
    },
    /// 当前用户的角色发生了变化
    RoleChanged { new_role: Role },
}

/// 客户端握手帧
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientHello {
    pub token: String,
}

impl ClientHello {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_event_wire_format() {
        let frame = r#"{"event":"permissionsUpdated","payload":{"changed_modules":["orders"]}}"#;
        let event: ServerEvent = serde_json::from_str(frame).unwrap();
        assert_eq!(
            event,
            ServerEvent::PermissionsUpdated {
                changed_modules: vec!["orders".to_string()]
            }
        );

        let frame = r#"{"event":"roleChanged","payload":{"new_role":"support"}}"#;
        let event: ServerEvent = serde_json::from_str(frame).unwrap();
        assert_eq!(
            event,
            ServerEvent::RoleChanged {
                new_role: Role::Support
            }
        );
    }

    #[test]
    fn hello_frame_carries_token() {
        let hello = ClientHello::new("tok-123");
        let json = serde_json::to_string(&hello).unwrap();
        assert_eq!(json, r#"{"token":"tok-123"}"#);
    }
}
