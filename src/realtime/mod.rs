//! 实时层
//!
//! - `connection`: 连接状态机（纯逻辑，可原生测试）
//! - `events`: 带类型的发布/订阅通道，取代 window 级自定义事件
//! - `socket`: 进程级唯一的 WebSocket 连接管理器
//! - `sync`: 权限同步（推送 / 手动刷新 / 轮询兜底）

pub mod connection;
pub mod events;
pub mod socket;
pub mod sync;

pub use connection::{ConnectionState, RetryPolicy};
pub use events::EventBus;
pub use socket::SocketManager;
pub use sync::{PermissionSync, SyncHealth, SyncOptions, refresh_permissions};
