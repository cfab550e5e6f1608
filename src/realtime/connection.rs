//! 连接状态机
//!
//! 把重连逻辑从定时器回调里剥出来：状态迁移与重试计数是纯逻辑，
//! `socket` 模块只负责执行状态机给出的动作（建连、定时、放弃）。
//! 重试次数有上限，耗尽后进入 `Failed`，不再自动重试。

#[cfg(test)]
mod tests;

/// 连接状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// 连接断开，等待第 `attempt` 次重试
    Retrying {
        attempt: u32,
    },
    /// 重试次数耗尽，放弃
    Failed,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// 重试策略：固定退避间隔，有限次数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_ms: 2_000,
        }
    }
}

/// 断开后状态机给出的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LostAction {
    /// 在给定延迟后重试
    RetryAfter(u32),
    /// 放弃重连
    GiveUp,
}

/// 连接状态机核心
#[derive(Debug, Clone, Default)]
pub struct ConnectionCore {
    state: ConnectionState,
    attempts: u32,
}

impl ConnectionCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// 观测用：已经消耗的重试次数
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// 请求建连；已在连接中/已连接时是幂等的空操作，返回是否需要真正建连
    pub fn request_connect(&mut self) -> bool {
        match self.state {
            ConnectionState::Connecting | ConnectionState::Connected => false,
            _ => {
                self.state = ConnectionState::Connecting;
                true
            }
        }
    }

    /// 连接握手完成，重置重试计数
    pub fn mark_open(&mut self) {
        self.state = ConnectionState::Connected;
        self.attempts = 0;
    }

    /// 连接丢失（建连失败或已建立的连接断开）
    pub fn connection_lost(&mut self, policy: &RetryPolicy) -> LostAction {
        if self.attempts >= policy.max_attempts {
            self.state = ConnectionState::Failed;
            return LostAction::GiveUp;
        }
        self.attempts += 1;
        self.state = ConnectionState::Retrying {
            attempt: self.attempts,
        };
        LostAction::RetryAfter(policy.backoff_ms)
    }

    /// 进入重试等待后的实际建连动作
    pub fn begin_retry(&mut self) {
        self.state = ConnectionState::Connecting;
    }

    /// 主动断开，回到初始状态
    pub fn shutdown(&mut self) {
        self.state = ConnectionState::Disconnected;
        self.attempts = 0;
    }
}
