//! 进程级唯一的实时连接管理器
//!
//! 无论多少个 UI 功能订阅事件，每个已认证会话始终只维持一条连接。
//! `connect` 对存活连接是幂等空操作；句柄失活或令牌变化时先完整
//! 拆除旧句柄（摘监听器、关连接、取消重试定时器）再建新连接。
//! 状态迁移全部委托给 `connection::ConnectionCore`，这里只执行动作。

use std::cell::RefCell;
use std::rc::Rc;

use laundrylobby_shared::realtime::{ClientHello, ServerEvent};
use leptos::prelude::*;

use crate::config;
use crate::realtime::connection::{ConnectionCore, ConnectionState, LostAction, RetryPolicy};
use crate::realtime::events::EventBus;
use crate::web::Timeout;
use crate::web::socket::{SocketCallbacks, SocketHandle};
use crate::{log_info, log_warn};

struct ManagerInner {
    core: ConnectionCore,
    policy: RetryPolicy,
    handle: Option<SocketHandle>,
    retry_timer: Option<Timeout>,
    token: Option<String>,
}

impl ManagerInner {
    /// 完整拆除旧传输：先摘监听器再关闭，并取消挂起的重试
    fn teardown_transport(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.shutdown();
        }
        self.retry_timer.take();
    }
}

/// 实时连接管理器（单例，经 Context 共享）
#[derive(Clone)]
pub struct SocketManager {
    inner: Rc<RefCell<ManagerInner>>,
    /// 连接状态信号，供 UI 与同步层观察
    state: RwSignal<ConnectionState>,
    bus: EventBus,
}

impl SocketManager {
    pub fn new(bus: EventBus) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ManagerInner {
                core: ConnectionCore::new(),
                policy: RetryPolicy::default(),
                handle: None,
                retry_timer: None,
                token: None,
            })),
            state: RwSignal::new(ConnectionState::Disconnected),
            bus,
        }
    }

    /// 事件总线（订阅服务端推送用）
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    pub fn state_signal(&self) -> Signal<ConnectionState> {
        self.state.into()
    }

    pub fn is_connected_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_connected())
    }

    /// 建立连接（幂等）
    ///
    /// - 存活连接 + 相同令牌：空操作
    /// - 失活句柄或令牌变化：先拆除再重建
    pub fn connect(&self, token: &str) {
        {
            let mut inner = self.inner.borrow_mut();
            let same_token = inner.token.as_deref() == Some(token);
            let transport_live = inner.handle.as_ref().is_some_and(|h| h.is_alive());
            let logically_live = matches!(
                inner.core.state(),
                ConnectionState::Connecting | ConnectionState::Connected
            );
            if same_token && transport_live && logically_live {
                return;
            }

            inner.teardown_transport();
            inner.core.shutdown();
            let _ = inner.core.request_connect();
            inner.token = Some(token.to_string());
        }
        self.state.set(ConnectionState::Connecting);
        self.open_transport();
    }

    /// 断开连接：先摘监听器再关闭，重置状态与令牌
    pub fn disconnect(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.teardown_transport();
            inner.core.shutdown();
            inner.token = None;
        }
        self.state.set(ConnectionState::Disconnected);
    }

    fn open_transport(&self) {
        let url = {
            let inner = self.inner.borrow();
            let Some(token) = inner.token.as_deref() else {
                return;
            };
            config::socket_url(token)
        };

        let on_open_mgr = self.clone();
        let on_message_bus = self.bus.clone();
        let on_close_mgr = self.clone();

        let callbacks = SocketCallbacks {
            on_open: Box::new(move || on_open_mgr.handle_open()),
            on_message: Box::new(move |text| match serde_json::from_str::<ServerEvent>(&text) {
                Ok(event) => on_message_bus.publish(&event),
                Err(e) => log_warn!("[Socket] unrecognized frame: {}", e),
            }),
            on_close: Box::new(move || on_close_mgr.handle_lost()),
        };

        match SocketHandle::open(&url, callbacks) {
            Ok(handle) => {
                self.inner.borrow_mut().handle = Some(handle);
            }
            Err(e) => {
                log_warn!("[Socket] failed to open connection: {}", e);
                self.handle_lost();
            }
        }
    }

    fn handle_open(&self) {
        let hello = {
            let mut inner = self.inner.borrow_mut();
            inner.core.mark_open();
            inner
                .token
                .as_deref()
                .map(ClientHello::new)
                .and_then(|hello| serde_json::to_string(&hello).ok())
        };
        // 令牌同时也在连接 URL 里；握手帧覆盖只认 auth payload 的服务端
        if let Some(frame) = hello {
            let inner = self.inner.borrow();
            if let Some(handle) = &inner.handle {
                handle.send_text(&frame);
            }
        }
        log_info!("[Socket] connected.");
        self.state.set(ConnectionState::Connected);
    }

    /// 连接丢失（建连失败或既有连接断开）
    fn handle_lost(&self) {
        let action = {
            let mut inner = self.inner.borrow_mut();
            if matches!(inner.core.state(), ConnectionState::Disconnected) {
                // 主动断开后的残余回调，忽略
                return;
            }
            if let Some(mut handle) = inner.handle.take() {
                handle.shutdown();
            }
            let policy = inner.policy;
            inner.core.connection_lost(&policy)
        };

        match action {
            LostAction::RetryAfter(delay) => {
                let attempt = self.inner.borrow().core.attempts();
                log_warn!(
                    "[Socket] connection lost, retry {} in {}ms.",
                    attempt,
                    delay
                );
                self.state.set(ConnectionState::Retrying { attempt });
                let mgr = self.clone();
                let timer = Timeout::new(delay, move || mgr.retry());
                self.inner.borrow_mut().retry_timer = timer;
            }
            LostAction::GiveUp => {
                log_warn!("[Socket] retry budget exhausted, giving up.");
                self.state.set(ConnectionState::Failed);
            }
        }
    }

    fn retry(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.retry_timer.take();
            if !matches!(inner.core.state(), ConnectionState::Retrying { .. }) {
                return;
            }
            inner.core.begin_retry();
        }
        self.state.set(ConnectionState::Connecting);
        self.open_transport();
    }
}
