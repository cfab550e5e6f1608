//! 权限同步层
//!
//! 让本地缓存的权限/功能开关与服务端保持最终一致。三条互补的
//! 投递路径（服务端推送、手动刷新、轮询兜底）都汇聚到会话层的
//! `apply_profile`，最后完成者胜出；推送不可用时的陈旧窗口
//! 以一个轮询间隔为上界。
//!
//! 轮询失败采用指数退避，连续失败达到上限后停止轮询并把
//! [`SyncHealth::Failed`] 暴露给 UI，由用户手动触发刷新。

use std::cell::RefCell;
use std::rc::Rc;

use laundrylobby_shared::realtime::ServerEvent;
use laundrylobby_shared::watermark::Watermark;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::log_warn;
use crate::realtime::events::{EventBus, Subscription};
use crate::session::{self, SessionContext};
use crate::web::Timeout;

#[cfg(test)]
mod tests;

/// 默认轮询间隔
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 60_000;

// =========================================================
// 手动刷新
// =========================================================

/// 重新拉取用户档案并整体替换权限/功能开关/租户归属
///
/// 错误不会越过此边界：网络失败只体现在返回值里，调用方
/// 据此向用户展示非致命的失败提示。
pub async fn refresh_permissions(ctx: &SessionContext) -> bool {
    let Some(api) = session::session_api(ctx) else {
        return false;
    };
    match api.profile().await {
        Ok(profile) => {
            session::apply_profile(ctx, profile);
            true
        }
        Err(e) => {
            log_warn!("[Sync] manual refresh failed: {}", e);
            false
        }
    }
}

// =========================================================
// 轮询退避（纯逻辑）
// =========================================================

/// 连续失败后的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffVerdict {
    /// 在给定延迟后重试
    RetryIn(u32),
    /// 连续失败达到上限，放弃
    GiveUp,
}

/// 指数退避计数器
#[derive(Debug, Clone)]
pub struct PollBackoff {
    base_ms: u32,
    max_delay_ms: u32,
    max_failures: u32,
    failures: u32,
}

impl PollBackoff {
    pub fn new(base_ms: u32) -> Self {
        Self {
            base_ms,
            max_delay_ms: 300_000,
            max_failures: 5,
            failures: 0,
        }
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// 成功后清零
    pub fn reset(&mut self) {
        self.failures = 0;
    }

    /// 记录一次失败，得到下一步动作
    ///
    /// 延迟按失败次数指数增长（base * 2^n），以 `max_delay_ms` 封顶。
    pub fn register_failure(&mut self) -> BackoffVerdict {
        self.failures += 1;
        if self.failures > self.max_failures {
            return BackoffVerdict::GiveUp;
        }
        let exponent = self.failures.min(16);
        let delay = self
            .base_ms
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay_ms);
        BackoffVerdict::RetryIn(delay)
    }
}

// =========================================================
// 同步器
// =========================================================

/// 同步层对外暴露的健康状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncHealth {
    /// 未在轮询
    #[default]
    Idle,
    /// 轮询正常
    Active,
    /// 出现连续失败，正在退避重试
    Degraded {
        failures: u32,
    },
    /// 连续失败达到上限，已停止轮询
    Failed,
}

/// 推送事件的处理配置
#[derive(Clone, Default)]
pub struct SyncOptions {
    /// true：收到推送后自动全量刷新；false：只调用 `on_change` 通知 UI
    pub auto_reload: bool,
    /// 非自动刷新模式下的通知回调（例如弹出"权限已变更"提示）
    pub on_change: Option<Rc<dyn Fn(&ServerEvent)>>,
}

struct SyncInner {
    watermark: Watermark,
    timer: Option<Timeout>,
    backoff: PollBackoff,
    interval_ms: u32,
    running: bool,
    push_sub: Option<Subscription>,
}

/// 权限同步器
#[derive(Clone)]
pub struct PermissionSync {
    session: SessionContext,
    options: SyncOptions,
    health: RwSignal<SyncHealth>,
    inner: Rc<RefCell<SyncInner>>,
}

impl PermissionSync {
    /// 创建同步器并立刻挂上推送订阅
    pub fn new(session: SessionContext, bus: &EventBus, options: SyncOptions) -> Self {
        let sync = Self {
            session,
            options,
            health: RwSignal::new(SyncHealth::Idle),
            inner: Rc::new(RefCell::new(SyncInner {
                watermark: Watermark::now(),
                timer: None,
                backoff: PollBackoff::new(DEFAULT_POLL_INTERVAL_MS),
                interval_ms: DEFAULT_POLL_INTERVAL_MS,
                running: false,
                push_sub: None,
            })),
        };

        let push_handler = sync.clone();
        let sub = bus.subscribe(move |event| push_handler.on_push(event));
        sync.inner.borrow_mut().push_sub = Some(sub);
        sync
    }

    pub fn health_signal(&self) -> Signal<SyncHealth> {
        self.health.into()
    }

    /// 推送路径：权限/角色变更事件
    fn on_push(&self, event: &ServerEvent) {
        if self.options.auto_reload {
            let sync = self.clone();
            spawn_local(async move {
                if refresh_permissions(&sync.session).await {
                    sync.inner.borrow_mut().watermark.advance();
                }
            });
        } else if let Some(notify) = &self.options.on_change {
            notify(event);
        }
    }

    /// 启动轮询兜底；已在运行时是空操作
    pub fn start_periodic_sync(&self, interval_ms: u32) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.running {
                return;
            }
            inner.running = true;
            inner.interval_ms = interval_ms.max(1_000);
            inner.backoff = PollBackoff::new(inner.interval_ms);
        }
        self.health.set(SyncHealth::Active);
        self.schedule(interval_ms.max(1_000));
    }

    /// 停止轮询；幂等，任何时候（包括从未启动）调用都安全
    pub fn stop_periodic_sync(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.running = false;
        inner.timer.take();
        drop(inner);
        self.health.set(SyncHealth::Idle);
    }

    fn schedule(&self, delay_ms: u32) {
        let sync = self.clone();
        let timer = Timeout::new(delay_ms, move || sync.tick());
        self.inner.borrow_mut().timer = timer;
    }

    fn tick(&self) {
        if !self.inner.borrow().running {
            return;
        }
        let sync = self.clone();
        spawn_local(async move {
            let outcome = sync.poll_once().await;
            sync.after_poll(outcome);
        });
    }

    /// 轮询一次：询问水位线之后有没有更新，有则走统一的刷新路径
    async fn poll_once(&self) -> bool {
        let Some(api) = session::session_api(&self.session) else {
            return false;
        };
        let since = self.inner.borrow().watermark;
        match api.permission_status(since).await {
            Ok(status) => {
                if status.has_updates && !refresh_permissions(&self.session).await {
                    return false;
                }
                self.inner.borrow_mut().watermark.advance();
                true
            }
            Err(e) => {
                log_warn!("[Sync] poll failed: {}", e);
                false
            }
        }
    }

    fn after_poll(&self, ok: bool) {
        let verdict = {
            let mut inner = self.inner.borrow_mut();
            if !inner.running {
                return;
            }
            if ok {
                inner.backoff.reset();
                None
            } else {
                Some((inner.backoff.register_failure(), inner.backoff.failures()))
            }
        };

        match verdict {
            None => {
                self.health.set(SyncHealth::Active);
                let interval = self.inner.borrow().interval_ms;
                self.schedule(interval);
            }
            Some((BackoffVerdict::RetryIn(delay), failures)) => {
                self.health.set(SyncHealth::Degraded { failures });
                self.schedule(delay);
            }
            Some((BackoffVerdict::GiveUp, _)) => {
                log_warn!("[Sync] poll failure ceiling reached, stopping.");
                self.inner.borrow_mut().running = false;
                self.health.set(SyncHealth::Failed);
            }
        }
    }
}
