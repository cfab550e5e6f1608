//! 定时器封装模块
//!
//! `Interval` 封装 `setInterval`，`Timeout` 封装 `setTimeout`。
//! 两者在 drop 时自动清除，调用方通过持有/丢弃句柄管理生命周期。

use wasm_bindgen::prelude::*;

/// 周期性定时器
pub struct Interval {
    handle: Option<i32>,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 创建周期性定时器；window 不可用时返回 `None`（如非浏览器环境）
    pub fn new<F>(millis: u32, callback: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::new(callback);
        let window = web_sys::window()?;
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .ok()?;
        Some(Self {
            handle: Some(handle),
            closure,
        })
    }

    /// 取消定时器；drop 时会自动调用
    pub fn cancel(&mut self) {
        if let (Some(window), Some(handle)) = (web_sys::window(), self.handle.take()) {
            window.clear_interval_with_handle(handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 一次性定时器
pub struct Timeout {
    handle: Option<i32>,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Timeout {
    /// 创建一次性定时器；window 不可用时返回 `None`
    pub fn new<F>(millis: u32, callback: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::new(callback);
        let window = web_sys::window()?;
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .ok()?;
        Some(Self {
            handle: Some(handle),
            closure,
        })
    }

    /// 取消尚未触发的定时器；drop 时会自动调用
    pub fn cancel(&mut self) {
        if let (Some(window), Some(handle)) = (web_sys::window(), self.handle.take()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
