//! WebSocket 封装模块
//!
//! 只封装单条连接的句柄本身：打开、收发文本帧、按正确顺序拆除。
//! 单例、重连与事件分发属于上层 `realtime` 模块的职责。

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

/// 连接句柄的回调集合
pub struct SocketCallbacks {
    pub on_open: Box<dyn Fn()>,
    pub on_message: Box<dyn Fn(String)>,
    pub on_close: Box<dyn Fn()>,
}

/// 单条 WebSocket 连接的句柄
///
/// 持有注册到浏览器的闭包；[`SocketHandle::shutdown`] 会先摘除全部
/// 监听器再关闭连接，保证不会有回调打到一个已死的传输上。
pub struct SocketHandle {
    ws: WebSocket,
    on_open: Option<Closure<dyn Fn()>>,
    on_message: Option<Closure<dyn Fn(MessageEvent)>>,
    on_close: Option<Closure<dyn Fn(CloseEvent)>>,
    on_error: Option<Closure<dyn Fn(web_sys::Event)>>,
}

impl SocketHandle {
    /// 打开连接并注册回调
    pub fn open(url: &str, callbacks: SocketCallbacks) -> Result<Self, String> {
        let ws = WebSocket::new(url).map_err(|e| format!("{:?}", e))?;

        let SocketCallbacks {
            on_open,
            on_message,
            on_close,
        } = callbacks;

        let open_closure = Closure::<dyn Fn()>::new(move || on_open());
        ws.set_onopen(Some(open_closure.as_ref().unchecked_ref()));

        let message_closure = Closure::<dyn Fn(MessageEvent)>::new(move |ev: MessageEvent| {
            if let Some(text) = ev.data().as_string() {
                on_message(text);
            }
        });
        ws.set_onmessage(Some(message_closure.as_ref().unchecked_ref()));

        // error 事件后必然跟随 close 事件，重连只挂在 close 上，
        // error 回调仅用于避免浏览器的未处理事件告警
        let error_closure = Closure::<dyn Fn(web_sys::Event)>::new(move |_ev| {});
        ws.set_onerror(Some(error_closure.as_ref().unchecked_ref()));

        let close_closure = Closure::<dyn Fn(CloseEvent)>::new(move |_ev: CloseEvent| on_close());
        ws.set_onclose(Some(close_closure.as_ref().unchecked_ref()));

        Ok(Self {
            ws,
            on_open: Some(open_closure),
            on_message: Some(message_closure),
            on_close: Some(close_closure),
            on_error: Some(error_closure),
        })
    }

    /// 连接是否处于 OPEN 状态
    pub fn is_open(&self) -> bool {
        self.ws.ready_state() == WebSocket::OPEN
    }

    /// 连接是否仍然存活（CONNECTING 或 OPEN）
    pub fn is_alive(&self) -> bool {
        matches!(
            self.ws.ready_state(),
            WebSocket::CONNECTING | WebSocket::OPEN
        )
    }

    /// 发送文本帧，连接未就绪时返回 `false`
    pub fn send_text(&self, text: &str) -> bool {
        self.is_open() && self.ws.send_with_str(text).is_ok()
    }

    /// 先摘除所有监听器，再关闭连接
    pub fn shutdown(&mut self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onclose(None);
        self.ws.set_onerror(None);
        self.on_open.take();
        self.on_message.take();
        self.on_close.take();
        self.on_error.take();
        let _ = self.ws.close();
    }
}

impl Drop for SocketHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
