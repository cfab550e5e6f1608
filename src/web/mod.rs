//! 原生 Web API 封装模块
//!
//! 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
//! 以减小 WASM 二进制体积。所有对 `web_sys` 的直接调用都集中在这里，
//! 上层模块只消费这些封装。

pub mod http;
pub mod route;
pub mod router;
pub mod socket;
pub mod storage;
pub mod timer;

pub use http::{AbortGuard, HttpClient, HttpError};
pub use storage::{LocalStorage, SessionStorage};
pub use timer::{Interval, Timeout};
