//! 环境配置
//!
//! 唯一的外部配置项是 API 基地址，构建时通过 `LAUNDRYLOBBY_API_URL`
//! 注入，缺省回退到本地开发地址。REST 与实时通道的目标都从它派生。

/// 本地开发时的后端地址
const DEV_API_URL: &str = "http://localhost:5000/api";

/// REST API 基地址（无尾部斜杠）
pub fn api_base_url() -> String {
    option_env!("LAUNDRYLOBBY_API_URL")
        .unwrap_or(DEV_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// 实时通道地址：与 REST 同源，协议换成 ws(s)，路径固定为 `/realtime`
pub fn socket_url(token: &str) -> String {
    let base = api_base_url();
    let origin = base
        .strip_suffix("/api")
        .unwrap_or(&base);
    let ws_origin = if let Some(rest) = origin.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = origin.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        format!("ws://{}", origin)
    };
    // token 同时作为查询参数与握手帧携带，兼容两类传输层
    format!("{}/realtime?token={}", ws_origin, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_url_derives_from_api_base() {
        let url = socket_url("tok");
        assert!(url.starts_with("ws://") || url.starts_with("wss://"));
        assert!(url.ends_with("/realtime?token=tok"));
        assert!(!url.contains("/api/realtime"));
    }
}
