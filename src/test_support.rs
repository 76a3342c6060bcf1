//! 测试辅助：最小 HTTP 打桩服务
//!
//! 按脚本依次应答请求（超出脚本后重复最后一条），
//! 让单元测试走真实的 HTTP 往返而不依赖外部服务。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// 单次应答脚本
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
    pub delay_ms: u64,
}

impl StubResponse {
    /// 200 应答
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    /// 指定状态码的应答
    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay_ms: 0,
        }
    }

    /// 延迟一段时间后再应答
    pub fn delayed(status: u16, body: &str, delay_ms: u64) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay_ms,
        }
    }
}

/// 启动打桩服务
///
/// # 返回
/// 返回 (base_url, 命中计数)
pub async fn spawn_stub_server(script: Vec<StubResponse>) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("绑定打桩端口失败");
    let addr = listener.local_addr().expect("获取打桩地址失败");

    let hits = Arc::new(AtomicUsize::new(0));
    let hits_inner = hits.clone();

    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            let index = hits_inner.fetch_add(1, Ordering::SeqCst);
            let Some(response) = script.get(index).or_else(|| script.last()).cloned() else {
                break;
            };
            tokio::spawn(async move {
                let _ = handle_connection(socket, response).await;
            });
        }
    });

    (format!("http://{}", addr), hits)
}

async fn handle_connection(mut socket: TcpStream, response: StubResponse) -> std::io::Result<()> {
    // 读到请求头结束，再按 Content-Length 把 body 读完
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
    };

    let content_length = parse_content_length(&buf[..header_end]);
    let total = header_end + content_length;
    while buf.len() < total {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    if response.delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(response.delay_ms)).await;
    }

    let reason = match response.status {
        200 => "OK",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason,
        response.body.len(),
        response.body
    );
    socket.write_all(payload.as_bytes()).await?;
    socket.flush().await?;
    Ok(())
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

fn parse_content_length(header: &[u8]) -> usize {
    let text = String::from_utf8_lossy(header);
    text.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}
