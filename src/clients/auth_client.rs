/// 认证接口客户端
///
/// 封装凭证交换调用，不持有任何会话状态
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult, AuthError};

/// /token 接口响应
///
/// 线上同时存在过两种字段名，都接受
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    token: Option<String>,
}

/// 认证客户端
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// 创建新的认证客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backend_base_url.clone(),
        }
    }

    /// 交换凭证获取会话令牌
    ///
    /// # 参数
    /// - `username`: 用户名（邮箱）
    /// - `password`: 密码
    ///
    /// # 返回
    /// 成功时返回 bearer 令牌；422 一律视为凭证校验失败，调用方不应重试
    pub async fn request_token(&self, username: &str, password: &str) -> AppResult<String> {
        let endpoint = format!("{}/token", self.base_url);

        let response = self
            .http
            .post(&endpoint)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint.clone(), e))?;

        let status = response.status();

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let detail = response.text().await.ok();
            debug!("凭证校验被拒绝: {:?}", detail);
            return Err(AppError::Auth(AuthError::ValidationRejected { detail }));
        }

        if !status.is_success() {
            let detail = response.text().await.ok();
            return Err(AppError::api_bad_response(endpoint, status.as_u16(), detail));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::api_json_parse_failed(e))?;

        let token = body.access_token.or(body.token).ok_or_else(|| {
            AppError::api_bad_response(
                endpoint,
                status.as_u16(),
                Some("响应中缺少 access_token".to_string()),
            )
        })?;

        debug!("凭证交换成功");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_stub_server, StubResponse};

    fn make_client(base_url: &str) -> AuthClient {
        let config = Config {
            backend_base_url: base_url.to_string(),
            ..Config::default()
        };
        AuthClient::new(&config)
    }

    #[tokio::test]
    async fn test_request_token_accepts_both_field_names() {
        let (base_url, _hits) =
            spawn_stub_server(vec![StubResponse::ok(r#"{"access_token":"t1"}"#)]).await;
        let token = make_client(&base_url)
            .request_token("d@mail.ru", "d")
            .await
            .expect("凭证交换失败");
        assert_eq!(token, "t1");

        let (base_url, _hits) = spawn_stub_server(vec![StubResponse::ok(r#"{"token":"t2"}"#)]).await;
        let token = make_client(&base_url)
            .request_token("d@mail.ru", "d")
            .await
            .expect("凭证交换失败");
        assert_eq!(token, "t2");
    }

    #[tokio::test]
    async fn test_request_token_validation_rejected() {
        let (base_url, hits) = spawn_stub_server(vec![StubResponse::status(
            422,
            r#"{"detail":"value is not a valid email address"}"#,
        )])
        .await;

        let result = make_client(&base_url).request_token("not-an-email", "d").await;

        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::ValidationRejected { .. }))
        ));
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_request_token_missing_token_field() {
        let (base_url, _hits) = spawn_stub_server(vec![StubResponse::ok(r#"{}"#)]).await;
        let result = make_client(&base_url).request_token("d@mail.ru", "d").await;
        assert!(matches!(result, Err(AppError::Api(_))));
    }
}
