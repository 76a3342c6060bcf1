/// 职业目录客户端
///
/// 拉取可选的职业列表（分析目标的目录）
use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::TokenStore;
use crate::models::{Profession, ProfessionListResponse};

/// 职业目录客户端
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<TokenStore>,
}

impl CatalogClient {
    /// 创建新的职业目录客户端
    pub fn new(config: &Config, store: Arc<TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backend_base_url.clone(),
            store,
        }
    }

    /// 拉取职业目录
    ///
    /// # 返回
    /// 返回按服务端顺序排列的职业列表
    pub async fn fetch_professions(&self) -> AppResult<Vec<Profession>> {
        let endpoint = format!("{}/all_professions", self.base_url);

        let mut request = self.http.get(&endpoint);
        if let Some(token) = self.store.get() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.ok();
            return Err(AppError::api_bad_response(endpoint, status.as_u16(), detail));
        }

        let body: ProfessionListResponse = response
            .json()
            .await
            .map_err(|e| AppError::api_json_parse_failed(e))?;

        debug!("获取到 {} 个职业", body.data.len());
        Ok(body.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_stub_server, StubResponse};

    #[tokio::test]
    async fn test_fetch_professions_preserves_order() {
        let (base_url, _hits) = spawn_stub_server(vec![StubResponse::ok(
            r#"{"data":[{"id":3,"name":"backend-engineer"},{"id":1,"name":"data-scientist"}]}"#,
        )])
        .await;

        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let store = Arc::new(TokenStore::new(dir.path().join("token")));
        let config = Config {
            backend_base_url: base_url,
            ..Config::default()
        };

        let professions = CatalogClient::new(&config, store)
            .fetch_professions()
            .await
            .expect("拉取职业目录失败");

        assert_eq!(professions.len(), 2);
        assert_eq!(professions[0].id, 3);
        assert_eq!(professions[0].name, "backend-engineer");
        assert_eq!(professions[1].id, 1);
    }
}
