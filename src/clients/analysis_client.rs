/// 分析接口客户端
///
/// 把整批简历与目标职业一次性提交给远端匹配服务
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::TokenStore;
use crate::models::{AnalysisReport, CandidateDocument};

/// 分析客户端
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<TokenStore>,
}

impl AnalysisClient {
    /// 创建新的分析客户端
    pub fn new(config: &Config, store: Arc<TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backend_base_url.clone(),
            store,
        }
    }

    /// 提交整批简历进行匹配分析
    ///
    /// # 参数
    /// - `documents`: 当前批次的全部简历
    /// - `profession_id`: 目标职业 id
    ///
    /// # 返回
    /// 返回两档报告（一次性生成，不存在只有一档的情况）
    pub async fn analyze_files(
        &self,
        documents: &[CandidateDocument],
        profession_id: i64,
    ) -> AppResult<AnalysisReport> {
        let endpoint = format!("{}/analyze_files/{}", self.base_url, profession_id);

        let mut form = Form::new();
        for document in documents {
            let part = Part::bytes(document.bytes.clone())
                .file_name(document.file_name.clone())
                .mime_str(document.kind.mime())
                .map_err(|e| AppError::api_request_failed(endpoint.clone(), e))?;
            // 服务端按重复的 files 键接收整个列表
            form = form.part("files", part);
        }

        debug!(
            "提交分析请求: {} 个文件, 职业 id={}",
            documents.len(),
            profession_id
        );

        let mut request = self.http.post(&endpoint).multipart(form);
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

        let report: AnalysisReport = response
            .json()
            .await
            .map_err(|e| AppError::api_json_parse_failed(e))?;

        debug!("分析请求成功");
        Ok(report)
    }
}
