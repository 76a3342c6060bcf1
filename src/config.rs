use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端服务地址
    pub backend_base_url: String,
    /// 内置降级登录用户名
    pub auth_username: String,
    /// 内置降级登录密码
    pub auth_password: String,
    /// 认证最大重试次数（凭证校验失败不计入）
    pub max_auth_retries: u32,
    /// 认证重试间隔（毫秒）
    pub auth_retry_delay_ms: u64,
    /// 会话令牌持久化文件
    pub token_file: String,
    /// 简历文件存放目录
    pub resume_folder: String,
    /// 目标职业 id（缺省时取目录第一个）
    pub profession_id: Option<i64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_base_url: "http://127.0.0.1:8000".to_string(),
            auth_username: "d@mail.ru".to_string(),
            auth_password: "d".to_string(),
            max_auth_retries: 2,
            auth_retry_delay_ms: 3000,
            token_file: ".session_token".to_string(),
            resume_folder: "resumes".to_string(),
            profession_id: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            backend_base_url: std::env::var("BACKEND_BASE_URL").unwrap_or(default.backend_base_url),
            auth_username: std::env::var("AUTH_USERNAME").unwrap_or(default.auth_username),
            auth_password: std::env::var("AUTH_PASSWORD").unwrap_or(default.auth_password),
            max_auth_retries: std::env::var("MAX_AUTH_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_auth_retries),
            auth_retry_delay_ms: std::env::var("AUTH_RETRY_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.auth_retry_delay_ms),
            token_file: std::env::var("TOKEN_FILE").unwrap_or(default.token_file),
            resume_folder: std::env::var("RESUME_FOLDER").unwrap_or(default.resume_folder),
            profession_id: std::env::var("PROFESSION_ID").ok().and_then(|v| v.parse().ok()),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 配置文件加载，缺省字段回落到默认值
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
