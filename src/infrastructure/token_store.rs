//! 令牌存储 - 基础设施层
//!
//! 持有唯一的会话令牌资源，只暴露读 / 写 / 清除能力

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{AppError, AppResult};

/// 令牌存储
///
/// 职责：
/// - 持有唯一的会话令牌
/// - 写入时同步持久化到磁盘，进程重启后可恢复
/// - 不认识认证流程，也不发起任何网络请求
pub struct TokenStore {
    path: PathBuf,
    cached: Mutex<Option<String>>,
}

impl TokenStore {
    /// 创建令牌存储，并恢复上次持久化的令牌
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            path,
            cached: Mutex::new(cached),
        }
    }

    /// 写入令牌
    pub fn set(&self, token: &str) -> AppResult<()> {
        fs::write(&self.path, token)
            .map_err(|e| AppError::file_write_failed(self.path.display().to_string(), e))?;
        *self.cached.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    /// 读取令牌（无副作用）
    pub fn get(&self) -> Option<String> {
        self.cached.lock().unwrap().clone()
    }

    /// 清除令牌（内存与磁盘一并清除）
    pub fn clear(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .map_err(|e| AppError::file_write_failed(self.path.display().to_string(), e))?;
        }
        *self.cached.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let store = TokenStore::new(dir.path().join("token"));

        assert_eq!(store.get(), None);

        store.set("abc123").expect("写入令牌失败");
        assert_eq!(store.get(), Some("abc123".to_string()));

        store.clear().expect("清除令牌失败");
        assert_eq!(store.get(), None);
        // 重复清除不应报错
        store.clear().expect("重复清除失败");
    }

    #[test]
    fn test_token_survives_restart() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("token");

        let store = TokenStore::new(&path);
        store.set("persisted").expect("写入令牌失败");
        drop(store);

        // 新实例从磁盘恢复
        let reopened = TokenStore::new(&path);
        assert_eq!(reopened.get(), Some("persisted".to_string()));
    }
}
