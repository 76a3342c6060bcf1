//! 会话管理 - 业务能力层
//!
//! 只负责"认证"能力：状态机、并发闸、有界重试、令牌生命周期。
//!
//! 状态机：
//! Unauthenticated → Authenticating → { Authenticated | Failed }，
//! Failed 可以通过再次发起认证回到 Authenticating。

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::clients::AuthClient;
use crate::config::Config;
use crate::error::{AppError, AppResult, AuthError};
use crate::infrastructure::TokenStore;

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 未认证
    Unauthenticated,
    /// 认证进行中
    Authenticating,
    /// 已认证
    Authenticated,
    /// 认证失败（可再次发起）
    Failed,
}

/// 会话管理器
///
/// 职责：
/// - 维护唯一的会话状态机
/// - 并发闸：同一时刻最多一条认证链在途
/// - 有界重试：凭证校验失败不重试，其余失败按固定间隔重试
/// - 通过 TokenStore 持久化令牌
pub struct SessionManager {
    client: AuthClient,
    store: Arc<TokenStore>,
    state: Mutex<SessionState>,
    authenticating: AtomicBool,
    reset_epoch: AtomicU64,
    fallback_username: String,
    fallback_password: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl SessionManager {
    /// 创建新的会话管理器
    pub fn new(config: &Config, store: Arc<TokenStore>) -> Self {
        Self {
            client: AuthClient::new(config),
            store,
            state: Mutex::new(SessionState::Unauthenticated),
            authenticating: AtomicBool::new(false),
            reset_epoch: AtomicU64::new(0),
            fallback_username: config.auth_username.clone(),
            fallback_password: config.auth_password.clone(),
            max_retries: config.max_auth_retries,
            retry_delay: Duration::from_millis(config.auth_retry_delay_ms),
        }
    }

    /// 用户提交凭证的主认证流程
    ///
    /// 并发闸：已有认证链在途时，后来者立即得到 `Ok(false)`，
    /// 不排队也不发出第二次凭证交换请求。
    ///
    /// # 返回
    /// - `Ok(true)`: 认证成功，令牌已写入存储
    /// - `Ok(false)`: 有认证在途，或认证期间被 reset
    /// - `Err(..)`: 凭证校验被拒绝 / 重试耗尽
    pub async fn login(&self, username: &str, password: &str) -> AppResult<bool> {
        if self.authenticating.swap(true, Ordering::SeqCst) {
            debug!("已有认证请求在途，本次调用直接返回");
            return Ok(false);
        }
        self.set_state(SessionState::Authenticating);

        let result = self.run_auth_loop(username, password).await;
        self.authenticating.store(false, Ordering::SeqCst);
        result
    }

    /// 内置凭证的自动登录（降级兜底流程）
    pub async fn authenticate(&self) -> AppResult<bool> {
        let username = self.fallback_username.clone();
        let password = self.fallback_password.clone();
        self.login(&username, &password).await
    }

    /// 有界重试循环
    ///
    /// 每次等待结束和写入令牌之前都核对 reset 代数，
    /// 避免过期的认证链覆盖一次新的 reset。
    async fn run_auth_loop(&self, username: &str, password: &str) -> AppResult<bool> {
        let epoch = self.reset_epoch.load(Ordering::SeqCst);
        let mut attempt: u32 = 0;

        loop {
            match self.client.request_token(username, password).await {
                Ok(token) => {
                    if self.reset_epoch.load(Ordering::SeqCst) != epoch {
                        debug!("认证期间发生过 reset，丢弃本次令牌");
                        return Ok(false);
                    }
                    if let Err(e) = self.store.set(&token) {
                        self.set_state(SessionState::Failed);
                        return Err(e);
                    }
                    self.set_state(SessionState::Authenticated);
                    info!("✓ 认证成功");
                    return Ok(true);
                }
                Err(err) if is_validation_rejection(&err) => {
                    warn!("凭证校验被拒绝，不再重试: {}", err);
                    self.set_state(SessionState::Failed);
                    return Err(err);
                }
                Err(err) => {
                    if attempt >= self.max_retries {
                        warn!("认证失败，已达到最大重试次数 {}", self.max_retries);
                        self.set_state(SessionState::Failed);
                        return Err(AppError::Auth(AuthError::RetriesExhausted {
                            attempts: attempt + 1,
                            source: Box::new(err),
                        }));
                    }

                    attempt += 1;
                    warn!(
                        "认证请求失败 ({}/{}), {} ms 后重试: {}",
                        attempt,
                        self.max_retries,
                        self.retry_delay.as_millis(),
                        err
                    );
                    sleep(self.retry_delay).await;

                    if self.reset_epoch.load(Ordering::SeqCst) != epoch {
                        debug!("等待期间发生过 reset，停止重试");
                        return Ok(false);
                    }
                }
            }
        }
    }

    /// 当前令牌（无副作用）
    pub fn token(&self) -> Option<String> {
        self.store.get()
    }

    /// 是否已持有令牌
    pub fn is_authenticated(&self) -> bool {
        self.store.get().is_some()
    }

    /// 当前会话状态
    pub fn state(&self) -> SessionState {
        *self.state.lock().unwrap()
    }

    /// 重置认证
    ///
    /// 清除令牌并回到 Unauthenticated；在途的重试链会在
    /// 下一个观察点发现 reset 并停止，不会覆盖本次清除。
    pub fn reset_auth(&self) -> AppResult<()> {
        self.reset_epoch.fetch_add(1, Ordering::SeqCst);
        self.store.clear()?;
        self.set_state(SessionState::Unauthenticated);
        info!("已重置认证状态");
        Ok(())
    }

    fn set_state(&self, next: SessionState) {
        let mut state = self.state.lock().unwrap();
        if *state != next {
            debug!("会话状态: {:?} -> {:?}", *state, next);
            *state = next;
        }
    }
}

fn is_validation_rejection(err: &AppError) -> bool {
    matches!(err, AppError::Auth(AuthError::ValidationRejected { .. }))
}
