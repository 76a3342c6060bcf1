//! 提交编排 - 编排层
//!
//! 持有批次 / 目标职业 / 报告三者，并维护一致性：
//! 任何批次或目标的变更都会使已持有的报告过期。
//! 过期判断靠代数比较完成，报告在生成时带上当时的代数，
//! 读取时只需一次相等比较，不需要在每个变更点手工清空。

use std::sync::Arc;

use tracing::{info, warn};

use crate::batch::DocumentBatch;
use crate::clients::AnalysisClient;
use crate::error::{AnalysisError, AppError, AppResult, AuthError};
use crate::models::{AnalysisReport, CandidateDocument, NewDocument, Profession};
use crate::services::SessionManager;

/// 带代数戳的报告
#[derive(Debug, Clone)]
struct StampedReport {
    report: AnalysisReport,
    generation: u64,
}

/// 提交编排器
pub struct SubmissionOrchestrator {
    session: Arc<SessionManager>,
    client: AnalysisClient,
    batch: DocumentBatch,
    target: Option<Profession>,
    target_generation: u64,
    report: Option<StampedReport>,
}

impl SubmissionOrchestrator {
    /// 创建新的提交编排器
    pub fn new(session: Arc<SessionManager>, client: AnalysisClient) -> Self {
        Self {
            session,
            client,
            batch: DocumentBatch::new(),
            target: None,
            target_generation: 0,
            report: None,
        }
    }

    /// 选择目标职业
    ///
    /// 换目标（哪怕是同一个）都会使已持有的报告过期
    pub fn select_target(&mut self, profession: Profession) {
        info!("选择目标职业: {}", profession);
        self.target = Some(profession);
        self.target_generation += 1;
    }

    /// 当前选中的目标职业
    pub fn target(&self) -> Option<&Profession> {
        self.target.as_ref()
    }

    /// 发起一次完整分析
    ///
    /// 前置条件：批次非空且已选择目标职业，不满足时不发起网络请求。
    /// 会话未认证时先走降级自动登录。远端失败不影响已持有的报告。
    /// 相同批次 / 目标的重复调用会重复发起远端请求（不做结果缓存）。
    pub async fn analyze(&mut self) -> AppResult<&AnalysisReport> {
        if self.batch.is_empty() {
            return Err(AppError::Analysis(AnalysisError::EmptyBatch));
        }
        let Some(target) = self.target.clone() else {
            return Err(AppError::Analysis(AnalysisError::NoProfessionSelected));
        };

        if !self.session.is_authenticated() {
            self.session.authenticate().await?;
            if !self.session.is_authenticated() {
                return Err(AppError::Auth(AuthError::NotAuthenticated));
            }
        }

        let generation = self.current_generation();
        info!("🔍 发起分析: {} 个文件, 目标职业 {}", self.batch.len(), target.name);

        let report = match self.client.analyze_files(self.batch.documents(), target.id).await {
            Ok(report) => report,
            Err(err) => {
                warn!("分析调用失败: {}", err);
                return Err(AppError::Analysis(AnalysisError::RemoteCallFailed {
                    source: Box::new(err),
                }));
            }
        };

        info!("✓ 分析完成");
        let stamped = self.report.insert(StampedReport { report, generation });
        Ok(&stamped.report)
    }

    /// 当前有效报告
    ///
    /// 报告生成后批次或目标发生过任何变更时返回 None
    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report
            .as_ref()
            .filter(|stamped| stamped.generation == self.current_generation())
            .map(|stamped| &stamped.report)
    }

    // ---------- 批次操作的薄代理，便于 UI 层直接调用 ----------

    /// 追加简历文件
    pub fn add_documents(&mut self, incoming: Vec<NewDocument>) -> AppResult<usize> {
        self.batch.add(incoming)
    }

    /// 删除指定位置的简历
    pub fn remove_document(&mut self, index: usize) -> AppResult<CandidateDocument> {
        self.batch.remove(index)
    }

    /// 清空批次
    pub fn clear_documents(&mut self) {
        self.batch.clear();
    }

    /// 当前批次
    pub fn batch(&self) -> &DocumentBatch {
        &self.batch
    }

    /// 批次代数与目标代数之和，任一变更都会让它递增
    fn current_generation(&self) -> u64 {
        self.batch.generation() + self.target_generation
    }
}
