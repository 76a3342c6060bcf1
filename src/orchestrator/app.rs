//! 应用装配 - 编排层
//!
//! initialize 负责装配资源（令牌存储、会话、各客户端），
//! run 负责完整主流程：认证 → 职业目录 → 装载简历 → 分析 → 导出

use std::sync::Arc;

use tracing::{info, warn};

use crate::clients::{AnalysisClient, CatalogClient};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::TokenStore;
use crate::models::{load_all_resume_files, ReportVerbosity};
use crate::orchestrator::SubmissionOrchestrator;
use crate::services::{ReportExporter, SessionManager, EXPORT_FILE_NAME};
use crate::utils::logging::truncate_text;

/// 应用主结构
pub struct App {
    config: Config,
    session: Arc<SessionManager>,
    catalog: CatalogClient,
    orchestrator: SubmissionOrchestrator,
    exporter: ReportExporter,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        log_startup(&config);

        let store = Arc::new(TokenStore::new(&config.token_file));
        let session = Arc::new(SessionManager::new(&config, store.clone()));
        let catalog = CatalogClient::new(&config, store.clone());
        let analysis = AnalysisClient::new(&config, store);
        let orchestrator = SubmissionOrchestrator::new(session.clone(), analysis);

        Self {
            config,
            session,
            catalog,
            orchestrator,
            exporter: ReportExporter::new(),
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> AppResult<()> {
        // 认证（内置凭证的自动登录）
        if !self.session.authenticate().await? {
            warn!("⚠️ 已有认证在途或认证被重置，程序结束");
            return Ok(());
        }

        // 拉取职业目录
        let professions = self.catalog.fetch_professions().await?;
        if professions.is_empty() {
            warn!("⚠️ 职业目录为空，程序结束");
            return Ok(());
        }
        info!("✓ 获取到 {} 个职业", professions.len());

        // 选择目标职业（配置指定 id，缺省取目录第一个）
        let target = match self.config.profession_id {
            Some(id) => professions
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| AppError::Other(format!("职业目录中不存在 id={}", id)))?,
            None => professions[0].clone(),
        };
        self.orchestrator.select_target(target);

        // 装载简历文件
        info!("\n📁 正在扫描简历目录: {}", self.config.resume_folder);
        let incoming = load_all_resume_files(&self.config.resume_folder).await?;
        if incoming.is_empty() {
            warn!("⚠️ 没有找到待分析的简历文件（PDF / DOCX），程序结束");
            return Ok(());
        }
        let added = self.orchestrator.add_documents(incoming)?;
        info!("📄 已装载 {} 份简历", added);

        // 分析
        let report = self.orchestrator.analyze().await?;
        info!("📋 简要报告预览: {}", truncate_text(&report.summary, 120));
        if self.config.verbose_logging {
            info!("📋 详细报告预览: {}", truncate_text(&report.detailed, 400));
        }

        // 导出详细报告
        let bytes = self
            .exporter
            .export(self.orchestrator.report(), ReportVerbosity::Detailed)?;
        tokio::fs::write(EXPORT_FILE_NAME, &bytes)
            .await
            .map_err(|e| AppError::file_write_failed(EXPORT_FILE_NAME, e))?;

        print_final_stats(self.orchestrator.batch().len(), bytes.len());
        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 简历匹配分析模式");
    info!("📡 后端地址: {}", config.backend_base_url);
    info!("{}", "=".repeat(60));
}

fn print_final_stats(file_count: usize, pdf_bytes: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 分析完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 分析简历: {} 份", file_count);
    info!("📄 报告已导出: {} ({} 字节)", EXPORT_FILE_NAME, pdf_bytes);
    info!("{}", "=".repeat(60));
}
