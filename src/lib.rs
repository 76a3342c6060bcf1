//! # Resume Analyze Submit
//!
//! 简历批量匹配分析的客户端编排层
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（会话令牌），只暴露能力
//! - `TokenStore` - 唯一的令牌 owner，提供读 / 写 / 清除能力
//!
//! ### ② 接口层（Clients）
//! - `clients/` - 封装远端 HTTP 接口的调用细节
//! - `AuthClient` - 凭证交换
//! - `CatalogClient` - 职业目录
//! - `AnalysisClient` - 批量简历分析
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `SessionManager` - 认证状态机 / 并发闸 / 有界重试
//! - `ReportExporter` - 报告 PDF 导出
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/submission` - 批次 / 目标 / 报告的一致性编排
//! - `orchestrator/app` - 应用装配与主流程
//!
//! ## 模块结构

pub mod batch;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// 重新导出常用类型
pub use batch::DocumentBatch;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::TokenStore;
pub use models::{
    AnalysisReport, CandidateDocument, DocumentKind, NewDocument, Profession, ReportVerbosity,
};
pub use orchestrator::{App, SubmissionOrchestrator};
pub use services::{ReportExporter, SessionManager, SessionState, EXPORT_FILE_NAME};
