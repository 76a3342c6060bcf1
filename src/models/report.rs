//! 分析报告模型

use serde::{Deserialize, Serialize};

/// 报告详细程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportVerbosity {
    /// 简要报告
    Brief,
    /// 详细报告
    Detailed,
}

/// 分析报告
///
/// 两档文本由远端一次性生成，要么都有要么都没有
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// 简要报告文本
    pub summary: String,
    /// 详细报告文本
    pub detailed: String,
}

impl AnalysisReport {
    /// 按详细程度选择对应档位的文本
    pub fn text(&self, verbosity: ReportVerbosity) -> &str {
        match verbosity {
            ReportVerbosity::Brief => &self.summary,
            ReportVerbosity::Detailed => &self.detailed,
        }
    }
}
