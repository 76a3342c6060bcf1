//! 报告导出 - 业务能力层
//!
//! 把选定档位的报告文本排版为单栏、固定页边距的 PDF 字节流。
//! 只读取传入的 (报告, 档位)，不触碰任何共享状态。

use printpdf::{BuiltinFont, Mm, PdfDocument};
use regex::Regex;

use crate::error::{AppError, AppResult, ExportError};
use crate::models::{AnalysisReport, ReportVerbosity};

/// 导出文件的固定文件名
pub const EXPORT_FILE_NAME: &str = "report.pdf";

// A4 版面参数
const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 10.0;
const FONT_SIZE_PT: f64 = 11.0;
const FOOTER_SIZE_PT: f64 = 9.0;
const LINE_HEIGHT_MM: f64 = 6.0;
/// 按 Helvetica 平均字宽估算的单行字符数
const MAX_CHARS_PER_LINE: usize = 95;

/// 报告导出器
pub struct ReportExporter;

impl ReportExporter {
    /// 创建新的报告导出器
    pub fn new() -> Self {
        Self
    }

    /// 导出选定档位的报告
    ///
    /// # 参数
    /// - `report`: 当前持有的报告（可能不存在）
    /// - `verbosity`: 导出档位
    ///
    /// # 返回
    /// PDF 文件字节流，文件名固定为 [`EXPORT_FILE_NAME`]
    pub fn export(
        &self,
        report: Option<&AnalysisReport>,
        verbosity: ReportVerbosity,
    ) -> AppResult<Vec<u8>> {
        let Some(report) = report else {
            return Err(AppError::Export(ExportError::NoReport));
        };

        let text = strip_markup(report.text(verbosity))?;
        let lines = wrap_text(&text, MAX_CHARS_PER_LINE);
        let pages = paginate(&lines, lines_per_page());

        let (doc, first_page, first_layer) = PdfDocument::new(
            "resume analysis report",
            Mm(PAGE_WIDTH_MM as f32),
            Mm(PAGE_HEIGHT_MM as f32),
            "layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(AppError::export_render_failed)?;

        let total_pages = pages.len();
        let mut page_index = first_page;
        let mut layer_index = first_layer;

        for (page_number, page_lines) in pages.iter().enumerate() {
            if page_number > 0 {
                let (p, l) = doc.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "layer 1");
                page_index = p;
                layer_index = l;
            }
            let layer = doc.get_page(page_index).get_layer(layer_index);

            let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
            for line in page_lines {
                y -= LINE_HEIGHT_MM;
                if line.is_empty() {
                    continue;
                }
                layer.use_text(line.clone(), FONT_SIZE_PT as f32, Mm(MARGIN_MM as f32), Mm(y as f32), &font);
            }

            let footer = format!(
                "{} | page {}/{}",
                chrono::Local::now().format("%Y-%m-%d"),
                page_number + 1,
                total_pages
            );
            layer.use_text(footer, FOOTER_SIZE_PT as f32, Mm(MARGIN_MM as f32), Mm((MARGIN_MM / 2.0) as f32), &font);
        }

        doc.save_to_bytes().map_err(AppError::export_render_failed)
    }
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// 每页可容纳的行数
fn lines_per_page() -> usize {
    (((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM) as usize).max(1)
}

/// 去掉远端文本里的标记标签（片段常被包在 <span> 等标签中）
fn strip_markup(text: &str) -> AppResult<String> {
    let re = Regex::new(r"<[^>]*>")?;
    let cleaned = re.replace_all(text, "");
    Ok(cleaned.replace("\r\n", "\n"))
}

/// 按词换行，超长的单词按字符硬切
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_chars = 0;

        for word in paragraph.split_whitespace() {
            let word_chars = word.chars().count();

            if word_chars > max_chars {
                // 超长词：先收掉当前行，再按字符硬切
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_chars = 0;
                }
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(max_chars) {
                    lines.push(chunk.iter().collect());
                }
                continue;
            }

            let needed = if current.is_empty() {
                word_chars
            } else {
                current_chars + 1 + word_chars
            };

            if needed > max_chars {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_chars = word_chars;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_chars = needed;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// 按每页行数切分页面，空文本也至少产出一页
fn paginate(lines: &[String], per_page: usize) -> Vec<Vec<String>> {
    if lines.is_empty() {
        return vec![Vec::new()];
    }
    lines.chunks(per_page).map(|chunk| chunk.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            summary: "Краткий отчет о сопоставлении резюме.".to_string(),
            detailed: "Подробный отчет о сопоставлении резюме. Компетенции и уровни перечислены построчно.".to_string(),
        }
    }

    #[test]
    fn test_export_without_report_fails() {
        let exporter = ReportExporter::new();
        let result = exporter.export(None, ReportVerbosity::Brief);
        assert!(matches!(
            result,
            Err(AppError::Export(ExportError::NoReport))
        ));
    }

    #[test]
    fn test_export_produces_pdf_bytes() {
        let exporter = ReportExporter::new();
        let report = sample_report();

        let brief = exporter
            .export(Some(&report), ReportVerbosity::Brief)
            .expect("导出简要报告失败");
        let detailed = exporter
            .export(Some(&report), ReportVerbosity::Detailed)
            .expect("导出详细报告失败");

        assert!(brief.starts_with(b"%PDF"), "输出应是 PDF 文件");
        assert!(detailed.starts_with(b"%PDF"));
        // 两档文本不同，版面字节也应不同
        assert_ne!(brief, detailed);
    }

    #[test]
    fn test_strip_markup_removes_tags() {
        let cleaned = strip_markup("<span>привет</span> <b>мир</b>").expect("清洗失败");
        assert_eq!(cleaned, "привет мир");
    }

    #[test]
    fn test_wrap_text_respects_max_chars() {
        let text = "alpha beta gamma delta epsilon";
        let lines = wrap_text(text, 11);

        assert_eq!(lines, vec!["alpha beta", "gamma delta", "epsilon"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 11));
    }

    #[test]
    fn test_wrap_text_hard_splits_long_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        let lines = wrap_text("один\n\nдва", 20);
        assert_eq!(lines, vec!["один", "", "два"]);
    }

    #[test]
    fn test_paginate_chunks_and_never_returns_zero_pages() {
        let lines: Vec<String> = (0..7).map(|i| format!("line {}", i)).collect();
        let pages = paginate(&lines, 3);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 3);
        assert_eq!(pages[2].len(), 1);

        assert_eq!(paginate(&[], 3).len(), 1);
    }

    #[test]
    fn test_long_report_spans_multiple_pages() {
        let long_line = "строка подробного отчета\n".repeat(200);
        let report = AnalysisReport {
            summary: "кратко".to_string(),
            detailed: long_line,
        };

        let bytes = ReportExporter::new()
            .export(Some(&report), ReportVerbosity::Detailed)
            .expect("导出失败");
        assert!(bytes.starts_with(b"%PDF"));
        // 200 行远超单页容量，文件应明显大于单页版本
        let single = ReportExporter::new()
            .export(Some(&report), ReportVerbosity::Brief)
            .expect("导出失败");
        assert!(bytes.len() > single.len());
    }
}
