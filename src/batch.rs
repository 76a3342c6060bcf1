//! 简历批次
//!
//! 有序、可变的候选简历集合：过滤入队、按序删除、整体清空。
//! 每次成功变更都会递增代数（generation），上层用代数比较判断
//! 已持有的分析报告是否过期，而不必到处手工清空。

use tracing::{debug, warn};

use crate::error::{AppError, AppResult, BatchError};
use crate::models::{CandidateDocument, DocumentKind, NewDocument};

/// 简历批次
#[derive(Debug, Default)]
pub struct DocumentBatch {
    documents: Vec<CandidateDocument>,
    next_id: u64,
    generation: u64,
}

impl DocumentBatch {
    /// 创建空批次
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一组文件
    ///
    /// 仅保留 PDF / DOCX；同一次调用内同名文件只收一份，
    /// 跨调用的重复文件正常累积。过滤后为空时返回错误且批次不变。
    ///
    /// # 返回
    /// 实际入队的文件数量
    pub fn add(&mut self, incoming: Vec<NewDocument>) -> AppResult<usize> {
        let mut accepted: Vec<CandidateDocument> = Vec::new();

        for file in incoming {
            let Some(kind) = DocumentKind::from_file_name(&file.file_name) else {
                debug!("忽略不支持的文件: {}", file.file_name);
                continue;
            };

            if accepted.iter().any(|doc| doc.file_name == file.file_name) {
                warn!("同一次添加中出现重复文件，跳过: {}", file.file_name);
                continue;
            }

            accepted.push(CandidateDocument {
                id: self.next_id + accepted.len() as u64,
                file_name: file.file_name,
                kind,
                bytes: file.bytes,
            });
        }

        if accepted.is_empty() {
            return Err(AppError::Batch(BatchError::NoSupportedFiles));
        }

        let added = accepted.len();
        self.next_id += added as u64;
        self.documents.extend(accepted);
        self.generation += 1;

        debug!("批次新增 {} 个文件，当前共 {} 个", added, self.documents.len());
        Ok(added)
    }

    /// 删除指定位置的文件
    pub fn remove(&mut self, index: usize) -> AppResult<CandidateDocument> {
        if index >= self.documents.len() {
            return Err(AppError::Batch(BatchError::IndexOutOfRange {
                index,
                len: self.documents.len(),
            }));
        }

        let removed = self.documents.remove(index);
        self.generation += 1;

        debug!("已删除第 {} 个文件: {}", index, removed.file_name);
        Ok(removed)
    }

    /// 清空批次
    pub fn clear(&mut self) {
        if !self.documents.is_empty() {
            self.documents.clear();
            self.generation += 1;
        }
    }

    /// 按插入顺序遍历（可重复调用，每次从头开始）
    pub fn iter(&self) -> impl Iterator<Item = &CandidateDocument> + '_ {
        self.documents.iter()
    }

    /// 当前批次内容的切片视图
    pub fn documents(&self) -> &[CandidateDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// 当前代数，任何成功变更都会使其递增
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
