//! 简历文件模型

use serde::{Deserialize, Serialize};

/// 支持的简历文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// PDF 简历
    Pdf,
    /// DOCX 简历
    Docx,
}

/// 扩展名（小写）到文件类型的静态映射
static EXTENSION_KINDS: phf::Map<&'static str, DocumentKind> = phf::phf_map! {
    "pdf" => DocumentKind::Pdf,
    "docx" => DocumentKind::Docx,
};

impl DocumentKind {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
        }
    }

    /// 获取 MIME 类型
    pub fn mime(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// 从扩展名解析文件类型（大小写不敏感）
    pub fn from_extension(ext: &str) -> Option<Self> {
        EXTENSION_KINDS.get(ext.to_lowercase().as_str()).copied()
    }

    /// 从文件名解析文件类型
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = file_name.rsplit_once('.').map(|(_, ext)| ext)?;
        Self::from_extension(ext)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 未入队的原始文件（名字 + 内容）
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl NewDocument {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// 已入队的候选简历
///
/// 入队后不可变；id 在批次内稳定，删除不影响其余条目的 id
#[derive(Debug, Clone)]
pub struct CandidateDocument {
    pub id: u64,
    pub file_name: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}
