use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{AppError, AppResult, FileError};
use crate::models::document::{DocumentKind, NewDocument};

/// 从磁盘加载单个简历文件
pub async fn load_resume_file(path: &Path) -> AppResult<NewDocument> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| {
            AppError::File(FileError::NotFound {
                path: path.display().to_string(),
            })
        })?;

    Ok(NewDocument::new(file_name, bytes))
}

/// 从文件夹中加载所有 PDF / DOCX 简历文件
///
/// 按文件名排序，保证批次顺序稳定
pub async fn load_all_resume_files(folder_path: &str) -> AppResult<Vec<NewDocument>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(AppError::File(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }));
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        let file_name = path.file_name().unwrap_or_default().to_string_lossy().to_string();
        if DocumentKind::from_file_name(&file_name).is_some() {
            paths.push(path);
        }
    }

    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_resume_file(&path).await {
            Ok(document) => documents.push(document),
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(documents)
}
