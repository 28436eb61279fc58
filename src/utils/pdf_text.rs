//! PDF 文本提取
//!
//! lopdf 是同步库，调用方应放到阻塞线程池（`web::block`）中执行。

use std::fmt;
use std::path::{Path, PathBuf};

use lopdf::Document;

/// 文本提取失败的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfTextError {
    /// 文件无法打开或不是合法的 PDF
    Load { path: PathBuf, reason: String },
    /// 某一页的文本无法提取
    Page { page: u32, reason: String },
}

impl fmt::Display for PdfTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfTextError::Load { path, reason } => {
                write!(f, "cannot read PDF {}: {reason}", path.display())
            }
            PdfTextError::Page { page, reason } => {
                write!(f, "cannot extract text from page {page}: {reason}")
            }
        }
    }
}

impl std::error::Error for PdfTextError {}

impl PdfTextError {
    /// 替换错误中的文件路径，避免把服务器上的绝对路径暴露给用户
    pub fn with_display_path(self, shown: impl Into<PathBuf>) -> Self {
        match self {
            PdfTextError::Load { reason, .. } => PdfTextError::Load {
                path: shown.into(),
                reason,
            },
            other => other,
        }
    }
}

/// 按页码顺序提取并拼接所有页面的文本
pub fn extract_text(path: &Path) -> Result<String, PdfTextError> {
    let doc = Document::load(path).map_err(|e| PdfTextError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut text = String::new();
    // get_pages 返回 BTreeMap，已按页码排序
    for page_num in doc.get_pages().into_keys() {
        let content = doc
            .extract_text(&[page_num])
            .map_err(|e| PdfTextError::Page {
                page: page_num,
                reason: e.to_string(),
            })?;
        text.push_str(&content);
    }

    Ok(text)
}
