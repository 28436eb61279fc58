//! multipart/form-data 表单读取
//!
//! 上传上限由 `upload.max_size` 决定，文件直接读入内存，之后再做内容识别和落盘。

use std::collections::HashMap;
use std::fmt;

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;

use crate::models::{ApiResponse, ErrorCode};

// 普通文本字段的上限
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub enum MultipartError {
    /// 字段超过大小限制
    TooLarge { field: String, limit: usize },
    /// 请求体无法解析
    Malformed(String),
}

impl fmt::Display for MultipartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultipartError::TooLarge { field, limit } => {
                write!(f, "field '{field}' is too large (max {})", format_size(*limit))
            }
            MultipartError::Malformed(reason) => write!(f, "malformed multipart body: {reason}"),
        }
    }
}

impl std::error::Error for MultipartError {}

impl MultipartError {
    /// 统一的 400 响应
    pub fn to_response(&self) -> HttpResponse {
        let code = match self {
            MultipartError::TooLarge { .. } => ErrorCode::FileSizeExceeded,
            MultipartError::Malformed(_) => ErrorCode::BadRequest,
        };
        HttpResponse::BadRequest().json(ApiResponse::error_empty(code, self.to_string()))
    }
}

fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    if bytes >= MB && bytes % MB == 0 {
        format!("{} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{bytes} bytes")
    }
}

#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl UploadForm {
    /// 读取整个表单；空文件部分视为未上传
    pub async fn read(mut payload: Multipart, max_file_size: usize) -> Result<Self, MultipartError> {
        let mut form = UploadForm::default();

        while let Some(mut field) = payload
            .try_next()
            .await
            .map_err(|e| MultipartError::Malformed(e.to_string()))?
        {
            let content_disposition = field.content_disposition();
            let name = content_disposition
                .and_then(|cd| cd.get_name())
                .unwrap_or_default()
                .to_string();
            let filename = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string());

            let limit = if filename.is_some() {
                max_file_size
            } else {
                MAX_TEXT_FIELD_SIZE
            };

            let mut data = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(|e| MultipartError::Malformed(e.to_string()))?;
                if data.len() + chunk.len() > limit {
                    return Err(MultipartError::TooLarge { field: name, limit });
                }
                data.extend_from_slice(&chunk);
            }

            match filename {
                Some(filename) => {
                    if !data.is_empty() {
                        form.files.insert(name, UploadedFile { filename, data });
                    }
                }
                None => {
                    let value = String::from_utf8(data).map_err(|_| {
                        MultipartError::Malformed(format!("field '{name}' is not UTF-8"))
                    })?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// 取非空文本字段（已去除首尾空白）
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 原始文本字段（已去除首尾空白，可能为空串），用于区分"未提供"和"清空"
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|v| v.trim())
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}
