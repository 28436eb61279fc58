//! 上传文件的落盘与 URL 构建
//!
//! 文件写在 `media_root` 下的 `exercises/`、`corrections/`、`submissions/` 子目录中，
//! 数据库里只保存相对路径。文件本身不由本服务提供下载。

use std::fs;
use std::path::PathBuf;

use actix_web::HttpRequest;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::errors::{PlatformError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Exercise,
    Correction,
    Submission,
}

impl MediaKind {
    pub fn dir(&self) -> &'static str {
        match self {
            MediaKind::Exercise => "exercises",
            MediaKind::Correction => "corrections",
            MediaKind::Submission => "submissions",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    url_prefix: String,
}

impl MediaStore {
    pub fn from_config(config: &UploadConfig) -> Self {
        let mut url_prefix = config.media_url.clone();
        if !url_prefix.ends_with('/') {
            url_prefix.push('/');
        }
        Self {
            root: PathBuf::from(&config.media_root),
            url_prefix,
        }
    }

    /// 写入 PDF，返回相对路径，例如 `submissions/1718000000-<uuid>.pdf`
    pub fn save(&self, kind: MediaKind, data: &[u8]) -> Result<String> {
        let dir = self.root.join(kind.dir());
        fs::create_dir_all(&dir).map_err(|e| {
            PlatformError::file_operation(format!("Cannot create {}: {e}", dir.display()))
        })?;

        let name = format!("{}-{}.pdf", chrono::Utc::now().timestamp(), Uuid::new_v4());
        fs::write(dir.join(&name), data)?;

        Ok(format!("{}/{}", kind.dir(), name))
    }

    pub fn path_of(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// 删除文件，文件不存在时忽略
    pub fn remove(&self, relative: &str) {
        let path = self.path_of(relative);
        if let Err(e) = fs::remove_file(&path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
        }
    }

    /// 用请求自身的 scheme 和 host 构建绝对 URL
    pub fn absolute_url(&self, request: &HttpRequest, relative: &str) -> String {
        let info = request.connection_info();
        format!(
            "{}://{}{}{}",
            info.scheme(),
            info.host(),
            self.url_prefix,
            relative
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;
    use actix_web::test::TestRequest;

    fn store(dir: &TestDir) -> MediaStore {
        MediaStore::from_config(&UploadConfig {
            media_root: dir.path().to_string_lossy().into_owned(),
            media_url: "/media".to_string(),
            max_size: 1024,
        })
    }

    #[test]
    fn test_save_under_kind_prefix() {
        let dir = TestDir::new();
        let store = store(&dir);

        let relative = store.save(MediaKind::Correction, b"%PDF-1.4").unwrap();
        assert!(relative.starts_with("corrections/"));
        assert!(relative.ends_with(".pdf"));
        assert_eq!(fs::read(store.path_of(&relative)).unwrap(), b"%PDF-1.4");

        store.remove(&relative);
        assert!(!store.path_of(&relative).exists());
        // 再次删除不会出错
        store.remove(&relative);
    }

    #[test]
    fn test_absolute_url_uses_request_host() {
        let dir = TestDir::new();
        let store = store(&dir);
        let req = TestRequest::default()
            .insert_header(("Host", "grading.example.org:8443"))
            .to_http_request();

        assert_eq!(
            store.absolute_url(&req, "submissions/a.pdf"),
            "http://grading.example.org:8443/media/submissions/a.pdf"
        );
    }
}
