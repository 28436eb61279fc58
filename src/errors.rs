//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_platform_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PlatformError {
            $($variant(String),)*
        }

        impl PlatformError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PlatformError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PlatformError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PlatformError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PlatformError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PlatformError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_platform_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    Authentication("E008", "Authentication Error"),
    Authorization("E009", "Authorization Error"),
    GradingService("E010", "Grading Service Error"),
}

impl PlatformError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PlatformError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PlatformError {
    fn from(err: sea_orm::DbErr) -> Self {
        PlatformError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PlatformError {
    fn from(err: std::io::Error) -> Self {
        PlatformError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PlatformError {
    fn from(err: serde_json::Error) -> Self {
        PlatformError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PlatformError::database_config("test").code(), "E001");
        assert_eq!(PlatformError::validation("test").code(), "E005");
        assert_eq!(PlatformError::authentication("test").code(), "E008");
        assert_eq!(PlatformError::grading_service("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PlatformError::file_operation("test").error_type(),
            "File Operation Error"
        );
        assert_eq!(
            PlatformError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.pdf");
        let err: PlatformError = io_err.into();
        assert_eq!(err.code(), "E004");
        assert!(err.message().contains("missing.pdf"));
    }

    #[test]
    fn test_format_simple() {
        let err = PlatformError::validation("Invalid title");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid title"));
    }
}
