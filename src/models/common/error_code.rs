/// 业务错误码
///
/// 与 HTTP 状态码独立，前端根据 `code` 区分具体失败原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用请求错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    FileTypeNotAllowed = 1002,
    FileSizeExceeded = 1003,
    FileNotFound = 1004,

    // 认证与授权
    Unauthorized = 2000,
    AuthFailed = 2001,
    Forbidden = 2002,
    SubmissionLocked = 2003,

    // 用户
    UserNameAlreadyExists = 3000,
    UserEmailAlreadyExists = 3001,
    UserNameInvalid = 3002,
    UserEmailInvalid = 3003,
    UserPasswordInvalid = 3004,
    RegisterFailed = 3005,

    // 练习
    ExerciseNotFound = 4000,

    // 提交
    SubmissionNotFound = 5000,
    ScoreOutOfRange = 5001,

    // 服务器内部错误
    InternalServerError = 9000,
    FileUploadFailed = 9001,
}
