use serde::Deserialize;
use ts_rs::TS;

/// 新建练习（文件已写入媒体目录后传给存储层）
#[derive(Debug, Clone)]
pub struct CreateExerciseRequest {
    pub title: String,
    pub file: String,
    pub correction_file: Option<String>,
}

/// 部分更新练习
///
/// JSON 请求只能修改标题；`file` 仅由 multipart 上传在落盘后填入。
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct UpdateExerciseRequest {
    pub title: Option<String>,
    #[serde(skip)]
    #[ts(skip)]
    pub file: Option<String>,
}
