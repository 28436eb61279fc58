use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct Exercise {
    // 唯一 ID
    pub id: i64,
    // 练习标题
    pub title: String,
    // 创建者（教师）ID
    pub teacher_id: i64,
    // 题目文件，媒体根目录下的相对路径
    pub file: Option<String>,
    // 参考答案文件，存在时提交会被自动评分
    pub correction_file: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Exercise {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.teacher_id == user_id
    }
}
