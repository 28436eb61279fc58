use crate::models::{
    exercises::{
        entities::Exercise,
        requests::{CreateExerciseRequest, UpdateExerciseRequest},
    },
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, SubmissionUpdate},
        responses::TeacherStatisticsResponse,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;

    /// 练习管理方法
    // 创建练习
    async fn create_exercise(
        &self,
        teacher_id: i64,
        exercise: CreateExerciseRequest,
    ) -> Result<Exercise>;
    // 通过ID获取练习
    async fn get_exercise_by_id(&self, id: i64) -> Result<Option<Exercise>>;
    // 列出练习，指定教师时只返回该教师的练习
    async fn list_exercises(&self, teacher_id: Option<i64>) -> Result<Vec<Exercise>>;
    // 批量获取练习
    async fn get_exercises_by_ids(&self, ids: &[i64]) -> Result<Vec<Exercise>>;
    // 更新练习
    async fn update_exercise(
        &self,
        id: i64,
        update: UpdateExerciseRequest,
    ) -> Result<Option<Exercise>>;

    /// 提交管理方法
    // 创建提交
    async fn create_submission(&self, submission: CreateSubmissionRequest) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 部分更新提交
    async fn update_submission(
        &self,
        id: i64,
        update: SubmissionUpdate,
    ) -> Result<Option<Submission>>;
    // 某个学生的全部提交，最新的在前
    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<Submission>>;
    // 所有学生的提交（排除教师账号提交的内容）
    async fn list_student_submissions(&self) -> Result<Vec<Submission>>;
    // 某个练习的全部提交
    async fn list_submissions_by_exercise(&self, exercise_id: i64) -> Result<Vec<Submission>>;

    /// 统计
    // 每个练习的平均分与提交数
    async fn exercise_statistics(&self) -> Result<TeacherStatisticsResponse>;
}
