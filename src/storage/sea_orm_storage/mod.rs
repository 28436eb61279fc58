//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod exercises;
mod submissions;
mod users;

use crate::config::DatabaseConfig;
use crate::errors::{PlatformError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例并运行迁移
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| PlatformError::database_operation(format!("Migration failed: {e}")))?;

        info!("Storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PlatformError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                PlatformError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            PlatformError::database_connection(format!("Cannot connect to database: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PlatformError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite path"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    // 练习模块
    async fn create_exercise(
        &self,
        teacher_id: i64,
        exercise: CreateExerciseRequest,
    ) -> Result<Exercise> {
        self.create_exercise_impl(teacher_id, exercise).await
    }

    async fn get_exercise_by_id(&self, id: i64) -> Result<Option<Exercise>> {
        self.get_exercise_by_id_impl(id).await
    }

    async fn list_exercises(&self, teacher_id: Option<i64>) -> Result<Vec<Exercise>> {
        self.list_exercises_impl(teacher_id).await
    }

    async fn get_exercises_by_ids(&self, ids: &[i64]) -> Result<Vec<Exercise>> {
        self.get_exercises_by_ids_impl(ids).await
    }

    async fn update_exercise(
        &self,
        id: i64,
        update: UpdateExerciseRequest,
    ) -> Result<Option<Exercise>> {
        self.update_exercise_impl(id, update).await
    }

    // 提交模块
    async fn create_submission(&self, submission: CreateSubmissionRequest) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn update_submission(
        &self,
        id: i64,
        update: SubmissionUpdate,
    ) -> Result<Option<Submission>> {
        self.update_submission_impl(id, update).await
    }

    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_student_impl(student_id).await
    }

    async fn list_student_submissions(&self) -> Result<Vec<Submission>> {
        self.list_student_submissions_impl().await
    }

    async fn list_submissions_by_exercise(&self, exercise_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_exercise_impl(exercise_id).await
    }

    async fn exercise_statistics(&self) -> Result<TeacherStatisticsResponse> {
        self.exercise_statistics_impl().await
    }
}
