//! 自动评分客户端
//!
//! 把学生提交和参考答案的文本发给本地的生成式模型接口（Ollama 风格的
//! `/api/generate`），并把两行格式的回复解析为分数和评语。任何失败都不会
//! 变成 HTTP 错误，而是以 [`GradingOutcome::Failed`] 的形式记录到提交上。

mod parse;

pub use parse::parse_reply;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GradingConfig;
use crate::errors::{PlatformError, Result};
use crate::models::submissions::entities::GradingStatus;

/// 一次自动评分的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradingOutcome {
    Graded { score: i32, feedback: String },
    Failed { reason: String },
}

impl GradingOutcome {
    /// 写入数据库的分数；0 分沿用旧行为存为 NULL
    pub fn stored_score(&self) -> Option<i32> {
        match self {
            GradingOutcome::Graded { score, .. } if *score > 0 => Some(*score),
            _ => None,
        }
    }

    pub fn feedback(&self) -> &str {
        match self {
            GradingOutcome::Graded { feedback, .. } => feedback,
            GradingOutcome::Failed { reason } => reason,
        }
    }

    pub fn status(&self) -> GradingStatus {
        match self {
            GradingOutcome::Graded { .. } => GradingStatus::Graded,
            GradingOutcome::Failed { .. } => GradingStatus::Failed,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GradingClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl GradingClient {
    pub fn from_config(config: &GradingConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout);
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                PlatformError::grading_service(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    /// 对比提交与参考答案并评分，单次请求，不重试
    pub async fn grade(&self, submission_text: &str, reference_text: &str) -> GradingOutcome {
        let payload = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(submission_text, reference_text),
            stream: false,
        };

        tracing::info!(endpoint = %self.endpoint, model = %self.model, "Sending grading request");

        let reply = match self.request(&payload).await {
            Ok(reply) => reply,
            Err(reason) => {
                tracing::warn!("{}", reason);
                return GradingOutcome::Failed { reason };
            }
        };

        let outcome = parse_reply(reply.as_deref());
        match &outcome {
            GradingOutcome::Graded { score, .. } => {
                tracing::info!(score = *score, "Grading completed");
            }
            GradingOutcome::Failed { reason } => {
                tracing::warn!("Grading reply rejected: {}", reason);
            }
        }
        outcome
    }

    async fn request(
        &self,
        payload: &GenerateRequest<'_>,
    ) -> std::result::Result<Option<String>, String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| format!("grading request failed: {e}"))?;

        let response = response
            .error_for_status()
            .map_err(|e| format!("grading request failed: {e}"))?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| format!("grading request failed: invalid response body: {e}"))?;

        Ok(body.response)
    }
}

fn build_prompt(submission_text: &str, reference_text: &str) -> String {
    format!(
        "Tu es un correcteur. Voici la soumission d'un étudiant :\n{submission_text}\n\n\
         Voici la correction de référence :\n{reference_text}\n\n\
         Compare la soumission à la correction et attribue une note sur 20, \
         puis explique la note. Réponds exactement sur deux lignes au format :\n\
         Note: X/20\nFeedback: ..."
    )
}
