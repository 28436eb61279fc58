//! 提交列表的响应组装

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::HttpRequest;

use crate::errors::Result;
use crate::models::submissions::{entities::Submission, responses::SubmissionResponse};
use crate::models::users::responses::UserSummary;
use crate::services::media::MediaStore;
use crate::storage::Storage;

pub const UNKNOWN_EXERCISE: &str = "Unspecified exercise";

/// 批量查询学生与练习，组装带学生信息和练习标题的提交响应
pub(crate) async fn build_submission_responses(
    storage: &Arc<dyn Storage>,
    media: &MediaStore,
    request: &HttpRequest,
    submissions: Vec<Submission>,
) -> Result<Vec<SubmissionResponse>> {
    let (students, titles) = load_related(storage, &submissions).await?;

    Ok(submissions
        .into_iter()
        .filter_map(|s| {
            let student = students.get(&s.student_id)?.clone();
            Some(to_response(s, student, &titles, media, request))
        })
        .collect())
}

/// 学生 ID 到学生信息、练习 ID 到标题的映射
pub(crate) async fn load_related(
    storage: &Arc<dyn Storage>,
    submissions: &[Submission],
) -> Result<(HashMap<i64, UserSummary>, HashMap<i64, String>)> {
    let mut student_ids: Vec<i64> = submissions.iter().map(|s| s.student_id).collect();
    student_ids.sort_unstable();
    student_ids.dedup();

    let mut exercise_ids: Vec<i64> = submissions.iter().map(|s| s.exercise_id).collect();
    exercise_ids.sort_unstable();
    exercise_ids.dedup();

    let students = storage
        .get_users_by_ids(&student_ids)
        .await?
        .iter()
        .map(|u| (u.id, UserSummary::from(u)))
        .collect();

    let titles = storage
        .get_exercises_by_ids(&exercise_ids)
        .await?
        .into_iter()
        .map(|e| (e.id, e.title))
        .collect();

    Ok((students, titles))
}

pub(crate) fn to_response(
    submission: Submission,
    student: UserSummary,
    titles: &HashMap<i64, String>,
    media: &MediaStore,
    request: &HttpRequest,
) -> SubmissionResponse {
    SubmissionResponse {
        id: submission.id,
        student,
        exercise: titles
            .get(&submission.exercise_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_EXERCISE.to_string()),
        file: Some(media.absolute_url(request, &submission.file)),
        submitted_at: submission.submitted_at.to_rfc3339(),
        score: submission.score,
        feedback: submission.feedback,
        grading_status: submission.grading_status,
        is_locked: submission.is_locked,
    }
}
