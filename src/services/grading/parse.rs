use super::GradingOutcome;
use crate::models::submissions::requests::MAX_SCORE;

const SCORE_PREFIX: &str = "Note: ";
const FEEDBACK_LABEL: &str = "Feedback: ";

/// 解析模型回复：第一行 `Note: <int>/20`，其余行为评语
pub fn parse_reply(reply: Option<&str>) -> GradingOutcome {
    let Some(raw) = reply.filter(|r| !r.is_empty()) else {
        return failed("no response generated".to_string());
    };

    let lines: Vec<&str> = raw.trim().split('\n').collect();
    if lines.len() < 2 {
        return failed(format!("malformed response: {raw}"));
    }

    let score_line = lines[0];
    let Some(rest) = score_line
        .strip_prefix(SCORE_PREFIX)
        .filter(|_| score_line.contains('/'))
    else {
        return failed(format!("invalid score format: {score_line}"));
    };

    let score = match rest.split('/').next().map(str::trim).map(str::parse::<i32>) {
        Some(Ok(score)) => score,
        _ => return failed(format!("could not extract score: {score_line}")),
    };

    if !(0..=MAX_SCORE).contains(&score) {
        return failed(format!("score out of range: {score_line}"));
    }

    // 回复整体已去除首尾空白，最后一个字符不会被标签替换掉，评语总是非空
    let feedback = lines[1..].join("\n").replace(FEEDBACK_LABEL, "");

    GradingOutcome::Graded {
        score,
        feedback: feedback.trim().to_string(),
    }
}

fn failed(reason: String) -> GradingOutcome {
    GradingOutcome::Failed { reason }
}
