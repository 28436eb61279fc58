use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色，由 is_teacher 标志决定，注册后不可更改
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Student, // 学生
    Teacher, // 教师
}

impl UserRole {
    pub const STUDENT: &'static str = "student";
    pub const TEACHER: &'static str = "teacher";

    pub fn from_is_teacher(is_teacher: bool) -> Self {
        if is_teacher {
            UserRole::Teacher
        } else {
            UserRole::Student
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid user role: '{s}'. Supported roles: student, teacher"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub is_teacher: bool,
    pub date_joined: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn role(&self) -> UserRole {
        UserRole::from_is_teacher(self.is_teacher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_claim_string() {
        for role in [UserRole::Student, UserRole::Teacher] {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
        }
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_follows_teacher_flag() {
        assert_eq!(UserRole::from_is_teacher(true), UserRole::Teacher);
        assert_eq!(UserRole::from_is_teacher(false), UserRole::Student);
    }
}
