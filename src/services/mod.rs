pub mod auth;
pub mod exercises;
pub mod grading;
pub mod media;
pub mod statistics;
pub mod submissions;

pub use auth::AuthService;
pub use exercises::ExerciseService;
pub use statistics::StatisticsService;
pub use submissions::SubmissionService;
