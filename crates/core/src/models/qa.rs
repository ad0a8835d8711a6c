use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QaCategory {
    #[default]
    General,
    Pose,
    Lesson,
}

/// A student question on the board. Answering it also approves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaItem {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub question: String,
    pub answer: Option<String>,
    pub is_public: bool,
    pub is_approved: bool,
    pub category: QaCategory,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub category: QaCategory,
}

fn default_public() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityRequest {
    pub is_public: bool,
    pub is_approved: bool,
}
