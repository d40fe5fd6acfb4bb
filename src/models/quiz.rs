//! Quiz and quiz secret documents.

use serde::{Deserialize, Serialize};

/// A quiz owned by a single principal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    /// Ordered question ids
    #[serde(default)]
    pub question_ids: Vec<String>,
    pub require_quiz_passcode: bool,
}

/// Passcode holder for a quiz, kept apart from the quiz so quiz reads never expose it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizSecret {
    pub quiz_id: String,
    pub passcode: Option<String>,
}

/// Request body for creating a new quiz.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    pub name: String,
    #[serde(default)]
    pub use_passcode: bool,
    #[serde(default)]
    pub passcode: Option<String>,
}

/// Response for the quiz creation workflow, read back from storage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedQuiz {
    pub quiz: Quiz,
    pub passcode: Option<String>,
    pub redirect_to: String,
}

/// Request body for editing a quiz. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub question_ids: Option<Vec<String>>,
    #[serde(default)]
    pub require_quiz_passcode: Option<bool>,
    #[serde(default)]
    pub passcode: Option<String>,
}

/// Query parameters for listing quizzes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuizzesQuery {
    #[serde(default)]
    pub owner_id: Option<String>,
}

/// What a client needs to render the join form for a quiz.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinFormInfo {
    pub quiz_id: String,
    pub quiz_name: String,
    pub require_quiz_passcode: bool,
}

impl From<&Quiz> for JoinFormInfo {
    fn from(quiz: &Quiz) -> Self {
        Self {
            quiz_id: quiz.id.clone(),
            quiz_name: quiz.name.clone(),
            require_quiz_passcode: quiz.require_quiz_passcode,
        }
    }
}

/// Route the client lands on after creating a quiz.
pub fn quiz_edit_route(quiz_id: &str) -> String {
    format!("/quiz/{}/edit", quiz_id)
}

/// Route the client lands on after joining a quiz.
pub fn quiz_route(quiz_id: &str) -> String {
    format!("/quiz/{}", quiz_id)
}
