use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One exercise from the catalog: the statement shown to the student plus the
/// material the grader needs to judge a submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ExerciseData {
    pub prompt: String,
    pub correction_guidelines: String,
    pub model_answers: Vec<String>,
}

/// Kind of a SQL statement, taken from its leading keyword.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Unknown,
}

impl StatementKind {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_uppercase().as_str() {
            "SELECT" => StatementKind::Select,
            "INSERT" => StatementKind::Insert,
            "UPDATE" => StatementKind::Update,
            "DELETE" => StatementKind::Delete,
            _ => StatementKind::Unknown,
        }
    }
}

/// One SQL statement found in a submission, with the outcome of parsing it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SqlFinding {
    pub query: String,
    pub valid: bool,
    pub tokens: Vec<String>,
    #[serde(rename = "type")]
    pub kind: StatementKind,
}

/// The graded outcome of one submission. Built once per request, never
/// mutated afterwards. `sql_analysis` is only present for SQL exercises.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct EvaluationResult {
    pub score: f64,
    pub errors: Vec<String>,
    pub correct_answer: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_analysis: Option<Vec<SqlFinding>>,
}
