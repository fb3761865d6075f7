use crate::crypto::FileCipher;
use crate::llm::OllamaClient;
use crate::pdf;
use crate::response::{AiEvaluation, parse_ai_response};
use crate::sql::analyze_sql_statements;
use crate::storage::EncryptedSubmission;
use askama::Template;
use common::models::{EvaluationResult, ExerciseData};
use log::error;

#[derive(Template)]
#[template(path = "prompt.txt")]
struct PromptTemplate<'a> {
    exercise: &'a ExerciseData,
    student_answer: &'a str,
}

/// Grades one stored submission end to end: extract the answer text, then
/// run the grading pipeline over it.
pub async fn evaluate_submission(
    cipher: &FileCipher,
    llm: &OllamaClient,
    exercise: &ExerciseData,
    submission: &EncryptedSubmission,
) -> EvaluationResult {
    let student_answer = pdf::extract_text(cipher, submission);
    evaluate_answer(llm, exercise, &student_answer).await
}

/// The grading pipeline past extraction: SQL analysis when the exercise asks
/// for SQL, prompt rendering, one model call, tolerant reply parsing. Every
/// failure past this point degrades into the canonical fallback payload, so
/// an accepted submission always comes back as a structured result.
pub async fn evaluate_answer(
    llm: &OllamaClient,
    exercise: &ExerciseData,
    student_answer: &str,
) -> EvaluationResult {
    let sql_analysis = exercise
        .prompt
        .to_uppercase()
        .contains("SQL")
        .then(|| analyze_sql_statements(student_answer));

    let prompt = PromptTemplate {
        exercise,
        student_answer,
    }
    .render()
    .unwrap();

    let evaluation = match llm.generate(&prompt).await {
        Ok(reply) => parse_ai_response(&reply).into_evaluation(),
        Err(e) => {
            error!("model invocation failed: {e}");
            AiEvaluation::fallback()
        }
    };

    EvaluationResult {
        score: evaluation.score,
        errors: evaluation.errors,
        correct_answer: evaluation.correct_answer,
        suggestions: evaluation.suggestions,
        sql_analysis,
    }
}
