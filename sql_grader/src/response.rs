use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Greedy brace span over the whole reply. A brace pair inside the model's
/// prose before the real object can defeat this; the contract is only that we
/// then fall back instead of erroring.
static JSON_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// The four fields the grading prompt asks the model for.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AiEvaluation {
    pub score: f64,
    pub errors: Vec<String>,
    pub correct_answer: String,
    pub suggestions: Vec<String>,
}

impl AiEvaluation {
    /// The canonical payload substituted whenever the model's reply is
    /// unusable, so the caller still gets a structured result.
    pub fn fallback() -> Self {
        AiEvaluation {
            score: 0.0,
            errors: vec!["malformed response".to_string()],
            correct_answer: String::new(),
            suggestions: vec!["contact your instructor".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NoJsonObject,
    InvalidJson,
}

/// Outcome of parsing a model reply: either the evaluation it contained or
/// the reason we could not get one.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Valid(AiEvaluation),
    Fallback(FallbackReason),
}

impl Parsed {
    pub fn into_evaluation(self) -> AiEvaluation {
        match self {
            Parsed::Valid(evaluation) => evaluation,
            Parsed::Fallback(reason) => {
                log::error!("falling back on model reply: {reason:?}");
                AiEvaluation::fallback()
            }
        }
    }
}

/// Pulls the evaluation object out of a free-form model reply. Total over all
/// inputs: empty text, prose, broken JSON and missing keys all come back as
/// [`Parsed::Fallback`], never as a panic or an error.
pub fn parse_ai_response(raw: &str) -> Parsed {
    let Some(span) = JSON_SPAN.find(raw) else {
        return Parsed::Fallback(FallbackReason::NoJsonObject);
    };
    match serde_json::from_str::<AiEvaluation>(span.as_str()) {
        Ok(mut evaluation) => {
            evaluation.score = evaluation.score.clamp(0.0, 20.0);
            Parsed::Valid(evaluation)
        }
        Err(e) => {
            log::debug!("model reply not parseable as evaluation: {e}");
            Parsed::Fallback(FallbackReason::InvalidJson)
        }
    }
}
