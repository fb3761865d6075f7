use crate::AppState;
use crate::storage::EncryptedSubmission;
use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use common::models::EvaluationResult;
use log::error;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EvaluateErrorResponse {
    pub code: u16,
    pub message: &'static str,
}

type RejectResponse = (StatusCode, Json<EvaluateErrorResponse>);

fn reject(status: StatusCode, message: &'static str) -> RejectResponse {
    (
        status,
        Json(EvaluateErrorResponse {
            code: status.as_u16(),
            message,
        }),
    )
}

#[utoipa::path(post, path = "/api/v1/evaluate/{exercise_id}", params(("exercise_id" = String, Path, description = "Exercise identifier")), responses((status = OK, body = EvaluationResult), (status = BAD_REQUEST, body = EvaluateErrorResponse), (status = NOT_FOUND, body = EvaluateErrorResponse), (status = INTERNAL_SERVER_ERROR, body = EvaluateErrorResponse)), description = "Grades one PDF submission against an exercise")]
#[axum::debug_handler]
pub async fn evaluate_submission(
    state: State<AppState>,
    Path(exercise_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<EvaluationResult>, RejectResponse> {
    // Rejections happen before any temporary file exists.
    let Some(exercise) = state.catalog.get(&exercise_id) else {
        return Err(reject(StatusCode::NOT_FOUND, "unknown exercise"));
    };

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("error while reading multipart upload: {e}");
        reject(StatusCode::BAD_REQUEST, "could not read upload")
    })? {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content = field.bytes().await.map_err(|e| {
                error!("error while reading upload body: {e}");
                reject(StatusCode::BAD_REQUEST, "could not read upload")
            })?;
            upload = Some((file_name, content));
            break;
        }
    }

    let Some((file_name, content)) = upload else {
        return Err(reject(StatusCode::BAD_REQUEST, "missing file field"));
    };
    if !file_name.to_lowercase().ends_with(".pdf") {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "only PDF files are accepted",
        ));
    }

    let submission = EncryptedSubmission::write(&state.cipher, &content).map_err(|e| {
        error!("error while storing submission: {e}");
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            "an error occurred while storing the submission",
        )
    })?;

    let result =
        crate::evaluate::evaluate_submission(&state.cipher, &state.llm, exercise, &submission)
            .await;
    Ok(Json(result))
}
