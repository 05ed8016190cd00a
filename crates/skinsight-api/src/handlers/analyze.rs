//! Skin analysis upload handler.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::services::AnalyzeOutcome;
use crate::state::AppState;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// Analyze an uploaded face image.
///
/// Accepts the part named `file`, or failing that the first part that
/// carries a filename.
pub async fn analyze_skin(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<AnalyzeOutcome>> {
    let image = read_upload(multipart).await?;
    debug!(bytes = image.len(), "Received upload");

    let outcome = state.analyzer.analyze(&image).await?;
    Ok(Json(outcome))
}

async fn read_upload(mut multipart: Multipart) -> ApiResult<Bytes> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Malformed multipart upload");
                return Err(ApiError::bad_request(format!("Invalid upload: {}", e)));
            }
        };

        let is_file = field.name() == Some(FILE_FIELD) || field.file_name().is_some();
        if !is_file {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;

        if data.is_empty() {
            return Err(ApiError::bad_request("Uploaded file is empty"));
        }
        return Ok(data);
    }

    Err(ApiError::bad_request("No image file provided"))
}
