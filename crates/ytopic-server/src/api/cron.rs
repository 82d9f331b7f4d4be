use axum::{extract::State, Extension, Json};
use chrono::Utc;
use ytopic_db::{run_topic_rotation, RotationSummary};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn update_topics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<RotationSummary>>, ApiError> {
    let summary = run_topic_rotation(state.topics.as_ref(), Utc::now())
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: summary,
        meta: ResponseMeta::new(req_id.0),
    }))
}
