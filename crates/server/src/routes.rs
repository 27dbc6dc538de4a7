//! HTTP surface: a single `POST /ask` route.

use crate::state::AppContext;
use askrag_core::AppError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const UNAVAILABLE_DETAIL: &str = "RAG system failed to initialize.";
pub const INTERNAL_DETAIL: &str = "Internal Server Error";

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Failure of a single `/ask` request.
#[derive(Debug)]
pub enum ApiError {
    Unavailable,
    Internal(AppError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match self {
            ApiError::Unavailable => UNAVAILABLE_DETAIL,
            ApiError::Internal(e) => {
                tracing::error!("Failed to answer question: {}", e);
                INTERNAL_DETAIL
            }
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                detail: detail.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn router(context: AppContext) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(context))
}

async fn ask(
    State(context): State<Arc<AppContext>>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let pipeline = match context.as_ref() {
        AppContext::Ready(pipeline) => pipeline,
        AppContext::Unavailable { .. } => return Err(ApiError::Unavailable),
    };

    let answer = pipeline
        .ask(&request.question)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(QueryResponse { answer }))
}
