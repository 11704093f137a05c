use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::RequestHandler;
use crate::models::{ErrorResponse, HealthResponse, RankRequest, RankResponse};
use crate::services::StoreError;
use std::sync::Arc;
use tracing::Instrument;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<RequestHandler>,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match", web::post().to(rank_workers));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank workers endpoint
///
/// POST /api/v1/match
///
/// Request body:
/// ```json
/// {
///   "task": "string"
/// }
/// ```
///
/// Oracle failures still answer 200 with `"outcome": "error"`; only store
/// failures produce an error status.
async fn rank_workers(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("rank", %request_id);

    async move {
        tracing::info!("Ranking workers for task ({} chars)", req.task.len());

        match state.handler.handle_request(&req.task).await {
            Ok(outcome) => HttpResponse::Ok().json(RankResponse::from(&outcome)),
            Err(e) => {
                let (status, error) = match &e {
                    StoreError::Unavailable(_) => (503, "Profile store unavailable"),
                    StoreError::Read(_) | StoreError::Close(_) => {
                        (500, "Failed to read worker profiles")
                    }
                };
                let body = ErrorResponse {
                    error: error.to_string(),
                    message: e.to_string(),
                    status_code: status,
                };
                if status == 503 {
                    HttpResponse::ServiceUnavailable().json(body)
                } else {
                    HttpResponse::InternalServerError().json(body)
                }
            }
        }
    }
    .instrument(span)
    .await
}
