use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use skillet_core::ai::{assistant, AiError, ChatMessage, Role};
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Prior turns of the conversation; the client owns the history
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub message: String,
    /// Language code ("en", "de", "es", "fr"); defaults to the user's setting
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}

fn language_name(code: &str) -> &'static str {
    match code {
        "de" => "German",
        "es" => "Spanish",
        "fr" => "French",
        _ => "English",
    }
}

#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Assistant failed", body = ErrorResponse),
        (status = 503, description = "AI not configured", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn chat(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    if request.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Message cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    let code = request.language.as_deref().unwrap_or(&user.language);
    let language = language_name(code);

    match assistant::reply(state.ai.as_ref(), &request.history, &request.message, language).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { reply })).into_response(),
        Err(AiError::NotConfigured(_)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "The assistant is not configured".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Assistant reply failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "The assistant is unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(chat),
    components(schemas(ChatRequest, ChatResponse, ChatMessage, Role))
)]
pub struct ApiDoc;
