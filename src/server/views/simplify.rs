use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, error};

use super::{bad, internal};
use crate::llm::prompts::{self, PromptInput};
use crate::server::serializers::{ApiError, SimplifyIn, SimplifyOut};
use crate::server::AppState;
use crate::store::load_dictionary;

/// Compose the prompt and hand it to the completion provider.
/// The reply goes back untouched; splitting on `---` is the caller's job.
pub async fn simplify(
    State(state): State<AppState>,
    body: Result<Json<SimplifyIn>, JsonRejection>,
) -> Result<Json<SimplifyOut>, (StatusCode, Json<ApiError>)> {
    let req = match body {
        Ok(Json(req)) => req,
        // a body without a JSON content type counts as an empty request
        Err(JsonRejection::MissingJsonContentType(_)) => SimplifyIn::default(),
        Err(rejection) => return Err(bad(rejection.body_text())),
    };
    let input = PromptInput::new(req.text, req.language, req.target_audience, req.output_format)
        .map_err(|e| bad(e.to_string()))?;

    let dictionary = load_dictionary(state.dictionary.as_ref()).await;
    let prompt = prompts::compose(&input, &dictionary);
    debug!(
        audience = %input.target_audience,
        format = %input.output_format,
        dictionary_entries = dictionary.len(),
        prompt_len = prompt.len(),
        "composed simplify prompt"
    );

    match state.llm.complete(&prompt).await {
        Ok(simplified_text) => Ok(Json(SimplifyOut { simplified_text })),
        Err(e) => {
            error!("Error simplifying text: {:#}", e);
            Err(internal("Failed to simplify text."))
        }
    }
}
