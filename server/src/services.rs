//! Provider wiring: builds the external-service trait objects the handlers
//! share, from environment configuration.

use std::env;
use std::sync::Arc;

use skillet_core::ai::{AiClient, FakeAiClient, OpenAiCompatClient};
use skillet_core::ocr::{DisabledOcr, OcrProvider};
use skillet_core::pdf::{DocumentRenderer, PlainTextRenderer};
use skillet_core::translate::{DisabledTranslator, Translator};

/// Build the AI client.
///
/// `SKILLET_AI_PROVIDER=fake` wires the canned test client (useful for local
/// frontend work without an API key); anything else requires `COOK_AGENT_KEY`.
pub fn build_ai_client() -> Arc<dyn AiClient> {
    if env::var("SKILLET_AI_PROVIDER").as_deref() == Ok("fake") {
        tracing::warn!("Using fake AI client; generation returns canned responses");
        return Arc::new(FakeAiClient::default());
    }

    let client = OpenAiCompatClient::from_env()
        .expect("COOK_AGENT_KEY must be set (or SKILLET_AI_PROVIDER=fake)");
    Arc::new(client)
}

/// No OCR backend is bundled; digitization returns 503 until one is wired up.
pub fn build_ocr_provider() -> Arc<dyn OcrProvider> {
    Arc::new(DisabledOcr)
}

/// No translation backend is bundled; translation returns 503 until one is
/// wired up.
pub fn build_translator() -> Arc<dyn Translator> {
    Arc::new(DisabledTranslator)
}

pub fn build_renderer() -> Arc<dyn DocumentRenderer> {
    Arc::new(PlainTextRenderer)
}
