//! Digitization pipeline: paper recipe photo -> OCR text -> AI extraction ->
//! canonical recipe.
//!
//! The OCR service itself is an external collaborator behind
//! [`OcrProvider`]; its extracted text is fed through the same AI-based
//! extraction path the generator uses, then normalized.

use async_trait::async_trait;
use thiserror::Error;

use crate::ai::{parse_fenced_json, prompts, AiClient, AiError, ChatMessage, ChatRequest};
use crate::normalize::{normalize_recipe, TagHints};
use crate::recipe::RecipeContent;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR processing failed: {0}")]
    Provider(String),

    #[error("OCR provider not configured")]
    NotConfigured,

    #[error("OCR returned no text")]
    EmptyText,

    #[error(transparent)]
    Extraction(#[from] AiError),
}

/// External OCR service boundary.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Extract the text content of a photographed or scanned recipe.
    async fn extract_text(&self, image: &[u8]) -> Result<String, OcrError>;
}

/// Provider used when no OCR backend is configured; every call fails with
/// [`OcrError::NotConfigured`] so the endpoint can surface a clean 503.
pub struct DisabledOcr;

#[async_trait]
impl OcrProvider for DisabledOcr {
    async fn extract_text(&self, _image: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::NotConfigured)
    }
}

/// Run the full digitization pipeline on one image.
///
/// Synchronous from the request's perspective; a single failure at any stage
/// fails the whole operation, no retry.
pub async fn digitize(
    ocr: &dyn OcrProvider,
    ai: &dyn AiClient,
    image: &[u8],
    hints: &TagHints,
) -> Result<RecipeContent, OcrError> {
    let text = ocr.extract_text(image).await?;
    if text.trim().is_empty() {
        return Err(OcrError::EmptyText);
    }

    tracing::debug!(chars = text.len(), "OCR extraction complete");

    let request = ChatRequest {
        messages: vec![
            ChatMessage::system(prompts::OCR_EXTRACT_SYSTEM),
            ChatMessage::user(text),
        ],
        temperature: Some(0.3),
        json_response: true,
        ..Default::default()
    };

    let response = ai.complete(request).await?;
    let payload = parse_fenced_json(&response.content)?;

    Ok(normalize_recipe(&payload, hints))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;
    use crate::normalize::AI_GENERATED_TAG;
    use chrono::NaiveDate;

    struct StaticOcr(&'static str);

    #[async_trait]
    impl OcrProvider for StaticOcr {
        async fn extract_text(&self, _image: &[u8]) -> Result<String, OcrError> {
            Ok(self.0.to_string())
        }
    }

    fn hints() -> TagHints {
        TagHints::new(49.5, NaiveDate::from_ymd_opt(2026, 7, 15).unwrap())
    }

    #[tokio::test]
    async fn digitize_produces_canonical_recipe() {
        let ocr = StaticOcr("Grandma's Pancakes\nflour 200g, milk 300ml\nMix. Fry.");
        let ai = FakeAiClient::with_response(
            "pancakes",
            r#"{
                "title": "Grandma's Pancakes",
                "description": "Thin pancakes from a handwritten card.",
                "ingredients": {"servings": 4, "items": {"flour": "200 g", "milk": "300 ml"}},
                "instructions": ["Mix the batter.", "Fry on both sides."]
            }"#,
        );

        let recipe = digitize(&ocr, &ai, b"jpeg bytes", &hints()).await.unwrap();
        assert_eq!(recipe.title, "Grandma's Pancakes");
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.instructions.len(), 2);
        assert!(recipe.tags.contains(&AI_GENERATED_TAG.to_string()));
    }

    #[tokio::test]
    async fn empty_ocr_text_fails() {
        let ocr = StaticOcr("   ");
        let ai = FakeAiClient::default();
        let err = digitize(&ocr, &ai, b"", &hints()).await.unwrap_err();
        assert!(matches!(err, OcrError::EmptyText));
    }

    #[tokio::test]
    async fn disabled_provider_reports_not_configured() {
        let ai = FakeAiClient::default();
        let err = digitize(&DisabledOcr, &ai, b"", &hints()).await.unwrap_err();
        assert!(matches!(err, OcrError::NotConfigured));
    }
}
