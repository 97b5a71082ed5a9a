use super::client::{CompletionClient, OpenAiCompletionClient};
use crate::{Error, Result, config::QaConfig};
use tracing::{error, info, warn};

const SYSTEM_PROMPT: &str = "You are a knowledgeable Egyptologist specializing in ancient Egyptian hieroglyphs and culture.";

const UNAVAILABLE_ANSWER: &str = "Sorry, the question answering service is currently unavailable. Please check your OpenAI API configuration.";

/// Question answering over glyph translations. Whether a backend exists is
/// decided once, at construction: no API key means every call takes the
/// unavailable path.
pub struct QaService {
    client: Option<Box<dyn CompletionClient>>,
}

impl QaService {
    pub fn new(config: &QaConfig) -> Self {
        let client: Option<Box<dyn CompletionClient>> = if config.api_key.is_empty() {
            warn!("OPENAI_API_KEY not set; question answering is disabled");
            None
        } else {
            info!("OpenAI client initialized successfully");
            Some(Box::new(OpenAiCompletionClient::new(config)))
        };

        Self { client }
    }

    pub fn with_client(client: Box<dyn CompletionClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Asks the backend and surfaces failures to the caller: an unavailable
    /// service or a failed remote call comes back as an error, never as
    /// apology prose.
    pub async fn try_answer(
        &self,
        question: &str,
        glyph_translation: &str,
        context: Option<&str>,
    ) -> Result<String> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::unavailable("Question answering service is not configured"))?;

        let prompt = build_prompt(question, glyph_translation, context);
        let answer = client.complete(SYSTEM_PROMPT, &prompt).await?;

        info!("Generated answer for question about '{}'", glyph_translation);
        Ok(answer)
    }

    /// Always produces text for the user: failures fold into apology
    /// sentences instead of propagating.
    pub async fn answer(
        &self,
        question: &str,
        glyph_translation: &str,
        context: Option<&str>,
    ) -> String {
        match self.try_answer(question, glyph_translation, context).await {
            Ok(answer) => answer,
            Err(Error::ServiceUnavailable(_)) => {
                error!("OpenAI client not available");
                UNAVAILABLE_ANSWER.to_string()
            }
            Err(e) => {
                error!("Error calling OpenAI API: {}", e);
                format!(
                    "Sorry, I encountered an error while trying to answer your question: {}",
                    e
                )
            }
        }
    }

    /// General information about a glyph, phrased as a question about its
    /// code.
    pub async fn glyph_info(&self, glyph_code: &str, glyph_translation: &str) -> String {
        self.answer(
            &format!(
                "What is the {} hieroglyph and what does it represent?",
                glyph_code
            ),
            glyph_translation,
            Some(&format!("Glyph code: {}", glyph_code)),
        )
        .await
    }
}

fn build_prompt(question: &str, glyph_translation: &str, context: Option<&str>) -> String {
    let context_line = context
        .map(|c| format!("Additional context: {}", c))
        .unwrap_or_default();

    format!(
        "You are an expert Egyptologist and hieroglyph specialist.\n\n\
         The user is asking about an Egyptian hieroglyph that translates to: \"{glyph_translation}\"\n\n\
         {context_line}\n\n\
         User's question: {question}\n\n\
         Please provide a helpful, accurate, and educational answer about this hieroglyph.\n\
         Include historical context, cultural significance, and any relevant details that would help the user understand this symbol better.\n\
         Keep your response informative but accessible to someone learning about Egyptian hieroglyphs."
    )
}
