use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use tracing::debug;

use crate::config::CoachConfig;
use crate::errors::{GeminiError, GeminiResult};
use crate::generator::TextGenerator;
use crate::types::*;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for interacting with the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    temperature: Option<f32>,
    model: GeminiModel,
}

impl GeminiClient {
    /// Create a new Gemini API client.
    ///
    /// The key may only be omitted when requests go through a proxy
    /// (`api_base_url` overridden) that attaches credentials itself.
    pub fn new(config: &CoachConfig) -> GeminiResult<Self> {
        let api_key = config.api_key.clone().filter(|k| !k.trim().is_empty());
        if api_key.is_none() && config.uses_public_endpoint() {
            return Err(GeminiError::ConfigError(format!(
                "API key is required to initialize the Gemini client (set {} or api_key in the config file)",
                crate::config::API_KEY_ENV
            )));
        }

        let model = GeminiModel::new(api_key, config.model_name.clone());

        Ok(Self {
            client: Client::new(),
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            temperature: config.temperature,
            model,
        })
    }

    /// Get the generateContent URL for the configured model
    fn get_generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model.model_name
        )
    }

    /// Generate content using the Gemini API
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let url = self.get_generate_url();

        let mut builder = self.client.post(&url).json(&request);
        if let Some(api_key) = &self.model.api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GeminiError::RequestError(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.map_err(|e| {
                GeminiError::ResponseError(format!("Failed to read error response: {}", e))
            })?;

            return Err(GeminiError::HttpError {
                status_code: status.as_u16(),
                message: format!("API request failed: {}", error_body),
            });
        }

        let response_body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::ParsingError(format!("Failed to parse response: {}", e)))?;

        Ok(response_body)
    }

    /// Builds a single-turn request from the given parts
    pub(crate) fn create_request(&self, parts: Vec<Part>) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(parts)],
            generation_config: self.temperature.map(|temperature| GenerationConfig {
                temperature: Some(temperature),
                max_output_tokens: None,
            }),
        }
    }

    /// Builds a request carrying an instruction and one inline JPEG
    pub(crate) fn create_image_request(
        &self,
        prompt: &str,
        jpeg_bytes: &[u8],
    ) -> GeminiResult<GenerateContentRequest> {
        if jpeg_bytes.is_empty() {
            return Err(GeminiError::EncodingError(
                "Refusing to send an empty image".to_string(),
            ));
        }

        Ok(self.create_request(vec![
            Part::text(prompt.to_string()),
            Part::inline_data(JPEG_MIME_TYPE, STANDARD.encode(jpeg_bytes)),
        ]))
    }

    /// Helper method to extract text from a response
    pub fn extract_text_from_response(response: &GenerateContentResponse) -> GeminiResult<String> {
        let candidate = response.candidates.first().ok_or_else(|| {
            GeminiError::ResponseError("No candidates in response".to_string())
        })?;

        let content = candidate
            .content
            .as_ref()
            .ok_or_else(|| GeminiError::ResponseError("No content in candidate".to_string()))?;

        let text = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .next()
            .ok_or_else(|| GeminiError::ResponseError("No text in content parts".to_string()))?;

        Ok(text.to_string())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> GeminiResult<String> {
        debug!(model = %self.model.model_name, prompt_len = prompt.len(), "Sending text request");
        let request = self.create_request(vec![Part::text(prompt.to_string())]);
        let response = self.generate_content(request).await?;
        Self::extract_text_from_response(&response)
    }

    async fn generate_with_image(&self, prompt: &str, jpeg_bytes: &[u8]) -> GeminiResult<String> {
        debug!(
            model = %self.model.model_name,
            image_bytes = jpeg_bytes.len(),
            "Sending image request"
        );
        let request = self.create_image_request(prompt, jpeg_bytes)?;
        let response = self.generate_content(request).await?;
        Self::extract_text_from_response(&response)
    }

    fn model_name(&self) -> &str {
        &self.model.model_name
    }
}
