use crate::client::prompt::build_prompt;
use crate::client::traits::DignityClassifier;
use crate::config::AnalyzerConfig;
use crate::error::{AppError, ClientError};
use crate::models::AnalysisResult;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};
use url::Url;
use validator::Validate;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    temperature: f32,
    request_timeout: Duration,
}

impl GeminiClient {
    /// Builds a client from a validated configuration.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint()?,
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            request_timeout: config.timeout(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_request(&self, payload: &serde_json::Value) -> Result<reqwest::RequestBuilder, ClientError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| ClientError::Transport(format!("invalid API key header: {}", e)))?;
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        Ok(self
            .client
            .post(self.endpoint.clone())
            .headers(headers)
            .json(payload))
    }

    fn build_payload(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(text) }]
            }],
            "generationConfig": {
                "temperature": self.temperature,
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "score": { "type": "INTEGER" },
                        "category": { "type": "STRING", "enum": ["contempt", "dignity"] },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["score", "category", "explanation"]
                }
            }
        })
    }

    /// Performs one request and returns the detailed cause on failure.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn classify(&self, text: &str) -> Result<AnalysisResult, ClientError> {
        let payload = self.build_payload(text);
        let request = self.build_request(&payload)?;

        let exchange = async {
            let res = request.send().await?;
            let status = res.status();
            if !status.is_success() {
                let body = res.text().await.unwrap_or_default();
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            let envelope: GenerateContentResponse = res.json().await?;
            Ok::<_, ClientError>(envelope)
        };

        let envelope = timeout(self.request_timeout, exchange).await??;
        let text = envelope.first_text()?;
        debug!("Classifier returned {} bytes", text.len());
        parse_classification(text)
    }
}

#[async_trait]
impl DignityClassifier for GeminiClient {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AppError> {
        self.classify(text).await.map_err(|e| {
            warn!("Classification request failed: {}", e);
            AppError::AnalysisFailed(e)
        })
    }
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Result<&str, ClientError> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.iter().find_map(|p| p.text.as_deref()))
            .ok_or_else(|| match &self.prompt_feedback {
                Some(feedback) => ClientError::Malformed(format!("no candidate text (prompt feedback: {})", feedback)),
                None => ClientError::Malformed("no candidate text in response".to_string()),
            })
    }
}

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").expect("code fence pattern is valid")
    })
}

/// Parses the model's text into a result, rejecting scores outside 1-8.
pub fn parse_classification(raw: &str) -> Result<AnalysisResult, ClientError> {
    let body = code_fence()
        .captures(raw)
        .and_then(|c| c.get(1))
        .map_or(raw, |m| m.as_str());

    let result: AnalysisResult = serde_json::from_str(body.trim())?;
    if result.validate().is_err() {
        return Err(ClientError::OutOfRange(result.score));
    }
    Ok(result)
}
