use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use servicedex_application::ports::{Resolution, ServiceInfoResolver};
use servicedex_domain::config::AiConfig;
use servicedex_domain::service_info::recommendation_from_value;
use servicedex_domain::{DomainError, InfoSource, ServiceInfo};
use std::time::Duration;
use tracing::debug;

const JSON_DESCRIPTION_PLACEHOLDER: &str = "AI-generated description not available";
const JSON_EXPLAINED_PLACEHOLDER: &str = "AI-generated explanation not available";
const JSON_RECOMMENDATION_PLACEHOLDER: &str = "AI-generated recommendation not available";

const TEXT_DESCRIPTION_PLACEHOLDER: &str = "AI-generated description";
const TEXT_EXPLAINED_PLACEHOLDER: &str = "AI-generated explanation";
const TEXT_RECOMMENDATION_PLACEHOLDER: &str = "AI-generated recommendation";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Asks a chat-completion endpoint to describe a service.
///
/// Reports `NotFound` when no credential is configured. A single request is
/// made under a hard deadline; dropping the future on timeout cancels the
/// connection. Failures are not retried.
pub struct AiResolver {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
    max_tokens: u32,
    temperature: f32,
}

impl AiResolver {
    pub fn new(config: &AiConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| DomainError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.credential().map(str::to_string),
            model: config.model.clone(),
            timeout: config.timeout(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, DomainError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::Transport(format!("AI request to {} failed: {}", self.endpoint, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Transport(format!(
                "AI endpoint {} returned HTTP {}",
                self.endpoint,
                status.as_u16()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Invalid AI response body: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DomainError::Parse("AI response has no message content".to_string()))
    }
}

#[async_trait]
impl ServiceInfoResolver for AiResolver {
    fn source(&self) -> InfoSource {
        InfoSource::Ai
    }

    async fn resolve(&self, service_name: &str) -> Result<Resolution, DomainError> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!(service = %service_name, "AI credential not configured, skipping");
            return Ok(Resolution::NotFound);
        };

        let content = tokio::time::timeout(self.timeout, self.complete(api_key, &prompt(service_name)))
            .await
            .map_err(|_| {
                DomainError::Timeout(format!(
                    "AI request for {} timed out after {}s",
                    service_name,
                    self.timeout.as_secs()
                ))
            })??;

        Ok(Resolution::Found(parse_ai_reply(&content)))
    }
}

pub fn prompt(service_name: &str) -> String {
    format!(
        "What is the Windows service \"{}\"? Please provide:\n\
         1. A brief description of what this service does\n\
         2. A detailed explanation of its purpose and functionality\n\
         3. A recommendation on whether users should disable it and why\n\n\
         Format your response as JSON with keys: \"description\", \"explained\", \"recommendation\"",
        service_name
    )
}

/// Turns the model's reply into metadata: JSON first, free text otherwise.
pub fn parse_ai_reply(content: &str) -> ServiceInfo {
    match serde_json::from_str::<Value>(strip_code_fence(content)) {
        Ok(Value::Object(map)) => from_json(&map),
        _ => parse_ai_text(content),
    }
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn from_json(map: &Map<String, Value>) -> ServiceInfo {
    let text = |key: &str, placeholder: &str| {
        map.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(placeholder)
            .to_string()
    };

    let recommendation = map
        .get("recommendation")
        .and_then(recommendation_from_value)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| JSON_RECOMMENDATION_PLACEHOLDER.to_string());

    ServiceInfo::new(
        text("description", JSON_DESCRIPTION_PLACEHOLDER),
        text("explained", JSON_EXPLAINED_PLACEHOLDER),
        recommendation,
        InfoSource::Ai,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Explained,
    Recommendation,
}

impl Section {
    /// Header lines switch sections. Checked in order, so a line mentioning
    /// both "description" and "recommendation" counts as a description header.
    fn from_header(line: &str) -> Option<Self> {
        let lower = line.to_lowercase();
        if lower.contains("description") || lower.contains("1.") {
            Some(Section::Description)
        } else if lower.contains("explanation") || lower.contains("detailed") || lower.contains("2.")
        {
            Some(Section::Explained)
        } else if lower.contains("recommendation") || lower.contains("3.") {
            Some(Section::Recommendation)
        } else {
            None
        }
    }
}

/// Line-oriented fallback for replies that are not JSON.
pub fn parse_ai_text(text: &str) -> ServiceInfo {
    let mut current: Option<Section> = None;
    let mut description = Vec::new();
    let mut explained = Vec::new();
    let mut recommendation = Vec::new();

    for line in text.lines() {
        if let Some(section) = Section::from_header(line) {
            current = Some(section);
            continue;
        }

        let content = line.trim();
        if content.is_empty() {
            continue;
        }

        match current {
            Some(Section::Description) => description.push(content),
            Some(Section::Explained) => explained.push(content),
            Some(Section::Recommendation) => recommendation.push(content),
            None => {}
        }
    }

    let joined = |parts: Vec<&str>, placeholder: &str| {
        if parts.is_empty() {
            placeholder.to_string()
        } else {
            parts.join(" ")
        }
    };

    ServiceInfo::new(
        joined(description, TEXT_DESCRIPTION_PLACEHOLDER),
        joined(explained, TEXT_EXPLAINED_PLACEHOLDER),
        joined(recommendation, TEXT_RECOMMENDATION_PLACEHOLDER),
        InfoSource::Ai,
    )
}
