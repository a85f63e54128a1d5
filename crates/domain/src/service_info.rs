use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const NOT_LOADED_MESSAGE: &str = "Not loaded";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoSource {
    Scraped,
    Ai,
    Fallback,
    #[default]
    None,
}

impl InfoSource {
    pub fn to_str(&self) -> &'static str {
        match self {
            InfoSource::Scraped => "scraped",
            InfoSource::Ai => "ai",
            InfoSource::Fallback => "fallback",
            InfoSource::None => "none",
        }
    }
}

impl std::fmt::Display for InfoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Human-readable metadata attached to a service.
///
/// `recommendation` is always flat text. Stored files written by older
/// builds may hold an object there; it is flattened on load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub description: String,
    pub explained: String,
    #[serde(deserialize_with = "deserialize_flat_recommendation")]
    pub recommendation: String,
    pub source: InfoSource,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServiceInfo {
    pub fn new(
        description: impl Into<String>,
        explained: impl Into<String>,
        recommendation: impl Into<String>,
        source: InfoSource,
    ) -> Self {
        Self {
            url: None,
            description: description.into(),
            explained: explained.into(),
            recommendation: recommendation.into(),
            source,
            error: false,
            message: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sentinel attached to records that have no stored metadata yet.
    pub fn not_loaded() -> Self {
        Self {
            error: true,
            message: Some(NOT_LOADED_MESSAGE.to_string()),
            ..Self::default()
        }
    }

    /// Last-resort metadata when every resolver came up empty.
    pub fn fallback(service_name: &str) -> Self {
        Self::new(
            format!("Windows service: {}", service_name),
            format!(
                "This is a Windows system service named {}. Specific information about this service could not be retrieved from available sources.",
                service_name
            ),
            "Unable to provide specific recommendations for this service. Please research this service carefully before making changes, as disabling system services can affect system stability.",
            InfoSource::Fallback,
        )
    }

    pub fn mark_error(&mut self, message: impl Into<String>) {
        self.error = true;
        self.message = Some(message.into());
    }

    pub fn is_not_loaded(&self) -> bool {
        self.error && self.message.as_deref() == Some(NOT_LOADED_MESSAGE)
    }
}

/// Reads a recommendation out of a loosely typed JSON value: a string as-is,
/// or the `reason` field of an object. Anything else yields `None`.
pub fn recommendation_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("reason")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn deserialize_flat_recommendation<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        other => recommendation_from_value(&other).unwrap_or_else(|| other.to_string()),
    })
}
