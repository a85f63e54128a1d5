use crate::DomainError;
use std::fmt;
use std::sync::Arc;

const MAX_SERVICE_NAME_LEN: usize = 256;

const FORBIDDEN_SEQUENCES: [&str; 5] = ["..", "|", "&", ";", "`"];

/// Instance suffix separator appended by the OS to per-user services.
const INSTANCE_SEPARATOR: char = '_';

/// A service name that passed the allow-list check and is safe to splice
/// into an externally composed system command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceName(Arc<str>);

impl ServiceName {
    /// Validates `raw` and returns the trimmed, normalized name.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Self::validate(raw).map_err(DomainError::InvalidServiceName)?;
        let normalized = normalize_service_name(raw.trim()).trim_end();
        if normalized.is_empty() {
            return Err(DomainError::InvalidServiceName(
                "Service name is empty after normalization".to_string(),
            ));
        }
        Ok(Self(Arc::from(normalized)))
    }

    pub fn validate(raw: &str) -> Result<(), String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("Service name cannot be empty".to_string());
        }
        if trimmed.len() > MAX_SERVICE_NAME_LEN {
            return Err(format!(
                "Service name cannot exceed {} characters",
                MAX_SERVICE_NAME_LEN
            ));
        }
        if let Some(seq) = FORBIDDEN_SEQUENCES.iter().find(|s| trimmed.contains(*s)) {
            return Err(format!("Service name contains forbidden sequence '{}'", seq));
        }
        let valid = trimmed.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || c.is_whitespace()
                || matches!(c, '_' | '-' | '(' | ')' | '.' | '&')
        });
        if !valid {
            return Err(
                "Service name contains invalid characters (only alphanumeric, spaces, underscores, hyphens, parentheses and periods are allowed)".to_string(),
            );
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Truncates an OS service name at the first instance separator.
///
/// This is the single normalization point: cache records, metadata store
/// keys, mutation calls and audit lines all carry the normalized form.
pub fn normalize_service_name(raw: &str) -> &str {
    match raw.find(INSTANCE_SEPARATOR) {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}
