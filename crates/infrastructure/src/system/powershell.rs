use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use servicedex_application::ports::{MutationOutcome, ServiceControlPort};
use servicedex_domain::config::SystemConfig;
use servicedex_domain::{DomainError, ServiceEntry, ServiceName, ServiceState, StartupType};
use tokio::process::Command;
use tracing::debug;

const SERVICE_FIELDS: &str = "Name,DisplayName,State,StartMode";
const UNKNOWN_DISPLAY_NAME: &str = "Unknown";
pub const EMPTY_DISABLE_OUTPUT_MESSAGE: &str =
    "Something went wrong while shutting down the service :(";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawService {
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    start_mode: Option<String>,
}

impl RawService {
    fn into_entry(self) -> ServiceEntry {
        ServiceEntry::new(
            &self.name,
            self.display_name
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(UNKNOWN_DISPLAY_NAME),
            ServiceState::from_os(self.state.as_deref().unwrap_or_default()),
            StartupType::from_os(self.start_mode.as_deref().unwrap_or_default()),
        )
    }
}

/// `ConvertTo-Json` emits a bare object instead of an array for one item.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RawService>),
    One(RawService),
}

/// Windows service manager driven through PowerShell CIM cmdlets.
pub struct PowerShellServiceControl {
    executable: String,
}

impl PowerShellServiceControl {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            executable: config.powershell.clone(),
        }
    }

    async fn run(&self, script: &str) -> Result<String, DomainError> {
        let output = Command::new(&self.executable)
            .args(["-NoProfile", "-NonInteractive", "-Command", script])
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::ServiceControl(format!("Failed to run {}: {}", self.executable, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::ServiceControl(format!(
                "{} exited with {}: {}",
                self.executable,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl ServiceControlPort for PowerShellServiceControl {
    async fn enumerate(&self) -> Result<Vec<ServiceEntry>, DomainError> {
        let stdout = self.run(&enumerate_script()).await?;
        let entries = parse_service_list(&stdout)?;
        debug!(count = entries.len(), "Enumerated services");
        Ok(entries)
    }

    async fn disable(&self, name: &ServiceName) -> Result<MutationOutcome, DomainError> {
        let stdout = self.run(&disable_script(name)).await?;
        parse_disable_output(&stdout)
    }
}

pub fn enumerate_script() -> String {
    format!(
        "Get-CimInstance -ClassName Win32_Service | Select-Object {} | ConvertTo-Json",
        SERVICE_FIELDS
    )
}

/// `name` has passed [`ServiceName`] validation, so it holds no quotes or
/// command separators.
pub fn disable_script(name: &ServiceName) -> String {
    format!(
        "Stop-Service -Name '{name}' -Force; \
         Set-Service -Name '{name}' -StartupType Disabled; \
         Get-CimInstance -ClassName Win32_Service -Filter \"Name='{name}'\" | \
         Select-Object {fields} | ConvertTo-Json",
        name = name.as_str(),
        fields = SERVICE_FIELDS
    )
}

pub fn parse_service_list(stdout: &str) -> Result<Vec<ServiceEntry>, DomainError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let raw: OneOrMany = serde_json::from_str(trimmed)
        .map_err(|e| DomainError::Parse(format!("Invalid service list JSON: {}", e)))?;

    let raw = match raw {
        OneOrMany::Many(list) => list,
        OneOrMany::One(single) => vec![single],
    };

    Ok(raw.into_iter().map(RawService::into_entry).collect())
}

pub fn parse_disable_output(stdout: &str) -> Result<MutationOutcome, DomainError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(MutationOutcome::Rejected(
            EMPTY_DISABLE_OUTPUT_MESSAGE.to_string(),
        ));
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| DomainError::Parse(format!("Invalid disable output JSON: {}", e)))?;

    if let Some(error) = value.get("error") {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Ok(MutationOutcome::Rejected(message));
    }

    let raw: RawService = serde_json::from_value(value)
        .map_err(|e| DomainError::Parse(format!("Unexpected disable output: {}", e)))?;

    Ok(MutationOutcome::Updated(raw.into_entry()))
}
