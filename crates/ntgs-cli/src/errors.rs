use console::style;
use ntgs_core::NtgsError;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for workspace not found
pub fn workspace_not_found() -> CliError {
    let current_dir = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    CliError::new("Not in an NTGS workspace")
        .with_context(format!(
            "You're not in an NTGS workspace directory.\n\nCurrent directory: {}\nLooking for: .ntgs directory",
            current_dir
        ))
        .with_suggestion("Initialize a workspace: ntgs init")
        .with_suggestion("Or navigate to an existing workspace")
        .with_help("Run: ntgs init --help")
}

/// Create error for an existing workspace
pub fn workspace_exists(path: &Path) -> CliError {
    CliError::new("Workspace already exists")
        .with_context(format!("An NTGS workspace is already present.\n\nPath: {}", path.display()))
        .with_suggestion("Reset values instead: ntgs reset")
        .with_suggestion("Or overwrite it: ntgs init --force")
        .with_help("Run: ntgs init --help")
}

/// Create error for an unknown data type
pub fn unknown_data_type(data_type: &str) -> CliError {
    CliError::new(format!("Unknown data type: {}", data_type))
        .with_context(format!(
            "The session has no data type named '{}'.\n\nData type names are case-sensitive.",
            data_type
        ))
        .with_suggestion("List the configured data types: ntgs types")
        .with_help("Run: ntgs show --help")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check .ntgs/config.toml and .ntgs/session.json for syntax errors")
        .with_suggestion("Or reinitialize: ntgs init --force")
        .with_help("Run: ntgs status")
}

/// Create error for a malformed KEY=VALUE assignment
pub fn invalid_assignment(assignment: &str) -> CliError {
    CliError::new(format!("Invalid assignment: {}", assignment))
        .with_context("Assignments must have the form KEY=VALUE with a non-empty KEY.")
        .with_suggestion("Example: ntgs update fault dip_column=DIP dipdir_column=AZI")
        .with_help("Run: ntgs update --help")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let error = match error.downcast::<CliError>() {
        Ok(cli_error) => return cli_error,
        Err(error) => error,
    };

    match error.chain().find_map(|cause| cause.downcast_ref::<NtgsError>()) {
        Some(NtgsError::UnknownDataType { data_type }) => return unknown_data_type(data_type),
        Some(NtgsError::ConfigInvalid { key, reason }) => return invalid_config(key, reason),
        _ => {}
    }

    let message = format!("{:#}", error);

    // Try to provide context based on error message
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.to_lowercase().contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
            .with_suggestion("Or run with appropriate privileges")
    } else {
        CliError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_cli_error_passes_through() {
        let error = anyhow::Error::new(workspace_not_found());
        let converted = from_anyhow(error);
        assert_eq!(converted.message, "Not in an NTGS workspace");
        assert_eq!(converted.suggestions.len(), 2);
    }

    #[test]
    fn test_unknown_data_type_behind_context() {
        let result: Result<(), NtgsError> =
            Err(NtgsError::UnknownDataType { data_type: "basin".to_string() });
        let error = result.context("Failed to update session").unwrap_err();

        let converted = from_anyhow(error);
        assert_eq!(converted.message, "Unknown data type: basin");
        assert_eq!(converted.help_command.as_deref(), Some("Run: ntgs show --help"));
    }

    #[test]
    fn test_plain_error_keeps_message() {
        let converted = from_anyhow(anyhow::anyhow!("something odd"));
        assert_eq!(converted.message, "something odd");
        assert!(converted.suggestions.is_empty());
    }
}
