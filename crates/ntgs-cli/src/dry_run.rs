use crate::output::OutputWriter;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// A change to the workspace that `--dry-run` reports instead of making
#[derive(Debug, Clone, Serialize)]
pub struct PlannedAction {
    pub action_type: ActionType,
    pub description: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    CreateDirectory,
    CreateFile,
    ModifyFile,
}

impl PlannedAction {
    pub fn new(action_type: ActionType, description: impl Into<String>) -> Self {
        Self {
            action_type,
            description: description.into(),
            details: Vec::new(),
        }
    }

    /// Rewrite of the session file, one detail per field change
    pub fn session_update(session_path: &Path, changes: Vec<String>) -> Self {
        let mut action = Self::new(
            ActionType::ModifyFile,
            format!("Update {}", session_path.display()),
        );
        if changes.is_empty() {
            action.details.push("No field changes".to_string());
        } else {
            action.details = changes;
        }
        action
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}

/// Print the planned actions, as a numbered list or a JSON envelope
pub fn display_planned_actions(output: &OutputWriter, actions: &[PlannedAction]) -> Result<()> {
    if output.is_json() {
        return output.result(serde_json::json!({
            "dry_run": true,
            "planned_actions": actions,
        }));
    }

    output.section("Planned Actions (Dry Run)");
    for (i, action) in actions.iter().enumerate() {
        output.info(format!("{}. {}: {}", i + 1, action.action_type.label(), action.description));
        for detail in &action.details {
            output.info(format!("   - {}", detail));
        }
    }
    output.info("\nThe workspace was not changed. Run without --dry-run to apply.");
    Ok(())
}

impl ActionType {
    fn label(self) -> &'static str {
        match self {
            ActionType::CreateDirectory => "Create directory",
            ActionType::CreateFile => "Create file",
            ActionType::ModifyFile => "Modify file",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planned_action_creation() {
        let action = PlannedAction::new(ActionType::ModifyFile, "Update session.json")
            .with_detail("fault.dip_column: Dip -> DIP")
            .with_detail("fault.dipdir_column: DipDir -> AZI");

        assert_eq!(action.description, "Update session.json");
        assert_eq!(action.details.len(), 2);
    }

    #[test]
    fn test_session_update_lists_changes() {
        let path = Path::new(".ntgs/session.json");

        let action = PlannedAction::session_update(path, vec!["survey: removed".to_string()]);
        assert_eq!(action.action_type, ActionType::ModifyFile);
        assert_eq!(action.description, "Update .ntgs/session.json");
        assert_eq!(action.details, vec!["survey: removed"]);

        let action = PlannedAction::session_update(path, Vec::new());
        assert_eq!(action.details, vec!["No field changes"]);
    }

    #[test]
    fn test_action_type_serialization() {
        let action = PlannedAction::new(ActionType::CreateDirectory, "Create .ntgs");
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("create_directory"));
    }
}
