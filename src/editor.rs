use crate::error::{PutError, Result};
use std::{path::Path, process::Command};
use tracing::info;

pub const DEFAULT_EDITOR: &str = "vim";

/// Picks the editor command: `$EDITOR`, then `$VISUAL`, then `default`.
/// Empty values count as unset.
pub fn resolve_editor(editor: Option<&str>, visual: Option<&str>, default: &str) -> String {
    [editor, visual]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// External editor launched on a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    command: String,
}

impl Editor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Resolves the command from the process environment.
    pub fn from_env() -> Self {
        let editor = std::env::var("EDITOR").ok();
        let visual = std::env::var("VISUAL").ok();
        Self::new(resolve_editor(
            editor.as_deref(),
            visual.as_deref(),
            DEFAULT_EDITOR,
        ))
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Runs the editor on `target` and blocks until it exits.
    /// The child inherits environment and stdio.
    pub fn edit(&self, target: &Path) -> Result<()> {
        let to_err = |source| PutError::Editor {
            command: self.command.clone(),
            source,
        };
        info!("Launching {} on {}", self.command, target.display());
        let status = Command::new(&self.command)
            .arg(target)
            .status()
            .map_err(to_err)?;
        info!("Editor exited with {}", status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_variable_wins() {
        assert_eq!(resolve_editor(Some("nano"), Some("code"), "vim"), "nano");
    }

    #[test]
    fn visual_is_the_fallback() {
        assert_eq!(resolve_editor(None, Some("code"), "vim"), "code");
        assert_eq!(resolve_editor(Some("  "), Some("code"), "vim"), "code");
    }

    #[test]
    fn default_when_nothing_set() {
        assert_eq!(resolve_editor(None, None, DEFAULT_EDITOR), "vim");
        assert_eq!(resolve_editor(Some(""), Some(""), "ed"), "ed");
    }

    #[test]
    fn missing_binary_is_an_error() {
        let editor = Editor::new("put-no-such-editor-binary");
        let result = editor.edit(Path::new("whatever.txt"));
        assert!(matches!(result, Err(PutError::Editor { .. })));
    }
}
