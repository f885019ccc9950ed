use crate::{
    editor::Editor,
    error::Result,
    model::DirectoryModel,
    utils::sizeof_fmt,
};
use ratatui::widgets::ListState;
use std::path::{Path, PathBuf};

const PAGE_SIZE: usize = 10;

/// Application State
pub struct App {
    pub model: DirectoryModel,
    pub state: ListState,
    pub editor: Editor,
    pub status_message: Option<String>,
    pub show_help: bool,
}

impl App {
    pub fn new(dir: &Path, editor: Editor) -> Result<Self> {
        let model = DirectoryModel::new(dir)?;
        let mut app = Self {
            model,
            state: ListState::default(),
            editor,
            status_message: None,
            show_help: false,
        };
        app.reset_focus(0);
        Ok(app)
    }

    /// Puts focus on `index`, clamped to the listing, or on nothing if empty.
    fn reset_focus(&mut self, index: usize) {
        let len = self.model.file_count();
        if len == 0 {
            self.state.select(None);
        } else {
            self.state.select(Some(index.min(len - 1)));
        }
    }

    pub fn focused(&self) -> Option<usize> {
        self.state
            .selected()
            .filter(|&i| i < self.model.file_count())
    }

    pub fn focused_path(&self) -> Option<PathBuf> {
        self.focused().and_then(|i| self.model.entry_path(i).ok())
    }

    pub fn next(&mut self) {
        let len = self.model.file_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.model.file_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let i = self.state.selected().map_or(0, |i| i + PAGE_SIZE);
        self.reset_focus(i);
    }

    pub fn page_up(&mut self) {
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(PAGE_SIZE));
        self.reset_focus(i);
    }

    pub fn go_to_first(&mut self) {
        self.reset_focus(0);
    }

    pub fn go_to_last(&mut self) {
        self.reset_focus(usize::MAX);
    }

    /// Selects the focused entry and moves focus to the next row.
    pub fn select_focused(&mut self) {
        let Some(idx) = self.focused() else {
            return;
        };
        match self.model.select_entry(idx) {
            Ok(()) => self.next(),
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Unselects the focused entry, if selected, and moves focus to the next row.
    pub fn unselect_focused(&mut self) {
        let Some(idx) = self.focused() else {
            return;
        };
        if !self.model.is_selected(idx) {
            return;
        }
        self.model.unselect_entry(idx);
        self.next();
    }

    pub fn delete_selected(&mut self) {
        if self.model.selected_count() == 0 {
            self.status_message = Some("Nothing selected".to_string());
            return;
        }
        let count = self.model.selected_count();
        let focus = self.state.selected().unwrap_or(0);
        match self.model.delete_selected() {
            Ok(failures) if failures.is_empty() => {
                self.status_message = Some(format!("Deleted {} entries", count));
            }
            Ok(failures) => {
                let first = failures
                    .first()
                    .map(|f| f.to_string())
                    .unwrap_or_default();
                self.status_message = Some(format!(
                    "{} of {} deletions failed: {}",
                    failures.len(),
                    count,
                    first
                ));
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
        self.reset_focus(focus);
    }

    /// Enter the focused directory
    pub fn enter_dir(&mut self) {
        let Some(idx) = self.focused() else {
            return;
        };
        let target = match self.model.entry_metadata(idx) {
            Ok(m) if m.is_dir => m.full_path,
            Ok(_) => return,
            Err(e) => {
                self.status_message = Some(e.to_string());
                return;
            }
        };
        self.change_directory(&target, 0);
    }

    /// Go up one level, keeping focus on the directory we came from
    pub fn go_up(&mut self) {
        let current = self.model.working_dir().to_path_buf();
        let Some(parent) = current.parent() else {
            return;
        };
        self.change_directory(parent, 0);
        if let Some(name) = current.file_name()
            && let Some(idx) = self.model.entries().iter().position(|e| e == name)
        {
            self.reset_focus(idx);
        }
    }

    fn change_directory(&mut self, path: &Path, focus: usize) {
        match self.model.change_directory(path) {
            Ok(()) => self.reset_focus(focus),
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Re-list the working directory
    pub fn refresh(&mut self) {
        let focus = self.state.selected().unwrap_or(0);
        match self.model.refresh() {
            Ok(()) => {
                self.reset_focus(focus);
                self.status_message = Some(format!(
                    "Refreshed: {} entries, {}",
                    self.model.file_count(),
                    sizeof_fmt(self.model.total_size())
                ));
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }
}
