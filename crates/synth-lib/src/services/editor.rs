// File Editor
// Per-file edit state machine: original vs. edited vs. saved vs. reverted
//
// Undo and revert are distinct: undo returns to the last save point,
// revert returns to the generation-time baseline. The baseline is fixed
// when the file first comes out of a generation and is never overwritten
// by saves.

/// Editor mode for the selected file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Viewing,
    Editing,
}

/// Edit state for one selected file
#[derive(Debug, Clone)]
pub struct FileEditor {
    path: String,
    /// Generation-time content; the only path back to what the model
    /// originally produced
    baseline: String,
    /// Last save point
    original: String,
    /// Live buffer
    edited: String,
    mode: EditorMode,
    /// Tracks divergence from the last save point, except after undo where
    /// it reflects divergence from the generated baseline
    dirty: bool,
}

impl FileEditor {
    /// Create an editor for a freshly displayed file
    pub fn new(path: impl Into<String>, content: &str, baseline: &str) -> Self {
        Self {
            path: path.into(),
            baseline: baseline.to_string(),
            original: content.to_string(),
            edited: content.to_string(),
            mode: EditorMode::Viewing,
            dirty: false,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// The content currently displayed
    pub fn content(&self) -> &str {
        &self.edited
    }

    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Enter edit mode, capturing the displayed content as the pre-edit
    /// original
    pub fn begin_edit(&mut self) {
        if self.mode == EditorMode::Viewing {
            self.original = self.edited.clone();
            self.mode = EditorMode::Editing;
            self.dirty = false;
        }
    }

    /// Replace the live buffer; only meaningful while editing
    pub fn update_content(&mut self, content: impl Into<String>) {
        if self.mode == EditorMode::Editing {
            self.edited = content.into();
            self.dirty = self.edited != self.original;
        }
    }

    /// Commit the live buffer, leaving edit mode. Returns the committed
    /// content for the caller to sync into the canonical file list.
    pub fn save(&mut self) -> Option<&str> {
        if self.mode != EditorMode::Editing {
            return None;
        }
        self.original = self.edited.clone();
        self.mode = EditorMode::Viewing;
        self.dirty = false;
        Some(&self.edited)
    }

    /// Restore the last save point, staying in edit mode
    pub fn undo(&mut self) {
        if self.mode == EditorMode::Editing {
            self.edited = self.original.clone();
            self.dirty = self.original != self.baseline;
        }
    }

    /// Restore the generation-time baseline, discarding all edits and
    /// saves, and leave edit mode. Returns the baseline content for the
    /// caller to commit into the canonical file list.
    pub fn revert(&mut self) -> &str {
        self.edited = self.baseline.clone();
        self.original = self.baseline.clone();
        self.mode = EditorMode::Viewing;
        self.dirty = false;
        &self.edited
    }
}
