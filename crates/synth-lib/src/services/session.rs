// Build Session
// Explicit session context: conversation log, canonical file list, file
// tree, and the editor for the selected file
//
// All artifact state lives here rather than in ambient globals, so
// multiple sessions never interfere. The canonical file list is mutated
// only by artifact installation and by editor save/revert; the tree and
// preview are read-only derivations.

use uuid::Uuid;

use crate::models::{build_file_tree, CodeFile, ConversationLog, FileNode, SiteArtifact};
use crate::services::editor::FileEditor;

/// State for one build session (one tab)
#[derive(Debug)]
pub struct BuildSession {
    id: String,
    conversation: ConversationLog,
    /// Canonical file list from the last successful generation, including
    /// saved edits
    files: Vec<CodeFile>,
    /// Generation-time copies backing per-file revert
    baseline: Vec<CodeFile>,
    tree: Vec<FileNode>,
    selected: Option<String>,
    editor: Option<FileEditor>,
    generating: bool,
}

impl BuildSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation: ConversationLog::new(),
            files: Vec::new(),
            baseline: Vec::new(),
            tree: Vec::new(),
            selected: None,
            editor: None,
            generating: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn conversation(&self) -> &ConversationLog {
        &self.conversation
    }

    pub(crate) fn conversation_mut(&mut self) -> &mut ConversationLog {
        &mut self.conversation
    }

    /// Toggle the expanded state of a message's step list (view state)
    pub fn toggle_message_steps(&mut self, message_id: u64) {
        self.conversation.toggle_steps(message_id);
    }

    pub fn files(&self) -> &[CodeFile] {
        &self.files
    }

    pub fn file_tree(&self) -> &[FileNode] {
        &self.tree
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn editor(&self) -> Option<&FileEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut FileEditor> {
        self.editor.as_mut()
    }

    /// Whether a generation produced an artifact for this session
    pub fn has_artifact(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub(crate) fn set_generating(&mut self, generating: bool) {
        self.generating = generating;
    }

    /// Install a freshly generated artifact: replace the canonical files
    /// and baselines, rebuild the tree, and select the first file with a
    /// fresh editor. Any previous edit state is discarded.
    pub(crate) fn install_artifact(&mut self, artifact: &SiteArtifact) {
        self.files = artifact.files.clone();
        self.baseline = artifact.files.clone();
        self.tree = build_file_tree(&self.files);
        self.selected = self.files.first().map(|f| f.name.clone());
        self.editor = self.selected.as_ref().and_then(|path| self.make_editor(path));
    }

    fn make_editor(&self, path: &str) -> Option<FileEditor> {
        let file = self.files.iter().find(|f| f.name == path)?;
        let baseline = self
            .baseline
            .iter()
            .find(|f| f.name == path)
            .map(|f| f.content.as_str())
            .unwrap_or(&file.content);
        Some(FileEditor::new(path, &file.content, baseline))
    }

    /// Select a file by its full path, creating a fresh editor for it.
    /// Unsaved edits on the previously selected file are lost. Returns
    /// false when no such file exists.
    pub fn select_file(&mut self, path: &str) -> bool {
        match self.make_editor(path) {
            Some(editor) => {
                self.selected = Some(path.to_string());
                self.editor = Some(editor);
                true
            }
            None => false,
        }
    }

    /// Enter edit mode on the selected file
    pub fn begin_edit(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.begin_edit();
        }
    }

    /// Replace the live buffer of the selected file
    pub fn update_edit(&mut self, content: impl Into<String>) {
        if let Some(editor) = self.editor.as_mut() {
            editor.update_content(content);
        }
    }

    /// Commit the live buffer into the canonical file list. Returns false
    /// when no file is selected or the editor is not in edit mode.
    pub fn save_edits(&mut self) -> bool {
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };
        let Some(content) = editor.save().map(|c| c.to_string()) else {
            return false;
        };
        let path = editor.path().to_string();
        self.commit_content(&path, content);
        true
    }

    /// Restore the last save point in the live buffer
    pub fn undo_edits(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.undo();
        }
    }

    /// Restore the selected file to its generation-time content and commit
    /// that back into the canonical file list. Returns false when no file
    /// is selected.
    pub fn revert_file(&mut self) -> bool {
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };
        let content = editor.revert().to_string();
        let path = editor.path().to_string();
        self.commit_content(&path, content);
        true
    }

    fn commit_content(&mut self, path: &str, content: String) {
        if let Some(file) = self.files.iter_mut().find(|f| f.name == path) {
            file.content = content;
        }
    }
}

impl Default for BuildSession {
    fn default() -> Self {
        Self::new()
    }
}
