// Artifact data models
// One generated website: the file set produced from a single prompt

use serde::{Deserialize, Serialize};

/// A single generated file, keyed by its path-qualified name
/// (e.g. "index.html", "components/nav.html")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeFile {
    pub name: String,
    pub content: String,
}

impl CodeFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// File extension without the dot, lowercased ("html", "css", "js")
    pub fn extension(&self) -> String {
        self.name.rsplit('.').next().unwrap_or("").to_lowercase()
    }
}

/// The parsed generation payload: files plus the assistant-visible
/// completion message and development step descriptions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteArtifact {
    pub files: Vec<CodeFile>,
    pub message: String,
    pub steps: Vec<String>,
}

impl SiteArtifact {
    /// An artifact with no files is a soft failure, not a valid result
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Look up a file by its full path-qualified name
    pub fn file(&self, name: &str) -> Option<&CodeFile> {
        self.files.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_file_extension() {
        assert_eq!(CodeFile::new("index.html", "").extension(), "html");
        assert_eq!(CodeFile::new("assets/app.JS", "").extension(), "js");
    }

    #[test]
    fn test_artifact_lookup() {
        let artifact = SiteArtifact {
            files: vec![
                CodeFile::new("index.html", "<p>hi</p>"),
                CodeFile::new("style.css", "body {}"),
            ],
            message: "done".to_string(),
            steps: vec![],
        };

        assert!(!artifact.is_empty());
        assert_eq!(artifact.file("style.css").unwrap().content, "body {}");
        assert!(artifact.file("missing.js").is_none());
    }
}
