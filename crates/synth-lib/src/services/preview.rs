// Preview Renderer
// Assembles a self-contained document from generated files for rendering
// inside an isolated sandbox
//
// Generated content is untrusted. The sandbox is the security boundary;
// the injected navigation guards are defense-in-depth on top of it, not a
// substitute for it.

use thiserror::Error;

use crate::models::CodeFile;

/// Preview Error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    /// No generated files to preview
    #[error("No artifact to preview")]
    NoArtifact,
}

/// Result type for preview operations
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Script injected ahead of all generated JS: cancels anchor navigation
/// and form submissions, and stubs window.open
const NAVIGATION_GUARDS: &str = r#"// Prevent navigation and form submissions
document.addEventListener('click', function(e) {
  if (e.target.tagName === 'A' && e.target.href) {
    e.preventDefault();
    return false;
  }
});

document.addEventListener('submit', function(e) {
  e.preventDefault();
  return false;
});

// Prevent window.open
window.open = function() { return null; };"#;

/// Sandbox capabilities granted to the preview document.
///
/// Top-level navigation and popups are never granted; scripts run with
/// same-origin access so injected styles and scripts cohere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxPolicy {
    pub allow_scripts: bool,
    pub allow_same_origin: bool,
    pub allow_forms: bool,
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self {
            allow_scripts: true,
            allow_same_origin: true,
            allow_forms: true,
        }
    }
}

impl SandboxPolicy {
    /// Render as a sandbox attribute value
    pub fn attribute(&self) -> String {
        let mut grants = Vec::new();
        if self.allow_scripts {
            grants.push("allow-scripts");
        }
        if self.allow_same_origin {
            grants.push("allow-same-origin");
        }
        if self.allow_forms {
            grants.push("allow-forms");
        }
        grants.join(" ")
    }
}

/// Assemble the preview document: all CSS in one style block, the
/// index.html content as the body, and one script block with the guards
/// ahead of all generated JS.
pub fn render_preview(files: &[CodeFile]) -> PreviewResult<String> {
    if files.is_empty() {
        return Err(PreviewError::NoArtifact);
    }

    let body = files
        .iter()
        .find(|f| f.name == "index.html")
        .map(|f| f.content.as_str())
        .unwrap_or("");

    let css: Vec<&str> = files
        .iter()
        .filter(|f| f.name.ends_with(".css"))
        .map(|f| f.content.as_str())
        .collect();

    let js: Vec<&str> = files
        .iter()
        .filter(|f| f.name.ends_with(".js"))
        .map(|f| f.content.as_str())
        .collect();

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>{css}</style>
  </head>
  <body>
    {body}
    <script>
{guards}

{js}
    </script>
  </body>
</html>
"#,
        css = css.join("\n"),
        body = body,
        guards = NAVIGATION_GUARDS,
        js = js.join("\n"),
    ))
}

/// A renderable preview instance.
///
/// The instance counter keys the host's isolation context: bumping it on
/// refresh makes the host discard the cached context instead of reloading
/// the same one in place. Refreshing never re-runs generation.
#[derive(Debug, Clone)]
pub struct PreviewFrame {
    document: String,
    sandbox: SandboxPolicy,
    instance: u64,
}

impl PreviewFrame {
    /// Build a preview from the current file set
    pub fn build(files: &[CodeFile]) -> PreviewResult<Self> {
        Ok(Self {
            document: render_preview(files)?,
            sandbox: SandboxPolicy::default(),
            instance: 0,
        })
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn sandbox(&self) -> &SandboxPolicy {
        &self.sandbox
    }

    /// Isolation key for the current rendering
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Rebuild the document from the current file set and switch to a new
    /// isolation instance
    pub fn refresh(&mut self, files: &[CodeFile]) -> PreviewResult<()> {
        self.document = render_preview(files)?;
        self.instance += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> Vec<CodeFile> {
        vec![
            CodeFile::new("index.html", "<h1>Hello</h1>"),
            CodeFile::new("style.css", "h1 { color: red; }"),
            CodeFile::new("theme.css", "body { margin: 0; }"),
            CodeFile::new("script.js", "console.log('hi');"),
        ]
    }

    #[test]
    fn test_document_contains_all_parts() {
        let document = render_preview(&files()).unwrap();

        assert!(document.contains("<h1>Hello</h1>"));
        assert!(document.contains("h1 { color: red; }"));
        assert!(document.contains("body { margin: 0; }"));
        assert!(document.contains("console.log('hi');"));
    }

    #[test]
    fn test_css_lands_in_single_style_block() {
        let document = render_preview(&files()).unwrap();
        assert_eq!(document.matches("<style>").count(), 1);

        let style_start = document.find("<style>").unwrap();
        let style_end = document.find("</style>").unwrap();
        let style = &document[style_start..style_end];
        assert!(style.contains("color: red"));
        assert!(style.contains("margin: 0"));
    }

    #[test]
    fn test_guards_precede_generated_js() {
        let document = render_preview(&files()).unwrap();
        let guards_at = document.find("window.open = function()").unwrap();
        let js_at = document.find("console.log('hi');").unwrap();
        assert!(guards_at < js_at);
    }

    #[test]
    fn test_missing_index_html_yields_empty_body() {
        let document = render_preview(&[CodeFile::new("app.js", "run();")]).unwrap();
        assert!(document.contains("run();"));
        assert!(document.contains("<body>"));
    }

    #[test]
    fn test_empty_file_set_is_an_error() {
        assert_eq!(render_preview(&[]), Err(PreviewError::NoArtifact));
    }

    #[test]
    fn test_sandbox_never_grants_top_navigation() {
        let attribute = SandboxPolicy::default().attribute();
        assert_eq!(attribute, "allow-scripts allow-same-origin allow-forms");
        assert!(!attribute.contains("allow-top-navigation"));
        assert!(!attribute.contains("allow-popups"));
    }

    #[test]
    fn test_refresh_bumps_isolation_instance() {
        let mut frame = PreviewFrame::build(&files()).unwrap();
        assert_eq!(frame.instance(), 0);

        let before = frame.document().to_string();
        frame.refresh(&files()).unwrap();
        assert_eq!(frame.instance(), 1);
        assert_eq!(frame.document(), before);

        frame.refresh(&files()).unwrap();
        assert_eq!(frame.instance(), 2);
    }

    #[test]
    fn test_refresh_picks_up_edited_files() {
        let mut frame = PreviewFrame::build(&files()).unwrap();
        let mut edited = files();
        edited[0].content = "<h1>Edited</h1>".to_string();

        frame.refresh(&edited).unwrap();
        assert!(frame.document().contains("<h1>Edited</h1>"));
    }
}
