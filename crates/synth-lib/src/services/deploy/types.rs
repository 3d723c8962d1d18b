// Deploy Common Types
// Shared types and helpers for deploy providers

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use super::hash::calculate_sha1;
use crate::models::{flatten_file_tree, CodeFile, FileNode};

/// Get MIME type for an upload path
pub fn get_mime_type(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

static CSS_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="/?([^"]*\.css)""#).expect("valid href pattern"));

static JS_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"src="/?([^"]*\.js)""#).expect("valid src pattern"));

/// Rewrite stylesheet/script references in markup to be relative, so
/// assets resolve from the deployment root
pub fn rewrite_asset_references(html: &str) -> String {
    let rewritten = CSS_HREF.replace_all(html, r#"href="$1""#);
    JS_SRC.replace_all(&rewritten, r#"src="$1""#).into_owned()
}

/// Flatten the session's file tree back into deployable files, resolving
/// content from the canonical list
pub fn collect_deploy_files(tree: &[FileNode], files: &[CodeFile]) -> Vec<CodeFile> {
    flatten_file_tree(tree, files)
        .into_iter()
        .map(|(path, content)| CodeFile::new(path, content))
        .collect()
}

/// A file blob staged for upload to a deploy platform
#[derive(Debug, Clone)]
pub struct FileToUpload {
    /// Path within the deployment (e.g. "index.html")
    pub path: String,
    /// File content
    pub content: Vec<u8>,
    /// SHA-1 digest identifying the blob
    pub sha: String,
    /// Content length in bytes
    pub size: usize,
    /// MIME type
    pub content_type: String,
}

impl FileToUpload {
    pub fn new(path: String, content: Vec<u8>) -> Self {
        let sha = calculate_sha1(&content);
        let size = content.len();
        let content_type = get_mime_type(&path).to_string();
        Self {
            path,
            content,
            sha,
            size,
            content_type,
        }
    }

    pub fn from_code_file(file: &CodeFile) -> Self {
        Self::new(file.name.clone(), file.content.clone().into_bytes())
    }
}

/// Deployment result from a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    /// Deployment URL
    pub url: String,
    /// Production/alias URL (if available)
    pub alias_url: Option<String>,
    /// Provider-specific deployment ID
    pub provider_deploy_id: Option<String>,
}

impl DeploymentResult {
    pub fn new(url: String) -> Self {
        Self {
            url: normalize_deploy_url(&url),
            alias_url: None,
            provider_deploy_id: None,
        }
    }

    pub fn with_alias(mut self, alias: String) -> Self {
        self.alias_url = Some(normalize_deploy_url(&alias));
        self
    }

    pub fn with_deploy_id(mut self, id: String) -> Self {
        self.provider_deploy_id = Some(id);
        self
    }
}

/// Normalize a platform-returned URL: force https, drop trailing slash.
/// Hostnames without a scheme are accepted (Vercel returns bare hosts).
pub fn normalize_deploy_url(raw: &str) -> String {
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let normalized = match Url::parse(&candidate) {
        Ok(mut url) => {
            let _ = url.set_scheme("https");
            url.to_string()
        }
        Err(_) => candidate,
    };

    normalized.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(get_mime_type("index.html"), "text/html");
        assert_eq!(get_mime_type("style.css"), "text/css");
        assert_eq!(get_mime_type("app.js"), "application/javascript");
        assert_eq!(get_mime_type("vercel.json"), "application/json");
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_mime_type_case_insensitive() {
        assert_eq!(get_mime_type("file.HTML"), "text/html");
        assert_eq!(get_mime_type("file.CSS"), "text/css");
    }

    #[test]
    fn test_rewrite_strips_leading_slash() {
        let html = r#"<link href="/style.css"><script src="/app.js"></script>"#;
        let rewritten = rewrite_asset_references(html);
        assert_eq!(
            rewritten,
            r#"<link href="style.css"><script src="app.js"></script>"#
        );
    }

    #[test]
    fn test_rewrite_keeps_relative_references() {
        let html = r#"<link href="assets/style.css"><script src="assets/app.js"></script>"#;
        assert_eq!(rewrite_asset_references(html), html);
    }

    #[test]
    fn test_rewrite_ignores_other_references() {
        let html = r#"<a href="/about.html">about</a><img src="/logo.png">"#;
        assert_eq!(rewrite_asset_references(html), html);
    }

    #[test]
    fn test_file_to_upload_digest_and_mime() {
        let upload = FileToUpload::from_code_file(&CodeFile::new("script.js", "let x = 1;"));
        assert_eq!(upload.path, "script.js");
        assert_eq!(upload.content_type, "application/javascript");
        assert_eq!(upload.size, 10);
        assert_eq!(upload.sha.len(), 40);
    }

    #[test]
    fn test_collect_deploy_files_round_trips_tree() {
        use crate::models::build_file_tree;

        let files = vec![
            CodeFile::new("a/b.html", "<p>b</p>"),
            CodeFile::new("a/c.css", "body {}"),
            CodeFile::new("d.js", "let x;"),
        ];
        let tree = build_file_tree(&files);
        let collected = collect_deploy_files(&tree, &files);
        assert_eq!(collected, files);
    }

    #[test]
    fn test_normalize_deploy_url() {
        assert_eq!(
            normalize_deploy_url("synth-project.vercel.app"),
            "https://synth-project.vercel.app"
        );
        assert_eq!(
            normalize_deploy_url("http://synth.vercel.app/"),
            "https://synth.vercel.app"
        );
        assert_eq!(
            normalize_deploy_url("https://synth.vercel.app"),
            "https://synth.vercel.app"
        );
    }

    #[test]
    fn test_deployment_result() {
        let result = DeploymentResult::new("synth.vercel.app/".to_string())
            .with_alias("synth-prod.vercel.app".to_string())
            .with_deploy_id("dpl_123".to_string());

        assert_eq!(result.url, "https://synth.vercel.app");
        assert_eq!(
            result.alias_url,
            Some("https://synth-prod.vercel.app".to_string())
        );
        assert_eq!(result.provider_deploy_id, Some("dpl_123".to_string()));
    }
}
