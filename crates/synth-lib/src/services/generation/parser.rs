// Artifact Parser
// Extracts the generation payload from free-form model output
//
// The upstream model returns text that probably contains JSON, often with
// commentary before and after it. Everything downstream of this module
// sees a clean typed artifact or a ParseError.

use serde::Deserialize;

use super::error::ParseError;
use crate::models::{CodeFile, SiteArtifact};

/// Completion message used when the payload omits one
pub const DEFAULT_COMPLETION_MESSAGE: &str = "✅ Website generated successfully!";

/// Step descriptions used when the payload omits them
pub const FALLBACK_STEPS: [&str; 5] = [
    "1. Created basic HTML structure",
    "2. Added essential CSS styling",
    "3. Implemented core functionality",
    "4. Optimized for different screen sizes",
    "5. Ensured accessibility standards",
];

#[derive(Debug, Deserialize)]
struct RawPayload {
    files: Option<Vec<RawFile>>,
    message: Option<String>,
    steps: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    name: Option<String>,
    content: Option<String>,
}

/// Parse the raw generation response into a typed artifact.
///
/// Takes the span from the first '{' to the last '}' and decodes it,
/// tolerating any prose the model wrapped around the payload. Only the
/// structural shape is validated; file contents are passed through as-is.
pub fn parse_artifact(raw: &str) -> Result<SiteArtifact, ParseError> {
    let start = raw.find('{').ok_or(ParseError::NoJsonObject)?;
    let end = raw.rfind('}').ok_or(ParseError::NoJsonObject)?;
    if end < start {
        return Err(ParseError::NoJsonObject);
    }

    let span = &raw[start..=end];
    let payload: RawPayload =
        serde_json::from_str(span).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let raw_files = payload.files.ok_or(ParseError::MissingFiles)?;

    let mut files = Vec::with_capacity(raw_files.len());
    for (index, entry) in raw_files.into_iter().enumerate() {
        let name = entry.name.ok_or(ParseError::InvalidFileEntry {
            index,
            field: "name",
        })?;
        let content = entry.content.ok_or(ParseError::InvalidFileEntry {
            index,
            field: "content",
        })?;
        files.push(CodeFile::new(name, content));
    }

    let message = payload
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COMPLETION_MESSAGE.to_string());

    let steps = match payload.steps {
        Some(steps) if !steps.is_empty() => steps,
        _ => FALLBACK_STEPS.iter().map(|s| s.to_string()).collect(),
    };

    Ok(SiteArtifact {
        files,
        message,
        steps,
    })
}
