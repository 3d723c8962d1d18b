// Services module
// Business logic for the generation-to-artifact pipeline

pub mod deploy;
pub mod editor;
pub mod export;
pub mod generation;
pub mod preview;
pub mod session;

pub use deploy::{DeployError, DeploymentProvider, DeploymentResult, VercelProvider};
pub use editor::{EditorMode, FileEditor};
pub use export::{export_zip, write_zip_to, ExportError, DEFAULT_ARCHIVE_NAME};
pub use generation::{
    GeminiProvider, GenerationError, GenerationOutcome, GenerationProvider, GenerationService,
    ParseError, ProgressSnapshot,
};
pub use preview::{render_preview, PreviewError, PreviewFrame, SandboxPolicy};
pub use session::BuildSession;
