/*
[INPUT]:  Public API exports for the task-cloner application crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod attachments;
pub mod config;
pub mod editor;
pub mod error;
pub mod flow;
pub mod importer;
pub mod notice;
pub mod notifier;
pub mod platform;
pub mod text_field;

// Re-export main types for convenience
pub use config::ClonerConfig;
pub use editor::{ClonePayload, TaskEditor};
pub use error::FlowError;
pub use flow::{FlowController, FlowSnapshot};
pub use importer::TaskImporter;
pub use notice::Notices;
pub use notifier::SuccessNotifier;
