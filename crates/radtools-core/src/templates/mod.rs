//! Template source, manifest parsing, and compatibility checks
//!
//! Templates ship inside the binary. A local template directory with the same
//! layout can replace them during template development.

pub mod manifest;
pub mod source;
pub mod version;

pub use manifest::{MergeStrategy, TemplateFile, TemplateKind, TemplateManifest, TemplateSet};
pub use source::TemplateSource;
