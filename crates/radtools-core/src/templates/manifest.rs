//! Template manifest (`template.yaml`) types

use crate::error::{InstallError, Result};
use crate::project::Router;
use serde::Deserialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Manifest file name at the root of a template directory
pub const MANIFEST_FILE: &str = "template.yaml";

/// Classification of a template file, which drives planning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    Component,
    Hook,
    ApiRoute,
    ConfigFragment,
}

impl TemplateKind {
    /// Position in the install order: config fragments, hooks, components, API routes
    pub fn install_order(&self) -> u8 {
        match self {
            TemplateKind::ConfigFragment => 0,
            TemplateKind::Hook => 1,
            TemplateKind::Component => 2,
            TemplateKind::ApiRoute => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateKind::Component => "component",
            TemplateKind::Hook => "hook",
            TemplateKind::ApiRoute => "api-route",
            TemplateKind::ConfigFragment => "config-fragment",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How a config fragment is combined with an existing destination file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Tool-owned file; overwritten with the template content
    Replace,
    /// Add `import` after the import block and wrap `anchor` in `<provider>`
    WrapProvider {
        import: String,
        anchor: String,
        provider: String,
    },
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStrategy::Replace => write!(f, "replace"),
            MergeStrategy::WrapProvider {
                anchor, provider, ..
            } => write!(f, "wrap `{}` in <{}>", anchor, provider),
        }
    }
}

/// Parsed `template.yaml`
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    /// npm packages the templates import
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub files: Vec<TemplateEntry>,
}

/// One file listed in the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateEntry {
    /// Path inside the template directory
    pub source: String,
    /// Destination relative to the project's source root
    pub path: PathBuf,
    pub kind: TemplateKind,
    /// Only installed for this router; both when absent
    #[serde(default)]
    pub router: Option<Router>,
    #[serde(default)]
    pub merge: Option<MergeStrategy>,
}

impl TemplateManifest {
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let manifest: TemplateManifest =
            serde_yaml::from_str(content).map_err(|e| InstallError::InvalidManifest {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })?;
        manifest.validate(origin)?;
        Ok(manifest)
    }

    fn validate(&self, origin: &Path) -> Result<()> {
        let invalid = |reason: String| InstallError::InvalidManifest {
            path: origin.to_path_buf(),
            reason,
        };

        for entry in &self.files {
            let escapes = entry
                .path
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
            if escapes || entry.path.as_os_str().is_empty() {
                return Err(invalid(format!(
                    "destination '{}' must be a relative path inside the project",
                    entry.path.display()
                )));
            }
            if entry.merge.is_some() && entry.kind != TemplateKind::ConfigFragment {
                return Err(invalid(format!(
                    "'{}' declares a merge strategy but is a {}",
                    entry.source, entry.kind
                )));
            }
        }
        Ok(())
    }
}

/// A template file with its content loaded
#[derive(Debug, Clone)]
pub struct TemplateFile {
    /// Source name inside the template directory
    pub source: String,
    /// Destination relative to the project's source root
    pub path: PathBuf,
    pub content: String,
    pub kind: TemplateKind,
    pub router: Option<Router>,
    pub merge: Option<MergeStrategy>,
}

impl TemplateFile {
    pub fn applies_to(&self, router: Router) -> bool {
        self.router.is_none_or(|r| r == router)
    }
}

/// The loaded template set handed to the planner
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub name: String,
    pub version: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub files: Vec<TemplateFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
name: Test
version: 0.1.0
dependencies: [zustand]
files:
  - source: layout.tsx
    path: app/layout.tsx
    kind: config-fragment
    router: app
    merge:
      strategy: wrap-provider
      import: "import { P } from './p';"
      anchor: "{children}"
      provider: P
  - source: config.ts
    path: components/config.ts
    kind: config-fragment
    merge:
      strategy: replace
  - source: Button.tsx
    path: components/ui/Button.tsx
    kind: component
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = TemplateManifest::parse(MANIFEST, Path::new("template.yaml")).unwrap();
        assert_eq!(manifest.name, "Test");
        assert_eq!(manifest.dependencies, vec!["zustand"]);
        assert_eq!(manifest.files.len(), 3);

        let layout = &manifest.files[0];
        assert_eq!(layout.kind, TemplateKind::ConfigFragment);
        assert_eq!(layout.router, Some(Router::App));
        assert_eq!(
            layout.merge,
            Some(MergeStrategy::WrapProvider {
                import: "import { P } from './p';".to_string(),
                anchor: "{children}".to_string(),
                provider: "P".to_string(),
            })
        );
        assert_eq!(manifest.files[1].merge, Some(MergeStrategy::Replace));
        assert_eq!(manifest.files[2].router, None);
    }

    #[test]
    fn test_rejects_paths_outside_project() {
        let yaml = "name: t\nversion: 0.1.0\nfiles:\n  - source: a\n    path: ../a.ts\n    kind: hook\n";
        let err = TemplateManifest::parse(yaml, Path::new("template.yaml")).unwrap_err();
        assert!(matches!(err, InstallError::InvalidManifest { .. }));
    }

    #[test]
    fn test_rejects_merge_on_component() {
        let yaml = "name: t\nversion: 0.1.0\nfiles:\n  - source: a\n    path: a.tsx\n    kind: component\n    merge:\n      strategy: replace\n";
        assert!(TemplateManifest::parse(yaml, Path::new("template.yaml")).is_err());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let yaml = "name: t\nversion: 0.1.0\nfiles:\n  - source: a\n    path: a.tsx\n    kind: widget\n";
        assert!(TemplateManifest::parse(yaml, Path::new("template.yaml")).is_err());
    }

    #[test]
    fn test_install_order() {
        let mut kinds = vec![
            TemplateKind::ApiRoute,
            TemplateKind::Component,
            TemplateKind::ConfigFragment,
            TemplateKind::Hook,
        ];
        kinds.sort_by_key(TemplateKind::install_order);
        assert_eq!(
            kinds,
            vec![
                TemplateKind::ConfigFragment,
                TemplateKind::Hook,
                TemplateKind::Component,
                TemplateKind::ApiRoute,
            ]
        );
    }
}
