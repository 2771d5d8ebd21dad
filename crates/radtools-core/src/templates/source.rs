//! Template sources: the bundled set, or a local directory for template development

use crate::error::{InstallError, Result};
use crate::templates::manifest::{TemplateFile, TemplateManifest, TemplateSet, MANIFEST_FILE};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Environment variable overriding the template source with a local directory
pub const TEMPLATE_DIR_ENV: &str = "RADTOOLS_TEMPLATE_DIR";

macro_rules! bundled_files {
    ($($path:literal),* $(,)?) => {
        &[$(
            (
                $path,
                include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates/radtools/", $path)),
            )
        ),*]
    };
}

/// Template files compiled into the binary, keyed by their source name
static BUNDLED: &[(&str, &str)] = bundled_files![
    "template.yaml",
    "fragments/app-layout.tsx",
    "fragments/pages-app.tsx",
    "fragments/devtools.config.ts",
    "hooks/useDevToolsStore.ts",
    "hooks/useToast.ts",
    "components/devtools/DevToolsProvider.tsx",
    "components/devtools/DevToolsPanel.tsx",
    "components/ui/Button.tsx",
    "components/ui/Dialog.tsx",
    "components/ui/Slider.tsx",
    "components/ui/Toast.tsx",
    "api/app-read-css.ts",
    "api/pages-read-css.ts",
];

/// Where template files come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Bundled,
    Local(PathBuf),
}

impl TemplateSource {
    /// Use `dir` if given, else `RADTOOLS_TEMPLATE_DIR`, else the bundled templates
    pub fn resolve(dir: Option<PathBuf>) -> Self {
        dir.or_else(|| {
            std::env::var_os(TEMPLATE_DIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .map_or(TemplateSource::Bundled, TemplateSource::Local)
    }

    pub fn is_local(&self) -> bool {
        matches!(self, TemplateSource::Local(_))
    }

    /// Load the manifest and every file it lists
    pub fn load(&self) -> Result<TemplateSet> {
        let manifest_path = self.origin(MANIFEST_FILE);
        let manifest = TemplateManifest::parse(&self.read(MANIFEST_FILE)?, &manifest_path)?;

        let mut files = Vec::with_capacity(manifest.files.len());
        for entry in manifest.files {
            let content = self.read(&entry.source)?.into_owned();
            files.push(TemplateFile {
                source: entry.source,
                path: entry.path,
                content,
                kind: entry.kind,
                router: entry.router,
                merge: entry.merge,
            });
        }

        tracing::debug!(
            source = ?self,
            name = %manifest.name,
            files = files.len(),
            "loaded templates"
        );

        Ok(TemplateSet {
            name: manifest.name,
            version: manifest.version,
            description: manifest.description,
            dependencies: manifest.dependencies,
            files,
        })
    }

    fn origin(&self, name: &str) -> PathBuf {
        match self {
            TemplateSource::Bundled => Path::new("<bundled>").join(name),
            TemplateSource::Local(dir) => dir.join(name),
        }
    }

    fn read(&self, name: &str) -> Result<Cow<'static, str>> {
        match self {
            TemplateSource::Bundled => BUNDLED
                .iter()
                .find(|(path, _)| *path == name)
                .map(|(_, content)| Cow::Borrowed(*content))
                .ok_or_else(|| InstallError::InvalidManifest {
                    path: self.origin(MANIFEST_FILE),
                    reason: format!("template file '{}' is not bundled", name),
                }),
            TemplateSource::Local(dir) => {
                let path = dir.join(name);
                std::fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|e| InstallError::fs("failed to read template", path, e))
            }
        }
    }
}
