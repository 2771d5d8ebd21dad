//! Installation planner

use crate::error::{InstallError, Result};
use crate::install::merge;
use crate::project::ProjectTarget;
use crate::templates::{MergeStrategy, TemplateFile, TemplateKind, TemplateSet};
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Placeholder replaced with the project's global stylesheet path
const GLOBALS_CSS_PLACEHOLDER: &str = "{{GLOBALS_CSS}}";

/// Placeholder line replaced with a side-effect import of the global stylesheet,
/// or dropped when the project has none
const GLOBALS_CSS_IMPORT_PLACEHOLDER: &str = "{{GLOBALS_CSS_IMPORT}}";

/// Planner switches
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Overwrite existing components, hooks, and API routes
    pub force: bool,
}

/// What the executor does with one destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create,
    Overwrite,
    SkipExists,
    Merge(MergeStrategy),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Overwrite => write!(f, "overwrite"),
            Action::SkipExists => write!(f, "skip"),
            Action::Merge(_) => write!(f, "merge"),
        }
    }
}

/// A planned action on a single destination file
#[derive(Debug, Clone)]
pub struct FileOperation {
    pub template: TemplateFile,
    /// Absolute destination path
    pub destination: PathBuf,
    /// Destination relative to the project root
    pub relative: PathBuf,
    /// Template content with placeholders filled in
    pub content: String,
    pub action: Action,
}

/// Compute the file operations installing `templates` into `target`.
///
/// Fails before planning anything when the target is not a Next.js project or
/// when two templates share a destination.
pub fn plan(
    target: &ProjectTarget,
    templates: &TemplateSet,
    options: &PlanOptions,
) -> Result<Vec<FileOperation>> {
    if !target.exists {
        return Err(InstallError::EnvironmentMismatch {
            path: target.root.clone(),
            reason: "directory does not exist".to_string(),
        });
    }
    let Some(router) = target.router else {
        return Err(InstallError::EnvironmentMismatch {
            path: target.root.clone(),
            reason: "no app/ or pages/ directory found".to_string(),
        });
    };

    let mut seen: HashMap<PathBuf, &str> = HashMap::new();
    let mut operations = Vec::new();

    for template in templates.files.iter().filter(|t| t.applies_to(router)) {
        let destination = target.source_root.join(&template.path);
        if let Some(first) = seen.insert(destination.clone(), &template.source) {
            return Err(InstallError::DuplicateDestination {
                destination,
                first: first.to_string(),
                second: template.source.clone(),
            });
        }

        let relative = target.relative(&destination).to_path_buf();
        let content = render(&template.content, target, &relative);
        let action = decide(template, &destination, &content, options);
        tracing::debug!(
            template = %template.source,
            destination = %destination.display(),
            %action,
            "planned"
        );

        operations.push(FileOperation {
            template: template.clone(),
            relative,
            destination,
            content,
            action,
        });
    }

    operations.sort_by_key(|op| op.template.kind.install_order());
    Ok(operations)
}

fn decide(template: &TemplateFile, destination: &Path, content: &str, options: &PlanOptions) -> Action {
    if !destination.exists() {
        return Action::Create;
    }
    if std::fs::read(destination).is_ok_and(|existing| existing == content.as_bytes()) {
        return Action::SkipExists;
    }

    match (&template.kind, &template.merge) {
        (TemplateKind::ConfigFragment, Some(MergeStrategy::Replace)) => Action::Overwrite,
        (TemplateKind::ConfigFragment, Some(strategy @ MergeStrategy::WrapProvider { provider, .. })) => {
            let merged = std::fs::read_to_string(destination)
                .is_ok_and(|existing| merge::is_wrapped(&existing, provider));
            if merged {
                Action::SkipExists
            } else {
                Action::Merge(strategy.clone())
            }
        }
        _ if options.force => Action::Overwrite,
        _ => Action::SkipExists,
    }
}

fn render(content: &str, target: &ProjectTarget, relative: &Path) -> String {
    let mut rendered = if content.contains(GLOBALS_CSS_IMPORT_PLACEHOLDER) {
        render_stylesheet_import(content, target, relative)
    } else {
        content.to_string()
    };
    if rendered.contains(GLOBALS_CSS_PLACEHOLDER) {
        let css_path = slash_path(target.globals_css.components());
        rendered = rendered.replace(GLOBALS_CSS_PLACEHOLDER, &css_path);
    }
    rendered
}

fn render_stylesheet_import(content: &str, target: &ProjectTarget, relative: &Path) -> String {
    let import = target.root.join(&target.globals_css).is_file().then(|| {
        let from_dir = relative.parent().unwrap_or(Path::new(""));
        format!("import '{}';", import_specifier(from_dir, &target.globals_css))
    });
    if import.is_none() {
        tracing::debug!(
            stylesheet = %target.globals_css.display(),
            "no global stylesheet, dropping import"
        );
    }

    content
        .split_inclusive('\n')
        .filter_map(|line| {
            if !line.contains(GLOBALS_CSS_IMPORT_PLACEHOLDER) {
                return Some(line.to_string());
            }
            import
                .as_deref()
                .map(|import| line.replace(GLOBALS_CSS_IMPORT_PLACEHOLDER, import))
        })
        .collect()
}

/// Relative module specifier from `from_dir` to `to`, both relative to the project root
fn import_specifier(from_dir: &Path, to: &Path) -> String {
    let from: Vec<Component<'_>> = from_dir.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let up = from.len() - common;
    let down = slash_path(to[common..].iter().copied());
    if up == 0 {
        format!("./{}", down)
    } else {
        format!("{}{}", "../".repeat(up), down)
    }
}

fn slash_path<'a>(components: impl Iterator<Item = Component<'a>>) -> String {
    components
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
