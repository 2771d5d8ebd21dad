//! Template/CLI version compatibility

use semver::Version;

/// Compare the CLI version with the version a template set was written for.
///
/// Returns a warning when the templates are newer (by major or minor) than the
/// CLI, or when either version cannot be parsed. Patch differences are ignored.
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let (cli, template) = match (parse_version(cli_version), parse_version(template_version)) {
        (Ok(cli), Ok(template)) => (cli, template),
        _ => {
            return Some(format!(
                "Could not compare template version '{}' with CLI version '{}'",
                template_version, cli_version
            ))
        }
    };

    if (template.major, template.minor) > (cli.major, cli.minor) {
        Some(format!(
            "Templates target radtools {} but this is radtools {}.\nUpgrade with: {}",
            template, cli, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse a version string, accepting a leading `v`
pub fn parse_version(version: &str) -> Result<Version, semver::Error> {
    Version::parse(version.strip_prefix('v').unwrap_or(version))
}
