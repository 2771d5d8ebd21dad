//! CLI integration tests using the REAL radtools binary

mod common;

use common::{radtools_cmd, TestProject, APP_ROUTER_FILES};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    for flag in ["--help", "-h"] {
        radtools_cmd()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("init"));
    }
}

#[test]
fn test_no_command_prints_help() {
    radtools_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    for flag in ["--version", "-v"] {
        radtools_cmd()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_unknown_command() {
    radtools_cmd()
        .arg("frobnicate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown command: frobnicate"))
        .stdout(predicate::str::contains("Usage:"));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_unknown_command() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    radtools_cmd()
        .arg(OsStr::from_bytes(b"fr\xffob"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown command: fr"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_init_empty_directory_aborts_without_writing() {
    let project = TestProject::empty();

    project.radtools().arg("init").assert().code(3);

    assert_eq!(project.entry_count(), 0);
}

#[test]
fn test_init_missing_directory_aborts() {
    let project = TestProject::empty();

    project
        .radtools()
        .args(["init", "--directory", "does-not-exist"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Package manager").not())
        .stderr(predicate::str::contains("Package manager").not());

    assert!(!project.file_exists("does-not-exist"));
}

#[test]
fn test_init_fresh_app_router_project() {
    let project = TestProject::app_router();

    project
        .radtools()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{} applied, 0 skipped, 0 failed",
            APP_ROUTER_FILES
        )))
        .stdout(predicate::str::contains("npm install zustand clsx"));

    assert!(project.file_exists("components/devtools/DevToolsProvider.tsx"));
    assert!(project.file_exists("components/ui/Dialog.tsx"));
    assert!(project.file_exists("hooks/useDevToolsStore.ts"));
    assert!(!project.file_exists("pages"));

    let layout = project.read_file("app/layout.tsx");
    assert!(layout.contains("<DevToolsProvider>{children}</DevToolsProvider>"));

    let route = project.read_file("app/api/devtools/read-css/route.ts");
    assert!(route.contains("const GLOBALS_CSS = 'app/globals.css';"));
    assert!(route.contains("status: 403"));
}

#[test]
fn test_fresh_layout_imports_the_project_stylesheet() {
    let project = TestProject::empty();
    project.write_file("package.json", "{ \"name\": \"web\", \"private\": true }\n");
    project.write_file("styles/globals.css", "@tailwind base;\n");
    project.write_file("app/page.tsx", "export default function Page() { return null; }\n");

    project.radtools().arg("init").assert().success();

    let layout = project.read_file("app/layout.tsx");
    assert!(layout.contains("import '../styles/globals.css';"));
    assert!(!layout.contains("'./globals.css'"));
    assert!(!project.file_exists("app/globals.css"));

    let route = project.read_file("app/api/devtools/read-css/route.ts");
    assert!(route.contains("const GLOBALS_CSS = 'styles/globals.css';"));
}

#[test]
fn test_fresh_pages_app_without_stylesheet_has_no_css_import() {
    let project = TestProject::empty();
    project.write_file("package.json", "{ \"name\": \"web\", \"private\": true }\n");
    project.write_file("pages/index.tsx", "export default function Home() { return null; }\n");

    project.radtools().arg("init").assert().success();

    let app = project.read_file("pages/_app.tsx");
    assert!(!app.contains(".css"));
    assert!(app.contains("<DevToolsProvider><Component {...pageProps} /></DevToolsProvider>"));
}

#[test]
fn test_init_twice_is_idempotent() {
    let project = TestProject::app_router();

    project.radtools().arg("init").assert().success();
    let layout = project.read_file("app/layout.tsx");

    project
        .radtools()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "0 applied, {} skipped, 0 failed",
            APP_ROUTER_FILES
        )));

    assert_eq!(project.read_file("app/layout.tsx"), layout);
}

#[test]
fn test_init_merges_existing_layout() {
    let project = TestProject::app_router();
    project.write_file(
        "app/layout.tsx",
        "import './globals.css';\n\nexport default function RootLayout({ children }: { children: React.ReactNode }) {\n  return (\n    <html lang=\"en\">\n      <body>{children}</body>\n    </html>\n  );\n}\n",
    );

    project
        .radtools()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("merged"));

    let layout = project.read_file("app/layout.tsx");
    assert!(layout.starts_with(
        "import './globals.css';\nimport { DevToolsProvider } from '@/components/devtools/DevToolsProvider';\n"
    ));
    assert!(layout.contains("<body><DevToolsProvider>{children}</DevToolsProvider></body>"));
}

#[test]
fn test_layout_without_imports_fails_but_installs_the_rest() {
    let project = TestProject::app_router();
    let layout = "export default function RootLayout({ children }) {\n  return <body>{children}</body>;\n}\n";
    project.write_file("app/layout.tsx", layout);

    project
        .radtools()
        .arg("init")
        .assert()
        .code(2)
        .stdout(predicate::str::contains(format!(
            "{} applied, 0 skipped, 1 failed",
            APP_ROUTER_FILES - 1
        )))
        .stdout(predicate::str::contains("anchor `import block` not found"));

    assert_eq!(project.read_file("app/layout.tsx"), layout);
    assert!(project.file_exists("components/ui/Button.tsx"));
    assert!(project.file_exists("hooks/useToast.ts"));
    assert!(project.file_exists("app/api/devtools/read-css/route.ts"));
}

#[test]
fn test_existing_component_kept_unless_forced() {
    let project = TestProject::app_router();
    project.write_file("components/ui/Button.tsx", "// my button\n");

    project.radtools().arg("init").assert().success();
    assert_eq!(project.read_file("components/ui/Button.tsx"), "// my button\n");

    project.radtools().args(["init", "--force"]).assert().success();
    assert_ne!(project.read_file("components/ui/Button.tsx"), "// my button\n");
}

#[test]
fn test_dry_run_writes_nothing() {
    let project = TestProject::app_router();
    let before = project.entry_count();

    project
        .radtools()
        .args(["init", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("components/ui/Slider.tsx"));

    assert_eq!(project.entry_count(), before);
}

#[test]
fn test_detected_package_manager_in_next_steps() {
    let project = TestProject::app_router();
    project.write_file("pnpm-lock.yaml", "lockfileVersion: '9.0'\n");

    project
        .radtools()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("pnpm add zustand clsx"))
        .stdout(predicate::str::contains("pnpm run dev"));
}

#[test]
fn test_pages_router_project() {
    let project = TestProject::pages_router();

    project.radtools().arg("init").assert().success();

    let app = project.read_file("pages/_app.tsx");
    assert!(app.contains("<DevToolsProvider><Component {...pageProps} /></DevToolsProvider>"));
    let route = project.read_file("pages/api/devtools/read-css.ts");
    assert!(route.contains("const GLOBALS_CSS = 'styles/globals.css';"));
    assert!(!project.file_exists("app"));
}

#[test]
fn test_local_template_dir() {
    let project = TestProject::app_router();
    let templates = TestProject::empty();
    templates.write_file(
        "template.yaml",
        "name: Local\nversion: 0.1.0\nfiles:\n  - source: hello.ts\n    path: hooks/useHello.ts\n    kind: hook\n",
    );
    templates.write_file("hello.ts", "export const useHello = () => 'hello';\n");

    project
        .radtools()
        .arg("init")
        .arg("--template-dir")
        .arg(&templates.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 applied"));

    assert_eq!(
        project.read_file("hooks/useHello.ts"),
        "export const useHello = () => 'hello';\n"
    );
    assert!(!project.file_exists("components"));
}

#[test]
fn test_invalid_local_manifest_aborts() {
    let project = TestProject::app_router();
    let templates = TestProject::empty();
    templates.write_file("template.yaml", "name: [broken\n");

    project
        .radtools()
        .arg("init")
        .arg("--template-dir")
        .arg(&templates.path)
        .assert()
        .code(3);

    assert!(!project.file_exists("components"));
}

#[test]
fn test_unwritable_first_directory_aborts_run() {
    let project = TestProject::app_router();
    project.write_file("blocked", "not a directory\n");
    let templates = TestProject::empty();
    templates.write_file(
        "template.yaml",
        "name: Local\nversion: 0.1.0\nfiles:\n  - source: a.ts\n    path: blocked/useA.ts\n    kind: hook\n  - source: b.ts\n    path: hooks/useB.ts\n    kind: hook\n",
    );
    templates.write_file("a.ts", "export const a = 1;\n");
    templates.write_file("b.ts", "export const b = 2;\n");

    project
        .radtools()
        .arg("init")
        .arg("--template-dir")
        .arg(&templates.path)
        .assert()
        .code(3)
        .stdout(predicate::str::contains("0 applied, 0 skipped, 1 failed"));

    assert!(!project.file_exists("hooks"));
    assert_eq!(project.read_file("blocked"), "not a directory\n");
}
