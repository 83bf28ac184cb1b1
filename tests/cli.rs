//! End-to-end tests for the webapp_bundler binary.
//!
//! External tools are replaced by `/bin/sh` scripts in a private directory
//! that becomes the whole `PATH` of the process under test.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Packager stand-in: records its argv and `ELECTRON_MIRROR`, then creates
/// `<out>/<name>-win32-<arch>` and exits with `$FAKE_EXIT` (default 0).
const FAKE_NATIVEFIER: &str = r#"
echo "$@" >> "$FAKE_LOG_DIR/nativefier.calls"
echo "$ELECTRON_MIRROR" >> "$FAKE_LOG_DIR/mirror"
while [ $# -gt 0 ]; do
  case "$1" in
    --name) name="$2"; shift 2 ;;
    --arch) arch="$2"; shift 2 ;;
    --) out="$3"; break ;;
    *) shift ;;
  esac
done
if [ -z "$FAKE_NO_OUTPUT" ]; then
  /bin/mkdir -p "$out/$name-win32-$arch"
fi
exit "${FAKE_EXIT:-0}"
"#;

/// `zip -r <out> <src>` stand-in that writes an empty file at `<out>`.
const FAKE_ZIP: &str = r#"
[ "$1" = "-v" ] && exit 0
echo "$@" >> "$FAKE_LOG_DIR/zip.calls"
: > "$2"
"#;

/// `tar -c -f <out> ...` stand-in that writes an empty file at `<out>`.
const FAKE_TAR: &str = r#"
[ "$1" = "--version" ] && exit 0
echo "$@" >> "$FAKE_LOG_DIR/tar.calls"
: > "$3"
"#;

/// Isolated working directory plus a directory of fake tools.
struct TestEnv {
    work: TempDir,
    bin: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let env = Self {
            work: TempDir::new().unwrap(),
            bin: TempDir::new().unwrap(),
        };
        env.tool("nativefier", FAKE_NATIVEFIER);
        env
    }

    fn tool(&self, name: &str, body: &str) {
        let path = self.bin.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("webapp_bundler");
        cmd.current_dir(self.work.path())
            .env("PATH", self.bin.path())
            .env("FAKE_LOG_DIR", self.work.path())
            .env("RUST_LOG", "info")
            .env_remove("FORCE_COLOR")
            .env_remove("CLICOLOR_FORCE")
            .env_remove("ELECTRON_MIRROR")
            .env_remove("WEBAPP_BUNDLER_OUTPUT_DIR")
            .env_remove("WEBAPP_BUNDLER_PACKAGER")
            .env_remove("WEBAPP_BUNDLER_SKIP_NODE_SWITCH");
        cmd
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.work.path().join(relative)
    }

    fn calls(&self, tool: &str) -> Vec<String> {
        std::fs::read_to_string(self.path(&format!("{tool}.calls")))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

fn files_with_extension(dir: &Path, extension: &str) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(extension))
        .count()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
    cargo_bin_cmd!("webapp_bundler")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--format"));
}

// =============================================================================
// Full runs
// =============================================================================

#[test]
fn sit_64_zip_produces_one_archive_per_arch() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .args(["--env", "sit", "--arch", "64", "--format", "zip"])
        .assert()
        .success();

    assert!(env.path("apps/x64/baidu-sit-win32-x64.zip").is_file());
    assert!(env.path("apps/arm64/baidu-sit-win32-arm64.zip").is_file());
    assert_eq!(files_with_extension(&env.path("apps/x64"), ".zip"), 1);
    assert_eq!(files_with_extension(&env.path("apps/arm64"), ".zip"), 1);
    assert!(!env.path("apps/ia32").exists());

    let calls = env.calls("nativefier");
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("--arch x64"));
    assert!(calls[1].contains("--arch arm64"));
    assert!(calls[0].contains("https://www.baidu.com/sit"));
}

#[test]
fn first_packaging_failure_aborts_with_its_exit_code() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .env("FAKE_EXIT", "2")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exit code 2"));

    assert_eq!(env.calls("nativefier").len(), 1);
    assert!(env.calls("zip").is_empty());
}

#[test]
fn missing_packager_exits_non_zero() {
    let env = TestEnv::new();
    std::fs::remove_file(env.bin.path().join("nativefier")).unwrap();

    env.cmd()
        .args(["--env", "prod", "--arch", "32"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nativefier"));
}

#[test]
fn packager_sees_electron_mirror() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .args(["--env", "uat", "--arch", "32"])
        .args(["--electron-mirror", "https://mirror.example/electron/"])
        .assert()
        .success();

    let mirror = std::fs::read_to_string(env.path("mirror")).unwrap();
    assert_eq!(mirror.trim(), "https://mirror.example/electron/");
}

#[test]
fn default_mirror_is_exported() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd().args(["--env", "uat", "--arch", "32"]).assert().success();

    let mirror = std::fs::read_to_string(env.path("mirror")).unwrap();
    assert_eq!(mirror.trim(), "https://npmmirror.com/mirrors/electron/");
}

#[cfg(target_os = "linux")]
#[test]
fn invalid_values_fall_back_with_warnings() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .args(["--env", "sit", "--arch", "abc", "--format", "rar"])
        .args(["--platform", "beos"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid architecture"))
        .stderr(predicate::str::contains("Unsupported archive format \"rar\""))
        .stderr(predicate::str::contains("Unsupported platform \"beos\""));

    // both widths: ia32, x64, arm64
    let calls = env.calls("nativefier");
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| c.contains("--platform linux")));
    assert!(env.path("apps/ia32/baidu-sit-win32-ia32.zip").is_file());
}

#[test]
fn platform_flag_is_passed_but_output_stays_win32() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .args(["--env", "prod", "--arch", "32", "--platform", "darwin"])
        .assert()
        .success();

    assert!(env.calls("nativefier")[0].contains("--platform darwin"));
    assert!(env.path("apps/ia32/baidu-prod-win32-ia32.zip").is_file());
}

#[test]
fn tar_gz_uses_tar_with_gzip_flag() {
    let env = TestEnv::new();
    env.tool("tar", FAKE_TAR);
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .args(["--env", "sit", "--arch", "32", "--format", "tar.gz"])
        .assert()
        .success();

    let calls = env.calls("tar");
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains("--exclude *.zip"));
    assert!(calls[0].contains(" -z "));
    assert!(env.path("apps/ia32/baidu-sit-win32-ia32.tar.gz").is_file());
    assert!(env.calls("zip").is_empty());
}

#[test]
fn no_compression_tool_still_exits_zero() {
    let env = TestEnv::new();

    env.cmd()
        .args(["--env", "sit", "--arch", "32"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No compression tool available"));

    assert!(env.path("apps/ia32/baidu-sit-win32-ia32").is_dir());
    assert!(!env.path("apps/ia32/baidu-sit-win32-ia32.zip").exists());
}

#[test]
fn missing_build_directory_skips_archive() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .env("FAKE_NO_OUTPUT", "1")
        .args(["--env", "prod", "--arch", "64"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping archive"));

    assert_eq!(env.calls("nativefier").len(), 2);
    assert!(env.calls("zip").is_empty());
}

#[test]
fn custom_output_dir() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .args(["--env", "sit", "--arch", "32", "--output-dir", "dist/out"])
        .assert()
        .success();

    assert!(env.path("dist/out/ia32/baidu-sit-win32-ia32.zip").is_file());
}

// =============================================================================
// Console output
// =============================================================================

#[test]
fn quiet_hides_plan_but_keeps_warnings() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .args(["--env", "sit", "--arch", "32", "--format", "rar", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build plan").not())
        .stderr(predicate::str::contains("Unsupported archive format"));
}

#[test]
fn packager_detail_only_in_verbose_mode() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .args(["--env", "sit", "--arch", "32"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build plan"))
        .stdout(predicate::str::contains("Packager: nativefier").not());

    env.cmd()
        .args(["--env", "sit", "--arch", "32", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Packager: nativefier (Electron 19.1.4)"));
}

#[test]
fn piped_output_has_no_color_codes() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .args(["--env", "sit", "--arch", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not())
        .stderr(predicate::str::contains("Invalid architecture"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn negative_arch_value_builds_both_widths() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);

    env.cmd()
        .args(["--env", "sit", "--arch", "-64"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid architecture"));

    assert_eq!(env.calls("nativefier").len(), 3);
}

// =============================================================================
// Node.js runtime switch
// =============================================================================

#[test]
fn failing_nvm_stops_before_packaging() {
    let env = TestEnv::new();
    env.tool("nvm", "exit 3");

    env.cmd()
        .args(["--env", "sit", "--arch", "32"])
        .assert()
        .code(3);

    assert!(env.calls("nativefier").is_empty());
}

#[test]
fn nvm_switch_is_restored_after_failed_build() {
    let env = TestEnv::new();
    env.tool("node", "echo v18.17.0");
    env.tool("nvm", r#"echo "$@" >> "$FAKE_LOG_DIR/nvm.calls""#);

    env.cmd()
        .env("FAKE_EXIT", "2")
        .args(["--env", "sit", "--arch", "32"])
        .assert()
        .code(2);

    assert_eq!(env.calls("nvm"), ["use 16", "use 18.17.0"]);
}

#[test]
fn skip_node_switch_never_calls_nvm() {
    let env = TestEnv::new();
    env.tool("zip", FAKE_ZIP);
    env.tool("nvm", r#"echo "$@" >> "$FAKE_LOG_DIR/nvm.calls"; exit 9"#);

    env.cmd()
        .args(["--env", "sit", "--arch", "32", "--skip-node-switch"])
        .assert()
        .success();

    assert!(env.calls("nvm").is_empty());
}
