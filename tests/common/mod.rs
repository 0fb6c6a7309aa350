//! Common test utilities for apkup integration tests
//!
//! Every [`TestEnv`] owns its own config and cache directories and a
//! scripted `adb` replacement, so tests never touch the user's files or a
//! real device.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Shell script standing in for `adb`
///
/// Devices and installed packages are read from files in `$FAKE_ADB_STATE`;
/// every installed path is appended to `$FAKE_ADB_STATE/installs`.
#[cfg(unix)]
const FAKE_ADB: &str = r#"#!/bin/sh
STATE="$FAKE_ADB_STATE"
if [ "$1" = "-s" ]; then
    shift 2
fi
case "$1" in
    devices)
        echo "List of devices attached"
        [ -f "$STATE/devices" ] && cat "$STATE/devices"
        echo ""
        ;;
    shell)
        shift
        case "$*" in
            "getprop ro.product.cpu.abilist") echo "arm64-v8a,armeabi-v7a" ;;
            "getprop ro.build.version.sdk") echo "30" ;;
            "pm list packages --show-versioncode")
                [ -f "$STATE/packages" ] && cat "$STATE/packages"
                ;;
            *) echo "unknown shell command: $*" >&2; exit 1 ;;
        esac
        ;;
    install)
        shift
        [ "$1" = "-r" ] && shift
        echo "$1" >> "$STATE/installs"
        echo "Performing Streamed Install"
        case "$1" in
            *broken*) echo "Failure [INSTALL_PARSE_FAILED_NOT_APK]" ;;
            *) echo "Success" ;;
        esac
        ;;
    *)
        echo "unsupported adb command: $*" >&2
        exit 1
        ;;
esac
"#;

/// An isolated environment for running the apkup binary
pub struct TestEnv {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub work_dir: PathBuf,
    state_dir: PathBuf,
    adb: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create an environment with no device attached
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        let env = Self {
            config_dir: root.join("config"),
            cache_dir: root.join("cache"),
            work_dir: root.join("work"),
            state_dir: root.join("adb"),
            adb: root.join("adb").join("adb"),
            temp,
        };
        for dir in [&env.config_dir, &env.cache_dir, &env.work_dir, &env.state_dir] {
            std::fs::create_dir_all(dir).expect("Failed to create directory");
        }
        env.install_fake_adb();
        env
    }

    #[cfg(unix)]
    fn install_fake_adb(&self) {
        use std::os::unix::fs::PermissionsExt;

        std::fs::write(&self.adb, FAKE_ADB).expect("Failed to write fake adb");
        std::fs::set_permissions(&self.adb, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake adb executable");
    }

    #[cfg(not(unix))]
    fn install_fake_adb(&self) {}

    /// Attach one device per serial
    pub fn with_devices(self, serials: &[&str]) -> Self {
        let lines: String = serials
            .iter()
            .map(|s| format!("{s}\tdevice product:sdk_phone model:Pixel_7 transport_id:1\n"))
            .collect();
        std::fs::write(self.state_dir.join("devices"), lines).expect("Failed to write devices");
        self
    }

    /// Attach a single device
    pub fn with_device(self) -> Self {
        self.with_devices(&["emulator-5554"])
    }

    /// Set the applications installed on the device
    pub fn with_installed(self, apps: &[(&str, u64)]) -> Self {
        let lines: String = apps
            .iter()
            .map(|(id, vc)| format!("package:{id} versionCode:{vc}\n"))
            .collect();
        std::fs::write(self.state_dir.join("packages"), lines).expect("Failed to write packages");
        self
    }

    /// Create a package file and return its path
    pub fn apk(&self, name: &str) -> PathBuf {
        let dir = self.temp.path().join("apks");
        std::fs::create_dir_all(&dir).expect("Failed to create apk directory");
        let path = dir.join(name);
        std::fs::write(&path, format!("apk {name}")).expect("Failed to write apk");
        path
    }

    /// Catalog entry with one package per version code, backed by local files
    pub fn app_json(&self, id: &str, version_codes: &[u64]) -> serde_json::Value {
        let packages: Vec<_> = version_codes
            .iter()
            .map(|vc| {
                let apk = self.apk(&format!("{id}_{vc}.apk"));
                serde_json::json!({
                    "version_code": vc,
                    "locator": apk.display().to_string(),
                })
            })
            .collect();
        serde_json::json!({ "id": id, "packages": packages })
    }

    /// Write the cached catalog document of a repository
    pub fn write_index(&self, repo_id: &str, apps: Vec<serde_json::Value>) {
        let path = self.cache_dir.join("repos").join(repo_id).join("index.json");
        write(&path, &serde_json::json!({ "apps": apps }).to_string());
    }

    /// Write config.yaml
    pub fn write_config(&self, yaml: &str) {
        write(&self.config_dir.join("config.yaml"), yaml);
    }

    /// Read config.yaml
    pub fn read_config(&self) -> String {
        std::fs::read_to_string(self.config_dir.join("config.yaml"))
            .expect("Failed to read config")
    }

    /// Paths the fake adb was asked to install, in order
    pub fn installs(&self) -> Vec<String> {
        std::fs::read_to_string(self.state_dir.join("installs"))
            .map(|s| s.lines().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// apkup command running in this environment
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("apkup").expect("Failed to find apkup binary");
        cmd.current_dir(&self.work_dir)
            .env("APKUP_CONFIG_DIR", &self.config_dir)
            .env("APKUP_CACHE_DIR", &self.cache_dir)
            .env("APKUP_ADB", &self.adb)
            .env("FAKE_ADB_STATE", &self.state_dir)
            .env_remove("APKUP_LOG");
        cmd
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}
