//! Device handle backed by the `adb` executable
//!
//! The executable can be overridden with `APKUP_ADB`.

use std::path::Path;
use std::process::{Command, Output};

use super::{CapabilitySet, Device, InstalledApps};
use crate::error::{self, ApkupError, Result};

/// A device as reported by `adb devices -l`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub serial: String,
    pub model: Option<String>,
    pub product: Option<String>,
}

/// A single connected device
#[derive(Debug, Clone)]
pub struct AdbDevice {
    program: String,
    info: DeviceInfo,
}

fn adb_program() -> String {
    std::env::var("APKUP_ADB").unwrap_or_else(|_| "adb".to_string())
}

fn run_adb(program: &str, args: &[&str]) -> Result<Output> {
    let command_line = format!("{} {}", program, args.join(" "));
    tracing::debug!(command = %command_line, "running adb");
    Command::new(program)
        .args(args)
        .output()
        .map_err(|e| error::device::command_failed(command_line, e.to_string()))
}

fn checked_output(program: &str, args: &[&str]) -> Result<Vec<u8>> {
    let output = run_adb(program, args)?;
    if !output.status.success() {
        return Err(error::device::command_failed(
            format!("{} {}", program, args.join(" ")),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(output.stdout)
}

/// List devices that are connected and ready
pub fn list_devices() -> Result<Vec<DeviceInfo>> {
    let stdout = checked_output(&adb_program(), &["devices", "-l"])?;
    Ok(parse_devices(&String::from_utf8_lossy(&stdout)))
}

/// Parse `adb devices -l` output, keeping devices in the `device` state
pub fn parse_devices(output: &str) -> Vec<DeviceInfo> {
    output
        .lines()
        .filter(|line| !line.starts_with("List of devices") && !line.starts_with('*'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let serial = fields.next()?;
            if fields.next()? != "device" {
                return None;
            }
            let mut info = DeviceInfo {
                serial: serial.to_string(),
                model: None,
                product: None,
            };
            for field in fields {
                if let Some(model) = field.strip_prefix("model:") {
                    info.model = Some(model.to_string());
                } else if let Some(product) = field.strip_prefix("product:") {
                    info.product = Some(product.to_string());
                }
            }
            Some(info)
        })
        .collect()
}

/// Parse `pm list packages --show-versioncode` output
pub fn parse_installed(output: &str) -> InstalledApps {
    output
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("package:")?;
            let mut fields = rest.split_whitespace();
            let id = fields.next()?;
            let version_code = fields
                .find_map(|f| f.strip_prefix("versionCode:"))
                .and_then(|vc| vc.parse::<u64>().ok())
                .unwrap_or(0);
            Some((id.to_string(), version_code))
        })
        .collect()
}

impl AdbDevice {
    /// Connect to the only attached device
    pub fn connect() -> Result<Self> {
        let mut devices = list_devices()?;
        match devices.len() {
            0 => Err(ApkupError::NoDevices),
            1 => {
                let info = devices.remove(0);
                tracing::info!(serial = %info.serial, "using device");
                Ok(Self {
                    program: adb_program(),
                    info,
                })
            }
            count => Err(ApkupError::TooManyDevices { count }),
        }
    }

    fn getprop(&self, name: &str) -> Result<String> {
        let out = self.run_shell_command(&format!("getprop {name}"))?;
        Ok(String::from_utf8_lossy(&out).trim().to_string())
    }
}

impl Device for AdbDevice {
    fn installed_applications(&self) -> Result<InstalledApps> {
        let out = self.run_shell_command("pm list packages --show-versioncode")?;
        let installed = parse_installed(&String::from_utf8_lossy(&out));
        if installed.is_empty() {
            tracing::warn!(serial = %self.info.serial, "device reported no installed applications");
        }
        tracing::debug!(count = installed.len(), "read installed applications");
        Ok(installed)
    }

    fn capabilities(&self) -> Result<CapabilitySet> {
        let mut abis: Vec<String> = self
            .getprop("ro.product.cpu.abilist")?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        if abis.is_empty() {
            let abi = self.getprop("ro.product.cpu.abi")?;
            if !abi.is_empty() {
                abis.push(abi);
            }
        }

        let sdk = self.getprop("ro.build.version.sdk")?;
        let api_level = sdk.parse::<u32>().map_err(|_| {
            error::device::command_failed(
                "getprop ro.build.version.sdk",
                format!("unexpected API level '{sdk}'"),
            )
        })?;

        Ok(CapabilitySet { abis, api_level })
    }

    fn install(&self, path: &Path) -> Result<()> {
        let path_str = path.display().to_string();
        let output = run_adb(&self.program, &["-s", &self.info.serial, "install", "-r", &path_str])?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        if output.status.success() && stdout.lines().any(|l| l.trim() == "Success") {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = stdout
            .lines()
            .chain(stderr.lines())
            .find(|l| l.contains("Failure"))
            .or_else(|| stderr.lines().rev().find(|l| !l.trim().is_empty()))
            .unwrap_or("unknown error")
            .trim()
            .to_string();
        Err(error::device::install_failed(path_str, reason))
    }

    fn run_shell_command(&self, command: &str) -> Result<Vec<u8>> {
        checked_output(&self.program, &["-s", &self.info.serial, "shell", command])
    }
}
