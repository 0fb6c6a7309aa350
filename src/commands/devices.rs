//! Devices command implementation

use console::Style;

use crate::device::adb;
use crate::error::Result;

/// Run devices command
pub fn run() -> Result<()> {
    let devices = adb::list_devices()?;

    if devices.is_empty() {
        println!("No devices found.");
        return Ok(());
    }

    println!("Devices ({}):", devices.len());
    for device in &devices {
        let details: Vec<String> = [("model", &device.model), ("product", &device.product)]
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}: {v}")))
            .collect();
        println!(
            "  {} {}",
            Style::new().bold().yellow().apply_to(&device.serial),
            Style::new().dim().apply_to(details.join(", "))
        );
    }
    if devices.len() > 1 {
        println!();
        println!("Only one device may be connected while installing.");
    }
    Ok(())
}
