//! Device discovery via `adb devices -l`

use logdog_core::prelude::*;

/// Status `adb devices` reports for a usable device
pub const ONLINE_STATUS: &str = "device";

/// Model shown when `adb devices -l` does not report one
const UNKNOWN_MODEL: &str = "Unknown";

/// A device as listed by `adb devices -l`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// adb serial, e.g. `emulator-5554`
    pub serial: String,

    /// Model from the `model:` field
    pub model: String,

    /// Raw status: `device`, `offline`, `unauthorized`, ...
    pub status: String,
}

impl Device {
    pub fn is_online(&self) -> bool {
        self.status == ONLINE_STATUS
    }

    /// Get a display string for the device
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.model, self.serial)
    }
}

/// Parse the output of `adb devices -l`.
///
/// The header line, blank lines and daemon chatter (`* daemon started ...`)
/// are skipped.
pub fn parse_devices_output(output: &str) -> Vec<Device> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with("List of devices") && !line.starts_with('*'))
        .filter_map(parse_device_line)
        .collect()
}

fn parse_device_line(line: &str) -> Option<Device> {
    let mut fields = line.split_whitespace();
    let serial = fields.next()?;
    let status = fields.next()?;
    let model = fields
        .find_map(|field| field.strip_prefix("model:"))
        .unwrap_or(UNKNOWN_MODEL);

    Some(Device {
        serial: serial.to_string(),
        model: model.to_string(),
        status: status.to_string(),
    })
}

/// Pick the device to stream from.
///
/// An explicitly requested serial must be listed and online. Without one,
/// exactly one online device must be present.
pub fn resolve_device<'a>(devices: &'a [Device], requested: Option<&str>) -> Result<&'a Device> {
    if let Some(serial) = requested {
        let device = devices
            .iter()
            .find(|d| d.serial == serial)
            .ok_or_else(|| Error::device_not_found(serial))?;
        if !device.is_online() {
            return Err(Error::device_offline(&device.serial, &device.status));
        }
        return Ok(device);
    }

    let mut online = devices.iter().filter(|d| d.is_online());
    match (online.next(), online.next()) {
        (None, _) => Err(Error::NoDevices),
        (Some(device), None) => Ok(device),
        (Some(_), Some(_)) => Err(Error::AmbiguousDevice {
            count: devices.iter().filter(|d| d.is_online()).count(),
        }),
    }
}

/// Devices that can be streamed from
pub fn online_devices(devices: &[Device]) -> Vec<Device> {
    devices.iter().filter(|d| d.is_online()).cloned().collect()
}
