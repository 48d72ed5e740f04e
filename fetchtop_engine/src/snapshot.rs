//! The assembled host description and its text rendering.
//! Field set, row labels, and row order are fixed; consumers rely on all
//! three. Keep this module's shape stable.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::battery::BatteryState;

pub const MIB: u64 = 1024 * 1024;
pub const GIB: u64 = 1024 * 1024 * 1024;

/// One complete, immutable description of the host. Every field holds a
/// defined value; missing data appears as the field's sentinel, never as an
/// absent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub user: String,
    pub host: String,
    pub os_name: String,
    pub kernel_release: String,
    pub uptime_seconds: u64,
    pub shell_path: String,
    pub window_manager: String,
    pub desktop_environment: String,
    pub cpu_model: String,
    pub gpu_model: String,
    pub mem_used_bytes: u64,
    pub mem_total_bytes: u64,
    pub disk_used_gb: u64,
    pub disk_total_gb: u64,
    pub battery: BatteryState,
    pub packages: String,
    pub resolution: String,
    pub terminal: String,
    pub boot_time: i64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            host: "unknown".to_string(),
            os_name: "unknown".to_string(),
            kernel_release: "unknown".to_string(),
            uptime_seconds: 0,
            shell_path: "unknown".to_string(),
            window_manager: "unknown".to_string(),
            desktop_environment: "unknown".to_string(),
            cpu_model: "unknown".to_string(),
            gpu_model: "unknown".to_string(),
            mem_used_bytes: 0,
            mem_total_bytes: 0,
            disk_used_gb: 0,
            disk_total_gb: 0,
            battery: BatteryState::NotPresent,
            packages: "unknown".to_string(),
            resolution: "unknown".to_string(),
            terminal: "unknown".to_string(),
            boot_time: 0,
        }
    }
}

impl Snapshot {
    /// Title line: `user@host`.
    pub fn title(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Labeled rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("os", self.os_name.clone()),
            ("kernel", self.kernel_release.clone()),
            ("uptime", format_uptime(self.uptime_seconds)),
            ("shell", self.shell_path.clone()),
            ("wm", self.window_manager.clone()),
            ("de", self.desktop_environment.clone()),
            ("cpu", self.cpu_model.clone()),
            ("gpu", self.gpu_model.clone()),
            (
                "memory",
                format_memory(self.mem_used_bytes, self.mem_total_bytes),
            ),
            ("disk", format_disk(self.disk_used_gb, self.disk_total_gb)),
            ("battery", self.battery.to_string()),
            ("packages", self.packages.clone()),
            ("resolution", self.resolution.clone()),
            ("terminal", self.terminal.clone()),
            ("boot", format_boot_time(self.boot_time)),
        ]
    }

    /// Plain-text form: title line, then one row per line with the label
    /// column padded to a fixed width.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title());
        out.push('\n');
        for (label, value) in self.rows() {
            out.push_str(&format!("{:<11}{}\n", format!("{label}:"), value));
        }
        out
    }
}

/// Days/hours/minutes with floor division. Minutes always show when nothing
/// else does, so zero uptime reads "0m" rather than "".
pub fn format_uptime(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 || parts.is_empty() {
        parts.push(format!("{minutes}m"));
    }
    parts.join(" ")
}

pub fn format_memory(used_bytes: u64, total_bytes: u64) -> String {
    format!("{}MiB / {}MiB", used_bytes / MIB, total_bytes / MIB)
}

pub fn format_disk(used_gb: u64, total_gb: u64) -> String {
    format!("{used_gb}G / {total_gb}G")
}

/// Local wall-clock boot moment, minute precision.
pub fn format_boot_time(epoch_seconds: i64) -> String {
    Local
        .timestamp_opt(epoch_seconds, 0)
        .single()
        .map(|moment| moment.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
