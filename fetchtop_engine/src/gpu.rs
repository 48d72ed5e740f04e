//! GPU model resolution: vendor tool first, then the PCI listing, then the
//! macOS hardware profiler.

use crate::probe::{first_line, Platform, ProbeSpec};
use crate::resolver::FieldResolver;

pub static GPU_MODEL: FieldResolver = FieldResolver::new(
    "gpu",
    &[
        ProbeSpec::command(
            "nvidia-smi",
            &["nvidia-smi", "--query-gpu=name", "--format=csv,noheader"],
            first_line,
        ),
        ProbeSpec::command("lspci", &["lspci", "-mm"], display_adapter).on(Platform::Linux),
        ProbeSpec::command(
            "system_profiler",
            &["system_profiler", "SPDisplaysDataType"],
            chipset_model,
        )
        .on(Platform::MacOs),
    ],
    "unknown",
);

/// `lspci -mm` quotes each column:
/// `01:00.0 "VGA compatible controller" "Vendor" "Device" ...`
/// The vendor and device of the first display-class line are joined.
pub fn display_adapter(raw: &str) -> Option<String> {
    for line in raw.lines() {
        let fields: Vec<&str> = line.split('"').skip(1).step_by(2).collect();
        if fields.len() < 3 {
            continue;
        }
        let class = fields[0];
        if !(class.contains("VGA") || class.contains("3D")) {
            continue;
        }
        return Some(format!("{} {}", fields[1].trim(), fields[2].trim()));
    }
    None
}

/// The profiler prints one `Chipset Model:` line per adapter.
pub fn chipset_model(raw: &str) -> Option<String> {
    raw.lines()
        .find_map(|line| line.trim().strip_prefix("Chipset Model:"))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
