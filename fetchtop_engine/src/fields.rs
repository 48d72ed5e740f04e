//! Static probe chains for the plainly-resolved snapshot fields.

use std::path::Path;
use std::time::Duration;

use sysinfo::{CpuRefreshKind, RefreshKind, System};

use crate::probe::{verbatim, Platform, ProbeSpec};
use crate::resolver::FieldResolver;

pub static USER: FieldResolver = FieldResolver::new(
    "user",
    &[ProbeSpec::env("login-env", &["USER", "USERNAME"], verbatim)],
    "user",
);

pub static SHELL: FieldResolver = FieldResolver::new(
    "shell",
    &[ProbeSpec::env("shell-env", &["SHELL", "COMSPEC"], verbatim)],
    "unknown",
);

pub static TERMINAL: FieldResolver = FieldResolver::new(
    "terminal",
    &[ProbeSpec::env("term-env", &["TERM"], verbatim)],
    "unknown",
);

pub static HOST: FieldResolver = FieldResolver::new(
    "host",
    &[
        ProbeSpec::api("hostname", api_hostname),
        ProbeSpec::api("sysinfo-host", System::host_name),
    ],
    "unknown",
);

pub static OS_NAME: FieldResolver = FieldResolver::new(
    "os",
    &[
        ProbeSpec::file("os-release", "/etc/os-release", pretty_name).on(Platform::Linux),
        ProbeSpec::api("long-os-version", System::long_os_version),
        ProbeSpec::api("os-name-version", api_name_and_version),
    ],
    "unknown",
);

pub static KERNEL: FieldResolver = FieldResolver::new(
    "kernel",
    &[
        ProbeSpec::api("kernel-version", System::kernel_version),
        ProbeSpec::command("uname", &["uname", "-r"], verbatim),
    ],
    "unknown",
);

pub static CPU_MODEL: FieldResolver = FieldResolver::new(
    "cpu",
    &[
        ProbeSpec::api("cpu-brand", api_cpu_brand),
        ProbeSpec::api("arch", api_arch),
    ],
    "unknown",
);

pub static RESOLUTION: FieldResolver = FieldResolver::new(
    "resolution",
    &[
        ProbeSpec::command("xrandr", &["xrandr", "--query"], xrandr_mode)
            .on(Platform::Linux)
            .with_budget(Duration::from_millis(600)),
        ProbeSpec::api("drm-modes", api_drm_mode).on(Platform::Linux),
        ProbeSpec::command(
            "system_profiler",
            &["system_profiler", "SPDisplaysDataType"],
            profiler_resolution,
        )
        .on(Platform::MacOs),
    ],
    "unknown",
);

fn api_hostname() -> Option<String> {
    hostname::get().ok().map(|h| h.to_string_lossy().into_owned())
}

fn api_name_and_version() -> Option<String> {
    let name = System::name()?;
    Some(match System::os_version() {
        Some(version) => format!("{name} {version}"),
        None => name,
    })
}

fn api_cpu_brand() -> Option<String> {
    let sys =
        System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()));
    sys.cpus().first().map(|cpu| cpu.brand().trim().to_string())
}

fn api_arch() -> Option<String> {
    let arch = std::env::consts::ARCH;
    (!arch.is_empty()).then(|| arch.to_string())
}

/// `PRETTY_NAME="Ubuntu 24.04 LTS"`
pub fn pretty_name(raw: &str) -> Option<String> {
    raw.lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))
        .map(|value| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Picks the mode of the primary connected output, e.g.
/// `eDP-1 connected primary 2560x1440+0+0 ...` -> "2560x1440".
pub fn xrandr_mode(raw: &str) -> Option<String> {
    fn mode_token(line: &str) -> Option<String> {
        line.split_whitespace().find_map(|token| {
            let geometry = token.split('+').next()?;
            let (w, h) = geometry.split_once('x')?;
            let numeric = !w.is_empty()
                && !h.is_empty()
                && w.chars().all(|c| c.is_ascii_digit())
                && h.chars().all(|c| c.is_ascii_digit());
            numeric.then(|| format!("{w}x{h}"))
        })
    }

    let connected: Vec<&str> = raw
        .lines()
        .filter(|line| line.contains(" connected"))
        .collect();
    connected
        .iter()
        .find(|line| line.contains(" primary "))
        .or_else(|| connected.first())
        .and_then(|line| mode_token(line))
}

fn api_drm_mode() -> Option<String> {
    drm_mode_under(Path::new("/sys/class/drm"))
}

/// Walks the DRM connector entries when xrandr isn't around (no X, no
/// wayland bridge). The first mode line of a connected output wins.
pub fn drm_mode_under(dir: &Path) -> Option<String> {
    let entries = std::fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        let status = std::fs::read_to_string(path.join("status")).unwrap_or_default();
        if status.trim() != "connected" {
            continue;
        }
        let modes = std::fs::read_to_string(path.join("modes")).unwrap_or_default();
        if let Some(mode) = modes.lines().map(str::trim).find(|m| !m.is_empty()) {
            return Some(mode.to_string());
        }
    }
    None
}

/// `Resolution: 2560 x 1600 Retina` -> "2560x1600"
pub fn profiler_resolution(raw: &str) -> Option<String> {
    let value = raw
        .lines()
        .find_map(|line| line.trim().strip_prefix("Resolution:"))?;
    let mut dims = value
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty());
    let width = dims.next()?;
    let height = dims.next()?;
    Some(format!("{width}x{height}"))
}
