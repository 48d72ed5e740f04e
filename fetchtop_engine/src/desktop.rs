//! Desktop environment and window manager inference.

use std::collections::BTreeSet;

use crate::probe::ProbeSpec;
use crate::resolver::FieldResolver;
use crate::scanner::ProcessScanner;

/// Process names that identify a window manager. Matched candidates are
/// reported under exactly these spellings.
pub const WM_CANDIDATES: &[&str] = &[
    "i3",
    "sway",
    "bspwm",
    "qtile",
    "awesome",
    "openbox",
    "xmonad",
    "herbstluftwm",
    "gnome-shell",
    "kwin_x11",
    "kwin_wayland",
    "mutter",
    "xfwm4",
    "Marco",
    "weston",
];

pub static DESKTOP_ENVIRONMENT: FieldResolver = FieldResolver::new(
    "de",
    &[ProbeSpec::env(
        "desktop-env",
        &[
            "XDG_CURRENT_DESKTOP",
            "DESKTOP_SESSION",
            "XDG_SESSION_DESKTOP",
        ],
        join_desktop_names,
    )],
    "unknown",
);

pub const WINDOW_MANAGER_SCANNER: ProcessScanner = ProcessScanner::new(WM_CANDIDATES);

/// Scanner matches joined " / " in lexical order, or the sentinel.
pub fn window_manager_label(matched: &BTreeSet<&'static str>) -> String {
    if matched.is_empty() {
        "unknown".to_string()
    } else {
        matched.iter().copied().collect::<Vec<_>>().join(" / ")
    }
}

/// Some desktops advertise colon-separated stacks ("ubuntu:GNOME").
pub fn join_desktop_names(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw
        .split(':')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" + "))
    }
}
