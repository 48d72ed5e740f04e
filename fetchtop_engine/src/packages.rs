//! Installed-package counting across known package managers.

use std::time::Duration;

use crate::probe::{run_command, Platform};

/// How long a listing command may take. Counting thousands of packages is
/// slower than the usual probe.
pub const COUNT_BUDGET: Duration = Duration::from_secs(2);

/// One package manager: how to list installations and how to count the
/// listing.
#[derive(Debug, Clone, Copy)]
pub struct PackageManager {
    pub name: &'static str,
    pub argv: &'static [&'static str],
    pub count: fn(&str) -> Option<u64>,
    pub platform: Platform,
}

/// Priority order: the manager most likely to own the base system first.
pub static MANAGERS: &[PackageManager] = &[
    PackageManager {
        name: "dpkg",
        argv: &["dpkg", "-l"],
        count: count_dpkg,
        platform: Platform::Linux,
    },
    PackageManager {
        name: "pacman",
        argv: &["pacman", "-Q"],
        count: count_lines,
        platform: Platform::Linux,
    },
    PackageManager {
        name: "rpm",
        argv: &["rpm", "-qa"],
        count: count_lines,
        platform: Platform::Linux,
    },
    PackageManager {
        name: "apk",
        argv: &["apk", "info"],
        count: count_lines,
        platform: Platform::Linux,
    },
    PackageManager {
        name: "brew",
        argv: &["brew", "list"],
        count: count_lines,
        platform: Platform::Any,
    },
    PackageManager {
        name: "winget",
        argv: &["winget", "list"],
        count: count_winget,
        platform: Platform::Windows,
    },
];

/// First manager reporting a positive count wins: "<n> via <manager>".
/// No manager counting anything reads "unknown".
pub async fn summary(managers: &[PackageManager]) -> String {
    for manager in managers {
        if !manager.platform.applies_to_host() {
            continue;
        }
        let output = match run_command(manager.argv, COUNT_BUDGET).await {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(manager = manager.name, error = %err, "package listing failed");
                continue;
            }
        };
        if let Some(n) = (manager.count)(&output) {
            if n > 0 {
                return format!("{n} via {}", manager.name);
            }
        }
    }
    "unknown".to_string()
}

/// Non-empty output lines.
pub fn count_lines(raw: &str) -> Option<u64> {
    Some(raw.lines().filter(|line| !line.trim().is_empty()).count() as u64)
}

/// `dpkg -l` prefixes installed packages with the "ii" status pair.
pub fn count_dpkg(raw: &str) -> Option<u64> {
    Some(raw.lines().filter(|line| line.starts_with("ii")).count() as u64)
}

/// winget prints a two-line header before the table body.
pub fn count_winget(raw: &str) -> Option<u64> {
    count_lines(raw).map(|n| n.saturating_sub(2))
}
