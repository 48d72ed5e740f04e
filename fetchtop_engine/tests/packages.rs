//! Package count summary: manager priority and count parsing.

use fetchtop_engine::packages::{count_dpkg, count_lines, count_winget, summary, PackageManager};
use fetchtop_engine::probe::Platform;

#[cfg(unix)]
#[tokio::test]
async fn first_manager_with_packages_wins() {
    static TABLE: &[PackageManager] = &[
        PackageManager {
            name: "dpkg",
            argv: &["echo", "42"],
            count: parse_count,
            platform: Platform::Any,
        },
        PackageManager {
            name: "pacman",
            argv: &["echo", "10"],
            count: parse_count,
            platform: Platform::Any,
        },
    ];
    assert_eq!(summary(TABLE).await, "42 via dpkg");
}

#[cfg(unix)]
#[tokio::test]
async fn zero_count_falls_through_to_the_next_manager() {
    static TABLE: &[PackageManager] = &[
        PackageManager {
            name: "dpkg",
            argv: &["echo", "0"],
            count: parse_count,
            platform: Platform::Any,
        },
        PackageManager {
            name: "pacman",
            argv: &["echo", "7"],
            count: parse_count,
            platform: Platform::Any,
        },
    ];
    assert_eq!(summary(TABLE).await, "7 via pacman");
}

#[cfg(unix)]
#[tokio::test]
async fn unknown_when_no_manager_answers() {
    static TABLE: &[PackageManager] = &[
        PackageManager {
            name: "broken",
            argv: &["false"],
            count: parse_count,
            platform: Platform::Any,
        },
        PackageManager {
            name: "missing",
            argv: &["fetchtop-no-such-binary"],
            count: parse_count,
            platform: Platform::Any,
        },
        PackageManager {
            name: "elsewhere",
            argv: &["echo", "5"],
            count: parse_count,
            platform: Platform::Windows,
        },
    ];
    assert_eq!(summary(TABLE).await, "unknown");
}

fn parse_count(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

#[test]
fn dpkg_counts_only_installed_rows() {
    let listing = "Desired=Unknown/Install\n\
                   ii  bash  5.2  amd64  GNU Bourne Again SHell\n\
                   ii  curl  8.5  amd64  command line URL tool\n\
                   rc  old-pkg  1.0  amd64  removed, config remains\n";
    assert_eq!(count_dpkg(listing), Some(2));
}

#[test]
fn line_count_skips_blanks() {
    assert_eq!(count_lines("bash 5.2\n\ncurl 8.5\n"), Some(2));
    assert_eq!(count_lines(""), Some(0));
}

#[test]
fn winget_discounts_its_header() {
    let listing = "Name  Id  Version\n----------------\nGit  Git.Git  2.44\nVim  vim.vim  9.1\n";
    assert_eq!(count_winget(listing), Some(2));
    assert_eq!(count_winget(""), Some(0));
}
