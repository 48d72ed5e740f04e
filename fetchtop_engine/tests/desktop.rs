//! Window manager and desktop environment inference.

use std::sync::Mutex;

use fetchtop_engine::desktop::{join_desktop_names, window_manager_label, WM_CANDIDATES};
use fetchtop_engine::scanner::match_candidates;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn matching_is_case_insensitive_and_deduplicated() {
    let matched = match_candidates(
        names(&["GNOME-Shell", "gnome-shell", "bash", "cargo"]),
        WM_CANDIDATES,
    );
    assert_eq!(window_manager_label(&matched), "gnome-shell");
}

#[test]
fn substring_matches_count() {
    // A wrapper process still names the window manager it launched.
    let matched = match_candidates(names(&["kwin_x11-session-i3"]), WM_CANDIDATES);
    assert_eq!(window_manager_label(&matched), "i3 / kwin_x11");
}

#[test]
fn label_uses_the_candidate_spelling() {
    let matched = match_candidates(names(&["marco"]), WM_CANDIDATES);
    assert_eq!(window_manager_label(&matched), "Marco");
}

#[test]
fn no_match_reads_unknown() {
    let matched = match_candidates(names(&["bash", "systemd", "cargo"]), WM_CANDIDATES);
    assert!(matched.is_empty());
    assert_eq!(window_manager_label(&matched), "unknown");
}

#[test]
fn desktop_stacks_join_with_plus() {
    assert_eq!(
        join_desktop_names("ubuntu:GNOME"),
        Some("ubuntu + GNOME".to_string())
    );
    assert_eq!(join_desktop_names("KDE"), Some("KDE".to_string()));
    assert_eq!(join_desktop_names(" : :"), None);
}

#[tokio::test]
async fn desktop_environment_falls_back_through_the_variable_chain() {
    use fetchtop_engine::desktop::DESKTOP_ENVIRONMENT;

    let _guard = ENV_LOCK.lock().unwrap();
    let saved: Vec<(String, Option<String>)> = [
        "XDG_CURRENT_DESKTOP",
        "DESKTOP_SESSION",
        "XDG_SESSION_DESKTOP",
    ]
    .iter()
    .map(|var| (var.to_string(), std::env::var(var).ok()))
    .collect();

    std::env::remove_var("XDG_CURRENT_DESKTOP");
    std::env::remove_var("XDG_SESSION_DESKTOP");
    std::env::set_var("DESKTOP_SESSION", "plasma");
    assert_eq!(DESKTOP_ENVIRONMENT.resolve().await, "plasma");

    std::env::set_var("XDG_CURRENT_DESKTOP", "ubuntu:GNOME");
    assert_eq!(DESKTOP_ENVIRONMENT.resolve().await, "ubuntu + GNOME");

    for (var, value) in saved {
        match value {
            Some(value) => std::env::set_var(&var, value),
            None => std::env::remove_var(&var),
        }
    }
}

#[tokio::test]
async fn live_scan_reports_only_vocabulary_entries() {
    use fetchtop_engine::desktop::WINDOW_MANAGER_SCANNER;

    let matched = WINDOW_MANAGER_SCANNER.scan().await;
    for name in matched {
        assert!(WM_CANDIDATES.contains(&name));
    }
}
