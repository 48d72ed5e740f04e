//! Process-name scanning against a fixed candidate vocabulary.

use std::collections::BTreeSet;

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tokio::task;

/// Matches live process names against a candidate list once per call.
/// Carries no state between scans.
#[derive(Debug, Clone, Copy)]
pub struct ProcessScanner {
    candidates: &'static [&'static str],
}

impl ProcessScanner {
    pub const fn new(candidates: &'static [&'static str]) -> Self {
        Self { candidates }
    }

    /// Enumerates processes on a blocking thread and returns the matched
    /// candidates. Enumeration failure yields an empty set, never an error;
    /// processes that vanish mid-scan simply drop out of the listing.
    pub async fn scan(&self) -> BTreeSet<&'static str> {
        let candidates = self.candidates;
        task::spawn_blocking(move || {
            let mut sys = System::new();
            sys.refresh_processes_specifics(
                ProcessesToUpdate::All,
                true,
                ProcessRefreshKind::nothing(),
            );
            let names = sys
                .processes()
                .values()
                .map(|process| process.name().to_string_lossy().into_owned());
            match_candidates(names, candidates)
        })
        .await
        .unwrap_or_default()
    }
}

/// Case-insensitive substring matching. A name hitting two candidates
/// contributes both; the result set is deduplicated and lexically ordered.
pub fn match_candidates<I>(names: I, candidates: &'static [&'static str]) -> BTreeSet<&'static str>
where
    I: IntoIterator<Item = String>,
{
    let mut matched = BTreeSet::new();
    for name in names {
        let name = name.to_lowercase();
        for candidate in candidates {
            if name.contains(&candidate.to_lowercase()) {
                matched.insert(*candidate);
            }
        }
    }
    matched
}
