//! Probe chain semantics: ordering, absence, sentinels, budgets.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use fetchtop_engine::probe::{verbatim, Platform, ProbeSpec};
use fetchtop_engine::resolver::FieldResolver;

// Env-mutating tests share the process environment; serialize them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn reject(_: &str) -> Option<String> {
    None
}

#[cfg(unix)]
#[tokio::test]
async fn first_successful_probe_wins() {
    static RESOLVER: FieldResolver = FieldResolver::new(
        "field",
        &[
            ProbeSpec::command("missing", &["fetchtop-no-such-binary"], verbatim),
            ProbeSpec::command("first", &["echo", "alpha"], verbatim),
            ProbeSpec::command("second", &["echo", "beta"], verbatim),
        ],
        "fallback",
    );
    assert_eq!(RESOLVER.resolve().await, "alpha");
}

#[cfg(unix)]
#[tokio::test]
async fn sentinel_stands_in_when_every_probe_fails() {
    static RESOLVER: FieldResolver = FieldResolver::new(
        "field",
        &[
            ProbeSpec::command("nonzero-exit", &["false"], verbatim),
            ProbeSpec::command("missing", &["fetchtop-no-such-binary"], verbatim),
        ],
        "fallback",
    );
    assert_eq!(RESOLVER.resolve().await, "fallback");
}

#[cfg(unix)]
#[tokio::test]
async fn empty_output_counts_as_absence() {
    // `true` succeeds but prints nothing, so the chain moves on.
    static RESOLVER: FieldResolver = FieldResolver::new(
        "field",
        &[
            ProbeSpec::command("silent", &["true"], verbatim),
            ProbeSpec::command("spoken", &["echo", "from-fallback"], verbatim),
        ],
        "fallback",
    );
    assert_eq!(RESOLVER.resolve().await, "from-fallback");
}

#[cfg(unix)]
#[tokio::test]
async fn parser_rejection_falls_through_to_next_probe() {
    static RESOLVER: FieldResolver = FieldResolver::new(
        "field",
        &[
            ProbeSpec::command("rejected", &["echo", "garbage"], reject),
            ProbeSpec::command("accepted", &["echo", "parsed"], verbatim),
        ],
        "fallback",
    );
    assert_eq!(RESOLVER.resolve().await, "parsed");
}

#[tokio::test]
async fn env_chain_takes_first_nonempty_variable() {
    static RESOLVER: FieldResolver = FieldResolver::new(
        "field",
        &[ProbeSpec::env(
            "test-env",
            &["FETCHTOP_TEST_A", "FETCHTOP_TEST_B"],
            verbatim,
        )],
        "fallback",
    );
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::remove_var("FETCHTOP_TEST_A");
    std::env::set_var("FETCHTOP_TEST_B", "beta");
    assert_eq!(RESOLVER.resolve().await, "beta");

    std::env::set_var("FETCHTOP_TEST_A", "alpha");
    assert_eq!(RESOLVER.resolve().await, "alpha");

    std::env::remove_var("FETCHTOP_TEST_A");
    std::env::remove_var("FETCHTOP_TEST_B");
    assert_eq!(RESOLVER.resolve().await, "fallback");
}

#[tokio::test]
async fn file_probe_reads_and_parses() {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "NAME=\"Test OS\"").expect("write");
    writeln!(file, "PRETTY_NAME=\"Test OS 1.0\"").expect("write");
    let path: &'static str =
        Box::leak(file.path().to_string_lossy().into_owned().into_boxed_str());
    let probe = ProbeSpec::file("os-release", path, fetchtop_engine::fields::pretty_name);
    assert_eq!(probe.invoke().await, Some("Test OS 1.0".to_string()));
}

#[tokio::test]
async fn missing_file_is_absence() {
    let probe = ProbeSpec::file("nofile", "/fetchtop/does/not/exist", verbatim);
    assert_eq!(probe.invoke().await, None);
}

#[cfg(unix)]
#[tokio::test]
async fn budget_cuts_off_a_slow_probe() {
    let probe = ProbeSpec::command("slow", &["sleep", "2"], verbatim)
        .with_budget(Duration::from_millis(100));
    let started = Instant::now();
    assert_eq!(probe.invoke().await, None);
    // Well under the child's own runtime: the probe gave up, not the child.
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[cfg(not(windows))]
#[tokio::test]
async fn foreign_platform_probe_is_skipped() {
    static RESOLVER: FieldResolver = FieldResolver::new(
        "field",
        &[ProbeSpec::command("elsewhere", &["echo", "never"], verbatim).on(Platform::Windows)],
        "fallback",
    );
    assert_eq!(RESOLVER.resolve().await, "fallback");
}
