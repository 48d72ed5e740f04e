//! Bounded-time probes against single external information sources.
//!
//! A probe is static data: where to look (command, environment, file, or an
//! OS API wrapper), how to parse what comes back, which platforms it applies
//! to, and how long it may take. Every failure mode collapses to absence at
//! this boundary; callers never see an error.

use std::io;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;

/// Default execution budget for a single probe.
pub const DEFAULT_BUDGET: Duration = Duration::from_millis(1500);

/// Why a probe produced no value. Logged at debug level, then absorbed.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("exceeded execution budget")]
    Timeout,
    #[error("permission denied")]
    PermissionDenied,
    #[error("output did not match expected shape")]
    Unparsable,
}

/// Platforms a probe applies to. A probe outside the host platform is
/// skipped without counting as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Any,
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    pub fn applies_to_host(self) -> bool {
        match self {
            Platform::Any => true,
            Platform::Linux => cfg!(target_os = "linux"),
            Platform::MacOs => cfg!(target_os = "macos"),
            Platform::Windows => cfg!(target_os = "windows"),
        }
    }
}

/// How a probe reaches its source.
#[derive(Debug, Clone, Copy)]
pub enum ProbeSource {
    /// Spawn a command and capture its stdout.
    Command(&'static [&'static str]),
    /// First non-empty variable from an ordered list.
    Env(&'static [&'static str]),
    /// Read a file.
    File(&'static str),
    /// Call an in-process OS API wrapper.
    Api(fn() -> Option<String>),
}

/// One entry in a field's fallback chain.
#[derive(Debug, Clone, Copy)]
pub struct ProbeSpec {
    pub name: &'static str,
    pub source: ProbeSource,
    pub parse: fn(&str) -> Option<String>,
    pub platform: Platform,
    pub budget: Duration,
}

impl ProbeSpec {
    pub const fn command(
        name: &'static str,
        argv: &'static [&'static str],
        parse: fn(&str) -> Option<String>,
    ) -> Self {
        Self {
            name,
            source: ProbeSource::Command(argv),
            parse,
            platform: Platform::Any,
            budget: DEFAULT_BUDGET,
        }
    }

    pub const fn env(
        name: &'static str,
        vars: &'static [&'static str],
        parse: fn(&str) -> Option<String>,
    ) -> Self {
        Self {
            name,
            source: ProbeSource::Env(vars),
            parse,
            platform: Platform::Any,
            budget: DEFAULT_BUDGET,
        }
    }

    pub const fn file(
        name: &'static str,
        path: &'static str,
        parse: fn(&str) -> Option<String>,
    ) -> Self {
        Self {
            name,
            source: ProbeSource::File(path),
            parse,
            platform: Platform::Any,
            budget: DEFAULT_BUDGET,
        }
    }

    pub const fn api(name: &'static str, call: fn() -> Option<String>) -> Self {
        Self {
            name,
            source: ProbeSource::Api(call),
            parse: verbatim,
            platform: Platform::Any,
            budget: DEFAULT_BUDGET,
        }
    }

    pub const fn on(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub const fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Runs the probe. Every failure collapses to `None`; the reason is
    /// logged at debug level and goes no further.
    pub async fn invoke(&self) -> Option<String> {
        if !self.platform.applies_to_host() {
            return None;
        }
        match self.run().await {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(probe = self.name, error = %err, "probe yielded no value");
                None
            }
        }
    }

    async fn run(&self) -> Result<String, ProbeError> {
        let raw = match self.source {
            ProbeSource::Command(argv) => run_command(argv, self.budget).await?,
            ProbeSource::Env(vars) => first_env(vars)
                .ok_or_else(|| ProbeError::Unavailable("no variable set".into()))?,
            ProbeSource::File(path) => read_file(path, self.budget).await?,
            ProbeSource::Api(call) => {
                call().ok_or_else(|| ProbeError::Unavailable("api returned nothing".into()))?
            }
        };
        let value = (self.parse)(&raw).ok_or(ProbeError::Unparsable)?;
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ProbeError::Unparsable);
        }
        Ok(value)
    }
}

/// Process invocation contract: bounded timeout, stdout captured, stderr and
/// stdin detached, trimmed text on success. A child that outlives its budget
/// is left to exit on its own; its output is ignored.
pub async fn run_command(argv: &[&str], budget: Duration) -> Result<String, ProbeError> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| ProbeError::Unavailable("empty argv".into()))?;
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    let output = match timeout(budget, cmd.output()).await {
        Err(_) => return Err(ProbeError::Timeout),
        Ok(Err(err)) => return Err(classify_io(err)),
        Ok(Ok(output)) => output,
    };
    if !output.status.success() {
        return Err(ProbeError::Unavailable(format!(
            "{program} exited with {}",
            output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

async fn read_file(path: &str, budget: Duration) -> Result<String, ProbeError> {
    match timeout(budget, tokio::fs::read_to_string(path)).await {
        Err(_) => Err(ProbeError::Timeout),
        Ok(Err(err)) => Err(classify_io(err)),
        Ok(Ok(text)) => Ok(text),
    }
}

fn first_env(vars: &[&str]) -> Option<String> {
    vars.iter().find_map(|var| {
        std::env::var(var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

fn classify_io(err: io::Error) -> ProbeError {
    match err.kind() {
        io::ErrorKind::NotFound => ProbeError::Unavailable("executable or path not found".into()),
        io::ErrorKind::PermissionDenied => ProbeError::PermissionDenied,
        _ => ProbeError::Unavailable(err.to_string()),
    }
}

/// Pass the output through untouched (the surrounding machinery trims).
pub fn verbatim(raw: &str) -> Option<String> {
    Some(raw.to_string())
}

/// First non-empty line of the output.
pub fn first_line(raw: &str) -> Option<String> {
    raw.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
