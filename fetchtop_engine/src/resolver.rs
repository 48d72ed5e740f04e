//! Ordered fallback resolution for one logical field.

use crate::probe::ProbeSpec;

/// A field's probe chain and its sentinel. The chain is walked strictly in
/// declared order; the first non-empty value wins, so priority is decided by
/// configuration rather than timing.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver {
    pub name: &'static str,
    pub probes: &'static [ProbeSpec],
    pub sentinel: &'static str,
}

impl FieldResolver {
    pub const fn new(
        name: &'static str,
        probes: &'static [ProbeSpec],
        sentinel: &'static str,
    ) -> Self {
        Self {
            name,
            probes,
            sentinel,
        }
    }

    /// Resolves the field. Always returns a defined value; when every probe
    /// comes back empty the sentinel stands in.
    pub async fn resolve(&self) -> String {
        for probe in self.probes {
            if let Some(value) = probe.invoke().await {
                return value;
            }
        }
        tracing::debug!(field = self.name, "all probes unavailable, using sentinel");
        self.sentinel.to_string()
    }
}
