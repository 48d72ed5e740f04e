//! One-cycle assembly of the full Snapshot.

use std::time::{SystemTime, UNIX_EPOCH};

use sysinfo::{Disks, MemoryRefreshKind, RefreshKind, System};
use tokio::task;

use crate::battery;
use crate::desktop::{self, WINDOW_MANAGER_SCANNER};
use crate::fields;
use crate::gpu;
use crate::packages;
use crate::scanner::ProcessScanner;
use crate::snapshot::{Snapshot, GIB};

/// Bulk OS readings taken together on one blocking thread. Memory used and
/// total come from the same refresh so they cannot drift apart.
#[derive(Debug, Clone, Copy, Default)]
struct HostSample {
    mem_used_bytes: u64,
    mem_total_bytes: u64,
    disk_used_gb: u64,
    disk_total_gb: u64,
    boot_time: i64,
}

impl HostSample {
    fn collect() -> Self {
        let mut sys = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        sys.refresh_memory();
        let mem_total = sys.total_memory();
        let mem_used = mem_total.saturating_sub(sys.available_memory());

        let disks = Disks::new_with_refreshed_list();
        let root = disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == std::path::Path::new("/"))
            .or_else(|| disks.list().iter().max_by_key(|disk| disk.total_space()));
        let (disk_used, disk_total) = root
            .map(|disk| {
                let total = disk.total_space();
                (total.saturating_sub(disk.available_space()), total)
            })
            .unwrap_or((0, 0));

        Self {
            mem_used_bytes: mem_used,
            mem_total_bytes: mem_total,
            disk_used_gb: disk_used / GIB,
            disk_total_gb: disk_total / GIB,
            boot_time: System::boot_time() as i64,
        }
    }
}

/// Produces Snapshots. Holds no cache: every cycle reads the world fresh,
/// and a failed resolver is already sentinel-backed, never retried.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    scanner: ProcessScanner,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            scanner: WINDOW_MANAGER_SCANNER,
        }
    }

    /// Resolves every field once and assembles the Snapshot. Never fails;
    /// missing data lands as sentinels.
    pub async fn aggregate(&self) -> Snapshot {
        let host_sample = task::spawn_blocking(HostSample::collect);

        let (
            matched,
            user,
            host,
            os_name,
            kernel_release,
            shell_path,
            desktop_environment,
            cpu_model,
            gpu_model,
            resolution,
            terminal,
            packages,
        ) = tokio::join!(
            self.scanner.scan(),
            fields::USER.resolve(),
            fields::HOST.resolve(),
            fields::OS_NAME.resolve(),
            fields::KERNEL.resolve(),
            fields::SHELL.resolve(),
            desktop::DESKTOP_ENVIRONMENT.resolve(),
            fields::CPU_MODEL.resolve(),
            gpu::GPU_MODEL.resolve(),
            fields::RESOLUTION.resolve(),
            fields::TERMINAL.resolve(),
            packages::summary(packages::MANAGERS),
        );

        let sample = host_sample.await.unwrap_or_default();
        let snapshot = Snapshot {
            user,
            host,
            os_name,
            kernel_release,
            uptime_seconds: uptime_since(sample.boot_time),
            shell_path,
            window_manager: desktop::window_manager_label(&matched),
            desktop_environment,
            cpu_model,
            gpu_model,
            mem_used_bytes: sample.mem_used_bytes,
            mem_total_bytes: sample.mem_total_bytes,
            disk_used_gb: sample.disk_used_gb,
            disk_total_gb: sample.disk_total_gb,
            battery: battery::read(),
            packages,
            resolution,
            terminal,
            boot_time: sample.boot_time,
        };
        tracing::debug!(host = %snapshot.host, "aggregation cycle complete");
        snapshot
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Uptime is derived from boot time so the two fields always agree.
fn uptime_since(boot_time: i64) -> u64 {
    if boot_time <= 0 {
        return 0;
    }
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0);
    now.saturating_sub(boot_time).max(0) as u64
}
