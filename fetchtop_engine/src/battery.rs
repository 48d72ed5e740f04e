//! Battery presence and charge state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Charge state as shown in the panel. Charging means external power is
/// present, whatever the pack itself is doing; percent is only reported on
/// battery power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BatteryState {
    Charging,
    PercentRemaining(u8),
    #[default]
    NotPresent,
}

impl fmt::Display for BatteryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatteryState::Charging => f.write_str("charging"),
            BatteryState::PercentRemaining(pct) => write!(f, "{pct}%"),
            BatteryState::NotPresent => f.write_str("n/a"),
        }
    }
}

/// Queries the first battery. Any failure reads as no battery.
pub fn read() -> BatteryState {
    match try_read() {
        Ok(state) => state,
        Err(err) => {
            tracing::debug!(error = %err, "battery query failed");
            BatteryState::NotPresent
        }
    }
}

fn try_read() -> Result<BatteryState, battery::Error> {
    let manager = battery::Manager::new()?;
    let Some(first) = manager.batteries()?.next() else {
        return Ok(BatteryState::NotPresent);
    };
    let bat = first?;
    let percent = bat
        .state_of_charge()
        .get::<battery::units::ratio::percent>();
    Ok(from_reading(bat.state(), percent))
}

/// The platform reports Charging while filling and Full while plugged at
/// capacity; both mean external power. A plugged-but-draining pack is
/// indistinguishable from an unplugged one here, so it shows its percent.
pub fn from_reading(state: battery::State, percent: f32) -> BatteryState {
    match state {
        battery::State::Charging | battery::State::Full => BatteryState::Charging,
        _ => BatteryState::PercentRemaining(percent.round().clamp(0.0, 100.0) as u8),
    }
}
