//! Port traits — the boundary between the hardware model and whoever drives it.
//!
//! ```text
//!   Controller ──▶ HardwareApi ──▶ HardwareModel ◀── UserAction ◀── Operator
//! ```
//!
//! The outer controller (not part of this crate) commands actuators and reads
//! sensors through [`HardwareApi`]; the interactive operator loop injects
//! physical-world actions through [`UserAction`]. The simulated adapter
//! ([`HardwareModel`](crate::hardware::HardwareModel)) implements both, so a
//! real-hardware adapter could replace it without touching either caller.

// ───────────────────────────────────────────────────────────────
// Hardware state enums
// ───────────────────────────────────────────────────────────────

/// Boiler heating element commanded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoilerState {
    On,
    Off,
}

/// Boiler water sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoilerStatus {
    Empty,
    NotEmpty,
}

/// Brew button latch. Set on press, cleared on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrewButtonStatus {
    Pushed,
    NotPushed,
}

/// Warmer plate heating element state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarmerPlateState {
    On,
    Off,
}

/// Warmer plate pot presence / content sensor.
///
/// Progression: `Empty` → `PotEmpty` (pot placed) → `PotNotEmpty` (brew
/// completed) → `Empty` (pot removed). Placing or removing a pot overrides
/// `PotNotEmpty` directly — swapping pots is always physically possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarmerStatus {
    /// No pot on the plate.
    Empty,
    /// A pot is on the plate, nothing in it.
    PotEmpty,
    /// The pot has coffee in it.
    PotNotEmpty,
}

/// Pressure relief valve actuator state. An open valve extends a running
/// brew cycle (see [`crate::brew`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReliefValveState {
    Open,
    Closed,
}

/// Indicator light actuator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    On,
    Off,
}

// ───────────────────────────────────────────────────────────────
// Actuator / sensor port (controller → hardware)
// ───────────────────────────────────────────────────────────────

/// The sensor/actuator contract consumed by the external controller.
///
/// Nothing here returns an error: invalid operations are policy no-ops
/// (a boiler-ON while brewing is dropped, not failed).
pub trait HardwareApi {
    /// Cancel any active brew cycle and restore every field to its
    /// power-on default. Idempotent.
    fn reset(&mut self);

    /// Water sensor reading. Pure read.
    fn boiler_status(&self) -> BoilerStatus;

    /// Read-and-clear: returns the latch value and unconditionally resets
    /// it to [`BrewButtonStatus::NotPushed`]. A second read without an
    /// intervening press always returns `NotPushed`.
    fn brew_button_status(&mut self) -> BrewButtonStatus;

    /// Pot presence / content sensor reading. Pure read.
    fn warmer_plate_status(&self) -> WarmerStatus;

    /// Record the commanded boiler state. Transitioning to `On` launches
    /// the background brew cycle unless one is already running (in which
    /// case the command is dropped). `Off` signals a running cycle to
    /// abort; the cycle observes this at its next tick.
    fn set_boiler_state(&mut self, state: BoilerState);

    /// Direct state write, no derived effects.
    fn set_indicator_state(&mut self, state: IndicatorState);

    /// Direct state write. An open valve is observed by an in-flight brew
    /// cycle and restarts its countdown.
    fn set_relief_valve_state(&mut self, state: ReliefValveState);

    /// Direct state write, no derived effects.
    fn set_warmer_plate_state(&mut self, state: WarmerPlateState);
}

// ───────────────────────────────────────────────────────────────
// User action port (operator → hardware)
// ───────────────────────────────────────────────────────────────

/// Actions a human operator can perform on the physical machine.
pub trait UserAction {
    /// Fill the boiler reservoir. Filling an already-full boiler is a no-op
    /// in effect.
    fn fill_water(&mut self);

    /// Press the brew button. Rejected as a no-op (notice log only) while
    /// a brew cycle is running.
    fn press_brew_button(&mut self);

    /// Place a pot on the warmer plate, regardless of what was there.
    fn put_pot(&mut self);

    /// Remove the pot from the warmer plate, regardless of its content.
    fn remove_pot(&mut self);

    /// Print a human-readable snapshot of all hardware fields. Display
    /// only — not a control-flow surface.
    fn show_state(&self);
}
