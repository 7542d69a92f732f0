//! Simulated hardware adapter.
//!
//! [`HardwareModel`] holds every hardware field and implements both port
//! traits. It is a cheap-clone handle over shared state so the background
//! brew task and the foreground caller can both hold it.
//!
//! ## Concurrency layout
//!
//! Exactly one field races between foreground and background: the
//! "brewing in progress" guard. It is a lone [`AtomicBool`] — cycle entry
//! is an atomic test-and-set (`compare_exchange`), abort is an atomic
//! clear. The brew-button latch is its own atomic because its
//! read-and-clear contract is a single `swap`. Everything else the brew
//! task reads or writes (`relief_valve_state`, `warmer_status`,
//! `boiler_status`) lives under one blocking mutex together with the
//! remaining fields.

use core::cell::RefCell;
use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::{debug, info};

use crate::brew;
use crate::config::SystemConfig;
use crate::hal::{
    BoilerState, BoilerStatus, BrewButtonStatus, HardwareApi, IndicatorState, ReliefValveState,
    UserAction, WarmerPlateState, WarmerStatus,
};

// ───────────────────────────────────────────────────────────────
// Shared state
// ───────────────────────────────────────────────────────────────

/// Fields written by at most one actor at a time, guarded as a block.
struct Fields {
    boiler_state: BoilerState,
    boiler_status: BoilerStatus,
    warmer_plate_state: WarmerPlateState,
    warmer_status: WarmerStatus,
    relief_valve_state: ReliefValveState,
    indicator_state: IndicatorState,
}

impl Fields {
    /// Deterministic power-on defaults.
    fn power_on() -> Self {
        Self {
            boiler_state: BoilerState::Off,
            boiler_status: BoilerStatus::Empty,
            warmer_plate_state: WarmerPlateState::Off,
            warmer_status: WarmerStatus::Empty,
            relief_valve_state: ReliefValveState::Closed,
            indicator_state: IndicatorState::Off,
        }
    }
}

/// State shared between the foreground caller and the brew task.
pub(crate) struct Shared {
    pub(crate) config: SystemConfig,
    /// The guarded flag: true while a brew cycle task is active.
    brewing: AtomicBool,
    /// Brew button latch: true = pushed, cleared on read.
    brew_button_pushed: AtomicBool,
    fields: Mutex<CriticalSectionRawMutex, RefCell<Fields>>,
}

impl Shared {
    pub(crate) fn is_brewing(&self) -> bool {
        self.brewing.load(Ordering::Acquire)
    }

    /// Cycle entry guard: atomically flips the flag false → true.
    /// Returns false if a cycle is already active.
    fn try_begin_brew(&self) -> bool {
        self.brewing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Signals a running cycle to abort. Observed at its next tick.
    pub(crate) fn abort_brew(&self) {
        self.brewing.store(false, Ordering::Release);
    }

    pub(crate) fn relief_valve_open(&self) -> bool {
        self.fields
            .lock(|f| f.borrow().relief_valve_state == ReliefValveState::Open)
    }

    /// Completion writes: pot now holds coffee, water consumed. These two
    /// writes happen only here — never on an aborted cycle. Clears the
    /// guard afterwards, ending the cycle.
    pub(crate) fn finish_brew(&self) {
        self.fields.lock(|f| {
            let mut f = f.borrow_mut();
            f.warmer_status = WarmerStatus::PotNotEmpty;
            f.boiler_status = BoilerStatus::Empty;
        });
        self.brewing.store(false, Ordering::Release);
    }
}

// ───────────────────────────────────────────────────────────────
// HardwareModel
// ───────────────────────────────────────────────────────────────

/// The simulated coffee maker hardware. Clone the handle freely; all
/// clones view the same machine.
#[derive(Clone)]
pub struct HardwareModel {
    shared: Arc<Shared>,
}

impl HardwareModel {
    /// Construct a machine in its power-on default state. Call
    /// [`HardwareApi::reset`] before first use, as the controller would.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                brewing: AtomicBool::new(false),
                brew_button_pushed: AtomicBool::new(false),
                fields: Mutex::new(RefCell::new(Fields::power_on())),
            }),
        }
    }

    /// Whether a brew cycle task is currently active.
    pub fn is_brewing(&self) -> bool {
        self.shared.is_brewing()
    }

    /// Render a snapshot of all fields as fixed-width label/value rows.
    /// Pure with respect to hardware state (the latch is not cleared).
    pub fn render_state(&self) -> String {
        let brewing = if self.is_brewing() { "InProgress" } else { "NO" };
        self.shared.fields.lock(|f| {
            let f = f.borrow();
            let water = match f.boiler_status {
                BoilerStatus::NotEmpty => "[Boiler has water]",
                BoilerStatus::Empty => "[There is no water in the boiler]",
            };
            let pot = match f.warmer_status {
                WarmerStatus::Empty => "[There is no pot in the warmer plate]",
                WarmerStatus::PotEmpty => "[Warmer plate holds an empty pot]",
                WarmerStatus::PotNotEmpty => "[The pot has coffee in it!]",
            };
            let boiler = match f.boiler_state {
                BoilerState::On => "ON",
                BoilerState::Off => "OFF",
            };
            let warmer = match f.warmer_plate_state {
                WarmerPlateState::On => "ON",
                WarmerPlateState::Off => "OFF",
            };
            let valve = match f.relief_valve_state {
                ReliefValveState::Open => "OPEN",
                ReliefValveState::Closed => "CLOSED",
            };
            let indicator = match f.indicator_state {
                IndicatorState::On => "ON",
                IndicatorState::Off => "OFF",
            };

            let mut out = String::new();
            // Infallible: writing into a String cannot fail.
            let _ = writeln!(out, "{:<20}:{:<8}", "Brewing", brewing);
            let _ = writeln!(out, "{:<20}:{:<8}{}", "Boiler", boiler, water);
            let _ = writeln!(out, "{:<20}:{:<8}{}", "Warmer Plate", warmer, pot);
            let _ = writeln!(out, "{:<20}:{:<8}", "Relief Valve", valve);
            let _ = writeln!(out, "{:<20}:{:<8}", "Indicator", indicator);
            out
        })
    }

    fn spawn_brew_cycle(&self) {
        brew::spawn(Arc::clone(&self.shared));
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator / sensor contract
// ───────────────────────────────────────────────────────────────

impl HardwareApi for HardwareModel {
    fn reset(&mut self) {
        // A running cycle sees the cleared guard at its next tick, exits,
        // and drops its ticker. A fresh cycle is free to start immediately:
        // entry contends only on the guard, never on the old task.
        self.shared.abort_brew();
        self.shared
            .brew_button_pushed
            .store(false, Ordering::Release);
        self.shared
            .fields
            .lock(|f| *f.borrow_mut() = Fields::power_on());
    }

    fn boiler_status(&self) -> BoilerStatus {
        self.shared.fields.lock(|f| f.borrow().boiler_status)
    }

    fn brew_button_status(&mut self) -> BrewButtonStatus {
        // Single swap-and-return: no check-then-act window even with a
        // second concurrent reader.
        if self
            .shared
            .brew_button_pushed
            .swap(false, Ordering::AcqRel)
        {
            BrewButtonStatus::Pushed
        } else {
            BrewButtonStatus::NotPushed
        }
    }

    fn warmer_plate_status(&self) -> WarmerStatus {
        self.shared.fields.lock(|f| f.borrow().warmer_status)
    }

    fn set_boiler_state(&mut self, state: BoilerState) {
        self.shared
            .fields
            .lock(|f| f.borrow_mut().boiler_state = state);

        match state {
            BoilerState::On => {
                if self.shared.try_begin_brew() {
                    self.spawn_brew_cycle();
                } else {
                    // Merge, don't queue: the command is dropped outright.
                    debug!("boiler ON dropped: a brew cycle is already active");
                }
            }
            BoilerState::Off => self.shared.abort_brew(),
        }
    }

    fn set_indicator_state(&mut self, state: IndicatorState) {
        self.shared
            .fields
            .lock(|f| f.borrow_mut().indicator_state = state);
    }

    fn set_relief_valve_state(&mut self, state: ReliefValveState) {
        self.shared
            .fields
            .lock(|f| f.borrow_mut().relief_valve_state = state);
    }

    fn set_warmer_plate_state(&mut self, state: WarmerPlateState) {
        self.shared
            .fields
            .lock(|f| f.borrow_mut().warmer_plate_state = state);
    }
}

// ───────────────────────────────────────────────────────────────
// User action contract
// ───────────────────────────────────────────────────────────────

impl UserAction for HardwareModel {
    fn fill_water(&mut self) {
        self.shared
            .fields
            .lock(|f| f.borrow_mut().boiler_status = BoilerStatus::NotEmpty);
    }

    fn press_brew_button(&mut self) {
        if self.is_brewing() {
            info!("NOP: a brew cycle is already in progress");
            return;
        }
        self.shared.brew_button_pushed.store(true, Ordering::Release);
    }

    fn put_pot(&mut self) {
        self.shared
            .fields
            .lock(|f| f.borrow_mut().warmer_status = WarmerStatus::PotEmpty);
    }

    fn remove_pot(&mut self) {
        self.shared
            .fields
            .lock(|f| f.borrow_mut().warmer_status = WarmerStatus::Empty);
    }

    fn show_state(&self) {
        print!("{}", self.render_state());
    }
}

// ───────────────────────────────────────────────────────────────
// Tests (non-spawning paths; cycle behaviour is covered in tests/)
// ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> HardwareModel {
        let mut hw = HardwareModel::new(SystemConfig::default());
        hw.reset();
        hw
    }

    #[test]
    fn reset_restores_power_on_defaults() {
        let mut hw = machine();
        hw.fill_water();
        hw.put_pot();
        hw.press_brew_button();
        hw.set_indicator_state(IndicatorState::On);
        hw.set_relief_valve_state(ReliefValveState::Open);
        hw.set_warmer_plate_state(WarmerPlateState::On);

        hw.reset();

        assert!(!hw.is_brewing());
        assert_eq!(hw.boiler_status(), BoilerStatus::Empty);
        assert_eq!(hw.brew_button_status(), BrewButtonStatus::NotPushed);
        assert_eq!(hw.warmer_plate_status(), WarmerStatus::Empty);
        let rendered = hw.render_state();
        assert!(rendered.contains("CLOSED"));
        assert!(rendered.contains(&format!("{:<20}:{:<8}", "Indicator", "OFF")));
    }

    #[test]
    fn fill_water_marks_boiler_not_empty() {
        let mut hw = machine();
        hw.fill_water();
        assert_eq!(hw.boiler_status(), BoilerStatus::NotEmpty);
        // Filling an already-full boiler changes nothing.
        hw.fill_water();
        assert_eq!(hw.boiler_status(), BoilerStatus::NotEmpty);
    }

    #[test]
    fn button_latch_clears_on_read() {
        let mut hw = machine();
        hw.press_brew_button();
        assert_eq!(hw.brew_button_status(), BrewButtonStatus::Pushed);
        assert_eq!(hw.brew_button_status(), BrewButtonStatus::NotPushed);
    }

    #[test]
    fn pot_placement_overrides_content() {
        let mut hw = machine();
        hw.put_pot();
        assert_eq!(hw.warmer_plate_status(), WarmerStatus::PotEmpty);
        hw.remove_pot();
        assert_eq!(hw.warmer_plate_status(), WarmerStatus::Empty);
        // Placing a pot twice in a row stays PotEmpty (pot swap).
        hw.put_pot();
        hw.put_pot();
        assert_eq!(hw.warmer_plate_status(), WarmerStatus::PotEmpty);
    }

    #[test]
    fn render_rows_follow_reference_format() {
        let mut hw = machine();
        hw.fill_water();
        hw.put_pot();
        let rendered = hw.render_state();
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], format!("{:<20}:{:<8}", "Brewing", "NO"));
        assert_eq!(
            rows[1],
            format!("{:<20}:{:<8}{}", "Boiler", "OFF", "[Boiler has water]")
        );
        assert_eq!(
            rows[2],
            format!(
                "{:<20}:{:<8}{}",
                "Warmer Plate", "OFF", "[Warmer plate holds an empty pot]"
            )
        );
        assert_eq!(rows[3], format!("{:<20}:{:<8}", "Relief Valve", "CLOSED"));
        assert_eq!(rows[4], format!("{:<20}:{:<8}", "Indicator", "OFF"));
    }

    #[test]
    fn setters_record_state() {
        let mut hw = machine();
        hw.set_indicator_state(IndicatorState::On);
        hw.set_relief_valve_state(ReliefValveState::Open);
        hw.set_warmer_plate_state(WarmerPlateState::On);
        let rendered = hw.render_state();
        assert!(rendered.contains(&format!("{:<20}:{:<8}", "Relief Valve", "OPEN")));
        assert!(rendered.contains(&format!("{:<20}:{:<8}", "Indicator", "ON")));
        assert!(rendered.contains(&format!("{:<20}:", "Warmer Plate")));
    }

    #[test]
    fn boiler_off_without_cycle_is_harmless() {
        let mut hw = machine();
        hw.set_boiler_state(BoilerState::Off);
        assert!(!hw.is_brewing());
        assert!(hw
            .render_state()
            .contains(&format!("{:<20}:{:<8}", "Boiler", "OFF")));
    }
}
