//! Percolator — simulated coffee maker hardware.
//!
//! Models the control surface of an automated coffee maker: boiler,
//! warmer plate, relief valve, indicator light, brew button, and the
//! timed brewing process. Two port traits form the boundary: the
//! controller-facing [`hal::HardwareApi`] and the operator-facing
//! [`hal::UserAction`]; [`hardware::HardwareModel`] implements both.
//! Commanding the boiler on launches one background [`brew`] task that
//! owns a periodic ticker and races completion against the relief valve
//! and a manual abort.

#![deny(unused_must_use)]

pub mod brew;
pub mod cli;
pub mod config;
pub mod hal;
pub mod hardware;
