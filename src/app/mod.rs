//! Application core: pure domain logic, zero I/O.
//!
//! The actuation sequencer, the command dispatcher, and the service that
//! ties them to the outside world.  All interaction with hardware and
//! timers happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod commands;
pub mod dispatch;
pub mod events;
pub mod ports;
pub mod sequencer;
pub mod service;
