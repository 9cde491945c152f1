//! Application core: pure domain logic, zero I/O.
//!
//! This module wires the light core (relay, auto-off, blink) into a
//! single service driven by ticks and commands.  All interaction with
//! hardware and the network happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
