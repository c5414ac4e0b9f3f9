//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the HazardWatch node:
//! the per-cycle orchestration, the report wire format, and the outbound
//! events.  All interaction with sensors and the network happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod report;
pub mod service;
