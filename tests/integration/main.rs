//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host (x86_64) with no
//! real hardware or network required.

mod alert_service_tests;
mod hardware_source_tests;
mod mock_ports;
mod simulation_tests;
