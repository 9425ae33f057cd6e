//! Adapters connecting the ridemap core to external services.
//!
//! Responsibilities:
//! - Implement core traits against real services (OSRM over HTTP).
//! - Translate wire formats and transport failures into core types.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `ridemap-core`).
//! - Keep blocking I/O off async executors; prefer async-capable clients.
//!
//! Invariants:
//! - Thread-safe by default where feasible.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;
