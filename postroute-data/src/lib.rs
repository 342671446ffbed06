//! Data access adapters for the Postroute engine.
//!
//! Responsibilities:
//! - Implement `postroute-core` resolver traits against external services.
//! - Encapsulate wire formats and transport error mapping.
//!
//! Boundaries:
//! - Do not encode ordering or planning rules (live in `postroute-core`).
//! - Keep blocking I/O off async executors; prefer async-capable clients.
//!
//! Invariants:
//! - Thread-safe by default where feasible.
//! - No global mutable state.

pub mod geocode;
