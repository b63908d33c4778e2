//! Benchmark utilities for the Harrax ECS.
//!
//! - **Microbenchmarks**: individual registry operations (create, attach, query, refresh)
//! - **Scenario benchmarks**: whole fixed ticks of representative workloads (particles, a mixed
//!   game world)
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p harrax_bench
//!
//! # Run specific benchmark group
//! cargo bench -p harrax_bench -- refresh
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

pub mod components;
pub mod scenarios;
