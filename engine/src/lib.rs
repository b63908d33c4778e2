//! Harrax engine: the entity component system data layer behind the Harrax demo.
//!
//! The interesting parts live in [`ecs`]; [`core`] carries the logging sinks the engine and its
//! applications share.

// Allow the derive macros to refer to `::harrax_engine` from inside this crate.
extern crate self as harrax_engine;

pub mod core;
pub mod ecs;
