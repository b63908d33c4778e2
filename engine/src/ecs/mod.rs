pub mod component;
pub mod config;
pub mod entity;
pub mod error;
pub mod query;
pub mod registry;
pub mod system;
pub(crate) mod util;

pub use component::Component;
pub use config::Config;
pub use entity::Entity;
pub use error::CapacityError;
pub use query::{Fetch, Mask};
pub use registry::Registry;
pub use system::System;
