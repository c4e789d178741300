//! Throttle guard adapters.

mod in_memory;

pub use in_memory::CooldownThrottle;
