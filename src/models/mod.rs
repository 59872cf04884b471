//! Domain models shared by the resolver, cache and remote client

pub mod device;
pub mod signal;

pub use device::{Capabilities, CapabilityErrors, DeviceRecord};
pub use signal::{Headers, RequestSignal};
