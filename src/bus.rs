pub mod i2c;
pub mod wire;

pub use i2c::{open_linux_bus, LinuxWire};
pub use wire::{HalWire, WireBus, WireError};
