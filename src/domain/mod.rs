// Domain layer: earthquake records, load states and the ports the core talks through.

pub mod model;
pub mod ports;
