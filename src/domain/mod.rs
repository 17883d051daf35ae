// Domain layer: hero records, generated descriptors and the ports the pipeline talks through.

pub mod model;
pub mod ports;
