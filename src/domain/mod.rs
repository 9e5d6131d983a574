// Domain layer: models, raw provider shapes and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod raw;
