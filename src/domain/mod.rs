// Domain layer: posting model and ports. No HTTP or HTML types leak in here.

pub mod model;
pub mod ports;
