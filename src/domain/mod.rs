// Domain layer: passenger model and the classifier/model-source ports.

pub mod model;
pub mod ports;
