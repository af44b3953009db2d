// Domain layer: request/result models, reference catalogs and ports.

pub mod catalog;
pub mod model;
pub mod ports;
