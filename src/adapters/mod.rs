// Adapters layer: concrete implementations for external systems (model files, http).

pub mod fetch;
pub mod http;
pub mod model;
pub mod page;
