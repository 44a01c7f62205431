//! Elastic-net regression engine for fitstage

mod elastic_net;
pub mod error;
mod params;

pub use elastic_net::ElasticNet;
pub use error::LinearError;
pub use params::{ElasticNetParams, Selection};
