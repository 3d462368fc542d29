//! Upstream module - the data source `/data` is relayed from

pub mod http_upstream;
pub mod traits;

pub use http_upstream::HttpUpstream;
pub use traits::Upstream;
