//! Repository search service that backs the gateway's `/data` route

pub mod github;
pub mod routes;

pub use github::{Repository, RepositorySearch};
