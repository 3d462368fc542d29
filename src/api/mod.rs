//! HTTP API - route table and handlers

pub mod handlers;
pub mod routes;
