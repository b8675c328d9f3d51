//! Router assembly.

pub mod routes;
