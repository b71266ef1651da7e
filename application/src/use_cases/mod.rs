//! Use cases (application services)

pub mod converse;
