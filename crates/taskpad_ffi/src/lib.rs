//! FFI shell for the Taskpad core crate.

pub mod api;
