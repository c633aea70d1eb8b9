//! Command-line argument structs, one module per binary.

pub mod mapper;
pub mod reducer;
