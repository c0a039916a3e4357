//! dbcheck core - connection abstraction shared by the startup gate and drivers
//!
//! This crate defines the small surface the gate needs from a live database:
//!
//! - `Connection` - async query capability injected into the gate
//! - `Value`, `Row`, `QueryResult` - materialised result sets
//! - `DbCheckError` - driver-level error type

mod connection;
mod error;
mod types;

pub use connection::*;
pub use error::*;
pub use types::*;
