//! Games built on the shared flow.

pub mod bowling;
pub mod rps;
