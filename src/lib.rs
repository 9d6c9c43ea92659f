pub mod app;
pub mod compress;
pub mod error;
pub mod net;
pub mod ppp;
pub mod queue;
pub mod sim;
pub mod topo;
pub mod viz;

pub use error::{Error, Result};

#[cfg(test)]
mod test;
