pub mod encap;
pub mod error;
pub mod layers;
pub mod net;
pub mod sim;
pub mod viz;

pub use encap::build_encapsulation;
pub use error::{Error, Result};

#[cfg(test)]
mod test;
