//! Electrode extraction and mapping integration tests.

#[cfg(test)]
pub mod check;
#[cfg(test)]
pub mod extract;
#[cfg(test)]
pub mod fill;
pub mod paths;
