//! Session provider implementations

pub mod openf1;

pub use openf1::OpenF1Provider;
