#![no_std]

pub mod interfaces;
pub mod scale;
pub mod ttl;
pub mod utils;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
