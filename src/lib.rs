#![cfg_attr(not(test), no_std)]
#![cfg_attr(feature = "firmware", feature(impl_trait_in_assoc_type))]

// Must come first so the log macros are visible in the other modules.
mod fmt;

pub mod config;
pub mod reporter;
pub mod sensors;
