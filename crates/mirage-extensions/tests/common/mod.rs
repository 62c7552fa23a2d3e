//! Common test utilities for mirage-extensions
//!
//! - Extension list builders
//! - Assertion helpers for conflict results

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod assertions;
pub mod builders;

pub use assertions::*;
pub use builders::*;
