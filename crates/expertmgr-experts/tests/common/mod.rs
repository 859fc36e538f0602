//! Common test utilities for expertmgr-experts
//!
//! This module provides shared test infrastructure including:
//! - Store builders for installation fixtures
//! - Mock file probes and stores for testing without side effects

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
