// src/lib.rs

//! Cryptopix-CLWE build recipe
//!
//! Configuration resolution and build orchestration for the CLWE
//! lattice-based KEM library: options are resolved against the target
//! platform, a CMake toolchain is generated, the library is built and
//! installed, and consumer metadata is published alongside the package.
//!
//! # Architecture
//!
//! - Pure resolution: options and settings in, frozen configuration out
//! - Pinned requirements: one declaration feeds both the build and consumers
//! - Explicit stages: every external step fails with a named stage

mod error;
pub mod recipe;

pub use error::{Error, PackagingStage, Phase, Result};
pub use recipe::{Configuration, Cook, CookResult, Kitchen, KitchenConfig, PackageInfo};
