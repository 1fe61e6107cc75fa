// src/recipe/requirements.rs

//! Dependency declaration
//!
//! The recipe requires exactly one external package. Both the toolchain
//! generator and the consumer metadata read it from [`requirements`], so the
//! pinned version used to build is the one advertised to consumers.

use serde::Serialize;

/// A required external package at a pinned version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DependencySpec {
    pub name: &'static str,
    pub version: &'static str,
    /// Name of the CMake find module that locates the package
    pub find_module: &'static str,
    /// Imported targets the find module provides
    pub module_targets: &'static [&'static str],
}

/// The TLS/crypto provider the library links against
pub const OPENSSL: DependencySpec = DependencySpec {
    name: "openssl",
    version: "3.1.0",
    find_module: "OpenSSL",
    module_targets: &["OpenSSL::SSL", "OpenSSL::Crypto"],
};

/// All requirements of the recipe
pub fn requirements() -> &'static [DependencySpec] {
    &[OPENSSL]
}

impl DependencySpec {
    /// Reference in `name/version` form
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }

    /// Target consumers link against
    pub fn target(&self) -> String {
        format!("{0}::{0}", self.name)
    }

    /// Reference with the patch component masked, e.g. `openssl/3.1.Z`
    ///
    /// Patch releases of a requirement do not change the package id.
    pub fn minor_mode_reference(&self) -> String {
        let mut parts = self.version.split('.');
        match (parts.next(), parts.next()) {
            (Some(major), Some(minor)) => format!("{}/{}.{}.Z", self.name, major, minor),
            _ => self.reference(),
        }
    }
}
