// src/recipe/metadata.rs

//! Static recipe identity

use serde::Serialize;

/// Descriptive metadata of the recipe, fixed at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecipeMetadata {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub license: &'static str,
    pub author: &'static str,
    pub url: &'static str,
    pub homepage: &'static str,
    pub topics: &'static [&'static str],
    /// Settings axes the recipe's binaries depend on
    pub settings: &'static [&'static str],
}

/// The CLWE recipe
pub const RECIPE: RecipeMetadata = RecipeMetadata {
    name: "clwe",
    version: "1.0.0",
    description: "Cryptopix-CLWE: Color-Integrated Learning With Errors (CLWE) Cryptosystem",
    license: "Apache-2.0",
    author: "Your Organization <contact@your-org.com>",
    url: "https://github.com/your-org/cryptopix-clwe",
    homepage: "https://github.com/your-org/cryptopix-clwe",
    topics: &["cryptography", "post-quantum", "lattice-based", "kem", "pqc"],
    settings: &["os", "compiler", "build_type", "arch"],
};

impl RecipeMetadata {
    /// Reference in `name/version` form
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference() {
        assert_eq!(RECIPE.reference(), "clwe/1.0.0");
        assert_eq!(RECIPE.settings.len(), 4);
        assert!(RECIPE.topics.contains(&"kem"));
    }
}
