// src/recipe/options.rs

//! Option model: the recipe's configurable boolean axes
//!
//! The schema is an ordinary immutable value. Nothing here holds global
//! state; callers pass the schema into [`resolve`](super::resolve::resolve).

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Names of the recipe options, spelled as the build tool sees them
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, EnumString, EnumIter,
)]
pub enum OptionName {
    #[strum(serialize = "shared")]
    Shared,
    #[strum(serialize = "fPIC")]
    Fpic,
    #[strum(serialize = "with_python")]
    WithPython,
    #[strum(serialize = "with_tests")]
    WithTests,
    #[strum(serialize = "with_benchmarks")]
    WithBenchmarks,
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl Serialize for OptionName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl OptionName {
    /// Parse an option name, rejecting anything the recipe does not declare
    pub fn parse(name: &str) -> Result<Self> {
        name.trim().parse().map_err(|_| {
            let known: Vec<String> = Self::iter().map(|n| n.to_string()).collect();
            Error::InvalidOption(format!(
                "unknown option '{}' (known: {})",
                name.trim(),
                known.join(", ")
            ))
        })
    }
}

/// Declaration of one option: legal values and default
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDecl {
    pub name: OptionName,
    pub values: Vec<bool>,
    pub default: bool,
}

impl OptionDecl {
    /// A boolean option accepting both values
    pub fn boolean(name: OptionName, default: bool) -> Self {
        Self {
            name,
            values: vec![true, false],
            default,
        }
    }

    /// Check a value against the declared domain
    pub fn accepts(&self, value: bool) -> bool {
        self.values.contains(&value)
    }
}

/// The full set of option declarations for a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSchema {
    options: Vec<OptionDecl>,
}

impl OptionSchema {
    /// Build a schema from declarations
    pub fn new(options: Vec<OptionDecl>) -> Self {
        Self { options }
    }

    /// The CLWE recipe's options
    pub fn recipe() -> Self {
        Self::new(vec![
            OptionDecl::boolean(OptionName::Shared, false),
            OptionDecl::boolean(OptionName::Fpic, true),
            OptionDecl::boolean(OptionName::WithPython, false),
            OptionDecl::boolean(OptionName::WithTests, false),
            OptionDecl::boolean(OptionName::WithBenchmarks, false),
        ])
    }

    /// Look up a declaration
    pub fn get(&self, name: OptionName) -> Option<&OptionDecl> {
        self.options.iter().find(|d| d.name == name)
    }

    /// Iterate over all declarations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &OptionDecl> {
        self.options.iter()
    }

    /// Value for an option: the raw input if given, otherwise the default
    ///
    /// Undeclared options yield `None`.
    pub fn value_of(&self, name: OptionName, raw: &RawOptions) -> Option<bool> {
        let decl = self.get(name)?;
        Some(raw.get(name).unwrap_or(decl.default))
    }

    /// Validate raw input against the schema
    pub fn validate(&self, raw: &RawOptions) -> Result<()> {
        for (name, value) in raw.iter() {
            let decl = self.get(name).ok_or_else(|| {
                Error::InvalidOption(format!("option '{}' is not declared by this recipe", name))
            })?;
            if !decl.accepts(value) {
                return Err(Error::InvalidOption(format!(
                    "'{}' is not a legal value for option {}",
                    value, name
                )));
            }
        }
        Ok(())
    }
}

/// Raw option input as supplied by the caller, before resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    values: BTreeMap<OptionName, bool>,
}

impl RawOptions {
    /// Empty input: every option takes its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option value, builder style
    pub fn with(mut self, name: OptionName, value: bool) -> Self {
        self.values.insert(name, value);
        self
    }

    /// Set an option value
    pub fn set(&mut self, name: OptionName, value: bool) {
        self.values.insert(name, value);
    }

    /// Value supplied for an option, if any
    pub fn get(&self, name: OptionName) -> Option<bool> {
        self.values.get(&name).copied()
    }

    /// Iterate over supplied values in name order
    pub fn iter(&self) -> impl Iterator<Item = (OptionName, bool)> + '_ {
        self.values.iter().map(|(n, v)| (*n, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse and apply a `name=value` assignment such as `shared=True`
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            Error::InvalidOption(format!(
                "expected name=value, got '{}'",
                assignment
            ))
        })?;
        let name = OptionName::parse(name)?;
        let value = parse_bool(value).ok_or_else(|| {
            Error::InvalidOption(format!(
                "'{}' is not a boolean value for option {}",
                value.trim(),
                name
            ))
        })?;
        self.set(name, value);
        Ok(())
    }

    /// Build from a name-keyed map, as read from a profile
    pub fn from_map(map: &BTreeMap<String, bool>) -> Result<Self> {
        let mut raw = Self::new();
        for (name, value) in map {
            raw.set(OptionName::parse(name)?, *value);
        }
        Ok(raw)
    }
}

/// Parse a boolean option value, accepting `True`/`False` spellings
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
