//! Hyper-parameter values, per-variant schemas and the per-instance store.
//!
//! A sampler variant declares its options once as a [`HyperParamSchema`]. Every
//! sampler instance then owns its own [`HyperParams`] materialized from that
//! schema, so no defaults are ever shared mutably between instances.

use crate::error::FramePairError;
use std::collections::BTreeMap;
use std::fmt;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum HyperParam {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<HyperParam>),
}

impl HyperParam {
    /// Short name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            HyperParam::Bool(_) => "bool",
            HyperParam::Int(_) => "int",
            HyperParam::Float(_) => "float",
            HyperParam::Str(_) => "string",
            HyperParam::List(_) => "list",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HyperParam::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            HyperParam::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers are accepted wherever a float is expected.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            HyperParam::Float(f) => Some(*f),
            HyperParam::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HyperParam::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[HyperParam]> {
        match self {
            HyperParam::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for HyperParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HyperParam::Bool(b) => write!(f, "{}", b),
            HyperParam::Int(i) => write!(f, "{}", i),
            HyperParam::Float(x) => write!(f, "{}", x),
            HyperParam::Str(s) => write!(f, "\"{}\"", s),
            HyperParam::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for HyperParam {
    fn from(value: bool) -> Self {
        HyperParam::Bool(value)
    }
}

impl From<i64> for HyperParam {
    fn from(value: i64) -> Self {
        HyperParam::Int(value)
    }
}

impl From<i32> for HyperParam {
    fn from(value: i32) -> Self {
        HyperParam::Int(value as i64)
    }
}

impl From<f64> for HyperParam {
    fn from(value: f64) -> Self {
        HyperParam::Float(value)
    }
}

impl From<&str> for HyperParam {
    fn from(value: &str) -> Self {
        HyperParam::Str(value.to_string())
    }
}

impl From<String> for HyperParam {
    fn from(value: String) -> Self {
        HyperParam::Str(value)
    }
}

impl<T: Into<HyperParam>> From<Vec<T>> for HyperParam {
    fn from(values: Vec<T>) -> Self {
        HyperParam::List(values.into_iter().map(Into::into).collect())
    }
}

/// Declared options of one sampler variant together with their defaults.
///
/// Built once per variant and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HyperParamSchema {
    defaults: BTreeMap<String, HyperParam>,
}

impl HyperParamSchema {
    /// Creates an empty schema (a variant with no options).
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an option and its default value.
    pub fn with(mut self, name: &str, default: impl Into<HyperParam>) -> Self {
        self.defaults.insert(name.to_string(), default.into());
        self
    }

    pub fn default_of(&self, name: &str) -> Option<&HyperParam> {
        self.defaults.get(name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HyperParam)> {
        self.defaults.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Checks that every key of `overrides` is declared by this schema.
    ///
    /// # Errors
    ///
    /// Returns `FramePairError::UnknownKey` naming the first undeclared key.
    pub fn validate(&self, overrides: &HyperParams) -> Result<(), FramePairError> {
        match overrides.keys().find(|key| !self.declares(key)) {
            Some(key) => Err(FramePairError::UnknownKey {
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Current hyper-parameter values of one sampler instance, or a set of
/// overrides coming from configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HyperParams {
    values: BTreeMap<String, HyperParam>,
}

impl HyperParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materializes a fresh, independently owned copy of the schema defaults.
    pub fn from_schema(schema: &HyperParamSchema) -> Self {
        HyperParams {
            values: schema.defaults.clone(),
        }
    }

    /// Builder-style insert, handy for writing overrides.
    pub fn with(mut self, key: &str, value: impl Into<HyperParam>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<HyperParam>) -> Option<HyperParam> {
        self.values.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&HyperParam> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HyperParam)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Applies `overrides` on top of the current values.
    ///
    /// All keys are validated before anything is assigned, so a failing call
    /// leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns `FramePairError::UnknownKey` if any key of `overrides` is not
    /// already present.
    pub fn merge(&mut self, overrides: &HyperParams) -> Result<(), FramePairError> {
        if let Some(key) = overrides.keys().find(|key| !self.contains_key(key)) {
            return Err(FramePairError::UnknownKey {
                key: key.to_string(),
            });
        }
        for (key, value) in overrides.iter() {
            self.values.insert(key.to_string(), value.clone());
        }
        Ok(())
    }

    fn require(&self, key: &str) -> Result<&HyperParam, FramePairError> {
        self.get(key).ok_or_else(|| FramePairError::UnknownKey {
            key: key.to_string(),
        })
    }

    fn mismatch(key: &str, expected: &str, found: &HyperParam) -> FramePairError {
        FramePairError::InvalidHyperParam {
            key: key.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, FramePairError> {
        let value = self.require(key)?;
        value
            .as_bool()
            .ok_or_else(|| Self::mismatch(key, "bool", value))
    }

    /// Reads a non-negative integer option as a count or distance.
    pub fn get_usize(&self, key: &str) -> Result<usize, FramePairError> {
        let value = self.require(key)?;
        value
            .as_int()
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(|| Self::mismatch(key, "non-negative int", value))
    }

    pub fn get_f64(&self, key: &str) -> Result<f64, FramePairError> {
        let value = self.require(key)?;
        value
            .as_float()
            .ok_or_else(|| Self::mismatch(key, "float", value))
    }

    /// Reads a probability, i.e. a float in `[0, 1]`.
    pub fn get_probability(&self, key: &str) -> Result<f64, FramePairError> {
        let p = self.get_f64(key)?;
        if !(0.0..=1.0).contains(&p) {
            return Err(Self::mismatch(key, "float in [0, 1]", &HyperParam::Float(p)));
        }
        Ok(p)
    }

    pub fn get_str(&self, key: &str) -> Result<&str, FramePairError> {
        let value = self.require(key)?;
        value
            .as_str()
            .ok_or_else(|| Self::mismatch(key, "string", value))
    }

    pub fn get_f64_list(&self, key: &str) -> Result<Vec<f64>, FramePairError> {
        let value = self.require(key)?;
        let items = value
            .as_list()
            .ok_or_else(|| Self::mismatch(key, "list of floats", value))?;
        items
            .iter()
            .map(|item| {
                item.as_float()
                    .ok_or_else(|| Self::mismatch(key, "list of floats", value))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "hyper_params_test.rs"]
mod tests;
