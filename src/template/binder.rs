// Parameter binding and arity validation

use std::collections::HashMap;
use std::fmt;

use crate::error::ExpandError;
use crate::template::ast::{TemplatePart, UriTemplate};

/// A raw value supplied for a template variable: one scalar, or an
/// ordered collection of scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn scalar(value: impl fmt::Display) -> Self {
        ParamValue::Scalar(value.to_string())
    }

    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        ParamValue::List(values.into_iter().map(|v| v.to_string()).collect())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ParamValue::List(_))
    }
}

// Used when embedding provided values in error payloads.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Scalar(value) => f.write_str(value),
            ParamValue::List(values) => f.write_str(&values.join(", ")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::scalar(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::scalar(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::scalar(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::scalar(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::scalar(value)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::scalar(value)
    }
}

impl<T: fmt::Display> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::list(values)
    }
}

/// The values supplied for one expansion: an ordered positional list, or
/// a name-keyed map whose key order is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Params {
    Positional(Vec<ParamValue>),
    Named(HashMap<String, ParamValue>),
}

impl Params {
    pub fn positional<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ParamValue>,
    {
        Params::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Builds a named parameter set from an ordered sequence of pairs.
    pub fn named<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        Params::Named(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Params::Positional(values) => values.is_empty(),
            Params::Named(map) => map.is_empty(),
        }
    }
}

/// Variable bindings produced by a successful bind. Unbound query
/// variables are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundValues {
    values: HashMap<String, ParamValue>,
}

impl BoundValues {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn insert(&mut self, name: &str, value: ParamValue) {
        self.values.insert(name.to_string(), value);
    }
}

/// One declared variable, in declaration order. Duplicate names collapse
/// onto their first occurrence.
struct Declared<'t> {
    name: &'t str,
    is_path: bool,
}

fn declared_variables(template: &UriTemplate) -> Vec<Declared<'_>> {
    let mut declared: Vec<Declared<'_>> = Vec::new();

    for part in template.parts() {
        match part {
            TemplatePart::Literal(_) => {}
            TemplatePart::PathVar(name) => {
                if !declared.iter().any(|d| d.name == name.as_str()) {
                    declared.push(Declared {
                        name: name.as_str(),
                        is_path: true,
                    });
                }
            }
            TemplatePart::QueryBlock(vars) => {
                for var in vars {
                    if !declared.iter().any(|d| d.name == var.name.as_str()) {
                        declared.push(Declared {
                            name: var.name.as_str(),
                            is_path: false,
                        });
                    }
                }
            }
        }
    }

    declared
}

/// Matches supplied parameters against the template's declared variables.
///
/// Pure: equal inputs always produce the same bindings or the same error,
/// and every failure is detected here, before any rendering starts.
pub(crate) fn bind(template: &UriTemplate, params: &Params) -> Result<BoundValues, ExpandError> {
    let declared = declared_variables(template);
    let path_count = declared.iter().filter(|d| d.is_path).count();

    match params {
        Params::Positional(values) => bind_positional(template, &declared, path_count, values),
        Params::Named(map) => bind_named(template, &declared, path_count, map),
    }
}

fn bind_positional(
    template: &UriTemplate,
    declared: &[Declared<'_>],
    path_count: usize,
    values: &[ParamValue],
) -> Result<BoundValues, ExpandError> {
    if values.is_empty() && path_count > 0 {
        return Err(ExpandError::NoParametersButPathParametersRequired {
            template: template.as_str().to_string(),
        });
    }

    let provided = || -> Vec<String> { values.iter().map(ParamValue::to_string).collect() };

    if values.len() < path_count {
        return Err(ExpandError::NotEnoughPathParameters {
            template: template.as_str().to_string(),
            provided: provided(),
        });
    }
    if values.len() > declared.len() {
        return Err(ExpandError::TooManyParameters {
            template: template.as_str().to_string(),
            provided: provided(),
        });
    }

    let mut bound = BoundValues::default();
    for (slot, value) in declared.iter().zip(values) {
        if slot.is_path && value.is_list() {
            return Err(ExpandError::CompositeValueInPath {
                template: template.as_str().to_string(),
                name: slot.name.to_string(),
            });
        }
        bound.insert(slot.name, value.clone());
    }

    // A query block declared before a path variable can consume the last
    // values; the count check alone does not catch that.
    for slot in declared {
        if slot.is_path && bound.get(slot.name).is_none() {
            return Err(ExpandError::NotEnoughPathParameters {
                template: template.as_str().to_string(),
                provided: provided(),
            });
        }
    }

    Ok(bound)
}

fn bind_named(
    template: &UriTemplate,
    declared: &[Declared<'_>],
    path_count: usize,
    map: &HashMap<String, ParamValue>,
) -> Result<BoundValues, ExpandError> {
    let mut unknown: Vec<String> = map
        .keys()
        .filter(|key| !declared.iter().any(|d| d.name == key.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        unknown.sort();
        return Err(ExpandError::UnknownParameters {
            template: template.as_str().to_string(),
            keys: unknown,
        });
    }

    if map.is_empty() && path_count > 0 {
        return Err(ExpandError::NoParametersButPathParametersRequired {
            template: template.as_str().to_string(),
        });
    }

    let missing_path = declared
        .iter()
        .any(|d| d.is_path && !map.contains_key(d.name));
    if missing_path {
        let mut provided: Vec<String> = map.keys().cloned().collect();
        provided.sort();
        return Err(ExpandError::NotEnoughPathParameters {
            template: template.as_str().to_string(),
            provided,
        });
    }

    let mut bound = BoundValues::default();
    for slot in declared {
        if let Some(value) = map.get(slot.name) {
            if slot.is_path && value.is_list() {
                return Err(ExpandError::CompositeValueInPath {
                    template: template.as_str().to_string(),
                    name: slot.name.to_string(),
                });
            }
            bound.insert(slot.name, value.clone());
        }
    }

    Ok(bound)
}
