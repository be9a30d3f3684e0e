// Abstract syntax tree types for URI templates

use std::fmt;

use crate::error::ExpandError;
use crate::template::binder::{self, BoundValues, ParamValue, Params};
use crate::template::parser::TemplateParser;
use crate::template::resolver::TemplateExpander;

/// A parsed URI template: the original string plus its ordered parts.
///
/// Parsing the same string always produces an identical value; there is
/// no hidden state. Declaration order (a left-to-right scan of the
/// original string) governs positional value consumption and the order in
/// which query parameters are appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    raw: String,
    parts: Vec<TemplatePart>,
}

/// A template consists of literal runs, inline path substitution points,
/// and at most one group of optional query substitution points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    PathVar(String),
    QueryBlock(Vec<QueryVar>),
}

/// One named member of a query block. A trailing `*` in the template
/// marks the member explode-preferred: collection values render as
/// repeated `name=v` assignments regardless of the render options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryVar {
    pub name: String,
    pub exploded: bool,
}

impl UriTemplate {
    /// Parses a template string. Total: malformed brace runs are kept as
    /// literal text rather than rejected.
    pub fn parse(template: &str) -> Self {
        TemplateParser::parse(template)
    }

    pub(crate) fn new(raw: String, parts: Vec<TemplatePart>) -> Self {
        Self { raw, parts }
    }

    /// The original template string, unchanged.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// True iff the template contains at least one substitution point.
    pub fn is_templated(&self) -> bool {
        self.parts
            .iter()
            .any(|part| !matches!(part, TemplatePart::Literal(_)))
    }

    /// Names of the mandatory path variables, in declaration order.
    pub fn path_variables(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::PathVar(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The optional query variables, in declaration order.
    pub fn query_variables(&self) -> Vec<&QueryVar> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::QueryBlock(vars) => Some(vars.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// All declared variable names, path and query, in declaration order.
    pub fn variable_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .flat_map(|part| match part {
                TemplatePart::Literal(_) => vec![],
                TemplatePart::PathVar(name) => vec![name.as_str()],
                TemplatePart::QueryBlock(vars) => {
                    vars.iter().map(|v| v.name.as_str()).collect()
                }
            })
            .collect()
    }

    /// Matches the supplied parameters against the declared variables,
    /// enforcing the arity and naming invariants.
    pub fn bind(&self, params: &Params) -> Result<BoundValues, ExpandError> {
        binder::bind(self, params)
    }

    /// Expands the template with default (non-composite) render options.
    pub fn expand(&self, params: &Params) -> Result<String, ExpandError> {
        TemplateExpander::new().expand(self, params)
    }

    /// Expands with an ordered list of positional values.
    pub fn expand_positional<I>(&self, values: I) -> Result<String, ExpandError>
    where
        I: IntoIterator,
        I::Item: Into<ParamValue>,
    {
        self.expand(&Params::positional(values))
    }

    /// Expands with a name-keyed map of values.
    pub fn expand_named<I, K, V>(&self, entries: I) -> Result<String, ExpandError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        self.expand(&Params::named(entries))
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
