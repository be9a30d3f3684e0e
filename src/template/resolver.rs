// Template expansion

use crate::error::ExpandError;
use crate::template::ast::{TemplatePart, UriTemplate};
use crate::template::binder::{ParamValue, Params};
use crate::template::encoding;

/// Controls how collection-valued query variables render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// When true, collections render as repeated `name=v` assignments
    /// even without an explode marker in the template. Default false
    /// (single comma-joined assignment).
    pub composite_collections: bool,
}

/// Expands parsed templates against supplied parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExpander {
    options: RenderOptions,
}

impl TemplateExpander {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Produces the expanded URI string.
    ///
    /// A template without substitution points is returned unchanged,
    /// regardless of the supplied values. Otherwise binding errors
    /// propagate verbatim; on success literals are emitted untouched,
    /// path variables substitute inline, and the query block (if any
    /// member is bound) is appended as a single `?`-prefixed group with
    /// members joined by `&`. Unbound query variables are skipped.
    pub fn expand(&self, template: &UriTemplate, params: &Params) -> Result<String, ExpandError> {
        if !template.is_templated() {
            return Ok(template.as_str().to_string());
        }

        let bound = template.bind(params)?;
        tracing::trace!(template = %template, "expanding URI template");

        let mut out = String::with_capacity(template.as_str().len());
        for part in template.parts() {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::PathVar(name) => {
                    // bind() guarantees every path variable is a bound scalar
                    if let Some(ParamValue::Scalar(value)) = bound.get(name) {
                        out.push_str(&encoding::encode_path(value));
                    }
                }
                TemplatePart::QueryBlock(vars) => {
                    let rendered: Vec<String> = vars
                        .iter()
                        .filter_map(|var| {
                            bound.get(&var.name).map(|value| {
                                let exploded =
                                    var.exploded || self.options.composite_collections;
                                encoding::render_query_var(&var.name, value, exploded)
                            })
                        })
                        .filter(|assignment| !assignment.is_empty())
                        .collect();

                    if !rendered.is_empty() {
                        out.push(if out.contains('?') { '&' } else { '?' });
                        out.push_str(&rendered.join("&"));
                    }
                }
            }
        }

        Ok(out)
    }
}
