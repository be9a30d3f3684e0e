// URI template parsing, binding and expansion
//
// This module provides parsing of brace-delimited URI templates and
// expansion against positional or named parameter values.

mod ast;
mod binder;
pub(crate) mod encoding;
mod parser;
mod resolver;

pub use ast::{QueryVar, TemplatePart, UriTemplate};
pub use binder::{BoundValues, ParamValue, Params};
pub use parser::TemplateParser;
pub use resolver::{RenderOptions, TemplateExpander};
