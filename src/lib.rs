//! URI template expansion and pagination navigation links for
//! hypermedia-style APIs.
//!
//! The crate has two halves. The template half parses brace-delimited
//! templates (`/users/{id}/activity{?limit,page}`) and expands them
//! against positional or named values, encoding each substitution for
//! its path or query context:
//!
//! ```rust
//! use waymark::UriTemplate;
//!
//! let template = UriTemplate::parse("/users/{userId}/activity{?limit,page}");
//! assert!(template.is_templated());
//!
//! let href = template.expand_positional([3, 10, 2]).unwrap();
//! assert_eq!(href, "/users/3/activity?limit=10&page=2");
//!
//! let href = template.expand_named([("userId", 3)]).unwrap();
//! assert_eq!(href, "/users/3/activity");
//! ```
//!
//! The pagination half derives the conventional `self`/`first`/`prev`/
//! `next`/`last` navigation links for a paged collection:
//!
//! ```rust
//! use waymark::{navigation_links, Link, PageInfo, SortCriterion};
//!
//! let base = Link::new("http://example.org/people");
//! let page = PageInfo::new(10, 50, 5, 2);
//! let links = navigation_links(&base, &page, &[SortCriterion::ascending("name")]).unwrap();
//!
//! assert_eq!(
//!     links[0].href,
//!     "http://example.org/people?page=2&size=10&sort=name,asc"
//! );
//! ```
//!
//! Everything is a pure synchronous function over immutable values;
//! concurrent callers need no coordination.

mod error;
pub mod link;
pub mod pagination;
pub mod template;

pub use error::{ExpandError, PageError};
pub use link::Link;
pub use pagination::{navigation_links, PageInfo, SortCriterion, SortDirection};
pub use template::{
    BoundValues, ParamValue, Params, QueryVar, RenderOptions, TemplateExpander, TemplatePart,
    UriTemplate,
};
