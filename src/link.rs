// Hypermedia link value type

use serde::{Deserialize, Serialize};

use crate::error::ExpandError;
use crate::template::{ParamValue, Params, UriTemplate};

/// Well-known IANA link relation names used by the pagination deriver.
pub mod rel {
    pub const SELF: &str = "self";
    pub const FIRST: &str = "first";
    pub const PREV: &str = "prev";
    pub const NEXT: &str = "next";
    pub const LAST: &str = "last";
}

/// An immutable hypermedia link.
///
/// `rel` is absent only before a relation has been assigned. Every
/// `with_*` builder consumes the link and returns a new value with the
/// unrelated fields untouched; `href` is never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
}

impl Link {
    /// A link to `href` with no relation assigned yet.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            rel: None,
            href: href.into(),
            title: None,
            name: None,
            media: None,
            media_type: None,
            deprecation: None,
            profile: None,
            hreflang: None,
        }
    }

    pub fn with_rel(self, rel: impl Into<String>) -> Self {
        Self {
            rel: Some(rel.into()),
            ..self
        }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..self
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn with_media(self, media: impl Into<String>) -> Self {
        Self {
            media: Some(media.into()),
            ..self
        }
    }

    pub fn with_media_type(self, media_type: impl Into<String>) -> Self {
        Self {
            media_type: Some(media_type.into()),
            ..self
        }
    }

    pub fn with_deprecation(self, deprecation: impl Into<String>) -> Self {
        Self {
            deprecation: Some(deprecation.into()),
            ..self
        }
    }

    pub fn with_profile(self, profile: impl Into<String>) -> Self {
        Self {
            profile: Some(profile.into()),
            ..self
        }
    }

    pub fn with_hreflang(self, hreflang: impl Into<String>) -> Self {
        Self {
            hreflang: Some(hreflang.into()),
            ..self
        }
    }

    /// Parses this link's href as a URI template.
    pub fn template(&self) -> UriTemplate {
        UriTemplate::parse(&self.href)
    }

    /// True iff the href contains at least one substitution point.
    pub fn is_templated(&self) -> bool {
        self.template().is_templated()
    }

    /// Expands the href against the supplied parameters, returning a new
    /// link with every other field unchanged.
    pub fn expand(&self, params: &Params) -> Result<Link, ExpandError> {
        let href = self.template().expand(params)?;
        Ok(Link {
            href,
            ..self.clone()
        })
    }

    pub fn expand_positional<I>(&self, values: I) -> Result<Link, ExpandError>
    where
        I: IntoIterator,
        I::Item: Into<ParamValue>,
    {
        self.expand(&Params::positional(values))
    }

    pub fn expand_named<I, K, V>(&self, entries: I) -> Result<Link, ExpandError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        self.expand(&Params::named(entries))
    }
}
