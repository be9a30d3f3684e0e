// Context-sensitive value encoding

use url::form_urlencoded;

use crate::template::binder::ParamValue;

/// Percent-encodes a scalar for use inside a path segment. Reserved
/// delimiters are escaped; space renders as `%20`.
pub(crate) fn encode_path(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Form-encodes a scalar for use inside a query value. Same escaped
/// class as the path context, but space renders as `+`.
pub(crate) fn encode_query(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Renders one bound query variable as its assignment text.
///
/// Collections render exploded (`name=v1&name=v2`) when requested,
/// otherwise as a single comma-joined assignment with each element
/// encoded individually. An empty collection renders to nothing.
pub(crate) fn render_query_var(name: &str, value: &ParamValue, exploded: bool) -> String {
    match value {
        ParamValue::Scalar(v) => format!("{}={}", name, encode_query(v)),
        ParamValue::List(items) if exploded => items
            .iter()
            .map(|v| format!("{}={}", name, encode_query(v)))
            .collect::<Vec<_>>()
            .join("&"),
        ParamValue::List(items) => {
            if items.is_empty() {
                String::new()
            } else {
                let joined = items
                    .iter()
                    .map(|v| encode_query(v))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{}={}", name, joined)
            }
        }
    }
}
