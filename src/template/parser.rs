// Template parser using a single-pass scanner

use crate::template::ast::{QueryVar, TemplatePart, UriTemplate};

/// Tokenizes a template string into literal runs and substitution
/// expressions.
///
/// Parsing is total: a brace run that does not match the expression
/// grammar (`{name}` or `{?a,b*,...}` with names over `[A-Za-z0-9_]`)
/// stays literal text, including unbalanced braces.
pub struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    pub fn parse(template: &str) -> UriTemplate {
        let mut parser = TemplateParser {
            input: template,
            pos: 0,
        };
        let parts = parser.parse_parts();
        UriTemplate::new(template.to_string(), parts)
    }

    fn parse_parts(&mut self) -> Vec<TemplatePart> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        while let Some(ch) = self.peek_char() {
            if ch == '{' {
                if let Some(part) = self.try_parse_expression() {
                    if !literal_buf.is_empty() {
                        parts.push(TemplatePart::Literal(literal_buf.clone()));
                        literal_buf.clear();
                    }
                    parts.push(part);
                    continue;
                }
                // Not a recognized expression; the brace is literal text
                // and scanning resumes right after it.
            }
            literal_buf.push(ch);
            self.pos += ch.len_utf8();
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        parts
    }

    /// Attempts to parse a complete expression at the current `{`.
    /// Restores the position and returns None when the run is not a
    /// valid expression.
    fn try_parse_expression(&mut self) -> Option<TemplatePart> {
        let start = self.pos;
        self.bump(); // consume {

        let part = if self.peek_char() == Some('?') {
            self.bump();
            self.parse_query_vars().map(TemplatePart::QueryBlock)
        } else {
            self.parse_name().map(TemplatePart::PathVar)
        };

        let part = part.filter(|_| self.eat_char('}'));
        if part.is_none() {
            self.pos = start;
        }
        part
    }

    /// Parses the comma-separated member list of a query expression,
    /// each member optionally carrying a trailing explode marker.
    fn parse_query_vars(&mut self) -> Option<Vec<QueryVar>> {
        let mut vars = Vec::new();

        loop {
            let name = self.parse_name()?;
            let exploded = self.eat_char('*');
            vars.push(QueryVar { name, exploded });

            if !self.eat_char(',') {
                break;
            }
        }

        Some(vars)
    }

    fn parse_name(&mut self) -> Option<String> {
        let mut name = String::new();

        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                name.push(ch);
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }

        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_only() {
        let template = TemplateParser::parse("/users/all");
        assert_eq!(
            template.parts(),
            &[TemplatePart::Literal("/users/all".to_string())]
        );
        assert!(!template.is_templated());
    }

    #[test]
    fn test_parse_simple_variable() {
        let template = TemplateParser::parse("/users/{userId}");
        assert_eq!(
            template.parts(),
            &[
                TemplatePart::Literal("/users/".to_string()),
                TemplatePart::PathVar("userId".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_multiple_path_variables() {
        let template = TemplateParser::parse("/{page}/{author}/{repo}");
        assert_eq!(template.path_variables(), vec!["page", "author", "repo"]);
    }

    #[test]
    fn test_parse_query_expression() {
        let template = TemplateParser::parse("/users{?limit,page}");
        match &template.parts()[1] {
            TemplatePart::QueryBlock(vars) => {
                assert_eq!(vars.len(), 2);
                assert_eq!(vars[0].name, "limit");
                assert!(!vars[0].exploded);
                assert_eq!(vars[1].name, "page");
            }
            other => panic!("Expected query block, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_explode_marker() {
        let template = TemplateParser::parse("/find{?tag*,page}");
        match &template.parts()[1] {
            TemplatePart::QueryBlock(vars) => {
                assert!(vars[0].exploded);
                assert!(!vars[1].exploded);
            }
            other => panic!("Expected query block, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_brace_is_literal() {
        let template = TemplateParser::parse("/users/{userId");
        assert_eq!(
            template.parts(),
            &[TemplatePart::Literal("/users/{userId".to_string())]
        );
        assert!(!template.is_templated());
    }

    #[test]
    fn test_empty_expression_is_literal() {
        let template = TemplateParser::parse("/search?q={}");
        assert_eq!(
            template.parts(),
            &[TemplatePart::Literal("/search?q={}".to_string())]
        );
    }

    #[test]
    fn test_invalid_name_characters_are_literal() {
        let template = TemplateParser::parse("/users/{user id}");
        assert!(!template.is_templated());
    }

    #[test]
    fn test_empty_query_expression_is_literal() {
        let template = TemplateParser::parse("/users{?}");
        assert!(!template.is_templated());
    }

    #[test]
    fn test_trailing_comma_in_query_block_is_literal() {
        let template = TemplateParser::parse("/users{?a,}");
        assert!(!template.is_templated());
    }

    #[test]
    fn test_malformed_brace_before_valid_expression() {
        let template = TemplateParser::parse("/{bad value}/{good}");
        assert_eq!(template.path_variables(), vec!["good"]);
        assert_eq!(
            template.parts()[0],
            TemplatePart::Literal("/{bad value}/".to_string())
        );
    }

    #[test]
    fn test_explode_marker_on_path_variable_is_literal() {
        let template = TemplateParser::parse("/users/{id*}");
        assert!(!template.is_templated());
    }

    #[test]
    fn test_unicode_literals_pass_through() {
        let template = TemplateParser::parse("/café/{id}");
        assert_eq!(
            template.parts()[0],
            TemplatePart::Literal("/café/".to_string())
        );
        assert_eq!(template.path_variables(), vec!["id"]);
    }
}
