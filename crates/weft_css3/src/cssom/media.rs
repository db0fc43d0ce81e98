use crate::cssom::serialize_identifier;
use crate::cssom::value::ValueList;
use itertools::Itertools;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaRestrictor {
    None,
    Only,
    Not,
}

/// Media feature expression like `(min-width: 100px)` or `(color)`
#[derive(Debug, Clone, PartialEq)]
pub struct MediaExpression {
    pub feature: String,
    pub value: Option<ValueList>,
}

impl MediaExpression {
    pub fn css_text(&self) -> String {
        match &self.value {
            Some(value) => format!("({}: {})", self.feature, value.css_text()),
            None => format!("({})", self.feature),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    pub restrictor: MediaRestrictor,
    /// Lowercased media type. Empty when the query only consists of expressions.
    pub media_type: String,
    pub expressions: Vec<MediaExpression>,
}

impl MediaQuery {
    /// The query that replaces an invalid query inside a list
    pub fn not_all() -> Self {
        Self {
            restrictor: MediaRestrictor::Not,
            media_type: "all".to_string(),
            expressions: Vec::new(),
        }
    }

    pub fn css_text(&self) -> String {
        let mut parts = Vec::new();

        match self.restrictor {
            MediaRestrictor::Only => parts.push("only".to_string()),
            MediaRestrictor::Not => parts.push("not".to_string()),
            MediaRestrictor::None => {}
        }

        if !self.media_type.is_empty() {
            parts.push(serialize_identifier(&self.media_type));
        }

        for expression in &self.expressions {
            if !parts.is_empty() {
                parts.push("and".to_string());
            }
            parts.push(expression.css_text());
        }

        parts.join(" ")
    }
}

/// Comma separated list of media queries. An empty list matches all media.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaQueryList {
    pub queries: Vec<MediaQuery>,
}

impl MediaQueryList {
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn css_text(&self) -> String {
        self.queries.iter().map(|q| q.css_text()).join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cssom::value::CssValue;

    #[test]
    fn query_text() {
        let list = MediaQueryList {
            queries: vec![
                MediaQuery {
                    restrictor: MediaRestrictor::Only,
                    media_type: "screen".into(),
                    expressions: vec![
                        MediaExpression {
                            feature: "min-width".into(),
                            value: Some(ValueList::new(vec![CssValue::dimension(100.0, "px")])),
                        },
                        MediaExpression {
                            feature: "color".into(),
                            value: None,
                        },
                    ],
                },
                MediaQuery {
                    restrictor: MediaRestrictor::None,
                    media_type: String::new(),
                    expressions: vec![MediaExpression {
                        feature: "orientation".into(),
                        value: Some(ValueList::new(vec![CssValue::Ident("landscape".into())])),
                    }],
                },
                MediaQuery::not_all(),
            ],
        };

        assert_eq!(
            list.css_text(),
            "only screen and (min-width: 100px) and (color), (orientation: landscape), not all"
        );
    }
}
