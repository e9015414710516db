//! Naming of expanded rows.
//!
//! Each row of a parameterized declaration is reported as
//! `"<declaration>: <label>"`. The label is the row's 1-based ordinal unless the
//! declaration carries a [`LabelTemplate`], in which case the datum's values are
//! substituted into it by position.

use std::fmt;
use std::str::FromStr;

use crate::datum::AnyDatum;
use crate::errors::VargaError;

/// Separator between the declaration name and the row label.
pub const LABEL_SEPARATOR: &str = ": ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder { index: usize, start: usize, len: usize },
}

/// A parsed positional label template such as `"length of '{0}'"`.
///
/// `{n}` is replaced by the n-th value of the datum (0-based). `{{` and `}}`
/// produce literal braces. Anything else is copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl LabelTemplate {
    pub fn parse(source: &str) -> Result<Self, VargaError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            match ch {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(VargaError::malformed(source, pos, 1, "unmatched `}`")),
                '{' => {
                    let body_start = pos + 1;
                    let close = source[body_start..]
                        .find('}')
                        .map(|offset| body_start + offset)
                        .ok_or_else(|| {
                            VargaError::malformed(source, pos, source.len() - pos, "unclosed placeholder")
                        })?;
                    let body = &source[body_start..close];
                    let len = close + 1 - pos;
                    if body.is_empty() {
                        return Err(VargaError::malformed(source, pos, len, "empty placeholder"));
                    }
                    if !body.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(VargaError::malformed(
                            source,
                            pos,
                            len,
                            format!("placeholder `{{{}}}` is not a value index", body),
                        ));
                    }
                    let index = body
                        .parse::<usize>()
                        .map_err(|_| VargaError::malformed(source, pos, len, "placeholder index is too large"))?;

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder { index, start: pos, len });
                    while chars.peek().is_some_and(|(next, _)| *next <= close) {
                        chars.next();
                    }
                }
                _ => literal.push(ch),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template text as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Highest placeholder index used, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder { index, .. } => Some(*index),
                Segment::Literal(_) => None,
            })
            .max()
    }

    /// Substitutes `values` into the template.
    ///
    /// Fails on the first placeholder with no corresponding value.
    pub fn render(&self, values: &[String]) -> Result<String, VargaError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { index, start, len } => {
                    let value = values.get(*index).ok_or_else(|| {
                        VargaError::out_of_range(&self.source, *start, *len, *index, values.len())
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl FromStr for LabelTemplate {
    type Err = VargaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LabelTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Computes the label of one row.
///
/// Without a template the label is `ordinal` in decimal.
pub fn resolve(
    template: Option<&LabelTemplate>,
    datum: &dyn AnyDatum,
    ordinal: usize,
) -> Result<String, VargaError> {
    match template {
        None => Ok(ordinal.to_string()),
        Some(template) => template.render(&datum.labels()),
    }
}

/// The reported identity of a row: `declaration + ": " + label`.
pub fn display_name(declaration: &str, label: &str) -> String {
    format!("{}{}{}", declaration, LABEL_SEPARATOR, label)
}
