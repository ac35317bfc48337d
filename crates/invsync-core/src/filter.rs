//! Vendor filter-expression translation
//!
//! Callers pass filters as the vendor query-language string, e.g.
//! `and(siteName=HQ, vendor=cisco)`. The string is translated here into
//! the JSON filter object the remote API expects:
//!
//! ```json
//! {"and": [{"siteName": ["eq", "HQ"]}, {"vendor": ["eq", "cisco"]}]}
//! ```
//!
//! Translation fails explicitly on malformed input; it never truncates a
//! partially parsed expression into a weaker filter.

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{Error, Result};

/// A translated filter, in the client's native JSON representation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Filter(Value);

impl Filter {
    /// Wrap an already-native JSON filter object
    ///
    /// For filters built programmatically (enrichment sub-queries); caller
    /// input goes through [`parse_filter`] instead.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Borrow the native JSON representation
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume into the native JSON representation
    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Translate a vendor filter string into a [`Filter`]
///
/// Accepted forms: a bare `field=value` term, or `and(...)` / `or(...)`
/// over comma-separated terms.
pub fn parse_filter(expr: &str) -> Result<Filter> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(Error::filter_syntax("empty filter expression"));
    }

    if let Some(rest) = strip_group(expr, "and") {
        return group_filter("and", rest);
    }
    if let Some(rest) = strip_group(expr, "or") {
        return group_filter("or", rest);
    }

    // Bare single term
    let term = parse_term(expr)?;
    Ok(Filter(json!({ "and": [term] })))
}

/// Strip `op( ... )` and return the inner term list, if `expr` is that group
fn strip_group<'a>(expr: &'a str, op: &str) -> Option<&'a str> {
    let rest = expr.strip_prefix(op)?.trim_start();
    let inner = rest.strip_prefix('(')?;
    inner.strip_suffix(')')
}

fn group_filter(op: &str, inner: &str) -> Result<Filter> {
    let inner = inner.trim();
    if inner.is_empty() {
        return Err(Error::filter_syntax(format!("{op}() with no terms")));
    }

    let terms = inner
        .split(',')
        .map(parse_term)
        .collect::<Result<Vec<_>>>()?;

    Ok(Filter(json!({ op: terms })))
}

/// Parse one `field=value` term into `{"field": ["eq", "value"]}`
fn parse_term(term: &str) -> Result<Value> {
    let term = term.trim();
    let (field, value) = term
        .split_once('=')
        .ok_or_else(|| Error::filter_syntax(format!("term missing '=': {term:?}")))?;

    let field = field.trim();
    let value = value.trim();
    if field.is_empty() {
        return Err(Error::filter_syntax(format!("term missing field name: {term:?}")));
    }
    if value.is_empty() {
        return Err(Error::filter_syntax(format!("term missing value: {term:?}")));
    }
    if value.contains('(') || value.contains(')') {
        return Err(Error::filter_syntax(format!("nested groups are not supported: {term:?}")));
    }

    Ok(json!({ field: ["eq", value] }))
}
