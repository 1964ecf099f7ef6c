//! Parsed filter trees and their evaluation against GeoJSON features.
//!
//! The accepted language is the style-spec "legacy" filter syntax:
//!
//! ```text
//! filter  := null | true | false
//!          | [cmp, key, value]          cmp ∈ == != < <= > >=
//!          | ["in" | "!in", key, v...]
//!          | ["has" | "!has", key]
//!          | ["all" | "any" | "none", filter...]
//! key     := "$type" | "$id" | <property name>
//! ```

use crate::error::{value_type_name, FilterError, FilterResult};
use crate::FilterSpec;
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;

/// What a filter operand refers to on a feature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// `$type`: the geometry type, with `Multi*` folded into its base type.
    GeometryType,
    /// `$id`: the feature's top-level `id`.
    Id,
    /// A key in the feature's `properties` object.
    Property(String),
}

impl Key {
    fn parse(raw: &Value) -> FilterResult<Self> {
        match raw {
            Value::String(s) => Ok(match s.as_str() {
                "$type" => Key::GeometryType,
                "$id" => Key::Id,
                _ => Key::Property(s.clone()),
            }),
            other => Err(FilterError::InvalidKey {
                found: value_type_name(other),
            }),
        }
    }

    fn lookup<'a>(&self, feature: &'a Value) -> Option<Cow<'a, Value>> {
        match self {
            Key::GeometryType => Some(Cow::Owned(Value::String(
                geometry_type(feature).to_string(),
            ))),
            Key::Id => feature
                .get("id")
                .filter(|id| !id.is_null())
                .map(Cow::Borrowed),
            Key::Property(name) => feature
                .get("properties")
                .and_then(|props| props.get(name))
                .map(Cow::Borrowed),
        }
    }
}

/// Comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CompareOp {
    fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "==" => CompareOp::Eq,
            "!=" => CompareOp::Ne,
            "<" => CompareOp::Lt,
            "<=" => CompareOp::Le,
            ">" => CompareOp::Gt,
            ">=" => CompareOp::Ge,
            _ => return None,
        })
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

/// A parsed filter predicate.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// Constant result.
    Literal(bool),
    /// `[op, key, value]`
    Compare {
        /// Comparison operator.
        op: CompareOp,
        /// Left-hand side.
        key: Key,
        /// Right-hand side literal.
        value: Value,
    },
    /// `["in", key, ...values]` or `["!in", key, ...values]`
    Membership {
        /// True for `!in`.
        negated: bool,
        /// Looked-up operand.
        key: Key,
        /// Candidate values.
        values: Vec<Value>,
    },
    /// `["has", key]` or `["!has", key]`
    Has {
        /// True for `!has`.
        negated: bool,
        /// Key whose presence is tested.
        key: Key,
    },
    /// Every child matches.
    All(Vec<Filter>),
    /// At least one child matches.
    Any(Vec<Filter>),
    /// No child matches.
    None(Vec<Filter>),
}

impl Filter {
    /// Parse a raw JSON filter.
    ///
    /// `null` parses to a filter that accepts everything.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapstyle_filter::Filter;
    /// use serde_json::json;
    ///
    /// let filter = Filter::parse(&json!(["all", ["has", "name"], [">", "pop", 1000]])).unwrap();
    /// assert!(filter.evaluate(&json!({"properties": {"name": "A", "pop": 5000}})));
    /// assert!(!filter.evaluate(&json!({"properties": {"name": "B", "pop": 10}})));
    /// ```
    pub fn parse(raw: &Value) -> FilterResult<Self> {
        match raw {
            Value::Null => Ok(Filter::Literal(true)),
            Value::Bool(b) => Ok(Filter::Literal(*b)),
            Value::Array(items) => parse_expression(items),
            other => Err(FilterError::invalid_filter(format!(
                "expected array, boolean or null, found {}",
                value_type_name(other)
            ))),
        }
    }

    /// Parse a [`FilterSpec`].
    #[inline]
    pub fn from_spec(spec: &FilterSpec) -> FilterResult<Self> {
        Self::parse(spec.as_value())
    }

    /// Evaluate this filter against a single GeoJSON feature.
    pub fn evaluate(&self, feature: &Value) -> bool {
        match self {
            Filter::Literal(result) => *result,
            Filter::Compare { op, key, value } => {
                let actual = key.lookup(feature);
                match op {
                    CompareOp::Eq => actual.is_some_and(|a| strict_eq(&a, value)),
                    CompareOp::Ne => !actual.is_some_and(|a| strict_eq(&a, value)),
                    ordered => actual
                        .and_then(|a| compare(&a, value))
                        .is_some_and(|ordering| ordered.accepts(ordering)),
                }
            }
            Filter::Membership {
                negated,
                key,
                values,
            } => {
                let found = key
                    .lookup(feature)
                    .is_some_and(|a| values.iter().any(|v| strict_eq(&a, v)));
                found != *negated
            }
            Filter::Has { negated, key } => {
                let present = match key {
                    Key::GeometryType => true,
                    other => other.lookup(feature).is_some(),
                };
                present != *negated
            }
            Filter::All(children) => children.iter().all(|f| f.evaluate(feature)),
            Filter::Any(children) => children.iter().any(|f| f.evaluate(feature)),
            Filter::None(children) => !children.iter().any(|f| f.evaluate(feature)),
        }
    }
}

fn parse_expression(items: &[Value]) -> FilterResult<Filter> {
    let (op, operands) = match items.split_first() {
        Some((Value::String(op), rest)) => (op.as_str(), rest),
        Some((other, _)) => {
            return Err(FilterError::invalid_filter(format!(
                "operator must be a string, found {}",
                value_type_name(other)
            )))
        }
        None => return Err(FilterError::invalid_filter("empty filter expression")),
    };

    match op {
        "all" => Ok(Filter::All(parse_children(operands)?)),
        "any" => Ok(Filter::Any(parse_children(operands)?)),
        "none" => Ok(Filter::None(parse_children(operands)?)),
        "in" | "!in" => {
            let Some((key, values)) = operands.split_first() else {
                return Err(FilterError::invalid_arity(op, "at least 1", 0));
            };
            Ok(Filter::Membership {
                negated: op == "!in",
                key: Key::parse(key)?,
                values: values.to_vec(),
            })
        }
        "has" | "!has" => {
            let [key] = operands else {
                return Err(FilterError::invalid_arity(op, "1", operands.len()));
            };
            Ok(Filter::Has {
                negated: op == "!has",
                key: Key::parse(key)?,
            })
        }
        symbol => {
            let Some(cmp) = CompareOp::from_symbol(symbol) else {
                return Err(FilterError::UnknownOperator(symbol.to_string()));
            };
            let [key, value] = operands else {
                return Err(FilterError::invalid_arity(symbol, "2", operands.len()));
            };
            Ok(Filter::Compare {
                op: cmp,
                key: Key::parse(key)?,
                value: value.clone(),
            })
        }
    }
}

fn parse_children(operands: &[Value]) -> FilterResult<Vec<Filter>> {
    operands.iter().map(Filter::parse).collect()
}

/// Geometry type as seen by filters.
fn geometry_type(feature: &Value) -> &'static str {
    let raw = feature
        .get("geometry")
        .and_then(|g| g.get("type"))
        .and_then(Value::as_str);
    match raw {
        Some("Point" | "MultiPoint") => "Point",
        Some("LineString" | "MultiLineString") => "LineString",
        Some("Polygon" | "MultiPolygon") => "Polygon",
        _ => "Unknown",
    }
}

/// Same JSON type and equal value; numbers compare numerically.
fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Ordering is only defined between two numbers or two strings.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(props: Value) -> Value {
        json!({
            "type": "Feature",
            "id": 7,
            "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
            "properties": props
        })
    }

    #[test]
    fn test_null_and_literals() {
        let f = point(json!({}));
        assert!(Filter::parse(&json!(null)).unwrap().evaluate(&f));
        assert!(Filter::parse(&json!(true)).unwrap().evaluate(&f));
        assert!(!Filter::parse(&json!(false)).unwrap().evaluate(&f));
    }

    #[test]
    fn test_equality_is_type_strict() {
        let f = point(json!({"n": 1, "s": "1"}));
        assert!(Filter::parse(&json!(["==", "n", 1])).unwrap().evaluate(&f));
        assert!(Filter::parse(&json!(["==", "n", 1.0])).unwrap().evaluate(&f));
        assert!(!Filter::parse(&json!(["==", "n", "1"])).unwrap().evaluate(&f));
        assert!(!Filter::parse(&json!(["==", "s", 1])).unwrap().evaluate(&f));
    }

    #[test]
    fn test_not_equal_on_missing_property() {
        let f = point(json!({}));
        assert!(Filter::parse(&json!(["!=", "missing", 1])).unwrap().evaluate(&f));
        assert!(!Filter::parse(&json!(["==", "missing", 1])).unwrap().evaluate(&f));
    }

    #[test]
    fn test_ordering_requires_matching_types() {
        let f = point(json!({"pop": 500, "name": "b"}));
        assert!(Filter::parse(&json!(["<", "pop", 1000])).unwrap().evaluate(&f));
        assert!(Filter::parse(&json!([">=", "pop", 500])).unwrap().evaluate(&f));
        assert!(!Filter::parse(&json!([">", "pop", "100"])).unwrap().evaluate(&f));
        assert!(Filter::parse(&json!([">", "name", "a"])).unwrap().evaluate(&f));
        assert!(!Filter::parse(&json!(["<=", "missing", 5])).unwrap().evaluate(&f));
    }

    #[test]
    fn test_special_keys() {
        let f = point(json!({}));
        assert!(Filter::parse(&json!(["==", "$type", "Point"])).unwrap().evaluate(&f));
        assert!(Filter::parse(&json!(["==", "$id", 7])).unwrap().evaluate(&f));
        assert!(Filter::parse(&json!(["has", "$id"])).unwrap().evaluate(&f));

        let multi = json!({"geometry": {"type": "MultiPolygon", "coordinates": []}});
        assert!(Filter::parse(&json!(["==", "$type", "Polygon"])).unwrap().evaluate(&multi));
        assert!(Filter::parse(&json!(["!has", "$id"])).unwrap().evaluate(&multi));
    }

    #[test]
    fn test_membership() {
        let f = point(json!({"class": "river"}));
        assert!(Filter::parse(&json!(["in", "class", "lake", "river"])).unwrap().evaluate(&f));
        assert!(!Filter::parse(&json!(["!in", "class", "lake", "river"])).unwrap().evaluate(&f));
        assert!(!Filter::parse(&json!(["in", "class"])).unwrap().evaluate(&f));
    }

    #[test]
    fn test_has_counts_null_properties() {
        let f = point(json!({"name": null}));
        assert!(Filter::parse(&json!(["has", "name"])).unwrap().evaluate(&f));
        assert!(Filter::parse(&json!(["!has", "other"])).unwrap().evaluate(&f));
    }

    #[test]
    fn test_combinators_on_empty_lists() {
        let f = point(json!({}));
        assert!(Filter::parse(&json!(["all"])).unwrap().evaluate(&f));
        assert!(!Filter::parse(&json!(["any"])).unwrap().evaluate(&f));
        assert!(Filter::parse(&json!(["none"])).unwrap().evaluate(&f));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Filter::parse(&json!(["within", "x"])).unwrap_err(),
            FilterError::UnknownOperator("within".into())
        );
        assert!(matches!(
            Filter::parse(&json!(["==", "x"])).unwrap_err(),
            FilterError::InvalidArity { found: 1, .. }
        ));
        assert!(matches!(
            Filter::parse(&json!(["has", 3])).unwrap_err(),
            FilterError::InvalidKey { found: "number" }
        ));
        assert!(matches!(
            Filter::parse(&json!("name")).unwrap_err(),
            FilterError::InvalidFilter { .. }
        ));
        assert!(Filter::parse(&json!([])).is_err());
        assert!(Filter::parse(&json!(["all", ["bogus"]])).is_err());
    }
}
