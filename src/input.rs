//! Ingestion shapes for bulk node and hyperedge loading.
//!
//! Heterogeneous bulk input is resolved into the explicit tagged types
//! [`EdgeInput`] and [`NodeInput`] before any mutation happens. Typed callers
//! build them through the constructor helpers; loose JSON data goes through
//! [`EdgeInput::from_value`]/[`NodeInput::from_value`], which classify each
//! item by structure alone and reject anything ambiguous.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attrs::Attrs;
use crate::error::{HypergraphError, Result};
use crate::ids::{EdgeId, Id, NodeId};

/// One hyperedge to add, in any of the four accepted shapes.
///
/// The tail and head member lists keep the caller's order; duplicates within
/// a side collapse when the edge is installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeInput {
    /// `(tail, head)`; the edge id is assigned automatically.
    Members(Vec<NodeId>, Vec<NodeId>),
    /// `((tail, head), id)` with an explicit edge id.
    WithId(Vec<NodeId>, Vec<NodeId>, EdgeId),
    /// `((tail, head), attrs)`; auto-assigned id plus edge attributes.
    WithAttrs(Vec<NodeId>, Vec<NodeId>, Attrs),
    /// `((tail, head), id, attrs)` with both explicit.
    Full(Vec<NodeId>, Vec<NodeId>, EdgeId, Attrs),
}

pub(crate) fn collect_ids<I>(ids: I) -> Vec<NodeId>
where
    I: IntoIterator,
    I::Item: Into<NodeId>,
{
    ids.into_iter().map(Into::into).collect()
}

impl EdgeInput {
    /// Builds a [`EdgeInput::Members`] item from any id-convertible iterables.
    pub fn members<T, H>(tail: T, head: H) -> Self
    where
        T: IntoIterator,
        T::Item: Into<NodeId>,
        H: IntoIterator,
        H::Item: Into<NodeId>,
    {
        EdgeInput::Members(collect_ids(tail), collect_ids(head))
    }

    /// Builds a [`EdgeInput::WithId`] item.
    pub fn with_id<T, H>(tail: T, head: H, id: impl Into<EdgeId>) -> Self
    where
        T: IntoIterator,
        T::Item: Into<NodeId>,
        H: IntoIterator,
        H::Item: Into<NodeId>,
    {
        EdgeInput::WithId(collect_ids(tail), collect_ids(head), id.into())
    }

    /// Builds a [`EdgeInput::WithAttrs`] item.
    pub fn with_attrs<T, H>(tail: T, head: H, attrs: Attrs) -> Self
    where
        T: IntoIterator,
        T::Item: Into<NodeId>,
        H: IntoIterator,
        H::Item: Into<NodeId>,
    {
        EdgeInput::WithAttrs(collect_ids(tail), collect_ids(head), attrs)
    }

    /// Builds a [`EdgeInput::Full`] item.
    pub fn full<T, H>(tail: T, head: H, id: impl Into<EdgeId>, attrs: Attrs) -> Self
    where
        T: IntoIterator,
        T::Item: Into<NodeId>,
        H: IntoIterator,
        H::Item: Into<NodeId>,
    {
        EdgeInput::Full(collect_ids(tail), collect_ids(head), id.into(), attrs)
    }

    /// Splits into `(tail, head, explicit id, attrs)`.
    pub fn into_parts(self) -> (Vec<NodeId>, Vec<NodeId>, Option<EdgeId>, Attrs) {
        match self {
            EdgeInput::Members(tail, head) => (tail, head, None, Attrs::default()),
            EdgeInput::WithId(tail, head, id) => (tail, head, Some(id), Attrs::default()),
            EdgeInput::WithAttrs(tail, head, attrs) => (tail, head, None, attrs),
            EdgeInput::Full(tail, head, id, attrs) => (tail, head, Some(id), attrs),
        }
    }

    /// Classifies one loose item by structure.
    ///
    /// An item must be an array of two or three elements. Three elements is
    /// always `((tail, head), id, attrs)`. For two elements the second one
    /// decides: an object is this edge's attribute map, an id scalar is its
    /// explicit id, and an array makes the whole item a plain
    /// `(tail, head)` pair. Objects in item or member position are rejected,
    /// since tail/head roles cannot be recovered from an unordered container.
    ///
    /// # Example
    /// ```rust
    /// use dihypergraph::input::EdgeInput;
    /// use serde_json::json;
    ///
    /// let item = EdgeInput::from_value(&json!([[[1, 2], [3]], "e1"]))?;
    /// assert_eq!(item, EdgeInput::with_id([1u64, 2], [3u64], "e1"));
    /// # Ok::<(), dihypergraph::HypergraphError>(())
    /// ```
    pub fn from_value(item: &Value) -> Result<EdgeInput> {
        let Value::Array(parts) = item else {
            return Err(HypergraphError::MalformedEdgeItem(format!(
                "expected an array, found {}",
                value_kind(item)
            )));
        };
        match parts.as_slice() {
            [first, second] => {
                if let Some(attrs) = as_attrs(second) {
                    let (tail, head) = parse_pair(first)?;
                    Ok(EdgeInput::WithAttrs(tail, head, attrs))
                } else if matches!(second, Value::String(_) | Value::Number(_)) {
                    let (tail, head) = parse_pair(first)?;
                    let id = Id::try_from(second)?;
                    Ok(EdgeInput::WithId(tail, head, EdgeId::from(id)))
                } else {
                    Ok(EdgeInput::Members(
                        parse_members(first)?,
                        parse_members(second)?,
                    ))
                }
            }
            [pair, id, attrs] => {
                let (tail, head) = parse_pair(pair)?;
                let id = Id::try_from(id)?;
                let attrs = as_attrs(attrs).ok_or_else(|| {
                    HypergraphError::MalformedEdgeItem(format!(
                        "third element must be an attribute map, found {}",
                        value_kind(attrs)
                    ))
                })?;
                Ok(EdgeInput::Full(tail, head, EdgeId::from(id), attrs))
            }
            parts => Err(HypergraphError::MalformedEdgeItem(format!(
                "expected 2 or 3 elements, found {}",
                parts.len()
            ))),
        }
    }
}

/// One node to add: a bare id or an id with attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeInput {
    Plain(NodeId),
    WithAttrs(NodeId, Attrs),
}

impl NodeInput {
    pub fn plain(id: impl Into<NodeId>) -> Self {
        NodeInput::Plain(id.into())
    }

    pub fn with_attrs(id: impl Into<NodeId>, attrs: Attrs) -> Self {
        NodeInput::WithAttrs(id.into(), attrs)
    }

    /// Splits into `(id, attrs)`.
    pub fn into_parts(self) -> (NodeId, Attrs) {
        match self {
            NodeInput::Plain(id) => (id, Attrs::default()),
            NodeInput::WithAttrs(id, attrs) => (id, attrs),
        }
    }

    /// Classifies one loose item: a bare id scalar, `[id]`, or `[id, attrs]`.
    pub fn from_value(item: &Value) -> Result<NodeInput> {
        match item {
            Value::Array(parts) => match parts.as_slice() {
                [id] => Ok(NodeInput::Plain(Id::try_from(id)?.into())),
                [id, attrs] => {
                    let id = Id::try_from(id)?;
                    let attrs = as_attrs(attrs).ok_or_else(|| {
                        HypergraphError::MalformedNodeItem(format!(
                            "second element must be an attribute map, found {}",
                            value_kind(attrs)
                        ))
                    })?;
                    Ok(NodeInput::WithAttrs(NodeId::from(id), attrs))
                }
                parts => Err(HypergraphError::MalformedNodeItem(format!(
                    "expected 1 or 2 elements, found {}",
                    parts.len()
                ))),
            },
            scalar => Ok(NodeInput::Plain(Id::try_from(scalar)?.into())),
        }
    }
}

/// Parses a `(tail, head)` pair: an array of exactly two member arrays.
pub(crate) fn parse_pair(value: &Value) -> Result<(Vec<NodeId>, Vec<NodeId>)> {
    match value {
        Value::Array(sides) if sides.len() == 2 => {
            Ok((parse_members(&sides[0])?, parse_members(&sides[1])?))
        }
        Value::Array(sides) => Err(HypergraphError::MalformedEdgeItem(format!(
            "tail/head pair must have exactly 2 elements, found {}",
            sides.len()
        ))),
        other => Err(HypergraphError::MalformedEdgeItem(format!(
            "tail/head pair must be an array, found {}",
            value_kind(other)
        ))),
    }
}

/// Parses one side's member collection: an array of id scalars.
fn parse_members(value: &Value) -> Result<Vec<NodeId>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|v| Id::try_from(v).map(NodeId::from))
            .collect(),
        other => Err(HypergraphError::MalformedEdgeItem(format!(
            "members must be an array of identifiers, found {}",
            value_kind(other)
        ))),
    }
}

/// Converts a JSON object into an [`Attrs`] map; `None` for anything else.
fn as_attrs(value: &Value) -> Option<Attrs> {
    value.as_object().map(|map| {
        map.iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<Attrs>()
    })
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}


#[cfg(test)]
mod node_item_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_and_wrapped_ids() {
        assert_eq!(
            NodeInput::from_value(&json!(5)).unwrap(),
            NodeInput::plain(5u64)
        );
        assert_eq!(
            NodeInput::from_value(&json!(["a"])).unwrap(),
            NodeInput::plain("a")
        );
    }

    #[test]
    fn id_with_attributes() {
        let item = NodeInput::from_value(&json!([1, {"color": "red"}])).unwrap();
        let NodeInput::WithAttrs(id, attrs) = item else {
            panic!("expected the attribute shape");
        };
        assert_eq!(id, NodeId::from(1u64));
        assert_eq!(attrs["color"], json!("red"));
    }

    #[test]
    fn malformed_node_items() {
        assert!(matches!(
            NodeInput::from_value(&json!([1, 2])),
            Err(HypergraphError::MalformedNodeItem(_))
        ));
        assert!(matches!(
            NodeInput::from_value(&json!([])),
            Err(HypergraphError::MalformedNodeItem(_))
        ));
        assert!(matches!(
            NodeInput::from_value(&json!(null)),
            Err(HypergraphError::IdTypeMismatch { .. })
        ));
    }
}
