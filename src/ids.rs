//! Identifier types for nodes and hyperedges.
//!
//! Node and hyperedge identifiers live in independent namespaces, enforced by
//! the [`NodeId`] and [`EdgeId`] newtypes around a shared [`Id`] value. An
//! [`Id`] is either a non-negative integer or a name; auto-assignment only
//! ever produces integers, tracked per namespace by [`IdAllocator`].
//!
//! This module provides:
//! - The [`Id`] value type with conversions from integers, strings, and loose
//!   [`serde_json::Value`] data.
//! - The [`NodeId`]/[`EdgeId`] newtypes with common trait implementations so
//!   they can be used in maps, sets, and printed easily.
//! - The [`IdAllocator`] high-water-mark counter behind auto-assigned ids.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HypergraphError;

/// A node or hyperedge identifier: a non-negative integer or a name.
///
/// Integer ids order before names so mixed-id collections sort
/// deterministically; within a variant the natural order applies.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Id {
    Int(u64),
    Name(String),
}

impl Id {
    /// Returns the integer value if this id is an integer.
    #[inline]
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Id::Int(n) => Some(*n),
            Id::Name(_) => None,
        }
    }

    /// Returns the name if this id is a name.
    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Id::Int(_) => None,
            Id::Name(s) => Some(s),
        }
    }

    /// Interprets a string map key as an id.
    ///
    /// Mapping inputs arrive with string keys even when the ids they encode
    /// are integers. A key in canonical integer form (digits only, no leading
    /// zero, in `u64` range) becomes [`Id::Int`]; anything else stays a name.
    ///
    /// # Example
    /// ```rust
    /// use dihypergraph::ids::Id;
    /// assert_eq!(Id::from_object_key("7"), Id::Int(7));
    /// assert_eq!(Id::from_object_key("007"), Id::Name("007".into()));
    /// assert_eq!(Id::from_object_key("e1"), Id::Name("e1".into()));
    /// ```
    pub fn from_object_key(key: &str) -> Id {
        let canonical = !key.is_empty()
            && key.bytes().all(|b| b.is_ascii_digit())
            && (key == "0" || !key.starts_with('0'));
        if canonical {
            if let Ok(n) = key.parse::<u64>() {
                return Id::Int(n);
            }
        }
        Id::Name(key.to_owned())
    }
}

impl From<u64> for Id {
    #[inline]
    fn from(n: u64) -> Self {
        Id::Int(n)
    }
}

impl From<&str> for Id {
    #[inline]
    fn from(s: &str) -> Self {
        Id::Name(s.to_owned())
    }
}

impl From<String> for Id {
    #[inline]
    fn from(s: String) -> Self {
        Id::Name(s)
    }
}

/// Coercion from loose JSON data, used by the structural ingestion layer.
///
/// Only non-negative integers and strings can act as identifiers; anything
/// else fails with [`HypergraphError::IdTypeMismatch`], which is distinct
/// from the not-found errors raised for ids that are merely unknown.
impl TryFrom<&Value> for Id {
    type Error = HypergraphError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        const EXPECTED: &str = "a non-negative integer or a string";
        let found = match value {
            Value::String(s) => return Ok(Id::Name(s.clone())),
            Value::Number(n) => match n.as_u64() {
                Some(u) => return Ok(Id::Int(u)),
                None if n.is_i64() => "negative integer",
                None => "fractional number",
            },
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        Err(HypergraphError::IdTypeMismatch {
            expected: EXPECTED,
            found,
        })
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{n}"),
            Id::Name(s) => write!(f, "{s:?}"),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{n}"),
            Id::Name(s) => write!(f, "{s}"),
        }
    }
}

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Id);

        impl $name {
            /// Wraps any id-convertible value.
            #[inline]
            pub fn new(id: impl Into<Id>) -> Self {
                $name(id.into())
            }

            /// Borrows the underlying id value.
            #[inline]
            pub fn id(&self) -> &Id {
                &self.0
            }

            /// Unwraps into the underlying id value.
            #[inline]
            pub fn into_id(self) -> Id {
                self.0
            }
        }

        impl From<Id> for $name {
            #[inline]
            fn from(id: Id) -> Self {
                $name(id)
            }
        }

        impl From<u64> for $name {
            #[inline]
            fn from(n: u64) -> Self {
                $name(Id::Int(n))
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(s: &str) -> Self {
                $name(Id::Name(s.to_owned()))
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(s: String) -> Self {
                $name(Id::Name(s))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype! {
    /// Identifier of a node. Distinct from [`EdgeId`] at the type level, so
    /// the two namespaces cannot be mixed up.
    NodeId
}

id_newtype! {
    /// Identifier of a directed hyperedge.
    EdgeId
}

/// High-water-mark counter behind auto-assigned integer ids.
///
/// The counter never decreases and observed ids are never handed out again,
/// even after the entity they named is removed. String ids do not affect the
/// counter.
///
/// # Example
/// ```rust
/// use dihypergraph::ids::{Id, IdAllocator};
/// let mut uid = IdAllocator::new();
/// uid.observe(&Id::Int(4));
/// uid.observe(&Id::Name("e1".into()));
/// assert_eq!(uid.peek(), 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Creates a counter starting at zero.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a counter that will hand out `next` as its next id, used when
    /// restoring a serialized structure.
    #[inline]
    pub fn starting_at(next: u64) -> Self {
        IdAllocator { next }
    }

    /// Returns the next unused integer id without advancing the counter.
    /// Advancement happens when the id is committed via [`observe`](Self::observe).
    #[inline]
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Records that `id` is in use, advancing the counter past it when `id`
    /// is an integer at or above the current value.
    #[inline]
    pub fn observe(&mut self, id: &Id) {
        if let Id::Int(n) = id {
            if *n >= self.next {
                self.next = n.saturating_add(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Id::from(5u64), Id::Int(5));
        assert_eq!(Id::from("a"), Id::Name("a".into()));
        assert_eq!(NodeId::from(5u64).id(), &Id::Int(5));
        assert_eq!(EdgeId::from("e1").into_id(), Id::Name("e1".into()));
        assert_eq!(NodeId::new("x"), NodeId::from(String::from("x")));
    }

    #[test]
    fn debug_and_display() {
        let n = NodeId::from(7u64);
        assert_eq!(format!("{n:?}"), "NodeId(7)");
        assert_eq!(format!("{n}"), "7");
        let e = EdgeId::from("e1");
        assert_eq!(format!("{e:?}"), "EdgeId(\"e1\")");
        assert_eq!(format!("{e}"), "e1");
    }

    #[test]
    fn integers_order_before_names() {
        let mut ids = vec![Id::from("a"), Id::from(10u64), Id::from(2u64)];
        ids.sort();
        assert_eq!(ids, vec![Id::Int(2), Id::Int(10), Id::Name("a".into())]);
    }

    #[test]
    fn object_key_coercion() {
        assert_eq!(Id::from_object_key("0"), Id::Int(0));
        assert_eq!(Id::from_object_key("42"), Id::Int(42));
        assert_eq!(Id::from_object_key(""), Id::Name("".into()));
        assert_eq!(Id::from_object_key("-1"), Id::Name("-1".into()));
        assert_eq!(Id::from_object_key("1.5"), Id::Name("1.5".into()));
        // Out of u64 range stays a name rather than wrapping.
        assert_eq!(
            Id::from_object_key("99999999999999999999999999"),
            Id::Name("99999999999999999999999999".into())
        );
    }

    #[test]
    fn value_coercion() {
        use serde_json::json;
        assert_eq!(Id::try_from(&json!(3)).unwrap(), Id::Int(3));
        assert_eq!(Id::try_from(&json!("e1")).unwrap(), Id::Name("e1".into()));
        for bad in [json!(null), json!(true), json!(-2), json!(1.5), json!([1]), json!({})] {
            assert!(matches!(
                Id::try_from(&bad),
                Err(HypergraphError::IdTypeMismatch { .. })
            ));
        }
    }
}
