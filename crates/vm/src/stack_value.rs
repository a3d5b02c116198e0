//! `StackValue`: the tagged value universe the VM pushes and pops, and
//! that the codec in [`crate::codec`] (de)serializes deterministically.

use crate::error::{VmError, VmResult};
use crate::interop_handle::InteropHandle;
use num_bigint::BigInt;
use num_traits::Zero;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared, mutable backing storage for `Array`/`Struct`, identified by
/// pointer for the codec's cycle detector.
pub type ArrayRef = Rc<RefCell<Vec<StackValue>>>;

/// Shared, mutable, insertion-ordered backing storage for `Map`.
pub type MapRef = Rc<RefCell<Vec<(StackValue, StackValue)>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackValue {
    ByteArray(Vec<u8>),
    Boolean(bool),
    Integer(BigInt),
    Array(ArrayRef),
    Struct(ArrayRef),
    Map(MapRef),
    InteropHandle(InteropHandle),
}

impl StackValue {
    pub fn byte_array(bytes: impl Into<Vec<u8>>) -> Self {
        StackValue::ByteArray(bytes.into())
    }

    pub fn boolean(value: bool) -> Self {
        StackValue::Boolean(value)
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        StackValue::Integer(value.into())
    }

    pub fn array(items: Vec<StackValue>) -> Self {
        StackValue::Array(Rc::new(RefCell::new(items)))
    }

    pub fn struct_(items: Vec<StackValue>) -> Self {
        StackValue::Struct(Rc::new(RefCell::new(items)))
    }

    pub fn map(entries: Vec<(StackValue, StackValue)>) -> Self {
        StackValue::Map(Rc::new(RefCell::new(entries)))
    }

    pub fn interop_handle(handle: InteropHandle) -> Self {
        StackValue::InteropHandle(handle)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            StackValue::ByteArray(_) => "ByteArray",
            StackValue::Boolean(_) => "Boolean",
            StackValue::Integer(_) => "Integer",
            StackValue::Array(_) => "Array",
            StackValue::Struct(_) => "Struct",
            StackValue::Map(_) => "Map",
            StackValue::InteropHandle(_) => "InteropHandle",
        }
    }

    /// A stable identity for cycle detection: containers are identified by
    /// their backing allocation's address, not by structural equality.
    pub fn container_identity(&self) -> Option<usize> {
        match self {
            StackValue::Array(r) | StackValue::Struct(r) => Some(Rc::as_ptr(r) as usize),
            StackValue::Map(r) => Some(Rc::as_ptr(r) as usize),
            _ => None,
        }
    }

    /// Truthiness per spec.md §3: empty byte strings/containers are falsy,
    /// zero integers are falsy, handles are always truthy.
    pub fn as_bool(&self) -> bool {
        match self {
            StackValue::ByteArray(b) => b.iter().any(|&byte| byte != 0),
            StackValue::Boolean(b) => *b,
            StackValue::Integer(i) => !i.is_zero(),
            StackValue::Array(a) | StackValue::Struct(a) => !a.borrow().is_empty(),
            StackValue::Map(m) => !m.borrow().is_empty(),
            StackValue::InteropHandle(_) => true,
        }
    }

    pub fn as_byte_array(&self) -> VmResult<&[u8]> {
        match self {
            StackValue::ByteArray(b) => Ok(b),
            other => Err(VmError::TypeMismatch {
                expected: "ByteArray",
                found: other.kind_name(),
            }),
        }
    }

    pub fn as_integer(&self) -> VmResult<&BigInt> {
        match self {
            StackValue::Integer(i) => Ok(i),
            other => Err(VmError::TypeMismatch {
                expected: "Integer",
                found: other.kind_name(),
            }),
        }
    }

    pub fn as_interop_handle(&self) -> VmResult<&InteropHandle> {
        match self {
            StackValue::InteropHandle(h) => Ok(h),
            other => Err(VmError::TypeMismatch {
                expected: "InteropHandle",
                found: other.kind_name(),
            }),
        }
    }
}

impl From<&str> for StackValue {
    fn from(value: &str) -> Self {
        StackValue::byte_array(value.as_bytes().to_vec())
    }
}

impl From<i64> for StackValue {
    fn from(value: i64) -> Self {
        StackValue::integer(value)
    }
}

impl From<bool> for StackValue {
    fn from(value: bool) -> Self {
        StackValue::boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_byte_array_is_falsy() {
        assert!(!StackValue::byte_array(Vec::<u8>::new()).as_bool());
        assert!(StackValue::byte_array(vec![0, 1]).as_bool());
    }

    #[test]
    fn zero_integer_is_falsy() {
        assert!(!StackValue::integer(0i64).as_bool());
        assert!(StackValue::integer(-1i64).as_bool());
    }

    #[test]
    fn cyclic_array_has_stable_identity() {
        let inner = StackValue::array(vec![]);
        if let StackValue::Array(r) = &inner {
            r.borrow_mut().push(inner.clone());
        }
        let identity_a = inner.container_identity();
        let identity_b = inner.container_identity();
        assert_eq!(identity_a, identity_b);
        assert!(identity_a.is_some());
    }
}
