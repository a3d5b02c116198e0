//! Deterministic, iterative (de)serialization of [`StackValue`] to Neo's
//! wire format. Both directions use an explicit work stack instead of
//! native recursion, so a deeply nested value cannot blow the call stack.

use crate::error::{VmError, VmResult};
use crate::stack_value::StackValue;
use neo_config::MAX_ITEM_SIZE;
use neo_io::{BinaryWriter, MemoryReader};
use num_bigint::BigInt;
use num_traits::Zero;
use std::collections::HashSet;

pub const TAG_BYTE_ARRAY: u8 = 0x00;
pub const TAG_BOOLEAN: u8 = 0x01;
pub const TAG_INTEGER: u8 = 0x02;
pub const TAG_INTEROP_HANDLE: u8 = 0x40;
pub const TAG_ARRAY: u8 = 0x80;
pub const TAG_STRUCT: u8 = 0x81;
pub const TAG_MAP: u8 = 0x82;

/// Element-count cap enforced on every container header, both when
/// writing (sanity) and when reading (the actual consensus-relevant cap).
pub const MAX_ARRAY_SIZE: usize = neo_config::MAX_ARRAY_SIZE;

fn int_to_minimal_le(value: &BigInt) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_signed_bytes_le()
    }
}

fn int_from_minimal_le(bytes: &[u8]) -> BigInt {
    if bytes.is_empty() {
        BigInt::zero()
    } else {
        BigInt::from_signed_bytes_le(bytes)
    }
}

/// Serializes `value` to Neo's binary StackValue wire format.
///
/// Containers are emitted depth-first via an explicit work stack: a
/// container's header (tag + count) is written as soon as it is popped,
/// then its children are pushed back in reverse order so popping them
/// again reproduces the original, in-order byte stream. A global
/// identity set rejects any container reachable more than once from the
/// root, which catches both true cycles and shared (aliased) subgraphs.
pub fn serialize(value: &StackValue) -> VmResult<Vec<u8>> {
    let mut writer = BinaryWriter::new();
    let mut visited: HashSet<usize> = HashSet::new();
    let mut work: Vec<StackValue> = vec![value.clone()];

    while let Some(item) = work.pop() {
        match &item {
            StackValue::ByteArray(bytes) => {
                writer.write_byte(TAG_BYTE_ARRAY)?;
                writer.write_var_bytes(bytes)?;
            }
            StackValue::Boolean(b) => {
                writer.write_byte(TAG_BOOLEAN)?;
                writer.write_byte(if *b { 1 } else { 0 })?;
            }
            StackValue::Integer(i) => {
                writer.write_byte(TAG_INTEGER)?;
                writer.write_var_bytes(&int_to_minimal_le(i))?;
            }
            StackValue::Array(items) | StackValue::Struct(items) => {
                let identity = item.container_identity().expect("array/struct has identity");
                if !visited.insert(identity) {
                    return Err(VmError::NotSupported {
                        reason: "cycle detected during serialization",
                    });
                }
                let tag = if matches!(item, StackValue::Struct(_)) {
                    TAG_STRUCT
                } else {
                    TAG_ARRAY
                };
                writer.write_byte(tag)?;
                let borrowed = items.borrow();
                writer.write_var_int(borrowed.len() as u64)?;
                for child in borrowed.iter().rev() {
                    work.push(child.clone());
                }
            }
            StackValue::Map(entries) => {
                let identity = item.container_identity().expect("map has identity");
                if !visited.insert(identity) {
                    return Err(VmError::NotSupported {
                        reason: "cycle detected during serialization",
                    });
                }
                writer.write_byte(TAG_MAP)?;
                let borrowed = entries.borrow();
                writer.write_var_int(borrowed.len() as u64)?;
                for (key, value) in borrowed.iter().rev() {
                    // Pushed (value, key) so key pops - and is emitted - first.
                    work.push(value.clone());
                    work.push(key.clone());
                }
            }
            StackValue::InteropHandle(_) => {
                return Err(VmError::NotSupported {
                    reason: "interop handles are not serializable",
                });
            }
        }
    }

    let bytes = writer.to_bytes();
    if bytes.len() > MAX_ITEM_SIZE {
        return Err(VmError::SizeExceeded {
            size: bytes.len(),
            limit: MAX_ITEM_SIZE,
        });
    }
    Ok(bytes)
}

/// What kind of container a placeholder token stands for.
#[derive(Clone, Copy)]
enum ContainerKind {
    Array,
    Struct,
    Map,
}

/// A container whose header has been read but whose children are still
/// being collected off the rebuild stack.
struct OpenContainer {
    kind: ContainerKind,
    remaining: usize,
    items: Vec<StackValue>,
}

/// Deserializes a single `StackValue` from its wire-format byte stream.
///
/// Each header token is read in turn; a scalar token is complete
/// immediately, while a container token opens a placeholder recording its
/// kind and remaining child count (`2 × count` for maps, since each pair
/// contributes a key and a value). As soon as a value completes it is
/// folded into its parent's placeholder; when a placeholder's remaining
/// count reaches zero it is itself folded into a finished container,
/// cascading up through any enclosing containers in the same step.
pub fn deserialize(bytes: &[u8]) -> VmResult<StackValue> {
    let mut reader = MemoryReader::new(bytes);
    let mut stack: Vec<OpenContainer> = Vec::new();
    let mut root: Option<StackValue> = None;

    while root.is_none() {
        let tag = reader.read_byte()?;
        let mut completed: StackValue = match tag {
            TAG_BYTE_ARRAY => {
                let data = reader.read_var_bytes(MAX_ITEM_SIZE)?;
                StackValue::ByteArray(data)
            }
            TAG_BOOLEAN => {
                let b = reader.read_byte()?;
                StackValue::Boolean(b != 0)
            }
            TAG_INTEGER => {
                let data = reader.read_var_bytes(MAX_ITEM_SIZE)?;
                StackValue::Integer(int_from_minimal_le(&data))
            }
            TAG_ARRAY | TAG_STRUCT | TAG_MAP => {
                let count = reader.read_var_int(MAX_ARRAY_SIZE as u64)? as usize;
                let kind = match tag {
                    TAG_ARRAY => ContainerKind::Array,
                    TAG_STRUCT => ContainerKind::Struct,
                    _ => ContainerKind::Map,
                };
                let remaining = if matches!(kind, ContainerKind::Map) {
                    count * 2
                } else {
                    count
                };
                stack.push(OpenContainer {
                    kind,
                    remaining,
                    items: Vec::with_capacity(remaining),
                });
                // Not complete yet unless it has no children; fall through
                // to the completion loop below, which handles that case.
                continue_with_open_container(&mut stack, &mut root);
                continue;
            }
            TAG_INTEROP_HANDLE => {
                return Err(VmError::NotSupported {
                    reason: "interop handles are not deserializable",
                })
            }
            other => return Err(VmError::MalformedTag { tag: other }),
        };

        // Fold `completed` into its parent, cascading through any
        // containers that become complete as a result.
        loop {
            match stack.last_mut() {
                None => {
                    root = Some(completed);
                    break;
                }
                Some(open) => {
                    open.items.push(completed);
                    open.remaining -= 1;
                    if open.remaining > 0 {
                        break;
                    }
                    let open = stack.pop().expect("just matched Some");
                    completed = finish_container(open);
                }
            }
        }
    }

    Ok(root.expect("loop only exits once root is set"))
}

/// Handles a freshly-pushed container placeholder that may already be
/// empty (count == 0), folding it immediately the same way a completed
/// scalar would be.
fn continue_with_open_container(stack: &mut Vec<OpenContainer>, root: &mut Option<StackValue>) {
    while let Some(open) = stack.last() {
        if open.remaining != 0 {
            return;
        }
        let open = stack.pop().expect("just matched Some");
        let completed = finish_container(open);
        match stack.last_mut() {
            None => {
                *root = Some(completed);
                return;
            }
            Some(parent) => {
                parent.items.push(completed);
                parent.remaining -= 1;
            }
        }
    }
}

fn finish_container(open: OpenContainer) -> StackValue {
    match open.kind {
        ContainerKind::Array => StackValue::array(open.items),
        ContainerKind::Struct => StackValue::struct_(open.items),
        ContainerKind::Map => {
            let mut entries = Vec::with_capacity(open.items.len() / 2);
            let mut iter = open.items.into_iter();
            while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
                entries.push((key, value));
            }
            StackValue::map(entries)
        }
    }
}
