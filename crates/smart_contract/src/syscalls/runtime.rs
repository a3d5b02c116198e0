//! Runtime services: witness checking, notifications, logging, time, the
//! platform constant, trigger introspection, and the Serialize/Deserialize
//! delegates to `neo_vm::codec` — spec.md §4.4.

use crate::notification::{LogEntry, Notification};
use crate::registry::InteropHandler;
use crate::session::ServiceSession;
use crate::syscalls::args;
use crate::{Error, Result};
use neo_config::SECONDS_PER_BLOCK;
use neo_core::UInt160;
use neo_vm::{codec, StackValue};

pub struct Platform;

impl InteropHandler for Platform {
    fn name(&self) -> &'static str {
        "System.Runtime.Platform"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, _session: &mut ServiceSession, _args: &[StackValue]) -> Result<Vec<StackValue>> {
        Ok(vec![StackValue::byte_array(b"NEO".to_vec())])
    }
}

pub struct GetTrigger;

impl InteropHandler for GetTrigger {
    fn name(&self) -> &'static str {
        "System.Runtime.GetTrigger"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, session: &mut ServiceSession, _args: &[StackValue]) -> Result<Vec<StackValue>> {
        Ok(vec![StackValue::integer(session.trigger().as_u8() as i64)])
    }
}

pub struct CheckWitness;

impl InteropHandler for CheckWitness {
    fn name(&self) -> &'static str {
        "System.Runtime.CheckWitness"
    }

    fn price(&self) -> Option<i64> {
        Some(200)
    }

    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let scalar = args::bytes(args, 0, self.name())?;
        let target = match scalar.len() {
            20 => UInt160::from_bytes(scalar)
                .map_err(|e| Error::InvalidArguments {
                    method: self.name(),
                    reason: e.to_string(),
                })?,
            33 => {
                let hash = neo_cryptography::script_hash_from_compressed_point(scalar).map_err(|e| {
                    Error::InvalidArguments {
                        method: self.name(),
                        reason: e.to_string(),
                    }
                })?;
                UInt160::from_bytes(&hash).expect("hash160 output is always 20 bytes")
            }
            _ => return Ok(vec![StackValue::boolean(false)]),
        };
        let witnessed = session.script_container().required_signers().contains(&target);
        Ok(vec![StackValue::boolean(witnessed)])
    }
}

/// Recovers a human-readable event name from the value `Notify` pops, by
/// convention the first element when the payload is itself an array (the
/// shape a compiler emits for `(event_name, args...)`), falling back to
/// the empty string for any other shape.
fn derive_event_name(value: &StackValue) -> String {
    match value {
        StackValue::ByteArray(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        StackValue::Array(items) | StackValue::Struct(items) => items
            .borrow()
            .first()
            .map(derive_event_name)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

pub struct Notify;

impl InteropHandler for Notify {
    fn name(&self) -> &'static str {
        "System.Runtime.Notify"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let payload = args.first().cloned().unwrap_or(StackValue::Boolean(false));
        let event_name = derive_event_name(&payload);
        let script_hash = session.current_script_hash();
        log::info!("Notify: {event_name} from contract {script_hash}");
        let notification = Notification {
            script_container: session.script_container().hash(),
            script_hash,
            event_name,
            payload,
        };
        session.push_notification(notification);
        Ok(vec![])
    }
}

pub struct Log;

impl InteropHandler for Log {
    fn name(&self) -> &'static str {
        "System.Runtime.Log"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let bytes = args::bytes(args, 0, self.name())?;
        let message = String::from_utf8_lossy(bytes).into_owned();
        let script_hash = session.current_script_hash();
        log::info!("Log: {message} from contract {script_hash}");
        session.push_log(LogEntry { script_hash, message });
        Ok(vec![])
    }
}

/// Per spec.md §9's open question: with no persisting block this falls
/// back to `current_best_header.timestamp + SECONDS_PER_BLOCK`, a known
/// soft-forkable weakness preserved here for consensus compatibility.
pub struct GetTime;

impl InteropHandler for GetTime {
    fn name(&self) -> &'static str {
        "System.Runtime.GetTime"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, session: &mut ServiceSession, _args: &[StackValue]) -> Result<Vec<StackValue>> {
        let timestamp = match session.snapshot().persisting_block() {
            Some(header) => header.timestamp,
            None => session.snapshot().best_header_timestamp() + SECONDS_PER_BLOCK,
        };
        Ok(vec![StackValue::integer(timestamp as i64)])
    }
}

pub struct Serialize;

impl InteropHandler for Serialize {
    fn name(&self) -> &'static str {
        "System.Runtime.Serialize"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, _session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let value = args
            .first()
            .ok_or_else(|| Error::InvalidArguments {
                method: self.name(),
                reason: "expected a value to serialize".to_string(),
            })?;
        let bytes = codec::serialize(value)?;
        Ok(vec![StackValue::byte_array(bytes)])
    }
}

pub struct Deserialize;

impl InteropHandler for Deserialize {
    fn name(&self) -> &'static str {
        "System.Runtime.Deserialize"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, _session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>> {
        let bytes = args::bytes(args, 0, self.name())?;
        let value = codec::deserialize(bytes)?;
        Ok(vec![value])
    }
}
