//! The interop registry: maps a 32-bit method identifier to a handler and
//! a gas price, per spec.md §4.1.

use crate::session::ServiceSession;
use crate::{Error, Result};
use neo_vm::StackValue;
use std::collections::HashMap;

/// Derives the 32-bit method identifier for `name`: the first 4 bytes of
/// `SHA256(name)`, read little-endian. `Invoke`'s 4-byte-payload
/// shortcut (spec.md §4.1) bypasses this and uses the raw bytes directly.
pub fn method_id(name: &str) -> u32 {
    let digest = neo_cryptography::sha256(name.as_bytes());
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// A registered syscall implementation.
pub trait InteropHandler {
    /// The dotted name this handler was registered under, for diagnostics.
    fn name(&self) -> &'static str;

    /// Static gas price in units of 10⁻³ GAS, or `None` if the handler
    /// computes a dynamic cost itself via `session.gas_mut().consume(..)`.
    fn price(&self) -> Option<i64>;

    /// Runs the handler against already-popped arguments, returning the
    /// values it pushes back.
    fn invoke(&self, session: &mut ServiceSession, args: &[StackValue]) -> Result<Vec<StackValue>>;
}

/// Name→handler and name→price, both keyed by the 32-bit method
/// identifier derived from the registered name.
#[derive(Default)]
pub struct InteropRegistry {
    handlers: HashMap<u32, Box<dyn InteropHandler>>,
}

impl InteropRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Box<dyn InteropHandler>) {
        let id = method_id(handler.name());
        self.handlers.insert(id, handler);
    }

    /// Resolves a raw method descriptor to its identifier: a 4-byte slice
    /// is reinterpreted directly as the little-endian identifier,
    /// otherwise it is treated as the UTF-8 method name and hashed.
    pub fn resolve_id(descriptor: &[u8]) -> u32 {
        if descriptor.len() == 4 {
            u32::from_le_bytes([descriptor[0], descriptor[1], descriptor[2], descriptor[3]])
        } else {
            let name = String::from_utf8_lossy(descriptor);
            method_id(&name)
        }
    }

    /// Looks up and charges gas for `descriptor`'s method, then invokes
    /// it. A registry miss is the only failure this method itself raises;
    /// handler failures propagate unchanged, per spec.md §4.1.
    pub fn invoke(
        &self,
        descriptor: &[u8],
        session: &mut ServiceSession,
        args: &[StackValue],
    ) -> Result<Vec<StackValue>> {
        let id = Self::resolve_id(descriptor);
        let handler = self.handlers.get(&id).ok_or_else(|| {
            log::warn!("unknown interop method identifier {id:#010x}");
            Error::UnknownMethod { id }
        })?;

        if let Some(price) = handler.price() {
            session.gas_mut().consume(price)?;
        }

        handler.invoke(session, args)
    }
}
