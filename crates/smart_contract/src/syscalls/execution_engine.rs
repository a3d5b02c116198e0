//! Execution-context introspection: `System.ExecutionEngine.*`.

use crate::registry::InteropHandler;
use crate::session::ServiceSession;
use crate::Result;
use neo_vm::StackValue;

pub struct GetScriptContainer;

impl InteropHandler for GetScriptContainer {
    fn name(&self) -> &'static str {
        "System.ExecutionEngine.GetScriptContainer"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, session: &mut ServiceSession, _args: &[StackValue]) -> Result<Vec<StackValue>> {
        let handle = session.script_container().as_interop_handle();
        Ok(vec![StackValue::interop_handle(handle)])
    }
}

pub struct GetExecutingScriptHash;

impl InteropHandler for GetExecutingScriptHash {
    fn name(&self) -> &'static str {
        "System.ExecutionEngine.GetExecutingScriptHash"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, session: &mut ServiceSession, _args: &[StackValue]) -> Result<Vec<StackValue>> {
        Ok(vec![StackValue::byte_array(
            session.current_script_hash().as_bytes().to_vec(),
        )])
    }
}

pub struct GetCallingScriptHash;

impl InteropHandler for GetCallingScriptHash {
    fn name(&self) -> &'static str {
        "System.ExecutionEngine.GetCallingScriptHash"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, session: &mut ServiceSession, _args: &[StackValue]) -> Result<Vec<StackValue>> {
        Ok(vec![StackValue::byte_array(
            session.calling_script_hash().as_bytes().to_vec(),
        )])
    }
}

pub struct GetEntryScriptHash;

impl InteropHandler for GetEntryScriptHash {
    fn name(&self) -> &'static str {
        "System.ExecutionEngine.GetEntryScriptHash"
    }

    fn price(&self) -> Option<i64> {
        Some(1)
    }

    fn invoke(&self, session: &mut ServiceSession, _args: &[StackValue]) -> Result<Vec<StackValue>> {
        Ok(vec![StackValue::byte_array(
            session.entry_script_hash().as_bytes().to_vec(),
        )])
    }
}
