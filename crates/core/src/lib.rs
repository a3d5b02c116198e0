//! Hash types and script-container primitives shared across the Neo
//! interop layer: the addresses and verifiable objects the syscall
//! handlers and storage model are defined in terms of.

mod block;
mod error;
mod signer;
mod transaction;
mod uint160;
mod uint256;
mod witness;

pub use block::{Block, BlockHeader};
pub use error::{CoreError, Result};
pub use signer::{Signer, WitnessScope};
pub use transaction::{ScriptContainer, Transaction, TransactionAttribute};
pub use uint160::{UInt160, UINT160_SIZE};
pub use uint256::{UInt256, UINT256_SIZE};
pub use witness::Witness;
