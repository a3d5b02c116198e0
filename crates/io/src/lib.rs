//! Binary (de)serialization primitives shared across the Neo interop layer.
//!
//! This crate provides the little-endian writer/reader pair and the
//! varint convention used everywhere a wire format needs to be exact:
//! the stack-value codec (`neo-vm`) and hash-type serialization
//! (`neo-core`) both build on top of it.

mod binary_writer;
mod error;
mod memory_reader;
mod serializable;

pub use binary_writer::BinaryWriter;
pub use error::{IoError, IoResult};
pub use memory_reader::MemoryReader;
pub use serializable::Serializable;
