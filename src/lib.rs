//! Bytecode storage for the Lox virtual machine.
//!
//! A [`Chunk`](chunk::Chunk) holds the encoded instruction stream for one compiled unit,
//! a source line for every byte, and the constant pool its `OP_CONSTANT` operands index into.
//! The [`Disassembler`](debug::dasm::Disassembler) renders a chunk for diagnostics.

pub mod utils;

pub mod language;
pub mod memory;
pub mod chunk;

pub mod debug;

pub use chunk::{Chunk, ValueArray, OpCode, ConstID};
pub use language::{Value, LineNo};
