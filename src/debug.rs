pub mod dasm;

pub use dasm::{Disassembler, Instruction, log_chunk};
