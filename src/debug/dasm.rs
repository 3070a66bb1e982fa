//! Human-readable listing of a chunk's bytecode, for diagnostics only.
//!
//! Malformed bytecode never produces an error here. Unknown opcodes are reported
//! inline and skipped one byte at a time so that the walk always makes progress.

use std::fmt;
use std::fmt::{Write, Formatter};
use std::iter;

use crate::utils;
use crate::language::{Value, LineNo};
use crate::chunk::{Chunk, OpCode, ConstID};


/// The line number column of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColumn {
    Line(LineNo),
    // same line as the previous instruction
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InstrKind {
    Simple(OpCode),
    Constant {
        opcode: OpCode,
        // None if the chunk ends before the operand
        index: Option<ConstID>,
        // None if the index is outside the constant pool
        value: Option<Value>,
    },
    Unknown(u8),
}

/// A single decoded instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction {
    pub offset: usize,
    pub line: LineColumn,
    pub kind: InstrKind,
    pub next_offset: usize,
}

impl fmt::Display for Instruction {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        write!(fmt, "{:04} ", self.offset)?;

        match self.line {
            LineColumn::Line(lineno) => write!(fmt, "{: >4} ", lineno)?,
            LineColumn::Repeat => fmt.write_str("   | ")?,
        }

        match self.kind {
            InstrKind::Simple(opcode) => write!(fmt, "{}", opcode),

            InstrKind::Constant { opcode, index: Some(cid), value: Some(value) } =>
                write!(fmt, "{:16} {: >4} '{}'", opcode, cid, utils::general_float(value)),

            InstrKind::Constant { opcode, index: Some(cid), value: None } =>
                write!(fmt, "{:16} {: >4} '<invalid constant>'", opcode, cid),

            InstrKind::Constant { opcode, index: None, .. } =>
                write!(fmt, "{:16} <missing operand>", opcode),

            InstrKind::Unknown(byte) => write!(fmt, "Unknown opcode '{}'", byte),
        }
    }
}


pub struct Disassembler<'c> {
    chunk: &'c Chunk,
    label: Option<&'c str>,
}

impl<'c> Disassembler<'c> {
    pub fn new(chunk: &'c Chunk) -> Self {
        Self { chunk, label: None }
    }

    /// Print a banner with `label` before the listing
    pub fn with_label(mut self, label: &'c str) -> Self {
        self.label.replace(label); self
    }

    /// Decodes the instruction starting at `offset`, or `None` past the end of the chunk.
    pub fn decode_instr(&self, offset: usize) -> Option<Instruction> {
        let code = self.chunk.code();
        let byte = *code.get(offset)?;

        let lines = self.chunk.lines();
        let line =
            if offset > 0 && lines[offset] == lines[offset - 1] { LineColumn::Repeat }
            else { LineColumn::Line(lines[offset]) };

        let (kind, instr_len) = match OpCode::from_byte(byte) {
            Some(opcode @ OpCode::Constant) => {
                let index = code.get(offset + 1).copied();
                let value = index.and_then(|cid| self.chunk.lookup_const(cid));
                (InstrKind::Constant { opcode, index, value }, opcode.instr_len())
            },
            Some(opcode) => (InstrKind::Simple(opcode), opcode.instr_len()),
            None => (InstrKind::Unknown(byte), 1),
        };

        Some(Instruction {
            offset, line, kind,
            next_offset: usize::min(offset + instr_len, code.len()),
        })
    }

    /// Writes a single instruction and returns the offset of the next one.
    ///
    /// Nothing is written for an offset past the end of the chunk, and the chunk length is returned.
    pub fn write_instr(&self, fmt: &mut impl Write, offset: usize) -> Result<usize, fmt::Error> {
        match self.decode_instr(offset) {
            Some(instr) => {
                writeln!(fmt, "{}", instr)?;
                Ok(instr.next_offset)
            },
            None => Ok(self.chunk.len()),
        }
    }

    /// Iterates over every instruction from the start of the chunk.
    pub fn iter(&self) -> Instructions<'_> {
        Instructions { dasm: self, offset: 0 }
    }

    /// A banner line containing `label`, then one line per instruction.
    pub fn lines<'a>(&'a self, label: &'a str) -> impl Iterator<Item=String> + 'a {
        iter::once(banner(label))
            .chain(self.iter().map(format_instr))
    }

    fn decode_chunk(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        if let Some(label) = self.label {
            writeln!(fmt, "{}", banner(label))?;
        }

        let mut offset = 0;
        while offset < self.chunk.len() {
            offset = self.write_instr(fmt, offset)?;
        }
        Ok(())
    }
}

impl fmt::Display for Disassembler<'_> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        self.decode_chunk(fmt)
    }
}

fn banner(label: &str) -> String {
    format!("== {} ==", label)
}

fn format_instr(instr: Instruction) -> String {
    instr.to_string()
}


pub struct Instructions<'d> {
    dasm: &'d Disassembler<'d>,
    offset: usize,
}

impl Iterator for Instructions<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        let instr = self.dasm.decode_instr(self.offset)?;
        self.offset = instr.next_offset;
        Some(instr)
    }
}


/// Sends the listing for `chunk` to the debug log, if debug logging is enabled.
pub fn log_chunk(chunk: &Chunk, label: &str) {
    if log::log_enabled!(log::Level::Debug) {
        for line in Disassembler::new(chunk).lines(label) {
            log::debug!("{}", line);
        }
    }
}
