use std::fmt;

use crate::language::{Value, LineNo};
use crate::memory::{self, RawArray, AllocResult};

pub mod opcodes;
pub mod values;
pub mod errors;

pub use opcodes::OpCode;
pub use values::ValueArray;
pub use errors::{ChunkResult, ChunkError, ErrorKind};



/// Index into a chunk's constant pool, as encoded in an `OP_CONSTANT` operand.
pub type ConstID = u8;

/// Most constants a single chunk can address.
pub const MAX_CONSTANTS: usize = ConstID::MAX as usize + 1;


/// Encoded bytecode for one compiled unit.
///
/// `code` and `lines` are parallel: `lines[i]` is the source line that produced `code[i]`.
/// Both share a single count and capacity and are always grown together.
#[derive(Default)]
pub struct Chunk {
    code: RawArray<u8>,
    lines: RawArray<LineNo>,
    count: usize,
    constants: ValueArray,
}

impl Chunk {
    pub const fn new() -> Self {
        Self {
            code: RawArray::new(),
            lines: RawArray::new(),
            count: 0,
            constants: ValueArray::new(),
        }
    }

    // Bytes

    #[inline]
    pub fn len(&self) -> usize { self.count }

    #[inline]
    pub fn is_empty(&self) -> bool { self.count == 0 }

    #[inline]
    pub fn capacity(&self) -> usize {
        debug_assert!(self.code.capacity() == self.lines.capacity());
        self.code.capacity()
    }

    pub fn code(&self) -> &[u8] {
        // SAFETY: every slot below count has been written by push_byte()
        unsafe { self.code.as_slice(self.count) }
    }

    pub fn lines(&self) -> &[LineNo] {
        // SAFETY: lines is written in lockstep with code
        unsafe { self.lines.as_slice(self.count) }
    }

    pub fn line_at(&self, offset: usize) -> Option<LineNo> {
        self.lines().get(offset).copied()
    }

    /// Appends a single byte of code along with the line that produced it.
    ///
    /// Callers are responsible for instruction shape: an opcode must be followed by
    /// exactly as many operand bytes as its [`instr_len()`](OpCode::instr_len) requires.
    pub fn try_write_byte(&mut self, byte: impl Into<u8>, line: LineNo) -> ChunkResult<()> {
        if self.count + 1 > self.capacity() {
            self.try_grow()?;
        }
        self.push_byte(byte.into(), line);
        Ok(())
    }

    /// Like [`try_write_byte()`](Self::try_write_byte) but allocation failure terminates the process.
    // using Into<u8> so that OpCodes can be accepted without extra fuss
    pub fn write_byte(&mut self, byte: impl Into<u8>, line: LineNo) {
        if self.count + 1 > self.capacity() {
            self.try_grow().unwrap_or_else(|error| memory::fatal(error));
        }
        self.push_byte(byte.into(), line);
    }

    fn push_byte(&mut self, byte: u8, line: LineNo) {
        assert!(self.count < self.capacity());

        // SAFETY: count < capacity for both arrays
        unsafe {
            self.code.write(self.count, byte);
            self.lines.write(self.count, line);
        }
        self.count += 1;

        log::trace!("write byte {:#04X} at [{}] line {}", byte, self.count - 1, line);
    }

    pub fn write_opcode(&mut self, opcode: OpCode, line: LineNo) {
        self.write_byte(opcode, line)
    }

    fn try_grow(&mut self) -> AllocResult<()> {
        let old_capacity = self.capacity();
        let new_capacity = memory::grow_capacity(old_capacity);
        log::debug!("grow chunk {} -> {}", old_capacity, new_capacity);

        self.code.try_resize(new_capacity)?;
        if let Err(error) = self.lines.try_resize(new_capacity) {
            // keep both arrays the same size
            if let Err(error) = self.code.try_resize(old_capacity) {
                memory::fatal(error)
            }
            return Err(error);
        }
        Ok(())
    }

    // Constants

    pub fn constants(&self) -> &ValueArray { &self.constants }

    pub fn lookup_const(&self, index: impl Into<usize>) -> Option<Value> {
        self.constants.get(index.into())
    }

    /// Adds a value to the constant pool, returning the index to embed as an `OP_CONSTANT` operand.
    ///
    /// Fails once the pool holds [`MAX_CONSTANTS`] values, since a larger index would not fit in one byte.
    pub fn add_constant(&mut self, value: Value) -> ChunkResult<ConstID> {
        let cid = self.next_const_id()?;
        self.constants.push(value);
        log::trace!("add constant {} as {}", value, cid);
        Ok(cid)
    }

    /// Like [`add_constant()`](Self::add_constant) but allocation failure is also returned as an error.
    pub fn try_add_constant(&mut self, value: Value) -> ChunkResult<ConstID> {
        let cid = self.next_const_id()?;
        self.constants.try_push(value)?;
        log::trace!("add constant {} as {}", value, cid);
        Ok(cid)
    }

    fn next_const_id(&self) -> ChunkResult<ConstID> {
        ConstID::try_from(self.constants.len())
            .map_err(|_| ChunkError::from(ErrorKind::ConstPoolLimit))
    }

    /// Adds `value` to the constant pool and emits the `OP_CONSTANT` instruction that loads it.
    pub fn write_constant(&mut self, value: Value, line: LineNo) -> ChunkResult<ConstID> {
        let cid = self.add_constant(value)?;
        self.write_opcode(OpCode::Constant, line);
        self.write_byte(cid, line);
        Ok(cid)
    }

    /// Releases the code, lines and constant pool, leaving an empty chunk.
    pub fn free(&mut self) {
        log::debug!("free chunk ({} bytes)", self.count);
        self.code.free();
        self.lines.free();
        self.constants.free();
        self.count = 0;
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Chunk")
            .field("code", &self.code())
            .field("lines", &self.lines())
            .field("capacity", &self.capacity())
            .field("constants", &self.constants)
            .finish()
    }
}
