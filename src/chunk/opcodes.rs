// Opcodes

// Each tag is spelled out as a u8 const so from_byte() can match on the
// raw byte and the encoding is visible in one place.

// Any new opcode needs its own tag here and a fixed length in instr_len(),
// or the disassembler will lose its place in the byte stream.

                        // width set here so that the longest mnemonic is 16 chars
const OP_RETURN:        u8 = 0x00;  // return from the current chunk
const OP_CONSTANT:      u8 = 0x01;  // load a constant from the chunk's const pool, 1 byte index


#[repr(u8)]
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum OpCode {
    Return = OP_RETURN,
    Constant = OP_CONSTANT,
}

static_assertions::assert_eq_size!(OpCode, u8);

impl OpCode {
    pub fn from_byte(byte: u8) -> Option<OpCode> {
        let opcode = match byte {
            OP_RETURN => Self::Return,
            OP_CONSTANT => Self::Constant,

            _ => return None,
        };
        Some(opcode)
    }

    /// Encoded width including operand bytes
    pub fn instr_len(&self) -> usize {
        match self {
            Self::Return => 1,
            Self::Constant => 2,
        }
    }
}

impl From<OpCode> for u8 {
    fn from(opcode: OpCode) -> Self { opcode as u8 }
}

impl PartialEq<u8> for OpCode {
    fn eq(&self, other: &u8) -> bool { *other == (*self).into() }
}

// For disassembly/debugging
impl std::fmt::Display for OpCode {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mnemonic = match *self {
            Self::Return => "OP_RETURN",
            Self::Constant => "OP_CONSTANT",
        };

        if let Some(width) = fmt.width() {
            write!(fmt, "{:1$}", mnemonic, width)
        } else {
            fmt.write_str(mnemonic)
        }
    }
}
