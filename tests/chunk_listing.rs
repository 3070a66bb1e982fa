use lox::{Chunk, OpCode};
use lox::chunk::{ErrorKind, MAX_CONSTANTS};
use lox::debug::Disassembler;


// The program built by the lox-dasm driver with no arguments
fn build_demo_chunk() -> Chunk {
    let mut chunk = Chunk::new();
    let constant = chunk.add_constant(2.0).expect("constant pool full");
    chunk.write_opcode(OpCode::Constant, 1);
    chunk.write_byte(constant, 1);
    chunk.write_opcode(OpCode::Return, 1);
    chunk
}

#[test]
fn demo_chunk_listing() {
    let chunk = build_demo_chunk();

    assert_eq!(chunk.code(), &[0x01, 0x00, 0x00]);
    assert_eq!(chunk.lines(), &[1, 1, 1]);
    assert_eq!(chunk.constants().as_slice(), &[2.0]);

    let listing = Disassembler::new(&chunk).with_label("test").to_string();
    let expected = "\
== test ==
0000    1 OP_CONSTANT         0 '2'
0002    | OP_RETURN
";
    assert_eq!(listing, expected);
}

#[test]
fn reported_offsets_follow_instruction_width() {
    let chunk = build_demo_chunk();
    let dasm = Disassembler::new(&chunk);

    let offsets = dasm.iter().map(|instr| instr.offset).collect::<Vec<usize>>();
    assert_eq!(offsets, [0, 2]);
}

#[test]
fn writes_are_retrievable_in_order() {
    let mut chunk = Chunk::new();

    let mut lines = Vec::new();
    for i in 0..300u32 {
        let line = 1 + i / 10;
        chunk.write_opcode(OpCode::Return, line);
        lines.push(line);
    }

    assert_eq!(chunk.len(), 300);
    assert!(chunk.capacity() >= chunk.len());
    assert_eq!(chunk.capacity(), 512);
    assert!(chunk.code().iter().all(|byte| OpCode::Return == *byte));
    assert_eq!(chunk.lines(), lines.as_slice());

    // one listing line per byte, and only the first instruction on each source line shows the number
    let listing = Disassembler::new(&chunk).to_string();
    assert_eq!(listing.lines().count(), 300);
    assert_eq!(listing.lines().filter(|line| !line.contains(" | ")).count(), 30);
}

#[test]
fn full_constant_pool_is_usable_with_byte_operands() {
    let mut chunk = Chunk::new();

    for k in 0..MAX_CONSTANTS {
        let cid = chunk.write_constant(k as f64, 1).expect("constant pool full");
        assert_eq!(usize::from(cid), k);
    }

    let error = chunk.write_constant(0.5, 2).unwrap_err();
    assert_eq!(*error.kind(), ErrorKind::ConstPoolLimit);

    // nothing was emitted for the rejected constant
    assert_eq!(chunk.len(), MAX_CONSTANTS * 2);

    let dasm = Disassembler::new(&chunk);
    let last = dasm.iter().last().unwrap();
    assert_eq!(last.to_string(), "0510    | OP_CONSTANT       255 '255'");
}

#[test]
fn freed_chunk_matches_new_chunk() {
    let mut chunk = build_demo_chunk();
    chunk.free();

    let fresh = Chunk::new();
    assert_eq!(chunk.len(), fresh.len());
    assert_eq!(chunk.capacity(), fresh.capacity());
    assert_eq!(chunk.constants().len(), fresh.constants().len());
    assert_eq!(chunk.constants().capacity(), fresh.constants().capacity());
    assert_eq!(format!("{:?}", chunk), format!("{:?}", fresh));
}

#[test]
fn raw_hex_bytes_disassemble() {
    let bytes = lox::utils::parse_hex_bytes("01 00 0xFF 00").unwrap();
    assert_eq!(bytes, [0x01, 0x00, 0xFF, 0x00]);
    assert!(lox::utils::parse_hex_bytes("01 zz").is_err());

    let mut chunk = Chunk::new();
    chunk.add_constant(-0.5).unwrap();
    for byte in bytes {
        chunk.write_byte(byte, 4);
    }
    assert_eq!(lox::utils::hex_bytes(chunk.code()).to_string(), "01 00 FF 00");

    let listing = Disassembler::new(&chunk).to_string();
    let expected = "\
0000    4 OP_CONSTANT         0 '-0.5'
0002    | Unknown opcode '255'
0003    | OP_RETURN
";
    assert_eq!(listing, expected);
}
