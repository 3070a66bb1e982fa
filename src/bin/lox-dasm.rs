use clap::{Command, Arg, ArgMatches};

use lox::{Chunk, OpCode, Value, LineNo};
use lox::utils;
use lox::debug::{Disassembler, log_chunk};

fn main() {
    env_logger::init();

    let args = app().get_matches();

    let chunk = match build_chunk(&args) {
        Ok(chunk) => chunk,
        Err(message) => {
            println!("{}", message);
            return;
        },
    };

    let label = args.value_of("label").unwrap_or("test");
    log_chunk(&chunk, label);

    print!("{}", Disassembler::new(&chunk).with_label(label));
}

fn app() -> Command<'static> {
    Command::new("lox-dasm")
        .version(clap::crate_version!())
        .about("Builds a bytecode chunk and prints its disassembly")
        .arg(
            Arg::new("constants")
            .index(1)
            .multiple_values(true)
            .allow_hyphen_values(true)
            .help("constant values to load, one OP_CONSTANT per value (default: 2)")
            .value_name("VALUE")
        )
        .arg(
            Arg::new("label")
            .short('l')
            .long("label")
            .takes_value(true)
            .default_value("test")
            .help("label printed in the listing banner")
            .value_name("NAME")
        )
        .arg(
            Arg::new("line")
            .long("line")
            .takes_value(true)
            .default_value("1")
            .help("source line of the first instruction")
            .value_name("LINE")
        )
        .arg(
            Arg::new("hex")
            .short('x')
            .long("hex")
            .takes_value(true)
            .help("disassemble raw bytes instead, e.g. \"01 00 00\"; VALUEs fill the constant pool")
            .value_name("BYTES")
        )
}

fn build_chunk(args: &ArgMatches) -> Result<Chunk, String> {
    let line = args.value_of("line").unwrap_or("1");
    let line = line.parse::<LineNo>()
        .map_err(|error| format!("Invalid line '{}': {}.", line, error))?;

    let mut constants = Vec::new();
    if let Some(values) = args.values_of("constants") {
        for value in values {
            let constant = value.parse::<Value>()
                .map_err(|error| format!("Invalid constant '{}': {}.", value, error))?;
            constants.push(constant);
        }
    }

    let mut chunk = Chunk::new();

    if let Some(hex) = args.value_of("hex") {
        let bytes = utils::parse_hex_bytes(hex)
            .map_err(|error| format!("Invalid bytes '{}': {}.", hex, error))?;

        for constant in constants {
            chunk.add_constant(constant).map_err(|error| error.to_string())?;
        }
        for byte in bytes {
            chunk.write_byte(byte, line);
        }
        log::info!("read {} bytes: {}", chunk.len(), utils::hex_bytes(chunk.code()));
        return Ok(chunk);
    }

    if constants.is_empty() {
        constants.push(2.0);
    }

    // one line per constant, the return shares the last one
    let mut lineno = line;
    for (idx, constant) in constants.into_iter().enumerate() {
        if idx > 0 {
            lineno = lineno.saturating_add(1);
        }
        chunk.write_constant(constant, lineno).map_err(|error| error.to_string())?;
    }
    chunk.write_opcode(OpCode::Return, lineno);

    Ok(chunk)
}
