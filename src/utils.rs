use std::fmt;


// useful for printing bytes that may not decode to anything sensible
pub fn hex_bytes(bytes: &[u8]) -> HexBytes<'_> {
    HexBytes { bytes }
}

pub struct HexBytes<'b> {
    bytes: &'b [u8],
}

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = self.bytes.iter();
        if let Some(first) = bytes.next() {
            write!(fmt, "{:02X}", first)?;
        }
        for byte in bytes {
            write!(fmt, " {:02X}", byte)?;
        }
        Ok(())
    }
}

// like C's %g: plain digits for ordinary magnitudes, exponent form outside them
// so a huge or tiny value can't swamp the output
pub fn general_float(value: f64) -> GeneralFloat {
    GeneralFloat { value }
}

pub struct GeneralFloat {
    value: f64,
}

impl GeneralFloat {
    const MIN_PLAIN: f64 = 1e-4;
    const MAX_PLAIN: f64 = 1e16;
}

impl fmt::Display for GeneralFloat {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.value.abs();
        let plain = !magnitude.is_finite() || magnitude == 0.0
            || (Self::MIN_PLAIN..Self::MAX_PLAIN).contains(&magnitude);

        if plain { write!(fmt, "{}", self.value) }
        else { write!(fmt, "{:e}", self.value) }
    }
}

/// Parses whitespace separated hex byte pairs, e.g. "01 00 00"
pub fn parse_hex_bytes(text: &str) -> Result<Vec<u8>, std::num::ParseIntError> {
    text.split_whitespace()
        .map(|pair| u8::from_str_radix(pair.trim_start_matches("0x"), 16))
        .collect()
}


// Formats an error that may have a message and/or a source error
pub fn format_error(fmt: &mut fmt::Formatter<'_>, title: &str, message: Option<&str>, source: Option<&dyn std::error::Error>) -> fmt::Result {
    // empty messages are formatted the same as no message
    let message =
        if let Some("") = message { None }
        else { message };

    match (message, source) {
        (None, None) => fmt.write_str(title),
        (None, Some(error)) => write!(fmt, "{}: {}", title, error),
        (Some(message), None) => write!(fmt, "{}: {}", title, message),
        (Some(message), Some(error)) => write!(fmt, "{}: {}: {}", title, message, error),
    }
}
