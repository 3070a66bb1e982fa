pub type FloatType = f64;  // internal representation for numbers

/// Constants are plain numbers, no boxing or tagging.
pub type Value = FloatType;

/// Source line that produced a byte of code.
pub type LineNo = u32;
