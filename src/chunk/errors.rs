use std::fmt;
use std::error::Error;

use crate::utils;
use crate::memory::AllocError;


pub type ErrorKind = ChunkErrorKind;
pub type ChunkResult<T> = Result<T, ChunkError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkErrorKind {
    // constant indexes are encoded as a single byte
    ConstPoolLimit,
    AllocFailed,
}

#[derive(Debug)]
pub struct ChunkError {
    kind: ErrorKind,
    cause: Option<Box<dyn Error>>,
}

impl ChunkError {
    pub fn caused_by(mut self, cause: Box<dyn Error>) -> Self {
        self.cause.replace(cause); self
    }

    pub fn kind(&self) -> &ErrorKind { &self.kind }
}

impl From<ErrorKind> for ChunkError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, cause: None }
    }
}

impl From<AllocError> for ChunkError {
    fn from(error: AllocError) -> Self {
        Self::from(ErrorKind::AllocFailed).caused_by(Box::new(error))
    }
}

impl Error for ChunkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|o| o.as_ref())
    }
}

impl fmt::Display for ChunkError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {

        let message = match self.kind() {
            ErrorKind::ConstPoolLimit => "constant pool limit reached",
            ErrorKind::AllocFailed => "could not grow chunk",
        };

        utils::format_error(fmt, "chunk error", Some(message), self.source())
    }
}
