//! Streaming JSON output.
//!
//! - `escape`: conversion of raw text into JSON string literal bodies
//! - `writer`: scope-bound object and array builders over an output sink
//!
//! The factory functions here create root scopes. Pretty output uses a
//! two-space indent per nesting level and a trailing newline after the
//! root closes; compact output contains no whitespace at all.

pub mod escape;
mod writer;

pub use escape::escape;
pub use writer::{JsonArray, JsonObject, Scalar, WriterError};

use std::io::Write;

/// Opens a pretty-printed root object over `out`.
pub fn object<W: Write>(out: &mut W) -> Result<JsonObject<'_, W>, WriterError> {
    JsonObject::root(out, true)
}

/// Opens a pretty-printed root array over `out`.
pub fn array<W: Write>(out: &mut W) -> Result<JsonArray<'_, W>, WriterError> {
    JsonArray::root(out, true)
}

/// Opens a root object that emits no whitespace.
pub fn compact_object<W: Write>(out: &mut W) -> Result<JsonObject<'_, W>, WriterError> {
    JsonObject::root(out, false)
}

/// Opens a root array that emits no whitespace.
pub fn compact_array<W: Write>(out: &mut W) -> Result<JsonArray<'_, W>, WriterError> {
    JsonArray::root(out, false)
}
