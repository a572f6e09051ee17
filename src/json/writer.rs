//! Scope-bound streaming JSON writer.
//!
//! Objects and arrays are emitted incrementally to an [`io::Write`] sink
//! as their builder scopes are used; no intermediate document tree is
//! materialized. A nested scope mutably borrows its parent, so the
//! parent cannot be written to until the nested scope has been finished
//! or dropped: incorrectly interleaved scopes are a compile error, not
//! malformed output.
//!
//! ```
//! use gitjson::json;
//!
//! let mut buffer = Vec::new();
//! let mut person = json::compact_object(&mut buffer).unwrap();
//! person.field("name", "Ada").unwrap();
//! {
//!     let mut tags = person.array("tags").unwrap();
//!     tags.push("x").unwrap();
//!     tags.push("y").unwrap();
//!     tags.finish().unwrap();
//! }
//! person.finish().unwrap();
//!
//! assert_eq!(buffer, br#"{"name":"Ada","tags":["x","y"]}"#);
//! ```
//!
//! Only strings and integers are supported as values; the API this
//! program mirrors has no use for floats, booleans or nulls.

use std::io::{self, Write};

use thiserror::Error;

use super::escape::escape;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("a key was started while the previous key still awaits its value")]
    KeyAfterKey,

    #[error("a value was written without a preceding key")]
    ValueWithoutKey,
}

/// A primitive value the writer can emit.
#[derive(Debug, Clone, Copy)]
pub enum Scalar<'a> {
    Str(&'a str),
    Int(i64),
    Uint(u64),
}

impl<'a> From<&'a str> for Scalar<'a> {
    fn from(value: &'a str) -> Self {
        Scalar::Str(value)
    }
}

impl<'a> From<&'a String> for Scalar<'a> {
    fn from(value: &'a String) -> Self {
        Scalar::Str(value)
    }
}

impl From<i64> for Scalar<'_> {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<u64> for Scalar<'_> {
    fn from(value: u64) -> Self {
        Scalar::Uint(value)
    }
}

impl From<usize> for Scalar<'_> {
    fn from(value: usize) -> Self {
        Scalar::Uint(value as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    WaitingKey,
    WaitingValue,
    WaitingNextKey,
}

/// Scope for one JSON object being emitted.
///
/// Created by [`crate::json::object`] (root) or by a parent scope's
/// [`JsonObject::object`] / [`JsonArray::push_object`]. The opening
/// brace is written on creation and the closing brace when the scope is
/// finished or dropped.
pub struct JsonObject<'w, W: Write> {
    out: &'w mut W,
    state: State,
    depth: usize,
    pretty: bool,
    closed: bool,
}

impl<'w, W: Write> JsonObject<'w, W> {
    pub(crate) fn root(out: &'w mut W, pretty: bool) -> Result<Self, WriterError> {
        Self::open(out, 0, pretty)
    }

    fn open(out: &'w mut W, depth: usize, pretty: bool) -> Result<Self, WriterError> {
        out.write_all(b"{")?;
        Ok(JsonObject {
            out,
            state: State::WaitingKey,
            depth,
            pretty,
            closed: false,
        })
    }

    /// Writes the key of the next key/value pair.
    ///
    /// Starting a second key before supplying a value for the first is
    /// rejected with [`WriterError::KeyAfterKey`].
    pub fn key(&mut self, name: &str) -> Result<(), WriterError> {
        match self.state {
            State::WaitingValue => return Err(WriterError::KeyAfterKey),
            State::WaitingNextKey => self.out.write_all(b",")?,
            State::WaitingKey => {}
        }
        if self.pretty {
            newline_indent(self.out, self.depth + 1)?;
        }
        write!(self.out, "\"{}\":", escape(name))?;
        if self.pretty {
            self.out.write_all(b" ")?;
        }
        self.state = State::WaitingValue;
        Ok(())
    }

    /// Writes the value for the most recently written key.
    pub fn value<'v>(&mut self, value: impl Into<Scalar<'v>>) -> Result<(), WriterError> {
        if self.state != State::WaitingValue {
            return Err(WriterError::ValueWithoutKey);
        }
        write_scalar(self.out, value.into())?;
        self.state = State::WaitingNextKey;
        Ok(())
    }

    /// Writes a complete key/value pair.
    pub fn field<'v>(
        &mut self,
        name: &str,
        value: impl Into<Scalar<'v>>,
    ) -> Result<(), WriterError> {
        self.key(name)?;
        self.value(value)
    }

    /// Opens a nested object as the value of `name`.
    ///
    /// The returned scope borrows this one; this object accepts no
    /// further writes until the nested scope closes.
    pub fn object(&mut self, name: &str) -> Result<JsonObject<'_, W>, WriterError> {
        self.key(name)?;
        self.state = State::WaitingNextKey;
        JsonObject::open(&mut *self.out, self.depth + 1, self.pretty)
    }

    /// Opens a nested array as the value of `name`.
    pub fn array(&mut self, name: &str) -> Result<JsonArray<'_, W>, WriterError> {
        self.key(name)?;
        self.state = State::WaitingNextKey;
        JsonArray::open(&mut *self.out, self.depth + 1, self.pretty)
    }

    /// Closes the object, reporting any write error.
    ///
    /// Dropping the scope also closes it, discarding errors; call this
    /// where the error matters.
    pub fn finish(mut self) -> Result<(), WriterError> {
        self.close()?;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.pretty && self.state == State::WaitingNextKey {
            newline_indent(self.out, self.depth)?;
        }
        self.out.write_all(b"}")?;
        if self.pretty && self.depth == 0 {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for JsonObject<'_, W> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Scope for one JSON array being emitted.
pub struct JsonArray<'w, W: Write> {
    out: &'w mut W,
    has_element: bool,
    depth: usize,
    pretty: bool,
    closed: bool,
}

impl<'w, W: Write> JsonArray<'w, W> {
    pub(crate) fn root(out: &'w mut W, pretty: bool) -> Result<Self, WriterError> {
        Self::open(out, 0, pretty)
    }

    fn open(out: &'w mut W, depth: usize, pretty: bool) -> Result<Self, WriterError> {
        out.write_all(b"[")?;
        Ok(JsonArray {
            out,
            has_element: false,
            depth,
            pretty,
            closed: false,
        })
    }

    fn element_prefix(&mut self) -> io::Result<()> {
        if self.has_element {
            self.out.write_all(b",")?;
        }
        if self.pretty {
            newline_indent(self.out, self.depth + 1)?;
        }
        self.has_element = true;
        Ok(())
    }

    /// Appends a primitive element.
    pub fn push<'v>(&mut self, value: impl Into<Scalar<'v>>) -> Result<(), WriterError> {
        self.element_prefix()?;
        write_scalar(self.out, value.into())?;
        Ok(())
    }

    /// Opens a nested object as the next element.
    pub fn push_object(&mut self) -> Result<JsonObject<'_, W>, WriterError> {
        self.element_prefix()?;
        JsonObject::open(&mut *self.out, self.depth + 1, self.pretty)
    }

    /// Closes the array, reporting any write error.
    pub fn finish(mut self) -> Result<(), WriterError> {
        self.close()?;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.pretty && self.has_element {
            newline_indent(self.out, self.depth)?;
        }
        self.out.write_all(b"]")?;
        if self.pretty && self.depth == 0 {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for JsonArray<'_, W> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn newline_indent<W: Write>(out: &mut W, depth: usize) -> io::Result<()> {
    out.write_all(b"\n")?;
    for _ in 0..depth {
        out.write_all(b"  ")?;
    }
    Ok(())
}

fn write_scalar<W: Write>(out: &mut W, value: Scalar<'_>) -> io::Result<()> {
    match value {
        Scalar::Str(s) => write!(out, "\"{}\"", escape(s)),
        Scalar::Int(v) => write!(out, "{v}"),
        Scalar::Uint(v) => write!(out, "{v}"),
    }
}

#[cfg(test)]
mod tests {
    use crate::json;

    use super::WriterError;

    fn as_str(buffer: &[u8]) -> &str {
        std::str::from_utf8(buffer).unwrap()
    }

    #[test]
    fn compact_object_with_nested_array() {
        let mut buffer = Vec::new();
        let mut object = json::compact_object(&mut buffer).unwrap();
        object.field("name", "Ada").unwrap();
        {
            let mut tags = object.array("tags").unwrap();
            tags.push("x").unwrap();
            tags.push("y").unwrap();
            tags.finish().unwrap();
        }
        object.finish().unwrap();

        assert_eq!(as_str(&buffer), r#"{"name":"Ada","tags":["x","y"]}"#);
    }

    #[test]
    fn empty_scopes() {
        let mut buffer = Vec::new();
        json::object(&mut buffer).unwrap().finish().unwrap();
        assert_eq!(as_str(&buffer), "{}\n");

        buffer.clear();
        json::array(&mut buffer).unwrap().finish().unwrap();
        assert_eq!(as_str(&buffer), "[]\n");
    }

    #[test]
    fn pretty_indentation_shape() {
        let mut buffer = Vec::new();
        let mut object = json::object(&mut buffer).unwrap();
        object.field("name", "Ada").unwrap();
        {
            let mut tags = object.array("tags").unwrap();
            tags.push("x").unwrap();
            tags.push("y").unwrap();
            tags.finish().unwrap();
        }
        object.finish().unwrap();

        let expected = "{\n  \"name\": \"Ada\",\n  \"tags\": [\n    \"x\",\n    \"y\"\n  ]\n}\n";
        assert_eq!(as_str(&buffer), expected);
    }

    #[test]
    fn integer_values() {
        let mut buffer = Vec::new();
        let mut object = json::compact_object(&mut buffer).unwrap();
        object.field("size", 42usize).unwrap();
        object.field("offset", -7i64).unwrap();
        object.finish().unwrap();

        assert_eq!(as_str(&buffer), r#"{"size":42,"offset":-7}"#);
    }

    #[test]
    fn string_values_are_escaped() {
        let mut buffer = Vec::new();
        let mut object = json::compact_object(&mut buffer).unwrap();
        object.field("message", "line one\nline \"two\"").unwrap();
        object.finish().unwrap();

        assert_eq!(
            as_str(&buffer),
            r#"{"message":"line one\nline \"two\""}"#
        );
    }

    #[test]
    fn two_keys_in_a_row_is_an_error() {
        let mut buffer = Vec::new();
        let mut object = json::compact_object(&mut buffer).unwrap();
        object.key("first").unwrap();
        assert!(matches!(
            object.key("second"),
            Err(WriterError::KeyAfterKey)
        ));
    }

    #[test]
    fn value_without_key_is_an_error() {
        let mut buffer = Vec::new();
        let mut object = json::compact_object(&mut buffer).unwrap();
        assert!(matches!(
            object.value("orphan"),
            Err(WriterError::ValueWithoutKey)
        ));

        object.field("key", "value").unwrap();
        assert!(matches!(
            object.value("again"),
            Err(WriterError::ValueWithoutKey)
        ));
    }

    #[test]
    fn dropping_a_scope_closes_it() {
        let mut buffer = Vec::new();
        {
            let mut object = json::compact_object(&mut buffer).unwrap();
            object.field("key", "value").unwrap();
        }
        assert_eq!(as_str(&buffer), r#"{"key":"value"}"#);
    }

    #[test]
    fn objects_nested_in_arrays() {
        let mut buffer = Vec::new();
        let mut array = json::compact_array(&mut buffer).unwrap();
        for name in ["a", "b"] {
            let mut element = array.push_object().unwrap();
            element.field("name", name).unwrap();
            element.finish().unwrap();
        }
        array.finish().unwrap();

        assert_eq!(as_str(&buffer), r#"[{"name":"a"},{"name":"b"}]"#);
    }
}
