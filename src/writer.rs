use std::io::Write;

use zerocopy::byteorder::{LE, U64};
use zerocopy::IntoBytes;

use crate::error::{CodecError, Result};
use crate::width::BitWidth;

/// Encodes values to a `Write` stream, using the wire format read by `BinaryReader`.
///
/// Integers are narrowed to the requested width (higher bits are discarded) and written in
/// little-endian order. Variable-length fields are written as a length prefix followed by the
/// payload. A payload longer than the prefix can describe (`2^bits - 1` bytes) is truncated to
/// that length; this is not an error, so callers that cannot tolerate the loss must check
/// sizes before writing.
///
/// The first failure reported by the stream is sticky. After it, every `write_*` method is a
/// no-op and the stream is not touched again.
///
/// ```
/// use sticky_binary_io::{BinaryWriter, BitWidth};
///
/// let mut w = BinaryWriter::new(Vec::new());
/// w.write_bytes(&[7u8; 300], BitWidth::U8);
/// let buf = w.finish().unwrap();
/// assert_eq!(buf[0], 255);
/// assert_eq!(buf.len(), 1 + 255);
/// ```
pub struct BinaryWriter<W> {
    sink: W,
    error: Option<CodecError>,
    /// Holds the little-endian image of the integer being written. Every write overwrites all
    /// eight bytes before emitting a prefix of them.
    scratch: U64<LE>,
}

impl<W: Write> BinaryWriter<W> {
    /// Wraps `sink`. The writer does not flush or close the stream.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            error: None,
            scratch: U64::new(0),
        }
    }

    /// The sticky error, if any write has failed.
    pub fn error(&self) -> Option<&CodecError> {
        self.error.as_ref()
    }

    /// Accesses the inner stream
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Mutably accesses the inner stream
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Extracts the inner stream, discarding any sticky error.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Consumes the writer, returning the inner stream if every write succeeded or the sticky
    /// error otherwise.
    pub fn finish(self) -> Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.sink),
        }
    }

    /// Writes the low `width` bits of `value` in little-endian order.
    pub fn write_uint(&mut self, value: u64, width: BitWidth) {
        if self.error.is_some() {
            return;
        }

        // Little-endian, so the narrowed value is a prefix of the full 8-byte image.
        self.scratch = U64::new(value);
        let bytes = &self.scratch.as_bytes()[..width.byte_len()];
        if let Err(e) = self.sink.write_all(bytes) {
            self.fail("write_uint", e.into());
        }
    }

    /// Writes a single `u8` value
    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) {
        self.write_uint(value.into(), BitWidth::U8)
    }

    /// Writes a single `u16` value
    #[inline(always)]
    pub fn write_u16(&mut self, value: u16) {
        self.write_uint(value.into(), BitWidth::U16)
    }

    /// Writes a single `u32` value
    #[inline(always)]
    pub fn write_u32(&mut self, value: u32) {
        self.write_uint(value.into(), BitWidth::U32)
    }

    /// Writes a single `u64` value
    #[inline(always)]
    pub fn write_u64(&mut self, value: u64) {
        self.write_uint(value, BitWidth::U64)
    }

    /// Writes `data` as a length prefix of the given width followed by the bytes.
    ///
    /// If `data` is longer than `width.max_value()`, only its first `width.max_value()` bytes
    /// are written, and the prefix records that truncated length.
    pub fn write_bytes(&mut self, data: &[u8], width: BitWidth) {
        if self.error.is_some() {
            return;
        }

        let data = match usize::try_from(width.max_value()) {
            Ok(max) if data.len() > max => {
                tracing::trace!(len = data.len(), max, "truncating variable-length field");
                &data[..max]
            }
            _ => data,
        };

        self.write_uint(data.len() as u64, width);
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.sink.write_all(data) {
            self.fail("write_bytes", e.into());
        }
    }

    /// Writes the raw bytes of `text` as a length-prefixed field. No encoding conversion is
    /// done, and the same truncation rule as `write_bytes` applies, which may split a
    /// multi-byte UTF-8 sequence.
    pub fn write_string(&mut self, text: impl AsRef<[u8]>, width: BitWidth) {
        self.write_bytes(text.as_ref(), width)
    }

    #[cold]
    fn fail(&mut self, op: &'static str, error: CodecError) {
        tracing::debug!(op, %error, "binary writer failed; later writes are ignored");
        self.error = Some(error);
    }
}
