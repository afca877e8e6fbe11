use std::io::{ErrorKind, Read};

use zerocopy::byteorder::{LE, U64};
use zerocopy::IntoBytes;

use crate::error::{CodecError, Result};
use crate::width::BitWidth;

/// Upper bound on the buffer reserved up front for a variable-length payload. Longer payloads
/// grow the buffer as bytes actually arrive, so a corrupt length prefix cannot force a huge
/// allocation.
const PAYLOAD_PREALLOC_LIMIT: u64 = 64 * 1024;

/// Decodes values from a `Read` stream.
///
/// Integers are unsigned and little-endian. Variable-length fields (`read_bytes`,
/// `read_string`) are a length prefix of the given [`BitWidth`] followed by that many bytes.
///
/// A read succeeds only if exactly the requested number of bytes were obtained. Anything less,
/// including a stream that is already at its end, records a [`CodecError::ShortRead`]. Errors
/// reported by the stream are recorded as [`CodecError::Io`], except `Interrupted`, which is
/// retried.
///
/// The first recorded error is sticky. After it, every `read_*` method returns `0` or an empty
/// field and does not touch the stream again. This lets a caller decode a whole record without
/// checking each call:
///
/// ```
/// use sticky_binary_io::{BinaryReader, BitWidth, CodecError};
///
/// let mut r = BinaryReader::new(&[3u8, b'a', b'b'][..]);
/// let name = r.read_bytes(BitWidth::U8);
/// let id = r.read_uint(BitWidth::U32);
/// assert!(name.is_empty());
/// assert_eq!(id, 0);
/// assert!(matches!(r.error(), Some(CodecError::ShortRead { expected: 3, actual: 2 })));
/// ```
pub struct BinaryReader<R> {
    src: R,
    error: Option<CodecError>,
    /// Holds fixed-width fields. It is zeroed before each read, so the high bytes of a narrow
    /// field never carry over from an earlier, wider one.
    scratch: U64<LE>,
}

impl<R: Read> BinaryReader<R> {
    /// Wraps `src`. The reader does not close or otherwise manage the stream.
    pub fn new(src: R) -> Self {
        Self {
            src,
            error: None,
            scratch: U64::new(0),
        }
    }

    /// The sticky error, if any read has failed.
    pub fn error(&self) -> Option<&CodecError> {
        self.error.as_ref()
    }

    /// Borrows the underlying stream.
    pub fn get_ref(&self) -> &R {
        &self.src
    }

    /// Mutably borrows the underlying stream. Reading from it directly will desynchronize
    /// any sequence of fields being decoded.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.src
    }

    /// Extracts the underlying stream, discarding any sticky error.
    pub fn into_inner(self) -> R {
        self.src
    }

    /// Consumes the reader, returning the underlying stream if every read succeeded or the
    /// sticky error otherwise.
    pub fn finish(self) -> Result<R> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.src),
        }
    }

    /// Reads an unsigned integer of the given width and widens it to `u64`.
    ///
    /// Returns `0` if the read fails or a previous read has failed.
    pub fn read_uint(&mut self, width: BitWidth) -> u64 {
        if self.error.is_some() {
            return 0;
        }

        self.scratch = U64::new(0);
        let buf = &mut self.scratch.as_mut_bytes()[..width.byte_len()];
        match read_full(&mut self.src, buf) {
            Ok(()) => self.scratch.get(),
            Err(e) => {
                self.fail("read_uint", e);
                0
            }
        }
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> u8 {
        self.read_uint(BitWidth::U8) as u8
    }

    /// Reads a `u16` in little-endian byte order.
    #[inline(always)]
    pub fn read_u16(&mut self) -> u16 {
        self.read_uint(BitWidth::U16) as u16
    }

    /// Reads a `u32` in little-endian byte order.
    #[inline(always)]
    pub fn read_u32(&mut self) -> u32 {
        self.read_uint(BitWidth::U32) as u32
    }

    /// Reads a `u64` in little-endian byte order.
    #[inline(always)]
    pub fn read_u64(&mut self) -> u64 {
        self.read_uint(BitWidth::U64)
    }

    /// Reads a length prefix of the given width, then exactly that many bytes.
    ///
    /// The prefix is trusted as-is. If the stream holds fewer bytes than it declares, the read
    /// fails with [`CodecError::ShortRead`]. Returns an empty vector on any failure.
    pub fn read_bytes(&mut self, width: BitWidth) -> Vec<u8> {
        let len = self.read_uint(width);
        if self.error.is_some() {
            return Vec::new();
        }

        // Bounded by PAYLOAD_PREALLOC_LIMIT, so the cast cannot truncate.
        let mut data = Vec::with_capacity(len.min(PAYLOAD_PREALLOC_LIMIT) as usize);
        let result = (&mut self.src).take(len).read_to_end(&mut data);
        match result {
            Ok(n) if n as u64 == len => data,
            Ok(n) => {
                self.fail(
                    "read_bytes",
                    CodecError::ShortRead {
                        expected: len,
                        actual: n as u64,
                    },
                );
                Vec::new()
            }
            Err(e) => {
                self.fail("read_bytes", e.into());
                Vec::new()
            }
        }
    }

    /// Reads a length-prefixed text field.
    ///
    /// The bytes are returned exactly as they appear in the stream; they are not required to
    /// be valid UTF-8. Returns an empty string on any failure.
    #[cfg(feature = "bstr")]
    pub fn read_string(&mut self, width: BitWidth) -> bstr::BString {
        bstr::BString::from(self.read_bytes(width))
    }

    /// Reads a length-prefixed text field and converts it to `String`.
    ///
    /// Byte sequences that are not valid UTF-8 are replaced with the Unicode replacement
    /// character.
    pub fn read_string_lossy(&mut self, width: BitWidth) -> String {
        match String::from_utf8(self.read_bytes(width)) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }

    #[cold]
    fn fail(&mut self, op: &'static str, error: CodecError) {
        tracing::debug!(op, %error, "binary reader failed; later reads return zero values");
        self.error = Some(error);
    }
}

/// Fills `buf` completely, or reports how many bytes arrived before the stream ended.
fn read_full<R: Read + ?Sized>(src: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(CodecError::ShortRead {
                    expected: buf.len() as u64,
                    actual: filled as u64,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CodecError::Io(e)),
        }
    }
    Ok(())
}
