//! Reads and writes unsigned little-endian integers and length-prefixed byte/text fields over
//! any `std::io::Read` or `std::io::Write` stream.
//!
//! # Wire format
//! * Integers are unsigned, little-endian, 1, 2, 4 or 8 bytes wide (see [`BitWidth`]).
//! * A variable-length field is a length prefix (an integer of a caller-chosen width) followed
//!   by exactly that many raw bytes. There are no type tags, padding or terminators, so the
//!   decoder must replay the same sequence of operations and widths that the encoder used.
//!
//! # Sticky errors
//! [`BinaryReader`] and [`BinaryWriter`] record the first I/O failure and then stop touching the
//! stream. Every later read returns a zero value (`0`, or an empty field) and every later write
//! is a no-op. Callers can run a whole sequence of operations and check [`BinaryReader::error`]
//! (or [`BinaryWriter::error`]) once at the end.
//!
//! ```
//! use sticky_binary_io::{BinaryReader, BinaryWriter, BitWidth};
//!
//! let mut w = BinaryWriter::new(Vec::new());
//! w.write_string("hey ", BitWidth::U8);
//! w.write_uint(255, BitWidth::U16);
//! let buf = w.finish().unwrap();
//! assert_eq!(buf, [4, b'h', b'e', b'y', b' ', 0xff, 0x00]);
//!
//! let mut r = BinaryReader::new(buf.as_slice());
//! assert_eq!(r.read_bytes(BitWidth::U8), b"hey ");
//! assert_eq!(r.read_uint(BitWidth::U16), 255);
//! assert!(r.error().is_none());
//! ```

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod error;
mod reader;
mod width;
mod writer;


pub use error::{CodecError, InvalidBitWidth, Result};
pub use reader::BinaryReader;
pub use width::BitWidth;
pub use writer::BinaryWriter;
