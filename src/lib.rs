//! Longan - detect the file format of a byte stream from its content
//!
//! This library identifies the format of opaque bytes by inspecting a
//! bounded prefix of their content: no filename heuristics, no deep
//! validation, no payload decoding. Detection returns a [`FileKind`]
//! (extension + MIME type) drawn from a closed catalog, or `None` when no
//! signature matches.
//!
//! Detection works over three kinds of input:
//!
//! - **In-memory bytes** — [`detect_from_buffer`]
//! - **One-shot streams** (sockets, pipes, any [`std::io::Read`]) —
//!   [`detect_from_stream`], or [`DetectionStream`] to keep the data
//! - **Files** — [`detect_from_file`]
//!
//! # Example - Detecting from bytes
//!
//! ```
//! let kind = longan::detect_from_buffer(b"\x47\x49\x46\x38\x39\x61")?;
//! let kind = kind.expect("GIF header should be recognized");
//! assert_eq!(kind.ext, "gif");
//! assert_eq!(kind.mime, "image/gif");
//! # Ok::<(), longan::Error>(())
//! ```
//!
//! # Example - Annotating a stream
//!
//! ```no_run
//! use std::io::Read;
//! use longan::DetectionStream;
//!
//! let socket = std::net::TcpStream::connect("127.0.0.1:9000")?;
//! let mut stream = DetectionStream::new(socket)?;
//! if let Some(kind) = stream.file_kind() {
//!     println!("incoming {} ({})", kind.ext, kind.mime);
//! }
//! // The sampled bytes are replayed: read() yields the stream from byte 0.
//! let mut data = Vec::new();
//! stream.read_to_end(&mut data)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - Working with a tokenizer directly
//!
//! ```
//! use soapberry_token::from_buffer;
//!
//! let bytes = b"\x00\x00\x00\x18ftypavif\x00\x00\x00\x00";
//! let mut tokenizer = from_buffer(bytes);
//! let kind = longan::detect_from_tokenizer(&mut tokenizer)?;
//! assert_eq!(kind.map(|k| k.ext), Some("avif"));
//! # Ok::<(), longan::Error>(())
//! ```
#![forbid(unsafe_code)]

pub mod catalog;
mod detect;
mod kind;
mod stream;

use std::io::Read;
use std::path::Path;

pub use soapberry_token::{ByteSource, Error, FileInfo, Result, Tokenizer};

pub use kind::FileKind;
pub use stream::{DEFAULT_SAMPLE_SIZE, DetectionStream};

/// Detect the file kind of an in-memory byte slice.
///
/// Inputs of one byte or less are never recognized.
pub fn detect_from_buffer(bytes: &[u8]) -> Result<Option<FileKind>> {
    if bytes.len() <= 1 {
        return Ok(None);
    }
    let mut tokenizer = soapberry_token::from_buffer(bytes);
    detect::from_tokenizer(&mut tokenizer)
}

/// Detect the file kind of a one-shot readable stream.
///
/// Consumes as much of the stream as the probes need; use
/// [`DetectionStream`] to keep the data. The tokenizer wrapped around the
/// reader is released on every path.
pub fn detect_from_stream<R: Read>(reader: R) -> Result<Option<FileKind>> {
    let mut tokenizer = soapberry_token::from_stream(reader);
    detect::from_tokenizer(&mut tokenizer)
}

/// Detect the file kind of a file on disk.
pub fn detect_from_file<P: AsRef<Path>>(path: P) -> Result<Option<FileKind>> {
    let mut tokenizer = soapberry_token::from_file(path)?;
    detect::from_tokenizer(&mut tokenizer)
}

/// Detect the file kind from an existing tokenizer positioned at the start
/// of the candidate bytes.
///
/// This is the core entry point the other functions wrap. End-of-stream
/// while probing yields `Ok(None)`; IO errors and position misuse
/// propagate.
pub fn detect_from_tokenizer<S: ByteSource>(
    tokenizer: &mut Tokenizer<S>,
) -> Result<Option<FileKind>> {
    detect::from_tokenizer(tokenizer)
}

/// Ordered set of every extension the detector can report.
pub fn supported_extensions() -> &'static phf::OrderedSet<&'static str> {
    &catalog::EXTENSIONS
}

/// Ordered set of every MIME type the detector can report.
pub fn supported_mime_types() -> &'static phf::OrderedSet<&'static str> {
    &catalog::MIME_TYPES
}
