//! Forward-only, position-tracked tokenization over arbitrary byte sources.
//!
//! This crate provides the byte-level plumbing for signature-based format
//! detection: positional reads with explicit byte counts, peeks that do not
//! advance the logical position, skipping, and end-of-stream detection —
//! uniform across a memory-backed source and a one-shot stream source.
//!
//! # Reading from a buffer
//!
//! ```
//! use soapberry_token::{from_buffer, token::U32Be};
//!
//! let mut tokenizer = from_buffer(&[0x89, b'P', b'N', b'G']);
//! assert_eq!(tokenizer.peek_number(&U32Be)?, 0x8950_4E47);
//! assert_eq!(tokenizer.position(), 0);
//! assert_eq!(tokenizer.read_number(&U32Be)?, 0x8950_4E47);
//! assert_eq!(tokenizer.position(), 4);
//! # Ok::<(), soapberry_token::Error>(())
//! ```
//!
//! # Reading from a stream
//!
//! Any [`std::io::Read`] works as a source; peeks are buffered internally
//! and replayed to later reads in emission order.
//!
//! ```
//! use std::io::Cursor;
//! use soapberry_token::{from_stream, token::FixedString};
//!
//! let mut tokenizer = from_stream(Cursor::new(b"OggS\x00rest".to_vec()));
//! assert_eq!(tokenizer.peek_token(&FixedString::new(4))?, "OggS");
//! assert_eq!(tokenizer.read_token(&FixedString::new(4))?, "OggS");
//! # Ok::<(), soapberry_token::Error>(())
//! ```
#![forbid(unsafe_code)]

pub mod error;
pub mod source;
pub mod token;
mod tokenizer;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub use error::{Error, Result};
pub use source::{ByteSource, MemorySource, StreamSource};
pub use token::{Token, TokenWrite};
pub use tokenizer::{FileInfo, ReadOptions, Tokenizer};

/// Tokenizer over an in-memory byte slice.
pub type MemoryTokenizer<'a> = Tokenizer<MemorySource<'a>>;

/// Tokenizer over a one-shot readable stream.
pub type StreamTokenizer<R> = Tokenizer<StreamSource<R>>;

/// Tokenizer over a buffered file with a known size.
pub type FileTokenizer = StreamTokenizer<BufReader<File>>;

/// Tokenize an in-memory byte slice. The size is known up front.
pub fn from_buffer(data: &[u8]) -> MemoryTokenizer<'_> {
    Tokenizer::new(MemorySource::new(data), FileInfo::default())
}

/// Tokenize an in-memory byte slice with caller-supplied metadata.
pub fn from_buffer_with_info(data: &[u8], info: FileInfo) -> MemoryTokenizer<'_> {
    Tokenizer::new(MemorySource::new(data), info)
}

/// Tokenize a one-shot readable stream of unknown size.
pub fn from_stream<R: Read>(reader: R) -> StreamTokenizer<R> {
    Tokenizer::new(StreamSource::new(reader), FileInfo::default())
}

/// Tokenize a one-shot readable stream with caller-supplied metadata.
pub fn from_stream_with_info<R: Read>(reader: R, info: FileInfo) -> StreamTokenizer<R> {
    Tokenizer::new(StreamSource::new(reader), info)
}

/// Tokenize a file. The size is taken from filesystem metadata.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FileTokenizer> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    Ok(Tokenizer::new(
        StreamSource::with_size(BufReader::new(file), size),
        FileInfo {
            size: Some(size),
            mime_type: None,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_file_knows_the_size() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"\x89PNG\r\n\x1a\n").unwrap();

        let mut tokenizer = from_file(tmp.path()).unwrap();
        assert_eq!(tokenizer.file_info().size, Some(8));

        let mut magic = [0u8; 8];
        tokenizer
            .read_buffer(&mut magic, ReadOptions::default())
            .unwrap();
        assert_eq!(&magic, b"\x89PNG\r\n\x1a\n");
    }
}
