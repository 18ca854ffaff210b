//! Position-tracked tokenizer over a byte source.

use std::fmt;

use crate::error::{Error, Result};
use crate::source::ByteSource;
use crate::token::Token;

/// Metadata about the byte sequence being tokenized.
#[derive(Debug, Clone, Default)]
pub struct FileInfo {
    /// Total size in bytes, when known.
    pub size: Option<u64>,
    /// MIME type hint supplied by the caller, if any.
    pub mime_type: Option<String>,
}

/// Position-normalised options for buffer reads and peeks.
///
/// `position` is absolute and must not lie behind the current cursor. With
/// `may_be_less`, short reads at end-of-stream return the actual count
/// instead of failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    pub position: Option<u64>,
    pub may_be_less: bool,
}

impl ReadOptions {
    /// Options that tolerate a short read at end-of-stream.
    #[inline]
    pub fn tolerant() -> Self {
        Self {
            position: None,
            may_be_less: true,
        }
    }

    /// Options reading at an absolute position at or past the cursor.
    #[inline]
    pub fn at(position: u64) -> Self {
        Self {
            position: Some(position),
            may_be_less: false,
        }
    }
}

/// Forward-only cursor over a [`ByteSource`] with token-typed reads.
///
/// The position only ever increases; peeks observe upcoming bytes without
/// moving it. The tokenizer exclusively owns the source's read capability.
pub struct Tokenizer<S> {
    source: S,
    info: FileInfo,
    position: u64,
}

impl<S: fmt::Debug> fmt::Debug for Tokenizer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("source", &self.source)
            .field("info", &self.info)
            .field("position", &self.position)
            .finish()
    }
}

impl<S: ByteSource> Tokenizer<S> {
    /// Wrap a source. When `info.size` is unset, the source's own size is
    /// used.
    pub fn new(source: S, mut info: FileInfo) -> Self {
        if info.size.is_none() {
            info.size = source.size();
        }
        Self {
            source,
            info,
            position: 0,
        }
    }

    /// Current logical position in bytes from the start of the source.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    #[inline]
    pub fn file_info(&self) -> &FileInfo {
        &self.info
    }

    #[inline]
    pub fn file_info_mut(&mut self) -> &mut FileInfo {
        &mut self.info
    }

    fn normalize(&mut self, opts: ReadOptions) -> Result<()> {
        if let Some(requested) = opts.position {
            if requested < self.position {
                return Err(Error::InvalidPosition {
                    requested,
                    current: self.position,
                });
            }
            let delta = requested - self.position;
            if delta > 0 {
                self.ignore(delta)?;
            }
        }
        Ok(())
    }

    /// Read into `dst`, advancing the cursor by the byte count returned.
    ///
    /// When `opts.position` lies ahead of the cursor, the gap is skipped
    /// first. A position behind the cursor fails with
    /// [`Error::InvalidPosition`].
    pub fn read_buffer(&mut self, dst: &mut [u8], opts: ReadOptions) -> Result<usize> {
        self.normalize(opts)?;
        if dst.is_empty() {
            return Ok(0);
        }
        let n = self.source.read(dst, opts.may_be_less)?;
        self.position += n as u64;
        Ok(n)
    }

    /// Peek into `dst` without advancing the cursor.
    ///
    /// A peek ahead of the cursor is synthesized by peeking into a larger
    /// scratch buffer and copying the tail, so it works on one-shot streams
    /// too.
    pub fn peek_buffer(&mut self, dst: &mut [u8], opts: ReadOptions) -> Result<usize> {
        if let Some(requested) = opts.position {
            if requested < self.position {
                return Err(Error::InvalidPosition {
                    requested,
                    current: self.position,
                });
            }
            let delta = (requested - self.position) as usize;
            if delta > 0 {
                let mut scratch = vec![0u8; delta + dst.len()];
                let n = self.source.peek(&mut scratch, opts.may_be_less)?;
                let avail = n.saturating_sub(delta).min(dst.len());
                dst[..avail].copy_from_slice(&scratch[delta..delta + avail]);
                return Ok(avail);
            }
        }
        self.source.peek(dst, opts.may_be_less)
    }

    /// Read a token, failing with [`Error::EndOfStream`] when short.
    pub fn read_token<T: Token>(&mut self, token: &T) -> Result<T::Value> {
        let mut buf = vec![0u8; token.len()];
        self.read_buffer(&mut buf, ReadOptions::default())?;
        token.get(&buf)
    }

    /// Peek a token without advancing the cursor.
    pub fn peek_token<T: Token>(&mut self, token: &T) -> Result<T::Value> {
        let mut buf = vec![0u8; token.len()];
        self.peek_buffer(&mut buf, ReadOptions::default())?;
        token.get(&buf)
    }

    /// Read a numeric token of at most 8 bytes without heap allocation.
    pub fn read_number<T: Token>(&mut self, token: &T) -> Result<T::Value> {
        let mut buf = [0u8; 8];
        let len = token.len();
        if len > buf.len() {
            return Err(Error::InsufficientData {
                expected: len,
                available: buf.len(),
            });
        }
        self.read_buffer(&mut buf[..len], ReadOptions::default())?;
        token.get(&buf[..len])
    }

    /// Peek a numeric token of at most 8 bytes without heap allocation.
    pub fn peek_number<T: Token>(&mut self, token: &T) -> Result<T::Value> {
        let mut buf = [0u8; 8];
        let len = token.len();
        if len > buf.len() {
            return Err(Error::InsufficientData {
                expected: len,
                available: buf.len(),
            });
        }
        self.peek_buffer(&mut buf[..len], ReadOptions::default())?;
        token.get(&buf[..len])
    }

    /// Advance the cursor by up to `length` bytes, returning the count
    /// actually skipped.
    ///
    /// When the total size is known the skip is clamped to the bytes left.
    pub fn ignore(&mut self, length: u64) -> Result<u64> {
        let clamped = match self.info.size {
            Some(size) => length.min(size.saturating_sub(self.position)),
            None => length,
        };
        let skipped = self.source.skip(clamped)?;
        self.position += skipped;
        Ok(skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemorySource, StreamSource};
    use crate::token::{FixedString, SyncSafeU32, U16Be, U16Le, U32Be, U8};
    use std::io::Cursor;

    fn memory(data: &[u8]) -> Tokenizer<MemorySource<'_>> {
        Tokenizer::new(MemorySource::new(data), FileInfo::default())
    }

    #[test]
    fn position_tracks_reads_and_skips() {
        let data = b"RIFF\x24\x00\x00\x00WAVE";
        let mut t = memory(data);
        assert_eq!(t.position(), 0);
        assert_eq!(t.read_token(&FixedString::new(4)).unwrap(), "RIFF");
        assert_eq!(t.position(), 4);
        t.ignore(4).unwrap();
        assert_eq!(t.position(), 8);
        assert_eq!(t.read_number(&U16Le).unwrap(), u16::from_le_bytes(*b"WA"));
        assert_eq!(t.position(), 10);
    }

    #[test]
    fn peek_does_not_advance() {
        let data = [0x12, 0x34, 0x56, 0x78];
        let mut t = memory(&data);
        assert_eq!(t.peek_number(&U16Be).unwrap(), 0x1234);
        assert_eq!(t.peek_number(&U16Be).unwrap(), 0x1234);
        assert_eq!(t.position(), 0);
        assert_eq!(t.read_number(&U32Be).unwrap(), 0x1234_5678);
    }

    #[test]
    fn positioned_read_skips_the_gap() {
        let data: Vec<u8> = (0u8..32).collect();
        let mut t = memory(&data);
        let mut dst = [0u8; 2];
        t.read_buffer(&mut dst, ReadOptions::at(10)).unwrap();
        assert_eq!(dst, [10, 11]);
        assert_eq!(t.position(), 12);
    }

    #[test]
    fn positioned_peek_on_a_stream_is_synthesized() {
        let data: Vec<u8> = (0u8..32).collect();
        let mut t = Tokenizer::new(
            StreamSource::new(Cursor::new(data.clone())),
            FileInfo::default(),
        );
        let mut dst = [0u8; 4];
        t.peek_buffer(&mut dst, ReadOptions::at(8)).unwrap();
        assert_eq!(dst, [8, 9, 10, 11]);
        assert_eq!(t.position(), 0);

        // The stream still replays everything from the start.
        let mut all = vec![0u8; 32];
        t.read_buffer(&mut all, ReadOptions::default()).unwrap();
        assert_eq!(all, data);
    }

    #[test]
    fn backwards_position_is_rejected_on_both_paths() {
        let data = [0u8; 16];
        let mut t = memory(&data);
        t.ignore(8).unwrap();
        let mut dst = [0u8; 1];
        assert!(matches!(
            t.read_buffer(&mut dst, ReadOptions::at(4)),
            Err(Error::InvalidPosition {
                requested: 4,
                current: 8
            })
        ));
        assert!(matches!(
            t.peek_buffer(&mut dst, ReadOptions::at(4)),
            Err(Error::InvalidPosition { .. })
        ));
    }

    #[test]
    fn ignore_clamps_to_known_size() {
        let data = [0u8; 20];
        let mut t = memory(&data);
        assert_eq!(t.ignore(15).unwrap(), 15);
        assert_eq!(t.ignore(100).unwrap(), 5);
        assert_eq!(t.position(), 20);
    }

    #[test]
    fn strict_token_read_past_end_is_end_of_stream() {
        let data = [0x01, 0x02];
        let mut t = memory(&data);
        assert!(matches!(
            t.read_number(&U32Be),
            Err(Error::EndOfStream)
        ));
    }

    #[test]
    fn tolerant_short_peek_returns_actual_count() {
        let data = [0x01, 0x02, 0x03];
        let mut t = memory(&data);
        let mut dst = [0u8; 12];
        assert_eq!(t.peek_buffer(&mut dst, ReadOptions::tolerant()).unwrap(), 3);
        assert_eq!(&dst[..3], &data);
    }

    #[test]
    fn sync_safe_number_reads_like_id3() {
        // 6-byte ID3 preamble, then the sync-safe tag length.
        let data = [b'I', b'D', b'3', 0x04, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01];
        let mut t = memory(&data);
        t.ignore(6).unwrap();
        assert_eq!(t.read_number(&SyncSafeU32).unwrap(), 257);
    }

    #[test]
    fn size_comes_from_source_unless_overridden() {
        let data = [0u8; 7];
        let t = memory(&data);
        assert_eq!(t.file_info().size, Some(7));

        let t = Tokenizer::new(
            StreamSource::new(Cursor::new(vec![0u8; 7])),
            FileInfo::default(),
        );
        assert_eq!(t.file_info().size, None);

        let t = Tokenizer::new(
            StreamSource::new(Cursor::new(vec![0u8; 7])),
            FileInfo {
                size: Some(7),
                mime_type: None,
            },
        );
        assert_eq!(t.file_info().size, Some(7));
    }

    #[test]
    fn read_u8_token() {
        let mut t = memory(&[0xFF]);
        assert_eq!(t.read_number(&U8).unwrap(), 0xFF);
    }
}
