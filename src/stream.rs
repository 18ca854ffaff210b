//! Pass-through reader that annotates a stream with its detected kind.

use std::io::{self, Read};

use crate::Result;
use crate::kind::FileKind;

/// Default number of bytes sampled from the head of the stream.
pub const DEFAULT_SAMPLE_SIZE: usize = 4100;

/// A [`Read`] adapter that sniffs the format of a wrapped stream.
///
/// Construction reads a bounded prefix, runs detection on it, and keeps the
/// prefix around; reading from the adapter replays the sampled bytes first
/// and then continues with the remainder of the underlying stream, so no
/// data is lost.
///
/// # Examples
///
/// ```
/// use std::io::{Cursor, Read};
/// use longan::DetectionStream;
///
/// let payload = b"GIF89a...image data...".to_vec();
/// let mut stream = DetectionStream::new(Cursor::new(payload.clone()))?;
/// assert_eq!(stream.file_kind().map(|kind| kind.ext), Some("gif"));
///
/// let mut replayed = Vec::new();
/// stream.read_to_end(&mut replayed)?;
/// assert_eq!(replayed, payload);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct DetectionStream<R> {
    kind: Option<FileKind>,
    prefix: io::Cursor<Vec<u8>>,
    inner: R,
}

impl<R: Read> DetectionStream<R> {
    /// Sample [`DEFAULT_SAMPLE_SIZE`] bytes and detect.
    pub fn new(reader: R) -> Result<Self> {
        Self::with_sample_size(reader, DEFAULT_SAMPLE_SIZE)
    }

    /// Sample up to `sample_size` bytes and detect. Formats whose
    /// signatures sit past the sample go undetected, so small values trade
    /// coverage for latency.
    pub fn with_sample_size(mut reader: R, sample_size: usize) -> Result<Self> {
        let mut prefix = vec![0u8; sample_size];
        let mut filled = 0;
        while filled < prefix.len() {
            match reader.read(&mut prefix[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        prefix.truncate(filled);

        let kind = crate::detect_from_buffer(&prefix)?;
        Ok(Self {
            kind,
            prefix: io::Cursor::new(prefix),
            inner: reader,
        })
    }

    /// The kind detected from the sampled prefix, if any.
    #[inline]
    pub fn file_kind(&self) -> Option<FileKind> {
        self.kind
    }

    /// Unwrap the underlying reader, discarding any unreplayed prefix.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for DetectionStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let replayed = self.prefix.read(buf)?;
        if replayed > 0 {
            return Ok(replayed);
        }
        self.inner.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn annotates_and_replays_the_full_stream() {
        let mut payload = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x00IDAT".to_vec();
        payload.extend_from_slice(&vec![0x42u8; 9000]);

        let mut stream = DetectionStream::new(Cursor::new(payload.clone())).unwrap();
        assert_eq!(stream.file_kind().map(|kind| kind.ext), Some("png"));

        let mut replayed = Vec::new();
        stream.read_to_end(&mut replayed).unwrap();
        assert_eq!(replayed, payload);
    }

    #[test]
    fn small_sample_limits_detection_but_not_the_data() {
        let mut payload = vec![0u8; 200];
        payload[128..132].copy_from_slice(b"DICM");

        // 64 bytes is not enough to see the DICOM magic at offset 128.
        let mut stream =
            DetectionStream::with_sample_size(Cursor::new(payload.clone()), 64).unwrap();
        assert_eq!(stream.file_kind(), None);

        let mut replayed = Vec::new();
        stream.read_to_end(&mut replayed).unwrap();
        assert_eq!(replayed, payload);
    }

    #[test]
    fn empty_stream_is_unknown_and_empty() {
        let mut stream = DetectionStream::new(Cursor::new(Vec::new())).unwrap();
        assert_eq!(stream.file_kind(), None);
        let mut replayed = Vec::new();
        stream.read_to_end(&mut replayed).unwrap();
        assert!(replayed.is_empty());
    }
}
