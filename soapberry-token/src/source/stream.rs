//! Stream-backed byte source with peek support.

use std::io::Read;

use crate::error::{Error, Result};
use crate::source::ByteSource;

/// Largest single pull from the underlying reader; bigger requests loop.
const MAX_SINGLE_PULL: usize = 1024 * 1024;

/// Scratch chunk used when discarding skipped bytes.
const DISCARD_CHUNK: usize = 256 * 1024;

/// Byte source over a one-shot [`Read`] stream.
///
/// Peeked bytes are parked in a lookahead buffer and replayed to subsequent
/// reads in the exact order the stream emitted them. The stream itself is
/// only ever pulled forward.
#[derive(Debug)]
pub struct StreamSource<R> {
    reader: R,
    lookahead: Vec<u8>,
    cursor: usize,
    eof: bool,
    size: Option<u64>,
}

impl<R: Read> StreamSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            lookahead: Vec::new(),
            cursor: 0,
            eof: false,
            size: None,
        }
    }

    /// A stream source whose total length is known up front, e.g. a file.
    pub fn with_size(reader: R, size: u64) -> Self {
        Self {
            size: Some(size),
            ..Self::new(reader)
        }
    }

    #[inline]
    fn buffered(&self) -> usize {
        self.lookahead.len() - self.cursor
    }

    /// Pull from the reader into `dst`, retrying on interruption.
    fn pull(&mut self, dst: &mut [u8]) -> Result<usize> {
        if self.eof {
            return Ok(0);
        }
        loop {
            let want = dst.len().min(MAX_SINGLE_PULL);
            match self.reader.read(&mut dst[..want]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(0);
                }
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Grow the lookahead until it holds `wanted` bytes or the stream ends.
    fn fill_lookahead(&mut self, wanted: usize) -> Result<()> {
        while self.buffered() < wanted && !self.eof {
            if self.cursor > 0 {
                self.lookahead.drain(..self.cursor);
                self.cursor = 0;
            }
            let old = self.lookahead.len();
            let want = (wanted - old).min(MAX_SINGLE_PULL);
            self.lookahead.resize(old + want, 0);
            loop {
                match self.reader.read(&mut self.lookahead[old..]) {
                    Ok(0) => {
                        self.eof = true;
                        self.lookahead.truncate(old);
                        break;
                    }
                    Ok(n) => {
                        self.lookahead.truncate(old + n);
                        break;
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        self.lookahead.truncate(old);
                        return Err(e.into());
                    }
                }
            }
        }
        Ok(())
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn read(&mut self, dst: &mut [u8], may_be_less: bool) -> Result<usize> {
        let mut filled = 0;

        // Replay lookahead first, in emission order.
        let buffered = self.buffered();
        if buffered > 0 {
            let n = buffered.min(dst.len());
            dst[..n].copy_from_slice(&self.lookahead[self.cursor..self.cursor + n]);
            self.cursor += n;
            if self.cursor == self.lookahead.len() {
                self.lookahead.clear();
                self.cursor = 0;
            }
            filled = n;
        }

        while filled < dst.len() {
            let n = self.pull(&mut dst[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        if filled < dst.len() && !may_be_less {
            return Err(Error::EndOfStream);
        }
        Ok(filled)
    }

    fn peek(&mut self, dst: &mut [u8], may_be_less: bool) -> Result<usize> {
        self.fill_lookahead(dst.len())?;
        let n = self.buffered().min(dst.len());
        dst[..n].copy_from_slice(&self.lookahead[self.cursor..self.cursor + n]);
        if n < dst.len() && !may_be_less {
            return Err(Error::EndOfStream);
        }
        Ok(n)
    }

    fn skip(&mut self, length: u64) -> Result<u64> {
        // Drop buffered lookahead before touching the reader.
        let mut total = (self.buffered() as u64).min(length);
        self.cursor += total as usize;
        if self.cursor == self.lookahead.len() {
            self.lookahead.clear();
            self.cursor = 0;
        }

        if total < length {
            let mut scratch = vec![0u8; ((length - total).min(DISCARD_CHUNK as u64)) as usize];
            while total < length {
                let want = ((length - total) as usize).min(scratch.len());
                let n = self.pull(&mut scratch[..want])?;
                if n == 0 {
                    break;
                }
                total += n as u64;
            }
        }
        Ok(total)
    }

    #[inline]
    fn size(&self) -> Option<u64> {
        self.size
    }
}
