//! Ogg container: the first page payload names the codec.

use soapberry_token::{ByteSource, ReadOptions};

use super::{Detector, kind};
use crate::Result;
use crate::kind::FileKind;

impl<S: ByteSource> Detector<'_, S> {
    pub(super) fn parse_ogg(&mut self) -> Result<Option<FileKind>> {
        // 28 bytes of page header, then the payload starts with the codec
        // identification header.
        self.tokenizer.ignore(28)?;
        let mut payload = [0u8; 8];
        self.tokenizer
            .read_buffer(&mut payload, ReadOptions::default())?;

        if payload.starts_with(b"OpusHead") {
            return Ok(Some(kind("opus", "audio/opus")));
        }
        if payload.starts_with(b"\x80theora") {
            return Ok(Some(kind("ogv", "video/ogg")));
        }
        if payload.starts_with(b"\x01video\x00") {
            return Ok(Some(kind("ogm", "video/ogg")));
        }
        if payload.starts_with(b"\x7FFLAC") {
            return Ok(Some(kind("oga", "audio/ogg")));
        }
        if payload.starts_with(b"Speex  ") {
            return Ok(Some(kind("spx", "audio/ogg")));
        }
        if payload.starts_with(b"\x01vorbis") {
            return Ok(Some(kind("ogg", "audio/ogg")));
        }
        Ok(Some(kind("ogx", "application/ogg")))
    }
}
