//! TIFF header and IFD chain, covering the raw-photo descendants.

use soapberry_token::token::{U16Be, U16Le, U32Be, U32Le};
use soapberry_token::{ByteSource, Token};

use super::{Detector, kind};
use crate::Result;
use crate::kind::FileKind;

/// Sony raw compression tag.
const TAG_SONY_RAW_FILE_TYPE: u16 = 50341;
/// Adobe DNG version tag.
const TAG_DNG_VERSION: u16 = 50706;

impl<S: ByteSource> Detector<'_, S> {
    fn read_u16(&mut self, big_endian: bool) -> Result<u16> {
        if big_endian {
            self.tokenizer.read_number(&U16Be)
        } else {
            self.tokenizer.read_number(&U16Le)
        }
    }

    /// Walk the first IFD looking for maker-specific tags.
    fn read_tiff_ifd(&mut self, big_endian: bool) -> Result<Option<FileKind>> {
        let tag_count = self.read_u16(big_endian)?;
        for _ in 0..tag_count {
            let tag_id = self.read_u16(big_endian)?;
            // Each tag is 12 bytes; the id was already consumed.
            self.tokenizer.ignore(10)?;
            match tag_id {
                TAG_SONY_RAW_FILE_TYPE => return Ok(Some(kind("arw", "image/x-sony-arw"))),
                TAG_DNG_VERSION => return Ok(Some(kind("dng", "image/x-adobe-dng"))),
                _ => {}
            }
        }
        Ok(None)
    }

    /// Decide between classic TIFF, BigTIFF and the raw-camera variants
    /// that reuse the TIFF header. Returns `None` when the bytes after the
    /// byte-order mark don't form a TIFF header at all.
    pub(super) fn parse_tiff(&mut self, big_endian: bool) -> Result<Option<FileKind>> {
        if self.sampled < 8 {
            return Ok(None);
        }
        let (version, ifd_offset) = if big_endian {
            (
                U16Be.get(&self.buffer[2..])?,
                U32Be.get(&self.buffer[4..])?,
            )
        } else {
            (
                U16Le.get(&self.buffer[2..])?,
                U32Le.get(&self.buffer[4..])?,
            )
        };

        if version == 43 {
            // BigTIFF
            return Ok(Some(kind("tif", "image/tiff")));
        }
        if version != 42 {
            return Ok(None);
        }

        if ifd_offset >= 6 {
            if self.check_str("CR", 8) {
                return Ok(Some(kind("cr2", "image/x-canon-cr2")));
            }
            if ifd_offset >= 8
                && (self.check_at(&[0x1C, 0x00, 0xFE, 0x00], 8)
                    || self.check_at(&[0x1F, 0x00, 0x0B, 0x00], 8))
            {
                return Ok(Some(kind("nef", "image/x-nikon-nef")));
            }
        }

        self.tokenizer.ignore(u64::from(ifd_offset))?;
        if let Some(found) = self.read_tiff_ifd(big_endian)? {
            return Ok(Some(found));
        }
        Ok(Some(kind("tif", "image/tiff")))
    }
}
