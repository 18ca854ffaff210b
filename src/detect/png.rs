//! PNG chunk chain: split plain PNG from animated PNG.

use soapberry_token::token::{FixedString, I32Be};
use soapberry_token::ByteSource;

use super::{Detector, kind};
use crate::Result;
use crate::kind::FileKind;

impl<S: ByteSource> Detector<'_, S> {
    /// An `acTL` chunk before the first `IDAT` marks an animated PNG.
    pub(super) fn parse_png(&mut self) -> Result<Option<FileKind>> {
        self.tokenizer.ignore(8)?;
        let size = self.size();
        loop {
            let length = self.tokenizer.read_number(&I32Be)?;
            let chunk_type = self.tokenizer.read_token(&FixedString::new(4))?;
            if length < 0 {
                return Ok(None);
            }
            match chunk_type.as_str() {
                "IDAT" => return Ok(Some(kind("png", "image/png"))),
                "acTL" => return Ok(Some(kind("apng", "image/apng"))),
                // Skip chunk payload plus its CRC.
                _ => {
                    self.tokenizer.ignore(length as u64 + 4)?;
                }
            }
            if self.tokenizer.position() + 8 >= size {
                break;
            }
        }
        Ok(Some(kind("png", "image/png")))
    }
}
