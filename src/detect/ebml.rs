//! EBML tree walk for Matroska and WebM.
//!
//! EBML fields are variable-width: the count of leading zero bits in the
//! first byte gives the total field width (1..=8 bytes). An element is an
//! id field followed by a length field whose marker bit is cleared. The
//! DocType element (id 0x4282) names the container flavour.

use soapberry_token::token::{FixedString, U8};
use soapberry_token::{ByteSource, ReadOptions};

use super::{Detector, kind};
use crate::Result;
use crate::kind::FileKind;

const DOC_TYPE_ID: u64 = 0x4282;

/// Upper bound on a DocType payload; anything bigger is malformed.
const MAX_DOC_TYPE_LEN: u64 = 4096;

impl<S: ByteSource> Detector<'_, S> {
    /// Read one variable-width field. `None` on a width marker wider than
    /// EBML allows.
    fn read_ebml_field(&mut self) -> Result<Option<Vec<u8>>> {
        let msb = self.tokenizer.peek_number(&U8)?;
        let width = msb.leading_zeros() as usize + 1;
        if width > 8 {
            return Ok(None);
        }
        let mut field = vec![0u8; width];
        self.tokenizer
            .read_buffer(&mut field, ReadOptions::default())?;
        Ok(Some(field))
    }

    /// Read an `(id, payload_length)` element pair.
    fn read_ebml_element(&mut self) -> Result<Option<(u64, u64)>> {
        let Some(id_field) = self.read_ebml_field()? else {
            return Ok(None);
        };
        let Some(mut len_field) = self.read_ebml_field()? else {
            return Ok(None);
        };
        // The length field carries its width marker in-band; clear it.
        len_field[0] ^= 0x80 >> (len_field.len() - 1);

        let fold = |bytes: &[u8]| bytes.iter().fold(0u64, |acc, &b| acc << 8 | u64::from(b));
        Ok(Some((fold(&id_field), fold(&len_field))))
    }

    pub(super) fn parse_ebml(&mut self) -> Result<Option<FileKind>> {
        let Some((_, root_len)) = self.read_ebml_element()? else {
            return Ok(None);
        };

        let mut children = root_len;
        while children > 0 {
            let Some((id, len)) = self.read_ebml_element()? else {
                return Ok(None);
            };
            if id == DOC_TYPE_ID {
                if len > MAX_DOC_TYPE_LEN {
                    return Ok(None);
                }
                let raw = self.tokenizer.read_token(&FixedString::new(len as usize))?;
                let doc_type = raw.split('\0').next().unwrap_or_default();
                return Ok(match doc_type {
                    "webm" => Some(kind("webm", "video/webm")),
                    "matroska" => Some(kind("mkv", "video/x-matroska")),
                    _ => None,
                });
            }
            self.tokenizer.ignore(len)?;
            children -= 1;
        }
        Ok(None)
    }
}
