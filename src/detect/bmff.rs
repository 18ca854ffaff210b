//! ISO base media file format: `ftyp` major-brand mapping, plus the
//! JPEG 2000 branch of the same box structure.

use soapberry_token::token::FixedString;
use soapberry_token::ByteSource;

use super::{Detector, kind};
use crate::Result;
use crate::kind::FileKind;

impl<S: ByteSource> Detector<'_, S> {
    /// Map the 4-byte major brand at offset 8. NULs read as spaces, and
    /// short brands like `qt` arrive space-padded.
    pub(super) fn parse_ftyp(&mut self) -> Result<Option<FileKind>> {
        let brand: String = self.buffer[8..12]
            .iter()
            .map(|&b| if b == 0 { ' ' } else { char::from(b) })
            .collect();

        Ok(Some(match brand.trim() {
            "avif" | "avis" => kind("avif", "image/avif"),
            "mif1" => kind("heic", "image/heif"),
            "msf1" => kind("heic", "image/heif-sequence"),
            "heic" | "heix" => kind("heic", "image/heic"),
            "hevc" | "hevx" => kind("heic", "image/heic-sequence"),
            "qt" => kind("mov", "video/quicktime"),
            "M4V" | "M4VH" | "M4VP" => kind("m4v", "video/x-m4v"),
            "M4P" => kind("m4p", "video/mp4"),
            "M4B" => kind("m4b", "audio/mp4"),
            "M4A" => kind("m4a", "audio/x-m4a"),
            "F4V" => kind("f4v", "video/mp4"),
            "F4P" => kind("f4p", "video/mp4"),
            "F4A" => kind("f4a", "audio/mp4"),
            "F4B" => kind("f4b", "audio/mp4"),
            "crx" => kind("cr3", "image/x-canon-cr3"),
            other if other.starts_with("3g2") => kind("3g2", "video/3gpp2"),
            other if other.starts_with("3g") => kind("3gp", "video/3gpp"),
            _ => kind("mp4", "video/mp4"),
        }))
    }

    /// JPEG 2000 signature box, then the brand at offset 20.
    pub(super) fn parse_jp2(&mut self) -> Result<Option<FileKind>> {
        self.tokenizer.ignore(20)?;
        let brand = self.tokenizer.read_token(&FixedString::new(4))?;
        Ok(match brand.as_str() {
            "jp2 " => Some(kind("jp2", "image/jp2")),
            "jpx " => Some(kind("jpx", "image/jpx")),
            "jpm " => Some(kind("jpm", "image/jpm")),
            "mjp2" => Some(kind("mj2", "image/mj2")),
            _ => None,
        })
    }
}
