//! ASF object walk: split audio from video Windows Media.

use soapberry_token::token::U64Le;
use soapberry_token::{ByteSource, ReadOptions};

use super::{Detector, kind};
use crate::Result;
use crate::kind::FileKind;

/// Stream-Properties object (B7DC0791-A9B7-11CF-8EE6-00C00C205365).
const STREAM_PROPERTIES: [u8; 16] = [
    0x91, 0x07, 0xDC, 0xB7, 0xB7, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53,
    0x65,
];

/// Audio-Media stream type (F8699E40-5B4D-11CF-A8FD-00805F5C442B).
const AUDIO_MEDIA: [u8; 16] = [
    0x40, 0x9E, 0x69, 0xF8, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44,
    0x2B,
];

/// Video-Media stream type (BC19EFC0-5B4D-11CF-A8FD-00805F5C442B).
const VIDEO_MEDIA: [u8; 16] = [
    0xC0, 0xEF, 0x19, 0xBC, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44,
    0x2B,
];

impl<S: ByteSource> Detector<'_, S> {
    pub(super) fn parse_asf(&mut self) -> Result<Option<FileKind>> {
        // Skip the rest of the Header object preamble.
        self.tokenizer.ignore(30)?;
        let size = self.size();

        while self.tokenizer.position() + 24 < size {
            let mut guid = [0u8; 16];
            self.tokenizer.read_buffer(&mut guid, ReadOptions::default())?;
            let object_size = self.tokenizer.read_number(&U64Le)?;

            if guid == STREAM_PROPERTIES {
                let mut stream_type = [0u8; 16];
                self.tokenizer
                    .read_buffer(&mut stream_type, ReadOptions::default())?;
                if stream_type == AUDIO_MEDIA {
                    return Ok(Some(kind("asf", "audio/x-ms-asf")));
                }
                if stream_type == VIDEO_MEDIA {
                    return Ok(Some(kind("asf", "video/x-ms-asf")));
                }
                break;
            }

            // Object sizes come from the file; `ignore` clamps them to the
            // bytes actually left.
            self.tokenizer.ignore(object_size.saturating_sub(24))?;
        }

        Ok(Some(kind("asf", "application/vnd.ms-asf")))
    }
}
