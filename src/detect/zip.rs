//! ZIP local-file-header walk.
//!
//! OOXML, ODF, EPUB, XPI and 3MF are all ZIP containers; their identity is
//! decided by entry names (or the stored `mimetype` payload) found while
//! walking the local file headers in order. Anything else that starts with
//! `PK\x03\x04` is reported as plain `zip`.

use memchr::memmem;
use soapberry_token::token::{FixedString, U16Le, U32Le};
use soapberry_token::{ByteSource, Error, ReadOptions, Token};

use super::{Detector, kind};
use crate::Result;
use crate::kind::FileKind;

const LOCAL_HEADER_SIG: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

/// Fixed part of a local file header, after the 4-byte signature.
struct LocalHeader {
    compressed_size: u64,
    uncompressed_size: u64,
    filename_len: usize,
    extra_len: u64,
}

impl LocalHeader {
    fn parse(raw: &[u8; 30]) -> Result<Self> {
        Ok(Self {
            compressed_size: u64::from(U32Le.get(&raw[18..])?),
            uncompressed_size: u64::from(U32Le.get(&raw[22..])?),
            filename_len: usize::from(U16Le.get(&raw[26..])?),
            extra_len: u64::from(U16Le.get(&raw[28..])?),
        })
    }
}

impl<S: ByteSource> Detector<'_, S> {
    pub(super) fn parse_zip(&mut self) -> Result<Option<FileKind>> {
        match self.walk_zip() {
            // Ran off the end without a more specific marker.
            Err(Error::EndOfStream) | Ok(None) => Ok(Some(kind("zip", "application/zip"))),
            other => other,
        }
    }

    fn walk_zip(&mut self) -> Result<Option<FileKind>> {
        let size = self.size();
        while self.tokenizer.position() + 30 < size {
            let mut raw = [0u8; 30];
            self.tokenizer.read_buffer(&mut raw, ReadOptions::default())?;
            let header = LocalHeader::parse(&raw)?;

            let filename = self
                .tokenizer
                .read_token(&FixedString::new(header.filename_len))?;
            self.tokenizer.ignore(header.extra_len)?;

            // Signed Mozilla add-on.
            if filename == "META-INF/mozilla.rsa" {
                return Ok(Some(kind("xpi", "application/x-xpinstall")));
            }

            // OOXML packages carry their parts under a telltale first path
            // component.
            if filename.ends_with(".rels") || filename.ends_with(".xml") {
                match filename.split('/').next().unwrap_or_default() {
                    "_rels" => {}
                    "word" => {
                        return Ok(Some(kind(
                            "docx",
                            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                        )));
                    }
                    "ppt" => {
                        return Ok(Some(kind(
                            "pptx",
                            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
                        )));
                    }
                    "xl" => {
                        return Ok(Some(kind(
                            "xlsx",
                            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                        )));
                    }
                    _ => {}
                }
            }
            if filename.starts_with("xl/") {
                return Ok(Some(kind(
                    "xlsx",
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                )));
            }
            if filename.starts_with("3D/") && filename.ends_with(".model") {
                return Ok(Some(kind("3mf", "model/3mf")));
            }

            // EPUB and ODF declare themselves in a stored `mimetype` entry.
            if filename == "mimetype" && header.compressed_size == header.uncompressed_size {
                let payload = self
                    .tokenizer
                    .read_token(&FixedString::new(header.compressed_size as usize))?;
                match payload.trim() {
                    "application/epub+zip" => {
                        return Ok(Some(kind("epub", "application/epub+zip")));
                    }
                    "application/vnd.oasis.opendocument.text" => {
                        return Ok(Some(kind("odt", "application/vnd.oasis.opendocument.text")));
                    }
                    "application/vnd.oasis.opendocument.spreadsheet" => {
                        return Ok(Some(kind(
                            "ods",
                            "application/vnd.oasis.opendocument.spreadsheet",
                        )));
                    }
                    "application/vnd.oasis.opendocument.presentation" => {
                        return Ok(Some(kind(
                            "odp",
                            "application/vnd.oasis.opendocument.presentation",
                        )));
                    }
                    _ => {}
                }
            }

            if header.compressed_size == 0 {
                // Streamed entry with a data descriptor: resync on the next
                // local-header signature.
                let mut resynced = false;
                while !resynced && self.tokenizer.position() < size {
                    let sampled = self
                        .tokenizer
                        .peek_buffer(&mut self.buffer, ReadOptions::tolerant())?;
                    if sampled == 0 {
                        return Err(Error::EndOfStream);
                    }
                    match memmem::find(&self.buffer[..sampled], LOCAL_HEADER_SIG) {
                        Some(index) => {
                            self.tokenizer.ignore(index as u64)?;
                            resynced = true;
                        }
                        None => {
                            self.tokenizer.ignore(sampled as u64)?;
                        }
                    }
                }
            } else {
                self.tokenizer.ignore(header.compressed_size)?;
            }
        }
        Ok(None)
    }
}
