//! Signature-matching dispatcher.
//!
//! The detector peeks a small sample of the tokenizer, then cascades through
//! probes ordered by prefix length and selectivity. Container formats hand
//! off to sub-walkers that advance the tokenizer; everything else decides
//! from the sample alone. The sample starts at 12 bytes and escalates to
//! 24, 256 and 512 bytes at fixed points in the cascade.

mod asf;
mod bmff;
mod ebml;
mod ogg;
mod png;
mod tar;
mod tiff;
mod zip;


use memchr::memmem;
use soapberry_token::token::U32Le;
use soapberry_token::{ByteSource, Error, ReadOptions, Token, Tokenizer};

use crate::Result;
use crate::kind::FileKind;

/// Resident sample buffer size; probes never look further than this without
/// an explicit container walk.
const SAMPLE_SIZE: usize = 4100;

#[inline]
pub(crate) const fn kind(ext: &'static str, mime: &'static str) -> FileKind {
    FileKind { ext, mime }
}

/// Run detection against a tokenizer positioned at the candidate start.
///
/// End-of-stream anywhere inside the cascade means "ran out of bytes while
/// probing" and is converted to `None`; real IO errors propagate.
pub(crate) fn from_tokenizer<S: ByteSource>(
    tokenizer: &mut Tokenizer<S>,
) -> Result<Option<FileKind>> {
    let mut detector = Detector {
        tokenizer,
        buffer: vec![0u8; SAMPLE_SIZE],
        sampled: 0,
    };
    match detector.parse() {
        Err(Error::EndOfStream) => Ok(None),
        other => other,
    }
}

struct Detector<'t, S> {
    tokenizer: &'t mut Tokenizer<S>,
    /// Peek window starting at the tokenizer's current position.
    buffer: Vec<u8>,
    /// Bytes of `buffer` actually filled by the last sample.
    sampled: usize,
}

impl<S: ByteSource> Detector<'_, S> {
    /// Known size, or the effectively-infinite sentinel for short pipes.
    fn size(&self) -> u64 {
        self.tokenizer.file_info().size.unwrap_or(u64::MAX)
    }

    /// Grow the peek window to `len` bytes. Idempotent with respect to the
    /// tokenizer position; short files yield a short window.
    fn sample(&mut self, len: usize) -> Result<()> {
        let want = (len as u64).min(self.size()).min(SAMPLE_SIZE as u64) as usize;
        if want <= self.sampled {
            return Ok(());
        }
        self.sampled = self
            .tokenizer
            .peek_buffer(&mut self.buffer[..want], ReadOptions::tolerant())?;
        Ok(())
    }

    /// Byte-equality probe at `offset`. Sample bytes beyond the peeked
    /// length never match.
    fn check_at(&self, sig: &[u8], offset: usize) -> bool {
        let Some(end) = offset.checked_add(sig.len()) else {
            return false;
        };
        end <= self.sampled && &self.buffer[offset..end] == sig
    }

    #[inline]
    fn check(&self, sig: &[u8]) -> bool {
        self.check_at(sig, 0)
    }

    #[inline]
    fn check_str(&self, sig: &str, offset: usize) -> bool {
        self.check_at(sig.as_bytes(), offset)
    }

    /// Masked probe: each sample byte is AND-ed with its mask before the
    /// comparison.
    fn check_masked(&self, sig: &[u8], offset: usize, mask: &[u8]) -> bool {
        let Some(end) = offset.checked_add(sig.len()) else {
            return false;
        };
        if end > self.sampled {
            return false;
        }
        sig.iter()
            .zip(mask)
            .enumerate()
            .all(|(i, (&want, &m))| (self.buffer[offset + i] & m) == want)
    }

    fn parse(&mut self) -> Result<Option<FileKind>> {
        if self.tokenizer.file_info().size.is_none() {
            // Unknown length: container walks still need an upper bound.
            self.tokenizer.file_info_mut().size = Some(u64::MAX);
        }

        self.sample(12)?;

        // -- 2-byte signatures --

        if self.check(b"BM") {
            return Ok(Some(kind("bmp", "image/bmp")));
        }
        if self.check(&[0x0B, 0x77]) {
            return Ok(Some(kind("ac3", "audio/vnd.dolby.dd-raw")));
        }
        if self.check(&[0x78, 0x01]) {
            return Ok(Some(kind("dmg", "application/x-apple-diskimage")));
        }
        if self.check(b"MZ") {
            return Ok(Some(kind("exe", "application/x-msdownload")));
        }
        if self.check(b"%!") {
            self.sample(24)?;
            if self.check_str("PS-Adobe-", 2) && self.check_str(" EPSF-", 14) {
                return Ok(Some(kind("eps", "application/eps")));
            }
            return Ok(Some(kind("ps", "application/postscript")));
        }
        if self.check(&[0x1F, 0xA0]) || self.check(&[0x1F, 0x9D]) {
            return Ok(Some(kind("Z", "application/x-compress")));
        }
        if self.check(&[0xC7, 0x71]) {
            return Ok(Some(kind("cpio", "application/x-cpio")));
        }
        if self.check(&[0x60, 0xEA]) {
            return Ok(Some(kind("arj", "application/x-arj")));
        }
        if self.check(&[0xFF, 0x0A]) {
            return Ok(Some(kind("jxl", "image/jxl")));
        }
        if self.check(&[0xFF, 0xFE]) {
            // UTF-16 LE BOM: probe the handful of known UTF-16 formats,
            // otherwise give up on what is presumably text.
            self.sample(64)?;
            if self.check_at(
                &[0x3C, 0x00, 0x3F, 0x00, 0x78, 0x00, 0x6D, 0x00, 0x6C, 0x00],
                2,
            ) {
                return Ok(Some(kind("xml", "application/xml")));
            }
            let sketchup: Vec<u8> = [0xFF, 0x0E]
                .into_iter()
                .chain("SketchUp Model".bytes().flat_map(|b| [b, 0x00]))
                .collect();
            if self.check_at(&sketchup, 2) {
                return Ok(Some(kind("skp", "application/vnd.sketchup.skp")));
            }
            return Ok(None);
        }
        if self.check(&[0xFE, 0xFF]) {
            // UTF-16 BE BOM
            self.sample(64)?;
            if self.check_at(
                &[0x00, 0x3C, 0x00, 0x3F, 0x00, 0x78, 0x00, 0x6D, 0x00, 0x6C],
                2,
            ) {
                return Ok(Some(kind("xml", "application/xml")));
            }
            return Ok(None);
        }

        // -- 3-byte signatures --

        if self.check(&[0xEF, 0xBB, 0xBF]) {
            // UTF-8 BOM: skip it and restart detection on the remainder.
            self.tokenizer.ignore(3)?;
            return from_tokenizer(self.tokenizer);
        }
        if self.check(b"GIF") {
            return Ok(Some(kind("gif", "image/gif")));
        }
        if self.check(&[0x49, 0x49, 0xBC]) {
            return Ok(Some(kind("jxr", "image/vnd.ms-photo")));
        }
        if self.check(&[0x1F, 0x8B, 0x08]) {
            return Ok(Some(kind("gz", "application/gzip")));
        }
        if self.check(b"BZh") {
            return Ok(Some(kind("bz2", "application/x-bzip2")));
        }
        if self.check(b"ID3") {
            return self.parse_id3();
        }
        if self.check(b"MP+") {
            return Ok(Some(kind("mpc", "audio/x-musepack")));
        }
        if self.check(&[0x43, 0x57, 0x53]) || self.check(&[0x46, 0x57, 0x53]) {
            return Ok(Some(kind("swf", "application/x-shockwave-flash")));
        }
        if self.check(&[0xFF, 0xD8, 0xFF]) {
            return Ok(Some(kind("jpg", "image/jpeg")));
        }

        // -- 4-byte signatures --

        if self.check(b"FLIF") {
            return Ok(Some(kind("flif", "image/flif")));
        }
        if self.check(b"8BPS") {
            return Ok(Some(kind("psd", "image/vnd.adobe.photoshop")));
        }
        if self.check_str("WEBP", 8) {
            return Ok(Some(kind("webp", "image/webp")));
        }
        if self.check(b"MPCK") {
            return Ok(Some(kind("mpc", "audio/x-musepack")));
        }
        if self.check(b"FORM") {
            return Ok(Some(kind("aif", "audio/aiff")));
        }
        if self.check(b"MThd") {
            return Ok(Some(kind("mid", "audio/midi")));
        }
        if self.check(b"fLaC") {
            return Ok(Some(kind("flac", "audio/x-flac")));
        }
        if self.check(b"IMPM") {
            return Ok(Some(kind("it", "audio/x-it")));
        }
        if self.check(b"DSD ") {
            return Ok(Some(kind("dsf", "audio/x-dsf")));
        }
        if self.check(b"MAC ") {
            return Ok(Some(kind("ape", "audio/ape")));
        }
        if self.check(b"wvpk") {
            return Ok(Some(kind("wv", "audio/wavpack")));
        }
        if self.check(&[0x50, 0x4B, 0x03, 0x04]) {
            return self.parse_zip();
        }
        if self.check(b"OggS") {
            return self.parse_ogg();
        }
        if self.sampled >= 12 && self.check_str("ftyp", 4) && (self.buffer[8] & 0x60) != 0 {
            return self.parse_ftyp();
        }
        if self.check(&[0x1A, 0x45, 0xDF, 0xA3]) {
            return self.parse_ebml();
        }
        if self.check(b"RIFF") {
            if self.check_str("AVI", 8) {
                return Ok(Some(kind("avi", "video/vnd.avi")));
            }
            if self.check_str("WAVE", 8) {
                return Ok(Some(kind("wav", "audio/vnd.wave")));
            }
            if self.check_str("QLCM", 8) {
                return Ok(Some(kind("qcp", "audio/qcelp")));
            }
        }
        if self.check(b"wOFF")
            && (self.check_at(&[0x00, 0x01, 0x00, 0x00], 4) || self.check_str("OTTO", 4))
        {
            return Ok(Some(kind("woff", "font/woff")));
        }
        if self.check(b"wOF2")
            && (self.check_at(&[0x00, 0x01, 0x00, 0x00], 4) || self.check_str("OTTO", 4))
        {
            return Ok(Some(kind("woff2", "font/woff2")));
        }
        if self.check(&[0xD4, 0xC3, 0xB2, 0xA1]) || self.check(&[0xA1, 0xB2, 0xC3, 0xD4]) {
            return Ok(Some(kind("pcap", "application/vnd.tcpdump.pcap")));
        }
        if self.check(b"LZIP") {
            return Ok(Some(kind("lz", "application/x-lzip")));
        }
        if self.check(b"MSCF") || self.check(b"ISc(") {
            return Ok(Some(kind("cab", "application/vnd.ms-cab-compressed")));
        }
        if self.check(&[0xED, 0xAB, 0xEE, 0xDB]) {
            return Ok(Some(kind("rpm", "application/x-rpm")));
        }
        if self.check(&[0xC5, 0xD0, 0xD3, 0xC6]) {
            return Ok(Some(kind("eps", "application/eps")));
        }
        if self.check(&[0x28, 0xB5, 0x2F, 0xFD]) {
            return Ok(Some(kind("zst", "application/zstd")));
        }
        if self.check(&[0x7F, 0x45, 0x4C, 0x46]) {
            return Ok(Some(kind("elf", "application/x-elf")));
        }
        if self.check(&[0xCA, 0xFE, 0xBA, 0xBE]) {
            return Ok(Some(kind("class", "application/java-vm")));
        }
        if self.check(b"!BDN") {
            return Ok(Some(kind("pst", "application/vnd.ms-outlook")));
        }
        if self.check(b"PAR1") {
            return Ok(Some(kind("parquet", "application/x-parquet")));
        }
        if self.check(b"Obj\x01") {
            return Ok(Some(kind("avro", "application/avro")));
        }
        if self.check(b"icns") {
            return Ok(Some(kind("icns", "image/icns")));
        }
        if self.check(&[0x4E, 0x45, 0x53, 0x1A]) {
            return Ok(Some(kind("nes", "application/x-nintendo-nes-rom")));
        }
        if self.check(b"Cr24") {
            return Ok(Some(kind("crx", "application/x-google-chrome-extension")));
        }
        if self.check(&[0x04, 0x22, 0x4D, 0x18]) {
            return Ok(Some(kind("lz4", "application/x-lz4")));
        }
        if self.check(b"AC10") {
            return Ok(Some(kind("dwg", "image/vnd.dwg")));
        }
        if self.check(b"ITSF") {
            return Ok(Some(kind("chm", "application/vnd.ms-htmlhelp")));
        }
        if self.check(b"SQLi") {
            return Ok(Some(kind("sqlite", "application/x-sqlite3")));
        }
        if self.check(&[0x00, 0x61, 0x73, 0x6D]) {
            return Ok(Some(kind("wasm", "application/wasm")));
        }
        if self.check(&[0x00, 0x00, 0x01, 0x00]) {
            return Ok(Some(kind("ico", "image/x-icon")));
        }
        if self.check(&[0x00, 0x00, 0x02, 0x00]) {
            return Ok(Some(kind("cur", "image/x-icon")));
        }
        if self.check(&[0x46, 0x4C, 0x56, 0x01]) {
            return Ok(Some(kind("flv", "video/x-flv")));
        }
        if self.check(&[0x42, 0x50, 0x47, 0xFB]) {
            return Ok(Some(kind("bpg", "image/bpg")));
        }
        if self.check(b"%PDF") {
            return self.parse_pdf();
        }
        if self.check_str("free", 4)
            || self.check_str("mdat", 4)
            || self.check_str("moov", 4)
            || self.check_str("wide", 4)
        {
            return Ok(Some(kind("mov", "video/quicktime")));
        }

        // -- 5-byte signatures --

        if self.check(&[0x4F, 0x54, 0x54, 0x4F, 0x00]) {
            return Ok(Some(kind("otf", "font/otf")));
        }
        if self.check(b"#!AMR") {
            return Ok(Some(kind("amr", "audio/amr")));
        }
        if self.check(b"{\\rtf") {
            return Ok(Some(kind("rtf", "application/rtf")));
        }
        if self.check(&[0x00, 0x01, 0x00, 0x00, 0x00]) {
            return Ok(Some(kind("ttf", "font/ttf")));
        }

        // -- 6-byte signatures --

        if self.check(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]) {
            return Ok(Some(kind("7z", "application/x-7z-compressed")));
        }
        if self.check(&[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00]) {
            return Ok(Some(kind("xz", "application/x-xz")));
        }
        if self.check(b"<?xml ") {
            return Ok(Some(kind("xml", "application/xml")));
        }
        if self.check(b"solid ") {
            return Ok(Some(kind("stl", "model/stl")));
        }

        // -- 7-byte signatures --

        if self.check(&[0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x00])
            || self.check(&[0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x01])
        {
            return Ok(Some(kind("rar", "application/x-rar-compressed")));
        }
        if self.check(b"BLENDER") {
            return Ok(Some(kind("blend", "application/x-blender")));
        }
        if self.check(b"!<arch>") {
            return self.parse_ar();
        }

        // -- 8-byte signatures --

        if self.check(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return self.parse_png();
        }
        if self.check(&[0x41, 0x52, 0x52, 0x4F, 0x57, 0x31, 0x00, 0x00]) {
            return Ok(Some(kind("arrow", "application/x-apache-arrow")));
        }
        if self.check(&[0x67, 0x6C, 0x54, 0x46, 0x02, 0x00, 0x00, 0x00]) {
            return Ok(Some(kind("glb", "model/gltf-binary")));
        }
        if self.check(&[0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9]) {
            return self.parse_asf();
        }
        if self.check(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]) {
            return Ok(Some(kind("cfb", "application/x-cfb")));
        }
        if self.check(&[0x64, 0x65, 0x78, 0x0A, 0x30, 0x33, 0x35, 0x00]) {
            return Ok(Some(kind("dex", "application/x-android-dex")));
        }
        if (self.check(&[0x7E, 0x10, 0x04]) || self.check(&[0x7E, 0x18, 0x04]))
            && self.check_at(&[0x30, 0x4D, 0x49, 0x45], 4)
        {
            return Ok(Some(kind("mie", "application/x-mie")));
        }

        // -- 9-byte signatures --

        if self.check(&[0x49, 0x49, 0x52, 0x4F, 0x08, 0x00, 0x00, 0x00, 0x18]) {
            return Ok(Some(kind("orf", "image/x-olympus-orf")));
        }
        if self.check(b"gimp xcf ") {
            return Ok(Some(kind("xcf", "image/x-xcf")));
        }

        // -- 12-byte signatures --

        if self.check(&[
            0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
        ]) {
            return self.parse_jp2();
        }
        if self.check(&[
            0x00, 0x00, 0x00, 0x0C, 0x4A, 0x58, 0x4C, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
        ]) {
            return Ok(Some(kind("jxl", "image/jxl")));
        }
        if self.check(&[
            0x49, 0x49, 0x55, 0x00, 0x18, 0x00, 0x00, 0x00, 0x88, 0xE7, 0x74, 0xD8,
        ]) {
            return Ok(Some(kind("rw2", "image/x-panasonic-rw2")));
        }
        if self.check(&[
            0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
        ]) {
            return Ok(Some(kind("ktx", "image/ktx")));
        }

        // -- Unsafe signatures: short prefixes that need structure checks --

        if self.check(&[0x00, 0x00, 0x01, 0xBA]) || self.check(&[0x00, 0x00, 0x01, 0xB3]) {
            return Ok(Some(kind("mpg", "video/mpeg")));
        }
        if self.check(b"II") {
            if let Some(found) = self.parse_tiff(false)? {
                return Ok(Some(found));
            }
        }
        if self.check(b"MM") {
            if let Some(found) = self.parse_tiff(true)? {
                return Ok(Some(found));
            }
        }

        // Late signatures sit past the initial window.
        self.sample(256)?;

        if self.check(b"FUJIFILMCCD-RAW") {
            return Ok(Some(kind("raf", "image/x-fujifilm-raf")));
        }
        if self.check(b"Extended Module:") {
            return Ok(Some(kind("xm", "audio/x-xm")));
        }
        if self.check(b"Creative Voice File") {
            return Ok(Some(kind("voc", "audio/x-voc")));
        }
        if self.check(&[0x04, 0x00, 0x00, 0x00]) && self.sampled >= 16 {
            // Chromium Pickle header; an ASAR archive carries a JSON
            // directory with a `files` key right after it.
            if let Some(found) = self.probe_asar() {
                return Ok(Some(found));
            }
        }
        if self.check_at(&[0x2A, 0x2A, 0x41, 0x43, 0x45, 0x2A, 0x2A], 7) {
            return Ok(Some(kind("ace", "application/x-ace-compressed")));
        }
        if self.check(b"AT&TFORM")
            && (self.check_str("DJVM", 12)
                || self.check_str("DJVU", 12)
                || self.check_str("DJVI", 12)
                || self.check_str("THUM", 12))
        {
            return Ok(Some(kind("djvu", "image/vnd.djvu")));
        }
        if self.check(b"BEGIN:") {
            if self.check_str("VCARD", 6) {
                return Ok(Some(kind("vcf", "text/vcard")));
            }
            if self.check_str("VCALENDAR", 6) {
                return Ok(Some(kind("ics", "text/calendar")));
            }
        }
        if self.check(b"-----BEGIN PGP MESSAGE-----") {
            return Ok(Some(kind("pgp", "application/pgp-encrypted")));
        }
        if self.check(&[
            0x06, 0x0E, 0x2B, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0D, 0x01, 0x02, 0x01, 0x01, 0x02,
        ]) {
            return Ok(Some(kind("mxf", "application/mxf")));
        }
        if self.check_str("SCRM", 44) {
            return Ok(Some(kind("s3m", "audio/x-s3m")));
        }
        if (self.check(&[0x47]) && self.check_at(&[0x47], 188))
            || (self.check_at(&[0x47], 4) && self.check_at(&[0x47], 196))
        {
            // MPEG-TS, plain or BDAV with a 4-byte TP_extra_header.
            return Ok(Some(kind("mts", "video/mp2t")));
        }
        if self.check_str("BOOKMOBI", 60) {
            return Ok(Some(kind("mobi", "application/x-mobipocket-ebook")));
        }
        if self.check_str("DICM", 128) {
            return Ok(Some(kind("dcm", "application/dicom")));
        }
        if self.check_at(&[0x4C, 0x50], 34)
            && (self.check_at(&[0x00, 0x00, 0x01], 8)
                || self.check_at(&[0x01, 0x00, 0x02], 8)
                || self.check_at(&[0x02, 0x00, 0x02], 8))
        {
            return Ok(Some(kind("eot", "application/vnd.ms-fontobject")));
        }
        if self.check(&[
            0x06, 0x06, 0xED, 0xF5, 0xD8, 0x1D, 0x46, 0xE5, 0xBD, 0x31, 0xEF, 0xE7, 0xFE, 0x74,
            0xB7, 0x1D,
        ]) {
            return Ok(Some(kind("indd", "application/x-indesign")));
        }
        if self.check(&[
            0x4C, 0x00, 0x00, 0x00, 0x01, 0x14, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x46,
        ]) {
            return Ok(Some(kind("lnk", "application/x.ms.shortcut")));
        }
        if self.check(&[
            0x62, 0x6F, 0x6F, 0x6B, 0x00, 0x00, 0x00, 0x00, 0x6D, 0x61, 0x72, 0x6B, 0x00, 0x00,
            0x00, 0x00,
        ]) {
            return Ok(Some(kind("alias", "application/x.apple.alias")));
        }
        if self.check_at(
            &[
                0x27, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            ],
            2,
        ) {
            return Ok(Some(kind("shp", "application/x-esri-shape")));
        }
        if self.check_masked(&[0xFF, 0xE0], 0, &[0xFF, 0xE0]) {
            // MPEG frame sync; the layer bits pick the family member.
            if self.check_masked(&[0x10], 1, &[0x16]) {
                return Ok(Some(kind("aac", "audio/aac")));
            }
            if self.check_masked(&[0x02], 1, &[0x06]) {
                return Ok(Some(kind("mp3", "audio/mpeg")));
            }
            if self.check_masked(&[0x04], 1, &[0x06]) {
                return Ok(Some(kind("mp2", "audio/mpeg")));
            }
            if self.check_masked(&[0x06], 1, &[0x06]) {
                return Ok(Some(kind("mp1", "audio/mpeg")));
            }
        }

        self.sample(512)?;

        if self.sampled >= 512 && tar::checksum_matches(&self.buffer[..512]) {
            return Ok(Some(kind("tar", "application/x-tar")));
        }

        Ok(None)
    }

    /// Skip an ID3v2 tag and restart detection behind it.
    fn parse_id3(&mut self) -> Result<Option<FileKind>> {
        use soapberry_token::token::SyncSafeU32;

        self.tokenizer.ignore(6)?;
        let tag_len = u64::from(self.tokenizer.read_number(&SyncSafeU32)?);
        if self.tokenizer.position() + tag_len > self.size() {
            // Tag claims to run past the end; assume MPEG audio anyway.
            return Ok(Some(kind("mp3", "audio/mpeg")));
        }
        self.tokenizer.ignore(tag_len)?;
        from_tokenizer(self.tokenizer)
    }

    /// `%PDF`: scan past the header region for the Illustrator marker.
    fn parse_pdf(&mut self) -> Result<Option<FileKind>> {
        const MAX_SCAN: u64 = 10 * 1024 * 1024;

        self.tokenizer.ignore(1350)?;
        let len = MAX_SCAN.min(self.size()) as usize;
        let mut scan = vec![0u8; len];
        let n = self
            .tokenizer
            .read_buffer(&mut scan, ReadOptions::tolerant())?;
        if memmem::find(&scan[..n], b"AIPrivateData").is_some() {
            return Ok(Some(kind("ai", "application/postscript")));
        }
        Ok(Some(kind("pdf", "application/pdf")))
    }

    /// `!<arch>`: a Debian package announces itself in the first member.
    fn parse_ar(&mut self) -> Result<Option<FileKind>> {
        use soapberry_token::token::FixedString;

        self.tokenizer.ignore(8)?;
        let member = self.tokenizer.read_token(&FixedString::new(13))?;
        if member == "debian-binary" {
            return Ok(Some(kind("deb", "application/x-deb")));
        }
        Ok(Some(kind("ar", "application/x-unix-archive")))
    }

    /// Pickle header probe for Electron ASAR archives.
    fn probe_asar(&self) -> Option<FileKind> {
        let json_size = U32Le.get(&self.buffer[12..16]).ok()? as usize;
        if json_size <= 12 || self.sampled < json_size.checked_add(16)? {
            return None;
        }
        let header = &self.buffer[16..16 + json_size];
        let value: serde_json::Value = serde_json::from_slice(header).ok()?;
        value
            .get("files")
            .map(|_| kind("asar", "application/x-asar"))
    }
}
