//! Static catalog of recognized extensions and MIME types.
//!
//! The two sets are independent: several extensions share one MIME type
//! (`ico`/`cur`, the MPEG audio family) and a few MIME types are reachable
//! from more than one probe. Order is preserved for stable iteration;
//! membership checks are O(1).

use phf::{OrderedSet, phf_ordered_set};

/// Every extension the detector can report, in probe-cascade order.
pub static EXTENSIONS: OrderedSet<&'static str> = phf_ordered_set! {
    "bmp", "ac3", "dmg", "exe", "eps", "ps", "Z", "cpio", "arj", "jxl",
    "xml", "skp",
    "gif", "jxr", "gz", "bz2", "mp3", "mpc", "swf", "jpg",
    "flif", "psd", "webp", "aif", "mid", "flac", "it", "dsf", "ape", "wv",
    "zip", "xpi", "docx", "pptx", "xlsx", "3mf", "epub", "odt", "ods", "odp",
    "opus", "ogv", "ogm", "oga", "spx", "ogg", "ogx",
    "avif", "heic", "mov", "m4v", "m4p", "m4b", "m4a", "f4v", "f4p", "f4a",
    "f4b", "cr3", "3g2", "3gp", "mp4",
    "mkv", "webm", "avi", "wav", "qcp",
    "woff", "woff2", "pcap", "lz", "cab", "rpm", "zst", "elf", "class",
    "pst", "parquet", "avro", "icns", "nes", "crx", "lz4", "dwg", "chm",
    "sqlite", "wasm", "ico", "cur", "flv", "bpg", "pdf", "ai",
    "otf", "amr", "rtf", "ttf",
    "7z", "xz", "stl",
    "rar", "blend", "deb", "ar",
    "png", "apng", "arrow", "glb", "asf", "cfb", "dex", "mie",
    "orf", "xcf",
    "jp2", "jpx", "jpm", "mj2", "rw2", "ktx",
    "mpg", "tif", "cr2", "nef", "arw", "dng",
    "raf", "xm", "voc", "asar", "ace", "djvu", "vcf", "ics", "pgp", "mxf",
    "s3m", "mts", "mobi", "dcm", "eot", "indd", "lnk", "alias", "shp",
    "aac", "mp2", "mp1",
    "tar",
};

/// Every MIME type the detector can report, in probe-cascade order.
pub static MIME_TYPES: OrderedSet<&'static str> = phf_ordered_set! {
    "image/bmp",
    "audio/vnd.dolby.dd-raw",
    "application/x-apple-diskimage",
    "application/x-msdownload",
    "application/eps",
    "application/postscript",
    "application/x-compress",
    "application/x-cpio",
    "application/x-arj",
    "image/jxl",
    "application/xml",
    "application/vnd.sketchup.skp",
    "image/gif",
    "image/vnd.ms-photo",
    "application/gzip",
    "application/x-bzip2",
    "audio/mpeg",
    "audio/x-musepack",
    "application/x-shockwave-flash",
    "image/jpeg",
    "image/flif",
    "image/vnd.adobe.photoshop",
    "image/webp",
    "audio/aiff",
    "audio/midi",
    "audio/x-flac",
    "audio/x-it",
    "audio/x-dsf",
    "audio/ape",
    "audio/wavpack",
    "application/zip",
    "application/x-xpinstall",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "model/3mf",
    "application/epub+zip",
    "application/vnd.oasis.opendocument.text",
    "application/vnd.oasis.opendocument.spreadsheet",
    "application/vnd.oasis.opendocument.presentation",
    "audio/opus",
    "video/ogg",
    "audio/ogg",
    "application/ogg",
    "image/avif",
    "image/heif",
    "image/heif-sequence",
    "image/heic",
    "image/heic-sequence",
    "video/quicktime",
    "video/x-m4v",
    "video/mp4",
    "audio/mp4",
    "audio/x-m4a",
    "image/x-canon-cr3",
    "video/3gpp2",
    "video/3gpp",
    "video/x-matroska",
    "video/webm",
    "video/vnd.avi",
    "audio/vnd.wave",
    "audio/qcelp",
    "font/woff",
    "font/woff2",
    "application/vnd.tcpdump.pcap",
    "application/x-lzip",
    "application/vnd.ms-cab-compressed",
    "application/x-rpm",
    "application/zstd",
    "application/x-elf",
    "application/java-vm",
    "application/vnd.ms-outlook",
    "application/x-parquet",
    "application/avro",
    "image/icns",
    "application/x-nintendo-nes-rom",
    "application/x-google-chrome-extension",
    "application/x-lz4",
    "image/vnd.dwg",
    "application/vnd.ms-htmlhelp",
    "application/x-sqlite3",
    "application/wasm",
    "image/x-icon",
    "video/x-flv",
    "image/bpg",
    "application/pdf",
    "font/otf",
    "audio/amr",
    "application/rtf",
    "font/ttf",
    "application/x-7z-compressed",
    "application/x-xz",
    "model/stl",
    "application/x-rar-compressed",
    "application/x-blender",
    "application/x-deb",
    "application/x-unix-archive",
    "image/png",
    "image/apng",
    "application/x-apache-arrow",
    "model/gltf-binary",
    "application/vnd.ms-asf",
    "audio/x-ms-asf",
    "video/x-ms-asf",
    "application/x-cfb",
    "application/x-android-dex",
    "application/x-mie",
    "image/x-olympus-orf",
    "image/x-xcf",
    "image/jp2",
    "image/jpx",
    "image/jpm",
    "image/mj2",
    "image/x-panasonic-rw2",
    "image/ktx",
    "video/mpeg",
    "image/tiff",
    "image/x-canon-cr2",
    "image/x-nikon-nef",
    "image/x-sony-arw",
    "image/x-adobe-dng",
    "image/x-fujifilm-raf",
    "audio/x-xm",
    "audio/x-voc",
    "application/x-asar",
    "application/x-ace-compressed",
    "image/vnd.djvu",
    "text/vcard",
    "text/calendar",
    "application/pgp-encrypted",
    "application/mxf",
    "audio/x-s3m",
    "video/mp2t",
    "application/x-mobipocket-ebook",
    "application/dicom",
    "application/vnd.ms-fontobject",
    "application/x-indesign",
    "application/x.ms.shortcut",
    "application/x.apple.alias",
    "application/x-esri-shape",
    "audio/aac",
    "application/x-tar",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_constant_time_lookup() {
        assert!(EXTENSIONS.contains("png"));
        assert!(EXTENSIONS.contains("docx"));
        assert!(!EXTENSIONS.contains("txt"));
        assert!(MIME_TYPES.contains("image/png"));
        assert!(!MIME_TYPES.contains("text/plain"));
    }

    #[test]
    fn iteration_preserves_declaration_order() {
        let first: Vec<&str> = EXTENSIONS.iter().copied().take(3).collect();
        assert_eq!(first, ["bmp", "ac3", "dmg"]);
        let last = EXTENSIONS.iter().copied().last();
        assert_eq!(last, Some("tar"));
    }
}
