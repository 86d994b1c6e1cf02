use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Container extensions recognized when deriving output filenames.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "wmv", "flv", "webm"];

/// Check whether a file's content looks like a video container.
///
/// Detection reads the leading bytes and matches container signatures rather
/// than trusting the file extension. Unreadable or too-short files are not
/// videos.
pub fn is_video_file<P: AsRef<Path>>(path: P) -> bool {
    let mut buf = [0u8; 16];
    let n = match File::open(path.as_ref()).and_then(|mut f| f.read(&mut buf)) {
        Ok(n) => n,
        Err(_) => return false,
    };
    matches_video_signature(&buf[..n])
}

fn matches_video_signature(buf: &[u8]) -> bool {
    // ISO base media (MP4, MOV): "ftyp" box at offset 4
    if buf.len() >= 8 && &buf[4..8] == b"ftyp" {
        return true;
    }
    // Matroska / WebM: EBML header
    if buf.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        return true;
    }
    // AVI: RIFF container with "AVI " form type
    if buf.len() >= 12 && buf.starts_with(b"RIFF") && &buf[8..12] == b"AVI " {
        return true;
    }
    // FLV
    if buf.starts_with(b"FLV\x01") {
        return true;
    }
    // ASF (WMV): leading bytes of the header object GUID
    if buf.starts_with(&[0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11]) {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    pub fn mp4_header() -> Vec<u8> {
        let mut bytes = vec![0x00, 0x00, 0x00, 0x20];
        bytes.extend_from_slice(b"ftypisom");
        bytes.extend_from_slice(&[0u8; 20]);
        bytes
    }

    #[test]
    fn test_detects_mp4() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("clip.mp4");
        file.write_binary(&mp4_header()).unwrap();
        assert!(is_video_file(file.path()));
    }

    #[test]
    fn test_detects_matroska() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("clip.mkv");
        let mut bytes = vec![0x1A, 0x45, 0xDF, 0xA3];
        bytes.extend_from_slice(&[0u8; 12]);
        file.write_binary(&bytes).unwrap();
        assert!(is_video_file(file.path()));
    }

    #[test]
    fn test_rejects_text_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.mp4");
        file.write_str("definitely not a video").unwrap();
        assert!(!is_video_file(file.path()));
    }

    #[test]
    fn test_rejects_missing_file() {
        assert!(!is_video_file("/nonexistent/clip.mp4"));
    }

    #[test]
    fn test_rejects_short_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("tiny.mp4");
        file.write_binary(&[0x00, 0x00]).unwrap();
        assert!(!is_video_file(file.path()));
    }
}
