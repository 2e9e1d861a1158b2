//! License text conversion for the WiX UI.
//!
//! The WiX license dialog only displays RTF, and classic WiX tooling expects
//! ANSI (Windows-1252) input. Plain text licenses are wrapped into a minimal
//! RTF document before they are handed to the templates.

use crate::bundler::error::{ErrorExt, Result};
use std::path::Path;

const RTF_MAGIC: &[u8] = b"{\\rtf";

/// Windows-1252 bytes 0x80..=0x9F; `None` marks the five unassigned slots.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Maps a character to its Windows-1252 byte.
pub fn windows1252_byte(c: char) -> Option<u8> {
    let code = c as u32;
    if code < 0x80 || (0xA0..=0xFF).contains(&code) {
        return Some(code as u8);
    }
    CP1252_HIGH
        .iter()
        .position(|slot| *slot == Some(c))
        .map(|i| 0x80 + i as u8)
}

/// Encodes text as Windows-1252; unmappable characters become `?`.
pub fn encode_windows1252(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| windows1252_byte(c).unwrap_or(b'?'))
        .collect()
}

/// Wraps plain text into an RTF document.
///
/// Each line becomes a paragraph. Non-ASCII characters are written as
/// `\uN?` escapes, or as `\'hh` Windows-1252 escapes when `reencode` is set.
pub fn to_rtf(text: &str, reencode: bool) -> String {
    let mut out = String::from(
        "{\\rtf1\\ansi\\ansicpg1252\\deff0{\\fonttbl{\\f0\\fnil\\fcharset0 Courier New;}}\n\\viewkind4\\uc1\\pard\\f0\\fs18 ",
    );
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push_str("\\par\n");
        }
        for c in line.chars() {
            match c {
                '\\' | '{' | '}' => {
                    out.push('\\');
                    out.push(c);
                }
                '\t' => out.push_str("\\tab "),
                c if c.is_ascii() => out.push(c),
                c => match windows1252_byte(c).filter(|_| reencode) {
                    Some(b) => out.push_str(&format!("\\'{b:02x}")),
                    None => {
                        let mut units = [0u16; 2];
                        for unit in c.encode_utf16(&mut units) {
                            out.push_str(&format!("\\u{}?", *unit as i16));
                        }
                    }
                },
            }
        }
    }
    out.push_str("\\par\n}\n");
    out
}

/// Whether the file already is an RTF document.
pub async fn is_rtf(path: &Path) -> Result<bool> {
    let content = tokio::fs::read(path).await.fs_context("reading license", path)?;
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&content);
    Ok(content.starts_with(RTF_MAGIC))
}

/// Converts a text file to RTF.
pub async fn write_as_rtf(src: &Path, dst: &Path, reencode: bool) -> Result<()> {
    let bytes = tokio::fs::read(src).await.fs_context("reading text file", src)?;
    let text = String::from_utf8_lossy(&bytes);
    write_with_parent(dst, to_rtf(&text, reencode).as_bytes()).await
}

/// Re-encodes a UTF-8 text file as Windows-1252.
pub async fn write_as_windows1252(src: &Path, dst: &Path) -> Result<()> {
    let bytes = tokio::fs::read(src).await.fs_context("reading text file", src)?;
    let text = String::from_utf8_lossy(&bytes);
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);
    write_with_parent(dst, &encode_windows1252(text)).await
}

async fn write_with_parent(dst: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating output directory", parent)?;
    }
    tokio::fs::write(dst, content).await.fs_context("writing file", dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_control_characters() {
        let rtf = to_rtf("a {b} \\c", false);
        assert!(rtf.contains("a \\{b\\} \\\\c"));
        assert!(rtf.starts_with("{\\rtf1"));
    }

    #[test]
    fn one_paragraph_per_line() {
        let rtf = to_rtf("first\nsecond", false);
        assert!(rtf.contains("first\\par\nsecond\\par"));
    }

    #[test]
    fn non_ascii_as_unicode_or_ansi() {
        assert!(to_rtf("é", false).contains("\\u233?"));
        assert!(to_rtf("é", true).contains("\\'e9"));
        assert!(to_rtf("€", true).contains("\\'80"));
        // not in Windows-1252, falls back to \u escape
        assert!(to_rtf("Ω", true).contains("\\u937?"));
    }

    #[test]
    fn windows1252_maps_specials() {
        assert_eq!(encode_windows1252("a€é™Ω"), vec![b'a', 0x80, 0xE9, 0x99, b'?']);
    }

    #[tokio::test]
    async fn detects_rtf_documents() {
        let tmp = tempfile::tempdir().unwrap();
        let rtf = tmp.path().join("l.rtf");
        let txt = tmp.path().join("l.txt");
        std::fs::write(&rtf, "{\\rtf1 hi}").unwrap();
        std::fs::write(&txt, "MIT License").unwrap();
        assert!(is_rtf(&rtf).await.unwrap());
        assert!(!is_rtf(&txt).await.unwrap());

        let out = tmp.path().join("sub/l.txt.rtf");
        write_as_rtf(&txt, &out, true).await.unwrap();
        assert!(is_rtf(&out).await.unwrap());
    }
}
