/// Collapse every run of whitespace (newlines included) to a single space.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First line among the opening ten that is long enough to be a title.
pub fn guess_title(text: &str) -> Option<String> {
    text.lines()
        .take(10)
        .map(str::trim)
        .find(|line| {
            let len = line.chars().count();
            len > 10 && len < 200
        })
        .map(str::to_string)
}

/// Decode a PDF text string: UTF-16BE with a byte-order mark, else
/// PDFDocEncoding, which agrees with Latin-1 for printable text.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}
