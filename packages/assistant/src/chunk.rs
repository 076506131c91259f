/// Split text into overlapping character windows.
///
/// Each window holds `chunk_size` characters (the last one may be shorter)
/// and starts `overlap` characters before the end of the previous window.
/// Windows are trimmed and whitespace-only windows are skipped. A zero
/// `chunk_size` is treated as one, and `overlap` is capped below `chunk_size`
/// so the windows always advance.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let chunk_size = chunk_size.max(1);
    let overlap = overlap.min(chunk_size - 1);

    // Byte offset of every character, plus the end of the text.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let len = bounds.len() - 1;

    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + chunk_size).min(len);
        let chunk = text[bounds[start]..bounds[end]].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        if end == len {
            break;
        }
        start = end - overlap;
    }

    chunks
}
