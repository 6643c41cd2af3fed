//! Split documents into chunks small enough for one extraction prompt.
//!
//! Windows are measured in characters. A window that would end mid-text
//! is pulled back to the nearest paragraph break, then sentence end, then
//! whitespace, as long as that keeps at least half the window.

use kgqa_core::{Document, TextChunk};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub min_chunk_size: usize,
}

/// Split a document into overlapping chunks.
pub fn chunk_document(doc: &Document, config: &ChunkConfig) -> Vec<TextChunk> {
    if doc.is_empty() || config.chunk_size == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = doc.text.chars().collect();
    let spans = window_spans(&chars, config);

    spans
        .into_iter()
        .map(|(start, end)| (start, end, chars[start..end].iter().collect::<String>()))
        .filter(|(_, _, text)| !text.trim().is_empty())
        .enumerate()
        .map(|(index, (start, end, text))| TextChunk {
            id: chunk_id(doc, &text),
            doc_id: doc.id,
            index,
            text,
            start_offset: start,
            end_offset: end,
        })
        .collect()
}

fn window_spans(chars: &[char], config: &ChunkConfig) -> Vec<(usize, usize)> {
    let total = chars.len();
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;

    while start < total {
        let mut end = (start + config.chunk_size).min(total);
        if end < total {
            end = find_break_point(chars, start, end);
        }
        spans.push((start, end));

        if end >= total {
            break;
        }
        let next = end.saturating_sub(config.chunk_overlap);
        start = if next > start { next } else { end };
    }

    // Fold a short tail into the previous chunk.
    if spans.len() >= 2 {
        let (tail_start, tail_end) = spans[spans.len() - 1];
        if tail_end - tail_start < config.min_chunk_size {
            spans.pop();
            if let Some(prev) = spans.last_mut() {
                prev.1 = tail_end;
            }
        }
    }

    spans
}

/// Best position in `(start, end]` to cut at, or `end` if none is found.
fn find_break_point(chars: &[char], start: usize, end: usize) -> usize {
    let floor = start + (end - start) / 2;

    // Paragraph break.
    for i in (floor..end).rev() {
        if i > 0 && chars[i] == '\n' && chars[i - 1] == '\n' {
            return i + 1;
        }
    }

    // Sentence end followed by whitespace.
    for i in (floor..end.saturating_sub(1)).rev() {
        if matches!(chars[i], '.' | '!' | '?') && chars[i + 1].is_whitespace() {
            return i + 1;
        }
    }

    for i in (floor..end).rev() {
        if chars[i].is_whitespace() {
            return i + 1;
        }
    }

    end
}

fn chunk_id(doc: &Document, text: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(doc.id.as_bytes());
    hasher.update(text.as_bytes());
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: usize, overlap: usize) -> ChunkConfig {
        ChunkConfig {
            chunk_size: size,
            chunk_overlap: overlap,
            min_chunk_size: 0,
        }
    }

    fn doc(text: &str) -> Document {
        Document::new("test://doc", "doc", text)
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let d = doc("Groot is a tree.");
        let chunks = chunk_document(&d, &config(100, 10));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Groot is a tree.");
        assert_eq!(chunks[0].start_offset, 0);
        assert_eq!(chunks[0].end_offset, 16);
        assert_eq!(chunks[0].doc_id, d.id);
    }

    #[test]
    fn test_empty_document_has_no_chunks() {
        assert!(chunk_document(&doc("   \n "), &config(100, 10)).is_empty());
    }

    #[test]
    fn test_chunks_break_on_sentences() {
        let text = "Peter Quill leads the team. Gamora is a warrior. \
                    Rocket builds weapons. Groot is a tree. Drax seeks revenge.";
        let chunks = chunk_document(&doc(text), &config(50, 0));

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 50);
        }
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.text.trim_end().ends_with('.'), "{:?}", chunk.text);
        }
        let rejoined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_paragraph_break_preferred() {
        let text = "First paragraph here. Still first.\n\nSecond paragraph text that runs on.";
        let chunks = chunk_document(&doc(text), &config(60, 0));
        assert!(chunks[0].text.ends_with("\n\n"));
        assert!(chunks[1].text.starts_with("Second"));
    }

    #[test]
    fn test_overlap_repeats_text() {
        let text = "aaaa bbbb cccc dddd eeee ffff gggg hhhh iiii jjjj";
        let chunks = chunk_document(&doc(text), &config(20, 5));
        assert!(chunks.len() > 2);
        for pair in chunks.windows(2) {
            assert!(pair[1].start_offset < pair[0].end_offset);
        }
        assert_eq!(chunks.last().unwrap().end_offset, text.chars().count());
    }

    #[test]
    fn test_short_tail_is_merged() {
        let text = "One sentence here. Two sentence here. x";
        let chunks = chunk_document(
            &doc(text),
            &ChunkConfig {
                chunk_size: 38,
                chunk_overlap: 0,
                min_chunk_size: 5,
            },
        );
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
    }

    #[test]
    fn test_chunk_ids_are_deterministic_and_distinct() {
        let text = "Peter Quill leads the team. Gamora is a warrior. Rocket builds weapons.";
        let a = chunk_document(&doc(text), &config(30, 0));
        let b = chunk_document(&doc(text), &config(30, 0));
        assert_eq!(a, b);
        assert_ne!(a[0].id, a[1].id);
        assert_eq!(a[0].id.len(), 64);
    }

    #[test]
    fn test_unbroken_text_is_cut_hard() {
        let text = "x".repeat(25);
        let chunks = chunk_document(&doc(&text), &config(10, 0));
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text.len(), 10);
        assert_eq!(chunks[2].text.len(), 5);
    }
}
