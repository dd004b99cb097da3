use anyhow::{bail, Result};
use std::collections::VecDeque;

/// Separators tried in order, coarsest first. The empty separator splits
/// into single characters and always applies.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Recursive character splitter producing overlapping windows.
///
/// Lengths are measured in chars. Text that already fits in one window is
/// returned untouched.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            bail!("chunk size must be greater than zero");
        }
        if chunk_overlap >= chunk_size {
            bail!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap,
                chunk_size
            );
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        self.split_recursive(text, &SEPARATORS)
    }

    /// Splits into windows and joins them back with newlines.
    ///
    /// The windows are not processed individually, so the only visible
    /// effect on long text is the overlap being repeated at each boundary.
    pub fn split_and_rejoin(&self, text: &str) -> String {
        let chunks = self.split_text(text);
        log::info!("Created {} chunks", chunks.len());
        chunks.join("\n")
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let mut separator = "";
        let mut finer: &[&str] = &[];
        for (i, &candidate) in separators.iter().enumerate() {
            if candidate.is_empty() || text.contains(candidate) {
                separator = candidate;
                finer = &separators[i + 1..];
                break;
            }
        }

        let mut chunks = Vec::new();
        let mut fitting: Vec<&str> = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(piece) < self.chunk_size {
                fitting.push(piece);
                continue;
            }

            if !fitting.is_empty() {
                chunks.extend(self.merge_pieces(&fitting));
                fitting.clear();
            }
            if finer.is_empty() {
                chunks.push(piece.to_string());
            } else {
                chunks.extend(self.split_recursive(piece, finer));
            }
        }

        if !fitting.is_empty() {
            chunks.extend(self.merge_pieces(&fitting));
        }

        chunks
    }

    /// Greedily packs pieces into windows, carrying up to `chunk_overlap`
    /// chars of trailing pieces into the next window.
    fn merge_pieces(&self, pieces: &[&str]) -> Vec<String> {
        let mut windows = Vec::new();
        let mut current: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0;

        for &piece in pieces {
            let len = char_len(piece);

            if total + len > self.chunk_size {
                if total > self.chunk_size {
                    log::warn!(
                        "Created a chunk of size {}, which is longer than the specified {}",
                        total,
                        self.chunk_size
                    );
                }
                if !current.is_empty() {
                    push_window(&mut windows, &current);

                    while total > self.chunk_overlap
                        || (total + len > self.chunk_size && total > 0)
                    {
                        match current.pop_front() {
                            Some((_, front_len)) => total -= front_len,
                            None => break,
                        }
                    }
                }
            }

            current.push_back((piece, len));
            total += len;
        }

        push_window(&mut windows, &current);
        windows
    }
}

fn push_window(windows: &mut Vec<String>, current: &VecDeque<(&str, usize)>) {
    let joined: String = current.iter().map(|(piece, _)| *piece).collect();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        windows.push(trimmed.to_string());
    }
}

/// Splits on `separator`, attaching each separator to the piece after it.
/// Empty pieces are dropped. An empty separator yields single characters.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices(separator) {
        if idx > start {
            pieces.push(&text[start..idx]);
        }
        start = idx;
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
