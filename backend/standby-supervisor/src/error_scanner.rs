//! Detection of fatal startup errors in the primary's stderr.

/// Scans a byte stream for any of a fixed set of markers.
///
/// The stream arrives in arbitrary chunks, so the last `longest marker - 1`
/// bytes of each chunk are carried over and prepended to the next one. A
/// marker split across a chunk boundary is therefore still found.
#[derive(Debug, Clone)]
pub struct ErrorScanner {
    markers: Vec<String>,
    tail: Vec<u8>,
    keep: usize,
}

impl ErrorScanner {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let markers: Vec<String> = markers
            .into_iter()
            .map(Into::into)
            .filter(|m| !m.is_empty())
            .collect();
        let keep = markers
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .saturating_sub(1);

        Self {
            markers,
            tail: Vec::with_capacity(keep),
            keep,
        }
    }

    /// Feed the next chunk. Returns the first marker found, if any.
    pub fn scan(&mut self, chunk: &[u8]) -> Option<&str> {
        let mut window = std::mem::take(&mut self.tail);
        window.extend_from_slice(chunk);

        let found = self
            .markers
            .iter()
            .position(|marker| contains(&window, marker.as_bytes()));

        // Bytes that produced a match are not carried over, so it fires once
        if found.is_none() {
            let start = window.len().saturating_sub(self.keep);
            self.tail = window.split_off(start);
        }

        found.map(|i| self.markers[i].as_str())
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
