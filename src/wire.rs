//! Low-level wire utilities
//!
//! Contains the back-to-front serialize buffer used by every `serialize`
//! implementation and the variable-length bytewise mask operations.

/// Buffer for building a packet back-to-front.
///
/// Inner layers append their payload first; outer layers then prepend their
/// headers in front of it. Headroom is kept at the front of the backing
/// storage so that prepends are cheap until it runs out.
#[derive(Debug, Clone)]
pub struct SerializeBuffer {
    data: Vec<u8>,
    start: usize,
}

impl SerializeBuffer {
    /// Create a buffer with the default prepend headroom.
    pub fn new() -> Self {
        Self::with_headroom(64)
    }

    /// Create a buffer reserving `headroom` bytes for future prepends.
    pub fn with_headroom(headroom: usize) -> Self {
        Self {
            data: vec![0; headroom],
            start: headroom,
        }
    }

    /// Number of serialized bytes so far.
    pub fn len(&self) -> usize {
        self.data.len() - self.start
    }

    /// True if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The serialized bytes, outermost header first.
    pub fn bytes(&self) -> &[u8] {
        &self.data[self.start..]
    }

    /// Grow the buffer by `n` bytes at the front and return the new
    /// zero-filled region for the caller to write a header into.
    pub fn prepend_bytes(&mut self, n: usize) -> &mut [u8] {
        if n > self.start {
            let grow = (n - self.start).max(self.data.len().max(64));
            let mut data = vec![0u8; self.data.len() + grow];
            data[self.start + grow..].copy_from_slice(&self.data[self.start..]);
            self.start += grow;
            self.data = data;
        }
        self.start -= n;
        let start = self.start;
        for b in &mut self.data[start..start + n] {
            *b = 0;
        }
        &mut self.data[start..start + n]
    }

    /// Grow the buffer by `n` bytes at the back and return the new
    /// zero-filled region.
    pub fn append_bytes(&mut self, n: usize) -> &mut [u8] {
        let old = self.data.len();
        self.data.resize(old + n, 0);
        &mut self.data[old..]
    }

    /// Discard all serialized bytes, keeping the accumulated headroom.
    pub fn clear(&mut self) {
        self.data.truncate(self.start);
    }
}

impl Default for SerializeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Bytewise AND of two buffers, truncated to the shorter length.
///
/// Always allocates; neither input is mutated.
pub fn and(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x & y).collect()
}

/// Bytewise OR of two buffers, extended to the longer length.
///
/// Bytes beyond the shorter operand are the longer operand's, unchanged.
/// Always allocates; neither input is mutated.
pub fn or(a: &[u8], b: &[u8]) -> Vec<u8> {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut out = long.to_vec();
    for (o, s) in out.iter_mut().zip(short) {
        *o |= s;
    }
    out
}
