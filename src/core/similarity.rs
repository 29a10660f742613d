//! Normalized edit-distance similarity.
//!
//! Scores live in 0..=100 where 100 is an exact match:
//!
//! ```text
//! similarity = round(100 × (1 − levenshtein(a, b) / max(len(a), len(b))))
//! ```
//!
//! The ranking engine re-scores thousands of fields per keystroke, so the
//! distance computation reuses its row buffers across calls through
//! [`EditBuffer`] instead of allocating a fresh DP table each time.

/// Reusable scratch space for Levenshtein computations.
#[derive(Debug, Default)]
pub struct EditBuffer {
    prev: Vec<usize>,
    curr: Vec<usize>,
    a_chars: Vec<char>,
    b_chars: Vec<char>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Levenshtein edit distance between two strings, counted in chars.
    pub fn levenshtein(&mut self, a: &str, b: &str) -> usize {
        self.a_chars.clear();
        self.a_chars.extend(a.chars());
        self.b_chars.clear();
        self.b_chars.extend(b.chars());

        let m = self.a_chars.len();
        let n = self.b_chars.len();
        if m == 0 {
            return n;
        }
        if n == 0 {
            return m;
        }

        self.prev.clear();
        self.prev.extend(0..=n);
        self.curr.clear();
        self.curr.resize(n + 1, 0);

        for (i, &ca) in self.a_chars.iter().enumerate() {
            self.curr[0] = i + 1;
            for (j, &cb) in self.b_chars.iter().enumerate() {
                let cost = if ca == cb { 0 } else { 1 };
                let deletion = self.prev[j + 1] + 1;
                let insertion = self.curr[j] + 1;
                let substitution = self.prev[j] + cost;
                self.curr[j + 1] = deletion.min(insertion).min(substitution);
            }
            std::mem::swap(&mut self.prev, &mut self.curr);
        }

        self.prev[n]
    }

    /// Similarity percentage in 0..=100.
    ///
    /// Both strings empty scores 100; exactly one empty scores 0. Symmetric
    /// in its arguments.
    pub fn similarity(&mut self, a: &str, b: &str) -> u8 {
        let max_len = self.count_chars(a).max(self.count_chars(b));
        if max_len == 0 {
            return 100;
        }
        if a.is_empty() || b.is_empty() {
            return 0;
        }

        let distance = self.levenshtein(a, b);
        let score = ((max_len - distance.min(max_len)) as f64 / max_len as f64 * 100.0).round();
        score.clamp(0.0, 100.0) as u8
    }

    fn count_chars(&self, s: &str) -> usize {
        s.chars().count()
    }
}

/// One-shot edit distance. Prefer [`EditBuffer`] in hot loops.
pub fn levenshtein(a: &str, b: &str) -> usize {
    EditBuffer::new().levenshtein(a, b)
}

/// One-shot similarity percentage. Prefer [`EditBuffer`] in hot loops.
pub fn similarity(a: &str, b: &str) -> u8 {
    EditBuffer::new().similarity(a, b)
}
