//! Greedy word wrapping
//!
//! Wraps a single paragraph at Unicode line-break opportunities (UAX #14,
//! via the `unicode-linebreak` crate). The wrapper itself knows nothing
//! about fonts; the caller supplies a predicate that answers whether a
//! candidate line fits the available width, so the same algorithm serves
//! both measurement and drawing.
//!
//! Soft hyphens (U+00AD) are invisible unless a line actually breaks at
//! one, in which case the emitted line ends with a visible '-'.

use unicode_linebreak::linebreaks;

pub const SOFT_HYPHEN: char = '\u{00AD}';

/// Remove all soft hyphens; used directly for non-wrapping cells
pub fn strip_soft_hyphens(text: &str) -> String {
    if text.contains(SOFT_HYPHEN) {
        text.chars().filter(|&c| c != SOFT_HYPHEN).collect()
    } else {
        text.to_string()
    }
}

/// A run of text ending at a break opportunity
#[derive(Debug, Clone, PartialEq)]
struct Fragment {
    /// Fragment text with soft hyphens already removed
    text: String,
    /// The break opportunity at the end of this fragment is a soft hyphen
    soft_break: bool,
    /// The fragment ends at a hard line break inside the input
    mandatory: bool,
}

fn fragments_of(text: &str) -> Vec<Fragment> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut fragments = Vec::new();
    let mut start = 0;
    for (end, _) in linebreaks(text) {
        let raw = &text[start..end];
        let trimmed = raw.trim_end_matches(['\n', '\r']);
        fragments.push(Fragment {
            text: strip_soft_hyphens(trimmed),
            soft_break: trimmed.ends_with(SOFT_HYPHEN),
            mandatory: trimmed.len() != raw.len() && end < text.len(),
        });
        start = end;
    }
    fragments
}

/// Iterator over wrapped lines of one paragraph
///
/// Lines are built greedily: fragments are appended while the fit predicate
/// accepts the candidate, then the line is emitted. The first fragment of a
/// line is never rejected, so a fragment wider than the available width
/// still comes out as its own (overflowing) line rather than disappearing.
pub struct WordWrapper<F> {
    fragments: Vec<Fragment>,
    pos: usize,
    fits: F,
}

impl<F: FnMut(&str) -> bool> WordWrapper<F> {
    pub fn new(text: &str, fits: F) -> Self {
        Self {
            fragments: fragments_of(text),
            pos: 0,
            fits,
        }
    }

    /// Collect every remaining line
    pub fn wrap(self) -> Vec<String> {
        self.collect()
    }
}

impl<F: FnMut(&str) -> bool> Iterator for WordWrapper<F> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.pos >= self.fragments.len() {
            return None;
        }
        let mut line = String::new();
        let mut broke_at_soft = false;
        let mut taken = 0;
        while self.pos < self.fragments.len() {
            let fragment = &self.fragments[self.pos];
            let mut candidate = line.clone();
            candidate.push_str(&fragment.text);
            let probe = probe_line(&candidate, fragment.soft_break);
            if taken > 0 && !(self.fits)(&probe) {
                break;
            }
            line = candidate;
            broke_at_soft = fragment.soft_break;
            let mandatory = fragment.mandatory;
            self.pos += 1;
            taken += 1;
            if mandatory {
                break;
            }
        }
        let mut out = line.trim_end().to_string();
        if broke_at_soft && self.pos < self.fragments.len() {
            out.push('-');
        }
        Some(out)
    }
}

/// What the line would look like if it ended here
fn probe_line(candidate: &str, soft_break: bool) -> String {
    let mut probe = candidate.trim_end().to_string();
    if soft_break {
        probe.push('-');
    }
    probe
}
