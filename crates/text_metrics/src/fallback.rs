//! Font style fallback ladder.
//!
//! A requested bold/italic/underline/strikeout combination may not exist for
//! a given family. Resolution tries the exact combination first, then every
//! variant reachable by flipping attributes, ordered by how many attributes
//! are flipped (one flip, then two, then three, then all four). If the
//! family supports none of the sixteen combinations, resolution falls back
//! to the default family at the requested height and original style, so a
//! drawable font is always produced.

use crate::{NativeTextBackend, ResolvedFont, StyleFlags};

/// Family used when the requested one supports no style at all
pub const DEFAULT_FAMILY: &str = "Arial";

/// Ordered candidate styles for the fallback ladder.
///
/// The list is generated, not hand-written: the original flags, then the 15
/// non-empty flip masks sorted by the number of flipped attributes and,
/// within equal counts, by ascending mask value. Together the candidates
/// cover all 16 style combinations, ending with the "everything flipped"
/// variant.
pub fn fallback_candidates(flags: StyleFlags) -> Vec<StyleFlags> {
    let mut candidates: Vec<StyleFlags> = (0u8..16).map(|mask| flags.toggled(mask)).collect();
    candidates.sort_by_key(|candidate| {
        let flipped = candidate.toggled(flags.bits());
        (flipped.count(), flipped.bits())
    });
    candidates
}

/// Resolve a drawable font for the request. Never fails: the worst case is
/// the default family with the originally requested style.
pub fn resolve_font<B: NativeTextBackend>(
    backend: &B,
    family: &str,
    height: f32,
    flags: StyleFlags,
) -> ResolvedFont {
    for candidate in fallback_candidates(flags) {
        if backend.supports_style(family, candidate) {
            if candidate != flags {
                tracing::debug!(
                    family,
                    requested = flags.bits(),
                    resolved = candidate.bits(),
                    "style fallback applied"
                );
            }
            return ResolvedFont {
                family: family.to_string(),
                height,
                flags: candidate,
            };
        }
    }

    tracing::warn!(family, "font family unusable, substituting default family");
    ResolvedFont {
        family: DEFAULT_FAMILY.to_string(),
        height,
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MonospaceTextBackend;

    #[test]
    fn test_candidates_cover_all_combinations() {
        let candidates = fallback_candidates(StyleFlags::bold());
        assert_eq!(candidates.len(), 16);
        let mut bits: Vec<u8> = candidates.iter().map(|c| c.bits()).collect();
        bits.sort_unstable();
        bits.dedup();
        assert_eq!(bits.len(), 16);
    }

    #[test]
    fn test_candidates_ordered_by_flip_count() {
        let flags = StyleFlags::new(true, true, false, false);
        let candidates = fallback_candidates(flags);
        assert_eq!(candidates[0], flags);
        // Candidates 1..=4 flip exactly one attribute.
        for candidate in &candidates[1..5] {
            assert_eq!((candidate.bits() ^ flags.bits()).count_ones(), 1);
        }
        // The last candidate flips all four.
        assert_eq!((candidates[15].bits() ^ flags.bits()).count_ones(), 4);
    }

    #[test]
    fn test_first_single_flip_is_lowest_bit() {
        let candidates = fallback_candidates(StyleFlags::default());
        assert_eq!(candidates[1].bits(), StyleFlags::BOLD_BIT);
        assert_eq!(candidates[2].bits(), StyleFlags::ITALIC_BIT);
    }

    #[test]
    fn test_resolve_prefers_exact_style() {
        let backend = MonospaceTextBackend::new();
        let font = resolve_font(&backend, "Courier", 10.0, StyleFlags::bold());
        assert_eq!(font.family, "Courier");
        assert!(font.flags.bold);
    }

    #[test]
    fn test_resolve_walks_ladder() {
        let mut backend = MonospaceTextBackend::new();
        // Family only exists in italic.
        backend.restrict_styles("Narrow", &[StyleFlags::italic()]);
        let font = resolve_font(&backend, "Narrow", 10.0, StyleFlags::bold());
        assert_eq!(font.family, "Narrow");
        assert_eq!(font.flags, StyleFlags::italic());
    }

    #[test]
    fn test_resolve_falls_back_to_default_family() {
        let mut backend = MonospaceTextBackend::new();
        backend.restrict_styles("Ghost", &[]);
        let font = resolve_font(&backend, "Ghost", 12.0, StyleFlags::bold());
        assert_eq!(font.family, DEFAULT_FAMILY);
        assert!(font.flags.bold);
        assert_eq!(font.height, 12.0);
    }
}
