//! Composition features computed directly from sequence strings.

/// Convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// GC fraction (0-1) of an RNA/DNA sequence.
///
/// Case-insensitive. Characters outside the nucleotide alphabet count toward
/// the length but never toward G/C. Returns 0.0 for an empty sequence.
///
/// # Examples
///
/// ```
/// use rna_interact::core::sequence::gc_content;
///
/// assert_eq!(gc_content(""), 0.0);
/// assert_eq!(gc_content("GGCC"), 1.0);
/// assert_eq!(gc_content("augc"), 0.5);
/// ```
#[must_use]
pub fn gc_content(sequence: &str) -> f64 {
    let mut length = 0usize;
    let mut gc = 0usize;
    for c in sequence.chars() {
        length += 1;
        if matches!(c, 'G' | 'g' | 'C' | 'c') {
            gc += 1;
        }
    }

    if length == 0 {
        return 0.0;
    }
    count_to_f64(gc) / count_to_f64(length)
}
