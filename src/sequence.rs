/// Watson-Crick complement of a single base; anything else is returned as is.
fn complement(base: char) -> char {
    match base {
        'A' => 'T',
        'T' => 'A',
        'C' => 'G',
        'G' => 'C',
        other => other,
    }
}

/// Reverse complement of a nucleotide string.
///
/// Case-sensitive: only uppercase `ACGT` are complemented, every other
/// character keeps its value and lands in the mirrored position.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement).collect()
}
