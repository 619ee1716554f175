use bstr::BString;

/// The placeholder written for a segment whose sequence is not
/// stored.
pub const UNKNOWN: &[u8] = b"*";

#[inline]
pub fn is_unknown(seq: &[u8]) -> bool {
    seq == UNKNOWN
}

/// Complement of a nucleotide, including the IUPAC ambiguity codes.
/// Case is preserved; anything else maps to itself.
#[inline]
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' | b'U' => b'A',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'a' => b't',
        b'c' => b'g',
        b'g' => b'c',
        b't' | b'u' => b'a',
        b'r' => b'y',
        b'y' => b'r',
        b'k' => b'm',
        b'm' => b'k',
        b'b' => b'v',
        b'v' => b'b',
        b'd' => b'h',
        b'h' => b'd',
        other => other,
    }
}

/// The reverse complement of a sequence. The unknown sequence is its
/// own reverse complement.
pub fn reverse_complement(seq: &[u8]) -> BString {
    if is_unknown(seq) {
        return BString::from(UNKNOWN);
    }
    seq.iter().rev().copied().map(complement).collect::<Vec<u8>>().into()
}
