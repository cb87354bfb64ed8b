//! Locating and rendering the first byte two buffers disagree on.

/// Index of the first byte where `left` and `right` differ.
///
/// If one buffer is a prefix of the other the answer is the shorter length.
///
/// ```
/// use action_pack_buffers::first_difference;
///
/// assert_eq!(first_difference(b"order", b"order"), None);
/// assert_eq!(first_difference(b"order", b"oRder"), Some(1));
/// assert_eq!(first_difference(b"ord", b"order"), Some(3));
/// ```
pub fn first_difference(left: &[u8], right: &[u8]) -> Option<usize> {
    left.iter()
        .zip(right)
        .position(|(l, r)| l != r)
        .or_else(|| (left.len() != right.len()).then(|| left.len().min(right.len())))
}

/// Renders `radius` bytes either side of `at` as hex, with `at` bracketed.
///
/// The output is prefixed with the offset of its first byte. A position past
/// the end of `bytes` renders as `[--]`.
///
/// ```
/// use action_pack_buffers::print_window;
///
/// assert_eq!(print_window(&[0x81, 0xa4, 0x74], 1, 1), "@0: 81 [a4] 74");
/// assert_eq!(print_window(&[0x81], 1, 4), "@0: 81 [--]");
/// ```
pub fn print_window(bytes: &[u8], at: usize, radius: usize) -> String {
    let from = at.saturating_sub(radius).min(bytes.len());
    let to = at.saturating_add(radius).saturating_add(1).min(bytes.len());

    let mut out = format!("@{from}:");
    for (offset, byte) in bytes[from..to].iter().enumerate() {
        if from + offset == at {
            out.push_str(&format!(" [{byte:02x}]"));
        } else {
            out.push_str(&format!(" {byte:02x}"));
        }
    }
    if at >= bytes.len() {
        out.push_str(" [--]");
    }
    out
}
