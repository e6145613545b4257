//! Hex dump lines for the text log.

/// Bytes shown per hex line.
pub const BYTES_PER_LINE: usize = 8;

/// Format `bytes` as hex dump lines.
///
/// Each line covers eight bytes: `SSSS-EEEE  XX XX XX XX XX XX XX XX`, where
/// `SSSS` is the offset of the first byte and `EEEE = SSSS + 7`, both
/// zero-padded lowercase hex. The last line may hold fewer pairs but keeps
/// the same offset arithmetic. Empty input produces no lines.
pub fn hex_lines(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| {
            let start = i * BYTES_PER_LINE;
            let pairs: Vec<String> = chunk.iter().map(|b| format!("{:02X}", b)).collect();
            format!(
                "{:04x}-{:04x}  {}",
                start,
                start + BYTES_PER_LINE - 1,
                pairs.join(" ")
            )
        })
        .collect()
}
