use tracing::warn;

/// Uniform sample from [0, 1) built from 53 bits of OS entropy.
pub(super) fn unit_interval() -> f64 {
    let mut buf = [0u8; 8];
    if let Err(err) = getrandom::getrandom(&mut buf) {
        warn!(error = %err, "entropy unavailable; picking the first quote");
        return 0.0;
    }
    let bits = u64::from_le_bytes(buf) >> 11;
    bits as f64 / (1u64 << 53) as f64
}
