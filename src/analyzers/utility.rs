/// Returns `part / total`, or `None` when `total` is zero.
pub fn share(part: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64)
    }
}
