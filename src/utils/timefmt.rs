/// Formats an offset in seconds as `MM:SS`.
///
/// Minutes wrap at 60, so an hour-long offset reads like its remainder.
/// Negative and non-finite input renders as `00:00`.
pub fn mmss(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let m = (total / 60) % 60;
    let s = total % 60;
    format!("{:02}:{:02}", m, s)
}
