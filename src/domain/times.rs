/// Convert a swim time such as "1:45.32", "45.32" or "52" to seconds.
/// Hours are accepted too ("1:02:03.5"). Returns `None` for anything that
/// is not a positive, finite duration.
pub fn parse_swim_time(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let seconds = trimmed.split(':').try_fold(0.0_f64, |acc, part| {
        let value: f64 = part.trim().parse().ok()?;
        (value >= 0.0).then_some(acc * 60.0 + value)
    })?;

    (seconds.is_finite() && seconds > 0.0).then_some(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parses_minutes_and_seconds() {
        assert!(approx(parse_swim_time("1:45.32").unwrap(), 105.32));
        assert!(approx(parse_swim_time(" 15:02.10 ").unwrap(), 902.10));
    }

    #[test]
    fn parses_plain_seconds() {
        assert!(approx(parse_swim_time("45.32").unwrap(), 45.32));
        assert!(approx(parse_swim_time("52").unwrap(), 52.0));
        assert!(approx(parse_swim_time("45.3").unwrap(), 45.3));
    }

    #[test]
    fn parses_hours() {
        assert!(approx(parse_swim_time("1:02:03.5").unwrap(), 3723.5));
    }

    #[test]
    fn rejects_garbage_and_zero() {
        assert_eq!(parse_swim_time(""), None);
        assert_eq!(parse_swim_time("NT"), None);
        assert_eq!(parse_swim_time("1:xx"), None);
        assert_eq!(parse_swim_time("0.00"), None);
        assert_eq!(parse_swim_time("-3.0"), None);
    }
}
