pub const DEFAULT_LIMIT: usize = 30;
pub const MAX_LIMIT: usize = 1000;

/// Row limit from a raw `limit` query value.
///
/// Missing, empty, zero, negative or non-numeric input yields
/// [`DEFAULT_LIMIT`]; anything above [`MAX_LIMIT`] is clamped.
pub fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|&n| n > 0)
        .map(|n| usize::try_from(n).unwrap_or(MAX_LIMIT).min(MAX_LIMIT))
        .unwrap_or(DEFAULT_LIMIT)
}
