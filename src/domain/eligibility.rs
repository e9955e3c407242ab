const DIVING_KEYWORDS: [&str; 4] = ["DIVING", "DIVE", "PLATFORM", "SPRINGBOARD"];

/// True when a swimmer should be kept out of pairing and the leaderboard:
/// either no events at all, or more than half of the events are diving events.
pub fn is_diver<I, S>(event_labels: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut total = 0usize;
    let mut diving = 0usize;

    for label in event_labels {
        total += 1;
        if is_diving_event(label.as_ref()) {
            diving += 1;
        }
    }

    if total == 0 {
        return true;
    }

    diving as f64 / total as f64 > 0.5
}

pub fn is_eligible<I, S>(event_labels: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    !is_diver(event_labels)
}

fn is_diving_event(label: &str) -> bool {
    let upper = label.to_uppercase();
    DIVING_KEYWORDS.iter().any(|keyword| upper.contains(keyword))
}
