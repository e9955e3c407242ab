use super::models::{BestTimes, RecordedTime};

/// Store `time` under `label` unless an equal or faster time is already recorded.
/// Returns true when the map changed.
pub fn merge_best_time(best_times: &mut BestTimes, label: String, time: RecordedTime) -> bool {
    match best_times.get(&label) {
        Some(existing) if !is_faster(&time, existing) => false,
        _ => {
            best_times.insert(label, time);
            true
        }
    }
}

/// Merge every incoming time with the replace-if-faster rule, returning how many changed
pub fn merge_best_times(best_times: &mut BestTimes, incoming: BestTimes) -> usize {
    let mut changed = 0;
    for (label, time) in incoming {
        if merge_best_time(best_times, label, time) {
            changed += 1;
        }
    }
    changed
}

// A recorded time without seconds counts as slower than any real time.
fn is_faster(candidate: &RecordedTime, existing: &RecordedTime) -> bool {
    match (candidate.seconds, existing.seconds) {
        (Some(new), Some(old)) => new < old,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Normalize a scraped event name: "100 Yard Freestyle" -> "100 Y FREESTYLE".
/// Needs at least distance, course and one stroke word.
pub fn format_event_label(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }

    let distance = parts[0];
    let course = parts[1].chars().next()?.to_uppercase().collect::<String>();
    let stroke = parts[2..].join(" ").to_uppercase();

    Some(format!("{} {} {}", distance, course, stroke))
}

/// Up to two initials, e.g. "Caeleb Remel Dressel" -> "CR"
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(seconds: f64) -> RecordedTime {
        RecordedTime::new(format!("{:.2}", seconds), seconds)
    }

    #[test]
    fn faster_time_replaces_slower_one() {
        let mut best = BestTimes::new();
        assert!(merge_best_time(&mut best, "100 Y FREE".into(), time(45.0)));
        assert!(merge_best_time(&mut best, "100 Y FREE".into(), time(44.5)));
        assert_eq!(best["100 Y FREE"].seconds, Some(44.5));
    }

    #[test]
    fn slower_or_equal_time_is_ignored() {
        let mut best = BestTimes::new();
        merge_best_time(&mut best, "100 Y FREE".into(), time(45.0));

        assert!(!merge_best_time(&mut best, "100 Y FREE".into(), time(46.0)));
        assert!(!merge_best_time(&mut best, "100 Y FREE".into(), time(45.0)));
        assert_eq!(best["100 Y FREE"].seconds, Some(45.0));
    }

    #[test]
    fn missing_seconds_never_overwrite_a_real_time() {
        let mut best = BestTimes::new();
        merge_best_time(&mut best, "50 Y FLY".into(), time(21.0));
        let unknown = RecordedTime { time: "DQ".into(), seconds: None };

        assert!(!merge_best_time(&mut best, "50 Y FLY".into(), unknown.clone()));
        assert!(merge_best_time(&mut best, "50 Y BACK".into(), unknown));
        assert!(merge_best_time(&mut best, "50 Y BACK".into(), time(25.0)));
    }

    #[test]
    fn merge_counts_only_changes() {
        let mut best = BestTimes::new();
        merge_best_time(&mut best, "200 Y IM".into(), time(110.0));

        let mut incoming = BestTimes::new();
        incoming.insert("200 Y IM".into(), time(111.0));
        incoming.insert("100 L BACK".into(), time(60.0));

        assert_eq!(merge_best_times(&mut best, incoming), 1);
        assert_eq!(best.len(), 2);
    }

    #[test]
    fn formats_scraped_event_names() {
        assert_eq!(format_event_label("100 Yard Freestyle"), Some("100 Y FREESTYLE".into()));
        assert_eq!(format_event_label("200  L  Individual Medley"), Some("200 L INDIVIDUAL MEDLEY".into()));
        assert_eq!(format_event_label("1 M"), None);
    }

    #[test]
    fn builds_initials_from_first_two_names() {
        assert_eq!(initials("caeleb remel dressel"), "CR");
        assert_eq!(initials("Ledecky"), "L");
        assert_eq!(initials(""), "");
    }
}
