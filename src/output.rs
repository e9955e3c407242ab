use colored::Colorize;

use crate::api::models::SwimmerSummary;

pub fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

pub fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

pub fn success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

pub fn swimmer_line(prefix: &str, swimmer: &SwimmerSummary) {
    println!(
        "{} {} {} {} {}",
        prefix.bold(),
        swimmer.name.white().bold(),
        format!("({})", swimmer.team).dimmed(),
        format!("{:.1}", swimmer.rating).yellow(),
        format!("[{}]", swimmer.id).dimmed()
    );
}

/// Signed rating change, green when up and red when down
pub fn rating_change(old: f64, new: f64) -> String {
    let diff = new - old;
    let text = format!("{:.1} -> {:.1} ({:+.1})", old, new, diff);
    if diff >= 0.0 {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}
