use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::PLATE, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!("{} {}: {}", Icons::INFO, label.style(theme().label.clone()), value);
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn bullet(text: &str) {
    println!("  {} {}", Icons::DOT.style(theme().label.clone()), text);
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().label.clone()), value);
}

pub fn dim(text: &str) -> String {
    text.style(theme().label.clone()).to_string()
}

/// A rating drawn as stars, e.g. `★★★☆☆`. Ratings outside 0..=5 are clamped for display.
pub fn star_bar(rating: i64) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn stars(rating: i64) -> String {
    star_bar(rating).style(theme().rating.clone()).to_string()
}
