//! Fake content generation for `forge`
//!
//! Small word-pool text generator; good enough to fill a development blog
//! with plausible-looking posts and comments.

use chrono::{DateTime, Duration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;

const WORDS: &[&str] = &[
    "time", "year", "people", "way", "day", "thing", "world", "life", "hand", "part", "place",
    "work", "week", "case", "point", "company", "number", "group", "problem", "fact", "water",
    "night", "home", "side", "story", "month", "light", "house", "service", "area", "coffee",
    "music", "road", "garden", "paper", "river", "window", "morning", "winter", "summer",
];

const ADJECTIVES: &[&str] = &[
    "quiet", "bright", "small", "late", "early", "open", "simple", "long", "new", "old", "warm",
    "cold", "green", "blue", "distant", "familiar", "sudden", "slow",
];

const NAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "David", "Erin", "Frank", "Grace", "Henry", "Iris", "Jack", "Karen",
    "Leo", "Mallory", "Nina", "Oscar", "Peggy", "Quinn", "Ruth", "Sam", "Trudy",
];

fn word<R: Rng>(rng: &mut R) -> &'static str {
    // choose only fails on an empty slice
    WORDS.choose(rng).unwrap_or(&WORDS[0])
}

/// A capitalized sentence of 4 to 12 words.
pub fn sentence<R: Rng>(rng: &mut R) -> String {
    let len = rng.random_range(4..=12);
    let mut words: Vec<&str> = (0..len).map(|_| word(rng)).collect();
    if rng.random_bool(0.5) {
        words.insert(0, ADJECTIVES.choose(rng).unwrap_or(&ADJECTIVES[0]));
    }
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

/// A title of 2 to 5 words without trailing punctuation.
pub fn title<R: Rng>(rng: &mut R) -> String {
    let len = rng.random_range(2..=5);
    let words: Vec<&str> = (0..len).map(|_| word(rng)).collect();
    let mut title = words.join(" ");
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    title
}

/// A body of several sentence paragraphs.
pub fn body<R: Rng>(rng: &mut R, paragraphs: u32) -> String {
    (0..paragraphs)
        .map(|_| {
            let sentences = rng.random_range(3..=6);
            (0..sentences).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `count` distinct category names.
pub fn category_names<R: Rng>(rng: &mut R, count: u32) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    while names.len() < count as usize {
        let adjective = ADJECTIVES.choose(rng).unwrap_or(&ADJECTIVES[0]);
        let noun = word(rng);
        let mut name = format!("{} {}", adjective, noun);
        if let Some(first) = name.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        if !seen.insert(name.clone()) {
            // Pools are small; disambiguate collisions instead of spinning
            name = format!("{} {}", name, names.len() + 1);
        }
        names.push(name);
    }
    names
}

/// A visitor name and matching e-mail address.
pub fn visitor<R: Rng>(rng: &mut R) -> (String, String) {
    let name = NAMES.choose(rng).unwrap_or(&NAMES[0]).to_string();
    let email = format!("{}@example.com", name.to_ascii_lowercase());
    (name, email)
}

/// A timestamp within the last year.
pub fn past_timestamp<R: Rng>(rng: &mut R) -> DateTime<Utc> {
    Utc::now() - Duration::minutes(rng.random_range(0..60 * 24 * 365))
}
