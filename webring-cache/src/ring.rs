//! Circular navigation over an ordered member list.
//!
//! All functions return `None` only when `urls` is empty. Lookup is by exact
//! string equality against the first occurrence.

use rand::Rng;

/// Member after `current`, wrapping from the tail to the head.
///
/// An unknown `current` resets to the head of the ring.
pub fn next_of<'a>(urls: &'a [String], current: &str) -> Option<&'a str> {
    if urls.is_empty() {
        return None;
    }
    let index = match position(urls, current) {
        Some(i) => (i + 1) % urls.len(),
        None => 0,
    };
    Some(urls[index].as_str())
}

/// Member before `current`, wrapping from the head to the tail.
///
/// An unknown `current` resets to the tail of the ring, not the head.
pub fn previous_of<'a>(urls: &'a [String], current: &str) -> Option<&'a str> {
    if urls.is_empty() {
        return None;
    }
    let len = urls.len();
    let index = match position(urls, current) {
        Some(i) => (i + len - 1) % len,
        None => len - 1,
    };
    Some(urls[index].as_str())
}

/// Uniformly chosen member.
pub fn pick_random<'a, R: Rng + ?Sized>(urls: &'a [String], rng: &mut R) -> Option<&'a str> {
    if urls.is_empty() {
        return None;
    }
    Some(urls[rng.gen_range(0..urls.len())].as_str())
}

fn position(urls: &[String], current: &str) -> Option<usize> {
    urls.iter().position(|url| url == current)
}
