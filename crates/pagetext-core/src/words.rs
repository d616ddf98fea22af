//! Grouping positioned glyphs into words and lines.

use crate::model::{TextChar, Word};
use crate::options::ExtractOptions;

/// Cluster `items` into rows by `key`.
///
/// Items are sorted by key; an item joins the current cluster when its key is
/// within `tolerance` of the previous item's key. Clusters come back ordered by
/// their smallest key, and items keep their relative input order on ties.
pub(crate) fn cluster_by<T, F>(mut items: Vec<T>, key: F, tolerance: f32) -> Vec<Vec<T>>
where
    F: Fn(&T) -> f32,
{
    items.sort_by(|a, b| key(a).total_cmp(&key(b)));

    let mut clusters: Vec<Vec<T>> = Vec::new();
    let mut last_key = f32::NEG_INFINITY;
    for item in items {
        let k = key(&item);
        match clusters.last_mut() {
            Some(cluster) if k <= last_key + tolerance => cluster.push(item),
            _ => clusters.push(vec![item]),
        }
        last_key = k;
    }
    clusters
}

/// Whether `curr` (next in left-to-right order) starts a new word after `prev`.
fn begins_new_word(prev: &TextChar, curr: &TextChar, options: &ExtractOptions) -> bool {
    curr.upright != prev.upright
        || curr.x0 < prev.x0
        || curr.x0 > prev.x1 + options.x_tolerance
        || curr.top > prev.top + options.y_tolerance
}

/// Merge glyphs into words.
///
/// Words are returned line by line (top to bottom), left to right within a
/// line. Unless `keep_blank_chars` is set, whitespace glyphs end the current
/// word and are dropped.
pub fn extract_words(chars: &[TextChar], options: &ExtractOptions) -> Vec<Word> {
    let lines = cluster_by(
        chars.iter().collect::<Vec<&TextChar>>(),
        |c| c.top,
        options.y_tolerance,
    );

    let mut words = Vec::new();
    for mut line in lines {
        line.sort_by(|a, b| a.x0.total_cmp(&b.x0));

        let mut current: Vec<&TextChar> = Vec::new();
        for c in line {
            if !options.keep_blank_chars && c.is_blank() {
                words.extend(Word::from_chars(&current));
                current.clear();
                continue;
            }
            if let Some(prev) = current.last()
                && begins_new_word(prev, c, options)
            {
                words.extend(Word::from_chars(&current));
                current.clear();
            }
            current.push(c);
        }
        words.extend(Word::from_chars(&current));
    }
    words
}
