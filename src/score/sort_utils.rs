use ahash::RandomState;
use std::collections::HashMap;

/// Orders `items` ascending by `key` and assigns standard competition
/// positions: equal keys share a position and the next distinct key takes its
/// 1-based rank (1, 1, 3). Items whose key is `None` go last, in input order,
/// with consecutive positions of their own.
#[must_use]
pub fn rank_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<(usize, T)>
where
    K: Ord,
    F: Fn(&T) -> Option<K>,
{
    let mut ranked: Vec<(K, T)> = Vec::new();
    let mut unranked: Vec<T> = Vec::new();
    for item in items {
        match key(&item) {
            Some(k) => ranked.push((k, item)),
            None => unranked.push(item),
        }
    }
    // stable, so equal keys keep input order
    ranked.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = Vec::with_capacity(ranked.len() + unranked.len());
    let mut position = 0;
    let mut prev: Option<K> = None;
    for (idx, (k, item)) in ranked.into_iter().enumerate() {
        if prev.as_ref() != Some(&k) {
            position = idx + 1;
        }
        out.push((position, item));
        prev = Some(k);
    }
    let offset = out.len();
    for (idx, item) in unranked.into_iter().enumerate() {
        out.push((offset + idx + 1, item));
    }
    out
}

pub type PositionMap = HashMap<String, usize, RandomState>;

/// Builds an id -> position lookup from a prior snapshot.
#[must_use]
pub fn position_map<'a, I>(previous: I) -> PositionMap
where
    I: IntoIterator<Item = (&'a str, usize)>,
{
    previous
        .into_iter()
        .map(|(id, pos)| (id.to_string(), pos))
        .collect()
}

/// Positive when the entry moved up the board.
#[must_use]
pub fn position_change(previous: Option<&PositionMap>, id: &str, current: usize) -> Option<i32> {
    let before = *previous?.get(id)?;
    let before = i32::try_from(before).ok()?;
    let now = i32::try_from(current).ok()?;
    Some(before - now)
}
