use crate::rng::RandomSource;
use suerte_shared::{CoinFace, Guarded, Rejection};

/// Uniform index into a sequence of `len` items.
pub fn pick_index(len: usize, rng: &mut dyn RandomSource) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let idx = (rng.next_f64() * len as f64).floor() as usize;
    // a source returning exactly 1.0 must not overflow the range
    Some(idx.min(len - 1))
}

/// Pick one item with probability 1/len each.
pub fn select<'a, T>(items: &'a [T], rng: &mut dyn RandomSource) -> Guarded<&'a T> {
    pick_index(items.len(), rng)
        .map(|i| &items[i])
        .ok_or(Rejection::EmptySelection)
}

pub fn flip(rng: &mut dyn RandomSource) -> CoinFace {
    if rng.next_f64() > 0.5 {
        CoinFace::Heads
    } else {
        CoinFace::Tails
    }
}
