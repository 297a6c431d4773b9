//! Threshold, rank and truncate, independent of what is being scored.

/// An item paired with its score and its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<T> {
    pub index: usize,
    pub score: u32,
    pub item: T,
}

impl<T> Scored<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scored<U> {
        Scored { index: self.index, score: self.score, item: f(self.item) }
    }
}

/// Keep `score >= threshold`, order by score descending then input index
/// ascending, and keep at most `limit`. Ordering does not depend on the
/// order of `scored` itself.
pub fn rank_and_select<T>(mut scored: Vec<Scored<T>>, threshold: u32, limit: usize) -> Vec<Scored<T>> {
    scored.retain(|s| s.score >= threshold);
    scored.sort_by(|a, b| b.score.cmp(&a.score).then(a.index.cmp(&b.index)));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(scores: &[u32]) -> Vec<Scored<char>> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| Scored { index: i, score, item: (b'a' + i as u8) as char })
            .collect()
    }

    #[test]
    fn ties_keep_input_order() {
        let picked = rank_and_select(scored(&[2, 4, 2, 3, 4]), 0, 10);
        let items: String = picked.iter().map(|s| s.item).collect();
        assert_eq!(items, "bedac");
    }

    #[test]
    fn order_of_completion_does_not_matter() {
        let mut shuffled = scored(&[2, 4, 2, 3, 4]);
        shuffled.reverse();
        let items: String = rank_and_select(shuffled, 0, 10).iter().map(|s| s.item).collect();
        assert_eq!(items, "bedac");
    }

    #[test]
    fn threshold_is_inclusive_and_limit_truncates() {
        let picked = rank_and_select(scored(&[1, 2, 3, 2, 0]), 2, 2);
        let scores: Vec<u32> = picked.iter().map(|s| s.score).collect();
        assert_eq!(scores, [3, 2]);
        assert_eq!(picked[1].index, 1);
    }

    #[test]
    fn nothing_above_threshold_gives_empty() {
        assert!(rank_and_select(scored(&[0, 1, 1]), 2, 100).is_empty());
    }
}
