//! Random card picking for "show me another card".

use crate::model::Card;
use uuid::Uuid;

/// Source of uniformly distributed indexes.
pub trait RandomSource {
    /// Returns an index in `0..upper`. `upper` is never zero.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Draws from the operating system's randomness via v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidRandom;

impl RandomSource for UuidRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        (Uuid::new_v4().as_u128() % upper as u128) as usize
    }
}

/// Whether [`pick_random_excluding`] has anything to offer.
pub fn can_pick_random(results: &[&Card], current: Option<Uuid>) -> bool {
    results.iter().any(|card| Some(card.id) != current)
}

/// Picks a card from `results` uniformly at random, never returning `current`.
///
/// Returns `None` when no card other than `current` is available, including the
/// single-card result set whose only card is the current one.
pub fn pick_random_excluding<'a, R: RandomSource>(
    results: &[&'a Card],
    current: Option<Uuid>,
    rng: &mut R,
) -> Option<&'a Card> {
    let candidates: Vec<&'a Card> = results
        .iter()
        .copied()
        .filter(|card| Some(card.id) != current)
        .collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.next_index(candidates.len())])
}


#[cfg(test)]
mod tests {
    use super::testing::SequenceRandom;
    use super::*;
    use crate::model::Sides;

    #[test]
    fn never_returns_current() {
        let cards: Vec<Card> = (0..4).map(|i| Card::new(format!("{}", i), Sides::One)).collect();
        let refs: Vec<&Card> = cards.iter().collect();
        let current = Some(cards[1].id);

        let mut rng = UuidRandom;
        for _ in 0..100 {
            let picked = pick_random_excluding(&refs, current, &mut rng).unwrap();
            assert_ne!(Some(picked.id), current);
        }
    }

    #[test]
    fn singleton_equal_to_current_yields_none() {
        let card = Card::new("Only", Sides::One);
        let refs = vec![&card];

        assert!(!can_pick_random(&refs, Some(card.id)));
        let mut rng = SequenceRandom::new(vec![0]);
        assert!(pick_random_excluding(&refs, Some(card.id), &mut rng).is_none());
    }

    #[test]
    fn empty_results_yield_none() {
        let mut rng = UuidRandom;
        assert!(!can_pick_random(&[], None));
        assert!(pick_random_excluding(&[], None, &mut rng).is_none());
    }

    #[test]
    fn singleton_without_current_is_offered() {
        let card = Card::new("Only", Sides::One);
        let refs = vec![&card];
        let mut rng = UuidRandom;
        assert!(can_pick_random(&refs, None));
        assert_eq!(pick_random_excluding(&refs, None, &mut rng).unwrap().id, card.id);
    }

    #[test]
    fn uses_injected_source_over_candidates() {
        let cards: Vec<Card> = ["a", "b", "c"].iter().map(|t| Card::new(*t, Sides::One)).collect();
        let refs: Vec<&Card> = cards.iter().collect();
        let mut rng = SequenceRandom::new(vec![1]);

        // Excluding "a" leaves ["b", "c"]; index 1 is "c".
        let picked = pick_random_excluding(&refs, Some(cards[0].id), &mut rng).unwrap();
        assert_eq!(picked.title, "c");
    }
}
