//! Candidate search policies.
//!
//! Every search has the same shape: enumerate hypotheses lazily, replay each
//! on its own fork, score the outcome and keep the best. [`select_best`]
//! owns the tie-break so that the winner never depends on how candidates
//! were evaluated, only on their enumeration order.

pub mod reach;
pub mod survival;
pub mod wallshot;

use std::cmp::{Ordering, Reverse};

use crate::replay::ReplayTrace;

/// Outcome of replaying one hypothesis for survival.
///
/// `Survived` ranks above every `FrozeAt`; a later freeze ranks above an
/// earlier one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Score {
    /// The character froze at this replay tick.
    FrozeAt(u32),
    /// The character stayed unfrozen for the whole horizon.
    Survived,
}

impl Score {
    /// Scores a replay trace by its first freeze.
    ///
    /// A character that vanished counts as frozen at the tick it vanished.
    #[must_use]
    pub fn from_trace(trace: &ReplayTrace) -> Self {
        match (trace.first_freeze, trace.removed_at) {
            (Some(tick), _) | (None, Some(tick)) => Self::FrozeAt(tick),
            (None, None) => Self::Survived,
        }
    }
}

/// One evaluated hypothesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate<T> {
    /// Position in the enumeration order.
    pub index: usize,
    /// What was tried.
    pub hypothesis: T,
    /// How it scored.
    pub score: Score,
}

impl<T> Candidate<T> {
    /// Ranking key: higher score first, then lower index.
    #[must_use]
    pub const fn key(&self) -> (Score, Reverse<usize>) {
        (self.score, Reverse(self.index))
    }

    fn ranks_above(&self, other: &Self) -> bool {
        self.key().cmp(&other.key()) == Ordering::Greater
    }
}

/// Picks the best candidate from a lazily evaluated sequence.
///
/// Candidates are pulled one at a time; as soon as one scores
/// [`Score::Survived`] nothing further is pulled, so the replays behind the
/// remaining candidates never run.
///
/// # Examples
///
/// ```
/// use foresight::search::{select_best, Candidate, Score};
///
/// let scores = [5, 9, 9, 3];
/// let best = select_best(scores.iter().enumerate().map(|(index, tick)| Candidate {
///     index,
///     hypothesis: (),
///     score: Score::FrozeAt(*tick),
/// }));
/// assert_eq!(best.map(|c| c.index), Some(1));
/// ```
#[must_use]
pub fn select_best<T, I>(candidates: I) -> Option<Candidate<T>>
where
    I: IntoIterator<Item = Candidate<T>>,
{
    let mut best: Option<Candidate<T>> = None;
    for candidate in candidates {
        log::trace!("candidate {} scored {:?}", candidate.index, candidate.score);
        let replace = best
            .as_ref()
            .is_none_or(|current| candidate.ranks_above(current));
        if replace {
            best = Some(candidate);
        }
        if best
            .as_ref()
            .is_some_and(|current| current.score == Score::Survived)
        {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    fn scored(scores: &[Score]) -> impl Iterator<Item = Candidate<()>> + '_ {
        scores.iter().enumerate().map(|(index, score)| Candidate {
            index,
            hypothesis: (),
            score: *score,
        })
    }

    #[rstest]
    #[case::first_max_wins(&[Score::FrozeAt(5), Score::FrozeAt(9), Score::FrozeAt(9), Score::FrozeAt(3)], Some(1))]
    #[case::survived_beats_any_tick(&[Score::FrozeAt(19), Score::Survived], Some(1))]
    #[case::single(&[Score::FrozeAt(0)], Some(0))]
    #[case::empty(&[], None)]
    fn tie_break(#[case] scores: &[Score], #[case] expected: Option<usize>) {
        assert_eq!(select_best(scored(scores)).map(|c| c.index), expected);
    }

    #[test]
    fn stops_pulling_after_survival() {
        let pulled = Cell::new(0);
        let scores = [Score::FrozeAt(2), Score::Survived, Score::Survived, Score::FrozeAt(1)];
        let best = select_best(scored(&scores).inspect(|_| pulled.set(pulled.get() + 1)));
        assert_eq!(best.map(|c| c.index), Some(1));
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn ranking_is_independent_of_evaluation_order() {
        let forward = [
            Candidate { index: 0, hypothesis: (), score: Score::FrozeAt(4) },
            Candidate { index: 1, hypothesis: (), score: Score::FrozeAt(7) },
            Candidate { index: 2, hypothesis: (), score: Score::FrozeAt(7) },
        ];
        let mut reversed = forward;
        reversed.reverse();
        assert_eq!(
            select_best(forward).map(|c| c.index),
            select_best(reversed).map(|c| c.index)
        );
    }

    #[test]
    fn survived_orders_above_every_tick() {
        assert!(Score::Survived > Score::FrozeAt(u32::MAX));
        assert!(Score::FrozeAt(3) > Score::FrozeAt(2));
    }
}
