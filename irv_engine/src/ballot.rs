use std::fmt::Display;

use crate::config::{CandidateId, CandidateStatus};

/// The ranking of one voter, and the choice currently counted.
///
/// The ranking never changes after construction. Only the cursor moves, and
/// only forward. When the cursor reaches the end of the ranking the ballot is
/// exhausted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ballot {
    id: u32,
    ranking: Vec<CandidateId>,
    cursor: usize,
}

impl Ballot {
    pub fn new(id: u32, ranking: Vec<CandidateId>) -> Ballot {
        Ballot {
            id,
            ranking,
            cursor: 0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn ranking(&self) -> &[CandidateId] {
        &self.ranking
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The choice currently in play, if any.
    pub fn current(&self) -> Option<CandidateId> {
        self.ranking.get(self.cursor).cloned()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.ranking.len()
    }

    /// Moves the cursor to the next choice held by an active candidate.
    ///
    /// Candidates that are not active, or that are unknown to `statuses`, are
    /// skipped. Returns `None` once the ranking is exhausted; the cursor then
    /// stays at the end of the ranking and further calls do nothing.
    pub fn next_candidate(&mut self, statuses: &[CandidateStatus]) -> Option<CandidateId> {
        if self.is_exhausted() {
            return None;
        }
        self.cursor += 1;
        while let Some(cid) = self.current() {
            if statuses.get(cid.0) == Some(&CandidateStatus::Active) {
                return Some(cid);
            }
            self.cursor += 1;
        }
        None
    }
}

// #0017: 3 <0> 2  1
impl Display for Ballot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:04}:", self.id)?;
        for (idx, cid) in self.ranking.iter().enumerate() {
            if idx == self.cursor {
                write!(f, "<{}>", cid)?;
            } else {
                write!(f, " {} ", cid)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CandidateStatus::*;

    fn ballot(ranks: &[usize]) -> Ballot {
        Ballot::new(17, ranks.iter().map(|&i| CandidateId(i)).collect())
    }

    #[test]
    fn display_marks_current_choice() {
        let mut b = ballot(&[3, 0, 2, 1]);
        assert_eq!(b.to_string(), "#0017:<3> 0  2  1 ");
        b.next_candidate(&[Active, Active, Active, Dropped]);
        assert_eq!(b.to_string(), "#0017: 3 <0> 2  1 ");
    }

    #[test]
    fn skips_inactive_candidates() {
        let mut b = ballot(&[0, 1, 2, 3]);
        let statuses = [Dropped, Dropped, AtMinimum, Active];
        assert_eq!(b.next_candidate(&statuses), Some(CandidateId(3)));
        assert_eq!(b.cursor(), 3);
        assert_eq!(b.current(), Some(CandidateId(3)));
    }

    #[test]
    fn exhausts_at_end_of_ranking() {
        let mut b = ballot(&[0, 1]);
        let statuses = [Dropped, Dropped, Active];
        assert_eq!(b.next_candidate(&statuses), None);
        assert!(b.is_exhausted());
        assert_eq!(b.cursor(), 2);
        // Already exhausted: nothing moves.
        assert_eq!(b.next_candidate(&statuses), None);
        assert_eq!(b.cursor(), 2);
        assert_eq!(b.current(), None);
    }

    #[test]
    fn unknown_candidates_are_skipped() {
        let mut b = ballot(&[0, 9, 1]);
        assert_eq!(b.next_candidate(&[Dropped, Active]), Some(CandidateId(1)));
    }

    #[test]
    fn empty_ranking_is_exhausted() {
        let mut b = ballot(&[]);
        assert!(b.is_exhausted());
        assert_eq!(b.next_candidate(&[Active]), None);
        assert_eq!(b.to_string(), "#0017:");
    }
}
