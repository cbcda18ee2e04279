use log::debug;
use std::collections::HashSet;

use crate::ballot::Ballot;
pub use crate::config::*;
use crate::tally::Tally;

/// A builder for assembling a tally.
///
/// Ballots are numbered from 1 in the order they are added, and are routed to
/// the candidate of their first choice.
///
/// ```
/// use irv_engine::builder::Builder;
/// # use irv_engine::VotingErrors;
///
/// let mut builder = Builder::new()
///     .candidates(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_vote(&[1, 0])?;
/// // A negative choice ends the ranking.
/// builder.add_vote(&[0, -1])?;
///
/// let tally = builder.build()?;
/// assert_eq!(tally.total_ballots(), 2);
/// # Ok::<(), VotingErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _candidates: Option<Vec<String>>,
    pub(crate) _rankings: Vec<Vec<CandidateId>>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Registers the candidates, in order. Replaces the ones registered before,
    /// and the votes added so far.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, VotingErrors> {
        let mut seen: HashSet<&String> = HashSet::new();
        for (idx, name) in cands.iter().enumerate() {
            if name.is_empty() {
                return Err(VotingErrors::EmptyCandidateName(idx));
            }
            if !seen.insert(name) {
                return Err(VotingErrors::DuplicateCandidate(name.clone()));
            }
        }
        Ok(Builder {
            _candidates: Some(cands.to_vec()),
            _rankings: Vec::new(),
        })
    }

    /// Adds a vote, as written in a votes file.
    ///
    /// The first negative entry is the "no candidate" marker: it and
    /// everything after it are ignored. A vote that starts with the marker is
    /// invalid from the start.
    pub fn add_vote(&mut self, choices: &[i64]) -> Result<(), VotingErrors> {
        let ranking: Vec<CandidateId> = choices
            .iter()
            .take_while(|c| **c >= 0)
            .map(|c| CandidateId(*c as usize))
            .collect();
        self.add_ranking(&ranking)
    }

    /// Adds a vote with an explicit ranking.
    ///
    /// The identifiers are not checked against the registered candidates.
    /// Unknown candidates are never counted.
    pub fn add_ranking(&mut self, ranking: &[CandidateId]) -> Result<(), VotingErrors> {
        if self._candidates.is_none() {
            return Err(VotingErrors::NoCandidates);
        }
        self._rankings.push(ranking.to_vec());
        Ok(())
    }

    pub fn build(self) -> Result<Tally, VotingErrors> {
        let names = self._candidates.ok_or(VotingErrors::NoCandidates)?;
        let mut tally = Tally::new(names);
        for (idx, ranking) in self._rankings.into_iter().enumerate() {
            let ballot = Ballot::new((idx + 1) as u32, ranking);
            debug!("build: adding ballot {}", ballot);
            tally.add_vote(ballot);
        }
        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ns: &[&str]) -> Vec<String> {
        ns.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn votes_need_candidates() {
        let mut b = Builder::new();
        assert_eq!(b.add_vote(&[0]), Err(VotingErrors::NoCandidates));
        assert_eq!(
            Builder::new().build().err(),
            Some(VotingErrors::NoCandidates)
        );
    }

    #[test]
    fn rejects_bad_registries() {
        assert_eq!(
            Builder::new().candidates(&names(&["a", "b", "a"])).err(),
            Some(VotingErrors::DuplicateCandidate("a".to_string()))
        );
        assert_eq!(
            Builder::new().candidates(&names(&["a", ""])).err(),
            Some(VotingErrors::EmptyCandidateName(1))
        );
    }

    #[test]
    fn sentinel_truncates_ranking() {
        let mut b = Builder::new().candidates(&names(&["a", "b", "c"])).unwrap();
        b.add_vote(&[2, -1, 0]).unwrap();
        b.add_vote(&[-1, 1, 0]).unwrap();
        let t = b.build().unwrap();
        let held: Vec<&[CandidateId]> = t.votes_for(CandidateId(2)).map(|b| b.ranking()).collect();
        assert_eq!(held, vec![&[CandidateId(2)][..]]);
        assert_eq!(t.invalid_count(), 1);
        assert!(t.invalid_ballots().all(|b| b.ranking().is_empty()));
    }

    #[test]
    fn ballot_ids_follow_insertion_order() {
        let mut b = Builder::new().candidates(&names(&["a"])).unwrap();
        for _ in 0..3 {
            b.add_vote(&[0]).unwrap();
        }
        let t = b.build().unwrap();
        let ids: Vec<u32> = t.votes_for(CandidateId(0)).map(|b| b.id()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn unknown_first_choice_is_invalid() {
        let mut b = Builder::new().candidates(&names(&["a"])).unwrap();
        b.add_vote(&[4, 0]).unwrap();
        let t = b.build().unwrap();
        assert_eq!(t.invalid_count(), 1);
        assert_eq!(t.vote_count(CandidateId(0)), 0);
    }
}
