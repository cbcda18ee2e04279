use log::{debug, warn};
use std::collections::BTreeMap;

use crate::ballot::Ballot;
use crate::config::*;
use crate::observer::TallyObserver;

/// The state of an election between two rounds.
///
/// The tally owns every ballot in an arena. Each ballot is held by exactly one
/// location: the stack of the candidate its cursor points to, or the invalid
/// pool. Moving a ballot means moving its `BallotId` between these
/// collections.
///
/// The stacks are processed from the top: the ballot that arrived last for a
/// candidate is the first one transferred away.
#[derive(Debug, Clone)]
pub struct Tally {
    names: Vec<String>,
    // Kept apart from the holdings so that a ballot can read the statuses while
    // being advanced.
    statuses: Vec<CandidateStatus>,
    holdings: Vec<Vec<BallotId>>,
    ballots: Vec<Ballot>,
    invalid: Vec<BallotId>,
}

/// A single move performed by [`Tally::transfer_first_vote`].
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Transfer {
    pub ballot: BallotId,
    pub from: CandidateId,
    /// `None` if the ballot got exhausted and went to the invalid pool.
    pub to: Option<CandidateId>,
}

impl Tally {
    /// A tally with all the candidates active and no ballot.
    pub(crate) fn new(names: Vec<String>) -> Tally {
        let num_candidates = names.len();
        Tally {
            names,
            statuses: vec![CandidateStatus::Active; num_candidates],
            holdings: vec![Vec::new(); num_candidates],
            ballots: Vec::new(),
            invalid: Vec::new(),
        }
    }

    /// Adds a ballot, routed by its current choice.
    ///
    /// A ballot without a choice, or whose current choice is not a registered
    /// candidate, goes to the invalid pool.
    pub(crate) fn add_vote(&mut self, ballot: Ballot) -> BallotId {
        let bid = BallotId(self.ballots.len());
        let target = ballot.current().filter(|cid| cid.0 < self.holdings.len());
        self.ballots.push(ballot);
        match target {
            Some(cid) => self.holdings[cid.0].push(bid),
            None => self.invalid.push(bid),
        }
        bid
    }

    pub fn candidate_count(&self) -> usize {
        self.names.len()
    }

    /// All the candidates, in registration order.
    pub fn candidates(&self) -> impl Iterator<Item = CandidateId> {
        (0..self.names.len()).map(CandidateId)
    }

    pub fn name(&self, cid: CandidateId) -> Option<&str> {
        self.names.get(cid.0).map(|s| s.as_str())
    }

    pub fn status(&self, cid: CandidateId) -> Option<CandidateStatus> {
        self.statuses.get(cid.0).cloned()
    }

    pub fn statuses(&self) -> &[CandidateStatus] {
        &self.statuses
    }

    pub fn vote_count(&self, cid: CandidateId) -> u64 {
        self.holdings.get(cid.0).map(|h| h.len() as u64).unwrap_or(0)
    }

    pub fn invalid_count(&self) -> u64 {
        self.invalid.len() as u64
    }

    /// The number of ballots ever added to this tally.
    pub fn total_ballots(&self) -> u64 {
        self.ballots.len() as u64
    }

    /// The sum of the votes held by all the candidates.
    pub fn valid_votes(&self) -> u64 {
        self.holdings.iter().map(|h| h.len() as u64).sum()
    }

    pub fn ballot(&self, bid: BallotId) -> &Ballot {
        &self.ballots[bid.0]
    }

    /// The ballots held by a candidate, the next one to be transferred first.
    pub fn votes_for(&self, cid: CandidateId) -> impl Iterator<Item = &Ballot> {
        let held: &[BallotId] = self.holdings.get(cid.0).map(|h| h.as_slice()).unwrap_or(&[]);
        held.iter().rev().map(move |bid| &self.ballots[bid.0])
    }

    pub fn invalid_ballots(&self) -> impl Iterator<Item = &Ballot> {
        self.invalid.iter().map(move |bid| &self.ballots[bid.0])
    }

    /// Marks all the non-dropped candidates with the fewest votes as being at the minimum.
    ///
    /// Returns the minimum count and the marked candidates, or `None` when all
    /// the candidates are dropped. Running it again without any change to the
    /// counts marks the same candidates.
    pub fn set_minvote_candidates(&mut self) -> Option<(u64, Vec<CandidateId>)> {
        let min_count = self
            .candidates()
            .filter(|cid| self.statuses[cid.0] != CandidateStatus::Dropped)
            .map(|cid| self.vote_count(cid))
            .min();
        let min_count = match min_count {
            Some(c) => c,
            None => {
                debug!("set_minvote_candidates: no candidate left, nothing to mark");
                return None;
            }
        };

        let at_min: Vec<CandidateId> = self
            .candidates()
            .filter(|cid| {
                self.statuses[cid.0] != CandidateStatus::Dropped
                    && self.vote_count(*cid) == min_count
            })
            .collect();
        for cid in at_min.iter() {
            self.statuses[cid.0] = CandidateStatus::AtMinimum;
        }
        debug!(
            "set_minvote_candidates: min count {:?} for candidates {:?}",
            min_count, at_min
        );
        Some((min_count, at_min))
    }

    /// Moves the ballot on top of the stack of `cid` to its next active choice.
    ///
    /// Does nothing and returns `None` if the candidate holds no ballot.
    pub fn transfer_first_vote(&mut self, cid: CandidateId) -> Option<Transfer> {
        let bid = self.holdings.get_mut(cid.0)?.pop()?;
        let next = self.ballots[bid.0].next_candidate(&self.statuses);
        match next {
            Some(next_cid) => self.holdings[next_cid.0].push(bid),
            None => self.invalid.push(bid),
        }
        debug!(
            "transfer_first_vote: {} from {:?} to {:?}",
            self.ballots[bid.0], cid, next
        );
        Some(Transfer {
            ballot: bid,
            from: cid,
            to: next,
        })
    }

    /// Drains every candidate at the minimum and marks it as dropped.
    ///
    /// Candidates are processed in increasing order. Returns, for each dropped
    /// candidate, where its ballots went.
    pub fn drop_minvote_candidates<O: TallyObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Vec<EliminationStats> {
        let mut res: Vec<EliminationStats> = Vec::new();
        let at_min: Vec<CandidateId> = self
            .candidates()
            .filter(|cid| self.statuses[cid.0] == CandidateStatus::AtMinimum)
            .collect();
        for cid in at_min {
            let mut transfers: BTreeMap<CandidateId, u64> = BTreeMap::new();
            let mut exhausted: u64 = 0;
            // A ballot only lands on an active candidate, so it never comes back
            // to the one being drained. The budget only guards against a
            // corrupted tally.
            let mut budget = self.total_ballots();
            while budget > 0 {
                let transfer = match self.transfer_first_vote(cid) {
                    Some(t) => t,
                    None => break,
                };
                budget -= 1;
                match transfer.to {
                    Some(to) => *transfers.entry(to).or_insert(0) += 1,
                    None => exhausted += 1,
                }
                observer.vote_transferred(self, &self.ballots[transfer.ballot.0], cid, transfer.to);
            }
            if self.vote_count(cid) > 0 {
                warn!(
                    "drop_minvote_candidates: candidate {:?} still holds {} votes after draining",
                    cid,
                    self.vote_count(cid)
                );
            }
            self.statuses[cid.0] = CandidateStatus::Dropped;
            debug!(
                "drop_minvote_candidates: dropped {:?}, transfers: {:?}, exhausted: {}",
                cid, transfers, exhausted
            );
            observer.candidate_dropped(self, cid);
            res.push(EliminationStats {
                id: cid,
                name: self.names[cid.0].clone(),
                transfers: transfers
                    .into_iter()
                    .map(|(to, count)| (to, self.names[to.0].clone(), count))
                    .collect(),
                exhausted,
            });
        }
        res
    }

    /// Classifies the current state. Read-only.
    pub fn condition(&self) -> TallyCondition {
        let mut active_cands = 0;
        let mut min_cands = 0;
        for status in self.statuses.iter() {
            match status {
                CandidateStatus::Active => active_cands += 1,
                CandidateStatus::AtMinimum => min_cands += 1,
                CandidateStatus::Dropped => {}
            }
        }
        match (active_cands, min_cands) {
            (1, _) => TallyCondition::Winner,
            (a, _) if a > 1 => TallyCondition::Continue,
            (0, m) if m > 1 => TallyCondition::Tie,
            _ => TallyCondition::Error,
        }
    }

    /// The only active candidate, if there is exactly one.
    pub fn winner(&self) -> Option<CandidateId> {
        let mut active = self.with_status(CandidateStatus::Active);
        match (active.next(), active.next()) {
            (Some(cid), None) => Some(cid),
            _ => None,
        }
    }

    pub fn with_status(&self, status: CandidateStatus) -> impl Iterator<Item = CandidateId> + '_ {
        self.candidates()
            .filter(move |cid| self.statuses[cid.0] == status)
    }

    /// A snapshot of the counts, as printed after each round.
    pub fn standings(&self) -> Vec<CandidateStanding> {
        let total = self.valid_votes();
        self.candidates()
            .map(|cid| {
                let status = self.statuses[cid.0];
                let (votes, percent) = if status == CandidateStatus::Dropped {
                    (None, None)
                } else {
                    let count = self.vote_count(cid);
                    let percent = if total == 0 {
                        0.0
                    } else {
                        (count as f64 / total as f64) * 100.0
                    };
                    (Some(count), Some(percent))
                };
                CandidateStanding {
                    id: cid,
                    name: self.names[cid.0].clone(),
                    status,
                    votes,
                    percent,
                }
            })
            .collect()
    }
}
