// Invariants checked on random elections.

use quickcheck::{Arbitrary, Gen};

use crate::builder::Builder;
use crate::*;

#[derive(Debug, Clone)]
struct RandomElection {
    candidates: usize,
    votes: Vec<Vec<i64>>,
}

impl Arbitrary for RandomElection {
    fn arbitrary(g: &mut Gen) -> Self {
        let candidates = usize::arbitrary(g) % 6 + 1;
        // Keep the votes short enough to make ties and exhaustion frequent.
        let num_votes = usize::arbitrary(g) % (g.size() + 1);
        let mut votes = Vec::with_capacity(num_votes);
        for _ in 0..num_votes {
            let len = usize::arbitrary(g) % (candidates + 1);
            let ranking: Vec<i64> = (0..len)
                .map(|_| (u8::arbitrary(g) as i64 % (candidates as i64 + 1)) - 1)
                .collect();
            votes.push(ranking);
        }
        RandomElection { candidates, votes }
    }
}

impl RandomElection {
    fn tally(&self) -> Tally {
        let names: Vec<String> = (0..self.candidates).map(|i| format!("c{}", i)).collect();
        let mut builder = Builder::new().candidates(&names).unwrap();
        for v in self.votes.iter() {
            builder.add_vote(v).unwrap();
        }
        builder.build().unwrap()
    }
}

fn status_rank(s: CandidateStatus) -> u8 {
    match s {
        CandidateStatus::Active => 0,
        CandidateStatus::AtMinimum => 1,
        CandidateStatus::Dropped => 2,
    }
}

/// Checks the invariants of the tally each time the driver hands it over.
struct InvariantChecker {
    total: u64,
    statuses: Vec<CandidateStatus>,
    violations: Vec<String>,
}

impl InvariantChecker {
    fn check(&mut self, tally: &Tally, at: &str) {
        if tally.valid_votes() + tally.invalid_count() != self.total {
            self.violations.push(format!("{}: ballots lost or duplicated", at));
        }
        for (before, after) in self.statuses.iter().zip(tally.statuses()) {
            if status_rank(*after) < status_rank(*before) {
                self.violations.push(format!("{}: status went back", at));
            }
        }
        self.statuses = tally.statuses().to_vec();
    }
}

impl TallyObserver for InvariantChecker {
    fn vote_transferred(
        &mut self,
        tally: &Tally,
        _ballot: &Ballot,
        _from: CandidateId,
        _to: Option<CandidateId>,
    ) {
        self.check(tally, "transfer");
    }

    fn candidate_dropped(&mut self, tally: &Tally, candidate: CandidateId) {
        if tally.vote_count(candidate) != 0 {
            self.violations.push(format!("{:?} dropped with votes", candidate));
        }
        self.check(tally, "drop");
    }

    fn round_finished(&mut self, tally: &Tally, _stats: &RoundStats) {
        self.check(tally, "round");
    }

    fn min_votes_found(&mut self, tally: &Tally, _count: u64, _candidates: &[CandidateId]) {
        self.check(tally, "minimum");
    }
}

#[quickcheck]
fn invariants_hold_every_step(e: RandomElection) -> bool {
    let mut tally = e.tally();
    let mut checker = InvariantChecker {
        total: e.votes.len() as u64,
        statuses: tally.statuses().to_vec(),
        violations: Vec::new(),
    };
    run_election(&mut tally, &mut checker);
    checker.violations.is_empty()
}

#[quickcheck]
fn terminates_with_winner_or_tie(e: RandomElection) -> bool {
    let mut tally = e.tally();
    let res = run_election(&mut tally, &mut ());
    let bounded = res.rounds as usize <= e.candidates;
    let consistent = match &res.outcome {
        Outcome::Winner(cid) => tally.status(*cid) == Some(CandidateStatus::Active),
        Outcome::Tie(cids) => {
            cids.len() >= 2
                && cids
                    .iter()
                    .all(|c| tally.status(*c) == Some(CandidateStatus::AtMinimum))
        }
        Outcome::Error => false,
    };
    bounded && consistent && res.round_stats.len() == res.rounds as usize
}

#[quickcheck]
fn minimum_marking_is_idempotent(e: RandomElection) -> bool {
    let mut tally = e.tally();
    let first = tally.set_minvote_candidates();
    let statuses = tally.statuses().to_vec();
    let second = tally.set_minvote_candidates();
    first == second && statuses == tally.statuses()
}

#[quickcheck]
fn counts_match_holdings(e: RandomElection) -> bool {
    let mut tally = e.tally();
    run_election(&mut tally, &mut ());
    // Invalid ballots are exhausted, or never had a registered first choice.
    let invalid_ok = tally
        .invalid_ballots()
        .all(|b| b.current().map(|c| c.0 >= e.candidates).unwrap_or(true));
    let counts_ok = tally
        .candidates()
        .all(|cid| tally.votes_for(cid).count() as u64 == tally.vote_count(cid));
    invalid_ok && counts_ok
}
