use crate::ballot::Ballot;
use crate::config::{CandidateId, RoundStats};
use crate::tally::Tally;

/// Hooks called by the round driver while it mutates a tally.
///
/// All the methods do nothing by default. The hooks only observe: the
/// outcome of the election does not depend on them. Use `()` to run an
/// election silently.
pub trait TallyObserver {
    fn round_started(&mut self, _round: u32) {}

    /// The candidates found at the minimum count, in candidate order.
    fn min_votes_found(&mut self, _tally: &Tally, _count: u64, _candidates: &[CandidateId]) {}

    /// A ballot left `from`. `to` is `None` when the ballot went to the invalid pool.
    /// The cursor of the ballot already points to its new choice.
    fn vote_transferred(
        &mut self,
        _tally: &Tally,
        _ballot: &Ballot,
        _from: CandidateId,
        _to: Option<CandidateId>,
    ) {
    }

    fn candidate_dropped(&mut self, _tally: &Tally, _candidate: CandidateId) {}

    /// Called after the transfers of the round, before new candidates are marked at the minimum.
    fn round_finished(&mut self, _tally: &Tally, _stats: &RoundStats) {}
}

impl TallyObserver for () {}

/// Keeps every event, mostly useful for tests and audits.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyEvent {
    RoundStarted(u32),
    MinVotes(u64, Vec<CandidateId>),
    Transferred {
        ballot: u32,
        from: CandidateId,
        to: Option<CandidateId>,
    },
    Dropped(CandidateId),
    RoundFinished(u32),
}

impl TallyObserver for Vec<TallyEvent> {
    fn round_started(&mut self, round: u32) {
        self.push(TallyEvent::RoundStarted(round));
    }

    fn min_votes_found(&mut self, _tally: &Tally, count: u64, candidates: &[CandidateId]) {
        self.push(TallyEvent::MinVotes(count, candidates.to_vec()));
    }

    fn vote_transferred(
        &mut self,
        _tally: &Tally,
        ballot: &Ballot,
        from: CandidateId,
        to: Option<CandidateId>,
    ) {
        self.push(TallyEvent::Transferred {
            ballot: ballot.id(),
            from,
            to,
        });
    }

    fn candidate_dropped(&mut self, _tally: &Tally, candidate: CandidateId) {
        self.push(TallyEvent::Dropped(candidate));
    }

    fn round_finished(&mut self, _tally: &Tally, stats: &RoundStats) {
        self.push(TallyEvent::RoundFinished(stats.round));
    }
}
