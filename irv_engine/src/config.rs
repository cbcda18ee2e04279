// ********* Identifiers ***********

use std::error::Error;
use std::fmt::Display;

/// The position of a candidate in the registry.
///
/// Identifiers are assigned at registration time, starting at 0, and match the
/// numbers written in the rankings of the ballots.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct CandidateId(pub usize);

impl CandidateId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slot of a ballot in the arena of a tally.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct BallotId(pub(crate) usize);

// ********* Candidate state ***********

/// The status of a candidate during the tabulation.
///
/// A candidate only moves forward: `Active -> AtMinimum -> Dropped`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum CandidateStatus {
    /// Still eligible to receive votes.
    Active,
    /// Tied for the fewest votes, marked for elimination in the next round.
    AtMinimum,
    /// Eliminated. Holds no votes.
    Dropped,
}

impl CandidateStatus {
    /// One-letter code used in the standings table.
    pub fn code(&self) -> char {
        match self {
            CandidateStatus::Active => 'A',
            CandidateStatus::AtMinimum => 'M',
            CandidateStatus::Dropped => 'D',
        }
    }
}

/// Classification of the state of a tally.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TallyCondition {
    /// Exactly one active candidate.
    Winner,
    /// Two or more active candidates.
    Continue,
    /// No active candidate and at least two candidates at the minimum.
    Tie,
    /// Anything else.
    Error,
}

// ******** Output data structures *********

/// The terminal state of an election.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Outcome {
    Winner(CandidateId),
    /// All the candidates that were tied at the minimum when no active candidate remained,
    /// in candidate order.
    Tie(Vec<CandidateId>),
    /// The status bookkeeping reached a configuration without a winner or a tie.
    Error,
}

/// The position of one candidate after a round.
#[derive(PartialEq, Debug, Clone)]
pub struct CandidateStanding {
    pub id: CandidateId,
    pub name: String,
    pub status: CandidateStatus,
    /// Not reported for dropped candidates.
    pub votes: Option<u64>,
    /// Share of the votes held by candidates, in percent.
    pub percent: Option<f64>,
}

/// Where the ballots of a dropped candidate went.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EliminationStats {
    pub id: CandidateId,
    pub name: String,
    /// Number of ballots received by each candidate, in candidate order.
    pub transfers: Vec<(CandidateId, String, u64)>,
    pub exhausted: u64,
}

/// Statistics for one round
#[derive(PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    pub standings: Vec<CandidateStanding>,
    pub invalid: u64,
    /// The candidates dropped at the start of this round.
    pub eliminated: Vec<EliminationStats>,
    /// The candidates found at the minimum at the end of this round.
    pub at_minimum: Vec<CandidateId>,
    pub min_votes: Option<u64>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ElectionResult {
    pub outcome: Outcome,
    pub rounds: u32,
    pub round_stats: Vec<RoundStats>,
}

/// Errors raised while assembling a tally.
///
/// Running the rounds never fails: inconsistent states are reported through
/// [`Outcome::Error`].
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingErrors {
    NoCandidates,
    EmptyCandidateName(usize),
    DuplicateCandidate(String),
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::NoCandidates => write!(f, "no candidate registered before adding votes"),
            VotingErrors::EmptyCandidateName(idx) => {
                write!(f, "candidate {} has an empty name", idx)
            }
            VotingErrors::DuplicateCandidate(name) => {
                write!(f, "candidate {} is registered twice", name)
            }
        }
    }
}
