use log::{debug, info, warn};

use crate::config::*;
use crate::observer::TallyObserver;
use crate::tally::Tally;

/// Runs the rounds of an instant-runoff election until a winner, a tie or an
/// inconsistent state is reached.
///
/// Each round drops the candidates marked at the minimum in the previous
/// round, transfers their ballots, then marks the new candidates at the
/// minimum. The first round has nothing to drop. A tally with a single
/// candidate wins without running any round.
///
/// The tally is left in its final state: the winner is the only active
/// candidate, and tied candidates are the ones at the minimum.
pub fn run_election<O: TallyObserver + ?Sized>(
    tally: &mut Tally,
    observer: &mut O,
) -> ElectionResult {
    info!(
        "run_election: {} candidates, {} ballots ({} invalid)",
        tally.candidate_count(),
        tally.total_ballots(),
        tally.invalid_count()
    );
    // Every round past the first one drops at least one candidate.
    let max_rounds = tally.candidate_count() as u32 + 1;

    let mut round_stats: Vec<RoundStats> = Vec::new();
    let mut condition = tally.condition();
    let mut round: u32 = 0;
    while condition == TallyCondition::Continue {
        if round >= max_rounds {
            warn!(
                "run_election: no convergence after {} rounds, stopping",
                round
            );
            return ElectionResult {
                outcome: Outcome::Error,
                rounds: round,
                round_stats,
            };
        }
        round += 1;
        observer.round_started(round);

        let eliminated = tally.drop_minvote_candidates(observer);
        let mut stats = RoundStats {
            round,
            standings: tally.standings(),
            invalid: tally.invalid_count(),
            eliminated,
            at_minimum: Vec::new(),
            min_votes: None,
        };
        observer.round_finished(tally, &stats);

        if let Some((count, at_min)) = tally.set_minvote_candidates() {
            observer.min_votes_found(tally, count, &at_min);
            stats.min_votes = Some(count);
            stats.at_minimum = at_min;
        }
        info!(
            "Round {}: {} valid votes, {} invalid, at minimum: {:?}",
            round,
            tally.valid_votes(),
            stats.invalid,
            stats.at_minimum
        );
        debug_assert_eq!(
            tally.valid_votes() + tally.invalid_count(),
            tally.total_ballots()
        );
        round_stats.push(stats);
        condition = tally.condition();
        debug!("run_election: round {} condition {:?}", round, condition);
    }

    let outcome = match condition {
        TallyCondition::Winner => match tally.winner() {
            Some(cid) => Outcome::Winner(cid),
            None => Outcome::Error,
        },
        TallyCondition::Tie => {
            Outcome::Tie(tally.with_status(CandidateStatus::AtMinimum).collect())
        }
        _ => Outcome::Error,
    };
    info!("run_election: outcome {:?} after {} rounds", outcome, round);
    ElectionResult {
        outcome,
        rounds: round,
        round_stats,
    }
}
