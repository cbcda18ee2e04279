// Console output of an election: round tables, audit log lines and the outcome.

use std::io;

use crate::rcv::*;

/// How much audit information is printed. Each level includes the ones below.
#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Quiet,
    /// Progress of reading the votes file.
    FileIo,
    /// Minimum counts and dropped candidates.
    MinVote,
    /// The ballots held by each candidate after each round.
    ShowVotes,
    /// Every single transfer.
    VoteTransfers,
}

impl LogLevel {
    pub fn from_level(level: u8) -> LogLevel {
        match level {
            0 => LogLevel::Quiet,
            1 => LogLevel::FileIo,
            2 => LogLevel::MinVote,
            3 => LogLevel::ShowVotes,
            _ => LogLevel::VoteTransfers,
        }
    }
}

/// Prints the progress of an election to a writer.
///
/// Write errors do not interrupt the count: the first one is kept and
/// returned by [`ConsoleReporter::check`].
pub struct ConsoleReporter<W: Write> {
    level: LogLevel,
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(level: LogLevel, out: W) -> ConsoleReporter<W> {
        ConsoleReporter {
            level,
            out,
            error: None,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Returns the first write error, if any happened.
    pub fn check(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => self.out.flush(),
        }
    }

    fn line(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("ConsoleReporter: write failed: {}", e);
            self.error = Some(e);
        }
    }

    fn line_at(&mut self, level: LogLevel, text: &str) {
        if self.level >= level {
            self.line(text);
        }
    }

    pub fn log_file(&mut self, text: &str) {
        self.line_at(LogLevel::FileIo, text);
    }

    pub fn print_table(&mut self, standings: &[CandidateStanding], invalid: u64) {
        self.line("NUM COUNT %PERC S NAME");
        for s in standings.iter() {
            let row = match (s.votes, s.percent) {
                (Some(count), Some(percent)) => format!(
                    "{:3} {:5}  {:.1} {} {}",
                    s.id.index(),
                    count,
                    percent,
                    s.status.code(),
                    s.name
                ),
                _ => format!(
                    "{:3} {:>5} {:>5} {} {}",
                    s.id.index(),
                    '-',
                    '-',
                    s.status.code(),
                    s.name
                ),
            };
            self.line(&row);
        }
        if invalid > 0 {
            self.line(&format!("INVALID: {}", invalid));
        }
    }

    pub fn print_votes(&mut self, tally: &Tally) {
        for cid in tally.candidates() {
            self.line(&format!(
                "VOTES FOR CANDIDATE {}: {}",
                cid,
                tally.name(cid).unwrap_or_default()
            ));
            let held: Vec<String> = tally.votes_for(cid).map(|b| format!("  {}", b)).collect();
            for b in held.iter() {
                self.line(b);
            }
            self.line(&format!("{} votes total", tally.vote_count(cid)));
        }
    }

    pub fn print_outcome(&mut self, tally: &Tally, outcome: &Outcome) {
        match outcome {
            Outcome::Winner(cid) => self.line(&format!(
                "Winner: {} (candidate {})",
                tally.name(*cid).unwrap_or_default(),
                cid
            )),
            Outcome::Tie(cids) => {
                self.line("Multiway Tie Between:");
                for cid in cids.iter() {
                    self.line(&format!(
                        "{} (candidate {})",
                        tally.name(*cid).unwrap_or_default(),
                        cid
                    ));
                }
            }
            Outcome::Error => self.line("ERROR: tally ended in an inconsistent state"),
        }
    }
}

impl<W: Write> TallyObserver for ConsoleReporter<W> {
    fn round_started(&mut self, round: u32) {
        self.line(&format!("=== ROUND {} ===", round));
    }

    fn min_votes_found(&mut self, tally: &Tally, count: u64, candidates: &[CandidateId]) {
        self.line_at(LogLevel::MinVote, &format!("LOG: MIN VOTE count is {}", count));
        for cid in candidates.iter() {
            self.line_at(
                LogLevel::MinVote,
                &format!(
                    "LOG: MIN VOTE COUNT for candidate {}: {}",
                    cid,
                    tally.name(*cid).unwrap_or_default()
                ),
            );
        }
    }

    fn vote_transferred(
        &mut self,
        tally: &Tally,
        ballot: &Ballot,
        from: CandidateId,
        to: Option<CandidateId>,
    ) {
        if self.level < LogLevel::VoteTransfers {
            return;
        }
        let dest = match to {
            Some(cid) => format!("{} {}", cid, tally.name(cid).unwrap_or_default()),
            None => "INVALID".to_string(),
        };
        self.line(&format!(
            "LOG: Transferred Vote {} from {} {} to {}",
            ballot,
            from,
            tally.name(from).unwrap_or_default(),
            dest
        ));
    }

    fn candidate_dropped(&mut self, tally: &Tally, candidate: CandidateId) {
        self.line_at(
            LogLevel::MinVote,
            &format!(
                "LOG: Dropped Candidate {}: {}",
                candidate,
                tally.name(candidate).unwrap_or_default()
            ),
        );
    }

    fn round_finished(&mut self, tally: &Tally, stats: &RoundStats) {
        self.print_table(&stats.standings, stats.invalid);
        if self.level >= LogLevel::ShowVotes {
            self.print_votes(tally);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(names: &[&str], votes: &[&[i64]]) -> Tally {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        let mut builder = Builder::new().candidates(&names).unwrap();
        for v in votes {
            builder.add_vote(v).unwrap();
        }
        builder.build().unwrap()
    }

    fn output(reporter: ConsoleReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn levels_are_cumulative() {
        assert_eq!(LogLevel::from_level(0), LogLevel::Quiet);
        assert_eq!(LogLevel::from_level(3), LogLevel::ShowVotes);
        assert_eq!(LogLevel::from_level(9), LogLevel::VoteTransfers);
        assert!(LogLevel::VoteTransfers > LogLevel::ShowVotes);
        assert!(LogLevel::MinVote > LogLevel::FileIo);
    }

    #[test]
    fn table_layout() {
        let mut t = tally(&["Alice", "Bob", "Chris"], &[&[0], &[0], &[0], &[1], &[-1]]);
        t.set_minvote_candidates();
        t.drop_minvote_candidates(&mut ());
        let mut r = ConsoleReporter::new(LogLevel::Quiet, Vec::new());
        r.print_table(&t.standings(), t.invalid_count());
        assert_eq!(
            output(r),
            "NUM COUNT %PERC S NAME\n  \
             0     3  75.0 A Alice\n  \
             1     1  25.0 A Bob\n  \
             2     -     - D Chris\n\
             INVALID: 1\n"
        );
    }

    #[test]
    fn quiet_election_output() {
        let mut t = tally(&["a", "b", "c"], &[&[0, 1], &[0, 2], &[1, 0], &[2, 0], &[2, 1]]);
        let mut r = ConsoleReporter::new(LogLevel::Quiet, Vec::new());
        let res = run_election(&mut t, &mut r);
        r.print_outcome(&t, &res.outcome);
        r.check().unwrap();
        assert_eq!(
            output(r),
            "=== ROUND 1 ===\n\
             NUM COUNT %PERC S NAME\n  \
             0     2  40.0 A a\n  \
             1     1  20.0 A b\n  \
             2     2  40.0 A c\n\
             === ROUND 2 ===\n\
             NUM COUNT %PERC S NAME\n  \
             0     3  60.0 A a\n  \
             1     -     - D b\n  \
             2     2  40.0 A c\n\
             Winner: a (candidate 0)\n"
        );
    }

    #[test]
    fn audit_lines_at_highest_level() {
        let mut t = tally(&["a", "b", "c"], &[&[0, 1], &[0, 2], &[1, 0], &[2, 0], &[2, 1]]);
        let mut r = ConsoleReporter::new(LogLevel::VoteTransfers, Vec::new());
        run_election(&mut t, &mut r);
        let out = output(r);
        assert!(out.contains("LOG: MIN VOTE count is 1\nLOG: MIN VOTE COUNT for candidate 1: b\n"));
        assert!(out.contains("LOG: Transferred Vote #0003: 1 <0> from 1 b to 0 a\n"));
        assert!(out.contains("LOG: Dropped Candidate 1: b\n"));
        assert!(out.contains("VOTES FOR CANDIDATE 0: a\n  #0003: 1 <0>\n  #0002:<0> 2 \n  #0001:<0> 1 \n3 votes total\n"));
    }

    #[test]
    fn exhausted_transfer_line() {
        let mut t = tally(&["a", "b", "c"], &[&[0], &[0], &[1], &[1], &[2]]);
        let mut r = ConsoleReporter::new(LogLevel::VoteTransfers, Vec::new());
        run_election(&mut t, &mut r);
        assert!(output(r).contains("LOG: Transferred Vote #0005: 2  from 2 c to INVALID\n"));
    }

    #[test]
    fn minvote_level_hides_transfers() {
        let mut t = tally(&["a", "b", "c"], &[&[0, 1], &[0, 2], &[1, 0], &[2, 0], &[2, 1]]);
        let mut r = ConsoleReporter::new(LogLevel::MinVote, Vec::new());
        run_election(&mut t, &mut r);
        let out = output(r);
        assert!(out.contains("LOG: Dropped Candidate 1: b\n"));
        assert!(!out.contains("Transferred"));
        assert!(!out.contains("VOTES FOR CANDIDATE"));
    }

    #[test]
    fn tie_outcome() {
        let t = tally(&["a", "b"], &[]);
        let mut r = ConsoleReporter::new(LogLevel::Quiet, Vec::new());
        r.print_outcome(&t, &Outcome::Tie(vec![CandidateId(0), CandidateId(1)]));
        r.print_outcome(&t, &Outcome::Error);
        assert_eq!(
            output(r),
            "Multiway Tie Between:\na (candidate 0)\nb (candidate 1)\n\
             ERROR: tally ended in an inconsistent state\n"
        );
    }
}
