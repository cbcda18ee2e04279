// Reader for plain-text votes files.
//
// 4
// Francis Claire Rico Nina
// 0 2 1 3
// 3 -1 -1 -1
// ...

use crate::rcv::*;

/// The content of a votes file, before it is turned into a tally.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VotesFile {
    pub candidates: Vec<String>,
    /// One ranking per ballot, as written. Negative entries mean "no candidate".
    pub votes: Vec<Vec<i64>>,
}

/// Reads a votes file, logging each step at the file-reading log level.
pub fn read_votes<W: Write>(path: &str, reporter: &mut ConsoleReporter<W>) -> RcvResult<VotesFile> {
    let contents = fs::read_to_string(path).context(OpeningVotesSnafu { path })?;
    reporter.log_file(&format!("LOG: File '{}' opened", path));
    let votes = parse_votes(&contents, path)?;

    reporter.log_file(&format!(
        "LOG: File '{}' has {} candidates",
        path,
        votes.candidates.len()
    ));
    for (idx, name) in votes.candidates.iter().enumerate() {
        reporter.log_file(&format!("LOG: File '{}' candidate {} is {}", path, idx, name));
    }
    if reporter.level() >= LogLevel::FileIo {
        // Same numbering as the tally will use.
        for (idx, v) in votes.votes.iter().enumerate() {
            let ranking: Vec<CandidateId> = v
                .iter()
                .take_while(|c| **c >= 0)
                .map(|c| CandidateId(*c as usize))
                .collect();
            let ballot = Ballot::new((idx + 1) as u32, ranking);
            reporter.log_file(&format!("LOG: File '{}' vote {}", path, ballot));
        }
    }
    reporter.log_file(&format!("LOG: File '{}' end of file reached", path));
    Ok(votes)
}

/// Parses the content of a votes file.
///
/// The tokens are separated by any whitespace. After the candidate count and
/// the names, every group of `count` numbers is a ballot; the last group may
/// be shorter.
pub fn parse_votes(contents: &str, path: &str) -> RcvResult<VotesFile> {
    let mut tokens = contents.split_whitespace().enumerate();

    let num_candidates: usize = match tokens.next() {
        Some((_, tok)) => tok.parse::<usize>().ok().context(ParsingVotesSnafu {
            path,
            position: 1_usize,
            token: tok,
            expected: "the number of candidates",
        })?,
        None => {
            return ParsingVotesSnafu {
                path,
                position: 1_usize,
                token: "",
                expected: "the number of candidates",
            }
            .fail()
        }
    };

    let candidates: Vec<String> = tokens
        .by_ref()
        .take(num_candidates)
        .map(|(_, name)| name.to_string())
        .collect();
    ensure!(
        candidates.len() == num_candidates,
        MissingCandidatesSnafu {
            path,
            expected: num_candidates,
            found: candidates.len(),
        }
    );

    let mut numbers: Vec<i64> = Vec::new();
    for (idx, tok) in tokens {
        let choice = tok.parse::<i64>().ok().context(ParsingVotesSnafu {
            path,
            position: idx + 1,
            token: tok,
            expected: "a candidate number",
        })?;
        numbers.push(choice);
    }
    let votes: Vec<Vec<i64>> = numbers
        .chunks(num_candidates.max(1))
        .map(|c| c.to_vec())
        .collect();
    debug!(
        "parse_votes: {}: {} candidates, {} votes",
        path,
        candidates.len(),
        votes.len()
    );
    Ok(VotesFile { candidates, votes })
}
