use log::{debug, info, warn};

use irv_engine::builder::Builder;
use irv_engine::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::rcv::config_reader::*;
use crate::rcv::io_votes::{read_votes, VotesFile};
use crate::rcv::report::{ConsoleReporter, LogLevel};
use crate::rcv::summary::{build_summary_js, write_summary};

pub mod config_reader;
pub mod io_votes;
pub mod report;
pub mod summary;

#[derive(Debug, Snafu)]
pub enum RcvError {
    #[snafu(display("couldn't open file '{path}'"))]
    OpeningVotes {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("file '{path}': expected {expected} at token {position}, found '{token}'"))]
    ParsingVotes {
        path: String,
        position: usize,
        token: String,
        expected: &'static str,
    },
    #[snafu(display("file '{path}': expected {expected} candidate names, found {found}"))]
    MissingCandidates {
        path: String,
        expected: usize,
        found: usize,
    },
    #[snafu(display("invalid candidate list: {source}"))]
    Building { source: VotingErrors },
    #[snafu(display("no votes file given, either as argument or in the configuration"))]
    MissingVotesFile {},
    #[snafu(display("cannot locate the directory of the configuration file"))]
    MissingParentDir {},
    #[snafu(display("couldn't open file '{path}'"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("couldn't parse JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("couldn't write to '{path}': {source}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("couldn't write the report: {source}"))]
    WritingReport { source: std::io::Error },
    #[snafu(display("difference detected between calculated summary and reference summary '{path}'"))]
    ReferenceMismatch { path: String },
}

type RcvResult<T> = Result<T, RcvError>;

/// Prints an error the way the votes loader reports it.
pub fn print_error(e: &RcvError) {
    println!("ERROR: {}", e);
    if matches!(
        e,
        RcvError::OpeningVotes { .. }
            | RcvError::ParsingVotes { .. }
            | RcvError::MissingCandidates { .. }
            | RcvError::Building { .. }
            | RcvError::MissingVotesFile {}
    ) {
        println!("Could not load votes file. Exiting with error code 1");
    }
}

/// Everything needed for one run, after merging the command line and the configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub votes_path: String,
    pub log_level: LogLevel,
    pub out: Option<String>,
    pub reference: Option<String>,
    pub output: OutputConfig,
}

pub fn resolve_settings(args: &Args) -> RcvResult<RunSettings> {
    let config: Option<(RcvConfig, PathBuf)> = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root_p = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            Some((config, root_p))
        }
        None => None,
    };

    let votes_path: String = match (&args.input, &config) {
        (Some(input), _) => input.clone(),
        (None, Some((c, root_p))) => {
            let votes_file = c.votes_file.clone().context(MissingVotesFileSnafu {})?;
            let p: PathBuf = [root_p.clone(), PathBuf::from(votes_file)].iter().collect();
            p.as_path().display().to_string()
        }
        (None, None) => return MissingVotesFileSnafu {}.fail(),
    };

    let config_level = config.as_ref().and_then(|(c, _)| c.log_level);
    let log_level = LogLevel::from_level(args.log.or(config_level).unwrap_or(0));

    let out = args.out.clone().or_else(|| {
        config
            .as_ref()
            .and_then(|(c, _)| c.output_settings.output_path.clone())
    });

    let output = match &config {
        Some((c, _)) => OutputConfig::from_settings(&c.output_settings),
        None => OutputConfig::from_votes_path(&votes_path),
    };

    Ok(RunSettings {
        votes_path,
        log_level,
        out,
        reference: args.reference.clone(),
        output,
    })
}

fn build_tally(votes: &VotesFile) -> RcvResult<Tally> {
    let mut builder = Builder::new()
        .candidates(&votes.candidates)
        .context(BuildingSnafu {})?;
    for v in votes.votes.iter() {
        builder.add_vote(v).context(BuildingSnafu {})?;
    }
    builder.build().context(BuildingSnafu {})
}

/// Reads the votes, runs all the rounds and prints the outcome through the reporter.
///
/// Returns the tally in its final state with the statistics of the rounds.
pub fn tabulate<W: Write>(
    votes_path: &str,
    reporter: &mut ConsoleReporter<W>,
) -> RcvResult<(Tally, ElectionResult)> {
    let votes = read_votes(votes_path, reporter)?;
    debug!(
        "tabulate: {} candidates, {} votes",
        votes.candidates.len(),
        votes.votes.len()
    );
    let mut tally = build_tally(&votes)?;
    let result = run_election(&mut tally, reporter);
    reporter.print_outcome(&tally, &result.outcome);
    reporter.check().context(WritingReportSnafu {})?;
    Ok((tally, result))
}

pub fn run(args: &Args) -> RcvResult<Outcome> {
    let settings = resolve_settings(args)?;
    debug!("run: settings {:?}", settings);

    let mut reporter = ConsoleReporter::new(settings.log_level, std::io::stdout());
    let (tally, result) = tabulate(&settings.votes_path, &mut reporter)?;
    if result.outcome == Outcome::Error {
        warn!("run: the election ended without winner nor tie");
    }

    if settings.out.is_none() && settings.reference.is_none() {
        return Ok(result.outcome);
    }

    let summary_js = build_summary_js(&settings.output, &tally, &result);
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;

    if let Some(out) = &settings.out {
        write_summary(&pretty_js_stats, out)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &settings.reference {
        check_reference(&pretty_js_stats, summary_p)?;
    }
    Ok(result.outcome)
}

fn check_reference(pretty_js_stats: &str, summary_p: &str) -> RcvResult<()> {
    let summary_ref: JSValue = read_summary(summary_p)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu { path: summary_p }.fail();
    }
    info!("check_reference: summary matches {}", summary_p);
    Ok(())
}
