use clap::Parser;

/// This is a tabulation program for instant-runoff elections.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The votes file: the number of candidates, their names, then one ranking per
    /// ballot. A negative number in a ranking means "no candidate". Overrides the votes file of
    /// the --config option.
    #[clap(value_parser)]
    pub input: Option<String>,

    /// (0 to 4, default 0) Amount of audit information printed while counting:
    /// 1 file reading, 2 minimum counts and dropped candidates, 3 ballots held after each round,
    /// 4 every single transfer. Each level includes the lower ones.
    #[clap(short, long, value_parser)]
    pub log: Option<u8>,

    /// (file path, optional) A JSON file describing the contest and where to find the votes.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in
    /// JSON format to the given location. Overrides the output path of the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the outcome of an election in JSON format. If
    /// provided, rcvtally will check that the tabulated summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
