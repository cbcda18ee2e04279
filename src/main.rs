mod args;
mod rcv;

use clap::Parser;
use irv_engine::Outcome;
use log::debug;
use std::process::ExitCode;

use crate::args::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();
    debug!("args: {:?}", args);

    match rcv::run(&args) {
        Ok(Outcome::Error) => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            rcv::print_error(&e);
            ExitCode::from(1)
        }
    }
}
