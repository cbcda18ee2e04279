// JSON summary of an election, in the layout used by the RCVis visualizer.

use serde_json::json;
use serde_json::Map as JSMap;

use crate::rcv::*;

fn candidate_name(tally: &Tally, cid: CandidateId) -> String {
    tally.name(cid).unwrap_or_default().to_string()
}

fn elimination_to_json(elim_stats: &EliminationStats) -> JSValue {
    let mut transfers: JSMap<String, JSValue> = JSMap::new();
    for (_, name, count) in elim_stats.transfers.iter() {
        transfers.insert(name.clone(), json!(count.to_string()));
    }
    if elim_stats.exhausted > 0 {
        transfers.insert(
            "exhausted".to_string(),
            json!(elim_stats.exhausted.to_string()),
        );
    }
    json!({
        "eliminated": elim_stats.name,
        "transfers": transfers
    })
}

// The candidates dropped at the start of a round are reported with the tally of
// the round before, which is the one that put them at the minimum.
fn result_stats_to_json(tally: &Tally, rs: &ElectionResult) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    let num_rounds = rs.round_stats.len();
    for (idx, round_stat) in rs.round_stats.iter().enumerate() {
        let mut round_tally: JSMap<String, JSValue> = JSMap::new();
        for standing in round_stat.standings.iter() {
            if let Some(count) = standing.votes {
                round_tally.insert(standing.name.clone(), json!(count.to_string()));
            }
        }

        let mut tally_results: Vec<JSValue> = Vec::new();
        if let Some(next_round) = rs.round_stats.get(idx + 1) {
            for elim_stats in next_round.eliminated.iter() {
                tally_results.push(elimination_to_json(elim_stats));
            }
        }
        if idx + 1 == num_rounds {
            if let Outcome::Winner(cid) = rs.outcome {
                tally_results.push(json!({
                    "elected": candidate_name(tally, cid),
                    "transfers": {}
                }));
            }
        }

        l.push(json!({
            "round": round_stat.round,
            "tally": round_tally,
            "invalid": round_stat.invalid.to_string(),
            "tallyResults": tally_results
        }));
    }
    l
}

fn outcome_to_json(tally: &Tally, outcome: &Outcome) -> JSValue {
    match outcome {
        Outcome::Winner(cid) => json!({ "winner": candidate_name(tally, *cid) }),
        Outcome::Tie(cids) => {
            let names: Vec<String> = cids.iter().map(|cid| candidate_name(tally, *cid)).collect();
            json!({ "tie": names })
        }
        Outcome::Error => json!({ "error": "inconsistent tally" }),
    }
}

pub fn build_summary_js(config: &OutputConfig, tally: &Tally, rv: &ElectionResult) -> JSValue {
    json!({
        "config": config,
        "outcome": outcome_to_json(tally, &rv.outcome),
        "results": result_stats_to_json(tally, rv)
    })
}

/// Writes a summary to a file, or to the standard output for `stdout` or an empty path.
pub fn write_summary(pretty_js_stats: &str, out: &str) -> RcvResult<()> {
    if out.is_empty() || out == "stdout" {
        println!("{}", pretty_js_stats);
        return Ok(());
    }
    info!("write_summary: writing summary to {}", out);
    fs::write(out, pretty_js_stats).context(WritingSummarySnafu { path: out })
}
