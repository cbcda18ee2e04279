/*!
Round-by-round tally engine for instant-runoff (ranked choice) elections.

Ballots live in an arena owned by a [`Tally`]. Each candidate holds a stack of
ballots, and exhausted ballots go to an invalid pool. Each round drops every
candidate tied at the minimum count and moves its ballots to their next
active choice. The election stops with a single winner, a tie between the
last candidates, or an error if the statuses get inconsistent.

```
use irv_engine::builder::Builder;
use irv_engine::*;

let names: Vec<String> = ["Alice", "Bob", "Charlie"].iter().map(|s| s.to_string()).collect();
let mut builder = Builder::new().candidates(&names)?;
builder.add_vote(&[0, 1, 2])?;
builder.add_vote(&[0, 2, 1])?;
builder.add_vote(&[1, 0, 2])?;
builder.add_vote(&[2, 1, 0])?;
builder.add_vote(&[2, 0, -1])?;
let mut tally = builder.build()?;

let result = run_election(&mut tally, &mut ());
assert_eq!(result.outcome, Outcome::Winner(CandidateId(0)));
# Ok::<(), VotingErrors>(())
```
*/

mod ballot;
pub mod builder;
mod config;
mod election;
mod observer;
mod tally;

pub use crate::ballot::Ballot;
pub use crate::config::*;
pub use crate::election::run_election;
pub use crate::observer::{TallyEvent, TallyObserver};
pub use crate::tally::{Tally, Transfer};

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

#[cfg(test)]
mod properties;
