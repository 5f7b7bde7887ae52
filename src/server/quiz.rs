use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::db::Question;

/// Picks a question uniformly at random from `pool`, skipping ids in `previous`.
/// Returns `None` once every candidate has been asked.
pub fn pick_question<R>(pool: Vec<Question>, previous: &[i64], rng: &mut R) -> Option<Question>
where
    R: Rng + ?Sized,
{
    let previous: HashSet<i64> = previous.iter().copied().collect();
    pool.into_iter()
        .filter(|q| !previous.contains(&q.id))
        .choose(rng)
}
