use ahash::HashSet;

use crate::model::CandidatePair;

/// Select a set of non-overlapping pairings, highest scores first.
///
/// This is a greedy approximation of maximum-weight bipartite matching: it is
/// deterministic and cheap, but not guaranteed to find the optimal total.
/// Candidates with equal scores keep their input order.
pub fn solve<'p>(mut candidates: Vec<CandidatePair<'p>>) -> Vec<CandidatePair<'p>> {
  candidates.sort_by(|lhs, rhs| rhs.score.total_cmp(&lhs.score));

  let mut taken_targets = HashSet::default();
  let mut taken_references = HashSet::default();

  candidates
    .into_iter()
    .filter(|candidate| {
      if taken_targets.contains(&candidate.target.slot) || taken_references.contains(&candidate.reference.slot) {
        return false;
      }

      taken_targets.insert(candidate.target.slot);
      taken_references.insert(candidate.reference.slot);

      true
    })
    .collect()
}
