//! Descriptor-overlap similarity ranking.
//!
//! Scores candidate albums against a reference album by how many distinct
//! descriptors they share, and ranks them most-similar first.

use crate::catalog::Album;
use crate::recommend::VisitedSet;
use std::collections::HashSet;

/// A candidate album together with its overlap score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredAlbum<'a> {
    pub album: &'a Album,
    pub score: usize,
}

fn descriptor_set(album: &Album) -> HashSet<&str> {
    album.descriptors.iter().map(String::as_str).collect()
}

/// Distinct descriptors of `candidate` found in `reference`.
///
/// Descriptor lists are short, so repeats are skipped by scanning the
/// prefix instead of building a set per candidate.
fn overlap_with(reference: &HashSet<&str>, candidate: &Album) -> usize {
    let descriptors = &candidate.descriptors;
    descriptors
        .iter()
        .enumerate()
        .filter(|&(i, descriptor)| {
            reference.contains(descriptor.as_str()) && !descriptors[..i].contains(descriptor)
        })
        .count()
}

/// Number of distinct descriptors two albums share.
///
/// Repeated descriptors within one album count once.
///
/// # Examples
///
/// ```
/// use albumtree::algorithm::descriptor_overlap;
/// use albumtree::catalog::Album;
///
/// let album = |descriptors: &[&str]| Album {
///     name: "n".to_string(),
///     artist: "a".to_string(),
///     genres: vec!["Rock".to_string()],
///     rank: 1,
///     release: "2000-01-01".to_string(),
///     descriptors: descriptors.iter().map(|d| d.to_string()).collect(),
/// };
///
/// assert_eq!(descriptor_overlap(&album(&["dark", "dark", "cold"]), &album(&["dark", "warm"])), 1);
/// ```
#[must_use]
pub fn descriptor_overlap(reference: &Album, candidate: &Album) -> usize {
    overlap_with(&descriptor_set(reference), candidate)
}

/// Rank `pool` against `reference`, keeping scores.
///
/// The reference itself and every album in `excluded` are skipped. The sort
/// is stable, so equal scores keep pool order; since the pool is ordered by
/// popularity, the more popular album wins a tie. At most `limit` entries are
/// returned and zero-score candidates fill in when better ones run out.
#[must_use]
pub fn rank_candidates_scored<'a>(
    reference: &Album,
    pool: &'a [Album],
    limit: usize,
    excluded: &VisitedSet,
) -> Vec<ScoredAlbum<'a>> {
    if limit == 0 {
        return Vec::new();
    }

    let reference_descriptors = descriptor_set(reference);
    let mut scored: Vec<ScoredAlbum<'a>> = pool
        .iter()
        .filter(|candidate| !candidate.same_identity(reference) && !excluded.contains(candidate))
        .map(|candidate| ScoredAlbum {
            album: candidate,
            score: overlap_with(&reference_descriptors, candidate),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);

    log::trace!(
        "Ranked {} candidates for '{}' (limit {limit}, {} excluded)",
        scored.len(),
        reference.label(),
        excluded.len()
    );
    scored
}

/// Rank `pool` against `reference` by descriptor overlap.
///
/// See [`rank_candidates_scored`] for the ordering and exclusion rules.
/// `excluded` is only read.
#[must_use]
pub fn rank_candidates<'a>(
    reference: &Album,
    pool: &'a [Album],
    limit: usize,
    excluded: &VisitedSet,
) -> Vec<&'a Album> {
    rank_candidates_scored(reference, pool, limit, excluded)
        .into_iter()
        .map(|scored| scored.album)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::album;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn names(albums: &[&Album]) -> Vec<String> {
        albums.iter().map(|a| a.name.clone()).collect()
    }

    /// Accumulate score tiers from the highest down until `limit` is reached
    fn rank_tier_by_tier<'a>(
        reference: &Album,
        pool: &'a [Album],
        limit: usize,
        excluded: &VisitedSet,
    ) -> Vec<&'a Album> {
        let candidates: Vec<(&Album, usize)> = pool
            .iter()
            .filter(|c| !c.same_identity(reference) && !excluded.contains(c))
            .map(|c| (c, descriptor_overlap(reference, c)))
            .collect();
        let max = candidates.iter().map(|(_, s)| *s).max().unwrap_or(0);

        let mut out = Vec::new();
        for tier in (0..=max).rev() {
            for (candidate, score) in &candidates {
                if out.len() == limit {
                    return out;
                }
                if *score == tier {
                    out.push(*candidate);
                }
            }
        }
        out
    }

    #[test]
    fn test_duplicate_descriptors_do_not_inflate() {
        let reference = album("R", 1, &["dark", "cold"]);
        let candidate = album("C", 2, &["dark", "dark", "dark"]);
        assert_eq!(descriptor_overlap(&reference, &candidate), 1);
    }

    #[test]
    fn test_overlap_matches_set_intersection_with_repeats() {
        let vocabulary = ["a", "b", "c", "d", "e"];
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let mut pick = || -> Vec<&str> {
                (0..rng.gen_range(1..8)).map(|_| vocabulary[rng.gen_range(0..vocabulary.len())]).collect()
            };
            let reference = album("R", 1, &pick());
            let candidate = album("C", 2, &pick());

            let expected = descriptor_set(&reference)
                .intersection(&descriptor_set(&candidate))
                .count();
            assert_eq!(descriptor_overlap(&reference, &candidate), expected);
        }
    }

    #[test]
    fn test_ranking_orders_by_score_then_pool_order() {
        let pool = vec![
            album("R", 1, &["a", "b", "c"]),
            album("One", 2, &["a"]),
            album("Three", 3, &["a", "b", "c"]),
            album("Zero", 4, &["z"]),
            album("OneToo", 5, &["c"]),
            album("Two", 6, &["b", "c"]),
        ];
        let ranked = rank_candidates(&pool[0], &pool, 10, &VisitedSet::new());
        assert_eq!(names(&ranked), ["Three", "Two", "One", "OneToo", "Zero"]);
    }

    #[test]
    fn test_ranking_excludes_reference_and_visited() {
        let pool = vec![
            album("R", 1, &["a"]),
            album("Seen", 2, &["a"]),
            album("Fresh", 3, &["a"]),
        ];
        let mut excluded = VisitedSet::new();
        excluded.insert(&pool[1]);

        let ranked = rank_candidates(&pool[0], &pool, 5, &excluded);
        assert_eq!(names(&ranked), ["Fresh"]);
        assert_eq!(excluded.len(), 1, "ranking must not touch the excluded set");
    }

    #[test]
    fn test_reference_outside_pool_is_still_excluded_by_identity() {
        let pool = vec![album("R", 1, &["a"]), album("S", 2, &["a"])];
        let reference = album("R", 99, &["a", "b"]);
        let ranked = rank_candidates(&reference, &pool, 5, &VisitedSet::new());
        assert_eq!(names(&ranked), ["S"]);
    }

    #[test]
    fn test_zero_limit_and_zero_score_fill() {
        let pool = vec![album("R", 1, &["a"]), album("X", 2, &["x"]), album("Y", 3, &["y"])];
        assert!(rank_candidates(&pool[0], &pool, 0, &VisitedSet::new()).is_empty());

        let ranked = rank_candidates_scored(&pool[0], &pool, 2, &VisitedSet::new());
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|s| s.score == 0));
        assert_eq!(ranked[0].album.name, "X");
    }

    #[test]
    fn test_truncation_cuts_mid_tier() {
        let pool = vec![
            album("R", 1, &["a"]),
            album("A1", 2, &["a"]),
            album("A2", 3, &["a"]),
            album("A3", 4, &["a"]),
        ];
        let ranked = rank_candidates(&pool[0], &pool, 2, &VisitedSet::new());
        assert_eq!(names(&ranked), ["A1", "A2"]);
    }

    #[test]
    fn test_stable_sort_matches_tier_accumulation() {
        let vocabulary = ["dark", "warm", "cold", "lush", "raw", "epic", "sad", "calm"];
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for round in 0..50 {
            let pool: Vec<Album> = (0..40)
                .map(|i| {
                    let count = rng.gen_range(1..=4);
                    let descriptors: Vec<&str> =
                        (0..count).map(|_| vocabulary[rng.gen_range(0..vocabulary.len())]).collect();
                    album(&format!("Album{round}-{i}"), i + 1, &descriptors)
                })
                .collect();

            let mut excluded = VisitedSet::new();
            for candidate in pool.iter().filter(|_| rng.gen_bool(0.2)) {
                excluded.insert(candidate);
            }

            let reference = &pool[rng.gen_range(0..pool.len())];
            let limit = rng.gen_range(0..12);

            let ranked = rank_candidates_scored(reference, &pool, limit, &excluded);
            let expected = rank_tier_by_tier(reference, &pool, limit, &excluded);
            assert_eq!(
                ranked.iter().map(|s| s.album).collect::<Vec<_>>(),
                expected,
                "round {round}"
            );
            assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
            assert!(ranked.iter().all(|s| !excluded.contains(s.album) && !s.album.same_identity(reference)));
        }
    }
}
