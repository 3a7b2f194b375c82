//! Scheme matching and ranking
//!
//! Two stages: a hard filter predicate decides candidacy, then an
//! additive score rewards specificity over sentinel matches. Ranking is
//! a stable sort by descending score, so catalog order is the tie-break.

use std::cmp::Reverse;

use saarthi_core::{MatchResult, Scheme, UserProfile, GENDER_ALL, STATE_NATIONAL};

use crate::SchemeCatalog;

/// Maximum number of schemes returned by a match.
pub const TOP_N: usize = 3;

/// Match a profile against the catalog, returning the ordered top
/// [`TOP_N`] relevant schemes.
///
/// Pure: identical inputs always yield the identical ordered list.
/// An empty result is a valid "no relevant schemes" outcome, not an
/// error.
pub fn match_schemes<'a>(profile: &UserProfile, catalog: &'a SchemeCatalog) -> Vec<&'a Scheme> {
    let mut candidates: Vec<MatchResult<'a>> = catalog
        .all()
        .iter()
        .filter(|scheme| is_candidate(profile, scheme))
        .map(|scheme| MatchResult {
            scheme,
            score: score_scheme(profile, scheme),
        })
        .collect();

    // Stable sort: equal scores keep catalog order.
    candidates.sort_by_key(|m| Reverse(m.score));

    candidates
        .into_iter()
        .take(TOP_N)
        .map(|m| m.scheme)
        .collect()
}

/// The hard filter predicate.
///
/// All three must hold:
/// - gender is the "All" sentinel or exactly the profile's gender
/// - state is the "National" sentinel or exactly the profile's state
/// - sector contains the profile's sector as a case-insensitive
///   substring (deliberately permissive, so multi-sector tags like
///   "Housing, Urban Development" match a single requested sector)
fn is_candidate(profile: &UserProfile, scheme: &Scheme) -> bool {
    let gender_match = scheme.gender == GENDER_ALL || scheme.gender == profile.gender.as_str();
    let state_match = scheme.state == STATE_NATIONAL || scheme.state == profile.state;
    let sector_match = scheme
        .sector
        .to_lowercase()
        .contains(&profile.sector.to_lowercase());

    gender_match && state_match && sector_match
}

/// Compute the relevance score for a candidate.
///
/// Additive across three independent criteria, each rewarding
/// specificity over genericness:
/// - state: exact +2, "National" +1
/// - gender: exact +2, "All" +1
/// - sector: exactly equal +3 (substring-only candidacy scores 0 here)
///
/// Maximum 7; a post-filter candidate scores at least 2.
pub fn score_scheme(profile: &UserProfile, scheme: &Scheme) -> u32 {
    let mut score = 0;

    if scheme.state == profile.state {
        score += 2;
    } else if scheme.state == STATE_NATIONAL {
        score += 1;
    }

    if scheme.gender == profile.gender.as_str() {
        score += 2;
    } else if scheme.gender == GENDER_ALL {
        score += 1;
    }

    if scheme.sector == profile.sector {
        score += 3;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use saarthi_core::Gender;

    fn scheme(id: &str, state: &str, gender: &str, sector: &str) -> Scheme {
        Scheme {
            id: id.to_string(),
            title: format!("Scheme {}", id),
            description: "desc".to_string(),
            eligibility: "elig".to_string(),
            benefits: "benefits".to_string(),
            state: state.to_string(),
            sector: sector.to_string(),
            gender: gender.to_string(),
            url: "https://example.gov.in".to_string(),
        }
    }

    fn profile() -> UserProfile {
        UserProfile::new(30, Gender::Female, "Kerala", "Health")
    }

    fn catalog(schemes: Vec<Scheme>) -> SchemeCatalog {
        SchemeCatalog::from_schemes(schemes).unwrap()
    }

    #[test]
    fn test_exact_match_scores_seven() {
        let s = scheme("a", "Kerala", "Female", "Health");
        assert_eq!(score_scheme(&profile(), &s), 7);
    }

    #[test]
    fn test_sentinel_substring_scores_two() {
        let s = scheme("a", "National", "All", "Health, Education");
        assert!(is_candidate(&profile(), &s));
        assert_eq!(score_scheme(&profile(), &s), 2);
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let cat = catalog(vec![
            scheme("generic", "National", "All", "Health, Education"),
            scheme("exact", "Kerala", "Female", "Health"),
            scheme("partial", "National", "Female", "Health"),
        ]);

        let matches = match_schemes(&profile(), &cat);
        let ids: Vec<&str> = matches.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["exact", "partial", "generic"]);
    }

    #[test]
    fn test_filter_rejects_wrong_gender_and_state() {
        let cat = catalog(vec![
            scheme("men-only", "Kerala", "Male", "Health"),
            scheme("other-state", "Bihar", "All", "Health"),
            scheme("wrong-sector", "Kerala", "All", "Agriculture"),
        ]);

        assert!(match_schemes(&profile(), &cat).is_empty());
    }

    #[test]
    fn test_sector_substring_is_case_insensitive() {
        let cat = catalog(vec![scheme("a", "National", "All", "HEALTH, Sanitation")]);
        assert_eq!(match_schemes(&profile(), &cat).len(), 1);
    }

    #[test]
    fn test_truncates_to_top_three() {
        let cat = catalog(vec![
            scheme("a", "National", "All", "Health"),
            scheme("b", "National", "All", "Health"),
            scheme("c", "National", "All", "Health"),
            scheme("d", "National", "All", "Health"),
        ]);

        let matches = match_schemes(&profile(), &cat);
        assert_eq!(matches.len(), TOP_N);
        // Equal scores: catalog order preserved
        let ids: Vec<&str> = matches.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_fewer_than_three_returns_all() {
        let cat = catalog(vec![scheme("only", "Kerala", "Female", "Health")]);
        assert_eq!(match_schemes(&profile(), &cat).len(), 1);
    }

    #[test]
    fn test_match_is_deterministic() {
        let cat = catalog(vec![
            scheme("a", "National", "All", "Health"),
            scheme("b", "Kerala", "All", "Health"),
            scheme("c", "National", "Female", "Health"),
        ]);

        let first = match_schemes(&profile(), &cat);
        let second = match_schemes(&profile(), &cat);
        let first_ids: Vec<&str> = first.iter().map(|s| s.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }
}
