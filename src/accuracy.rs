//! The accuracy reducer (spec §4.8), the coefficient sweep (spec §4.7) that
//! drives the whole engine, and the `split_matches` rendering helper.

use crate::cache::Caches;
use crate::distance::{Distance, EditOp, Match};
use crate::penalty::coefficient_grid;
use crate::picker::match_with;

/// Character accuracy for one aggregated `Distance`: `1 - errors/chars`,
/// with the degenerate cases from spec §4.8 (comparing two empty documents
/// is a perfect match; a GT-less document scores `-errors`).
pub fn character_accuracy(dist: &Distance) -> f64 {
    let errors = dist.replace + dist.delete + dist.insert;
    let chars = dist.r#match + dist.replace + dist.delete;
    if chars == 0 && errors == 0 {
        1.0
    } else if chars == 0 {
        -(errors as f64)
    } else {
        1.0 - errors as f64 / chars as f64
    }
}

/// Character accuracy of a full document represented by its list of
/// matches: sums every match's `Distance` field-by-field, then reduces.
pub fn character_accuracy_for_matches(matches: &[Match]) -> f64 {
    let aggregate = matches.iter().fold(Distance::default(), |acc, m| acc.sum(&m.dist));
    character_accuracy(&aggregate)
}

/// Computes the flexible character accuracy of `ocr` against `gt`: the
/// argmax over the fixed 768-point coefficient grid of the picker's score,
/// with early exit on a perfect score.
///
/// With the `parallel-sweep` feature (on by default), the grid is
/// partitioned across a rayon thread pool, each worker owning its own
/// memoization caches.
pub fn flexible_character_accuracy(gt: &str, ocr: &str) -> (f64, Vec<Match>) {
    #[cfg(feature = "parallel-sweep")]
    {
        flexible_character_accuracy_parallel(gt, ocr)
    }
    #[cfg(not(feature = "parallel-sweep"))]
    {
        flexible_character_accuracy_sequential(gt, ocr)
    }
}

#[allow(dead_code)]
fn flexible_character_accuracy_sequential(gt: &str, ocr: &str) -> (f64, Vec<Match>) {
    let mut best_score = f64::NEG_INFINITY;
    let mut best_matches = Vec::new();
    let mut caches = Caches::default();

    for coef in coefficient_grid() {
        let matches = match_with(gt, ocr, &coef, &mut caches);
        let score = character_accuracy_for_matches(&matches);
        if score > best_score {
            best_score = score;
            best_matches = matches;
        }
        if best_score >= 1.0 {
            break;
        }
    }
    (best_score, best_matches)
}

#[cfg(feature = "parallel-sweep")]
fn flexible_character_accuracy_parallel(gt: &str, ocr: &str) -> (f64, Vec<Match>) {
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    let grid: Vec<_> = coefficient_grid().collect();
    let done = AtomicBool::new(false);

    grid.par_iter()
        .filter_map(|coef| {
            if done.load(Ordering::Relaxed) {
                return None;
            }
            let mut caches = Caches::default();
            let matches = match_with(gt, ocr, coef, &mut caches);
            let score = character_accuracy_for_matches(&matches);
            if score >= 1.0 {
                done.store(true, Ordering::Relaxed);
            }
            Some((score, matches))
        })
        .reduce(
            || (f64::NEG_INFINITY, Vec::new()),
            |a, b| if b.0 > a.0 { b } else { a },
        )
}

/// Sorts `matches` by `(gt.line, gt.start/10000)` and interleaves `linesep`
/// tokens between distinct GT line indices, yielding parallel GT/OCR
/// segment lists plus the raw edit ops per segment (for downstream
/// rendering; not used by the scorer itself).
pub fn split_matches(
    matches: &[Match],
    linesep: &str,
) -> (Vec<String>, Vec<String>, Vec<Vec<EditOp>>) {
    let mut sorted: Vec<&Match> = matches.iter().collect();
    sorted.sort_by(|a, b| {
        let ka = a.gt.line as f64 + a.gt.start as f64 / 10_000.0;
        let kb = b.gt.line as f64 + b.gt.start as f64 / 10_000.0;
        ka.partial_cmp(&kb).unwrap()
    });

    let mut gt_segments = Vec::new();
    let mut ocr_segments = Vec::new();
    let mut ops_segments = Vec::new();
    let mut line = 0usize;

    for m in sorted {
        if m.gt.line > line {
            gt_segments.push(linesep.to_string());
            ocr_segments.push(linesep.to_string());
            ops_segments.push(Vec::new());
        }
        line = m.gt.line;
        gt_segments.push(m.gt.text.clone());
        ocr_segments.push(m.ocr.text.clone());
        ops_segments.push(m.ops.clone());
    }

    (gt_segments, ocr_segments, ops_segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_match_scores_one() {
        assert_eq!(character_accuracy(&Distance::default()), 1.0);
    }

    #[test]
    fn pure_insertion_against_empty_gt_is_negative_count() {
        let dist = Distance { insert: 3, delete: 0, replace: 0, r#match: 0 };
        assert_eq!(character_accuracy(&dist), -3.0);
    }

    #[test]
    fn errors_over_chars_otherwise() {
        let dist = Distance { insert: 0, delete: 1, replace: 0, r#match: 10 };
        assert_eq!(character_accuracy(&dist), 1.0 - 1.0 / 11.0);
    }

    #[test]
    fn s1_trivial_identity() {
        let (score, _) = flexible_character_accuracy("a\nb", "a\nb");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn s2_reading_order_invariance() {
        let (score, _) = flexible_character_accuracy("a\nb", "b\na");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn s3_single_line_identity() {
        let (score, _) = flexible_character_accuracy("Hello World", "Hello World");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn s4_one_deletion() {
        let (score, _) = flexible_character_accuracy("Hello World", "Hello Wrld");
        assert_eq!(score, 1.0 - 1.0 / 11.0);
    }

    #[test]
    fn s5_reorder_across_lines() {
        let (score, _) =
            flexible_character_accuracy("Hello World\nFoo bar", "Foo bar\nHello World");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn s6_pure_insertion_against_empty_gt() {
        let (score, _) = flexible_character_accuracy("", "abc");
        assert_eq!(score, -3.0);
    }

    #[test]
    fn empty_vs_empty_is_perfect_with_no_matches() {
        let (score, matches) = flexible_character_accuracy("", "");
        assert_eq!(score, 1.0);
        assert!(matches.is_empty());
    }

    #[test]
    fn identity_holds_for_arbitrary_nonempty_text() {
        let text = "The quick brown fox\njumps over\nthe lazy dog";
        let (score, _) = flexible_character_accuracy(text, text);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn split_matches_keeps_ops_segments_aligned_with_a_multichar_linesep() {
        use crate::part::Part;

        let line0 = Match {
            gt: Part::whole_line(0, "ab"),
            ocr: Part::whole_line(0, "ab"),
            dist: Distance { insert: 0, delete: 0, replace: 0, r#match: 2 },
            ops: Vec::new(),
        };
        let line1 = Match {
            gt: Part::whole_line(1, "cd"),
            ocr: Part::whole_line(1, "cd"),
            dist: Distance { insert: 0, delete: 0, replace: 0, r#match: 2 },
            ops: Vec::new(),
        };
        let (gt_segments, ocr_segments, ops_segments) =
            split_matches(&[line0, line1], "\r\n");

        assert_eq!(gt_segments.len(), ocr_segments.len());
        assert_eq!(gt_segments.len(), ops_segments.len());
        assert_eq!(gt_segments, vec!["ab".to_string(), "\r\n".to_string(), "cd".to_string()]);
    }
}
