//! The line aligner (spec §4.3): the hottest, most intricate piece of the
//! engine. Locates a good local alignment of two line-fragments by sliding
//! the shorter one inside the longer, then extends the match outward to
//! absorb trailing deletions, falling back to treating the whole GT line as
//! deleted if nothing scores better.

use crate::cache::Caches;
use crate::distance::Match;
use crate::part::Part;

/// Finds the best local alignment of `gt_line` against `ocr_line`, or
/// `None` if both are empty.
///
/// Referentially transparent in `(gt_line, ocr_line)` — callers on the hot
/// path go through `caches` rather than calling [`align_uncached`] directly,
/// since this function (and [`crate::distance::distance`] beneath it) is by
/// far the hottest code path in a full coefficient sweep.
pub fn align(gt_line: Part, ocr_line: Part, caches: &mut Caches) -> Option<Match> {
    caches.align_or_insert(gt_line, ocr_line, |caches, gt_line, ocr_line| {
        align_uncached(gt_line, ocr_line, caches)
    })
}

fn align_uncached(gt_line: &Part, ocr_line: &Part, caches: &mut Caches) -> Option<Match> {
    let m = gt_line.length().min(ocr_line.length());
    if m == 0 {
        return None;
    }
    let delta = gt_line.length() as isize - ocr_line.length() as isize;

    let mut gt_candidates: Vec<(usize, Part)> = Vec::new();
    if delta >= 0 {
        for i in 0..=(delta as usize) {
            gt_candidates.push((i, gt_line.substring(i, Some(i + m))));
        }
    } else {
        gt_candidates.push((0, gt_line.substring(0, Some(m))));
    }
    gt_candidates.push((0, gt_line.substring(0, None)));

    let mut ocr_candidates: Vec<(usize, Part)> = Vec::new();
    if delta <= 0 {
        for j in 0..=((-delta) as usize) {
            ocr_candidates.push((j, ocr_line.substring(j, Some(j + m))));
        }
    } else {
        ocr_candidates.push((0, ocr_line.substring(0, Some(m))));
    }
    ocr_candidates.push((0, ocr_line.substring(0, None)));

    let mut best_match: Option<Match> = None;
    let mut best_i = 0usize;
    let mut best_j = 0usize;
    let mut min_edit_dist = usize::MAX;

    for (i, gt_part) in &gt_candidates {
        for (j, ocr_part) in &ocr_candidates {
            let candidate = caches.distance(gt_part.clone(), ocr_part.clone());
            let edit_score = candidate.dist.edit_score();
            if edit_score < min_edit_dist && candidate.dist.replace < m {
                min_edit_dist = edit_score;
                best_i = *i;
                best_j = *j;
                best_match = Some(candidate);
            }
        }
    }

    // Extension pass: absorb trailing deletions/replacements one character
    // at a time, as long as doing so strictly lowers the edit score. Each
    // side is clamped independently (mirroring Python's per-slice clamping)
    // rather than bounding the loop by the tighter of the two, since one
    // side commonly has room to keep growing after the other has saturated.
    if let Some(bm) = &best_match {
        if bm.dist.delete > 0 || bm.dist.replace > 0 {
            let part_length = bm.gt.length();
            let additional = bm.dist.delete + bm.dist.replace;
            let k_limit = part_length + additional;
            for k in (part_length + 1)..=k_limit {
                let gt_ext = gt_line.substring(best_i, Some((best_i + k).min(gt_line.length())));
                let ocr_ext = ocr_line.substring(best_j, Some((best_j + k).min(ocr_line.length())));
                let candidate = caches.distance(gt_ext, ocr_ext);
                let edit_score = candidate.dist.edit_score();
                if edit_score < min_edit_dist && candidate.dist.replace < m {
                    min_edit_dist = edit_score;
                    best_match = Some(candidate);
                }
            }
        }
    }

    // Pure-deletion fallback: treat the whole GT line as unmatched.
    let delete_candidate =
        caches.distance(gt_line.clone(), Part::empty_at(ocr_line.line, ocr_line.start));
    if delete_candidate.dist.edit_score() < min_edit_dist {
        best_match = Some(delete_candidate);
    }

    best_match
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligned(gt: &str, ocr: &str) -> Option<Match> {
        let mut caches = Caches::default();
        align(Part::whole_line(0, gt), Part::whole_line(0, ocr), &mut caches)
    }

    #[test]
    fn empty_either_side_returns_none() {
        assert!(aligned("", "").is_none());
        assert!(aligned("", "abc").is_none());
        assert!(aligned("abc", "").is_none());
    }

    #[test]
    fn identical_lines_align_perfectly() {
        let m = aligned("Hello World", "Hello World").unwrap();
        assert_eq!(m.dist.edit_score(), 0);
    }

    #[test]
    fn one_deletion_is_recognized_via_extension() {
        let m = aligned("Hello World", "Hello Wrld").unwrap();
        assert_eq!(m.dist.edit_score(), 1);
        assert_eq!(m.dist.delete, 1);
    }

    #[test]
    fn completely_unrelated_lines_fall_back_to_pure_deletion() {
        let m = aligned("abc", "xyz123").unwrap();
        assert_eq!(m.ocr.length(), 0);
        assert_eq!(m.dist.delete, 3);
    }

    #[test]
    fn extension_pass_runs_on_an_offset_match_without_worsening_it() {
        // gt carries one extra character before the aligned region and one
        // after; the winning window starts at a non-zero offset (best_i=1),
        // which is exactly the case where the old shared `min()` bound on
        // the extension loop collapsed its range to empty. With independent
        // per-side clamping the loop now runs, and must not replace an
        // already-optimal match with a worse one.
        let m = aligned("aXbcd", "abc").unwrap();
        assert_eq!(m.gt.text, "Xbc");
        assert_eq!(m.ocr.text, "abc");
        assert_eq!(m.dist.replace, 1);
        assert_eq!(m.dist.edit_score(), 2);
    }

    #[test]
    fn ocr_substring_of_gt_slides_to_best_offset() {
        let m = aligned("the quick brown fox", "quick brown").unwrap();
        assert_eq!(m.dist.edit_score(), 0);
        assert_eq!(m.ocr.text, "quick brown");
    }
}
