//! The greedy line picker (spec §4.5/§4.6): repeatedly match the longest
//! remaining GT line(s) against the OCR pool, split the consumed
//! fragments back in, and fold whatever's left into pure inserts/deletes.

use crate::accuracy::character_accuracy;
use crate::align::align;
use crate::cache::Caches;
use crate::distance::Match;
use crate::part::Part;
use crate::penalty::{penalty, Coefficients};

/// Splits `text` into non-empty lines, each wrapped as a fresh [`Part`], and
/// sorted by length descending (ties broken by original order, which is
/// what a stable sort gives us).
fn initialize_lines(text: &str) -> Vec<Part> {
    let mut lines: Vec<Part> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| Part::whole_line(i, line))
        .collect();
    lines.sort_by(|a, b| b.length().cmp(&a.length()));
    lines
}

/// Runs the full picker for one coefficient vector: matches lines until one
/// pool is exhausted, then folds the remainder into pure deletes/inserts.
pub fn match_with(gt_text: &str, ocr_text: &str, coef: &Coefficients, caches: &mut Caches) -> Vec<Match> {
    let mut gt_pool = initialize_lines(gt_text);
    let mut ocr_pool = initialize_lines(ocr_text);
    let mut matches = Vec::new();

    while !gt_pool.is_empty() && !ocr_pool.is_empty() {
        if let Some(m) = match_longest_gt_lines(&mut gt_pool, &mut ocr_pool, coef, caches) {
            matches.push(m);
        }
    }

    for g in gt_pool {
        let empty_ocr = Part::empty_at(g.line, g.start);
        matches.push(caches.distance(g, empty_ocr));
    }
    for o in ocr_pool {
        let empty_gt = Part::empty_at(o.line, o.start);
        matches.push(caches.distance(empty_gt, o));
    }

    matches
}

/// One outer step of the picker: finds the best match among the "long GT
/// set" (every GT line within one character of the longest) against the
/// whole OCR pool, commits it, and splits/removes the consumed fragments.
fn match_longest_gt_lines(
    gt_pool: &mut Vec<Part>,
    ocr_pool: &mut Vec<Part>,
    coef: &Coefficients,
    caches: &mut Caches,
) -> Option<Match> {
    if ocr_pool.is_empty() {
        return None;
    }

    let length_threshold = gt_pool[0].length().min(ocr_pool[0].length()).saturating_sub(1);

    let mut best: Option<(usize, usize, Match)> = None;
    let mut min_penalty = f64::INFINITY;
    let mut best_accuracy = f64::NEG_INFINITY;

    for (gi, g) in gt_pool.iter().enumerate() {
        if g.length() <= length_threshold {
            break; // pool is sorted descending: nothing further qualifies
        }
        if let Some((oi, m, p)) = match_gt_line(g, ocr_pool, coef, caches) {
            if p < min_penalty {
                min_penalty = p;
                best_accuracy = character_accuracy(&m.dist);
                best = Some((gi, oi, m));
            }
        }
        if best_accuracy >= 1.0 {
            break;
        }
    }

    if let Some((gi, oi, m)) = best {
        let g = gt_pool[gi].clone();
        let o = ocr_pool[oi].clone();
        remove_or_split(&g, &m.gt, gt_pool);
        remove_or_split(&o, &m.ocr, ocr_pool);
        return Some(m);
    }

    // Progress guarantee: in the corner case where nothing aligned at all
    // (only reachable if `ocr_pool` were empty, which we've already guarded
    // against above), remove the longest GT fragment as a pure delete so
    // the outer loop always makes progress.
    if !gt_pool.is_empty() {
        log::debug!("no alignment candidate found; dropping longest GT fragment as a pure delete");
        let g = gt_pool.remove(0);
        let empty_ocr = Part::empty_at(g.line, g.start);
        return Some(caches.distance(g, empty_ocr));
    }

    None
}

/// Matches one GT line against every line in the OCR pool, keeping the pair
/// with the lowest penalty; the penalty is returned alongside so the caller
/// can compare this GT line's best match against other GT candidates in the
/// long GT set on the same basis.
fn match_gt_line(
    gt_line: &Part,
    ocr_pool: &[Part],
    coef: &Coefficients,
    caches: &mut Caches,
) -> Option<(usize, Match, f64)> {
    let mut min_penalty = f64::INFINITY;
    let mut best: Option<(usize, Match)> = None;

    for (oi, ocr_line) in ocr_pool.iter().enumerate() {
        if let Some(m) = align(gt_line.clone(), ocr_line.clone(), caches) {
            let p = penalty(
                gt_line.length(),
                ocr_line.length(),
                gt_line.start,
                ocr_line.start,
                m.gt.start,
                m.ocr.start,
                &m.dist,
                coef,
            );
            if p < min_penalty {
                min_penalty = p;
                best = Some((oi, m));
            }
        }
    }
    best.map(|(oi, m)| (oi, m, min_penalty))
}

/// Removes `original` from `pool` and, if `matched` only consumed a proper
/// sub-range of it, re-inserts the 0-2 remainder fragments and re-sorts.
/// Returns whether a split happened.
fn remove_or_split(original: &Part, matched: &Part, pool: &mut Vec<Part>) -> bool {
    let idx = pool.iter().position(|p| p == original).expect("original part missing from pool");
    pool.remove(idx);
    let mut split = false;
    if matched.length() < original.length() {
        pool.extend(original.split(matched));
        pool.sort_by(|a, b| b.length().cmp(&a.length()));
        split = true;
    }
    split
}
