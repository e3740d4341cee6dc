//! The penalty function (spec §4.4) and the coefficient vector it is
//! parameterized by.

use crate::distance::Distance;

/// Weights tuning [`penalty`] during one run of the line picker. The
/// coefficient sweep (spec §4.7) enumerates a fixed grid of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coefficients {
    pub edit_dist: u32,
    pub length_diff: u32,
    pub offset: u32,
    pub length: u32,
}

/// The fixed 768-point coefficient grid, in cartesian-product order
/// `(edit_dist, length_diff, offset, length)`.
pub fn coefficient_grid() -> impl Iterator<Item = Coefficients> {
    const EDIT_DIST: [u32; 4] = [15, 20, 25, 30];
    const LENGTH_DIFF: [u32; 8] = [0, 3, 6, 9, 12, 15, 18, 21];
    const OFFSET: [u32; 4] = [0, 1, 2, 3];
    const LENGTH: [u32; 6] = [0, 1, 2, 3, 4, 5];

    EDIT_DIST.into_iter().flat_map(move |edit_dist| {
        LENGTH_DIFF.into_iter().flat_map(move |length_diff| {
            OFFSET.into_iter().flat_map(move |offset| {
                LENGTH
                    .into_iter()
                    .map(move |length| Coefficients { edit_dist, length_diff, offset, length })
            })
        })
    })
}

/// Scalar cost of a candidate match: lower is better. Pushes the search
/// toward shorter edit scripts, similar lengths, well-centered alignments,
/// and longer matched substrings, per `coef`'s four weights respectively.
#[allow(clippy::too_many_arguments)]
pub fn penalty(
    gt_len: usize,
    ocr_len: usize,
    gt_start: usize,
    ocr_start: usize,
    gt_match_start: usize,
    ocr_match_start: usize,
    dist: &Distance,
    coef: &Coefficients,
) -> f64 {
    let edit_score = dist.edit_score() as f64;
    let length_diff = (gt_len as isize - ocr_len as isize).unsigned_abs();
    let substring_len = gt_len.min(ocr_len) as f64;

    let offset = if length_diff > 1 {
        let sub_pos = (gt_match_start as isize - gt_start as isize)
            .max(ocr_match_start as isize - ocr_start as isize) as f64;
        let half = length_diff as f64 / 2.0;
        half - (sub_pos - half).abs()
    } else {
        0.0
    };

    edit_score * coef.edit_dist as f64 + length_diff as f64 * coef.length_diff as f64
        + offset * coef.offset as f64
        - substring_len * coef.length as f64
}
