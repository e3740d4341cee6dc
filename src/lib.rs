//! Reading-order-independent character accuracy scoring for OCR output.
//!
//! Given a ground-truth text and an OCR-produced text, both already
//! decomposed into lines, [`flexible_character_accuracy`] searches for a
//! line-to-line assignment that minimizes an edit-based penalty, then
//! reports character accuracy over the whole document. Unlike a plain edit
//! distance, the search tolerates OCR lines being re-ordered, split, merged,
//! or partially absent relative to ground truth.
//!
//! ```
//! use flexacc::flexible_character_accuracy;
//!
//! let (score, _matches) = flexible_character_accuracy("a\nb", "b\na");
//! assert_eq!(score, 1.0);
//! ```
//!
//! The matching core ([`part`], [`distance`], [`align`], [`picker`],
//! [`penalty`], [`accuracy`], [`cache`]) is total and has no I/O. [`ingest`]
//! sits upstream of it, turning ALTO/PAGE XML or plain text files into the
//! line sequences the core expects.

pub mod accuracy;
pub mod align;
pub mod cache;
pub mod distance;
pub mod error;
pub mod ingest;
pub mod part;
pub mod penalty;
pub mod picker;

pub use accuracy::{
    character_accuracy, character_accuracy_for_matches, flexible_character_accuracy, split_matches,
};
pub use distance::{distance, editops, Distance, EditOp, Match};
pub use error::IngestError;
pub use part::Part;
pub use penalty::{coefficient_grid, penalty, Coefficients};
