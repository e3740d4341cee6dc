use flexacc::flexible_character_accuracy;

pub fn main() {
    let gt = "Mr. and Mrs. Dursley, of number four, Privet Drive\nwere proud to say that they were perfectly normal";
    let ocr = "were proud to say that they were perfecly normal\nMr. and Mrs. Dursley, of number four, Priv3t Drive";

    let (score, matches) = flexible_character_accuracy(gt, ocr);
    println!("score: {:.4}", score);
    for m in &matches {
        println!("gt={:?} ocr={:?} dist={:?}", m.gt.text, m.ocr.text, m.dist);
    }
}
