//! PAGE XML line extraction, grounded on `page_extract` in the original
//! implementation: order regions per the chosen reading-order strategy, then
//! pull each region's lines.

use crate::error::IngestError;
use crate::ingest::{reading_order, IngestOptions};

/// Extracts one ingested line per `TextLine` in the chosen region order. A
/// region's lines are joined with `\n` to form its contribution; the whole
/// region is skipped only if that joined text comes out empty (or if the
/// reading-order strategy referenced a region the document doesn't contain).
/// A blank line nested between non-blank ones in the same region is kept.
pub fn extract_lines(
    doc: &roxmltree::Document,
    opts: &IngestOptions,
) -> Result<Vec<String>, IngestError> {
    let region_ids = reading_order::extract_region_ids(doc, opts.reading_order, opts.grid_size)?;

    let mut lines = Vec::new();
    for id in region_ids {
        let region = doc
            .descendants()
            .find(|n| n.tag_name().name() == "TextRegion" && n.attribute("id") == Some(id.as_str()));
        let Some(region) = region else { continue };
        let region_text = region_lines(&region).join("\n");
        if region_text.is_empty() {
            continue;
        }
        lines.extend(region_text.split('\n').map(str::to_string));
    }
    Ok(lines)
}

fn region_lines(region: &roxmltree::Node) -> Vec<String> {
    region
        .descendants()
        .filter(|n| n.tag_name().name() == "TextLine")
        .filter_map(text_equiv_unicode)
        .collect()
}

fn text_equiv_unicode(node: roxmltree::Node) -> Option<String> {
    let text_equiv = node.children().find(|n| n.tag_name().name() == "TextEquiv")?;
    let unicode = text_equiv.children().find(|n| n.tag_name().name() == "Unicode")?;
    Some(unicode.text().unwrap_or("").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ReadingOrderStrategy;

    const PAGE: &str = r#"<?xml version="1.0"?>
    <PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2019-07-15">
      <Page imageWidth="100" imageHeight="100">
        <TextRegion id="r1">
          <TextLine id="l1">
            <TextEquiv><Unicode>Hello World</Unicode></TextEquiv>
          </TextLine>
        </TextRegion>
        <TextRegion id="r2">
          <TextLine id="l2">
            <TextEquiv><Unicode>Foo bar</Unicode></TextEquiv>
          </TextLine>
        </TextRegion>
      </Page>
    </PcGts>"#;

    #[test]
    fn extracts_lines_in_document_order_by_default() {
        let doc = roxmltree::Document::parse(PAGE).unwrap();
        let opts = IngestOptions { reading_order: ReadingOrderStrategy::NoReadingOrder, grid_size: 10 };
        let lines = extract_lines(&doc, &opts).unwrap();
        assert_eq!(lines, vec!["Hello World".to_string(), "Foo bar".to_string()]);
    }

    #[test]
    fn empty_regions_are_skipped() {
        const EMPTY: &str = r#"<PcGts><Page><TextRegion id="r1"/></Page></PcGts>"#;
        let doc = roxmltree::Document::parse(EMPTY).unwrap();
        let opts = IngestOptions::default();
        let lines = extract_lines(&doc, &opts).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn blank_line_inside_a_nonempty_region_is_kept_not_dropped() {
        const MIXED: &str = r#"<PcGts><Page>
          <TextRegion id="r1">
            <TextLine id="l1"><TextEquiv><Unicode>first</Unicode></TextEquiv></TextLine>
            <TextLine id="l2"><TextEquiv><Unicode></Unicode></TextEquiv></TextLine>
            <TextLine id="l3"><TextEquiv><Unicode>third</Unicode></TextEquiv></TextLine>
          </TextRegion>
        </Page></PcGts>"#;
        let doc = roxmltree::Document::parse(MIXED).unwrap();
        let opts = IngestOptions { reading_order: ReadingOrderStrategy::NoReadingOrder, grid_size: 10 };
        let lines = extract_lines(&doc, &opts).unwrap();
        assert_eq!(lines, vec!["first".to_string(), String::new(), "third".to_string()]);
    }
}
