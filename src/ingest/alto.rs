//! ALTO XML line extraction, grounded on `alto_extract_lines` in the
//! original implementation.

/// Extracts one ingested line per `TextLine` element: the space-joined
/// `CONTENT` attributes of its child `String` elements, in document order.
pub fn extract_lines(doc: &roxmltree::Document) -> Vec<String> {
    doc.descendants()
        .filter(|n| n.tag_name().name() == "TextLine")
        .map(|text_line| {
            text_line
                .children()
                .filter(|c| c.tag_name().name() == "String")
                .filter_map(|s| s.attribute("CONTENT"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALTO: &str = r#"<?xml version="1.0"?>
    <alto xmlns="http://www.loc.gov/standards/alto/ns-v3#">
      <Layout>
        <Page>
          <PrintSpace>
            <TextBlock>
              <TextLine>
                <String CONTENT="Hello"/>
                <String CONTENT="World"/>
              </TextLine>
              <TextLine>
                <String CONTENT="Second"/>
              </TextLine>
            </TextBlock>
          </PrintSpace>
        </Page>
      </Layout>
    </alto>"#;

    #[test]
    fn extracts_one_line_per_text_line_space_joined() {
        let doc = roxmltree::Document::parse(ALTO).unwrap();
        let lines = extract_lines(&doc);
        assert_eq!(lines, vec!["Hello World".to_string(), "Second".to_string()]);
    }
}
