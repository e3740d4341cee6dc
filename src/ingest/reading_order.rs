//! Reading-order strategies for ordering PAGE `TextRegion`s before their text
//! is pulled, grounded on `reading_order.py` in the original implementation.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::IngestError;

/// Which strategy to use to order a PAGE document's text regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingOrderStrategy {
    /// Read the `ReadingOrder`/`OrderedGroup`/`RegionRefIndexed` elements.
    #[default]
    ReadingOrder,
    /// Use `TextRegion` elements in document order.
    NoReadingOrder,
    /// Bucket each region's top-left corner onto a coarse grid.
    Grid,
}

impl FromStr for ReadingOrderStrategy {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reading_order" => Ok(ReadingOrderStrategy::ReadingOrder),
            "no_reading_order" => Ok(ReadingOrderStrategy::NoReadingOrder),
            "grid" => Ok(ReadingOrderStrategy::Grid),
            other => Err(IngestError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Orders the region ids of a PAGE document per `strategy`.
pub fn extract_region_ids(
    doc: &roxmltree::Document,
    strategy: ReadingOrderStrategy,
    grid_size: usize,
) -> Result<Vec<String>, IngestError> {
    match strategy {
        ReadingOrderStrategy::ReadingOrder => extract_with_reading_order(doc),
        ReadingOrderStrategy::NoReadingOrder => Ok(extract_without_reading_order(doc)),
        ReadingOrderStrategy::Grid => Ok(extract_grid(doc, grid_size)),
    }
}

fn extract_without_reading_order(doc: &roxmltree::Document) -> Vec<String> {
    doc.descendants()
        .filter(|n| n.tag_name().name() == "TextRegion")
        .filter_map(|n| n.attribute("id").map(str::to_string))
        .collect()
}

fn extract_with_reading_order(doc: &roxmltree::Document) -> Result<Vec<String>, IngestError> {
    let Some(reading_order) = doc.descendants().find(|n| n.tag_name().name() == "ReadingOrder")
    else {
        log::warn!("no reading order, extracting without one");
        return Ok(extract_without_reading_order(doc));
    };

    let mut refs: Vec<(i64, String)> = Vec::new();
    for group in reading_order.children().filter(|n| n.is_element()) {
        if group.tag_name().name() != "OrderedGroup" {
            return Err(IngestError::Xml {
                schema: "PAGE",
                detail: format!(
                    "unsupported reading-order group {:?}, expected OrderedGroup",
                    group.tag_name().name()
                ),
            });
        }
        for region_ref in group.children().filter(|n| n.tag_name().name() == "RegionRefIndexed") {
            let (Some(index), Some(region_ref)) =
                (region_ref.attribute("index"), region_ref.attribute("regionRef"))
            else {
                continue;
            };
            if let Ok(index) = index.parse::<i64>() {
                refs.push((index, region_ref.to_string()));
            }
        }
    }
    refs.sort_by_key(|(index, _)| *index);
    Ok(refs.into_iter().map(|(_, id)| id).collect())
}

fn extract_grid(doc: &roxmltree::Document, grid_size: usize) -> Vec<String> {
    let grid_size = grid_size.max(1);
    let (img_w, img_h) = image_dimensions(doc).unwrap_or((1.0, 1.0));

    let mut regions: Vec<(String, roxmltree::Node)> = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "TextRegion")
        .filter_map(|n| n.attribute("id").map(|id| (id.to_string(), n)))
        .collect();
    regions.sort_by(|a, b| a.0.cmp(&b.0));

    let mut buckets: BTreeMap<(usize, usize), Vec<String>> = BTreeMap::new();
    for (id, region) in regions {
        let Some((x, y)) = top_left(&region) else { continue };
        let col = ((x / img_w) * grid_size as f64) as usize;
        let row = ((y / img_h) * grid_size as f64) as usize;
        let cell = (row.min(grid_size - 1), col.min(grid_size - 1));
        buckets.entry(cell).or_default().push(id);
    }
    buckets.into_values().flatten().collect()
}

fn image_dimensions(doc: &roxmltree::Document) -> Option<(f64, f64)> {
    let page = doc.descendants().find(|n| n.tag_name().name() == "Page")?;
    let w: f64 = page.attribute("imageWidth")?.parse().ok()?;
    let h: f64 = page.attribute("imageHeight")?.parse().ok()?;
    Some((w, h))
}

fn top_left(region: &roxmltree::Node) -> Option<(f64, f64)> {
    let coords = region.children().find(|n| n.tag_name().name() == "Coords")?;
    let points = coords.attribute("points")?;
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    for pair in points.split_whitespace() {
        let mut parts = pair.split(',');
        let x: f64 = parts.next()?.parse().ok()?;
        let y: f64 = parts.next()?.parse().ok()?;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
    }
    (min_x.is_finite() && min_y.is_finite()).then_some((min_x, min_y))
}
