//! Rectangle arithmetic used to map OCR fragments onto answer regions.
//!
//! Regions and masks use the `{x, y, width, height}` form, fragment boxes the
//! vendor's `{left, top, width, height}` form. Both live in the same pixel
//! space.

use scoresheet_ocr::{BoundingBox, TextFragment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True when `(px, py)` lies within the closed rectangle.
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x && other.y >= self.y && other.right() <= self.right() && other.bottom() <= self.bottom()
    }
}

impl From<BoundingBox> for Rect {
    fn from(b: BoundingBox) -> Self {
        Rect::new(b.left, b.top, b.width, b.height)
    }
}

impl From<Rect> for BoundingBox {
    fn from(r: Rect) -> Self {
        BoundingBox::new(r.x, r.y, r.width, r.height)
    }
}

/// Strict overlap test: rectangles that only share an edge do not overlap.
pub fn rectangles_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// True when the box's center lies inside `region`, edges included.
pub fn center_inside(bbox: &BoundingBox, region: &Rect) -> bool {
    let (cx, cy) = bbox.center();
    region.contains_point(cx, cy)
}

/// A fragment is in a region when its center falls inside it or its box
/// intersects it. Fragments without geometry are never in a region.
pub fn is_fragment_in_region(fragment: &TextFragment, region: &Rect) -> bool {
    match &fragment.position {
        Some(bbox) => center_inside(bbox, region) || rectangles_overlap(&Rect::from(*bbox), region),
        None => false,
    }
}

/// Fragments hit by `region`, in input order.
pub fn fragments_in_region<'a>(fragments: &'a [TextFragment], region: &Rect) -> Vec<&'a TextFragment> {
    fragments
        .iter()
        .filter(|f| is_fragment_in_region(f, region))
        .collect()
}

/// Splits every region into grid cells along the edges of the masks that
/// overlap it and keeps the cells no mask covers.
///
/// A region no mask touches comes back as-is. When nothing usable is left
/// across all regions, the input regions are returned unchanged.
pub fn subtract_masks(regions: &[Rect], masks: &[Rect]) -> Vec<Rect> {
    let mut cells = Vec::new();

    for region in regions {
        let overlapping: Vec<&Rect> = masks.iter().filter(|m| rectangles_overlap(region, m)).collect();
        if overlapping.is_empty() {
            if !region.is_degenerate() {
                cells.push(*region);
            }
            continue;
        }

        let xs = cut_lines(region.x, region.right(), overlapping.iter().flat_map(|m| [m.x, m.right()]));
        let ys = cut_lines(region.y, region.bottom(), overlapping.iter().flat_map(|m| [m.y, m.bottom()]));

        for xw in xs.windows(2) {
            for yw in ys.windows(2) {
                let cell = Rect::new(xw[0], yw[0], xw[1] - xw[0], yw[1] - yw[0]);
                if cell.is_degenerate() || !region.contains_rect(&cell) {
                    continue;
                }
                if !overlapping.iter().any(|m| rectangles_overlap(&cell, m)) {
                    cells.push(cell);
                }
            }
        }
    }

    if cells.is_empty() {
        return regions.to_vec();
    }
    cells
}

/// Sorted, deduplicated cut positions between `lo` and `hi`, both ends included.
fn cut_lines<I>(lo: f64, hi: f64, edges: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut lines = vec![lo, hi];
    lines.extend(edges.into_iter().filter(|&e| e > lo && e < hi));
    lines.sort_by(|a, b| a.total_cmp(b));
    lines.dedup();
    lines
}
