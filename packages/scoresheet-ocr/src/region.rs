use serde::{Deserialize, Serialize};

/// Axis-aligned box of a recognized fragment, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Smallest box enclosing every point, or `None` for an empty polygon.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (x0, y0) = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for (x, y) in iter {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// A single recognized span as handed over by the OCR vendor adapter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextFragment {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub position: Option<BoundingBox>,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, confidence: f32, position: Option<BoundingBox>) -> Self {
        Self {
            text: text.into(),
            confidence,
            position,
        }
    }
}

/// A question box returned by the paper segmentation endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaperQuestion {
    #[serde(default)]
    pub stem: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub bbox: Option<BoundingBox>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points([(10.0, 40.0), (30.0, 20.0), (25.0, 50.0)]).unwrap();
        assert_eq!(bbox, BoundingBox::new(10.0, 20.0, 20.0, 30.0));
        assert!(BoundingBox::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_fragment_without_position() {
        let fragment: TextFragment = serde_json::from_str(r#"{"text":"(A)","confidence":0.9,"position":null}"#).unwrap();
        assert_eq!(fragment.text, "(A)");
        assert!(fragment.position.is_none());
    }
}
