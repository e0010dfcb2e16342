use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in pixel coordinates.
///
/// This project uses the standard convention of the left side of the image
/// being x=0 and the top of the image being y=0. Coordinates are global
/// (full image) except during the tile-local phase of detection, where they
/// are relative to a tile's origin until reprojected.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct BoundingBox {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl BoundingBox {
    /// Checks that the corners are ordered before constructing.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Result<Self> {
        if left > right || top > bottom {
            return Err(Error::InvalidBox {
                left,
                top,
                right,
                bottom,
            });
        }
        Ok(BoundingBox {
            left,
            top,
            right,
            bottom,
        })
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Geometric center, used by the temporal matcher.
    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Euclidean distance between the centers of two boxes.
    pub fn center_distance(&self, other: &BoundingBox) -> f32 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }

    /// Shifts the box by a tile's origin, reprojecting tile-local
    /// coordinates into the global image frame.
    pub fn translated(&self, dx: f32, dy: f32) -> BoundingBox {
        BoundingBox {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Area under the +1 pixel-inclusive convention: a box whose corners
    /// coincide still covers one pixel. This matches the detection-library
    /// convention the models were validated against; keep it in sync with
    /// [`BoundingBox::intersection_over_union`].
    pub fn area(&self) -> f32 {
        (self.width() + 1.0) * (self.height() + 1.0)
    }

    /// Intersection-over-union of two boxes, pixel-inclusive on both axes.
    pub fn intersection_over_union(&self, other: &BoundingBox) -> f32 {
        let inter_left = self.left.max(other.left);
        let inter_top = self.top.max(other.top);
        let inter_right = self.right.min(other.right);
        let inter_bottom = self.bottom.min(other.bottom);
        let inter_w = (inter_right - inter_left + 1.0).max(0.0);
        let inter_h = (inter_bottom - inter_top + 1.0).max(0.0);
        let intersection = inter_w * inter_h;
        intersection / (self.area() + other.area() - intersection)
    }

    /// Clamps the box to `[0, width] x [0, height]`.
    pub fn clamped(&self, width: f32, height: f32) -> BoundingBox {
        BoundingBox {
            left: self.left.clamp(0.0, width),
            top: self.top.clamp(0.0, height),
            right: self.right.clamp(0.0, width),
            bottom: self.bottom.clamp(0.0, height),
        }
    }
}
