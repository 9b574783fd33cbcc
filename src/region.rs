//! Free-space tracking as a set of disjoint rectangles.
//!
//! A [`FreeRegion`] is stored in banded form: a list of horizontal bands sorted
//! top to bottom, each holding the sorted, non-touching `[x0, x1)` spans that are
//! still free across the whole band height. Vertically adjacent bands with
//! identical spans are merged, so enumeration yields one rectangle per span
//! per band and the rectangles never overlap.

use crate::rect::Rect;

/// A half-open horizontal interval `[start, end)`
type Span = (i32, i32);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Band {
    top: i32,
    bottom: i32,
    spans: Vec<Span>,
}

/// The unclaimed area of a canvas. Only ever shrinks during a layout run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeRegion {
    bands: Vec<Band>,
}

impl FreeRegion {
    /// A region covering the whole `width` x `height` canvas. Zero or negative
    /// dimensions produce an empty region.
    pub fn new(width: i32, height: i32) -> FreeRegion {
        if width <= 0 || height <= 0 {
            return FreeRegion::default();
        }
        FreeRegion {
            bands: vec![Band {
                top: 0,
                bottom: height,
                spans: vec![(0, width)],
            }],
        }
    }

    /// The union of the given rectangles, used to describe custom fill shapes
    pub fn from_rects<I: IntoIterator<Item = Rect>>(rects: I) -> FreeRegion {
        let rects: Vec<Rect> = rects.into_iter().filter(|r| !r.is_empty()).collect();

        let mut edges: Vec<i32> = rects.iter().flat_map(|r| [r.top, r.bottom()]).collect();
        edges.sort_unstable();
        edges.dedup();

        let mut region = FreeRegion::default();
        for slab in edges.windows(2) {
            let (top, bottom) = (slab[0], slab[1]);
            let covering: Vec<Span> = rects
                .iter()
                .filter(|r| r.top <= top && r.bottom() >= bottom)
                .map(|r| (r.left, r.right()))
                .collect();
            let spans = merge_spans(covering);
            if !spans.is_empty() {
                region.bands.push(Band {
                    top,
                    bottom,
                    spans,
                });
            }
        }
        region.coalesce();
        region
    }

    /// Remove `rect` from the free area. Parts of `rect` that are not free are
    /// ignored.
    pub fn subtract(&mut self, rect: Rect) {
        if rect.is_empty() || self.bands.is_empty() {
            return;
        }

        self.split_at(rect.top);
        self.split_at(rect.bottom());

        for band in self
            .bands
            .iter_mut()
            .filter(|band| band.top >= rect.top && band.bottom <= rect.bottom())
        {
            band.spans = subtract_span(&band.spans, (rect.left, rect.right()));
        }

        self.bands.retain(|band| !band.spans.is_empty());
        self.coalesce();
    }

    /// Restrict the region to the `width` x `height` canvas
    pub fn clip(&mut self, width: i32, height: i32) {
        for band in self.bands.iter_mut() {
            band.top = band.top.max(0);
            band.bottom = band.bottom.min(height);
            band.spans = band
                .spans
                .iter()
                .map(|&(start, end)| (start.max(0), end.min(width)))
                .filter(|&(start, end)| start < end)
                .collect();
        }
        self.bands
            .retain(|band| band.top < band.bottom && !band.spans.is_empty());
        self.coalesce();
    }

    /// Enumerate the disjoint rectangles making up the region, top to bottom
    /// then left to right. Every call starts a fresh enumeration.
    pub fn rects(&self) -> Rects<'_> {
        Rects {
            bands: &self.bands,
            band: 0,
            span: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Number of free pixels
    pub fn area(&self) -> i64 {
        self.rects().map(|r| r.area()).sum()
    }

    /// Whether every pixel of `rect` is still free
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        if rect.is_empty() {
            return true;
        }
        let mut covered_to = rect.top;
        for band in &self.bands {
            if band.bottom <= covered_to {
                continue;
            }
            if band.top > covered_to {
                return false;
            }
            let spans_it = band
                .spans
                .iter()
                .any(|&(start, end)| start <= rect.left && end >= rect.right());
            if !spans_it {
                return false;
            }
            covered_to = band.bottom;
            if covered_to >= rect.bottom() {
                return true;
            }
        }
        false
    }

    /// Split the band straddling `y` so that `y` becomes a band boundary
    fn split_at(&mut self, y: i32) {
        if let Some(index) = self
            .bands
            .iter()
            .position(|band| band.top < y && y < band.bottom)
        {
            let lower = Band {
                top: y,
                bottom: self.bands[index].bottom,
                spans: self.bands[index].spans.clone(),
            };
            self.bands[index].bottom = y;
            self.bands.insert(index + 1, lower);
        }
    }

    fn coalesce(&mut self) {
        let mut merged: Vec<Band> = Vec::with_capacity(self.bands.len());
        for band in self.bands.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.bottom == band.top && prev.spans == band.spans => {
                    prev.bottom = band.bottom;
                }
                _ => merged.push(band),
            }
        }
        self.bands = merged;
    }
}

/// Iterator over the disjoint rectangles of a [`FreeRegion`]
pub struct Rects<'a> {
    bands: &'a [Band],
    band: usize,
    span: usize,
}

impl Iterator for Rects<'_> {
    type Item = Rect;

    fn next(&mut self) -> Option<Rect> {
        loop {
            let band = self.bands.get(self.band)?;
            if let Some(&(start, end)) = band.spans.get(self.span) {
                self.span += 1;
                return Some(Rect::from_edges(start, band.top, end, band.bottom));
            }
            self.band += 1;
            self.span = 0;
        }
    }
}

/// Remove `cut` from sorted, disjoint spans
fn subtract_span(spans: &[Span], cut: Span) -> Vec<Span> {
    let (cut_start, cut_end) = cut;
    let mut out = Vec::with_capacity(spans.len() + 1);
    for &(start, end) in spans {
        if end <= cut_start || start >= cut_end {
            out.push((start, end));
            continue;
        }
        if start < cut_start {
            out.push((start, cut_start));
        }
        if cut_end < end {
            out.push((cut_end, end));
        }
    }
    out
}

/// Sort spans and merge the ones that overlap or touch
fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_unstable();
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}
