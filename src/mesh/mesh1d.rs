//! 1D mesh representation.
//!
//! A 1D mesh is a set of non-overlapping line elements, ordered left to right and
//! grouped into physical regions. Elements keep the tag they were given by the
//! mesh generator; the solver addresses them by their position in the ordering.

use crate::error::{DgError, Result};

/// Tolerance for detecting overlapping elements.
const OVERLAP_TOL: f64 = 1e-12;

/// A line element of the mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct Element1D {
    /// Tag assigned by the mesh generator
    pub tag: usize,
    /// Left physical coordinate
    pub left: f64,
    /// Right physical coordinate
    pub right: f64,
    /// Tag of the region the element belongs to
    pub region: usize,
}

impl Element1D {
    /// Create an element; the endpoints may be given in either order.
    pub fn new(tag: usize, a: f64, b: f64, region: usize) -> Self {
        Self {
            tag,
            left: a.min(b),
            right: a.max(b),
            region,
        }
    }

    /// Physical length of the element.
    pub fn size(&self) -> f64 {
        (self.right - self.left).abs()
    }
}

/// A physical region (group of elements) of the mesh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// Physical group tag
    pub tag: usize,
    /// Physical group name
    pub name: String,
}

/// 1D mesh of an interval, split into regions.
#[derive(Clone, Debug)]
pub struct Mesh1D {
    /// Elements sorted by left coordinate
    elements: Vec<Element1D>,
    /// Regions sorted by their leftmost element
    regions: Vec<Region>,
}

impl Mesh1D {
    /// Create a uniform single-region mesh of [x_min, x_max] with n_elements elements.
    ///
    /// Element tags run from 1 to n_elements, the region has tag 1 and is named
    /// `"domain"`.
    pub fn uniform(x_min: f64, x_max: f64, n_elements: usize) -> Result<Self> {
        if n_elements == 0 {
            return Err(DgError::invalid_argument(
                "a uniform mesh needs at least one element",
            ));
        }
        if !(x_max > x_min) {
            return Err(DgError::invalid_argument(format!(
                "x_max = {} must be greater than x_min = {}",
                x_max, x_min
            )));
        }

        let h = (x_max - x_min) / n_elements as f64;
        let elements = (0..n_elements)
            .map(|k| {
                let left = x_min + k as f64 * h;
                let right = if k + 1 == n_elements {
                    x_max
                } else {
                    x_min + (k + 1) as f64 * h
                };
                Element1D::new(k + 1, left, right, 1)
            })
            .collect();

        Self::from_elements(
            elements,
            vec![Region {
                tag: 1,
                name: "domain".to_string(),
            }],
        )
    }

    /// Build a mesh from elements and the regions they reference.
    ///
    /// Elements are sorted by their left coordinate and regions by their leftmost
    /// element.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty mesh, zero-size or overlapping elements,
    /// elements referencing an unknown region, duplicate or empty regions, and
    /// regions whose elements are not adjacent.
    pub fn from_elements(mut elements: Vec<Element1D>, regions: Vec<Region>) -> Result<Self> {
        if elements.is_empty() {
            return Err(DgError::invalid_argument("mesh has no elements"));
        }

        for e in &elements {
            if !(e.left.is_finite() && e.right.is_finite()) || e.size() <= 0.0 {
                return Err(DgError::invalid_argument(format!(
                    "element {} has invalid extent [{}, {}]",
                    e.tag, e.left, e.right
                )));
            }
            if !regions.iter().any(|r| r.tag == e.region) {
                return Err(DgError::invalid_argument(format!(
                    "element {} references unknown region {}",
                    e.tag, e.region
                )));
            }
        }

        elements.sort_by(|a, b| a.left.total_cmp(&b.left));

        for pair in elements.windows(2) {
            if pair[1].left < pair[0].right - OVERLAP_TOL {
                return Err(DgError::invalid_argument(format!(
                    "elements {} and {} overlap",
                    pair[0].tag, pair[1].tag
                )));
            }
        }

        // Each region must be one run of neighbouring elements
        let mut finished: Vec<usize> = Vec::with_capacity(regions.len());
        for pair in elements.windows(2) {
            if pair[0].region != pair[1].region {
                finished.push(pair[0].region);
                if finished.contains(&pair[1].region) {
                    return Err(DgError::invalid_argument(format!(
                        "region {} is not contiguous: element {} is separated from the rest of the region",
                        pair[1].region, pair[1].tag
                    )));
                }
            }
        }

        let mut ordered: Vec<(usize, Region)> = Vec::with_capacity(regions.len());
        for region in regions {
            if ordered.iter().any(|(_, r)| r.tag == region.tag) {
                return Err(DgError::invalid_argument(format!(
                    "region {} is defined twice",
                    region.tag
                )));
            }
            let first = elements
                .iter()
                .position(|e| e.region == region.tag)
                .ok_or_else(|| {
                    DgError::invalid_argument(format!(
                        "region {} ({}) has no elements",
                        region.tag, region.name
                    ))
                })?;
            ordered.push((first, region));
        }
        ordered.sort_by_key(|(first, _)| *first);

        Ok(Self {
            elements,
            regions: ordered.into_iter().map(|(_, r)| r).collect(),
        })
    }

    /// Number of elements.
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Elements in left-to-right order.
    pub fn elements(&self) -> &[Element1D] {
        &self.elements
    }

    /// Element k in left-to-right order.
    pub fn element(&self, k: usize) -> &Element1D {
        &self.elements[k]
    }

    /// Left and right physical coordinates of element k.
    pub fn elem_coords(&self, k: usize) -> (f64, f64) {
        let e = &self.elements[k];
        (e.left, e.right)
    }

    /// Physical length of element k.
    pub fn elem_size(&self, k: usize) -> f64 {
        self.elements[k].size()
    }

    /// Smallest element size in the mesh.
    pub fn min_elem_size(&self) -> f64 {
        self.elements
            .iter()
            .map(Element1D::size)
            .fold(f64::INFINITY, f64::min)
    }

    /// Smallest element size within a region.
    pub fn min_elem_size_in(&self, region: usize) -> Result<f64> {
        let elements = self.region_elements(region)?;
        Ok(elements
            .iter()
            .map(|&k| self.elem_size(k))
            .fold(f64::INFINITY, f64::min))
    }

    /// Regions in left-to-right order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Indices (in left-to-right order) of the elements of a region.
    pub fn region_elements(&self, region: usize) -> Result<Vec<usize>> {
        if !self.regions.iter().any(|r| r.tag == region) {
            return Err(DgError::invalid_argument(format!(
                "mesh has no region with tag {}",
                region
            )));
        }
        Ok(self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.region == region)
            .map(|(k, _)| k)
            .collect())
    }

    /// Indices of all elements.
    pub fn all_elements(&self) -> Vec<usize> {
        (0..self.elements.len()).collect()
    }

    /// Left end of the meshed domain.
    pub fn x_min(&self) -> f64 {
        self.elements[0].left
    }

    /// Right end of the meshed domain.
    pub fn x_max(&self) -> f64 {
        self.elements[self.elements.len() - 1].right
    }
}
