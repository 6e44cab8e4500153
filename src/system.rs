use crate::element::{compose, Diameter, ElementMatrix};
use core::ops::{Bound, RangeBounds};
use std::sync::OnceLock;

/// Ordered optical path, the first element being the first one met by the light.
///
/// Elements can only be appended. The aggregate transfer matrix is composed once on
/// first use after each `append` and shared by every reader afterwards.
#[derive(Debug, Clone, Default)]
pub struct System {
    label: Option<String>,
    elements: Vec<ElementMatrix>,
    transfer: OnceLock<ElementMatrix>,
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Add `element` after the current last element
    pub fn append(&mut self, element: ElementMatrix) -> &mut Self {
        debug!(
            "appending {:?} at z = {} to {}",
            element.kind(),
            self.total_length(),
            self.label().unwrap_or("unlabeled system")
        );
        self.elements.push(element);
        self.transfer = OnceLock::new();
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[ElementMatrix] {
        &self.elements
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ElementMatrix> {
        self.elements.iter()
    }

    /// Transfer matrix of the whole system, the identity for an empty one
    pub fn transfer_matrix(&self) -> &ElementMatrix {
        self.transfer.get_or_init(|| {
            debug!("composing the transfer matrix of {} elements", self.len());
            self.aggregate(0, self.len())
        })
    }

    /// Transfer matrix of the elements in `range`, `None` if the range is out of bounds
    pub fn transfer_matrix_range(&self, range: impl RangeBounds<usize>) -> Option<ElementMatrix> {
        let start = match range.start_bound() {
            Bound::Included(&i) => i,
            Bound::Excluded(&i) => i.checked_add(1)?,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&i) => i.checked_add(1)?,
            Bound::Excluded(&i) => i,
            Bound::Unbounded => self.len(),
        };
        if start > end || end > self.len() {
            return None;
        }
        Some(self.aggregate(start, end))
    }

    /// Transfer matrix from the entrance plane to the plane at physical distance `z`.
    /// An element straddling `z` is cut, `None` if that element cannot be cut.
    pub fn transfer_matrix_up_to(&self, z: f64) -> Option<ElementMatrix> {
        let mut transfer = ElementMatrix::identity_in(self.index_at(0));
        for element in self.iter() {
            let position = transfer.length();
            if position + element.length() <= z {
                transfer = compose(&transfer, element);
            } else {
                return Some(compose(&transfer, &element.partial(z - position)?));
            }
        }
        Some(transfer)
    }

    /// Largest finite diameter of the elements, `Unbounded` if none has a finite one
    pub fn largest_diameter(&self) -> Diameter {
        self.iter()
            .filter_map(|e| e.diameter().finite())
            .fold(None, |largest: Option<f64>, d| {
                Some(largest.map_or(d, |l| l.max(d)))
            })
            .map_or(Diameter::Unbounded, Diameter::Finite)
    }

    pub fn has_finite_aperture(&self) -> bool {
        self.iter().any(|e| e.diameter().is_finite())
    }

    pub fn total_length(&self) -> f64 {
        self.iter().map(ElementMatrix::length).sum()
    }

    /// Axial position of the front plane of each element
    pub fn element_positions(&self) -> Vec<f64> {
        self.iter()
            .scan(0., |z, element| {
                let front = *z;
                *z += element.length();
                Some(front)
            })
            .collect()
    }

    /// Refractive index of the medium in front of element `index`
    fn index_at(&self, index: usize) -> f64 {
        match (self.elements.get(index), index.checked_sub(1)) {
            (Some(element), _) => element.front_index(),
            (None, Some(previous)) => self
                .elements
                .get(previous)
                .map_or(1., ElementMatrix::back_index),
            (None, None) => 1.,
        }
    }

    fn aggregate(&self, start: usize, end: usize) -> ElementMatrix {
        match self.elements[start..end].split_first() {
            Some((first, rest)) => rest
                .iter()
                .fold(first.clone(), |transfer, element| compose(&transfer, element)),
            None => ElementMatrix::identity_in(self.index_at(start)),
        }
    }
}

impl From<Vec<ElementMatrix>> for System {
    fn from(elements: Vec<ElementMatrix>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }
}

impl FromIterator<ElementMatrix> for System {
    fn from_iter<I: IntoIterator<Item = ElementMatrix>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'s> IntoIterator for &'s System {
    type Item = &'s ElementMatrix;
    type IntoIter = core::slice::Iter<'s, ElementMatrix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
