use crate::element::{compose, ElementMatrix};
use crate::system::System;
use serde::Serialize;

/// Distance to a conjugate plane, measured from the back plane of a matrix for a forward
/// conjugate and from its front plane (positive towards the source) for a backward one
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Conjugate {
    Finite(f64),
    Infinite,
}

impl Conjugate {
    pub fn distance(self) -> Option<f64> {
        match self {
            Conjugate::Finite(d) => Some(d),
            Conjugate::Infinite => None,
        }
    }

    pub fn is_infinite(self) -> bool {
        self == Conjugate::Infinite
    }
}

impl ElementMatrix {
    /// Distance `d` after the back plane where the front plane is imaged,
    /// i.e. the `B` element of `gap(d) · self` vanishes
    pub fn forward_conjugate(&self) -> Conjugate {
        if self.d() == 0. || self.c() == 0. {
            Conjugate::Infinite
        } else {
            Conjugate::Finite(-self.b() / self.d())
        }
    }

    /// Distance `d` before the front plane of the object that is imaged on the back plane,
    /// i.e. the `B` element of `self · gap(d)` vanishes
    pub fn backward_conjugate(&self) -> Conjugate {
        if self.a() == 0. || self.c() == 0. {
            Conjugate::Infinite
        } else {
            Conjugate::Finite(-self.b() / self.a())
        }
    }

    /// This matrix followed by the gap to its forward conjugate, an imaging matrix
    pub fn forward_conjugate_matrix(&self) -> Option<ElementMatrix> {
        let d = self.forward_conjugate().distance()?;
        Some(compose(
            self,
            &ElementMatrix::free_propagation(d, self.back_index()),
        ))
    }

    /// The gap from the backward conjugate followed by this matrix, an imaging matrix
    pub fn backward_conjugate_matrix(&self) -> Option<ElementMatrix> {
        let d = self.backward_conjugate().distance()?;
        Some(compose(
            &ElementMatrix::free_propagation(d, self.front_index()),
            self,
        ))
    }
}

impl System {
    pub fn forward_conjugate(&self) -> Conjugate {
        self.transfer_matrix().forward_conjugate()
    }

    pub fn backward_conjugate(&self) -> Conjugate {
        self.transfer_matrix().backward_conjugate()
    }

    pub fn forward_conjugate_matrix(&self) -> Option<ElementMatrix> {
        self.transfer_matrix().forward_conjugate_matrix()
    }

    pub fn backward_conjugate_matrix(&self) -> Option<ElementMatrix> {
        self.transfer_matrix().backward_conjugate_matrix()
    }
}
