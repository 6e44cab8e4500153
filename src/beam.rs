use crate::element::ElementMatrix;
use crate::error::{check_index, ConfigurationError};
use crate::system::System;
use float_eq::float_eq;
use num_complex::Complex64;
use num_traits::Zero;
use serde::Serialize;
use std::f64::consts::PI;

/// Radius of curvature of a gaussian beam wavefront
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum WavefrontRadius {
    Finite(f64),
    /// Flat wavefront, at a waist
    Planar,
    /// The beam parameter is degenerate
    Undefined,
}

/// Coherent gaussian beam described by its complex beam parameter
/// `q = (z − z_waist) + i·z_R`, with `1/q = 1/R − i·λ/(π·n·w²)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaussianBeam {
    /// `None` once a transfer matrix maps the beam onto `C·q + D = 0`
    q: Option<Complex64>,
    /// Vacuum wavelength
    wavelength: f64,
    /// Refractive index of the current medium
    n: f64,
    z: f64,
    exceeds_aperture: bool,
}

fn check_wavelength(wavelength: f64) -> Result<f64, ConfigurationError> {
    if wavelength.is_finite() && wavelength > 0. {
        Ok(wavelength)
    } else {
        Err(ConfigurationError::InvalidWavelength { wavelength })
    }
}

impl GaussianBeam {
    /// Beam from its complex beam parameter at `z = 0`
    pub fn from_q(q: Complex64, wavelength: f64, n: f64) -> Result<Self, ConfigurationError> {
        let wavelength = check_wavelength(wavelength)?;
        let n = check_index(n)?;
        if !(q.is_finite() && q.im > 0.) {
            return Err(ConfigurationError::InvalidBeamParameter { q });
        }
        Ok(Self {
            q: Some(q),
            wavelength,
            n,
            z: 0.,
            exceeds_aperture: false,
        })
    }

    /// Beam with its waist `w0` at `z = 0`
    pub fn from_waist(w0: f64, wavelength: f64, n: f64) -> Result<Self, ConfigurationError> {
        if !(w0.is_finite() && w0 > 0.) {
            return Err(ConfigurationError::InvalidBeamRadius { radius: w0 });
        }
        let wavelength = check_wavelength(wavelength)?;
        let n = check_index(n)?;
        let rayleigh_range = PI * w0 * w0 * n / wavelength;
        Self::from_q(Complex64::new(0., rayleigh_range), wavelength, n)
    }

    /// Beam of radius `w` and wavefront radius of curvature `r` at `z = 0`,
    /// `r = ±∞` for a waist
    pub fn new(w: f64, r: f64, wavelength: f64, n: f64) -> Result<Self, ConfigurationError> {
        if !(w.is_finite() && w > 0.) {
            return Err(ConfigurationError::InvalidBeamRadius { radius: w });
        }
        if r.is_nan() || r == 0. {
            return Err(ConfigurationError::InvalidRadius);
        }
        let wavelength = check_wavelength(wavelength)?;
        let n = check_index(n)?;
        let inv_q = Complex64::new(r.recip(), -wavelength / (PI * n * w * w));
        Self::from_q(inv_q.inv(), wavelength, n)
    }

    pub fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }

    pub fn q(&self) -> Option<Complex64> {
        self.q
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    pub fn index(&self) -> f64 {
        self.n
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Was the beam wider than the clear aperture of the last element it went through
    pub fn exceeds_aperture(&self) -> bool {
        self.exceeds_aperture
    }

    pub fn is_degenerate(&self) -> bool {
        self.q.is_none()
    }

    pub fn is_finite(&self) -> bool {
        self.q.map_or(false, |q| q.is_finite() && q.im > 0.)
    }

    /// 1/e² intensity radius, infinite for a degenerate beam
    pub fn w(&self) -> f64 {
        match self.q {
            Some(q) => (-self.wavelength / (PI * self.n * q.inv().im)).sqrt(),
            None => f64::INFINITY,
        }
    }

    pub fn radius_of_curvature(&self) -> WavefrontRadius {
        match self.q {
            Some(q) => {
                let curvature = q.inv().re;
                if curvature == 0. {
                    WavefrontRadius::Planar
                } else {
                    WavefrontRadius::Finite(curvature.recip())
                }
            }
            None => WavefrontRadius::Undefined,
        }
    }

    pub fn rayleigh_range(&self) -> Option<f64> {
        self.q.map(|q| q.im)
    }

    /// Radius at the waist of the beam
    pub fn waist(&self) -> Option<f64> {
        self.rayleigh_range()
            .map(|z_r| (z_r * self.wavelength / (PI * self.n)).sqrt())
    }

    /// Absolute axial position of the waist, may lie before or after `z`
    pub fn waist_position(&self) -> Option<f64> {
        self.q.map(|q| self.z - q.re)
    }

    /// Propagate the beam through a single element.
    ///
    /// The beam is never blocked, `exceeds_aperture` reports whether it was wider than
    /// the clear aperture of `element` at its back plane.
    pub fn propagate(&self, element: &ElementMatrix) -> Self {
        if !float_eq!(self.n, element.front_index(), rmax <= 1e-12) {
            warn!(
                "beam in a medium of index {} enters an element expecting {}",
                self.n,
                element.front_index()
            );
        }
        let q = self.q.and_then(|q| {
            let denominator = element.c() * q + element.d();
            if denominator.is_zero() {
                return None;
            }
            Some((element.a() * q + element.b()) / denominator).filter(|q| q.is_finite())
        });
        let mut beam = Self {
            q,
            n: element.back_index(),
            z: self.z + element.length(),
            ..*self
        };
        beam.exceeds_aperture = match element.diameter().finite() {
            Some(diameter) => 2. * beam.w() > diameter,
            None => false,
        };
        if beam.exceeds_aperture {
            warn!(
                "beam of radius {} exceeds the aperture at z = {}",
                beam.w(),
                beam.z
            );
        }
        trace!("beam at z = {}: q = {:?}", beam.z, beam.q);
        beam
    }

    /// The beam at the entrance plane followed by the beam after every element
    pub fn trace(self, system: &System) -> Vec<GaussianBeam> {
        core::iter::once(self)
            .chain(system.iter().scan(self, |beam, element| {
                *beam = beam.propagate(element);
                Some(*beam)
            }))
            .collect()
    }

    /// The beam at physical distance `z` past the entrance of `system`, possibly inside
    /// an element. `None` if that element cannot be cut at `z`.
    pub fn at(&self, system: &System, z: f64) -> Option<Self> {
        let mut beam = *self;
        let mut position = 0.;
        for element in system {
            if position + element.length() <= z {
                beam = beam.propagate(element);
                position += element.length();
            } else {
                return Some(beam.propagate(&element.partial(z - position)?));
            }
        }
        Some(beam)
    }
}
