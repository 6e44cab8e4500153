//! Paraxial optics with ray transfer (ABCD) matrices.
//!
//! Optical elements are composed into a [`System`], through which geometric [`Ray`]s
//! and coherent [`GaussianBeam`]s are propagated. Conjugate planes, stops, pupils and
//! the field of view of a system are solved in closed form.
#![allow(clippy::many_single_char_names)]

#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate log;

mod beam;
mod config;
mod conjugate;
mod element;
mod error;
mod field;
mod ray;
mod resonator;
mod system;
mod utils;

pub use crate::beam::{GaussianBeam, WavefrontRadius};
pub use crate::config::{BeamConfig, ConfigError, ElementConfig, SystemConfig};
pub use crate::conjugate::Conjugate;
pub use crate::element::{compose, Diameter, ElementKind, ElementMatrix};
pub use crate::error::ConfigurationError;
pub use crate::field::{Pupil, Stop};
pub use crate::ray::Ray;
pub use crate::system::System;
pub use crate::utils::Mat2;
