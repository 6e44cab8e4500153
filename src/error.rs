use num_complex::Complex64;

/// Invalid physical parameters, reported when an element or beam is built
#[derive(Debug, Display, Error, Clone, Copy, PartialEq)]
pub enum ConfigurationError {
    #[display(fmt = "length must be finite and positive, got {}", length)]
    InvalidLength { length: f64 },
    #[display(fmt = "focal length must be nonzero")]
    ZeroFocalLength,
    #[display(fmt = "focal length must not be NaN")]
    InvalidFocalLength,
    #[display(fmt = "radius of curvature must not be NaN")]
    InvalidRadius,
    #[display(fmt = "refractive index must be finite and positive, got {}", index)]
    InvalidIndex { index: f64 },
    #[display(fmt = "aperture diameter must be finite and positive, got {}", diameter)]
    InvalidDiameter { diameter: f64 },
    #[display(
        fmt = "determinant {} is inconsistent with the index ratio {}",
        determinant,
        expected
    )]
    InconsistentIndices { determinant: f64, expected: f64 },
    #[display(fmt = "wavelength must be finite and positive, got {}", wavelength)]
    InvalidWavelength { wavelength: f64 },
    #[display(fmt = "beam radius must be finite and positive, got {}", radius)]
    InvalidBeamRadius { radius: f64 },
    #[display(fmt = "q = {} does not describe a finite gaussian beam", q)]
    InvalidBeamParameter { q: Complex64 },
}

pub(crate) fn check_length(length: f64) -> Result<f64, ConfigurationError> {
    if length.is_finite() && length > 0. {
        Ok(length)
    } else {
        Err(ConfigurationError::InvalidLength { length })
    }
}

pub(crate) fn check_index(index: f64) -> Result<f64, ConfigurationError> {
    if index.is_finite() && index > 0. {
        Ok(index)
    } else {
        Err(ConfigurationError::InvalidIndex { index })
    }
}

pub(crate) fn check_diameter(diameter: f64) -> Result<f64, ConfigurationError> {
    if diameter.is_finite() && diameter > 0. {
        Ok(diameter)
    } else {
        Err(ConfigurationError::InvalidDiameter { diameter })
    }
}
