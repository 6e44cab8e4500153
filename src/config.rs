use crate::beam::GaussianBeam;
use crate::element::{Diameter, ElementKind, ElementMatrix};
use crate::error::ConfigurationError;
use crate::system::System;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Error, From)]
pub enum ConfigError {
    #[display(fmt = "malformed system description: {}", _0)]
    Parse(toml::de::Error),
    #[display(fmt = "failed to write system description: {}", _0)]
    Write(toml::ser::Error),
    #[display(fmt = "invalid element: {}", _0)]
    Element(ConfigurationError),
}

/// Element of a system description, e.g.
///
/// ```toml
/// [[elements]]
/// kind = "thin_lens"
/// f = 4.0
/// clear_diameter = 0.8
/// label = "Objective"
/// ```
///
/// `diameter` is the parameter of an aperture, `clear_diameter` limits any other element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementConfig {
    #[serde(flatten)]
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ElementConfig {
    pub fn build(&self) -> Result<ElementMatrix, ConfigurationError> {
        let element = ElementMatrix::new(self.kind)?;
        let element = match self.clear_diameter {
            Some(diameter) => element.with_diameter(diameter)?,
            None => element,
        };
        Ok(match &self.label {
            Some(label) => element.with_label(label.as_str()),
            None => element,
        })
    }
}

impl From<&ElementMatrix> for ElementConfig {
    fn from(element: &ElementMatrix) -> Self {
        let clear_diameter = match element.diameter() {
            // Apertures carry their diameter in their kind
            Diameter::Finite(_) if matches!(element.kind(), ElementKind::Aperture { .. }) => None,
            diameter => diameter.finite(),
        };
        Self {
            kind: element.kind(),
            clear_diameter,
            label: element.label().map(String::from),
        }
    }
}

fn air() -> f64 {
    1.
}

/// Gaussian beam with its waist at `z`
#[derive(Constructor, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamConfig {
    pub waist: f64,
    pub wavelength: f64,
    #[serde(default = "air")]
    pub index: f64,
    #[serde(default)]
    pub z: f64,
}

impl BeamConfig {
    pub fn build(&self) -> Result<GaussianBeam, ConfigurationError> {
        GaussianBeam::from_waist(self.waist, self.wavelength, self.index).map(|b| b.with_z(self.z))
    }
}

/// Description of an optical system, as found in a TOML file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub elements: Vec<ElementConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beam: Option<BeamConfig>,
}

impl SystemConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Build the described system, the first invalid element fails the whole system
    pub fn build(&self) -> Result<System, ConfigError> {
        let mut system = match &self.label {
            Some(label) => System::with_label(label.as_str()),
            None => System::new(),
        };
        for element in self.elements.iter() {
            system.append(element.build()?);
        }
        Ok(system)
    }

    /// Build the described beam, if any
    pub fn build_beam(&self) -> Option<Result<GaussianBeam, ConfigurationError>> {
        self.beam.as_ref().map(BeamConfig::build)
    }
}

impl From<&System> for SystemConfig {
    fn from(system: &System) -> Self {
        Self {
            label: system.label().map(String::from),
            elements: system.iter().map(ElementConfig::from).collect(),
            beam: None,
        }
    }
}
