use crate::error::{check_diameter, check_index, check_length, ConfigurationError};
use float_eq::float_eq;
use serde::{Deserialize, Serialize};

/// Relative tolerance of the `A·D − B·C = n_front / n_back` check on user matrices
const DETERMINANT_TOLERANCE: f64 = 1e-9;
/// Below this |B| a matrix is considered to image its front plane onto its back plane
const IMAGING_TOLERANCE: f64 = 1e-9;
const RIM_TOLERANCE: f64 = 1e-12;

/// Clear diameter of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Diameter {
    Finite(f64),
    Unbounded,
}

impl Diameter {
    pub fn finite(self) -> Option<f64> {
        match self {
            Diameter::Finite(d) => Some(d),
            Diameter::Unbounded => None,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Diameter::Finite(_))
    }

    /// Is a ray at height `y` outside of the clear aperture.
    /// Rays grazing the rim within rounding error pass.
    pub fn clips(self, y: f64) -> bool {
        match self {
            Diameter::Finite(d) => {
                let radius = d * 0.5;
                y.abs() > radius && !float_eq!(y.abs(), radius, rmax <= RIM_TOLERANCE)
            }
            Diameter::Unbounded => false,
        }
    }
}

impl Default for Diameter {
    fn default() -> Self {
        Diameter::Unbounded
    }
}

/// The closed set of optical elements, with the physical parameters they are built from.
///
/// Radii of curvature are positive when the centre of curvature lies after the surface.
/// A radius of `0` or `±∞` is a flat surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    /// Free space of physical length `d` in a medium of index `n`
    Space {
        d: f64,
        #[serde(default = "air")]
        n: f64,
    },
    /// Thin lens of focal length `f` in air
    ThinLens { f: f64 },
    /// Curved boundary between media of index `n1` and `n2`
    DielectricInterface { r: f64, n1: f64, n2: f64 },
    /// Lens of index `n` in air with surfaces `r1`, `r2` separated by `thickness`
    ThickLens {
        r1: f64,
        r2: f64,
        n: f64,
        thickness: f64,
    },
    /// Parallel plate of index `n` in air
    DielectricSlab { n: f64, thickness: f64 },
    /// Clipping stop, never changes the ray
    Aperture { diameter: f64 },
    /// Spherical mirror, unfolded along the axis
    CurvedMirror { r: f64 },
    /// Arbitrary ray transfer matrix, also the kind of any composed matrix
    Matrix {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        length: f64,
        front_index: f64,
        back_index: f64,
    },
}

/// Ray transfer matrix of an optical element together with its physical extent.
///
/// Rays are described by their physical height `y` and physical angle `θ` in the
/// medium they travel in, so the matrix of a free-space gap stores its physical
/// length and `A·D − B·C = front_index / back_index` for every element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementMatrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    /// Physical length along the optical axis
    length: f64,
    diameter: Diameter,
    front_index: f64,
    back_index: f64,
    label: Option<String>,
    kind: ElementKind,
}

fn air() -> f64 {
    1.
}

fn surface_power(r: f64, n1: f64, n2: f64) -> Result<f64, ConfigurationError> {
    if r.is_nan() {
        Err(ConfigurationError::InvalidRadius)
    } else if r == 0. || r.is_infinite() {
        Ok(0.)
    } else {
        Ok((n1 - n2) / (r * n2))
    }
}

impl ElementMatrix {
    /// Map an element kind to its transfer matrix
    ///
    /// # Arguments
    ///  * `kind` - the element and its physical parameters
    pub fn new(kind: ElementKind) -> Result<Self, ConfigurationError> {
        match kind {
            ElementKind::Space { d, n } => {
                let d = check_length(d)?;
                let n = check_index(n)?;
                Ok(Self::from_parts([1., d, 0., 1.], d, n, n, kind))
            }
            ElementKind::ThinLens { f } => {
                if f.is_nan() {
                    return Err(ConfigurationError::InvalidFocalLength);
                } else if f == 0. {
                    return Err(ConfigurationError::ZeroFocalLength);
                }
                Ok(Self::from_parts([1., 0., -1. / f, 1.], 0., 1., 1., kind))
            }
            ElementKind::DielectricInterface { r, n1, n2 } => {
                let n1 = check_index(n1)?;
                let n2 = check_index(n2)?;
                let c = surface_power(r, n1, n2)?;
                Ok(Self::from_parts([1., 0., c, n1 / n2], 0., n1, n2, kind))
            }
            ElementKind::ThickLens {
                r1,
                r2,
                n,
                thickness,
            } => {
                let front = Self::dielectric_interface(r1, 1., n)?;
                let bulk = Self::space(thickness, n)?;
                let back = Self::dielectric_interface(r2, n, 1.)?;
                Ok(compose(&compose(&front, &bulk), &back).with_kind(kind))
            }
            ElementKind::DielectricSlab { n, thickness } => {
                let front = Self::dielectric_interface(0., 1., n)?;
                let bulk = Self::space(thickness, n)?;
                let back = Self::dielectric_interface(0., n, 1.)?;
                Ok(compose(&compose(&front, &bulk), &back).with_kind(kind))
            }
            ElementKind::Aperture { diameter } => {
                let diameter = check_diameter(diameter)?;
                let mut aperture = Self::from_parts([1., 0., 0., 1.], 0., 1., 1., kind);
                aperture.diameter = Diameter::Finite(diameter);
                Ok(aperture)
            }
            ElementKind::CurvedMirror { r } => {
                let c = if r.is_nan() {
                    return Err(ConfigurationError::InvalidRadius);
                } else if r == 0. || r.is_infinite() {
                    0.
                } else {
                    -2. / r
                };
                Ok(Self::from_parts([1., 0., c, 1.], 0., 1., 1., kind))
            }
            ElementKind::Matrix {
                a,
                b,
                c,
                d,
                length,
                front_index,
                back_index,
            } => {
                if !(length.is_finite() && length >= 0.) {
                    return Err(ConfigurationError::InvalidLength { length });
                }
                let front_index = check_index(front_index)?;
                let back_index = check_index(back_index)?;
                let determinant = a * d - b * c;
                let expected = front_index / back_index;
                if !float_eq!(determinant, expected, rmax <= DETERMINANT_TOLERANCE) {
                    return Err(ConfigurationError::InconsistentIndices {
                        determinant,
                        expected,
                    });
                }
                Ok(Self::from_parts(
                    [a, b, c, d],
                    length,
                    front_index,
                    back_index,
                    kind,
                ))
            }
        }
    }

    /// Free space of physical length `d` in a medium of index `n`
    ///
    /// `B` is the physical length `d`, not the reduced length `d/n`, as rays carry their
    /// physical angle in the current medium. `n` only sets both indices.
    pub fn space(d: f64, n: f64) -> Result<Self, ConfigurationError> {
        Self::new(ElementKind::Space { d, n })
    }

    /// Thin lens of focal length `f`, positive for a converging lens
    pub fn thin_lens(f: f64) -> Result<Self, ConfigurationError> {
        Self::new(ElementKind::ThinLens { f })
    }

    pub fn dielectric_interface(r: f64, n1: f64, n2: f64) -> Result<Self, ConfigurationError> {
        Self::new(ElementKind::DielectricInterface { r, n1, n2 })
    }

    pub fn thick_lens(r1: f64, r2: f64, n: f64, thickness: f64) -> Result<Self, ConfigurationError> {
        Self::new(ElementKind::ThickLens {
            r1,
            r2,
            n,
            thickness,
        })
    }

    pub fn dielectric_slab(n: f64, thickness: f64) -> Result<Self, ConfigurationError> {
        Self::new(ElementKind::DielectricSlab { n, thickness })
    }

    pub fn aperture(diameter: f64) -> Result<Self, ConfigurationError> {
        Self::new(ElementKind::Aperture { diameter })
    }

    pub fn curved_mirror(r: f64) -> Result<Self, ConfigurationError> {
        Self::new(ElementKind::CurvedMirror { r })
    }

    /// An arbitrary transfer matrix, its determinant must equal `front_index / back_index`
    pub fn matrix(
        abcd: [f64; 4],
        length: f64,
        front_index: f64,
        back_index: f64,
    ) -> Result<Self, ConfigurationError> {
        let [a, b, c, d] = abcd;
        Self::new(ElementKind::Matrix {
            a,
            b,
            c,
            d,
            length,
            front_index,
            back_index,
        })
    }

    /// The identity in air, the transfer matrix of an empty system
    pub fn identity() -> Self {
        Self::identity_in(1.)
    }

    pub(crate) fn identity_in(n: f64) -> Self {
        Self::from_parts([1., 0., 0., 1.], 0., n, n, ElementKind::Space { d: 0., n })
    }

    /// Free propagation over any signed distance, for virtual conjugate planes
    pub(crate) fn free_propagation(d: f64, n: f64) -> Self {
        Self::from_parts([1., d, 0., 1.], d.abs(), n, n, ElementKind::Space { d, n })
    }

    fn from_parts(
        abcd: [f64; 4],
        length: f64,
        front_index: f64,
        back_index: f64,
        kind: ElementKind,
    ) -> Self {
        let [a, b, c, d] = abcd;
        Self {
            a,
            b,
            c,
            d,
            length,
            diameter: Diameter::Unbounded,
            front_index,
            back_index,
            label: None,
            kind,
        }
    }

    fn with_kind(mut self, kind: ElementKind) -> Self {
        self.kind = kind;
        self
    }

    /// Restrict the element to a finite clear diameter
    pub fn with_diameter(mut self, diameter: f64) -> Result<Self, ConfigurationError> {
        self.diameter = Diameter::Finite(check_diameter(diameter)?);
        Ok(self)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    pub fn abcd(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn diameter(&self) -> Diameter {
        self.diameter
    }

    pub fn front_index(&self) -> f64 {
        self.front_index
    }

    pub fn back_index(&self) -> f64 {
        self.back_index
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Does the element converge or diverge light
    pub fn has_power(&self) -> bool {
        self.c != 0.
    }

    /// Is the back plane an image of the front plane (B = 0)
    pub fn is_imaging(&self) -> bool {
        float_eq!(self.b, 0., abs <= IMAGING_TOLERANCE)
    }

    /// Transverse and angular magnification, only defined for imaging matrices
    pub fn magnification(&self) -> Option<(f64, f64)> {
        self.is_imaging().then(|| (self.a, self.d))
    }

    /// Front and back effective focal lengths, `None` for an afocal matrix
    pub fn effective_focal_lengths(&self) -> Option<(f64, f64)> {
        if self.c == 0. {
            return None;
        }
        let back = -1. / self.c;
        Some((back * self.front_index / self.back_index, back))
    }

    /// Axial positions of the front and back principal planes, for an element whose
    /// front plane sits at `z`
    pub fn principal_planes(&self, z: f64) -> Option<(f64, f64)> {
        if self.c == 0. {
            return None;
        }
        let ratio = self.front_index / self.back_index;
        Some((
            z + (self.d - ratio) / self.c,
            z + self.length + (1. - self.a) / self.c,
        ))
    }

    /// Axial positions of the front and back focal points, for an element whose
    /// front plane sits at `z`
    pub fn focal_points(&self, z: f64) -> Option<(f64, f64)> {
        if self.c == 0. {
            return None;
        }
        Some((z + self.d / self.c, z + self.length - self.a / self.c))
    }

    /// The element truncated after the physical distance `up_to` from its front plane.
    /// Returns `None` when the element cannot be split at that distance.
    pub fn partial(&self, up_to: f64) -> Option<ElementMatrix> {
        if up_to >= self.length {
            return Some(self.clone());
        }
        if up_to <= 0. {
            return Some(Self::identity_in(self.front_index));
        }
        let partial = match self.kind {
            ElementKind::Space { n, .. } => Self::free_propagation(up_to, n),
            ElementKind::ThickLens { r1, n, .. } => {
                let front = Self::dielectric_interface(r1, 1., n).ok()?;
                compose(&front, &Self::free_propagation(up_to, n))
            }
            ElementKind::DielectricSlab { n, .. } => {
                let front = Self::dielectric_interface(0., 1., n).ok()?;
                compose(&front, &Self::free_propagation(up_to, n))
            }
            _ => return None,
        };
        Some(Self {
            diameter: self.diameter,
            label: self.label.clone(),
            ..partial
        })
    }
}

/// Compose two elements into a single equivalent element.
///
/// `first` is the element met first by the light and `second` the one after it,
/// the resulting matrix is the product `second · first`. The composite spans both
/// lengths, enters through `first`'s medium and exits into `second`'s. Clear
/// apertures are not carried over, a [`crate::System`] clips at each element instead.
pub fn compose(first: &ElementMatrix, second: &ElementMatrix) -> ElementMatrix {
    let a = second.a * first.a + second.b * first.c;
    let b = second.a * first.b + second.b * first.d;
    let c = second.c * first.a + second.d * first.c;
    let d = second.c * first.b + second.d * first.d;
    let length = first.length + second.length;
    let front_index = first.front_index;
    let back_index = second.back_index;
    ElementMatrix::from_parts(
        [a, b, c, d],
        length,
        front_index,
        back_index,
        ElementKind::Matrix {
            a,
            b,
            c,
            d,
            length,
            front_index,
            back_index,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ray::Ray;
    use float_eq::assert_float_eq;
    use rand::prelude::*;

    fn assert_invariant(m: &ElementMatrix) {
        assert_float_eq!(
            m.determinant(),
            m.front_index() / m.back_index(),
            rmax <= 1e-12
        );
    }

    fn random_sign(rng: &mut impl Rng) -> f64 {
        if rng.gen() {
            1.
        } else {
            -1.
        }
    }

    fn random_element(rng: &mut impl Rng) -> ElementMatrix {
        match rng.gen_range(0..6) {
            0 => ElementMatrix::space(rng.gen_range(0.1..50.), 1.).unwrap(),
            1 => ElementMatrix::thin_lens(random_sign(rng) * rng.gen_range(5.0..50.0)).unwrap(),
            2 => ElementMatrix::thick_lens(
                rng.gen_range(5.0..40.0),
                -rng.gen_range(5.0..40.0),
                rng.gen_range(1.3..1.9),
                rng.gen_range(0.5..5.0),
            )
            .unwrap(),
            3 => ElementMatrix::dielectric_slab(rng.gen_range(1.3..1.9), rng.gen_range(0.5..5.0))
                .unwrap(),
            4 => {
                ElementMatrix::curved_mirror(random_sign(rng) * rng.gen_range(20.0..100.0)).unwrap()
            }
            _ => ElementMatrix::aperture(rng.gen_range(1.0..10.0)).unwrap(),
        }
    }

    #[test]
    fn every_constructor_conserves_etendue() {
        let elements = [
            ElementMatrix::space(10., 1.).unwrap(),
            ElementMatrix::space(3., 1.33).unwrap(),
            ElementMatrix::thin_lens(5.).unwrap(),
            ElementMatrix::thin_lens(-12.5).unwrap(),
            ElementMatrix::dielectric_interface(20., 1., 1.5).unwrap(),
            ElementMatrix::dielectric_interface(-8., 1.55, 1.).unwrap(),
            ElementMatrix::dielectric_interface(0., 1., 1.5).unwrap(),
            ElementMatrix::thick_lens(-20., 20., 1.55, 10.).unwrap(),
            ElementMatrix::dielectric_slab(1.5, 4.).unwrap(),
            ElementMatrix::aperture(3.).unwrap(),
            ElementMatrix::curved_mirror(50.).unwrap(),
            ElementMatrix::matrix([2., 3., 0.5, 1.25], 4., 1.5, 1.5).unwrap(),
        ];
        for m in elements.iter() {
            assert_invariant(m);
        }
        assert_float_eq!(elements[4].determinant(), 1. / 1.5, rmax <= 1e-12);
    }

    #[test]
    fn composition_is_associative() {
        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(123456);
        for _ in 0..200 {
            let x = random_element(&mut rng);
            let y = random_element(&mut rng);
            let z = random_element(&mut rng);
            let left = compose(&compose(&x, &y), &z);
            let right = compose(&x, &compose(&y, &z));
            assert_float_eq!(left.abcd(), right.abcd(), abs_all <= 1e-9);
            assert_float_eq!(left.length(), right.length(), abs <= 1e-12);
            assert_invariant(&left);
        }
    }

    #[test]
    fn consecutive_gaps_add_up() {
        let gap = compose(
            &ElementMatrix::space(4., 1.5).unwrap(),
            &ElementMatrix::space(6., 1.5).unwrap(),
        );
        let single = ElementMatrix::space(10., 1.5).unwrap();
        assert_float_eq!(gap.abcd(), single.abcd(), abs_all <= 1e-12);
        assert_eq!(gap.length(), single.length());
        assert_eq!(gap.front_index(), 1.5);
        assert_eq!(gap.back_index(), 1.5);
    }

    #[test]
    fn compose_applies_first_element_first() {
        let gap = ElementMatrix::space(10., 1.).unwrap();
        let lens = ElementMatrix::thin_lens(5.).unwrap();
        let gap_then_lens = compose(&gap, &lens);
        let lens_then_gap = compose(&lens, &gap);
        assert_float_eq!(gap_then_lens.abcd(), [1., 10., -0.2, -1.], abs_all <= 1e-12);
        assert_float_eq!(lens_then_gap.abcd(), [-1., 10., -0.2, 1.], abs_all <= 1e-12);
    }

    #[test]
    fn thick_lens_matches_lensmaker_equation() {
        let (r1, r2, n, t) = (10., -10., 1.5, 2.);
        let lens = ElementMatrix::thick_lens(r1, r2, n, t).unwrap();
        let power = (n - 1.) * (1. / r1 - 1. / r2 + (n - 1.) * t / (n * r1 * r2));
        assert_float_eq!(lens.c(), -power, rmax <= 1e-12);
        assert_float_eq!(lens.b(), t / n, rmax <= 1e-12);
        assert_eq!(lens.length(), t);
        assert_eq!(lens.kind(), ElementKind::ThickLens { r1, r2, n, thickness: t });
        let (front, back) = lens.effective_focal_lengths().unwrap();
        assert_float_eq!(front, 1. / power, rmax <= 1e-12);
        assert_float_eq!(back, 1. / power, rmax <= 1e-12);
    }

    #[test]
    fn slab_shifts_focus_without_power() {
        let slab = ElementMatrix::dielectric_slab(1.5, 3.).unwrap();
        assert!(!slab.has_power());
        assert_float_eq!(slab.abcd(), [1., 2., 0., 1.], abs_all <= 1e-12);
    }

    #[test]
    fn flat_interface_only_scales_angles() {
        for r in [0., f64::INFINITY, f64::NEG_INFINITY] {
            let m = ElementMatrix::dielectric_interface(r, 1., 1.5).unwrap();
            assert_eq!(m.c(), 0.);
            assert_float_eq!(m.d(), 1. / 1.5, rmax <= 1e-15);
        }
    }

    #[test]
    fn interface_focal_lengths_follow_media() {
        let m = ElementMatrix::dielectric_interface(10., 1., 1.5).unwrap();
        let (front, back) = m.effective_focal_lengths().unwrap();
        assert_float_eq!(back, 30., rmax <= 1e-12);
        assert_float_eq!(front, 20., rmax <= 1e-12);
    }

    #[test]
    fn thin_lens_cardinal_points() {
        let lens = ElementMatrix::thin_lens(5.).unwrap();
        assert_eq!(lens.principal_planes(2.), Some((2., 2.)));
        let (front, back) = lens.focal_points(2.).unwrap();
        assert_float_eq!(front, -3., abs <= 1e-12);
        assert_float_eq!(back, 7., abs <= 1e-12);
        assert!(ElementMatrix::space(5., 1.).unwrap().focal_points(0.).is_none());
    }

    #[test]
    fn invalid_parameters_are_rejected_at_construction() {
        assert_eq!(
            ElementMatrix::space(0., 1.),
            Err(ConfigurationError::InvalidLength { length: 0. })
        );
        assert_eq!(
            ElementMatrix::space(-2., 1.),
            Err(ConfigurationError::InvalidLength { length: -2. })
        );
        assert_eq!(
            ElementMatrix::thin_lens(0.),
            Err(ConfigurationError::ZeroFocalLength)
        );
        assert_eq!(
            ElementMatrix::thin_lens(f64::NAN),
            Err(ConfigurationError::InvalidFocalLength)
        );
        assert_eq!(
            ElementMatrix::dielectric_interface(10., 0., 1.5),
            Err(ConfigurationError::InvalidIndex { index: 0. })
        );
        assert_eq!(
            ElementMatrix::thick_lens(10., -10., 1.5, 0.),
            Err(ConfigurationError::InvalidLength { length: 0. })
        );
        assert_eq!(
            ElementMatrix::aperture(0.),
            Err(ConfigurationError::InvalidDiameter { diameter: 0. })
        );
        assert!(ElementMatrix::thin_lens(5.).unwrap().with_diameter(-1.).is_err());
        assert!(matches!(
            ElementMatrix::matrix([1., 0., 0., 1.], 0., 1., 1.5),
            Err(ConfigurationError::InconsistentIndices { .. })
        ));
        assert!(ElementMatrix::matrix([1., 0., 0., 1.], -1., 1., 1.).is_err());
    }

    #[test]
    fn aperture_is_identity_with_a_diameter() {
        let aperture = ElementMatrix::aperture(3.).unwrap().with_label("Stop");
        assert_eq!(aperture.abcd(), [1., 0., 0., 1.]);
        assert_eq!(aperture.length(), 0.);
        assert_eq!(aperture.diameter(), Diameter::Finite(3.));
        assert_eq!(aperture.label(), Some("Stop"));
        assert!(aperture.diameter().clips(1.6));
        assert!(!aperture.diameter().clips(-1.5));
    }

    #[test]
    fn space_keeps_the_physical_length_in_any_medium() {
        let water = ElementMatrix::space(3., 1.33).unwrap();
        assert_eq!(water.abcd(), [1., 3., 0., 1.]);
        assert_eq!(water.length(), 3.);
        assert_eq!((water.front_index(), water.back_index()), (1.33, 1.33));
        let ray = Ray::new(1., 0.1).propagate(&water);
        assert_float_eq!(ray.y, 1.3, abs <= 1e-12);
    }

    #[test]
    fn partial_space_is_a_shorter_space() {
        let gap = ElementMatrix::space(10., 1.)
            .unwrap()
            .with_diameter(4.)
            .unwrap();
        let part = gap.partial(2.5).unwrap();
        assert_eq!(part.abcd(), [1., 2.5, 0., 1.]);
        assert_eq!(part.length(), 2.5);
        assert_eq!(part.diameter(), Diameter::Finite(4.));
        assert_eq!(gap.partial(12.).unwrap(), gap);
        let lens = ElementMatrix::thick_lens(10., -10., 1.5, 2.).unwrap();
        let inside = lens.partial(1.).unwrap();
        assert_eq!(inside.back_index(), 1.5);
        assert_invariant(&inside);
        let custom = ElementMatrix::matrix([1., 2., 0., 1.], 2., 1., 1.).unwrap();
        assert!(custom.partial(1.).is_none());
    }

    #[test]
    fn imaging_matrix_reports_magnification() {
        let m = compose(
            &compose(
                &ElementMatrix::space(10., 1.).unwrap(),
                &ElementMatrix::thin_lens(5.).unwrap(),
            ),
            &ElementMatrix::space(10., 1.).unwrap(),
        );
        assert!(m.is_imaging());
        let (transverse, angular) = m.magnification().unwrap();
        assert_float_eq!(transverse, -1., abs <= 1e-12);
        assert_float_eq!(angular, -1., abs <= 1e-12);
        assert_eq!(ElementMatrix::space(1., 1.).unwrap().magnification(), None);
    }
}
