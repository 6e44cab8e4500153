use crate::element::{compose, Diameter, ElementMatrix};
use crate::ray::Ray;
use crate::system::System;
use crate::utils::Mat2;
use serde::Serialize;

/// Element limiting a bundle of rays, clipping at the back plane of the element
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stop {
    /// Position of the element in its system
    pub index: usize,
    /// Axial position of the clipping plane
    pub z: f64,
    pub diameter: f64,
}

/// Image of the aperture stop in object space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pupil {
    pub z: f64,
    pub diameter: f64,
}

/// Element with a finite diameter together with the transfer matrix from the entrance of
/// the system to its back plane
struct Clipping {
    index: usize,
    z: f64,
    diameter: f64,
    a: f64,
    b: f64,
}

impl Clipping {
    fn radius(&self) -> f64 {
        self.diameter * 0.5
    }

    fn stop(&self) -> Stop {
        Stop {
            index: self.index,
            z: self.z,
            diameter: self.diameter,
        }
    }
}

/// Smallest `radius / |height|` over the apertures that are not `stop`, for a ray reaching
/// `height(aperture)` at each of them
fn most_limiting<'a>(
    apertures: &'a [Clipping],
    stop: &Clipping,
    height: impl Fn(&Clipping) -> f64,
) -> Option<(&'a Clipping, f64)> {
    apertures
        .iter()
        .filter(|aperture| aperture.index != stop.index)
        .filter_map(|aperture| {
            let k = height(aperture).abs();
            (k > 0.).then(|| (aperture, aperture.radius() / k))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}

impl System {
    fn clipping_apertures(&self) -> Vec<Clipping> {
        self.iter()
            .enumerate()
            .scan(
                ElementMatrix::identity_in(self.elements().first().map_or(1., |e| e.front_index())),
                |transfer, (index, element)| {
                    *transfer = compose(transfer, element);
                    Some((index, transfer.clone(), element.diameter()))
                },
            )
            .filter_map(|(index, transfer, diameter)| {
                diameter.finite().map(|diameter| Clipping {
                    index,
                    z: transfer.length(),
                    diameter,
                    a: transfer.a(),
                    b: transfer.b(),
                })
            })
            .collect()
    }

    /// The aperture met furthest from its rim, relative to its radius, by the entrance
    /// ray `[y, theta]`, and the other apertures
    fn limiting_aperture(&self, ray: [f64; 2]) -> Option<(Clipping, Vec<Clipping>)> {
        let [y, theta] = ray;
        let mut apertures = self.clipping_apertures();
        let (position, ratio) = apertures
            .iter()
            .map(|aperture| (aperture.a * y + aperture.b * theta).abs() / aperture.radius())
            .enumerate()
            .fold((0, 0.), |(best, best_ratio), (i, ratio)| {
                if ratio > best_ratio {
                    (i, ratio)
                } else {
                    (best, best_ratio)
                }
            });
        if ratio > 0. {
            let stop = apertures.swap_remove(position);
            Some((stop, apertures))
        } else {
            None
        }
    }

    fn stop_and_apertures(&self) -> Option<(Clipping, Vec<Clipping>)> {
        self.limiting_aperture([0., 1.])
    }

    fn stop_and_apertures_at_infinity(&self) -> Option<(Clipping, Vec<Clipping>)> {
        self.limiting_aperture([1., 0.])
    }

    /// The aperture limiting the cone of rays accepted from the axial point of the
    /// entrance plane. `None` if no finite aperture is reached by that cone.
    pub fn aperture_stop(&self) -> Option<Stop> {
        let stop = self.stop_and_apertures().map(|(stop, _)| stop.stop());
        debug!("aperture stop: {:?}", stop);
        stop
    }

    /// The aperture limiting the width of a collimated beam parallel to the axis, for an
    /// object at infinity
    pub fn aperture_stop_at_infinity(&self) -> Option<Stop> {
        let stop = self
            .stop_and_apertures_at_infinity()
            .map(|(stop, _)| stop.stop());
        debug!("aperture stop for an object at infinity: {:?}", stop);
        stop
    }

    /// The two rays from height `y` at the entrance plane that graze the top and bottom
    /// of the aperture stop
    pub fn marginal_rays(&self, y: f64) -> Option<(Ray, Ray)> {
        let (stop, _) = self.stop_and_apertures()?;
        let mat = Mat2::new_from_rows([1., 0.], [stop.a, stop.b]);
        let [y_up, theta_up] = mat.solve([y, stop.radius()])?;
        let [y_down, theta_down] = mat.solve([y, -stop.radius()])?;
        Some((Ray::new(y_up, theta_up), Ray::new(y_down, theta_down)))
    }

    /// The two rays parallel to the axis, from an object at infinity, that graze the top
    /// and bottom of the aperture stop at infinity
    pub fn marginal_rays_at_infinity(&self) -> Option<(Ray, Ray)> {
        let (stop, _) = self.stop_and_apertures_at_infinity()?;
        let mat = Mat2::new_from_rows([0., 1.], [stop.a, stop.b]);
        let [y_up, theta_up] = mat.solve([0., stop.radius()])?;
        let [y_down, theta_down] = mat.solve([0., -stop.radius()])?;
        Some((Ray::new(y_up, theta_up), Ray::new(y_down, theta_down)))
    }

    /// Ray from height `y` at the entrance plane through the centre of the aperture stop.
    /// Without a height, the ray from the edge of the field of view.
    pub fn chief_ray(&self, y: Option<f64>) -> Option<Ray> {
        let (stop, apertures) = self.stop_and_apertures()?;
        let y = match y {
            Some(y) => y,
            None => Self::half_field(&stop, &apertures)?.1,
        };
        let mat = Mat2::new_from_rows([1., 0.], [stop.a, stop.b]);
        let [y, theta] = mat.solve([y, 0.])?;
        Some(Ray::new(y, theta))
    }

    fn half_field<'a>(stop: &Clipping, apertures: &'a [Clipping]) -> Option<(&'a Clipping, f64)> {
        if stop.b == 0. {
            return None;
        }
        let slope = -stop.a / stop.b;
        most_limiting(apertures, stop, |aperture| aperture.a + aperture.b * slope)
    }

    /// The aperture limiting the height of the chief ray at the entrance plane
    pub fn field_stop(&self) -> Option<Stop> {
        let (stop, apertures) = self.stop_and_apertures()?;
        Self::half_field(&stop, &apertures).map(|(field_stop, _)| field_stop.stop())
    }

    /// Full height of the object field at the entrance plane seen through the aperture
    /// stop, `Unbounded` without a field stop
    pub fn field_of_view(&self) -> Diameter {
        self.stop_and_apertures()
            .and_then(|(stop, apertures)| {
                Self::half_field(&stop, &apertures).map(|(_, half)| half)
            })
            .map_or(Diameter::Unbounded, |half| Diameter::Finite(2. * half))
    }

    /// Full angle of the field for an object at infinity, seen through the aperture stop
    /// at infinity. `None` without such a stop.
    pub fn angular_field_of_view(&self) -> Option<Diameter> {
        let (stop, apertures) = self.stop_and_apertures_at_infinity()?;
        // Entrance height of the chief ray per unit angle, `A` is nonzero at this stop
        let height = -stop.b / stop.a;
        Some(
            most_limiting(&apertures, &stop, |aperture| {
                aperture.a * height + aperture.b
            })
            .map_or(Diameter::Unbounded, |(_, half)| Diameter::Finite(2. * half)),
        )
    }

    /// Image of the aperture stop through the elements before it, `z` is measured from
    /// the entrance plane
    pub fn entrance_pupil(&self) -> Option<Pupil> {
        let (stop, _) = self.stop_and_apertures()?;
        if stop.a == 0. {
            return None;
        }
        Some(Pupil {
            z: stop.b / stop.a,
            diameter: stop.diameter / stop.a.abs(),
        })
    }

    /// Optical invariant of the marginal ray from the axis and the chief ray from the
    /// edge of the field
    pub fn lagrange_invariant(&self) -> Option<f64> {
        let (marginal, _) = self.marginal_rays(0.)?;
        let chief = self.chief_ray(None)?;
        let n = self.elements().first()?.front_index();
        Some(marginal.lagrange_invariant(&chief, n))
    }
}
