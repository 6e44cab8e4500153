use crate::element::ElementMatrix;
use crate::system::System;
use serde::Serialize;

/// Paraxial ray: height `y` and angle `theta` in the current medium at the axial
/// position `z`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ray {
    pub y: f64,
    pub theta: f64,
    pub z: f64,
    /// Has the ray been stopped by the clear aperture of an element
    pub blocked: bool,
}

impl Ray {
    /// Ray entering at the front plane of a system (`z = 0`)
    pub fn new(y: f64, theta: f64) -> Self {
        Self::at(y, theta, 0.)
    }

    pub fn at(y: f64, theta: f64, z: f64) -> Self {
        Self {
            y,
            theta,
            z,
            blocked: false,
        }
    }

    /// Propagate the ray through a single element.
    ///
    /// The ray is clipped at the back plane of the element, and a blocked ray is
    /// returned as is.
    ///
    /// # Arguments
    ///  * `element` - element to propagate through
    pub fn propagate(self, element: &ElementMatrix) -> Self {
        if self.blocked {
            return self;
        }
        let y = element.a() * self.y + element.b() * self.theta;
        let theta = element.c() * self.y + element.d() * self.theta;
        let z = self.z + element.length();
        let blocked = element.diameter().clips(y);
        if blocked {
            trace!("ray blocked at z = {} with y = {}", z, y);
        }
        Self {
            y,
            theta,
            z,
            blocked,
        }
    }

    fn steps<'s>(self, system: &'s System) -> impl Iterator<Item = Ray> + 's {
        core::iter::once(self).chain(system.iter().scan(self, |ray, element| {
            *ray = ray.propagate(element);
            Some(*ray)
        }))
    }

    /// The ray at the entrance plane followed by the ray after every element
    pub fn trace(self, system: &System) -> Vec<Ray> {
        self.steps(system).collect()
    }

    /// The ray after the last element of `system`
    pub fn trace_through(self, system: &System) -> Ray {
        system.iter().fold(self, |ray, element| ray.propagate(element))
    }

    /// `count` rays from the same height with evenly spaced angles, both ends included
    pub fn fan(y: f64, theta_min: f64, theta_max: f64, count: usize) -> Vec<Ray> {
        linspace(theta_min, theta_max, count)
            .map(|theta| Ray::new(y, theta))
            .collect()
    }

    /// A fan of rays for each of `y_count` evenly spaced heights
    pub fn fan_group(
        y_min: f64,
        y_max: f64,
        y_count: usize,
        theta_min: f64,
        theta_max: f64,
        theta_count: usize,
    ) -> Vec<Ray> {
        linspace(y_min, y_max, y_count)
            .flat_map(|y| Ray::fan(y, theta_min, theta_max, theta_count))
            .collect()
    }

    /// Optical invariant of two rays at the same plane in a medium of index `n`
    pub fn lagrange_invariant(&self, other: &Ray, n: f64) -> f64 {
        n * (self.theta * other.y - self.y * other.theta)
    }
}

fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.
    };
    (0..count).map(move |i| start + step * i as f64)
}

impl System {
    /// Trace every ray of `rays` through the system
    pub fn trace_many(&self, rays: &[Ray]) -> Vec<Vec<Ray>> {
        rays.iter().map(|ray| ray.trace(self)).collect()
    }

    /// Number of rays of `rays` that make it out of the system
    pub fn transmitted_count(&self, rays: &[Ray]) -> usize {
        rays.iter()
            .filter(|ray| !ray.trace_through(self).blocked)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use rand::prelude::*;

    fn element(e: Result<ElementMatrix, crate::ConfigurationError>) -> ElementMatrix {
        e.unwrap()
    }

    fn two_f_imaging() -> System {
        System::from(vec![
            element(ElementMatrix::space(10., 1.)),
            element(ElementMatrix::thin_lens(5.)),
            element(ElementMatrix::space(10., 1.)),
        ])
    }

    #[test]
    fn aperture_blocks_rays_outside_its_radius() {
        let system = System::from(vec![element(ElementMatrix::aperture(3.))]);
        let outside = Ray::new(2., 0.).trace(&system);
        assert!(outside[1].blocked);
        let inside = Ray::new(1., 0.).trace(&system);
        assert!(!inside[1].blocked);
        let rim = Ray::new(-1.5, 0.).trace(&system);
        assert!(!rim[1].blocked);
    }

    #[test]
    fn blocked_rays_are_frozen() {
        let system = System::from(vec![
            element(ElementMatrix::space(10., 1.).and_then(|e| e.with_diameter(2.))),
            element(ElementMatrix::thin_lens(5.)),
            element(ElementMatrix::space(10., 1.)),
        ]);
        let trace = Ray::new(0., 0.2).trace(&system);
        assert_eq!(trace.len(), 4);
        assert!(!trace[0].blocked);
        assert!(trace[1].blocked);
        assert_eq!(trace[1].y, 2.);
        assert_eq!(trace[1].z, 10.);
        assert_eq!(trace[2], trace[1]);
        assert_eq!(trace[3], trace[1]);
        assert_eq!(Ray::new(0., 0.2).trace_through(&system), trace[1]);
    }

    #[test]
    fn empty_system_returns_the_input_ray() {
        let ray = Ray::at(1., -0.5, 3.);
        assert_eq!(ray.trace(&System::new()), vec![ray]);
        assert_eq!(ray.trace_through(&System::new()), ray);
    }

    #[test]
    fn point_at_2f_is_imaged_inverted() {
        let system = two_f_imaging();
        for theta in [-0.2, 0., 0.1, 0.3] {
            let trace = Ray::new(1., theta).trace(&system);
            assert_eq!(trace.len(), system.len() + 1);
            let out = trace[3];
            assert_float_eq!(out.y, -1., abs <= 1e-12);
            assert_eq!(out.z, 20.);
        }
    }

    #[test]
    fn trace_agrees_with_the_aggregate_matrix() {
        let mut rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(42);
        let system = System::from(vec![
            element(ElementMatrix::space(12., 1.)),
            element(ElementMatrix::thick_lens(20., -15., 1.6, 4.)),
            element(ElementMatrix::space(7., 1.)),
            element(ElementMatrix::thin_lens(-30.)),
            element(ElementMatrix::space(25., 1.)),
        ]);
        let m = system.transfer_matrix();
        for _ in 0..100 {
            let (y, theta) = (rng.gen_range(-5.0..5.0), rng.gen_range(-0.2..0.2));
            let out = Ray::new(y, theta).trace_through(&system);
            assert_float_eq!(out.y, m.a() * y + m.b() * theta, abs <= 1e-9);
            assert_float_eq!(out.theta, m.c() * y + m.d() * theta, abs <= 1e-9);
            assert_float_eq!(out.z, 48., abs <= 1e-12);
        }
    }

    #[test]
    fn fans_span_the_requested_ranges() {
        let fan = Ray::fan(1., -0.1, 0.1, 5);
        assert_eq!(fan.len(), 5);
        assert_eq!(fan[0].theta, -0.1);
        assert_float_eq!(fan[4].theta, 0.1, abs <= 1e-15);
        assert!(fan.iter().all(|r| r.y == 1. && r.z == 0. && !r.blocked));
        assert_eq!(Ray::fan(0., 0.5, 1., 1), vec![Ray::new(0., 0.5)]);
        assert!(Ray::fan(0., 0., 1., 0).is_empty());
        let group = Ray::fan_group(-1., 1., 3, -0.1, 0.1, 4);
        assert_eq!(group.len(), 12);
        assert_eq!(group[4].y, 0.);
    }

    #[test]
    fn transmitted_count_ignores_blocked_rays() {
        let mut system = two_f_imaging();
        system.append(element(ElementMatrix::aperture(1.)));
        let rays = Ray::fan_group(-1., 1., 5, -0.1, 0.1, 3);
        let traces = system.trace_many(&rays);
        assert_eq!(traces.len(), rays.len());
        // Image heights are -y, only |y| <= 0.5 pass
        assert_eq!(system.transmitted_count(&rays), 9);
    }

    #[test]
    fn lagrange_invariant_is_conserved() {
        let system = System::from(vec![
            element(ElementMatrix::space(4., 1.)),
            element(ElementMatrix::thin_lens(3.)),
            element(ElementMatrix::space(9., 1.)),
            element(ElementMatrix::thin_lens(-7.)),
            element(ElementMatrix::space(2., 1.)),
        ]);
        let (r1, r2) = (Ray::new(0.5, 0.01), Ray::new(-0.2, 0.07));
        let before = r1.lagrange_invariant(&r2, 1.);
        let after = r1
            .trace_through(&system)
            .lagrange_invariant(&r2.trace_through(&system), 1.);
        assert_float_eq!(before, after, abs <= 1e-12);
    }
}
