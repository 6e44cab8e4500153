use crate::beam::GaussianBeam;
use crate::system::System;
use num_complex::Complex64;

impl System {
    /// Beam parameters reproduced by one pass through the system, the roots of
    /// `C·q² + (D − A)·q − B = 0`. `None` when `C = 0`.
    ///
    /// The system is taken as the unfolded round trip of a resonator, starting and
    /// ending on the same plane.
    pub fn eigen_modes(&self) -> Option<[Complex64; 2]> {
        let m = self.transfer_matrix();
        if m.c() == 0. {
            return None;
        }
        let half_trace = (m.d() - m.a()) * 0.5;
        let discriminant = Complex64::new(half_trace * half_trace + m.b() * m.c(), 0.).sqrt();
        let minus_p = Complex64::new(-half_trace, 0.);
        Some([
            (minus_p + discriminant) / m.c(),
            (minus_p - discriminant) / m.c(),
        ])
    }

    /// The gaussian beams of `wavelength` that are stable modes of the resonator, empty
    /// for an unstable one
    pub fn laser_modes(&self, wavelength: f64) -> Vec<GaussianBeam> {
        let n = self.elements().first().map_or(1., |e| e.front_index());
        let modes: Vec<_> = self
            .eigen_modes()
            .into_iter()
            .flatten()
            .filter(|q| q.im > 0.)
            .filter_map(|q| GaussianBeam::from_q(q, wavelength, n).ok())
            .collect();
        if modes.is_empty() {
            debug!("{} has no stable mode", self.label().unwrap_or("resonator"));
        }
        modes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementMatrix;
    use float_eq::assert_float_eq;

    fn symmetric_cavity(length: f64, r: f64) -> System {
        let mut system = System::with_label("Symmetric cavity");
        system
            .append(ElementMatrix::space(length, 1.).unwrap())
            .append(ElementMatrix::curved_mirror(r).unwrap())
            .append(ElementMatrix::space(length, 1.).unwrap())
            .append(ElementMatrix::curved_mirror(r).unwrap());
        system
    }

    #[test]
    fn symmetric_cavity_has_its_waist_at_the_centre() {
        let system = symmetric_cavity(100., 200.);
        let modes = system.laser_modes(632.8e-6);
        assert_eq!(modes.len(), 1);
        let q = modes[0].q().unwrap();
        assert_float_eq!(q.re, -50., abs <= 1e-9);
        assert_float_eq!(q.im, 7500_f64.sqrt(), rmax <= 1e-12);
        assert_float_eq!(modes[0].waist_position().unwrap(), 50., abs <= 1e-9);
    }

    #[test]
    fn mode_reproduces_itself() {
        let system = symmetric_cavity(80., 150.);
        let mode = system.laser_modes(1064e-6)[0];
        let round_trip = *mode.trace(&system).last().unwrap();
        let (q0, q1) = (mode.q().unwrap(), round_trip.q().unwrap());
        assert_float_eq!(q1.re, q0.re, abs <= 1e-9);
        assert_float_eq!(q1.im, q0.im, abs <= 1e-9);
        assert_float_eq!(round_trip.w(), mode.w(), rmax <= 1e-9);
    }

    #[test]
    fn unstable_and_degenerate_cavities() {
        // Confocal cavities image every beam onto itself
        assert_eq!(symmetric_cavity(100., 100.).eigen_modes(), None);
        let unstable = symmetric_cavity(100., 30.);
        let roots = unstable.eigen_modes().unwrap();
        assert!(roots.iter().all(|q| q.im == 0.));
        assert!(unstable.laser_modes(632.8e-6).is_empty());
    }
}
