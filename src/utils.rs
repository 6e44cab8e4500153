/// Matrix in R^(2x2), stored row major
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2([f64; 4]);

impl Mat2 {
    /// New Matrix from the two given rows
    pub fn new_from_rows(row1: [f64; 2], row2: [f64; 2]) -> Self {
        let [a, b] = row1;
        let [c, d] = row2;
        Self([a, b, c, d])
    }

    pub fn determinant(self) -> f64 {
        let [a, b, c, d] = self.0;
        a * d - b * c
    }

    /// Matrix inverse if it exists
    pub fn inverse(self) -> Option<Self> {
        let [a, b, c, d] = self.0;
        let det = self.determinant();
        if det == 0. || !det.is_finite() {
            None
        } else {
            Some(Self([d / det, -b / det, -c / det, a / det]))
        }
    }

    /// Unique solution `x` of `self · x = rhs`, if the system is not singular
    pub fn solve(self, rhs: [f64; 2]) -> Option<[f64; 2]> {
        self.inverse().map(|inv| inv * rhs)
    }
}

impl core::ops::Mul<[f64; 2]> for Mat2 {
    type Output = [f64; 2];

    /// Matrix x Vector -> Vector multiplication
    fn mul(self, rhs: [f64; 2]) -> Self::Output {
        let [a, b, c, d] = self.0;
        let [x, y] = rhs;
        [a * x + b * y, c * x + d * y]
    }
}
