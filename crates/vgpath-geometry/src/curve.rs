//! Bezier curve primitives.
//!
//! Quadratic curves are the only curved primitive that survives
//! normalization; cubics are kept for flattening and converted to quadratics
//! everywhere else.

use glam::{DVec2, Vec2};

/// Number of pieces a cubic is split into before quadratic approximation.
pub const CUBIC_SPLIT_COUNT: usize = 8;

/// A quadratic Bezier curve (one control point).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    /// Start point
    pub from: Vec2,
    /// Control point
    pub control: Vec2,
    /// End point
    pub to: Vec2,
}

/// Power-basis form `A·t² + B·t + C` of a quadratic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerBasis {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl QuadraticBezier {
    /// Create a new quadratic Bezier curve.
    pub fn new(from: Vec2, control: Vec2, to: Vec2) -> Self {
        Self { from, control, to }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0).
    pub fn eval(&self, t: f32) -> Vec2 {
        let t2 = t * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;

        self.from * mt2 + self.control * (2.0 * mt * t) + self.to * t2
    }

    /// Get the derivative at parameter t.
    pub fn derivative(&self, t: f32) -> Vec2 {
        let mt = 1.0 - t;
        (self.control - self.from) * (2.0 * mt) + (self.to - self.control) * (2.0 * t)
    }

    /// Unit tangent at parameter t.
    ///
    /// Falls back to the chord direction where the derivative vanishes (a
    /// control point coincident with an endpoint).
    pub fn tangent(&self, t: f32) -> Vec2 {
        let d = self.derivative(t);
        if d.length_squared() > f32::EPSILON {
            d.normalize()
        } else {
            (self.to - self.from).normalize_or_zero()
        }
    }

    /// Split the curve at parameter t, returning two curves.
    pub fn split(&self, t: f32) -> (Self, Self) {
        let p01 = self.from.lerp(self.control, t);
        let p12 = self.control.lerp(self.to, t);
        let p012 = p01.lerp(p12, t);

        (
            Self::new(self.from, p01, p012),
            Self::new(p012, p12, self.to),
        )
    }

    /// The part of the curve between parameters `t0` and `t1`,
    /// reparameterized to `0..=1`.
    pub fn subsegment(&self, t0: f32, t1: f32) -> Self {
        let from = self.eval(t0);
        let to = self.eval(t1);
        // Blossom: control point is B(t0, t1).
        let control = {
            let a = self.from.lerp(self.control, t0);
            let b = self.control.lerp(self.to, t0);
            a.lerp(b, t1)
        };
        Self::new(from, control, to)
    }

    /// Power-basis coefficients.
    pub fn power_basis(&self) -> PowerBasis {
        PowerBasis {
            a: self.from - self.control * 2.0 + self.to,
            b: (self.control - self.from) * 2.0,
            c: self.from,
        }
    }

    /// Whether the curve is indistinguishable from a straight line traversed
    /// at constant speed (its quadratic coefficient vanishes).
    pub fn is_linear(&self, epsilon: f32) -> bool {
        self.power_basis().a.length_squared() <= epsilon * epsilon
    }

    /// Speed-squared polynomial `|B'(t)|² = a·t² + b·t + c`, in f64.
    fn speed_polynomial(&self) -> (f64, f64, f64) {
        let basis = self.power_basis();
        let a = basis.a.as_dvec2();
        let b = basis.b.as_dvec2();
        // B'(t) = 2A·t + B
        (4.0 * a.dot(a), 4.0 * a.dot(b), b.dot(b))
    }

    /// Exact arc length over `0..=t`.
    ///
    /// Uses the closed-form antiderivative of `√(a·t² + b·t + c)`. Curves
    /// whose speed polynomial is a perfect square (collinear control points)
    /// are integrated piecewise linearly instead, which also covers cusps.
    pub fn length_to(&self, t: f32) -> f32 {
        let (a, b, c) = self.speed_polynomial();
        let t = t as f64;

        if a <= 1e-12 * (b.abs() + c).max(1e-12) {
            // Constant speed.
            return (c.sqrt() * t) as f32;
        }

        let disc = 4.0 * a * c - b * b;
        if disc <= 1e-9 * (4.0 * a * c).max(b * b) {
            return (a.sqrt() * abs_linear_integral(-b / (2.0 * a), t)) as f32;
        }

        let sa = a.sqrt();
        let antiderivative = |t: f64| -> Option<f64> {
            let s = (a * t * t + b * t + c).max(0.0).sqrt();
            let u = 2.0 * a * t + b;
            let log_arg = 2.0 * sa * s + u;
            (log_arg > 0.0).then(|| u * s / (4.0 * a) + disc / (8.0 * a * sa) * log_arg.ln())
        };

        match (antiderivative(t), antiderivative(0.0)) {
            (Some(end), Some(start)) => (end - start).max(0.0) as f32,
            _ => (a.sqrt() * abs_linear_integral(-b / (2.0 * a), t)) as f32,
        }
    }

    /// Exact arc length of the whole curve.
    pub fn arc_length(&self) -> f32 {
        self.length_to(1.0)
    }

    /// Parameter at which the arc length from the start reaches `length`.
    ///
    /// There is no closed-form inverse, so this bisects `0..=1` for a fixed
    /// number of iterations.
    pub fn param_at_length(&self, length: f32, iterations: u32) -> f32 {
        if length <= 0.0 {
            return 0.0;
        }
        let total = self.arc_length();
        if length >= total {
            return 1.0;
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        for _ in 0..iterations {
            let mid = 0.5 * (lo + hi);
            if self.length_to(mid) < length {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }

    /// Parameters in `(0, 1)` where the curve's derivative along `axis`
    /// vanishes.
    pub fn extremum_along(&self, axis: Vec2) -> Option<f32> {
        let p0 = self.from.dot(axis);
        let p1 = self.control.dot(axis);
        let p2 = self.to.dot(axis);
        let denom = p0 - 2.0 * p1 + p2;
        if denom.abs() <= f32::EPSILON {
            return None;
        }
        let t = (p0 - p1) / denom;
        (t > 0.0 && t < 1.0).then_some(t)
    }
}

/// `∫₀ᵗ |s − s0| ds`.
fn abs_linear_integral(s0: f64, t: f64) -> f64 {
    let g = |s: f64| {
        let d = s - s0;
        0.5 * d * d.abs()
    };
    g(t) - g(0.0)
}

/// A cubic Bezier curve (two control points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start point
    pub from: Vec2,
    /// First control point
    pub control1: Vec2,
    /// Second control point
    pub control2: Vec2,
    /// End point
    pub to: Vec2,
}

impl CubicBezier {
    /// Create a new cubic Bezier curve.
    pub fn new(from: Vec2, control1: Vec2, control2: Vec2, to: Vec2) -> Self {
        Self {
            from,
            control1,
            control2,
            to,
        }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0).
    pub fn eval(&self, t: f32) -> Vec2 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        self.from * mt3
            + self.control1 * (3.0 * mt2 * t)
            + self.control2 * (3.0 * mt * t2)
            + self.to * t3
    }

    /// Split the curve at parameter t, returning two curves.
    pub fn split(&self, t: f32) -> (Self, Self) {
        let p01 = self.from.lerp(self.control1, t);
        let p12 = self.control1.lerp(self.control2, t);
        let p23 = self.control2.lerp(self.to, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let p0123 = p012.lerp(p123, t);

        (
            Self::new(self.from, p01, p012, p0123),
            Self::new(p0123, p123, p23, self.to),
        )
    }

    /// Split into [`CUBIC_SPLIT_COUNT`] pieces of equal parameter length by
    /// repeated halving, in double precision.
    pub fn split_uniform(&self) -> [CubicBezier; CUBIC_SPLIT_COUNT] {
        let mut pieces = [[DVec2::ZERO; 4]; CUBIC_SPLIT_COUNT];
        pieces[0] = [
            self.from.as_dvec2(),
            self.control1.as_dvec2(),
            self.control2.as_dvec2(),
            self.to.as_dvec2(),
        ];

        let mut count = 1;
        while count < CUBIC_SPLIT_COUNT {
            // Halve back to front so each piece is read before it is replaced.
            for i in (0..count).rev() {
                let (left, right) = halve_cubic(pieces[i]);
                pieces[2 * i] = left;
                pieces[2 * i + 1] = right;
            }
            count *= 2;
        }

        pieces.map(|[p0, p1, p2, p3]| {
            CubicBezier::new(p0.as_vec2(), p1.as_vec2(), p2.as_vec2(), p3.as_vec2())
        })
    }

    /// Best-fit single quadratic sharing the cubic's endpoints.
    ///
    /// The control point `(3·(c1 + c2) − (p0 + p3)) / 4` matches the cubic's
    /// midpoint and averages the endpoint tangents.
    pub fn to_quadratic(&self) -> QuadraticBezier {
        let control = ((self.control1 + self.control2) * 3.0 - (self.from + self.to)) * 0.25;
        QuadraticBezier::new(self.from, control, self.to)
    }

    /// Fixed eight-way quadratic approximation.
    pub fn to_quadratics(&self) -> impl Iterator<Item = QuadraticBezier> {
        self.split_uniform().into_iter().map(|c| c.to_quadratic())
    }
}

fn halve_cubic([p0, p1, p2, p3]: [DVec2; 4]) -> ([DVec2; 4], [DVec2; 4]) {
    let p01 = (p0 + p1) * 0.5;
    let p12 = (p1 + p2) * 0.5;
    let p23 = (p2 + p3) * 0.5;
    let p012 = (p01 + p12) * 0.5;
    let p123 = (p12 + p23) * 0.5;
    let mid = (p012 + p123) * 0.5;
    ([p0, p01, p012, mid], [mid, p123, p23, p3])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arch() -> QuadraticBezier {
        QuadraticBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 100.0),
            Vec2::new(100.0, 0.0),
        )
    }

    fn polyline_length(q: &QuadraticBezier, t: f32) -> f32 {
        let steps = 20_000;
        let mut length = 0.0;
        let mut prev = q.from;
        for i in 1..=steps {
            let p = q.eval(t * i as f32 / steps as f32);
            length += prev.distance(p);
            prev = p;
        }
        length
    }

    #[test]
    fn test_quadratic_endpoints() {
        let curve = arch();
        assert_eq!(curve.eval(0.0), curve.from);
        assert_eq!(curve.eval(1.0), curve.to);
    }

    #[test]
    fn test_cubic_endpoints() {
        let curve = CubicBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(25.0, 100.0),
            Vec2::new(75.0, 100.0),
            Vec2::new(100.0, 0.0),
        );

        assert_eq!(curve.eval(0.0), curve.from);
        assert_eq!(curve.eval(1.0), curve.to);
    }

    #[test]
    fn test_quadratic_split() {
        let curve = arch();
        let (left, right) = curve.split(0.5);
        let midpoint = curve.eval(0.5);

        assert!((left.to - midpoint).length() < 0.001);
        assert!((right.from - midpoint).length() < 0.001);
    }

    #[test]
    fn test_subsegment_matches_curve() {
        let curve = arch();
        let sub = curve.subsegment(0.25, 0.75);
        for i in 0..=10 {
            let s = i as f32 / 10.0;
            let expected = curve.eval(0.25 + 0.5 * s);
            assert!((sub.eval(s) - expected).length() < 1e-3);
        }
    }

    #[test]
    fn test_power_basis_eval() {
        let curve = arch();
        let PowerBasis { a, b, c } = curve.power_basis();
        for t in [0.0, 0.3, 0.5, 0.9, 1.0] {
            let p = a * t * t + b * t + c;
            assert!((p - curve.eval(t)).length() < 1e-3);
        }
    }

    #[test]
    fn test_arc_length_straight() {
        let line = QuadraticBezier::new(Vec2::ZERO, Vec2::new(5.0, 0.0), Vec2::new(10.0, 0.0));
        assert!((line.arc_length() - 10.0).abs() < 1e-4);
        assert!((line.length_to(0.5) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_arc_length_matches_polyline() {
        let curve = arch();
        for t in [0.1, 0.5, 0.8, 1.0] {
            let exact = curve.length_to(t);
            let approx = polyline_length(&curve, t);
            assert!(
                (exact - approx).abs() < 0.01,
                "t = {t}: closed form {exact}, polyline {approx}"
            );
        }
    }

    #[test]
    fn test_arc_length_cusp() {
        // Control point beyond the end: the curve doubles back on itself.
        let curve = QuadraticBezier::new(Vec2::ZERO, Vec2::new(20.0, 0.0), Vec2::new(10.0, 0.0));
        let approx = polyline_length(&curve, 1.0);
        assert!((curve.arc_length() - approx).abs() < 0.01);
    }

    #[test]
    fn test_param_at_length_inverts() {
        let curve = arch();
        let total = curve.arc_length();
        for fraction in [0.1, 0.25, 0.5, 0.9] {
            let t = curve.param_at_length(total * fraction, 20);
            let reached = curve.length_to(t);
            assert!((reached - total * fraction).abs() < 1e-2);
        }
        assert_eq!(curve.param_at_length(-1.0, 20), 0.0);
        assert_eq!(curve.param_at_length(total * 2.0, 20), 1.0);
    }

    #[test]
    fn test_extremum_along() {
        let curve = arch();
        let t = curve.extremum_along(Vec2::Y).unwrap();
        assert!((t - 0.5).abs() < 1e-6);
        assert!(curve.extremum_along(Vec2::X).is_none());
    }

    #[test]
    fn test_cubic_split_uniform() {
        let curve = CubicBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 80.0),
            Vec2::new(100.0, 80.0),
            Vec2::new(100.0, 0.0),
        );
        let pieces = curve.split_uniform();
        assert_eq!(pieces[0].from, curve.from);
        assert_eq!(pieces[7].to, curve.to);
        for (i, piece) in pieces.iter().enumerate() {
            let expected = curve.eval((i + 1) as f32 / 8.0);
            assert!((piece.to - expected).length() < 1e-3);
        }
        for pair in pieces.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }

    #[test]
    fn test_cubic_to_quadratic_exact_for_raised_quadratic() {
        // A cubic obtained by degree-raising a quadratic converts back exactly.
        let quad = arch();
        let cubic = CubicBezier::new(
            quad.from,
            quad.from + (quad.control - quad.from) * (2.0 / 3.0),
            quad.to + (quad.control - quad.to) * (2.0 / 3.0),
            quad.to,
        );
        let back = cubic.to_quadratic();
        assert!((back.control - quad.control).length() < 1e-3);
    }
}
