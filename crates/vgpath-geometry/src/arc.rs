//! Elliptical arcs.
//!
//! Arcs are authored in endpoint form (two endpoints, radii, rotation and
//! the large-arc/sweep flags) and converted to center form before being
//! approximated by quadratics or flattened. The conversion runs in double
//! precision: the radius correction and the angle recovery both lose
//! precision quickly in `f32` for nearly degenerate arcs.

use std::f64::consts::{FRAC_PI_4, TAU};

use glam::{DVec2, Vec2};

use crate::{QuadraticBezier, Transform2D};

/// Arc in endpoint parameterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointArc {
    pub from: Vec2,
    pub to: Vec2,
    /// Ellipse radii. Signs are ignored.
    pub radii: Vec2,
    /// Rotation of the ellipse x axis, in degrees.
    pub x_rotation: f32,
    pub large_arc: bool,
    /// Whether the arc runs in the positive angle direction.
    pub sweep: bool,
}

/// What an endpoint arc turns into once degenerate cases are resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcShape {
    /// Coincident endpoints; the arc draws nothing.
    Empty,
    /// Zero or non-finite radius; the arc is a straight line.
    Line,
    Elliptic(CenterArc),
}

/// Arc in center parameterization.
///
/// A point at angle `θ` is `center + R(φ)·(rx·cos θ, ry·sin θ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    pub center: DVec2,
    /// Radii after upscaling to fit the endpoints.
    pub radii: DVec2,
    /// Rotation of the ellipse x axis, in radians.
    pub x_rotation: f64,
    pub start_angle: f64,
    /// Signed sweep; negative runs clockwise.
    pub sweep_angle: f64,
}

/// Arc expressed through its two (possibly skewed) axis vectors.
///
/// This is the form that survives an affine transform: the center is
/// transformed as a point and the axes as vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcFrame {
    pub center: DVec2,
    pub axis_x: DVec2,
    pub axis_y: DVec2,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl EndpointArc {
    /// Resolve degenerate cases and convert to center form.
    pub fn to_center(&self) -> ArcShape {
        let p0 = self.from.as_dvec2();
        let p1 = self.to.as_dvec2();
        if p0 == p1 {
            return ArcShape::Empty;
        }

        let mut rx = (self.radii.x as f64).abs();
        let mut ry = (self.radii.y as f64).abs();
        if rx == 0.0 || ry == 0.0 || !rx.is_finite() || !ry.is_finite() {
            return ArcShape::Line;
        }

        let phi = (self.x_rotation as f64).to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        // Half-chord in ellipse space.
        let half = (p0 - p1) * 0.5;
        let x1 = cos_phi * half.x + sin_phi * half.y;
        let y1 = -sin_phi * half.x + cos_phi * half.y;

        // Upscale the radii uniformly when no ellipse of this size reaches
        // both endpoints.
        let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let num = rx2 * ry2 - rx2 * y1 * y1 - ry2 * x1 * x1;
        let den = rx2 * y1 * y1 + ry2 * x1 * x1;
        let sign = if self.large_arc != self.sweep { 1.0 } else { -1.0 };
        let coef = sign * (num / den).max(0.0).sqrt();

        let cx1 = coef * rx * y1 / ry;
        let cy1 = -coef * ry * x1 / rx;

        let mid = (p0 + p1) * 0.5;
        let center = DVec2::new(
            cos_phi * cx1 - sin_phi * cy1 + mid.x,
            sin_phi * cx1 + cos_phi * cy1 + mid.y,
        );

        let u = DVec2::new((x1 - cx1) / rx, (y1 - cy1) / ry);
        let v = DVec2::new((-x1 - cx1) / rx, (-y1 - cy1) / ry);
        let start_angle = u.y.atan2(u.x);
        let mut sweep_angle = (u.x * v.y - u.y * v.x).atan2(u.dot(v));
        if !self.sweep && sweep_angle > 0.0 {
            sweep_angle -= TAU;
        } else if self.sweep && sweep_angle < 0.0 {
            sweep_angle += TAU;
        }

        ArcShape::Elliptic(CenterArc {
            center,
            radii: DVec2::new(rx, ry),
            x_rotation: phi,
            start_angle,
            sweep_angle,
        })
    }

    /// Quadratic approximation of the arc.
    ///
    /// Degenerate arcs produce a single straight quadratic (line) or
    /// nothing (coincident endpoints).
    pub fn to_quadratics(&self) -> Vec<QuadraticBezier> {
        match self.to_center() {
            ArcShape::Empty => Vec::new(),
            ArcShape::Line => vec![QuadraticBezier::new(
                self.from,
                self.from.lerp(self.to, 0.5),
                self.to,
            )],
            ArcShape::Elliptic(arc) => arc.to_quadratics(self.from, self.to),
        }
    }
}

impl CenterArc {
    /// Scaled and rotated ellipse axes.
    pub fn axes(&self) -> (DVec2, DVec2) {
        let (sin_phi, cos_phi) = self.x_rotation.sin_cos();
        (
            DVec2::new(cos_phi, sin_phi) * self.radii.x,
            DVec2::new(-sin_phi, cos_phi) * self.radii.y,
        )
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    pub fn point_at(&self, angle: f64) -> DVec2 {
        self.frame().point_at(angle)
    }

    pub fn frame(&self) -> ArcFrame {
        let (axis_x, axis_y) = self.axes();
        ArcFrame {
            center: self.center,
            axis_x,
            axis_y,
            start_angle: self.start_angle,
            sweep_angle: self.sweep_angle,
        }
    }

    /// Number of quadratic pieces: one per started eighth of a turn.
    ///
    /// Sweeps within rounding noise of a whole number of eighths do not
    /// start a new piece.
    pub fn piece_count(&self) -> usize {
        ((self.sweep_angle.abs() / FRAC_PI_4 - 1e-9).ceil() as usize).max(1)
    }

    /// Split into equal angular steps, each approximated by the quadratic
    /// that passes through the step's angular midpoint.
    ///
    /// The exact authored endpoints are used for the first and last piece so
    /// the approximation connects seamlessly to its neighbours.
    pub fn to_quadratics(&self, from: Vec2, to: Vec2) -> Vec<QuadraticBezier> {
        let n = self.piece_count();
        let step = self.sweep_angle / n as f64;
        let frame = self.frame();

        let mut pieces = Vec::with_capacity(n);
        let mut start = from.as_dvec2();
        for i in 0..n {
            let a0 = self.start_angle + step * i as f64;
            let end = if i + 1 == n {
                to.as_dvec2()
            } else {
                frame.point_at(a0 + step)
            };
            let mid = frame.point_at(a0 + step * 0.5);
            let control = (mid * 4.0 - (start + end)) * 0.5;
            pieces.push(QuadraticBezier::new(
                start.as_vec2(),
                control.as_vec2(),
                end.as_vec2(),
            ));
            start = end;
        }
        pieces
    }
}

impl ArcFrame {
    pub fn point_at(&self, angle: f64) -> DVec2 {
        let (sin, cos) = angle.sin_cos();
        self.center + self.axis_x * cos + self.axis_y * sin
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    /// Map the frame through an affine transform.
    pub fn transformed(&self, transform: &Transform2D) -> Self {
        let m = transform.as_mat3().as_dmat3();
        Self {
            center: m.transform_point2(self.center),
            axis_x: m.transform_vector2(self.axis_x),
            axis_y: m.transform_vector2(self.axis_y),
            ..*self
        }
    }
}
