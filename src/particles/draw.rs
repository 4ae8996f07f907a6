//! Per-kind particle draw routines. Each is a small independent vector
//! sketch; swapping one never affects the others.

use kurbo::Shape;

use crate::config::ParticleKind;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgb8, Vec2};
use crate::particles::particle::{NeonShape, Particle};
use crate::render::painter::Painter;

/// Draw one particle at its position/rotation with `alpha_mult` folded in.
pub(crate) fn draw(painter: &mut Painter, p: &Particle, alpha_mult: f32) {
    let alpha = (p.opacity * alpha_mult).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }

    let local = Affine::translate(Vec2::new(p.x, p.y)) * Affine::rotate(p.rotation);
    painter.with_local_transform(local, |painter| match p.kind {
        ParticleKind::Bubbles => bubble(painter, p, alpha),
        ParticleKind::Sparkles => sparkle(painter, p, alpha),
        ParticleKind::Neon => neon(painter, p, alpha),
        ParticleKind::Hearts => heart(painter, p, alpha),
        ParticleKind::Embers => ember(painter, p, alpha),
        ParticleKind::Snow => snow(painter, p, alpha),
    });
}

fn circle_path(cx: f64, cy: f64, r: f64) -> BezPath {
    let mut path = BezPath::new();
    for el in kurbo::Circle::new((cx, cy), r.max(0.05)).path_elements(0.1) {
        path.push(el);
    }
    path
}

fn ellipse_path(rx: f64, ry: f64, rotation: f64) -> BezPath {
    let mut path = BezPath::new();
    let e = kurbo::Ellipse::new((0.0, 0.0), (rx.max(0.05), ry.max(0.05)), rotation);
    for el in e.path_elements(0.1) {
        path.push(el);
    }
    path
}

fn bubble(painter: &mut Painter, p: &Particle, alpha: f32) {
    painter.set_solid(p.color, alpha);
    painter.stroke_path(&circle_path(0.0, 0.0, p.size), 2.0);
    // Specular highlight.
    painter.set_solid(Rgb8::WHITE, alpha * 0.5);
    painter.fill_path(&circle_path(-p.size * 0.3, -p.size * 0.3, p.size * 0.2));
}

fn sparkle(painter: &mut Painter, p: &Particle, alpha: f32) {
    let twinkle_scale = 0.5 + p.twinkle.sin() * 0.5;
    painter.set_solid(p.color, alpha);
    for i in 0..4 {
        let rot = std::f64::consts::FRAC_PI_2 * i as f64;
        painter.fill_path(&ellipse_path(
            p.size * twinkle_scale,
            p.size * 0.15 * twinkle_scale,
            rot,
        ));
    }
    painter.set_solid(Rgb8::WHITE, alpha);
    painter.fill_path(&circle_path(0.0, 0.0, p.size * 0.3 * twinkle_scale));
}

fn neon(painter: &mut Painter, p: &Particle, alpha: f32) {
    let s = p.size;
    let path = match p.shape {
        NeonShape::Circle => circle_path(0.0, 0.0, s / 2.0),
        NeonShape::Triangle => {
            let mut path = BezPath::new();
            path.move_to(Point::new(0.0, -s));
            path.line_to(Point::new(s * 0.866, s * 0.5));
            path.line_to(Point::new(-s * 0.866, s * 0.5));
            path.close_path();
            path
        }
        NeonShape::Square => Rect::new(-s / 2.0, -s / 2.0, s / 2.0, s / 2.0).to_path(0.1),
        NeonShape::Diamond => {
            let mut path = BezPath::new();
            path.move_to(Point::new(0.0, -s));
            path.line_to(Point::new(s, 0.0));
            path.line_to(Point::new(0.0, s));
            path.line_to(Point::new(-s, 0.0));
            path.close_path();
            path
        }
    };
    painter.stroke_glow(&path, 2.0, p.color, alpha, 10.0);
}

fn heart(painter: &mut Painter, p: &Particle, alpha: f32) {
    let s = p.size * 0.5;
    let mut path = BezPath::new();
    path.move_to(Point::new(0.0, s * 0.3));
    path.curve_to(
        Point::new(-s, -s * 0.5),
        Point::new(-s * 2.0, s * 0.5),
        Point::new(0.0, s * 1.5),
    );
    path.curve_to(
        Point::new(s * 2.0, s * 0.5),
        Point::new(s, -s * 0.5),
        Point::new(0.0, s * 0.3),
    );
    path.close_path();
    painter.set_solid(p.color, alpha);
    painter.fill_path(&path);
}

fn ember(painter: &mut Painter, p: &Particle, alpha: f32) {
    painter.set_solid(p.color, alpha * 0.25);
    painter.fill_path(&circle_path(0.0, 0.0, p.size * 1.8));
    painter.set_solid(p.color, alpha);
    painter.fill_path(&circle_path(0.0, 0.0, p.size));
    // Trailing ghost below the head.
    painter.set_solid(p.color, alpha * 0.3);
    painter.fill_path(&circle_path(0.0, p.size * 2.0, p.size * 0.5));
}

fn snow(painter: &mut Painter, p: &Particle, alpha: f32) {
    painter.set_solid(p.color, alpha);
    let mut arms = BezPath::new();
    for i in 0..6 {
        let rot = Affine::rotate(std::f64::consts::FRAC_PI_3 * i as f64);
        let tip = rot * Point::new(0.0, -p.size);
        let mid = rot * Point::new(0.0, -p.size * 0.5);
        let branch_l = rot * Point::new(-p.size * 0.3, -p.size * 0.7);
        let branch_r = rot * Point::new(p.size * 0.3, -p.size * 0.7);
        arms.move_to(Point::new(0.0, 0.0));
        arms.line_to(tip);
        arms.move_to(mid);
        arms.line_to(branch_l);
        arms.move_to(mid);
        arms.line_to(branch_r);
    }
    painter.stroke_path(&arms, 1.0);
    painter.fill_path(&circle_path(0.0, 0.0, p.size * 0.15));
}
