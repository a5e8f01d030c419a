use super::*;
use crate::render::record::{DrawCommand, RecordingSurface};
use crate::scene::element::Oscillation;
use std::f64::consts::FRAC_PI_2;

fn element(fold_phase: f64, layer: u8) -> DecorativeElement {
    DecorativeElement {
        epoch: 1,
        index: 0,
        size: 40.0,
        color: Rgba8::rgb(99, 102, 241),
        opacity: 0.3,
        layer,
        rotation_speed: 0.0,
        fold_speed: 0.0,
        osc_x: Oscillation::NONE,
        osc_y: Oscillation::NONE,
        base: Point::new(100.0, 80.0),
        display: Point::new(100.0, 80.0),
        rotation: 0.0,
        fold_phase,
    }
}

fn no_grid() -> EngineConfig {
    EngineConfig {
        grid_spacing: 0.0,
        ..EngineConfig::default()
    }
}

#[test]
fn empty_surface_gets_no_draw_calls() {
    let mut s = RecordingSurface::new(0.0, 0.0, 1.0);
    paint_frame(&mut s, &[element(0.0, 0)], 3, &EngineConfig::default()).unwrap();
    assert!(s.commands().is_empty());
    assert_eq!(s.frame_counts(), (1, 1));
}

#[test]
fn background_first_vignette_last_at_device_scale() {
    let mut s = RecordingSurface::new(200.0, 100.0, 2.0);
    paint_frame(&mut s, &[element(0.0, 0)], 0, &EngineConfig::default()).unwrap();

    let DrawCommand::FillRect {
        rect,
        color,
        transform,
        alpha,
    } = &s.commands()[0]
    else {
        panic!("first command must be the background fill");
    };
    assert_eq!(*rect, s.size().rect());
    assert_eq!(color.a, 255);
    assert_eq!(*transform, Affine::scale(2.0));
    assert_eq!(*alpha, 1.0);

    let Some(DrawCommand::RadialGradient { gradient, .. }) = s.commands().last() else {
        panic!("last command must be the vignette");
    };
    assert_eq!(gradient.inner.a, 0);
    assert!(gradient.outer.a > 0);
    assert_eq!(gradient.center, Point::new(100.0, 50.0));
}

#[test]
fn unfolded_element_draws_single_face() {
    let mut s = RecordingSurface::new(200.0, 100.0, 1.0);
    // sin(0) = 0: no fold
    paint_frame(&mut s, &[element(0.0, 0)], 0, &no_grid()).unwrap();
    assert_eq!(s.polygons().count(), 1);
    let strokes = s
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::StrokePolyline { .. }))
        .count();
    assert_eq!(strokes, 0);
}

#[test]
fn folded_element_draws_back_face_front_face_and_crease() {
    let mut s = RecordingSurface::new(200.0, 100.0, 1.0);
    // sin(pi/2) * 0.5 = 0.5: fully folded
    paint_frame(&mut s, &[element(FRAC_PI_2, 0)], 0, &no_grid()).unwrap();

    let cmds: Vec<_> = s
        .commands()
        .iter()
        .filter(|c| {
            !matches!(
                c,
                DrawCommand::FillRect { .. } | DrawCommand::RadialGradient { .. }
            )
        })
        .collect();
    assert_eq!(cmds.len(), 3);
    let (
        DrawCommand::FillPolygon {
            alpha: back,
            points: back_pts,
            ..
        },
        DrawCommand::FillPolygon {
            alpha: front,
            points: front_pts,
            ..
        },
    ) = (cmds[0], cmds[1])
    else {
        panic!("expected back face then front face");
    };
    assert!(back < front);
    assert!((front - 0.3).abs() < 1e-12);
    assert_ne!(back_pts, front_pts);

    let DrawCommand::StrokePolyline { points, alpha, .. } = cmds[2] else {
        panic!("expected crease");
    };
    assert_eq!(points.len(), 2);
    assert!((alpha - 0.3).abs() < 1e-12);
}

#[test]
fn elements_are_drawn_in_given_order_with_their_transforms() {
    let mut a = element(0.0, 0);
    a.display = Point::new(10.0, 20.0);
    let mut b = element(0.0, 2);
    b.display = Point::new(30.0, 40.0);
    b.rotation = 1.0;

    let mut s = RecordingSurface::new(200.0, 100.0, 1.0);
    paint_frame(&mut s, &[a, b], 0, &no_grid()).unwrap();
    let transforms: Vec<Affine> = s
        .polygons()
        .map(|c| match c {
            DrawCommand::FillPolygon { transform, .. } => *transform,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(transforms[0], Affine::translate((10.0, 20.0)));
    assert_eq!(
        transforms[1],
        Affine::translate((30.0, 40.0)) * Affine::rotate(1.0)
    );
}

#[test]
fn grid_covers_both_axes() {
    let cfg = EngineConfig {
        grid_spacing: 50.0,
        vignette_strength: 0.0,
        ..EngineConfig::default()
    };
    let mut s = RecordingSurface::new(200.0, 100.0, 1.0);
    paint_frame(&mut s, &[], 7, &cfg).unwrap();
    let strokes: Vec<_> = s
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::StrokePolyline { points, alpha, .. } => Some((points.clone(), *alpha)),
            _ => None,
        })
        .collect();
    // x = 0, 50, 100, 150, 200 and y = 0, 50, 100
    assert_eq!(strokes.len(), 8);
    for (points, alpha) in &strokes {
        assert!(points.len() >= 2);
        assert_eq!(*alpha, cfg.grid_alpha);
    }
    // vertical line at x=50 wobbles by at most the wave amplitude
    for p in &strokes[1].0 {
        assert!((p.x - 50.0).abs() <= cfg.grid_wave_amplitude + 1e-9);
    }
    assert!(
        !s.commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::RadialGradient { .. }))
    );
}

#[test]
fn grid_line_count_is_fixed_by_extent_and_spacing() {
    let count = |width: f64, height: f64, spacing: f64| {
        let cfg = EngineConfig {
            grid_spacing: spacing,
            vignette_strength: 0.0,
            ..EngineConfig::default()
        };
        let mut s = RecordingSurface::new(width, height, 1.0);
        paint_frame(&mut s, &[], 0, &cfg).unwrap();
        s.commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePolyline { .. }))
            .count()
    };
    // x = 0, 50, 100, 150 and y = 0, 50, 100
    assert_eq!(count(199.999, 100.0, 50.0), 7);
    assert_eq!(count(200.0, 100.0, 1.0), 201 + 101);
}

#[test]
fn face_geometry_is_square_when_flat() {
    let flat = front_face(10.0, 0.0);
    assert_eq!(
        flat,
        [
            Point::new(-10.0, -10.0),
            Point::new(10.0, -10.0),
            Point::new(10.0, 10.0),
            Point::new(-10.0, 10.0),
        ]
    );
    let folded = front_face(10.0, 0.5);
    assert!(folded[1].x < flat[1].x);
    assert!(folded[3].x > flat[3].x);
}
