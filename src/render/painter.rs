use crate::foundation::core::{Affine, Point, Rgba8};
use crate::foundation::error::FoldResult;
use crate::render::surface::{DrawSurface, RadialGradient};
use crate::scene::config::EngineConfig;
use crate::scene::element::DecorativeElement;

/// Distance between samples along a grid line.
const GRID_SEGMENT: f64 = 20.0;
const GRID_LINE_WIDTH: f64 = 1.0;
const CREASE_WIDTH: f64 = 1.0;
const BACK_FACE_OPACITY: f64 = 0.5;

/// Draw one complete frame: background, grid, elements (already layer-sorted), vignette.
///
/// A zero-sized surface still gets a `begin_frame`/`end_frame` pair but no draw calls.
pub(crate) fn paint_frame<D: DrawSurface + ?Sized>(
    surface: &mut D,
    elements: &[DecorativeElement],
    t: u64,
    cfg: &EngineConfig,
) -> FoldResult<()> {
    let size = surface.size();
    surface.begin_frame()?;
    if size.is_empty() {
        return surface.end_frame();
    }
    let device = size.device_transform();

    let bg = cfg.theme.background.rgba8();
    surface.clear(Rgba8 { a: 255, ..bg });

    paint_grid(surface, size.width, size.height, t, cfg);

    for el in elements {
        paint_element(surface, device, el, cfg);
    }

    if cfg.vignette_strength > 0.0 {
        surface.set_transform(device);
        surface.set_alpha(1.0);
        let center = Point::new(size.width * 0.5, size.height * 0.5);
        let reach = center.to_vec2().hypot();
        let edge = cfg.theme.vignette.rgba8();
        let gradient = RadialGradient {
            center,
            inner_radius: reach * 0.35,
            outer_radius: reach,
            inner: Rgba8 { a: 0, ..edge },
            outer: edge.with_alpha(cfg.vignette_strength),
        };
        surface.fill_radial_gradient(size.rect(), &gradient)?;
    }

    surface.end_frame()
}

fn paint_grid<D: DrawSurface + ?Sized>(
    surface: &mut D,
    width: f64,
    height: f64,
    t: u64,
    cfg: &EngineConfig,
) {
    let spacing = cfg.grid_spacing;
    if spacing <= 0.0 || cfg.grid_alpha <= 0.0 {
        return;
    }
    let color = cfg.theme.grid.rgba8();
    let amp = cfg.grid_wave_amplitude;
    surface.set_alpha(cfg.grid_alpha);

    let mut points = Vec::new();
    for x in lines(width, spacing) {
        points.clear();
        for y in samples(height) {
            points.push(Point::new(x + grid_wave(t, x, y) * amp, y));
        }
        surface.stroke_polyline(&points, GRID_LINE_WIDTH, color);
    }

    for y in lines(height, spacing) {
        points.clear();
        for x in samples(width) {
            points.push(Point::new(x, y + grid_wave(t, y, x) * amp));
        }
        surface.stroke_polyline(&points, GRID_LINE_WIDTH, color);
    }
}

/// Grid line offsets `0, spacing, 2*spacing, ...` up to `extent`.
fn lines(extent: f64, spacing: f64) -> impl Iterator<Item = f64> {
    let n = (extent / spacing).floor() as usize;
    (0..=n).map(move |i| i as f64 * spacing)
}

/// Sample positions `0, GRID_SEGMENT, ..., extent` (the end is always included).
fn samples(extent: f64) -> impl Iterator<Item = f64> {
    let n = (extent / GRID_SEGMENT).ceil().max(1.0) as usize;
    (0..=n).map(move |i| (i as f64 * GRID_SEGMENT).min(extent))
}

/// Wave offset in `[-1, 1]` for a point `along` a grid line sitting at `line`.
pub(crate) fn grid_wave(t: u64, line: f64, along: f64) -> f64 {
    (t as f64 * 0.02 + line * 0.05 + along * 0.01).sin()
}

fn paint_element<D: DrawSurface + ?Sized>(
    surface: &mut D,
    device: Affine,
    el: &DecorativeElement,
    cfg: &EngineConfig,
) {
    let half = el.size * 0.5;
    let fold = el.fold_amount();
    let folded = fold > cfg.fold_threshold;

    surface.set_transform(
        device * Affine::translate(el.display.to_vec2()) * Affine::rotate(el.rotation),
    );

    if folded {
        surface.set_alpha(el.opacity * BACK_FACE_OPACITY);
        surface.fill_polygon(&back_face(half, fold), el.color);
    }

    surface.set_alpha(el.opacity);
    let front = front_face(half, fold);
    surface.fill_polygon(&front, el.color);

    if folded {
        // fold is at most 0.5, so this stays within the element opacity
        surface.set_alpha(el.opacity * fold * 2.0);
        surface.stroke_polyline(&[front[1], front[3]], CREASE_WIDTH, cfg.theme.crease.rgba8());
    }
}

/// Front face: a square whose top-right and bottom-left corners are pulled inward by `fold`.
pub(crate) fn front_face(half: f64, fold: f64) -> [Point; 4] {
    let skew = fold * half;
    [
        Point::new(-half, -half),
        Point::new(half - skew, -half + skew * 0.5),
        Point::new(half, half),
        Point::new(-half + skew, half - skew * 0.5),
    ]
}

/// Back face: the flap revealed behind the front face while folding.
pub(crate) fn back_face(half: f64, fold: f64) -> [Point; 4] {
    let lift = fold * half;
    [
        Point::new(-half, -half),
        Point::new(half, -half + lift),
        Point::new(half - lift * 0.5, half),
        Point::new(-half, half - lift),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
