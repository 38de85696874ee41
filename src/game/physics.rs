pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}

/// Strict overlap: circles that merely touch do not overlap.
pub fn circles_overlap(a: (f64, f64, f64), b: (f64, f64, f64)) -> bool {
    let (ax, ay, ar) = a;
    let (bx, by, br) = b;
    distance(ax, ay, bx, by) < ar + br
}

/// Reflect one velocity component off the walls `min`/`max`.
///
/// Only flips when the body is past a wall and still heading into it, so a
/// body spawned across an edge moves back inside instead of jittering.
pub fn bounce(position: f64, radius: f64, velocity: f64, min: f64, max: f64) -> f64 {
    let mut v = velocity;
    if position + radius > max && v > 0.0 {
        v = -v;
    }
    if position - radius <= min && v < 0.0 {
        v = -v;
    }
    v
}
