use crate::body::Body;

/// Overlap test between two bodies.
///
/// X and Z compare the current boxes. Y looks one tick ahead for `a`: its
/// bottom is shifted by its pending vertical velocity, so a contact is
/// reported (and resolved) on the tick that would otherwise push `a` through
/// `b`'s top face. The test is therefore not symmetric in `a` and `b`.
pub fn intersects(a: &Body, b: &Body) -> bool {
    let fa = a.faces();
    let fb = b.faces();

    let x = fa.right >= fb.left && fa.left <= fb.right;
    let z = fa.front >= fb.back && fa.back <= fb.front;
    let y = fa.bottom + a.velocity.y <= fb.top && fa.top >= fb.bottom;

    x && y && z
}
