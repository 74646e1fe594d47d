//! Convex hull of planar point sets (monotone chain).

fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Returns the convex hull as a closed, counter-clockwise ring.
///
/// Collinear points on the hull boundary are dropped.
/// Returns an empty vector for an empty input.
pub fn convex_hull(pts: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut pts: Vec<(f64, f64)> = pts.to_vec();
    pts.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    pts.dedup();

    if pts.len() < 3 {
        let mut ring = pts.clone();
        if let Some(&first) = pts.first() {
            ring.push(first);
        }
        return ring;
    }

    let mut lower: Vec<(f64, f64)> = Vec::new();
    for &p in pts.iter() {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0. {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<(f64, f64)> = Vec::new();
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0. {
            upper.pop();
        }
        upper.push(p);
    }

    // Last point of each chain is the first point of the other one
    lower.pop();
    upper.pop();
    lower.extend(upper);
    let first = lower[0];
    lower.push(first);
    lower
}
