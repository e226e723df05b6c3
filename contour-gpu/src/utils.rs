use glam::Vec3;

/// Returns the distance between `point` and the box spanned by `min` and
/// `max`; zero when the point lies inside.
///
/// An unset box (`min > max`) is infinitely far away.
pub fn box_distance(min: Vec3, max: Vec3, point: Vec3) -> f32 {
    if min.cmpgt(max).any() {
        return f32::INFINITY;
    }

    (point.max(min).min(max) - point).length()
}

/// Returns the distance between `point` and the segment `start..end`.
pub fn segment_distance(start: Vec3, end: Vec3, point: Vec3) -> f32 {
    point.distance(segment_closest_point(start, end, point))
}

/// Returns the point of segment `start..end` closest to `point`.
pub fn segment_closest_point(start: Vec3, end: Vec3, point: Vec3) -> Vec3 {
    let ab = end - start;
    let ab_len_sq = ab.length_squared();

    if ab_len_sq < f32::EPSILON {
        return start;
    }

    let t = ((point - start).dot(ab) / ab_len_sq).clamp(0.0, 1.0);

    start + t * ab
}

/// Returns the point of triangle `a, b, c` closest to `point`.
///
/// Follows Ericson's "Real-Time Collision Detection", 5.1.5 - classifies
/// `point` against the triangle's Voronoi regions.
pub fn triangle_closest_point(a: Vec3, b: Vec3, c: Vec3, point: Vec3) -> Vec3 {
    let ab = b - a;
    let ac = c - a;

    let ap = point - a;
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);

    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    let bp = point - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);

    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    let vc = d1 * d4 - d3 * d2;

    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        return a + ab * (d1 / (d1 - d3));
    }

    let cp = point - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);

    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    let vb = d5 * d2 - d1 * d6;

    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        return a + ac * (d2 / (d2 - d6));
    }

    let va = d3 * d6 - d5 * d4;

    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));

        return b + (c - b) * w;
    }

    let denom = va + vb + vc;

    // Zero-area triangle - it's a segment in disguise
    if denom.abs() < f32::EPSILON {
        let mut closest = a;

        for (start, end) in [(a, b), (b, c), (c, a)] {
            let candidate = segment_closest_point(start, end, point);

            if point.distance_squared(candidate)
                < point.distance_squared(closest)
            {
                closest = candidate;
            }
        }

        return closest;
    }

    a + ab * (vb / denom) + ac * (vc / denom)
}
