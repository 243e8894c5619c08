use crate::coordinate::Coord;

/// Generates the positions on the straight segment between two points using the
/// 3D Bresenham algorithm. Both end points are included.
pub fn bresenham_line(from: Coord, to: Coord) -> Vec<Coord> {
    let dx: i32 = (to.x - from.x).abs();
    let dy: i32 = (to.y - from.y).abs();
    let dz: i32 = (to.z - from.z).abs();

    let xs: i32 = if from.x < to.x { 1 } else { -1 };
    let ys: i32 = if from.y < to.y { 1 } else { -1 };
    let zs: i32 = if from.z < to.z { 1 } else { -1 };

    let mut points: Vec<Coord> = Vec::with_capacity((dx.max(dy).max(dz) + 1) as usize);
    let mut p: Coord = from;

    // Step along the dominant axis; the two error terms track the other axes.
    if dx >= dy && dx >= dz {
        let mut e1: i32 = 2 * dy - dx;
        let mut e2: i32 = 2 * dz - dx;
        while p.x != to.x {
            points.push(p);
            if e1 >= 0 {
                p.y += ys;
                e1 -= 2 * dx;
            }
            if e2 >= 0 {
                p.z += zs;
                e2 -= 2 * dx;
            }
            e1 += 2 * dy;
            e2 += 2 * dz;
            p.x += xs;
        }
    } else if dy >= dx && dy >= dz {
        let mut e1: i32 = 2 * dx - dy;
        let mut e2: i32 = 2 * dz - dy;
        while p.y != to.y {
            points.push(p);
            if e1 >= 0 {
                p.x += xs;
                e1 -= 2 * dy;
            }
            if e2 >= 0 {
                p.z += zs;
                e2 -= 2 * dy;
            }
            e1 += 2 * dx;
            e2 += 2 * dz;
            p.y += ys;
        }
    } else {
        let mut e1: i32 = 2 * dy - dz;
        let mut e2: i32 = 2 * dx - dz;
        while p.z != to.z {
            points.push(p);
            if e1 >= 0 {
                p.y += ys;
                e1 -= 2 * dz;
            }
            if e2 >= 0 {
                p.x += xs;
                e2 -= 2 * dz;
            }
            e1 += 2 * dy;
            e2 += 2 * dx;
            p.z += zs;
        }
    }

    points.push(to);
    points
}
