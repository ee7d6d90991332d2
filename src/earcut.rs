//! This module triangulates simple 2D polygons by ear clipping.
//!
//! The polygon is held as a circular doubly-linked list of vertices stored in
//! an arena and addressed by index. Large polygons additionally thread a
//! second list sorted by Z-order (Morton) key so that the point-in-ear test
//! only has to visit vertices near the candidate ear. When a full pass finds
//! no ear, the list is filtered of degenerate vertices, then local
//! self-intersections are cured, then the polygon is split along a valid
//! diagonal and both halves are triangulated separately.

type NodeIx = usize;

/// Z-order hashing only pays off above this many vertices.
const HASH_THRESHOLD: usize = 80;

#[derive(Debug, Clone, Copy)]
struct Node {
    /// Vertex index in the input.
    i: usize,
    x: f64,
    y: f64,
    prev: NodeIx,
    next: NodeIx,
    z: u32,
    prev_z: Option<NodeIx>,
    next_z: Option<NodeIx>,
}

#[derive(Debug, Clone, Copy)]
struct ZHash {
    min_x: f64,
    min_y: f64,
    inv_size: f64,
}

impl ZHash {
    fn from_coords(data: &[f64], dim: usize) -> Self {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for point in data.chunks_exact(dim) {
            min_x = min_x.min(point[0]);
            min_y = min_y.min(point[1]);
            max_x = max_x.max(point[0]);
            max_y = max_y.max(point[1]);
        }
        let size = (max_x - min_x).max(max_y - min_y);
        let inv_size = if size != 0.0 { 32767.0 / size } else { 0.0 };
        Self {
            min_x,
            min_y,
            inv_size,
        }
    }

    /// Interleave the bits of the scaled 15-bit coordinates.
    fn z_order(&self, x: f64, y: f64) -> u32 {
        let spread = |v: u32| {
            let v = (v | (v << 8)) & 0x00FF_00FF;
            let v = (v | (v << 4)) & 0x0F0F_0F0F;
            let v = (v | (v << 2)) & 0x3333_3333;
            (v | (v << 1)) & 0x5555_5555
        };
        let x = ((x - self.min_x) * self.inv_size) as u32;
        let y = ((y - self.min_y) * self.inv_size) as u32;
        spread(x) | (spread(y) << 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Initial,
    Filtered,
    Cured,
}

#[derive(Default)]
struct Triangulator {
    nodes: Vec<Node>,
    hash: Option<ZHash>,
    triangles: Vec<usize>,
}

/// Triangulate the polygon given as a flat coordinate list with `dim` values
/// per vertex (only the first two are used). Returns vertex index triples.
pub fn earcut(data: &[f64], dim: usize) -> Vec<usize> {
    if dim < 2 || data.len() < 3 * dim {
        return Vec::new();
    }
    let mut triangulator = Triangulator::default();
    let outer = match triangulator.linked_list(data, dim) {
        Some(outer) => outer,
        None => return Vec::new(),
    };
    if triangulator.next(outer) == triangulator.prev(outer) {
        return Vec::new();
    }
    if data.len() > HASH_THRESHOLD * dim {
        triangulator.hash = Some(ZHash::from_coords(data, dim));
    }
    triangulator.earcut_linked(outer, Pass::Initial);
    triangulator.triangles
}

/// Twice the signed area of the ring; positive for clockwise in a y-up frame.
fn signed_area(data: &[f64], dim: usize) -> f64 {
    let count = data.len() / dim;
    let mut sum = 0.0;
    let mut j = count - 1;
    for i in 0..count {
        let (pi, pj) = (i * dim, j * dim);
        sum += (data[pj] - data[pi]) * (data[pi + 1] + data[pj + 1]);
        j = i;
    }
    sum
}

#[allow(clippy::too_many_arguments)]
fn point_in_triangle(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64, px: f64, py: f64) -> bool {
    (cx - px) * (ay - py) >= (ax - px) * (cy - py)
        && (ax - px) * (by - py) >= (bx - px) * (ay - py)
        && (bx - px) * (cy - py) >= (cx - px) * (by - py)
}

fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

impl Triangulator {
    fn next(&self, p: NodeIx) -> NodeIx {
        self.nodes[p].next
    }

    fn prev(&self, p: NodeIx) -> NodeIx {
        self.nodes[p].prev
    }

    fn push_node(&mut self, i: usize, x: f64, y: f64) -> NodeIx {
        let ix = self.nodes.len();
        self.nodes.push(Node {
            i,
            x,
            y,
            prev: ix,
            next: ix,
            z: 0,
            prev_z: None,
            next_z: None,
        });
        ix
    }

    fn insert_node(&mut self, i: usize, x: f64, y: f64, last: Option<NodeIx>) -> NodeIx {
        let p = self.push_node(i, x, y);
        if let Some(last) = last {
            let next = self.nodes[last].next;
            self.nodes[p].next = next;
            self.nodes[p].prev = last;
            self.nodes[next].prev = p;
            self.nodes[last].next = p;
        }
        p
    }

    /// Unlink `p` from both lists. Its own links are left intact so callers
    /// can still step from it.
    fn remove_node(&mut self, p: NodeIx) {
        let Node {
            prev,
            next,
            prev_z,
            next_z,
            ..
        } = self.nodes[p];
        self.nodes[next].prev = prev;
        self.nodes[prev].next = next;
        if let Some(pz) = prev_z {
            self.nodes[pz].next_z = next_z;
        }
        if let Some(nz) = next_z {
            self.nodes[nz].prev_z = prev_z;
        }
    }

    /// Build the ring in clockwise order.
    fn linked_list(&mut self, data: &[f64], dim: usize) -> Option<NodeIx> {
        let count = data.len() / dim;
        let mut last = None;
        if signed_area(data, dim) > 0.0 {
            for v in 0..count {
                last = Some(self.insert_node(v, data[v * dim], data[v * dim + 1], last));
            }
        } else {
            for v in (0..count).rev() {
                last = Some(self.insert_node(v, data[v * dim], data[v * dim + 1], last));
            }
        }
        if let Some(l) = last {
            if self.equals(l, self.next(l)) {
                self.remove_node(l);
                last = Some(self.next(l));
            }
        }
        last
    }

    fn area(&self, p: NodeIx, q: NodeIx, r: NodeIx) -> f64 {
        let (p, q, r) = (&self.nodes[p], &self.nodes[q], &self.nodes[r]);
        (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)
    }

    fn equals(&self, a: NodeIx, b: NodeIx) -> bool {
        let (a, b) = (&self.nodes[a], &self.nodes[b]);
        a.x == b.x && a.y == b.y
    }

    fn emit(&mut self, a: NodeIx, b: NodeIx, c: NodeIx) {
        let (a, b, c) = (self.nodes[a].i, self.nodes[b].i, self.nodes[c].i);
        self.triangles.extend_from_slice(&[a, b, c]);
    }

    /// Remove duplicate and collinear vertices between `start` and `end`.
    fn filter_points(&mut self, start: NodeIx, end: Option<NodeIx>) -> NodeIx {
        let mut end = end.unwrap_or(start);
        let mut p = start;
        loop {
            let mut again = false;
            let next = self.next(p);
            if self.equals(p, next) || self.area(self.prev(p), p, next) == 0.0 {
                self.remove_node(p);
                p = self.prev(p);
                end = p;
                if p == self.next(p) {
                    break;
                }
                again = true;
            } else {
                p = next;
            }
            if !again && p == end {
                break;
            }
        }
        end
    }

    fn earcut_linked(&mut self, ear: NodeIx, pass: Pass) {
        let mut ear = ear;
        if pass == Pass::Initial && self.hash.is_some() {
            self.index_curve(ear);
        }

        let mut stop = ear;
        while self.prev(ear) != self.next(ear) {
            let prev = self.prev(ear);
            let next = self.next(ear);

            let is_ear = match self.hash {
                Some(hash) => self.is_ear_hashed(ear, &hash),
                None => self.is_ear(ear),
            };
            if is_ear {
                self.emit(prev, ear, next);
                self.remove_node(ear);
                // Skipping the next vertex gives fewer sliver triangles.
                ear = self.next(next);
                stop = ear;
                continue;
            }

            ear = next;
            if ear == stop {
                match pass {
                    Pass::Initial => {
                        let filtered = self.filter_points(ear, None);
                        self.earcut_linked(filtered, Pass::Filtered);
                    }
                    Pass::Filtered => {
                        let filtered = self.filter_points(ear, None);
                        let cured = self.cure_local_intersections(filtered);
                        self.earcut_linked(cured, Pass::Cured);
                    }
                    Pass::Cured => self.split_earcut(ear),
                }
                break;
            }
        }
    }

    /// True if `p` lies inside the candidate ear `abc` (bounded by `bbox`)
    /// and is a reflex vertex.
    fn obstructs(&self, p: NodeIx, a: NodeIx, b: NodeIx, c: NodeIx, bbox: [f64; 4]) -> bool {
        let [x0, y0, x1, y1] = bbox;
        let (pn, an, bn, cn) = (&self.nodes[p], &self.nodes[a], &self.nodes[b], &self.nodes[c]);
        p != a
            && p != c
            && pn.x >= x0
            && pn.x <= x1
            && pn.y >= y0
            && pn.y <= y1
            && point_in_triangle(an.x, an.y, bn.x, bn.y, cn.x, cn.y, pn.x, pn.y)
            && self.area(pn.prev, p, pn.next) >= 0.0
    }

    fn ear_bbox(&self, a: NodeIx, b: NodeIx, c: NodeIx) -> [f64; 4] {
        let (a, b, c) = (&self.nodes[a], &self.nodes[b], &self.nodes[c]);
        [
            a.x.min(b.x).min(c.x),
            a.y.min(b.y).min(c.y),
            a.x.max(b.x).max(c.x),
            a.y.max(b.y).max(c.y),
        ]
    }

    fn is_ear(&self, ear: NodeIx) -> bool {
        let (a, b, c) = (self.prev(ear), ear, self.next(ear));
        if self.area(a, b, c) >= 0.0 {
            return false;
        }
        let bbox = self.ear_bbox(a, b, c);
        let mut p = self.next(c);
        while p != a {
            if self.obstructs(p, a, b, c, bbox) {
                return false;
            }
            p = self.next(p);
        }
        true
    }

    fn is_ear_hashed(&self, ear: NodeIx, hash: &ZHash) -> bool {
        let (a, b, c) = (self.prev(ear), ear, self.next(ear));
        if self.area(a, b, c) >= 0.0 {
            return false;
        }
        let bbox = self.ear_bbox(a, b, c);
        let min_z = hash.z_order(bbox[0], bbox[1]);
        let max_z = hash.z_order(bbox[2], bbox[3]);

        // Walk outwards from the ear in both Z directions at once.
        let mut p = self.nodes[ear].prev_z;
        let mut n = self.nodes[ear].next_z;
        while let (Some(pi), Some(ni)) = (p, n) {
            if self.nodes[pi].z < min_z || self.nodes[ni].z > max_z {
                break;
            }
            if self.obstructs(pi, a, b, c, bbox) {
                return false;
            }
            p = self.nodes[pi].prev_z;
            if self.obstructs(ni, a, b, c, bbox) {
                return false;
            }
            n = self.nodes[ni].next_z;
        }
        while let Some(pi) = p {
            if self.nodes[pi].z < min_z {
                break;
            }
            if self.obstructs(pi, a, b, c, bbox) {
                return false;
            }
            p = self.nodes[pi].prev_z;
        }
        while let Some(ni) = n {
            if self.nodes[ni].z > max_z {
                break;
            }
            if self.obstructs(ni, a, b, c, bbox) {
                return false;
            }
            n = self.nodes[ni].next_z;
        }
        true
    }

    /// Clip away bowtie intersections between neighbouring edges.
    fn cure_local_intersections(&mut self, start: NodeIx) -> NodeIx {
        let mut start = start;
        let mut p = start;
        loop {
            let a = self.prev(p);
            let p_next = self.next(p);
            let b = self.next(p_next);
            if !self.equals(a, b)
                && self.intersects(a, p, p_next, b)
                && self.locally_inside(a, b)
                && self.locally_inside(b, a)
            {
                self.emit(a, p, b);
                self.remove_node(p);
                self.remove_node(p_next);
                p = b;
                start = b;
            }
            p = self.next(p);
            if p == start {
                break;
            }
        }
        self.filter_points(p, None)
    }

    /// Split the polygon along the first valid diagonal and triangulate both
    /// halves.
    fn split_earcut(&mut self, start: NodeIx) {
        let mut a = start;
        loop {
            let mut b = self.next(self.next(a));
            while b != self.prev(a) {
                if self.nodes[a].i != self.nodes[b].i && self.is_valid_diagonal(a, b) {
                    let c = self.split_polygon(a, b);
                    let a_next = self.next(a);
                    let a = self.filter_points(a, Some(a_next));
                    let c_next = self.next(c);
                    let c = self.filter_points(c, Some(c_next));
                    self.earcut_linked(a, Pass::Initial);
                    self.earcut_linked(c, Pass::Initial);
                    return;
                }
                b = self.next(b);
            }
            a = self.next(a);
            if a == start {
                break;
            }
        }
    }

    fn index_curve(&mut self, start: NodeIx) {
        let hash = match self.hash {
            Some(hash) => hash,
            None => return,
        };
        let mut p = start;
        loop {
            let node = &mut self.nodes[p];
            if node.z == 0 {
                node.z = hash.z_order(node.x, node.y);
            }
            node.prev_z = Some(node.prev);
            node.next_z = Some(node.next);
            p = node.next;
            if p == start {
                break;
            }
        }
        if let Some(tail) = self.nodes[p].prev_z {
            self.nodes[tail].next_z = None;
        }
        self.nodes[p].prev_z = None;
        self.sort_linked(p);
    }

    /// Merge sort of the Z list (Simon Tatham's linked-list variant).
    fn sort_linked(&mut self, list: NodeIx) {
        let mut list = Some(list);
        let mut in_size = 1;
        loop {
            let mut p = list;
            list = None;
            let mut tail: Option<NodeIx> = None;
            let mut num_merges = 0;

            while p.is_some() {
                num_merges += 1;
                let mut q = p;
                let mut p_size = 0;
                for _ in 0..in_size {
                    p_size += 1;
                    q = q.and_then(|ix| self.nodes[ix].next_z);
                    if q.is_none() {
                        break;
                    }
                }
                let mut q_size = in_size;

                while p_size > 0 || (q_size > 0 && q.is_some()) {
                    let take_p = p_size != 0
                        && match (p, q) {
                            (Some(pi), Some(qi)) => {
                                q_size == 0 || self.nodes[pi].z <= self.nodes[qi].z
                            }
                            _ => true,
                        };
                    let e = if take_p {
                        let e = p;
                        p = p.and_then(|ix| self.nodes[ix].next_z);
                        p_size -= 1;
                        e
                    } else {
                        let e = q;
                        q = q.and_then(|ix| self.nodes[ix].next_z);
                        q_size -= 1;
                        e
                    };
                    let e = match e {
                        Some(e) => e,
                        None => break,
                    };
                    match tail {
                        Some(t) => self.nodes[t].next_z = Some(e),
                        None => list = Some(e),
                    }
                    self.nodes[e].prev_z = tail;
                    tail = Some(e);
                }
                p = q;
            }

            if let Some(t) = tail {
                self.nodes[t].next_z = None;
            }
            if num_merges <= 1 {
                break;
            }
            in_size *= 2;
        }
    }

    fn is_valid_diagonal(&self, a: NodeIx, b: NodeIx) -> bool {
        let (na, nb) = (&self.nodes[a], &self.nodes[b]);
        self.nodes[na.next].i != nb.i
            && self.nodes[na.prev].i != nb.i
            && !self.intersects_polygon(a, b)
            && ((self.locally_inside(a, b)
                && self.locally_inside(b, a)
                && self.middle_inside(a, b)
                && (self.area(na.prev, a, nb.prev) != 0.0 || self.area(a, nb.prev, b) != 0.0))
                || (self.equals(a, b)
                    && self.area(na.prev, a, na.next) > 0.0
                    && self.area(nb.prev, b, nb.next) > 0.0))
    }

    fn on_segment(&self, p: NodeIx, q: NodeIx, r: NodeIx) -> bool {
        let (p, q, r) = (&self.nodes[p], &self.nodes[q], &self.nodes[r]);
        q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
    }

    fn intersects(&self, p1: NodeIx, q1: NodeIx, p2: NodeIx, q2: NodeIx) -> bool {
        let o1 = sign(self.area(p1, q1, p2));
        let o2 = sign(self.area(p1, q1, q2));
        let o3 = sign(self.area(p2, q2, p1));
        let o4 = sign(self.area(p2, q2, q1));

        (o1 != o2 && o3 != o4)
            || (o1 == 0 && self.on_segment(p1, p2, q1))
            || (o2 == 0 && self.on_segment(p1, q2, q1))
            || (o3 == 0 && self.on_segment(p2, p1, q2))
            || (o4 == 0 && self.on_segment(p2, q1, q2))
    }

    fn intersects_polygon(&self, a: NodeIx, b: NodeIx) -> bool {
        let (ai, bi) = (self.nodes[a].i, self.nodes[b].i);
        let mut p = a;
        loop {
            let next = self.next(p);
            let (pi, ni) = (self.nodes[p].i, self.nodes[next].i);
            if pi != ai && ni != ai && pi != bi && ni != bi && self.intersects(p, next, a, b) {
                return true;
            }
            p = next;
            if p == a {
                return false;
            }
        }
    }

    fn locally_inside(&self, a: NodeIx, b: NodeIx) -> bool {
        let na = &self.nodes[a];
        if self.area(na.prev, a, na.next) < 0.0 {
            self.area(a, b, na.next) >= 0.0 && self.area(a, na.prev, b) >= 0.0
        } else {
            self.area(a, b, na.prev) < 0.0 || self.area(a, na.next, b) < 0.0
        }
    }

    /// Even-odd test of the diagonal's midpoint against the ring.
    fn middle_inside(&self, a: NodeIx, b: NodeIx) -> bool {
        let px = (self.nodes[a].x + self.nodes[b].x) / 2.0;
        let py = (self.nodes[a].y + self.nodes[b].y) / 2.0;
        let mut inside = false;
        let mut p = a;
        loop {
            let (pn, nn) = (&self.nodes[p], &self.nodes[self.next(p)]);
            if (pn.y > py) != (nn.y > py)
                && nn.y != pn.y
                && px < (nn.x - pn.x) * (py - pn.y) / (nn.y - pn.y) + pn.x
            {
                inside = !inside;
            }
            p = pn.next;
            if p == a {
                return inside;
            }
        }
    }

    fn split_polygon(&mut self, a: NodeIx, b: NodeIx) -> NodeIx {
        let (ai, ax, ay) = (self.nodes[a].i, self.nodes[a].x, self.nodes[a].y);
        let (bi, bx, by) = (self.nodes[b].i, self.nodes[b].x, self.nodes[b].y);
        let a2 = self.push_node(ai, ax, ay);
        let b2 = self.push_node(bi, bx, by);
        let an = self.nodes[a].next;
        let bp = self.nodes[b].prev;

        self.nodes[a].next = b;
        self.nodes[b].prev = a;
        self.nodes[a2].next = an;
        self.nodes[an].prev = a2;
        self.nodes[b2].next = a2;
        self.nodes[a2].prev = b2;
        self.nodes[bp].next = b2;
        self.nodes[b2].prev = bp;
        b2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use itertools::Itertools;

    fn polygon_area(data: &[f64]) -> f64 {
        signed_area(data, 2).abs() / 2.0
    }

    fn triangles_area(data: &[f64], indices: &[usize]) -> f64 {
        indices
            .iter()
            .tuples()
            .map(|(&a, &b, &c)| {
                let (ax, ay) = (data[a * 2], data[a * 2 + 1]);
                let (bx, by) = (data[b * 2], data[b * 2 + 1]);
                let (cx, cy) = (data[c * 2], data[c * 2 + 1]);
                ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay)).abs() / 2.0
            })
            .sum()
    }

    fn regular_polygon(n: usize, radius: f64) -> Vec<f64> {
        (0..n)
            .flat_map(|k| {
                let t = k as f64 / n as f64 * std::f64::consts::TAU;
                vec![radius * t.cos(), radius * t.sin()]
            })
            .collect()
    }

    const NOTCHED: [f64; 30] = [
        661.0, 112.0, 661.0, 96.0, 666.0, 96.0, 666.0, 87.0, 743.0, 87.0, 771.0, 87.0, 771.0,
        114.0, 750.0, 114.0, 750.0, 113.0, 742.0, 113.0, 742.0, 106.0, 710.0, 106.0, 710.0, 113.0,
        666.0, 113.0, 666.0, 112.0,
    ];

    #[test]
    fn quad() {
        let data = [10.0, 0.0, 0.0, 50.0, 60.0, 60.0, 70.0, 10.0];
        assert_eq!(earcut(&data, 2), vec![1, 0, 3, 3, 2, 1]);
    }

    #[test]
    fn notched_polygon() {
        let indices = earcut(&NOTCHED, 2);
        assert_eq!(indices.len(), 13 * 3);
        assert!(approx_eq!(
            f64,
            triangles_area(&NOTCHED, &indices),
            polygon_area(&NOTCHED),
            epsilon = 1e-6
        ));
    }

    #[test]
    fn convex_polygons_give_n_minus_two_triangles() {
        // 120 vertices exercises the Z-order path.
        for &n in &[3usize, 5, 8, 17, 120] {
            let data = regular_polygon(n, 10.0);
            let indices = earcut(&data, 2);
            assert_eq!(indices.len(), (n - 2) * 3, "n = {}", n);
            assert!(approx_eq!(
                f64,
                triangles_area(&data, &indices),
                polygon_area(&data),
                epsilon = 1e-6
            ));
        }
    }

    #[test]
    fn winding_does_not_matter() {
        let mut reversed = Vec::new();
        for point in NOTCHED.chunks_exact(2).rev() {
            reversed.extend_from_slice(point);
        }
        assert_eq!(earcut(&reversed, 2).len(), 13 * 3);
    }

    #[test]
    fn ignores_extra_dimensions() {
        let data = [0.0, 0.0, 5.0, 1.0, 0.0, 5.0, 1.0, 1.0, 5.0];
        assert_eq!(earcut(&data, 3).len(), 3);
    }

    #[test]
    fn degenerate_input() {
        assert!(earcut(&[], 2).is_empty());
        assert!(earcut(&[0.0, 0.0, 1.0, 1.0], 2).is_empty());
        assert!(earcut(&[0.0, 0.0, 1.0, 1.0, 2.0, 2.0], 2).is_empty());
    }

    #[test]
    fn self_intersecting_terminates() {
        let bowtie = [0.0, 0.0, 2.0, 2.0, 2.0, 0.0, 0.0, 2.0];
        let indices = earcut(&bowtie, 2);
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| i < 4));
        assert_eq!(indices.len(), 3);
    }

    #[test]
    fn touching_lobes_are_split() {
        // Two triangles meeting at (2, 2); no ear survives until the ring is
        // split at the repeated vertex.
        let data = [0.0, 0.0, 4.0, 0.0, 2.0, 2.0, 4.0, 4.0, 0.0, 4.0, 2.0, 2.0];
        let indices = earcut(&data, 2);
        assert_eq!(indices.len(), 2 * 3);
        assert!(approx_eq!(f64, triangles_area(&data, &indices), 8.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, polygon_area(&data), 8.0, epsilon = 1e-9));
        assert_eq!(indices.iter().copied().sorted().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn concave_star_matches_earcutr() {
        let data: Vec<f64> = (0..40)
            .flat_map(|k| {
                let t = k as f64 / 40.0 * std::f64::consts::TAU;
                let r = if k % 2 == 0 { 10.0 } else { 4.0 };
                vec![r * t.cos(), r * t.sin()]
            })
            .collect();
        let ours = earcut(&data, 2);
        let theirs = earcutr::earcut(&data, &vec![], 2);
        assert_eq!(ours.len(), theirs.len());
        assert_eq!(ours.len(), 38 * 3);
    }
}
