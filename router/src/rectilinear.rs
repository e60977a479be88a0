use rsmt_common::db::core::{Edge, RouteDB};
use rsmt_common::geom::point::Point;
use rsmt_common::util::profiler::StageTimer;

// Bends every diagonal edge into two axis-aligned segments through a new
// pin at (source.x, sink.y). Total Manhattan length is unchanged.
pub fn run(db: &mut RouteDB, tree: &mut Vec<Edge>) {
    let _timer = StageTimer::start("Rectilinearization");

    // Edges appended below are axis-aligned by construction; only the
    // edges present at entry need a look.
    let end = tree.len();
    for i in 0..end {
        let Edge { s, t, .. } = tree[i];
        // read both endpoints before the pin arena can grow
        let sp = db.position(s);
        let tp = db.position(t);
        if sp.x == tp.x || sp.y == tp.y {
            continue;
        }

        let bend_pos = Point::new(sp.x, tp.y);
        let bend = db.add_steiner(bend_pos);
        tree.push(Edge::new(s, bend, sp.manhattan(bend_pos)));
        tree[i].s = bend;
        tree[i].cost = tp.manhattan(bend_pos);
    }
}
