use crate::merge_tree::Query;
use priority_queue::PriorityQueue;
use rsmt_common::db::core::{Edge, RouteDB};
use rsmt_common::db::indices::PinId;
use rsmt_common::geom::rect::Rect;
use rsmt_common::util::profiler::StageTimer;
use std::collections::BTreeSet;

// Applies profitable swaps best-gain first. Each one retires two tree
// edges and joins w, c_edge.s and c_edge.t at a new Steiner pin.
pub fn improve(db: &mut RouteDB, tree: Vec<Edge>, queries: Vec<Query>) -> Vec<Edge> {
    let _timer = StageTimer::start("Steiner refinement");

    // tree edges are retired logically; the edge list itself is not mutated
    let mut alive: BTreeSet<(PinId, PinId)> = tree.iter().map(|e| e.key()).collect();

    let mut ranked = PriorityQueue::new();
    for (i, query) in queries.iter().enumerate() {
        if query.gain > 0 {
            ranked.push(i, query.gain);
        }
    }

    let mut added = Vec::new();
    let mut applied = 0usize;
    while let Some((i, _)) = ranked.pop() {
        let query = &queries[i];
        let Some(d_edge) = query.d_edge else { continue };

        // a higher-gain swap may already have consumed either edge
        if !alive.contains(&query.c_edge.key()) || !alive.contains(&d_edge.key()) {
            continue;
        }
        alive.remove(&query.c_edge.key());
        alive.remove(&d_edge.key());

        let span = Rect::bounding(
            db.position(query.c_edge.s),
            db.position(query.c_edge.t),
        );
        let steiner = db.add_steiner(span.clamp(db.position(query.w)));
        added.push(db.edge(query.w, steiner));
        added.push(db.edge(query.c_edge.s, steiner));
        added.push(db.edge(query.c_edge.t, steiner));
        applied += 1;
    }

    log::info!("Applied {} Steiner swaps", applied);

    let mut result: Vec<Edge> = tree
        .into_iter()
        .filter(|e| alive.contains(&e.key()))
        .collect();
    result.append(&mut added);
    result
}
