use rsmt_common::db::core::{Edge, RouteDB};
use rsmt_common::db::indices::PinId;
use rsmt_common::util::profiler::StageTimer;
use std::collections::BTreeSet;

// Active pins keyed by one projected coordinate. The pin id is part of the
// key, so pins sharing a coordinate are scanned in ascending id order.
type ActiveSet = BTreeSet<(i64, PinId)>;

// Two sweeps over 45-degree regions. The output is O(n) edges and always
// contains a minimum spanning tree of the complete Manhattan graph.
pub fn build(db: &RouteDB) -> Vec<Edge> {
    let _timer = StageTimer::start("Spanning graph construction");

    let n = db.num_pins();
    let mut edges = Vec::with_capacity(4 * n);
    let mut order: Vec<PinId> = (0..n).map(PinId::new).collect();

    // First sweep: pins in ascending x + y, regions split along x - y.
    order.sort_by_key(|&id| {
        let p = db.position(id);
        (p.x + p.y, id)
    });

    let mut act1 = ActiveSet::new();
    let mut act2 = ActiveSet::new();
    for &cur in &order {
        let c = db.position(cur);

        // Region 1: active pins with x <= c.x, nearest first
        while let Some(&(key, id)) = act1.range(..=(c.x, PinId(u32::MAX))).next_back() {
            let p = db.position(id);
            if p.x - p.y > c.x - c.y {
                edges.push(db.edge(id, cur));
                act1.remove(&(key, id));
            } else {
                break;
            }
        }

        // Region 2: active pins with y < c.y, nearest first
        while let Some(&(key, id)) = act2.range(..(c.y, PinId(0))).next_back() {
            let p = db.position(id);
            if p.x - p.y <= c.x - c.y {
                edges.push(db.edge(id, cur));
                act2.remove(&(key, id));
            } else {
                break;
            }
        }

        act1.insert((c.x, cur));
        act2.insert((c.y, cur));
    }

    // Second sweep: pins in ascending x - y, regions split along x + y.
    order.sort_by_key(|&id| {
        let p = db.position(id);
        (p.x - p.y, id)
    });

    let mut act3 = ActiveSet::new();
    let mut act4 = ActiveSet::new();
    for &cur in &order {
        let c = db.position(cur);

        // Region 3: active pins with y >= c.y, nearest first
        while let Some(&(key, id)) = act3.range((c.y, PinId(0))..).next() {
            let p = db.position(id);
            if p.x + p.y < c.x + c.y {
                edges.push(db.edge(id, cur));
                act3.remove(&(key, id));
            } else {
                break;
            }
        }

        // Region 4: active pins with x < c.x, nearest first
        while let Some(&(key, id)) = act4.range(..(c.x, PinId(0))).next_back() {
            let p = db.position(id);
            if p.x + p.y >= c.x + c.y {
                edges.push(db.edge(id, cur));
                act4.remove(&(key, id));
            } else {
                break;
            }
        }

        act3.insert((c.y, cur));
        act4.insert((c.x, cur));
    }

    edges
}
