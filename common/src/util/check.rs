use crate::db::core::RouteDB;
use rayon::prelude::*;
use std::collections::VecDeque;

pub fn run(db: &RouteDB, expect_rectilinear: bool) -> Result<(), String> {
    log::info!("Starting Route Verification...");

    let mut valid = true;
    let mut msgs = Vec::new();

    if expect_rectilinear {
        match check_rectilinear(db) {
            Err(e) => {
                log::error!("\x1b[31mFAIL\x1b[0m: Diagonal Edge Detected");
                log::error!("{}", e);
                msgs.push(e);
                valid = false;
            }
            Ok(_) => log::info!("\x1b[32mPASS\x1b[0m: All edges are axis-aligned."),
        }
    }

    match check_connectivity(db) {
        Err(e) => {
            log::error!("\x1b[31mFAIL\x1b[0m: Tree Does Not Span All Pins");
            log::error!("{}", e);
            msgs.push(e);
            valid = false;
        }
        Ok(_) => log::info!("\x1b[32mPASS\x1b[0m: Tree connects every pin."),
    }

    match check_costs(db) {
        Err(e) => {
            log::error!("\x1b[31mFAIL\x1b[0m: Stale Edge Cost Detected");
            log::error!("{}", e);
            msgs.push(e);
            valid = false;
        }
        Ok(_) => log::info!("\x1b[32mPASS\x1b[0m: Cached edge costs are consistent."),
    }

    if valid {
        log::info!("\x1b[32mSUCCESS\x1b[0m: VALID ROUTE");
        Ok(())
    } else {
        Err(msgs.join("; "))
    }
}

fn check_rectilinear(db: &RouteDB) -> Result<(), String> {
    let diagonal = db.tree.par_iter().find_any(|e| {
        let s = db.position(e.s);
        let t = db.position(e.t);
        s.x != t.x && s.y != t.y
    });

    match diagonal {
        Some(e) => Err(format!("edge {:?} -> {:?} is diagonal", e.s, e.t)),
        None => Ok(()),
    }
}

fn check_connectivity(db: &RouteDB) -> Result<(), String> {
    let n = db.num_pins();
    if n == 0 {
        return Ok(());
    }
    if db.tree.len() + 1 != n {
        return Err(format!("tree has {} edges for {} pins", db.tree.len(), n));
    }

    let mut adj = vec![Vec::new(); n];
    for e in &db.tree {
        adj[e.s.index()].push(e.t.index());
        adj[e.t.index()].push(e.s.index());
    }

    let mut seen = vec![false; n];
    let mut queue = VecDeque::new();
    seen[0] = true;
    queue.push_back(0);
    let mut reached = 1;
    while let Some(v) = queue.pop_front() {
        for &w in &adj[v] {
            if !seen[w] {
                seen[w] = true;
                reached += 1;
                queue.push_back(w);
            }
        }
    }

    if reached != n {
        return Err(format!("{} of {} pins reachable from pin 0", reached, n));
    }
    Ok(())
}

fn check_costs(db: &RouteDB) -> Result<(), String> {
    let stale = db
        .tree
        .par_iter()
        .find_any(|e| e.cost != db.distance(e.s, e.t));

    match stale {
        Some(e) => Err(format!(
            "edge {:?} -> {:?} caches cost {} but spans {}",
            e.s,
            e.t,
            e.cost,
            db.distance(e.s, e.t)
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point::Point;

    fn path_db() -> RouteDB {
        let mut db = RouteDB::new();
        let a = db.add_terminal("P1".to_string(), Point::new(0, 0));
        let b = db.add_terminal("P2".to_string(), Point::new(0, 5));
        let c = db.add_terminal("P3".to_string(), Point::new(4, 5));
        db.tree.push(db.edge(a, b));
        db.tree.push(db.edge(b, c));
        db
    }

    #[test]
    fn accepts_valid_tree() {
        let db = path_db();
        assert!(run(&db, true).is_ok());
    }

    #[test]
    fn flags_diagonal_edges() {
        let mut db = path_db();
        let a = crate::db::indices::PinId::new(0);
        let c = crate::db::indices::PinId::new(2);
        db.tree.pop();
        let diagonal = db.edge(a, c);
        db.tree.push(diagonal);
        assert!(run(&db, true).is_err());
        // same tree passes when rectilinearity is not demanded
        assert!(run(&db, false).is_ok());
    }

    #[test]
    fn flags_disconnected_tree() {
        let mut db = path_db();
        db.add_terminal("P4".to_string(), Point::new(9, 9));
        assert!(run(&db, true).is_err());
    }

    #[test]
    fn flags_stale_costs() {
        let mut db = path_db();
        db.tree[0].cost += 1;
        assert!(run(&db, true).is_err());
    }

    #[test]
    fn accepts_empty_db() {
        let db = RouteDB::new();
        assert!(run(&db, true).is_ok());
    }

    #[test]
    fn flags_wrong_edge_count() {
        let mut db = path_db();
        let extra = db.edge(
            crate::db::indices::PinId::new(0),
            crate::db::indices::PinId::new(2),
        );
        db.tree.push(extra);
        assert!(run(&db, false).is_err());
    }
}
