use rsmt_common::db::core::RouteDB;
use rsmt_common::db::indices::PinId;
use rsmt_common::geom::point::Point;
use rsmt_common::geom::rect::Rect;
use rsmt_common::util::check;
use rsmt_common::util::config::RouterConfig;
use rsmt_router::algo::dsu::DisjointSet;

fn db_from(points: &[(i64, i64)]) -> RouteDB {
    let mut db = RouteDB::new();
    for (i, &(x, y)) in points.iter().enumerate() {
        db.add_terminal(format!("P{}", i + 1), Point::new(x, y));
    }
    let far = points.iter().fold(Point::new(0, 0), |acc, &(x, y)| {
        Point::new(acc.x.max(x), acc.y.max(y))
    });
    db.die_area = Rect::bounding(Point::new(0, 0), far);
    db
}

fn brute_force_mst_cost(db: &RouteDB) -> i64 {
    let n = db.num_terminals;
    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((db.distance(PinId::new(i), PinId::new(j)), i, j));
        }
    }
    pairs.sort();
    let mut dsu = DisjointSet::new(n);
    let mut cost = 0;
    for (d, i, j) in pairs {
        if !dsu.same_set(i, j) {
            dsu.union(i, j);
            cost += d;
        }
    }
    cost
}

fn assert_rectilinear(db: &RouteDB) {
    for e in &db.tree {
        let s = db.position(e.s);
        let t = db.position(e.t);
        assert!(s.x == t.x || s.y == t.y, "diagonal edge {:?} -> {:?}", e.s, e.t);
    }
}

#[test]
fn two_pins_route_as_one_vertical_edge() {
    let mut db = db_from(&[(0, 0), (0, 5)]);
    rsmt_router::route(&mut db, &RouterConfig::default()).unwrap();

    assert_eq!(db.num_pins(), 2);
    assert_eq!(db.tree.len(), 1);
    assert_eq!(db.tree_cost(), 5);
    assert_rectilinear(&db);
    check::run(&db, true).unwrap();
}

#[test]
fn l_shaped_triple_routes_at_cost_ten() {
    let mut db = db_from(&[(0, 0), (0, 5), (5, 5)]);
    rsmt_router::route(&mut db, &RouterConfig::default()).unwrap();

    assert_eq!(db.tree_cost(), 10);
    assert_rectilinear(&db);
    check::run(&db, true).unwrap();
}

#[test]
fn right_triangle_keeps_its_wirelength_through_bending() {
    let mut db = db_from(&[(0, 0), (5, 5), (5, 0)]);
    let expected = brute_force_mst_cost(&db);
    rsmt_router::route(&mut db, &RouterConfig::default()).unwrap();

    assert_eq!(db.tree_cost(), expected);
    assert_rectilinear(&db);
    check::run(&db, true).unwrap();
}

#[test]
fn lone_diagonal_pair_gets_a_bend_pin() {
    let mut db = db_from(&[(0, 0), (3, 4)]);
    rsmt_router::route(&mut db, &RouterConfig::default()).unwrap();

    assert_eq!(db.num_pins(), 3);
    assert!(db.is_steiner(PinId::new(2)));
    assert_eq!(db.tree.len(), 2);
    assert_eq!(db.tree_cost(), 7);
    assert_rectilinear(&db);
    check::run(&db, true).unwrap();
}

#[test]
fn square_with_center_beats_the_plain_mst() {
    let mut db = db_from(&[(0, 0), (10, 0), (0, 10), (10, 10), (5, 5)]);
    let mst_cost = brute_force_mst_cost(&db);
    assert_eq!(mst_cost, 40);
    rsmt_router::route(&mut db, &RouterConfig::default()).unwrap();

    assert!(db.tree_cost() < mst_cost);
    assert!(db.num_pins() > 5);
    assert_rectilinear(&db);
    check::run(&db, true).unwrap();
}

#[test]
fn single_pin_routes_to_an_empty_tree() {
    let mut db = db_from(&[(4, 4)]);
    rsmt_router::route(&mut db, &RouterConfig::default()).unwrap();

    assert_eq!(db.num_pins(), 1);
    assert!(db.tree.is_empty());
    assert_eq!(db.tree_cost(), 0);
    check::run(&db, true).unwrap();
}

#[test]
fn empty_db_is_rejected() {
    let mut db = RouteDB::new();
    assert!(rsmt_router::route(&mut db, &RouterConfig::default()).is_err());
}

#[test]
fn steiner_refinement_never_worsens_the_mst() {
    let points: Vec<(i64, i64)> = (0..40i64)
        .map(|i| ((i * 83) % 257, (i * 131) % 263))
        .collect();

    let mut plain = db_from(&points);
    let config = RouterConfig {
        steiner_refinement: false,
        rectilinearize: false,
    };
    rsmt_router::route(&mut plain, &config).unwrap();
    let mst_cost = plain.tree_cost();
    assert_eq!(mst_cost, brute_force_mst_cost(&plain));

    let mut refined = db_from(&points);
    rsmt_router::route(&mut refined, &RouterConfig::default()).unwrap();
    assert!(refined.tree_cost() <= mst_cost);
    assert_rectilinear(&refined);
    check::run(&refined, true).unwrap();
}

#[test]
fn disabling_rectilinearization_skips_the_bend_stage() {
    let mut db = db_from(&[(0, 0), (3, 4)]);
    let config = RouterConfig {
        steiner_refinement: true,
        rectilinearize: false,
    };
    rsmt_router::route(&mut db, &config).unwrap();

    assert_eq!(db.num_pins(), 2);
    assert_eq!(db.tree.len(), 1);
    assert_eq!(db.tree_cost(), 7);
    check::run(&db, false).unwrap();
}

#[test]
fn identifiers_stay_dense_through_the_whole_pipeline() {
    let mut db = db_from(&[(0, 0), (10, 0), (0, 10), (10, 10), (5, 5), (20, 3)]);
    rsmt_router::route(&mut db, &RouterConfig::default()).unwrap();

    assert_eq!(db.positions.len(), db.names.len());
    for e in &db.tree {
        assert!(e.s.index() < db.num_pins());
        assert!(e.t.index() < db.num_pins());
    }
    for i in db.num_terminals..db.num_pins() {
        assert!(db.names[i].is_empty());
        assert!(db.is_steiner(PinId::new(i)));
    }
}
