use crate::db::indices::PinId;
use crate::geom::point::Point;
use crate::geom::rect::Rect;

#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub s: PinId,
    pub t: PinId,
    pub cost: i64,
}

impl Edge {
    pub fn new(s: PinId, t: PinId, cost: i64) -> Self {
        Self { s, t, cost }
    }

    // (sink, source) key for ordered-set storage
    pub fn key(&self) -> (PinId, PinId) {
        (self.t, self.s)
    }
}

// An edge is identified by its endpoints; cost is a cached derived value.
impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.s == other.s && self.t == other.t
    }
}

impl Eq for Edge {}

pub struct RouteDB {
    pub positions: Vec<Point>,
    pub names: Vec<String>,
    pub num_terminals: usize,
    pub die_area: Rect,
    pub tree: Vec<Edge>,
}

impl RouteDB {
    pub fn new() -> Self {
        Self {
            positions: Vec::with_capacity(1000),
            names: Vec::with_capacity(1000),
            num_terminals: 0,
            die_area: Rect::default(),
            tree: Vec::new(),
        }
    }

    pub fn num_pins(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn position(&self, pin: PinId) -> Point {
        self.positions[pin.index()]
    }

    pub fn add_terminal(&mut self, name: String, pos: Point) -> PinId {
        debug_assert_eq!(self.num_terminals, self.positions.len());
        let id = PinId::new(self.positions.len());
        self.positions.push(pos);
        self.names.push(name);
        self.num_terminals += 1;
        id
    }

    pub fn add_steiner(&mut self, pos: Point) -> PinId {
        let id = PinId::new(self.positions.len());
        self.positions.push(pos);
        self.names.push(String::new());
        id
    }

    pub fn is_steiner(&self, pin: PinId) -> bool {
        pin.index() >= self.num_terminals
    }

    pub fn distance(&self, a: PinId, b: PinId) -> i64 {
        self.position(a).manhattan(self.position(b))
    }

    pub fn edge(&self, s: PinId, t: PinId) -> Edge {
        Edge::new(s, t, self.distance(s, t))
    }

    pub fn tree_cost(&self) -> i64 {
        self.tree.iter().map(|e| self.distance(e.s, e.t)).sum()
    }
}
