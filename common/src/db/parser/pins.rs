use crate::db::core::RouteDB;
use crate::geom::point::Point;
use crate::geom::rect::Rect;
use anyhow::{Context, Result, anyhow, bail};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};

pub fn parse(db: &mut RouteDB, filename: &str) -> Result<()> {
    let file =
        File::open(filename).with_context(|| format!("cannot open pin file '{}'", filename))?;
    parse_reader(db, BufReader::new(file))
}

pub fn parse_reader(db: &mut RouteDB, reader: impl BufRead) -> Result<()> {
    let mut declared_pins: Option<usize> = None;
    let mut seen_boundary = false;
    let mut sites: HashSet<Point> = HashSet::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = i + 1;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "Boundary" => {
                if parts.len() < 4 {
                    bail!("line {}: malformed Boundary line", lineno);
                }
                let min = parse_coord(parts[2])
                    .ok_or_else(|| anyhow!("line {}: bad coordinate '{}'", lineno, parts[2]))?;
                let max = parse_coord(parts[3])
                    .ok_or_else(|| anyhow!("line {}: bad coordinate '{}'", lineno, parts[3]))?;
                db.die_area = Rect::new(min, max);
                seen_boundary = true;
            }
            "NumPins" => {
                if parts.len() < 3 {
                    bail!("line {}: malformed NumPins line", lineno);
                }
                let count = parts[2]
                    .parse()
                    .with_context(|| format!("line {}: bad pin count '{}'", lineno, parts[2]))?;
                declared_pins = Some(count);
            }
            "PIN" => {
                if parts.len() < 3 {
                    bail!("line {}: malformed PIN line", lineno);
                }
                let pos = parse_coord(parts[2])
                    .ok_or_else(|| anyhow!("line {}: bad coordinate '{}'", lineno, parts[2]))?;
                if !sites.insert(pos) {
                    // coincident pins can never be joined by the octant scans
                    bail!(
                        "line {}: duplicate pin site ({},{})",
                        lineno,
                        pos.x,
                        pos.y
                    );
                }
                db.add_terminal(parts[1].to_string(), pos);
            }
            _ => {}
        }
    }

    if !seen_boundary {
        bail!("missing Boundary section");
    }
    let declared = declared_pins.ok_or_else(|| anyhow!("missing NumPins section"))?;
    if db.num_terminals != declared {
        bail!("NumPins declares {} pins, found {}", declared, db.num_terminals);
    }
    if db.num_terminals == 0 {
        bail!("pin file contains no pins");
    }
    Ok(())
}

// "(x,y)" with an optional trailing comma
fn parse_coord(token: &str) -> Option<Point> {
    let inner = token
        .trim_end_matches(',')
        .strip_prefix('(')?
        .strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;
    Some(Point::new(
        x.trim().parse().ok()?,
        y.trim().parse().ok()?,
    ))
}
