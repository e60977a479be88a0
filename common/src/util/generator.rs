use rand::Rng;
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;

pub fn generate_random_pins(
    filename: &str,
    num_pins: usize,
    width: i64,
    height: i64,
) -> std::io::Result<()> {
    let sites_available = (width + 1).saturating_mul(height + 1);
    if num_pins as i64 > sites_available {
        return Err(std::io::Error::other(
            "die too small for the requested pin count",
        ));
    }

    let mut file = File::create(filename)?;
    let mut rng = rand::thread_rng();

    log::info!(
        "Generating Benchmark: {} pins, Die: {}x{}",
        num_pins,
        width,
        height
    );

    writeln!(file, "Boundary = (0,0), ({},{})", width, height)?;
    writeln!(file, "NumPins = {}", num_pins)?;

    // pin sites must be distinct; coincident pins are rejected by the parser
    let mut sites = HashSet::new();
    for i in 0..num_pins {
        loop {
            let x = rng.gen_range(0..=width);
            let y = rng.gen_range(0..=height);
            if sites.insert((x, y)) {
                writeln!(file, "PIN P{} ({},{})", i + 1, x, y)?;
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::core::RouteDB;
    use crate::db::parser::pins;

    #[test]
    fn generated_file_parses_back() {
        let path = std::env::temp_dir().join("rsmt_generator_test.pins");
        let path = path.to_str().unwrap();
        generate_random_pins(path, 25, 100, 100).unwrap();

        let mut db = RouteDB::new();
        pins::parse(&mut db, path).unwrap();
        assert_eq!(db.num_terminals, 25);
        assert_eq!(db.die_area.width(), 100);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn rejects_impossible_density() {
        let path = std::env::temp_dir().join("rsmt_generator_dense.pins");
        let path = path.to_str().unwrap();
        assert!(generate_random_pins(path, 10, 2, 2).is_err());
    }
}
