use crate::db::core::RouteDB;
use crate::geom::point::Point;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as ImageRect;
use std::path::Path;

pub fn draw_tree(db: &RouteDB, filename: &str, width: u32, height: u32) {
    let mut img = RgbImage::from_pixel(width, height, Rgb([20, 20, 20]));

    let die_w = db.die_area.width();
    let die_h = db.die_area.height();
    if die_w <= 0 || die_h <= 0 {
        return;
    }

    let scale_x = width as f64 / die_w as f64;
    let scale_y = height as f64 / die_h as f64;

    let map = |p: Point| {
        (
            (p.x - db.die_area.min.x) as f64 * scale_x,
            height as f64 - (p.y - db.die_area.min.y) as f64 * scale_y,
        )
    };

    let wire_color = Rgb([90, 140, 255]);
    for e in &db.tree {
        let (x1, y1) = map(db.position(e.s));
        let (x2, y2) = map(db.position(e.t));
        draw_line_segment_mut(
            &mut img,
            (x1 as f32, y1 as f32),
            (x2 as f32, y2 as f32),
            wire_color,
        );
    }

    let terminal_color = Rgb([0, 190, 80]);
    let steiner_color = Rgb([210, 60, 60]);
    for i in 0..db.num_pins() {
        let (x, y) = map(db.positions[i]);
        let color = if i < db.num_terminals {
            terminal_color
        } else {
            steiner_color
        };
        let rect = ImageRect::at(x as i32 - 2, y as i32 - 2).of_size(5, 5);
        draw_filled_rect_mut(&mut img, rect, color);
    }

    let _ = img.save(Path::new(filename));
}
