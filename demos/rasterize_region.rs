//! Polygon Rasterization Example
//!
//! Rasterizes the outline of Lake Zurich at neighborhood precision and shows
//! how merging and the maximum merged size change the resulting tile set.
//!
//! Run with `RUST_LOG=debug` to see the rasterizer's scanline summary.

use geotiling::{Config, Point, PolygonRasterizer, Tile, TileArea, TileSize};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== Polygon Rasterization with geotiling ===\n");

    let lake = vec![
        Point::new(8.5410, 47.3660),
        Point::new(8.6010, 47.3130),
        Point::new(8.6830, 47.2630),
        Point::new(8.8100, 47.2240),
        Point::new(8.8350, 47.2330),
        Point::new(8.7000, 47.2800),
        Point::new(8.6200, 47.3260),
        Point::new(8.5530, 47.3660),
    ];

    // === Example 1: Default merging ===
    println!("1. Neighborhood precision, unbounded merging");
    let area = PolygonRasterizer::new()
        .precision(TileSize::Neighborhood)
        .rasterize(&lake)?;
    print_counts(&area.tile_count_by_size());

    // === Example 2: Capped merging from configuration ===
    println!("\n2. Same polygon, merging capped at district size");
    let config = Config::from_json(
        r#"{ "precision": "neighborhood", "max_merged_size": "district" }"#,
    )?;
    let capped = PolygonRasterizer::from_config(&config)?.rasterize(&lake)?;
    print_counts(&capped.tile_count_by_size());

    // === Example 3: Point queries ===
    println!("\n3. Point queries");
    for (name, lat, lng) in [
        ("Lake center near Meilen", 47.2700, 8.6500),
        ("Zurich main station", 47.3779, 8.5403),
    ] {
        println!("   {:<24} inside: {}", name, area.contains_point(lat, lng));
    }

    // === Example 4: Tile neighborhood ===
    println!("\n4. Neighbors of the tile at the lake's western tip");
    let tip = Tile::new(47.3660, 8.5410, TileSize::District)?;
    for neighbor in tip.neighbors() {
        println!(
            "   {} (direction {:>6.1}°, in area: {})",
            neighbor,
            neighbor.direction(&tip)?.to_degrees(),
            area.contains(&neighbor)
        );
    }

    Ok(())
}

fn print_counts(counts: &std::collections::BTreeMap<TileSize, usize>) {
    for (size, count) in counts {
        println!("   {:<13} {}", size.name(), count);
    }
}
