use geotiling::{
    Config, GeoTilingError, Point, PolygonRasterizer, Tile, TileArea, TileSize, rasterize,
};

/// Vertex from (latitude, longitude).
fn vertex(lat: f64, lng: f64) -> Point {
    Point::new(lng, lat)
}

fn square(min: f64, max: f64) -> Vec<Point> {
    vec![
        vertex(min, min),
        vertex(min, max),
        vertex(max, max),
        vertex(max, min),
    ]
}

#[test]
fn test_invalid_polygon() {
    // Only two valid vertices remain once the third is discarded.
    let vertices = vec![vertex(0.0, 0.0), vertex(1.0, 1.0), vertex(500.0, 500.0)];
    let result = rasterize(&vertices, TileSize::Neighborhood, None);
    assert!(matches!(result, Err(GeoTilingError::InvalidPolygon(_))));

    let result = rasterize(&[], TileSize::Neighborhood, None);
    assert!(matches!(result, Err(GeoTilingError::InvalidPolygon(_))));
}

#[test]
fn test_square_contains_points_near_edges() {
    let area = rasterize(&square(0.0, 1.0), TileSize::District, None)
        .expect("Failed to rasterize square");

    for (lat, lng) in [(0.01, 0.01), (0.01, 0.99), (0.99, 0.99), (0.99, 0.01), (0.5, 0.5)] {
        let probe = Tile::new(lat, lng, TileSize::Neighborhood).unwrap();
        assert!(area.contains(&probe), "Should contain ({}, {})", lat, lng);
    }

    // 400 districts collapse into the single region.
    assert_eq!(area.covering_tiles(), vec![Tile::from_address("6FG2").unwrap()]);
}

#[test]
fn test_triangle() {
    let triangle = vec![vertex(0.25, 0.25), vertex(0.25, 0.75), vertex(0.75, 0.5)];
    let area = rasterize(&triangle, TileSize::District, None).expect("Failed to rasterize");

    let inside = Tile::new(0.5, 0.5, TileSize::Neighborhood).unwrap();
    assert!(area.contains(&inside));

    let outside = Tile::new(0.7, 0.3, TileSize::Neighborhood).unwrap();
    assert!(!area.contains(&outside));
    assert_eq!(area.smallest_tile_size(), Some(TileSize::District));
}

#[test]
fn test_large_polygon() {
    // 10x10 regions worth of districts, i.e. 40K additions.
    let area = rasterize(&square(0.0, 10.0), TileSize::District, None)
        .expect("Failed to rasterize large polygon");

    let counts = area.tile_count_by_size();
    assert_eq!(counts.get(&TileSize::Region), Some(&100));
    assert_eq!(area.len(), 100);
}

#[test]
fn test_maximum_merge() {
    let vertices = square(0.9, 2.1);

    let unbounded = rasterize(&vertices, TileSize::District, None).unwrap();
    let region = rasterize(&vertices, TileSize::District, Some(TileSize::Region)).unwrap();
    let district = rasterize(&vertices, TileSize::District, Some(TileSize::District)).unwrap();

    // One full region, no full global tile.
    assert_eq!(unbounded.len(), region.len());
    assert_eq!(region.len() + 399, district.len());

    assert_eq!(district.len(), 24 * 24);
    assert_eq!(region.tile_count_by_size().get(&TileSize::Region), Some(&1));
    assert!(district.tile_count_by_size().get(&TileSize::Region).is_none());
}

#[test]
fn test_vertex_order_does_not_matter() {
    let vertices = square(0.9, 2.1);
    let expected = rasterize(&vertices, TileSize::District, None)
        .unwrap()
        .tile_count_by_size();

    for start in 1..vertices.len() {
        let mut rotated = vertices.clone();
        rotated.rotate_left(start);
        let counts = rasterize(&rotated, TileSize::District, None)
            .unwrap()
            .tile_count_by_size();
        assert_eq!(counts, expected, "Starting at corner {}", start);

        rotated.reverse();
        let counts = rasterize(&rotated, TileSize::District, None)
            .unwrap()
            .tile_count_by_size();
        assert_eq!(counts, expected, "Reversed, starting at corner {}", start);
    }
}

#[test]
fn test_merge_threshold_from_config() {
    let config = Config::default().with_merge_threshold(30);
    let area = PolygonRasterizer::from_config(&config)
        .unwrap()
        .rasterize(&square(0.9, 2.1))
        .unwrap();

    let default = rasterize(&square(0.9, 2.1), TileSize::District, None).unwrap();
    assert!(area.len() < default.len());
    assert_eq!(area.merge_threshold(), 30);
}

#[test]
fn test_out_of_range_vertices_are_dropped() {
    let mut vertices = square(0.0, 1.0);
    vertices.insert(2, vertex(95.0, 0.5));
    vertices.push(vertex(f64::NAN, 0.5));

    let area = rasterize(&vertices, TileSize::District, None).unwrap();
    assert_eq!(area.covering_tiles(), vec![Tile::from_address("6FG2").unwrap()]);
}
