use geotiling::codec;
use geotiling::{GeoTilingError, Tile, TileSize};

fn tile(address: &str) -> Tile {
    Tile::from_address(address).unwrap_or_else(|e| panic!("{}: {}", address, e))
}

/// Tiles spread over the globe, including polar rows and both antimeridian columns.
fn sample_tiles() -> Vec<Tile> {
    let locations = [
        (0.0, 0.0),
        (47.3769, 8.5417),
        (-33.8688, 151.2093),
        (89.99, -179.99),
        (-89.99, 179.99),
        (64.1466, -21.9426),
        (-0.0001, -0.0001),
        (1.0, 179.9999),
        (1.0, -180.0),
    ];

    let mut tiles = Vec::new();
    for (lat, lng) in locations {
        for size in TileSize::ALL {
            tiles.push(Tile::new(lat, lng, size).expect("Failed to create tile"));
        }
    }
    tiles
}

#[test]
fn test_tile_code_literal() {
    assert_eq!(tile("C9").tile_code(), "C9000000+");
    assert!(codec::is_full(&tile("C9").tile_code()));
    assert!(codec::is_padded(&tile("C9").tile_code()));
}

#[test]
fn test_address_round_trip() {
    for t in sample_tiles() {
        let parsed = tile(t.address());
        assert_eq!(parsed.address(), t.address());
        assert_eq!(parsed.size(), t.size());
    }
}

#[test]
fn test_code_round_trip() {
    for t in sample_tiles() {
        let from_code = Tile::from_code(&t.tile_code()).expect("Failed to parse tile code");
        assert_eq!(from_code, t);
    }
}

#[test]
fn test_containment_reflexive_and_transitive() {
    for t in sample_tiles() {
        assert!(t.contains(&t), "{} should contain itself", t);
    }

    let a = tile("8FVC");
    let b = tile("8FVC9G");
    let c = tile("8FVC9G8F6X");
    assert!(a.contains(&b) && b.contains(&c));
    assert!(a.contains(&c));

    let mut ancestor = Some(c.clone());
    while let Some(current) = ancestor {
        assert!(current.contains(&c));
        ancestor = current.parent();
    }
}

#[test]
fn test_tile_contains_its_center() {
    for t in sample_tiles() {
        let center = t.center();
        let probe = Tile::new(center.y(), center.x(), TileSize::Pinpoint).unwrap();
        assert!(t.contains(&probe), "{} should contain its center", t);
    }
}

#[test]
fn test_neighbor_symmetry() {
    for t in sample_tiles() {
        for neighbor in t.neighbors() {
            assert_eq!(neighbor.size(), t.size());
            assert!(t.is_neighbor(&neighbor), "{} / {}", t, neighbor);
            assert!(neighbor.is_neighbor(&t), "{} / {}", neighbor, t);
        }
    }
}

#[test]
fn test_self_non_adjacency() {
    for t in sample_tiles() {
        assert!(!t.is_neighbor(&t), "{} is its own neighbor", t);
        assert!(!t.neighbors().contains(&t));
    }
}

#[test]
fn test_neighbors_are_one_step_away() {
    for t in sample_tiles() {
        for neighbor in t.neighbors() {
            assert_eq!(t.chebyshev_distance(&neighbor), Ok(1), "{} / {}", t, neighbor);
        }
    }
}

#[test]
fn test_literal_neighbors() {
    let origin = tile("8CRW2X");
    assert!(origin.is_neighbor(&tile("8CQWXW")));
    assert!(!origin.is_neighbor(&tile("3FHP99")));
}

#[test]
fn test_distance_symmetry() {
    let tiles = sample_tiles();
    for a in &tiles {
        for b in tiles.iter().filter(|b| b.size() == a.size()) {
            assert_eq!(a.manhattan_distance(b), b.manhattan_distance(a), "{} / {}", a, b);
            assert_eq!(a.chebyshev_distance(b), b.chebyshev_distance(a), "{} / {}", a, b);
        }
    }
}

#[test]
fn test_literal_distances() {
    let from = tile("9F53");
    let to = tile("8FXG");
    assert_eq!(from.manhattan_distance(&to), Ok(13));
    assert_eq!(from.chebyshev_distance(&to), Ok(9));
}

#[test]
fn test_antimeridian_wraparound() {
    // First longitude digits 2 (at -180°) and V (up to 180°) are adjacent.
    let west = tile("92");
    let east = tile("9V");
    assert_eq!(west.manhattan_distance(&east), Ok(1));
    assert_eq!(west.chebyshev_distance(&east), Ok(1));
    assert!(west.is_neighbor(&east));

    let west = Tile::new(1.0, -179.99, TileSize::District).unwrap();
    let east = Tile::new(1.0, 179.99, TileSize::District).unwrap();
    assert_eq!(west.manhattan_distance(&east), Ok(1));
    assert!(west.is_neighbor(&east));
}

#[test]
fn test_size_mismatch_is_reported() {
    let result = tile("9F53").manhattan_distance(&tile("9F53XX"));
    assert_eq!(
        result,
        Err(GeoTilingError::SizeMismatch {
            expected: TileSize::Region,
            actual: TileSize::District,
        })
    );
}

#[test]
fn test_children_cover_parent_bounds() {
    let parent = tile("8FVC9G");
    let bounds = parent.bounds();
    let children = parent.children();

    let south = children.iter().map(|c| c.bounds().south).fold(f64::INFINITY, f64::min);
    let north = children.iter().map(|c| c.bounds().north).fold(f64::NEG_INFINITY, f64::max);
    assert!((south - bounds.south).abs() < 1e-9);
    assert!((north - bounds.north).abs() < 1e-9);
    assert!(children.iter().all(|c| c.parent().as_ref() == Some(&parent)));
}
