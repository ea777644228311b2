//! Performance tests for visibility and level generation

use std::time::Instant;
use wukong::{compute_visible, FieldOfView, GameState, GenerationConfig, Position, TileGrid, WukongResult};

#[test]
fn test_visibility_recompute_performance() -> WukongResult<()> {
    let mut game_state = GameState::new(&GenerationConfig::new(12345))?;
    let origin = game_state.player().position;

    let start = Instant::now();
    let iterations = 200;
    for _ in 0..iterations {
        game_state.fov.invalidate();
        game_state.refresh_visibility();
    }
    let duration = start.elapsed();
    println!("{} field of view recomputations took {:?}", iterations, duration);

    // Generous bound so debug builds on slow machines pass
    assert!(duration.as_secs() < 10);
    assert!(game_state.fov.is_visible(origin));
    Ok(())
}

#[test]
fn test_open_map_visibility_is_bounded_by_radius() {
    let mut grid = TileGrid::new(80, 22);
    let cells: Vec<Position> = grid.positions().collect();
    for pos in cells {
        grid.carve(pos);
    }
    let origin = Position::new(40, 11);

    let start = Instant::now();
    let visible = compute_visible(origin, 10, &grid);
    println!("open map visibility took {:?}", start.elapsed());

    // The whole square of radius 10 fits inside the map
    assert_eq!(visible.len(), 21 * 21);
    assert!(visible
        .iter()
        .all(|p| (p.x - origin.x).abs() <= 10 && (p.y - origin.y).abs() <= 10));
}

#[test]
fn test_cached_visibility_is_free() {
    let mut grid = TileGrid::new(80, 22);
    let mut fov = FieldOfView::new(10);
    assert!(fov.refresh(Position::new(5, 5), &mut grid));

    let start = Instant::now();
    for _ in 0..10_000 {
        assert!(!fov.refresh(Position::new(5, 5), &mut grid));
    }
    assert!(start.elapsed().as_secs() < 5);
}

#[test]
fn test_generation_performance() -> WukongResult<()> {
    let start = Instant::now();
    for seed in 0..50 {
        GameState::new(&GenerationConfig::new(seed))?;
    }
    let duration = start.elapsed();
    println!("50 levels generated in {:?}", duration);
    assert!(duration.as_secs() < 10);
    Ok(())
}
