//! Property tests for generation, visibility, combat and inventory invariants

use proptest::prelude::*;
use std::collections::HashSet;
use wukong::{
    compute_visible, create_rng, line, Direction, DungeonGenerator, Entity, Fighter, GameState,
    GenerationConfig, Generator, ItemKind, Position, TileGrid,
};

fn open_room(size: i32) -> TileGrid {
    let mut grid = TileGrid::new(size, size);
    for y in 1..size - 1 {
        for x in 1..size - 1 {
            grid.carve(Position::new(x, y));
        }
    }
    grid
}

fn explored_cells(grid: &TileGrid) -> HashSet<Position> {
    grid.positions().filter(|&p| grid.is_explored(p)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_rooms_never_touch_and_fit_the_map(seed in any::<u64>()) {
        let config = GenerationConfig::new(seed);
        let level = DungeonGenerator::layout_only()
            .generate(&config, &mut create_rng(&config))
            .unwrap();

        prop_assert!(!level.rooms.is_empty());
        prop_assert!(level.rooms.len() <= config.max_rooms as usize);
        for (i, a) in level.rooms.iter().enumerate() {
            prop_assert!(a.x1 >= 0 && a.y1 >= 0);
            prop_assert!(a.x2 < config.map_width && a.y2 < config.map_height);
            for b in &level.rooms[i + 1..] {
                prop_assert!(!a.intersects(b), "seed={seed}: {a:?} touches {b:?}");
            }
        }
        prop_assert!(level.rooms[0].interior_contains(level.player_start));
        prop_assert!(!level.grid.is_blocked(level.player_start));
    }

    #[test]
    fn visible_cells_are_reached_by_unobstructed_rays(
        open in prop::collection::vec(any::<bool>(), 400),
        ox in 0_i32..20,
        oy in 0_i32..20,
        radius in 0_i32..12
    ) {
        let mut grid = TileGrid::new(20, 20);
        for (i, is_open) in open.iter().enumerate() {
            if *is_open {
                grid.carve(Position::new(i as i32 % 20, i as i32 / 20));
            }
        }
        let origin = Position::new(ox, oy);
        let visible = compute_visible(origin, radius, &grid);

        let targets: Vec<Position> = (-radius..=radius)
            .flat_map(|dx| (-radius..=radius).map(move |dy| Position::new(ox + dx, oy + dy)))
            .filter(|&target| grid.in_bounds(target))
            .collect();
        let clear_before = |ray: &[Position], index: usize| {
            ray[..index].iter().all(|&cell| !grid.is_opaque(cell))
        };

        // Every visible cell lies on some ray with nothing opaque in front of it
        for &cell in &visible {
            let witnessed = targets.iter().any(|&target| {
                let ray = line(origin, target);
                ray.iter()
                    .position(|&c| c == cell)
                    .is_some_and(|index| clear_before(&ray, index))
            });
            prop_assert!(witnessed, "{cell:?} seen from {origin:?} without a clear ray");
        }

        // Every target whose own ray is clear up to it is seen
        for &target in &targets {
            let ray = line(origin, target);
            if clear_before(&ray, ray.len() - 1) {
                prop_assert!(visible.contains(&target), "{target:?} hidden from {origin:?}");
            }
        }

        prop_assert!(visible.contains(&origin));
        for cell in &visible {
            prop_assert!((cell.x - ox).abs() <= radius && (cell.y - oy).abs() <= radius);
        }
    }

    #[test]
    fn explored_only_grows(seed in any::<u64>(), moves in prop::collection::vec(0_usize..8, 0..40)) {
        let mut game_state = GameState::new(&GenerationConfig::new(seed)).unwrap();
        game_state.refresh_visibility();
        let mut explored = explored_cells(&game_state.grid);

        for step in moves {
            game_state.player_move_or_attack(Direction::all()[step]);
            game_state.refresh_visibility();
            let now = explored_cells(&game_state.grid);
            prop_assert!(explored.is_subset(&now));
            explored = now;
        }
    }

    #[test]
    fn damage_is_power_minus_defense(
        power in 0_i32..30,
        defense in 0_i32..30,
        hp in 1_i32..60
    ) {
        let mut game_state = GameState::new_with_level(open_room(7), Position::new(3, 3));
        game_state.player_mut().fighter = Some(Fighter::new(10, 0, power, None));
        let dummy = || {
            Entity::new(Position::new(4, 3), 'D', "dummy", true)
                .with_fighter(Fighter::new(hp, defense, 0, None))
        };
        game_state.add_entity(dummy());

        let first = game_state.attack(0, 1);
        prop_assert_eq!(first, power - defense);
        let expected_hp = hp - first.max(0);
        prop_assert_eq!(game_state.entities[1].fighter.as_ref().unwrap().hp, expected_hp);

        // Same stats, same damage
        game_state.entities[1] = dummy();
        prop_assert_eq!(game_state.attack(0, 1), first);
    }

    #[test]
    fn inventory_never_exceeds_capacity(attempts in 0_usize..40) {
        let mut game_state = GameState::new_with_level(open_room(7), Position::new(3, 3));
        for _ in 0..attempts {
            game_state.add_entity(Entity::item(ItemKind::QiAttack, Position::new(3, 3)));
            game_state.pick_up();
        }
        let kept = attempts.min(26);
        prop_assert_eq!(game_state.inventory.len(), kept);
        prop_assert_eq!(game_state.entities.len(), 1 + attempts - kept);
    }
}
