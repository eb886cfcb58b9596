use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use watershed::fish::{spawn_school, Fish, HomeRange};
use watershed::{PollutionField, WaterGrid};

const WATER: Rgba<u8> = Rgba([36, 98, 198, 255]);
const LAND: Rgba<u8> = Rgba([96, 128, 56, 255]);

fn single_tile_pond() -> WaterGrid {
    let image = RgbaImage::from_pixel(8, 8, WATER);
    WaterGrid::from_image(&image, 8).expect("grid builds")
}

fn home_over_tile() -> HomeRange {
    HomeRange {
        x: 0.0,
        y: 0.0,
        width: 8.0,
        height: 8.0,
    }
}

#[test]
fn clean_water_leaves_fish_untouched() {
    let grid = single_tile_pond();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut fish = Fish::new(4.0, 4.0, home_over_tile());

    for _ in 0..50 {
        fish.update(&grid, &mut rng);
    }
    assert_eq!(fish.health, 100.0);
    assert!(fish.alive);
}

#[test]
fn pollution_at_the_harm_threshold_is_still_tolerated() {
    let mut grid = single_tile_pond();
    let field = PollutionField::default();
    field.add_pollution(&mut grid, 0, 0, 0.1);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut fish = Fish::new(4.0, 4.0, home_over_tile());
    fish.update(&grid, &mut rng);

    assert_eq!(fish.health, 100.0);
}

#[test]
fn polluted_water_wears_fish_down() {
    let mut grid = single_tile_pond();
    let field = PollutionField::default();
    field.add_pollution(&mut grid, 0, 0, 0.5);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut fish = Fish::new(4.0, 4.0, home_over_tile());
    fish.update(&grid, &mut rng);
    assert!((fish.health - 99.95).abs() < 1e-9);

    for _ in 0..9 {
        fish.update(&grid, &mut rng);
    }
    assert!((fish.health - 99.5).abs() < 1e-9);
    assert!(fish.alive);
}

#[test]
fn fish_die_at_zero_health_and_stop_updating() {
    let mut grid = single_tile_pond();
    let field = PollutionField::default();
    field.add_pollution(&mut grid, 0, 0, 1.0);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut fish = Fish::new(4.0, 4.0, home_over_tile());
    for _ in 0..1001 {
        fish.update(&grid, &mut rng);
    }
    assert!(!fish.alive);
    assert_eq!(fish.health, 0.0);

    let resting = (fish.x, fish.y);
    for _ in 0..10 {
        fish.update(&grid, &mut rng);
    }
    assert_eq!((fish.x, fish.y), resting);
}

#[test]
fn wandering_stays_inside_the_home_range() {
    let image = RgbaImage::from_pixel(64, 64, WATER);
    let grid = WaterGrid::from_image(&image, 8).expect("grid builds");
    let home = HomeRange {
        x: 16.0,
        y: 16.0,
        width: 32.0,
        height: 32.0,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut fish = Fish::new(32.0, 32.0, home);

    for _ in 0..500 {
        fish.update(&grid, &mut rng);
        assert!(fish.x >= home.x - 1.0 && fish.x <= home.x + home.width + 1.0);
        assert!(fish.y >= home.y - 1.0 && fish.y <= home.y + home.height + 1.0);
    }
}

#[test]
fn schools_spawn_on_water_only() {
    let wet = single_tile_pond();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let school = spawn_school(&wet, &mut rng, 4.0, 4.0, 3.0, 12);
    assert_eq!(school.len(), 12);

    let dry_image = RgbaImage::from_pixel(8, 8, LAND);
    let dry = WaterGrid::from_image(&dry_image, 8).expect("grid builds");
    let school = spawn_school(&dry, &mut rng, 4.0, 4.0, 3.0, 12);
    assert!(school.is_empty());
}
