use image::{Rgba, RgbaImage};
use watershed::sources::{policy_rate, Discharge, FilterUnit, Runoff};
use watershed::{PollutionField, WaterGrid};

const WATER: Rgba<u8> = Rgba([36, 98, 198, 255]);
const LAND: Rgba<u8> = Rgba([96, 128, 56, 255]);

/// 8x4 tiles: the left half is a pond, the right half is shore.
fn pond_and_shore() -> WaterGrid {
    let mut image = RgbaImage::from_pixel(64, 32, LAND);
    for y in 0..32 {
        for x in 0..32 {
            image.put_pixel(x, y, WATER);
        }
    }
    WaterGrid::from_image(&image, 8).expect("grid builds")
}

#[test]
fn discharge_pipes_into_the_nearest_water_tile() {
    let mut grid = pond_and_shore();
    let field = PollutionField::default();

    // Anchored on shore at tile (5, 1); the scan reaches the pond edge at
    // column 3.
    let discharge = Discharge::new(44.0, 12.0, 0.05);
    discharge.apply(&field, &mut grid);

    assert!((grid.cell(3, 0).unwrap().pollution - 0.05).abs() < 1e-12);
    let spilled: f64 = grid.water_cells().map(|c| c.pollution).sum();
    assert!((spilled - 0.05).abs() < 1e-12, "exactly one tile receives");
}

#[test]
fn discharge_with_no_water_in_reach_emits_nothing() {
    let mut grid = pond_and_shore();
    let field = PollutionField::default();

    // Tile (7, 3) is more than two tiles from the pond.
    let discharge = Discharge::new(60.0, 28.0, 0.05);
    discharge.apply(&field, &mut grid);

    assert_eq!(grid.water_cells().map(|c| c.pollution).sum::<f64>(), 0.0);
}

#[test]
fn runoff_spreads_diluted_over_reachable_water() {
    let mut grid = pond_and_shore();
    let field = PollutionField::default();

    // Shore tile (4, 1): columns 1..=7 are in reach, of which 1..=3 are
    // water, over all four rows, so twelve cells share the load.
    let runoff = Runoff::new(36.0, 12.0, 0.12);
    runoff.apply(&field, &mut grid);

    let wet: Vec<f64> = grid
        .water_cells()
        .map(|c| c.pollution)
        .filter(|&p| p > 0.0)
        .collect();
    assert_eq!(wet.len(), 12);
    // Dilution is capped at five shares, not twelve.
    for p in wet {
        assert!((p - 0.12 / 5.0).abs() < 1e-12);
    }
}

#[test]
fn runoff_far_from_water_is_lost() {
    let mut grid = pond_and_shore();
    let field = PollutionField::default();

    let runoff = Runoff::new(60.0, 28.0, 0.12);
    runoff.apply(&field, &mut grid);

    assert_eq!(grid.water_cells().map(|c| c.pollution).sum::<f64>(), 0.0);
}

#[test]
fn filter_cleans_its_surroundings_only_while_active() {
    let mut grid = pond_and_shore();
    let field = PollutionField::default();
    field.add_pollution(&mut grid, 1, 1, 0.8);

    let mut filter = FilterUnit::new(12.0, 12.0, 0.05);
    filter.toggle(false);
    filter.apply(&field, &mut grid);
    assert!((grid.cell(1, 1).unwrap().pollution - 0.8).abs() < 1e-12);

    filter.toggle(true);
    filter.apply(&field, &mut grid);
    assert!((grid.cell(1, 1).unwrap().pollution - 0.75).abs() < 1e-12);
    // A second pass keeps pulling it down.
    filter.apply(&field, &mut grid);
    assert!((grid.cell(1, 1).unwrap().pollution - 0.70).abs() < 1e-12);
}

#[test]
fn policy_levels_map_onto_the_emission_range() {
    let mut discharge = Discharge::new(0.0, 0.0, 0.05);
    discharge.set_policy_level(0.0);
    assert_eq!(discharge.rate, 0.01);
    discharge.set_policy_level(100.0);
    assert_eq!(discharge.rate, 0.05);

    let mut runoff = Runoff::new(0.0, 0.0, 0.02);
    runoff.set_policy_level(50.0);
    assert!((runoff.rate - policy_rate(50.0)).abs() < 1e-12);
}
