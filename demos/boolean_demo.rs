//! Example demonstrating boolean operations on planar polygons
//!
//! Builds a few polygons in an entity store, combines them with every
//! boolean operation, resolves a self-intersecting boundary, and clips a
//! polyline against a polygon region.
//!
//! Usage:
//! ```bash
//! cargo run --example boolean_demo
//! ```

use brep2d::{Model, PolygonId, Result, boolean};

fn main() -> Result<()> {
    println!("Planar Boolean Operations Demo");
    println!("==============================\n");

    let mut model = Model::new();

    // Two overlapping squares: (0,0)-(100,100) and (50,50)-(150,150)
    let a = model.create_polygon_from_coords(
        &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)],
        &[],
    )?;
    let b = model.create_polygon_from_coords(
        &[(50.0, 50.0), (150.0, 50.0), (150.0, 150.0), (50.0, 150.0)],
        &[],
    )?;

    println!("1. Union of Overlapping Squares");
    let merged = boolean::union(&mut model, &[a, b])?;
    report(&model, &merged)?;

    println!("2. Intersection");
    let overlap = boolean::intersection(&mut model, &[a], &[b])?;
    report(&model, &overlap)?;

    println!("3. Difference (Square 1 minus Square 2)");
    let cut = boolean::difference(&mut model, &[a], &[b])?;
    report(&model, &cut)?;

    println!("4. Symmetric Difference");
    let either = boolean::symmetric_difference(&mut model, &[a], &[b])?;
    report(&model, &either)?;

    println!("5. Self-Intersection Resolution");
    let bowtie = model.create_polygon_from_coords(
        &[(0.0, 0.0), (100.0, 100.0), (100.0, 0.0), (0.0, 100.0)],
        &[],
    )?;
    println!("   Input: bowtie with one self-crossing");
    let resolved = boolean::resolve_self_intersections(&mut model, bowtie)?;
    report(&model, &resolved)?;

    println!("6. Polyline Clipping");
    let line = model.create_polyline_from_coords(&[(-50.0, 50.0), (150.0, 50.0)], false)?;
    let kept = boolean::intersect_polyline(&mut model, line, &[a])?;
    println!("   Input: a horizontal line crossing Square 1");
    for &id in &kept {
        let wire = model.polyline(id)?.wire;
        let points = model.wire_points(wire)?;
        if let (Some(start), Some(end)) = (points.first(), points.last()) {
            println!(
                "   Output: piece from ({:.0}, {:.0}) to ({:.0}, {:.0})",
                start.0, start.1, end.0, end.1
            );
        }
    }
    println!();

    println!("✅ All boolean operations completed successfully!");
    Ok(())
}

/// Print a one-line summary of a result polygon list
fn report(model: &Model, ids: &[PolygonId]) -> Result<()> {
    let mut total = 0.0;
    for &id in ids {
        total += model.polygon_area(id)?;
    }
    println!(
        "   Output: {} polygon(s), total area {:.1}\n",
        ids.len(),
        total
    );
    Ok(())
}
