//! Example demonstrating polygon and polyline offsetting
//!
//! Grows and shrinks a polygon with each joint style, then turns an open
//! polyline into ribbon polygons with each end-cap style.
//!
//! Usage:
//! ```bash
//! cargo run --example offset_demo
//! ```

use brep2d::{EndStyle, JointStyle, Model, PolygonId, Result, offset};

fn main() -> Result<()> {
    println!("Offset Demo");
    println!("===========\n");

    let mut model = Model::new();
    let square = model.create_polygon_from_coords(
        &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)],
        &[],
    )?;

    println!("1. Growing a 100 x 100 Square by 10");
    let joints = [
        ("mitre", JointStyle::Mitre { limit: 4.0 }),
        ("square", JointStyle::Square),
        ("round", JointStyle::Round { tolerance: 0.05 }),
    ];
    for (name, joint) in joints {
        let grown = offset::offset_polygon(&mut model, square, 10.0, joint)?;
        print_result(&model, name, &grown)?;
    }
    println!();

    println!("2. Shrinking the Same Square by 10");
    let shrunk = offset::offset_polygon(&mut model, square, -10.0, JointStyle::Square)?;
    print_result(&model, "inward", &shrunk)?;
    println!();

    println!("3. Ribbons Around an Open Polyline");
    let path = model.create_polyline_from_coords(
        &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)],
        false,
    )?;
    let caps = [
        ("butt", EndStyle::Butt),
        ("square", EndStyle::Square),
        ("round", EndStyle::Round),
    ];
    for (name, cap) in caps {
        let ribbon =
            offset::offset_polyline(&mut model, path, 5.0, JointStyle::Mitre { limit: 4.0 }, cap)?;
        print_result(&model, name, &ribbon)?;
    }
    println!();

    println!("4. Two-Sided Ribbon Around a Closed Ring");
    let ring = model.create_polyline_from_coords(
        &[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)],
        true,
    )?;
    let annulus = offset::offset_polyline(
        &mut model,
        ring,
        5.0,
        JointStyle::Mitre { limit: 4.0 },
        EndStyle::Butt,
    )?;
    for &id in &annulus {
        let holes = model.polygon(id)?.holes.len();
        println!(
            "   Output: area {:.1} with {} hole(s)",
            model.polygon_area(id)?,
            holes
        );
    }
    println!();

    println!("✅ All offset operations completed successfully!");
    Ok(())
}

/// Print one offset result with its style label
fn print_result(model: &Model, label: &str, ids: &[PolygonId]) -> Result<()> {
    let mut total = 0.0;
    for &id in ids {
        total += model.polygon_area(id)?;
    }
    println!(
        "   {:<8} {} polygon(s), total area {:.1}",
        label,
        ids.len(),
        total
    );
    Ok(())
}
