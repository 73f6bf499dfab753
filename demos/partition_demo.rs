//! Example demonstrating Delaunay and Voronoi partitions
//!
//! Scatters sites over a region, triangulates them, and builds the matching
//! Voronoi cell polygons clipped to a bounding rectangle.
//!
//! Usage:
//! ```bash
//! cargo run --example partition_demo --features partition
//! ```

use brep2d::{Model, Rect, Result, partition};

fn main() -> Result<()> {
    println!("Partition Demo");
    println!("==============\n");

    let mut model = Model::new();

    // A 4 x 4 jittered site grid over a 100 x 100 region
    let mut sites = Vec::new();
    for j in 0..4 {
        for i in 0..4 {
            let jitter = ((i * 7 + j * 13) % 10) as f64 - 4.5;
            sites.push(model.create_position(
                12.5 + 25.0 * i as f64 + jitter,
                12.5 + 25.0 * j as f64 - jitter,
                0.0,
            ));
        }
    }
    println!("Sites: {}", sites.len());
    println!();

    println!("1. Delaunay Triangulation");
    let triangles = partition::delaunay_triangles(&mut model, &sites)?;
    let mut covered = 0.0;
    for &id in &triangles {
        covered += model.polygon_area(id)?;
    }
    println!(
        "   Output: {} triangles covering area {:.1}",
        triangles.len(),
        covered
    );
    println!("   (triangles share the original site positions)");
    println!();

    println!("2. Voronoi Cells");
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let cells = partition::voronoi_cells(&mut model, &sites, bounds)?;
    let mut tiled = 0.0;
    for &id in &cells {
        tiled += model.polygon_area(id)?;
    }
    println!(
        "   Output: {} cells tiling area {:.1} of the 100 x 100 bounds",
        cells.len(),
        tiled
    );
    for (i, &id) in cells.iter().enumerate().take(3) {
        let wire = model.polygon(id)?.outer;
        let corners = model.wire(wire)?.positions.len();
        println!("   cell {} has {} corners, area {:.1}", i, corners, model.polygon_area(id)?);
    }
    println!();

    println!("✅ All partition operations completed successfully!");
    Ok(())
}
