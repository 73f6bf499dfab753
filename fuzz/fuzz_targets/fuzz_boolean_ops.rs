#![no_main]

use libfuzzer_sys::arbitrary::{Arbitrary, Result, Unstructured};
use libfuzzer_sys::fuzz_target;

#[derive(Debug)]
struct FuzzPolygonPair {
    first: Vec<(f64, f64)>,
    second: Vec<(f64, f64)>,
}

fn arbitrary_ring(u: &mut Unstructured<'_>) -> Result<Vec<(f64, f64)>> {
    let count = u.int_in_range(0..=50)?;
    let mut points = Vec::new();
    for _ in 0..count {
        points.push((u.arbitrary()?, u.arbitrary()?));
    }
    Ok(points)
}

impl<'a> Arbitrary<'a> for FuzzPolygonPair {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(FuzzPolygonPair {
            first: arbitrary_ring(u)?,
            second: arbitrary_ring(u)?,
        })
    }
}

/// Build a polygon from fuzz coordinates, dropping values outside the
/// supported coordinate range
fn build_polygon(model: &mut brep2d::Model, ring: &[(f64, f64)]) -> Option<brep2d::PolygonId> {
    let coords: Vec<(f64, f64)> = ring
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite() && x.abs() < 1e9 && y.abs() < 1e9)
        .copied()
        .collect();
    model.create_polygon_from_coords(&coords, &[]).ok()
}

fuzz_target!(|pair: FuzzPolygonPair| {
    // Boolean operations over arbitrary (possibly self-intersecting, zero
    // area, or duplicate-vertex) rings must return a result or a structured
    // error, never panic
    let mut model = brep2d::Model::new();
    let a = build_polygon(&mut model, &pair.first);
    let b = build_polygon(&mut model, &pair.second);

    if let (Some(a), Some(b)) = (a, b) {
        let _ = brep2d::boolean::union(&mut model, &[a, b]);
        let _ = brep2d::boolean::intersection(&mut model, &[a], &[b]);
        let _ = brep2d::boolean::difference(&mut model, &[a], &[b]);
        let _ = brep2d::boolean::symmetric_difference(&mut model, &[a], &[b]);
        let _ = brep2d::boolean::resolve_self_intersections(&mut model, a);
    }
});
