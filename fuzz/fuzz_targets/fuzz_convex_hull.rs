#![no_main]

use libfuzzer_sys::arbitrary::{Arbitrary, Result, Unstructured};
use libfuzzer_sys::fuzz_target;

#[derive(Debug)]
struct FuzzCloud {
    points: Vec<(f64, f64)>,
}

impl<'a> Arbitrary<'a> for FuzzCloud {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let count = u.int_in_range(0..=200)?;
        let mut points = Vec::new();
        for _ in 0..count {
            points.push((u.arbitrary()?, u.arbitrary()?));
        }
        Ok(FuzzCloud { points })
    }
}

fuzz_target!(|cloud: FuzzCloud| {
    // Hull construction over arbitrary clouds (duplicates, collinear runs,
    // tight clusters) must either build a polygon or report a structured
    // error, never panic
    let mut model = brep2d::Model::new();
    let ids: Vec<brep2d::PositionId> = cloud
        .points
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite() && x.abs() < 1e9 && y.abs() < 1e9)
        .map(|&(x, y)| model.create_position(x, y, 0.0))
        .collect();

    if let Ok(hull) = brep2d::hull::convex_hull(&mut model, &ids) {
        // A successful hull is a closed polygon with a measurable area
        let _ = model.polygon_area(hull);
    }
});
