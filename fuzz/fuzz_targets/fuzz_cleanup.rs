#![no_main]

use libfuzzer_sys::arbitrary::{Arbitrary, Result, Unstructured};
use libfuzzer_sys::fuzz_target;

#[derive(Debug)]
struct FuzzChain {
    points: Vec<(f64, f64)>,
    closed: bool,
    tolerance: f64,
}

impl<'a> Arbitrary<'a> for FuzzChain {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let count = u.int_in_range(0..=100)?;
        let mut points = Vec::new();
        for _ in 0..count {
            points.push((u.arbitrary()?, u.arbitrary()?));
        }
        Ok(FuzzChain {
            points,
            closed: u.arbitrary()?,
            tolerance: u.arbitrary()?,
        })
    }
}

fuzz_target!(|chain: FuzzChain| {
    let mut model = brep2d::Model::new();
    let coords: Vec<(f64, f64)> = chain
        .points
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite() && x.abs() < 1e9 && y.abs() < 1e9)
        .copied()
        .collect();
    let Ok(line) = model.create_polyline_from_coords(&coords, chain.closed) else {
        return;
    };

    // Exercise both the accepted range and the rejection path for the
    // tolerance parameter
    let _ = brep2d::cleanup::clean_polyline(&mut model, line, chain.tolerance);
    let clamped = if chain.tolerance.is_finite() {
        chain.tolerance.abs().clamp(1e-9, 1e3)
    } else {
        0.01
    };
    let _ = brep2d::cleanup::clean_polyline(&mut model, line, clamped);
});
