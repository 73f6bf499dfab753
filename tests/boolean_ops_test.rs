//! Integration tests for boolean operations over the entity store
//!
//! Exercises whole pipelines rather than single calls:
//! - area accounting across union/intersection/difference/symmetric difference
//! - append-only behavior: inputs survive every operation untouched
//! - polyline clipping, including length conservation and closed subjects
//! - error reporting for invalid operands

mod common;

use brep2d::{Model, boolean};
use common::{open_polyline, outer_vertex_count, polyline_length, rect, square, total_area};

#[test]
fn test_union_with_self_preserves_area() {
    let mut model = Model::new();
    let a = square(&mut model, 0.0, 10.0);
    let result = boolean::union(&mut model, &[a, a]).unwrap();
    assert_eq!(result.len(), 1, "self-union must stay one polygon");
    assert!(
        (total_area(&model, &result) - 100.0).abs() < 1e-6,
        "self-union changed the area: {}",
        total_area(&model, &result)
    );
}

#[test]
fn test_union_of_many_operands_accumulates() {
    let mut model = Model::new();
    let a = rect(&mut model, 0.0, 0.0, 10.0, 10.0);
    let b = rect(&mut model, 8.0, 0.0, 18.0, 10.0);
    let c = rect(&mut model, 16.0, 0.0, 26.0, 10.0);
    let result = boolean::union(&mut model, &[a, b, c]).unwrap();
    assert_eq!(result.len(), 1);
    // 26 x 10 covered once
    assert!((total_area(&model, &result) - 260.0).abs() < 1e-6);
}

#[test]
fn test_difference_with_disjoint_clip_preserves_subject() {
    let mut model = Model::new();
    let subject = square(&mut model, 0.0, 10.0);
    let clip = square(&mut model, 20.0, 30.0);
    let result = boolean::difference(&mut model, &[subject], &[clip]).unwrap();
    assert_eq!(result.len(), 1);
    assert!((total_area(&model, &result) - 100.0).abs() < 1e-6);
    assert_eq!(outer_vertex_count(&model, result[0]), 4);
}

#[test]
fn test_difference_and_intersection_partition_the_subject() {
    let mut model = Model::new();
    let subject = square(&mut model, 0.0, 10.0);
    let clip = rect(&mut model, 5.0, 0.0, 15.0, 10.0);
    let outside = boolean::difference(&mut model, &[subject], &[clip]).unwrap();
    let inside = boolean::intersection(&mut model, &[subject], &[clip]).unwrap();
    let outside_area = total_area(&model, &outside);
    let inside_area = total_area(&model, &inside);
    assert!((outside_area - 50.0).abs() < 1e-6);
    assert!((inside_area - 50.0).abs() < 1e-6);
    assert!(
        (outside_area + inside_area - 100.0).abs() < 1e-6,
        "difference + intersection must cover the subject exactly"
    );
}

#[test]
fn test_difference_with_no_clips_unions_the_subjects() {
    let mut model = Model::new();
    let a = square(&mut model, 0.0, 10.0);
    let b = rect(&mut model, 5.0, 0.0, 15.0, 10.0);
    let result = boolean::difference(&mut model, &[a, b], &[]).unwrap();
    assert_eq!(result.len(), 1);
    assert!((total_area(&model, &result) - 150.0).abs() < 1e-6);
}

#[test]
fn test_symmetric_difference_with_one_empty_side() {
    let mut model = Model::new();
    let a = square(&mut model, 0.0, 10.0);
    let result = boolean::symmetric_difference(&mut model, &[a], &[]).unwrap();
    assert_eq!(result.len(), 1);
    assert!((total_area(&model, &result) - 100.0).abs() < 1e-6);
}

#[test]
fn test_operations_append_instead_of_mutating() {
    let mut model = Model::new();
    let a = square(&mut model, 0.0, 10.0);
    let b = rect(&mut model, 5.0, 0.0, 15.0, 10.0);
    let a_wire = model.polygon(a).unwrap().outer;
    let points_before = model.wire_points(a_wire).unwrap();
    let polygons_before = model.polygon_count();
    let wires_before = model.wire_count();

    let result = boolean::union(&mut model, &[a, b]).unwrap();

    assert_eq!(
        model.wire_points(a_wire).unwrap(),
        points_before,
        "input wire was mutated by union"
    );
    assert_eq!(model.polygon_count(), polygons_before + result.len());
    assert!(model.wire_count() > wires_before);
    assert!((model.polygon_area(a).unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn test_resolve_keeps_simple_polygon_equivalent() {
    let mut model = Model::new();
    let simple = square(&mut model, 0.0, 10.0);
    let result = boolean::resolve_self_intersections(&mut model, simple).unwrap();
    assert_eq!(result.len(), 1);
    assert!((total_area(&model, &result) - 100.0).abs() < 1e-6);
    assert_eq!(outer_vertex_count(&model, result[0]), 4);
}

#[test]
fn test_polyline_clip_conserves_length() {
    let mut model = Model::new();
    let clip = square(&mut model, 0.0, 10.0);
    let line = open_polyline(&mut model, &[(-5.0, 5.0), (15.0, 5.0)]);

    let inside = boolean::intersect_polyline(&mut model, line, &[clip]).unwrap();
    let outside = boolean::difference_polyline(&mut model, line, &[clip]).unwrap();

    let inside_len: f64 = inside.iter().map(|&id| polyline_length(&model, id)).sum();
    let outside_len: f64 = outside.iter().map(|&id| polyline_length(&model, id)).sum();
    assert!((inside_len - 10.0).abs() < 1e-6, "inside span length {}", inside_len);
    assert!((outside_len - 10.0).abs() < 1e-6, "outside span length {}", outside_len);
    assert!(
        (inside_len + outside_len - polyline_length(&model, line)).abs() < 1e-6,
        "clipping must conserve total length"
    );
}

#[test]
fn test_closed_polyline_reopens_when_cut() {
    let mut model = Model::new();
    let clip = square(&mut model, 0.0, 10.0);
    // Ring straddling the clip's right edge
    let ring = model
        .create_polyline_from_coords(
            &[(2.0, 2.0), (14.0, 2.0), (14.0, 8.0), (2.0, 8.0)],
            true,
        )
        .unwrap();
    let result = boolean::intersect_polyline(&mut model, ring, &[clip]).unwrap();
    assert_eq!(result.len(), 1, "seam pieces must merge into one run");
    let wire = model.polyline(result[0]).unwrap().wire;
    assert!(
        !model.wire(wire).unwrap().closed,
        "a partially clipped ring must come back open"
    );
    // Bottom span in + left side + top span in: 8 + 6 + 8
    assert!((polyline_length(&model, result[0]) - 22.0).abs() < 1e-6);
}

#[test]
fn test_union_rejects_open_boundary_wire() {
    let mut model = Model::new();
    let a = model.create_position(0.0, 0.0, 0.0);
    let b = model.create_position(10.0, 0.0, 0.0);
    let c = model.create_position(10.0, 10.0, 0.0);
    let open = model.create_wire(vec![a, b, c], false).unwrap();
    let polygon = model.create_polygon(open, vec![]).unwrap();
    let err = boolean::union(&mut model, &[polygon]).unwrap_err();
    assert!(err.to_string().contains("[E2002]"), "got: {}", err);
    assert!(err.to_string().contains("open"));
}

#[test]
fn test_operands_from_another_model_are_rejected() {
    let mut model = Model::new();
    let local = square(&mut model, 0.0, 10.0);
    // Ids are plain indices, so a low id from another model would alias a
    // local one; take an id past this model's end instead
    let mut other = Model::new();
    let _ = square(&mut other, 0.0, 10.0);
    let _ = square(&mut other, 20.0, 30.0);
    let stranger = square(&mut other, 40.0, 50.0);
    let err = boolean::intersection(&mut model, &[local], &[stranger]).unwrap_err();
    assert!(err.to_string().contains("[E1001]"), "got: {}", err);
}
