mod support;

use nalgebra::{Point3, Vector3};
use partforge::catalog::Family;
use partforge::float_types::Real;
use partforge::params::{ParamKind, ParamMap, ParamSpec, ParamValue};
use partforge::triangulated::Triangulated3D;
use partforge::{BuildError, CSGOps, Mesh};
use support::*;

fn bound_map(family: Family, pick: fn(&ParamSpec) -> Option<Real>) -> ParamMap {
    family
        .params()
        .iter()
        .filter(|spec| matches!(spec.kind, ParamKind::Number { .. }))
        .filter_map(|spec| pick(spec).map(|v| (spec.key.to_owned(), ParamValue::Number(v))))
        .collect()
}

#[test]
fn every_family_builds_a_solid() {
    for family in Family::ALL {
        for map in [
            ParamMap::new(),
            bound_map(family, |spec| spec.min),
            bound_map(family, |spec| spec.max),
        ] {
            let mesh = bsp().build(family.slug(), &map).unwrap_or_else(|e| panic!("{family}: {e}"));
            assert!(mesh.triangle_count() > 0, "{family}");
            let [dx, dy, dz] = extents(&mesh);
            assert!(dx > 0.0 && dy > 0.0 && dz > 0.0, "{family}");
            assert!(mesh.volume() > 0.0, "{family}");
            assert!(mesh.edge_census().is_closed(), "{family}: {:?}", mesh.edge_census());
        }
    }
}

#[test]
fn default_builds_are_closed_solids() {
    for family in Family::ALL {
        let mesh = partforge::build(family.slug(), &ParamMap::new())
            .unwrap_or_else(|e| panic!("{family}: {e}"));
        let census = mesh.edge_census();
        assert!(census.is_closed(), "{family}: {census:?}");
        assert!(mesh.is_manifold(), "{family}");
    }
}

#[test]
fn builds_are_deterministic() {
    for family in Family::ALL {
        let a = bsp().build(family.slug(), &ParamMap::new()).unwrap();
        let b = bsp().build(family.slug(), &ParamMap::new()).unwrap();
        assert_eq!(a.edge_census(), b.edge_census(), "{family}");
        assert_eq!(a, b, "{family}");
    }
}

#[test]
fn empty_map_equals_documented_defaults() {
    for family in Family::ALL {
        let empty = bsp().build(family.slug(), &ParamMap::new()).unwrap();
        let defaults = bsp().build(family.slug(), &family.default_params()).unwrap();
        assert_eq!(empty, defaults, "{family}");
    }
}

#[test]
fn vesa_plate_with_100_pattern() {
    let mesh = bsp()
        .build(
            "vesa-adapter",
            &params(r#"{"width": 180, "height": 180, "thickness": 6, "pattern": "100x100"}"#),
        )
        .unwrap();

    assert_extents(&mesh, [180.0, 180.0, 6.0]);
    let bb = mesh.bounding_box();
    assert!(approx_eq(bb.mins.x, -90.0, 1e-9) && approx_eq(bb.mins.z, 0.0, 1e-9));

    for (x, y) in [(50.0, 50.0), (-50.0, 50.0), (50.0, -50.0), (-50.0, -50.0)] {
        assert_eq!(vertical_crossings(&mesh, x, y), 0, "hole at ({x}, {y})");
        assert!(rim_vertices(&mesh, x, y, 0.0, 2.5) >= 32, "bottom rim at ({x}, {y})");
        assert!(rim_vertices(&mesh, x, y, 6.0, 2.5) >= 32, "top rim at ({x}, {y})");
    }
    assert_eq!(vertical_crossings(&mesh, 3.3, 7.1), 2);

    let expected = 180.0 * 180.0 * 6.0 - 4.0 * 6.0 * hole_area(2.5);
    assert!(approx_eq(mesh.volume(), expected, 1e-3), "volume {}", mesh.volume());
}

#[test]
fn vesa_free_holes_replace_the_pattern() {
    let mesh = bsp()
        .build(
            "vesa-adapter",
            &params(r#"{"holes": [{"x_mm": 10, "z_mm": -20, "d_mm": 8}, [0, 0, 0]]}"#),
        )
        .unwrap();
    assert_eq!(vertical_crossings(&mesh, 10.0, -20.0), 0);
    assert_eq!(vertical_crossings(&mesh, 0.0, 0.0), 0);
    assert_eq!(vertical_crossings(&mesh, 50.0, 50.0), 2);
}

#[test]
fn cable_tray_is_an_open_channel() {
    let mesh = bsp()
        .build("cable-tray", &params(r#"{"length": 300, "width": 60, "height": 40}"#))
        .unwrap();

    assert_extents(&mesh, [300.0, 60.0, 40.0]);
    assert_eq!(mesh.bounding_box().mins, Point3::origin());

    let expected = 300.0 * 60.0 * 40.0 - 300.0 * 54.0 * 37.0;
    assert!(approx_eq(mesh.volume(), expected, 1e-3), "volume {}", mesh.volume());

    // Floor only in the middle, full-height wall at the sides
    let floor = crossings(&mesh, Point3::new(150.0, 30.0, -10.0), Vector3::z());
    assert_eq!(floor.len(), 2);
    assert!(approx_eq(floor[1] - floor[0], 3.0, 1e-9));
    let wall = crossings(&mesh, Point3::new(150.0, 1.5, -10.0), Vector3::z());
    assert_eq!(wall.len(), 2);
    assert!(approx_eq(wall[1] - wall[0], 40.0, 1e-9));
}

#[test]
fn cable_tray_wall_is_clamped() {
    let mesh = bsp()
        .build("cable-tray", &params(r#"{"width": 40, "height": 100, "thickness": 20}"#))
        .unwrap();
    let floor = crossings(&mesh, Point3::new(90.0, 20.0, -10.0), Vector3::z());
    assert_eq!(floor.len(), 2);
    assert!(approx_eq(floor[1] - floor[0], 10.0, 1e-9));
}

#[test]
fn cable_tray_ventilation_and_side_holes() {
    let vented = bsp().build("cable-tray", &params(r#"{"ventilated": true}"#)).unwrap();
    let step = 180.0 / 7.0;
    for i in 1..=6 {
        let x = step * i as Real;
        assert_eq!(vertical_crossings(&vented, x, 30.0), 0, "vent {i}");
        assert_eq!(vertical_crossings(&vented, x + step / 2.0, 30.0), 2, "between vents {i}");
    }

    let across = |mesh: &Mesh| {
        crossings(mesh, Point3::new(90.0, -10.0, 12.5), Vector3::y()).len()
    };
    let plain = bsp().build("cable-tray", &ParamMap::new()).unwrap();
    assert_eq!(across(&plain), 4);

    let drilled = bsp()
        .build("cable-tray", &params(r#"{"holes": [{"x": 0, "z": 0, "d": 6}]}"#))
        .unwrap();
    assert_eq!(across(&drilled), 0);
}

#[test]
fn router_mount_lip_slot_and_guides() {
    let mesh = bsp().build("router-mount", &ParamMap::new()).unwrap();
    assert_extents(&mesh, [120.0, 80.0, 24.0]);

    // Slot through the centre, guide holes at ±0.25 L
    assert_eq!(vertical_crossings(&mesh, 60.0, 40.0), 0);
    assert_eq!(vertical_crossings(&mesh, 30.0, 40.0), 0);
    assert_eq!(vertical_crossings(&mesh, 90.0, 40.0), 0);
    assert_eq!(vertical_crossings(&mesh, 45.0, 20.0), 2);

    let expected = 120.0 * 80.0 * 4.0 + 120.0 * 4.0 * 20.0
        - 22.0 * 32.0 * 4.0
        - 2.0 * 4.0 * hole_area(2.25);
    assert!(approx_eq(mesh.volume(), expected, 1e-3), "volume {}", mesh.volume());
}

#[test]
fn router_hole_under_the_lip_stops_at_the_lip() {
    let mesh = bsp()
        .build("router-mount", &params(r#"{"holes": [{"x_mm": 0, "z_mm": 38, "d_mm": 3}]}"#))
        .unwrap();
    // Clean through the 4 mm base, then straight into the lip's underside
    let hits = crossings(&mesh, Point3::new(60.0, 78.0, -10.0), Vector3::z());
    assert_eq!(hits.len(), 2, "{hits:?}");
    assert!(approx_eq(hits[0], 14.0, 1e-6), "first material at z = {}", hits[0] - 10.0);
    assert!(approx_eq(hits[1], 34.0, 1e-6));
}

#[test]
fn router_slot_is_clamped_to_the_plate() {
    let mesh = bsp()
        .build("router-mount", &params(r#"{"length": 100, "slot_mm": 300}"#))
        .unwrap();
    assert_extents(&mesh, [100.0, 80.0, 24.0]);
    // 0.6 L = 60, centred: x ∈ [20, 80]
    assert_eq!(vertical_crossings(&mesh, 21.0, 30.0), 0);
    assert_eq!(vertical_crossings(&mesh, 79.0, 50.0), 0);
    assert_eq!(vertical_crossings(&mesh, 19.0, 30.0), 2);
    assert_eq!(vertical_crossings(&mesh, 81.0, 50.0), 2);
}

#[test]
fn qr_plate_hole_row() {
    let mesh = bsp().build("qr-plate", &ParamMap::new()).unwrap();
    assert_extents(&mesh, [90.0, 38.0, 8.0]);
    for x in [-11.0, 0.0, 11.0] {
        assert_eq!(vertical_crossings(&mesh, x, 0.0), 0);
    }
    assert_eq!(vertical_crossings(&mesh, 30.0, 0.0), 2);
}

#[test]
fn cable_clip_grows_with_the_cable() {
    let small = bsp().build("cable-clip", &ParamMap::new()).unwrap();
    assert_extents(&small, [18.0, 12.0, 2.4]);
    assert_eq!(vertical_crossings(&small, 0.0, 0.0), 0);

    let large = bsp().build("cable-clip", &params(r#"{"diameter": 20, "width": 30}"#)).unwrap();
    assert_extents(&large, [44.0, 30.0, 2.4]);
    assert_eq!(vertical_crossings(&large, 9.0, 0.0), 0);
    assert_eq!(vertical_crossings(&large, 15.0, 0.0), 2);
}

#[test]
fn wall_bracket_holes_cross_both_flanges() {
    let mesh = bsp().build("wall-bracket", &ParamMap::new()).unwrap();
    assert_extents(&mesh, [120.0, 40.0, 84.0]);

    assert_eq!(vertical_crossings(&mesh, 30.0, 20.0), 0);
    assert_eq!(vertical_crossings(&mesh, 90.0, 20.0), 0);
    assert_eq!(vertical_crossings(&mesh, 60.0, 20.0), 2);

    let horizontal = |z: Real| crossings(&mesh, Point3::new(100.0, 20.0, z), Vector3::x()).len();
    assert_eq!(horizontal(24.0), 0);
    assert_eq!(horizontal(64.0), 0);
    assert_eq!(horizontal(44.0), 2);

    let expected = 120.0 * 40.0 * 4.0 + 4.0 * 40.0 * 80.0 - 4.0 * 4.0 * hole_area(2.25);
    assert!(approx_eq(mesh.volume(), expected, 1e-3), "volume {}", mesh.volume());
}

#[test]
fn wall_bracket_base_hole_leaves_the_upright_whole() {
    // The hole at x = 15 reaches under the upright, which starts at x = 16
    let mesh = bsp().build("wall-bracket", &params(r#"{"length": 20}"#)).unwrap();
    let hits = crossings(&mesh, Point3::new(16.8, 20.0, -10.0), Vector3::z());
    assert!(approx_eq(hits[0], 14.0, 1e-6), "first material at z = {}", hits[0] - 10.0);
    // Upright holes at z = 24 and z = 64 cross this line too
    assert_eq!(hits.len(), 6, "{hits:?}");
    assert!(approx_eq(hits[5], 94.0, 1e-6));
}

#[test]
fn wall_hook_plate_arm_and_lip() {
    let mesh = bsp().build("wall-hook", &ParamMap::new()).unwrap();
    assert_extents(&mesh, [75.0, 60.0, 3.5]);
    assert_eq!(vertical_crossings(&mesh, 0.0, 18.0), 0);
    assert_eq!(vertical_crossings(&mesh, 0.0, -18.0), 0);
    assert_eq!(vertical_crossings(&mesh, 51.0, 0.0), 2);
    // Between the arm and the end of the lip
    assert_eq!(vertical_crossings(&mesh, 40.0, -10.0), 0);

    let expected = 3.5 * (40.0 * 60.0 + 2.0 * 35.0 * 8.0 - 8.0 * 8.0) - 2.0 * 3.5 * hole_area(2.25);
    assert!(approx_eq(mesh.volume(), expected, 1e-3), "volume {}", mesh.volume());

    let err = bsp().build("wall-hook", &params(r#"{"hole_off": 4, "hole_d": 10}"#)).unwrap_err();
    assert!(matches!(err, BuildError::InvalidDimension { ref key, .. } if key == "hole_d"));
}

#[test]
fn ssd_holder_rails_and_stops() {
    let mesh = bsp().build("ssd-holder", &ParamMap::new()).unwrap();
    assert_extents(&mesh, [101.6, 100.0, 23.0]);
    let expected = 101.6 * 100.0 * 3.0 + 2.0 * 15.875 * 100.0 * 20.0 + 2.0 * 69.85 * 3.0 * 10.0;
    assert!(approx_eq(mesh.volume(), expected, 1e-3), "volume {}", mesh.volume());

    let floor = crossings(&mesh, Point3::new(0.0, 0.0, -10.0), Vector3::z());
    assert!(approx_eq(floor[1] - floor[0], 3.0, 1e-9));
    let stop = crossings(&mesh, Point3::new(0.0, -49.0, -10.0), Vector3::z());
    assert!(approx_eq(stop[1] - stop[0], 13.0, 1e-9));

    // A bay narrower than the drive still gets rails on the base
    let narrow = bsp().build("ssd-holder", &params(r#"{"bay_w": 60}"#)).unwrap();
    assert_extents(&narrow, [71.85, 100.0, 23.0]);
}

#[test]
fn hub_holder_is_an_open_sleeve() {
    let mesh = bsp().build("hub-holder", &ParamMap::new()).unwrap();
    assert_extents(&mesh, [107.0, 37.0, 32.0]);
    let expected = 107.0 * 37.0 * 32.0 - 101.0 * 31.0 * 29.0;
    assert!(approx_eq(mesh.volume(), expected, 1e-3), "volume {}", mesh.volume());
    let floor = crossings(&mesh, Point3::new(0.0, 0.0, -10.0), Vector3::z());
    assert_eq!(floor.len(), 2);
    assert!(approx_eq(floor[1] - floor[0], 3.0, 1e-9));
}

#[test]
fn raspi_case_floor_has_the_mounting_pattern() {
    let mesh = bsp().build("raspi-case", &ParamMap::new()).unwrap();
    assert_extents(&mesh, [89.4, 60.4, 19.2]);
    for (x, y) in [(-39.0, -24.5), (19.0, -24.5), (-39.0, 24.5), (19.0, 24.5)] {
        assert_eq!(vertical_crossings(&mesh, x, y), 0, "mount hole at ({x}, {y})");
    }
    assert_eq!(vertical_crossings(&mesh, 0.0, 0.0), 2);
    let expected = 89.4 * 60.4 * 19.2 - 85.0 * 56.0 * 17.0 - 4.0 * 2.2 * hole_area(1.375);
    assert!(approx_eq(mesh.volume(), expected, 1e-3), "volume {}", mesh.volume());

    let plain = bsp().build("raspi-case", &params(r#"{"mount_holes": false}"#)).unwrap();
    assert_eq!(vertical_crossings(&plain, -39.0, -24.5), 2);
}

#[test]
fn enclosure_cable_entries_cross_the_front_wall() {
    let mesh = bsp().build("enclosure-ip65", &ParamMap::new()).unwrap();
    assert_extents(&mesh, [120.0, 68.0, 45.0]);
    let expected = 120.0 * 68.0 * 45.0 - 114.0 * 62.0 * 42.0;
    assert!(approx_eq(mesh.volume(), expected, 1e-3), "volume {}", mesh.volume());

    let across = |mesh: &Mesh| {
        crossings(mesh, Point3::new(60.0, -10.0, 22.5), Vector3::y()).len()
    };
    assert_eq!(across(&mesh), 4);
    let drilled = bsp()
        .build("enclosure", &params(r#"{"holes": [{"x_mm": 0, "z_mm": 0, "d_mm": 10}]}"#))
        .unwrap();
    assert_eq!(across(&drilled), 2);
}

#[test]
fn phone_dock_backrest_and_lip() {
    let mesh = bsp().build("phone-dock", &ParamMap::new()).unwrap();
    assert_extents(&mesh, [90.0, 110.0, 81.0]);
    let expected = 90.0 * (110.0 * 4.0 + 4.0 * 77.0 + 4.0 * 4.0);
    assert!(approx_eq(mesh.volume(), expected, 1e-3), "volume {}", mesh.volume());
    let lip = crossings(&mesh, Point3::new(45.0, 108.0, -10.0), Vector3::z());
    assert!(approx_eq(lip[1] - lip[0], 8.0, 1e-9));
}

#[test]
fn monitor_stand_is_a_bridge() {
    let mesh = bsp().build("monitor-stand", &ParamMap::new()).unwrap();
    assert_extents(&mesh, [400.0, 200.0, 70.0]);
    let expected = 400.0 * 200.0 * 70.0 - 392.0 * 200.0 * 66.0;
    assert!(approx_eq(mesh.volume(), expected, 1e-3), "volume {}", mesh.volume());

    let shelf = crossings(&mesh, Point3::new(200.0, 100.0, -10.0), Vector3::z());
    assert_eq!(shelf.len(), 2);
    assert!(approx_eq(shelf[1] - shelf[0], 4.0, 1e-9));
    let leg = crossings(&mesh, Point3::new(2.0, 100.0, -10.0), Vector3::z());
    assert!(approx_eq(leg[1] - leg[0], 70.0, 1e-9));

    let err = bsp().build("monitor-stand", &params(r#"{"width": 50, "wall": 25}"#)).unwrap_err();
    assert!(matches!(err, BuildError::InvalidDimension { ref key, .. } if key == "wall"));
}
