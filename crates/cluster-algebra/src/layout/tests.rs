use super::*;
use crate::quiver::QuiverCfg;
use nalgebra::vector;

#[test]
fn crossing_diagonals_meet_in_the_middle() {
    let x = segment_intersection(
        vector![0.0, 0.0],
        vector![2.0, 2.0],
        vector![0.0, 2.0],
        vector![2.0, 0.0],
    )
    .unwrap();
    assert!((x - vector![1.0, 1.0]).norm() < 1e-12);
}

#[test]
fn collinear_or_distant_segments_do_not_meet() {
    assert!(segment_intersection(
        vector![0.0, 0.0],
        vector![1.0, 1.0],
        vector![2.0, 2.0],
        vector![3.0, 3.0],
    )
    .is_none());
    // Supporting lines meet at (2, 0), outside the first segment.
    assert!(segment_intersection(
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, -1.0],
        vector![2.0, 1.0],
    )
    .is_none());
}

#[test]
fn regular_layout_places_vertices_on_the_circle() {
    let layout = Layout::regular(4, LayoutCfg::default());
    assert!((layout.vertex(0) - vector![10.0, 0.0]).norm() < 1e-9);
    assert!((layout.vertex(1) - vector![0.0, 10.0]).norm() < 1e-9);
    assert!((distance(layout.vertex(0), layout.vertex(2)) - 20.0).abs() < 1e-9);
    let m = layout.frozen_midpoint(3);
    assert!((m - vector![5.0, -5.0]).norm() < 1e-9);
    let d = layout.dividing_point(Edge::new(0, 2), 0.75);
    assert!((d - vector![5.0, 0.0]).norm() < 1e-9);
}

#[test]
fn geometric_crossings_sorted_from_the_first_endpoint() {
    let q = Quiver::new(6).unwrap();
    let layout = Layout::regular(6, LayoutCfg::default());
    assert_eq!(
        geometric_crossings(&q, &layout, 1, 4).unwrap(),
        vec![Edge::new(0, 2), Edge::new(0, 3)]
    );
    assert_eq!(
        geometric_crossings(&q, &layout, 4, 1).unwrap(),
        vec![Edge::new(0, 3), Edge::new(0, 2)]
    );
    // (0, 3) ends at the chord's endpoint.
    let q5 = Quiver::new(5).unwrap();
    let layout5 = Layout::regular(5, LayoutCfg::default());
    assert_eq!(
        geometric_crossings(&q5, &layout5, 1, 3).unwrap(),
        vec![Edge::new(0, 2)]
    );
}

#[test]
fn geometric_crossings_check_their_inputs() {
    let q = Quiver::new(5).unwrap();
    let layout = Layout::regular(5, LayoutCfg::default());
    assert_eq!(
        geometric_crossings(&q, &layout, 1, 7),
        Err(ClusterError::InvalidPath {
            start: 1,
            end: 7,
            n: 5
        })
    );
    let small = Layout::regular(4, LayoutCfg::default());
    assert!(matches!(
        geometric_crossings(&q, &small, 1, 3),
        Err(ClusterError::InvalidTopology { .. })
    ));
}

#[test]
fn scene_labels_follow_names() {
    let mut q = QuiverCfg {
        n: 5,
        principal: true,
        ..QuiverCfg::default()
    }
    .build()
    .unwrap();
    q.flip_slot(2).unwrap();
    let s = scene(&q, LayoutCfg::default());
    assert_eq!(s.n, 5);
    assert_eq!(s.vertices[3].text, "v_3");
    assert_eq!(s.frozens[4].edge, Edge::new(0, 4));
    assert_eq!(s.frozens[4].label.text, "e_4");
    let names: Vec<&str> = s.clusters.iter().map(|c| c.label.text.as_str()).collect();
    assert_eq!(names, vec!["x_1", "x_2'"]);
    assert_eq!(s.laminations.len(), 2);
    assert_eq!(s.laminations[1].label.as_ref().unwrap().text, "u_2");

    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["clusters"][1]["edge"], serde_json::json!([2, 4]));
}
