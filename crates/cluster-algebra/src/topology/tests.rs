use super::*;

#[test]
fn fan_counts_match_polygon_size() {
    for n in 3..12 {
        let t = Topology::fan(n).unwrap();
        assert_eq!(t.frozens().len(), n);
        assert_eq!(t.clusters().len(), n - 3);
        assert_eq!(t.triangles().count(), n - 2);
    }
}

#[test]
fn frozen_edges_wrap_around() {
    let t = Topology::fan(5).unwrap();
    assert_eq!(t.frozen(4), Edge::new(0, 4));
    assert!(t.is_boundary(Edge::new(4, 0)));
    assert!(t.is_boundary(Edge::new(2, 3)));
    assert!(!t.is_boundary(Edge::new(0, 2)));
    assert!(t.is_cluster(Edge::new(2, 0)));
    assert!(t.contains(Edge::new(3, 4)));
    assert!(!t.contains(Edge::new(1, 3)));
    assert_eq!(t.next_vertex(4), 0);
    assert_eq!(t.previous_vertex(0), 4);
}

#[test]
fn construction_rejects_invalid_triangulations() {
    let bad = [
        (2, vec![]),
        (5, vec![Edge::new(0, 2)]),
        (5, vec![Edge::new(0, 2), Edge::new(0, 7)]),
        (5, vec![Edge::new(0, 2), Edge::new(2, 3)]),
        (5, vec![Edge::new(0, 2), Edge::new(2, 0)]),
        (5, vec![Edge::new(0, 2), Edge::new(1, 3)]),
        (5, vec![Edge::new(0, 2), Edge::new(3, 3)]),
    ];
    for (n, clusters) in bad {
        let err = Topology::new(n, clusters.clone()).unwrap_err();
        assert!(
            matches!(err, ClusterError::InvalidTopology { .. }),
            "n={n} clusters={clusters:?} gave {err:?}"
        );
    }
}

#[test]
fn square_diagonal_has_two_apexes() {
    let t = Topology::fan(4).unwrap();
    assert_eq!(t.adjacent_third_vertices(Edge::new(0, 2)), vec![1, 3]);
}

#[test]
fn triangles_of_pentagon_fan() {
    let t = Topology::fan(5).unwrap();
    let tris: Vec<_> = t.triangles().collect();
    assert_eq!(
        tris,
        vec![
            Triangle::new(0, 1, 2),
            Triangle::new(0, 2, 3),
            Triangle::new(0, 3, 4)
        ]
    );
}

#[test]
fn chords_cross_only_when_interleaved() {
    assert!(edges_cross(6, Edge::new(0, 3), Edge::new(1, 4)));
    assert!(edges_cross(6, Edge::new(1, 4), Edge::new(5, 2)));
    assert!(!edges_cross(6, Edge::new(0, 3), Edge::new(3, 5)));
    assert!(!edges_cross(6, Edge::new(0, 2), Edge::new(3, 5)));
}

#[test]
fn crossing_clusters_follow_the_arc() {
    // Hexagon fan at 0; arc from side (0,1) to side (4,5) meets every diagonal.
    let t = Topology::fan(6).unwrap();
    assert_eq!(
        t.crossing_clusters(0, 4),
        vec![
            Edge::new(0, 2),
            Edge::new(0, 3),
            Edge::new(0, 4)
        ]
    );
    // Arc from side (1,2) to side (3,4) only meets (0,2) and (0,3).
    assert_eq!(
        t.crossing_clusters(1, 3),
        vec![Edge::new(0, 2), Edge::new(0, 3)]
    );
    // An arc from a side back to itself meets nothing.
    assert!(t.crossing_clusters(2, 2).is_empty());
}

#[test]
fn crossing_order_uses_wrapped_distance() {
    // Zig-zag hexagon: (1,5), (1,4), (2,4).
    let t = Topology::new(6, vec![Edge::new(1, 5), Edge::new(1, 4), Edge::new(2, 4)]).unwrap();
    assert_eq!(
        t.crossing_clusters(5, 2),
        vec![Edge::new(1, 5), Edge::new(1, 4), Edge::new(2, 4)]
    );
}
