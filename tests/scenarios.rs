use voroplane::{tessellate, BorderMode, BoundingBox, Edge, Point, SiteId};

const SIZE: f64 = 1000.0;
const TOLERANCE: f64 = 1e-6;

type ExpectedEdge = ((f64, f64), (f64, f64), SiteId, SiteId);

/// Rotates counter-clockwise about the center of the square in quarter turns.
fn rotate(p: Point, quarter_turns: u32) -> Point {
    (0..quarter_turns).fold(p, |q, _| Point::new(SIZE - q.y, q.x))
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
}

fn matches(edge: &Edge, a: Point, b: Point, s: SiteId, t: SiteId) -> bool {
    let same_points = (close(edge.start, a) && close(edge.end, b)) || (close(edge.start, b) && close(edge.end, a));
    same_points && edge.separates(s, t)
}

fn check(sites: &[(f64, f64)], expected: &[ExpectedEdge], quarter_turns: u32) {
    let sites: Vec<Point> = sites
        .iter()
        .map(|&p| rotate(Point::from(p), quarter_turns))
        .collect();
    let bounds = BoundingBox::from_corners(0.0, 0.0, SIZE, SIZE);
    let edges = tessellate(&sites, bounds, BorderMode::WithoutBorders).expect("valid input");

    assert_eq!(
        edges.len(),
        expected.len(),
        "edge count mismatch after {} quarter turns: {:?}",
        quarter_turns,
        edges
    );

    for &(a, b, s, t) in expected {
        let a = rotate(Point::from(a), quarter_turns);
        let b = rotate(Point::from(b), quarter_turns);
        assert!(
            edges.iter().any(|e| matches(e, a, b, s, t)),
            "missing edge {:?} -> {:?} between {} and {} after {} quarter turns: {:?}",
            a,
            b,
            s,
            t,
            quarter_turns,
            edges
        );
    }

    for edge in &edges {
        let dir = edge.end - edge.start;
        let mid = edge.midpoint();
        assert!(dir.cross(sites[edge.left] - mid) > 0.0, "left site on the wrong side of {:?}", edge);
        if let Some(r) = edge.right {
            assert!(dir.cross(sites[r] - mid) < 0.0, "right site on the wrong side of {:?}", edge);
        }
    }
}

macro_rules! scenario {
    ($name:ident, $sites:expr, $expected:expr) => {
        mod $name {
            use super::*;

            #[test]
            fn original() {
                check(&$sites, &$expected, 0);
            }

            #[test]
            fn rotated_90() {
                check(&$sites, &$expected, 1);
            }

            #[test]
            fn rotated_180() {
                check(&$sites, &$expected, 2);
            }

            #[test]
            fn rotated_270() {
                check(&$sites, &$expected, 3);
            }
        }
    };
}

const NO_SITES: [(f64, f64); 0] = [];
const NO_EDGES: [ExpectedEdge; 0] = [];

scenario!(zero_sites, NO_SITES, NO_EDGES);

scenario!(one_site_center, [(500.0, 500.0)], NO_EDGES);

scenario!(one_site_corner, [(0.0, 0.0)], NO_EDGES);

scenario!(
    two_sites_vertical,
    [(500.0, 700.0), (500.0, 300.0)],
    [((0.0, 500.0), (1000.0, 500.0), 0, 1)]
);

scenario!(
    two_sites_diagonal,
    [(300.0, 700.0), (700.0, 300.0)],
    [((0.0, 0.0), (1000.0, 1000.0), 0, 1)]
);

scenario!(
    four_sites_square,
    [(300.0, 700.0), (300.0, 300.0), (700.0, 300.0), (700.0, 700.0)],
    [
        ((500.0, 500.0), (500.0, 1000.0), 0, 3),
        ((500.0, 500.0), (0.0, 500.0), 0, 1),
        ((500.0, 500.0), (500.0, 0.0), 1, 2),
        ((500.0, 500.0), (1000.0, 500.0), 2, 3),
    ]
);

scenario!(
    five_sites_fork,
    [(500.0, 900.0), (300.0, 700.0), (300.0, 100.0), (700.0, 100.0), (700.0, 700.0)],
    [
        ((200.0, 1000.0), (500.0, 700.0), 0, 1),
        ((500.0, 700.0), (800.0, 1000.0), 0, 4),
        ((0.0, 400.0), (500.0, 400.0), 1, 2),
        ((500.0, 400.0), (500.0, 700.0), 1, 4),
        ((500.0, 0.0), (500.0, 400.0), 2, 3),
        ((1000.0, 400.0), (500.0, 400.0), 3, 4),
    ]
);

scenario!(
    three_collinear_sites,
    [(100.0, 500.0), (500.0, 500.0), (900.0, 500.0)],
    [
        ((300.0, 0.0), (300.0, 1000.0), 0, 1),
        ((700.0, 0.0), (700.0, 1000.0), 1, 2),
    ]
);

scenario!(
    sites_on_the_border,
    [(0.0, 500.0), (1000.0, 500.0)],
    [((500.0, 0.0), (500.0, 1000.0), 0, 1)]
);

#[test]
fn test_duplicate_sites_share_one_cell() {
    let sites = [Point::new(500.0, 700.0), Point::new(500.0, 300.0), Point::new(500.0, 700.0)];
    let bounds = BoundingBox::from_corners(0.0, 0.0, SIZE, SIZE);
    let edges = tessellate(&sites, bounds, BorderMode::WithoutBorders).unwrap();
    assert_eq!(edges.len(), 1);
    assert!(edges[0].separates(0, 1));
}
