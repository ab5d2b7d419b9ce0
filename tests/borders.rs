use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voroplane::{tessellate, BorderMode, BoundingBox, Point};

fn square() -> BoundingBox {
    BoundingBox::from_corners(0.0, 0.0, 1000.0, 1000.0)
}

#[test]
fn test_no_sites_no_border_edges() {
    let edges = tessellate(&[], square(), BorderMode::WithBorders).unwrap();
    assert!(edges.is_empty());
}

#[test]
fn test_single_site_is_enclosed() {
    let edges = tessellate(&[Point::new(500.0, 500.0)], square(), BorderMode::WithBorders).unwrap();
    assert_eq!(edges.len(), 4);
    assert!(edges.iter().all(|e| e.is_border() && e.left == 0));

    let perimeter: f64 = edges.iter().map(|e| e.length()).sum();
    assert!((perimeter - 4000.0).abs() < 1e-9);
}

#[test]
fn test_two_sites_with_borders() {
    let sites = [Point::new(500.0, 700.0), Point::new(500.0, 300.0)];
    let edges = tessellate(&sites, square(), BorderMode::WithBorders).unwrap();

    let bisectors: Vec<_> = edges.iter().filter(|e| !e.is_border()).collect();
    let borders: Vec<_> = edges.iter().filter(|e| e.is_border()).collect();
    assert_eq!(bisectors.len(), 1);
    assert_eq!(borders.len(), 6);

    for e in &borders {
        let expected = if e.midpoint().y > 500.0 { 0 } else { 1 };
        assert_eq!(e.left, expected, "border edge {:?} has the wrong owner", e);
    }
}

#[test]
fn test_without_borders_has_no_border_edges() {
    let sites = [Point::new(500.0, 700.0), Point::new(500.0, 300.0)];
    let edges = tessellate(&sites, square(), BorderMode::WithoutBorders).unwrap();
    assert!(edges.iter().all(|e| !e.is_border()));
}

#[test]
fn test_border_edges_cover_the_perimeter() {
    let bounds = BoundingBox::from_corners(-10.0, 0.0, 30.0, 20.0);
    let mut rng = StdRng::seed_from_u64(21);
    let sites: Vec<Point> = (0..120)
        .map(|_| Point::new(rng.gen_range(-10.0..30.0), rng.gen_range(0.0..20.0)))
        .collect();
    let edges = tessellate(&sites, bounds, BorderMode::WithBorders).unwrap();

    let borders: Vec<_> = edges.iter().filter(|e| e.is_border()).collect();
    let perimeter: f64 = borders.iter().map(|e| e.length()).sum();
    assert!((perimeter - 120.0).abs() < 1e-9);

    for e in &borders {
        assert!(bounds.border_location(e.start).is_on_border());
        assert!(bounds.border_location(e.end).is_on_border());

        // The owner is the site closest to the middle of the stretch.
        let mid = e.midpoint();
        let owner = sites[e.left].distance(mid);
        assert!(sites.iter().all(|s| s.distance(mid) >= owner - 1e-9));

        // Counter-clockwise, with the owner on the left.
        assert!((e.end - e.start).cross(sites[e.left] - mid) > 0.0);
    }
}
