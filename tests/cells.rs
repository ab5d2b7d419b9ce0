use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voroplane::{build_diagram, BorderMode, BoundingBox, Cell, CellScratch, Point, Tessellation, BOX_ID_LEFT};

fn random_sites(seed: u64, count: usize, bounds: &BoundingBox) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Point::new(
                rng.gen_range(bounds.min[0]..bounds.max[0]),
                rng.gen_range(bounds.min[1]..bounds.max[1]),
            )
        })
        .collect()
}

/// The cell of `site` cut by the bisector of every other site.
fn brute_force_cell(sites: &[Point], site: usize, bounds: &BoundingBox) -> Cell {
    let mut cell = Cell::new(site, bounds);
    let mut scratch = CellScratch::default();
    let g = sites[site];
    for (j, &n) in sites.iter().enumerate() {
        if j != site {
            cell.clip(g.midpoint(n), n - g, j as i32, &mut scratch);
        }
    }
    cell
}

#[test]
fn test_cell_areas_sum_to_rectangle() {
    let bounds = BoundingBox::from_corners(-5.0, -5.0, 15.0, 5.0);
    let sites = random_sites(11, 500, &bounds);
    let diagram = build_diagram(&sites, bounds, BorderMode::WithoutBorders).unwrap();

    let cells = diagram.cells();
    assert_eq!(cells.len(), sites.len());
    let total: f64 = cells.iter().map(|c| c.area()).sum();
    let error = (total - bounds.area()).abs() / bounds.area();
    assert!(error < 1e-9, "Area error too high: {:.4e}", error);
}

#[test]
fn test_cells_match_half_plane_oracle() {
    let bounds = BoundingBox::from_corners(0.0, 0.0, 1000.0, 1000.0);
    let sites = random_sites(12, 150, &bounds);
    let diagram = build_diagram(&sites, bounds, BorderMode::WithoutBorders).unwrap();

    for (i, cell) in diagram.cells().iter().enumerate() {
        let expected = brute_force_cell(&sites, i, &bounds);
        assert!(
            (cell.area() - expected.area()).abs() < 1e-6,
            "cell {} area {} differs from {}",
            i,
            cell.area(),
            expected.area()
        );
        assert!(cell.contains(sites[i]), "cell {} does not contain its site", i);

        let mut neighbors: Vec<i32> = cell.edge_neighbors().into_iter().filter(|&n| n >= 0).collect();
        neighbors.sort_unstable();
        let mut expected_neighbors: Vec<i32> = diagram.neighbors(i).into_iter().map(|n| n as i32).collect();
        expected_neighbors.sort_unstable();
        assert_eq!(neighbors, expected_neighbors, "cell {} neighbours", i);
    }
}

#[test]
fn test_border_edges_close_every_cell() {
    let bounds = BoundingBox::from_corners(0.0, 0.0, 400.0, 300.0);
    let sites = random_sites(13, 80, &bounds);
    let diagram = build_diagram(&sites, bounds, BorderMode::WithBorders).unwrap();

    for (i, cell) in diagram.cells().iter().enumerate() {
        // Shoelace over the cell's edges, each oriented with the cell on its left.
        let twice_area: f64 = diagram
            .site_edges(i)
            .map(|e| {
                let (a, b) = if e.left == i { (e.start, e.end) } else { (e.end, e.start) };
                a.cross(b)
            })
            .sum();
        assert!(
            (twice_area * 0.5 - cell.area()).abs() < 1e-6,
            "edges of cell {} enclose {} instead of {}",
            i,
            twice_area * 0.5,
            cell.area()
        );
    }
}

#[test]
fn test_corner_cell_touches_box_sides() {
    let bounds = BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0);
    let sites = [Point::new(2.0, 5.0), Point::new(8.0, 5.0)];
    let diagram = build_diagram(&sites, bounds, BorderMode::WithoutBorders).unwrap();

    let cell = diagram.cell(0);
    assert!((cell.area() - 50.0).abs() < 1e-9);
    assert!(cell.edge_neighbors().contains(&BOX_ID_LEFT));
    assert!(cell.edge_neighbors().contains(&1));
    let c = cell.centroid().unwrap();
    assert!((c.x - 2.5).abs() < 1e-9 && (c.y - 5.0).abs() < 1e-9);
}

#[test]
fn test_merged_duplicates() {
    let bounds = BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0);
    let sites = [Point::new(2.0, 5.0), Point::new(8.0, 5.0), Point::new(2.0, 5.0)];
    let diagram = build_diagram(&sites, bounds, BorderMode::WithBorders).unwrap();

    assert_eq!(diagram.owner(2), 0);
    assert_eq!(diagram.owner(1), 1);
    assert!(diagram.is_merged(2));
    assert_eq!(diagram.site_edges(2).count(), 0);
    assert!(diagram.neighbors(2).is_empty());
    assert_eq!(diagram.neighbors(0), vec![1]);
    assert!(diagram.cell(2).is_empty());
    assert!((diagram.cell(0).area() - 50.0).abs() < 1e-9);
}

#[test]
fn test_near_duplicates_split_by_another_site() {
    let bounds = BoundingBox::from_corners(0.0, 0.0, 1000.0, 1000.0);
    let sites = [
        Point::new(500.0, 500.0),
        Point::new(900.0, 500.0 + 5e-10),
        Point::new(500.0 + 1e-10, 500.0 + 7e-10),
        Point::new(200.0, 800.0),
        Point::new(200.0, 200.0),
    ];
    let diagram = build_diagram(&sites, bounds, BorderMode::WithoutBorders).unwrap();

    assert!(diagram.is_merged(2));
    assert_eq!(diagram.owner(2), 0);
    assert!(!diagram.is_merged(1));
    assert_eq!(diagram.site_edges(2).count(), 0);

    let total: f64 = diagram.cells().iter().map(|c| c.area()).sum();
    assert!((total - bounds.area()).abs() < 1e-6 * bounds.area(), "cells cover {}", total);

    for edge in diagram.edges() {
        let right = edge.right.unwrap();
        let mid = edge.midpoint();
        let d = sites[edge.left].distance(mid);
        assert!((d - sites[right].distance(mid)).abs() < 1e-6, "not a bisector: {:?}", edge);
        assert!(sites.iter().all(|s| s.distance(mid) >= d - 1e-6), "not nearest: {:?}", edge);
    }
}

#[test]
fn test_relax_keeps_centered_grid() {
    let bounds = BoundingBox::from_corners(0.0, 0.0, 4.0, 4.0);
    let mut tess = Tessellation::new(bounds, BorderMode::WithoutBorders);
    let sites: Vec<Point> = (0..16)
        .map(|i| Point::new((i % 4) as f64 + 0.5, (i / 4) as f64 + 0.5))
        .collect();
    tess.set_sites(&sites);
    tess.relax().unwrap();

    for (i, p) in sites.iter().enumerate() {
        let q = tess.get_site(i).unwrap();
        assert!(p.distance(q) < 1e-9, "site {} moved from {:?} to {:?}", i, p, q);
    }
}

#[test]
fn test_relax_random_sites() {
    let bounds = BoundingBox::from_corners(0.0, 0.0, 100.0, 100.0);
    let mut tess = Tessellation::new(bounds, BorderMode::WithoutBorders);
    tess.random_generators_seeded(200, 99);

    let spread = |tess: &Tessellation| -> f64 {
        let cells = tess.cells();
        let areas: Vec<f64> = cells.iter().map(|c| c.area()).collect();
        let mean = areas.iter().sum::<f64>() / areas.len() as f64;
        areas.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / areas.len() as f64
    };

    tess.calculate().unwrap();
    let before = spread(&tess);
    for _ in 0..10 {
        tess.relax().unwrap();
    }
    let after = spread(&tess);

    assert_eq!(tess.count_sites(), 200);
    assert!(tess.sites().iter().all(|p| bounds.contains(*p)));
    assert!(after < before, "relaxation did not even out the cells: {} -> {}", before, after);
}
