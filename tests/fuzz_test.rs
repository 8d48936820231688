/// Fuzzes the search by checking on many random boards that a path is found exactly when the
/// goal is on the same connected component as the start, and that the path is valid. All
/// frontier and relaxation settings are tested.
use astar_route::{
    HeapSearchContext, PathingGrid, Relaxation, SearchConfig, SearchContext, SearchError,
};
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(n: usize, rng: &mut StdRng) -> PathingGrid {
    let mut pathing_grid = PathingGrid::new(n, n, false);
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            pathing_grid.set(Point::new(x, y), rng.gen_bool(0.4));
        }
    }
    pathing_grid.generate_components();
    pathing_grid
}

fn visualize_grid(grid: &PathingGrid, start: &Point, end: &Point) {
    for x in 0..grid.rows() as i32 {
        for y in 0..grid.cols() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.get(p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Shortest distance by breadth-first search.
fn bfs_distance(grid: &PathingGrid, start: Point, goal: Point) -> Option<i32> {
    let mut dist = vec![vec![-1; grid.cols()]; grid.rows()];
    let mut queue = VecDeque::from([start]);
    dist[start.x as usize][start.y as usize] = 0;
    while let Some(p) = queue.pop_front() {
        let d = dist[p.x as usize][p.y as usize];
        if p == goal {
            return Some(d);
        }
        for n in grid.neighborhood_points(&p) {
            if grid.can_move_to(n) && dist[n.x as usize][n.y as usize] < 0 {
                dist[n.x as usize][n.y as usize] = d + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

fn is_valid_path(grid: &PathingGrid, nodes: &[Point]) -> bool {
    nodes.iter().all(|p| grid.can_move_to(*p))
        && nodes
            .windows(2)
            .all(|w| (w[0].x - w[1].x).abs() + (w[0].y - w[1].y).abs() == 1)
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    let mut ct: SearchContext<Point, i32> = SearchContext::new();
    for relaxation in [Relaxation::FirstDiscovery, Relaxation::DecreaseKey] {
        let config = SearchConfig::default().with_relaxation(relaxation);
        for _ in 0..N_GRIDS {
            let mut random_grid = random_grid(N, &mut rng);
            random_grid.set(start, false);
            random_grid.set(end, false);
            let reachable = random_grid.reachable(&start, &end);
            let path = random_grid.find_path_with(&mut ct, start, end, &config);
            // Show the grid if the outcome disagrees with the components
            if path.is_ok() != reachable {
                visualize_grid(&random_grid, &start, &end);
            }
            assert_eq!(path.is_ok(), reachable);
            match path {
                Ok(path) => {
                    assert!(is_valid_path(&random_grid, &path.nodes));
                    assert_eq!(path.distance as usize, path.len() - 1);
                }
                Err(e) => {
                    assert_eq!(e, SearchError::NotFound);
                    assert_eq!(ct.frontier_len(), 0);
                }
            }
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    let decrease_key = SearchConfig::default().with_relaxation(Relaxation::DecreaseKey);
    let first_discovery = SearchConfig::default();
    let mut ct: SearchContext<Point, i32> = SearchContext::new();
    for _ in 0..N_GRIDS {
        let mut random_grid = random_grid(N, &mut rng);
        random_grid.set(start, false);
        random_grid.set(end, false);
        let Some(shortest) = bfs_distance(&random_grid, start, end) else {
            continue;
        };
        let optimal = random_grid
            .find_path_with(&mut ct, start, end, &decrease_key)
            .unwrap();
        let first = random_grid
            .find_path_with(&mut ct, start, end, &first_discovery)
            .unwrap();
        if optimal.distance != shortest {
            visualize_grid(&random_grid, &start, &end);
            println!("A* distance: {}; BFS distance: {shortest}", optimal.distance);
        }
        assert_eq!(optimal.distance, shortest);
        assert!(first.distance >= shortest);
    }
}

#[test]
fn fuzz_frontier_equivalence() {
    const N: usize = 12;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(2);
    let config = SearchConfig::default();
    let mut sorted_ct: SearchContext<Point, i32> = SearchContext::new();
    let mut heap_ct: HeapSearchContext<Point, i32> = SearchContext::new();
    for _ in 0..N_GRIDS {
        let random_grid = random_grid(N, &mut rng);
        let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let sorted = random_grid.find_path_with(&mut sorted_ct, start, end, &config);
        let heap = random_grid.find_path_with(&mut heap_ct, start, end, &config);
        assert_eq!(sorted, heap);
        assert_eq!(sorted_ct.expanded(), heap_ct.expanded());
    }
}
