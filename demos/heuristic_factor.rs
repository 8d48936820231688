use astar_route::{PathingGrid, SearchConfig, SearchContext};
use grid_util::point::Point;

// The heuristic_factor can be set to scale the heuristic, causing nodes that are closer to the goal (ignoring obstacles)
// to be evaluated quicker than in normal operation. This is called Weighted A* and it can speed up the algorithm in certain scenarios.

fn main() {
    const N: i32 = 30;
    let mut pathing_grid = PathingGrid::new(N as usize, N as usize, false);
    for i in 4..N - 4 {
        pathing_grid.set(Point::new(i, N / 2), true);
        pathing_grid.set(Point::new(N / 2, i), true);
    }
    let start = Point::new(1, 1);
    let end = Point::new(N - 3, N - 3);
    let mut ct: SearchContext<Point, i32> = SearchContext::new();
    for factor in [1.0, 1.3, 2.0] {
        let config = SearchConfig::default().with_heuristic_factor(factor);
        let path = pathing_grid
            .find_path_with(&mut ct, start, end, &config)
            .unwrap();
        println!(
            "factor {factor}: distance {}, {} nodes expanded",
            path.distance,
            ct.expanded()
        );
    }
}
