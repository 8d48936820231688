use astar_route::PathingGrid;
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut pathing_grid = PathingGrid::new(3, 3, false);
    pathing_grid.set(Point::new(1, 1), true);
    println!("{}", pathing_grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = pathing_grid.find_path(start, end).unwrap();
    println!("Path ({} steps):", path.distance);
    for p in path.nodes {
        println!("{:?}", p);
    }
}
