use astar_route::{PathingGrid, SearchError};
use grid_util::point::Point;

// Reads a board from a file given as first argument (or uses a built-in one), searches from
// the top left to the bottom right corner and prints the board with the path marked.

const BOARD: &str = "\
0,1,0,0,0,0,
0,1,0,0,0,0,
0,1,0,0,0,0,
0,1,0,0,0,0,
0,0,0,0,1,0,
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = match std::env::args().nth(1) {
        Some(file) => std::fs::read_to_string(file)?,
        None => BOARD.to_owned(),
    };
    let grid: PathingGrid = text.parse()?;
    let start = Point::new(0, 0);
    let goal = Point::new(grid.rows() as i32 - 1, grid.cols() as i32 - 1);
    match grid.find_path(start, goal) {
        Ok(path) => print!("{}", grid.render(Some(&path))),
        Err(SearchError::NotFound) => println!("No path found!"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
