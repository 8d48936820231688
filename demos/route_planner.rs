use astar_route::{RouteModel, RoutePlanner};

// A small road network in normalised map coordinates. Start and end are given in percent of
// the map extent and snapped to the closest nodes, the route length is reported in meters.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = RouteModel::new(1250.0);
    let coordinates = [
        (0.05, 0.05),
        (0.30, 0.10),
        (0.55, 0.05),
        (0.20, 0.45),
        (0.50, 0.50),
        (0.85, 0.40),
        (0.40, 0.90),
        (0.90, 0.95),
    ];
    let n: Vec<_> = coordinates
        .iter()
        .map(|&(x, y)| model.add_node(x, y))
        .collect();
    model.add_way(&[n[0], n[1], n[2], n[5], n[7]])?;
    model.add_way(&[n[0], n[3], n[6], n[7]])?;
    model.add_way(&[n[1], n[4], n[5]])?;
    model.add_way(&[n[3], n[4], n[7]])?;

    let planner = RoutePlanner::from_percent(&model, 2.0, 3.0, 92.0, 97.0)?;
    let path = planner.search()?;
    println!("Distance: {:.1} m", path.distance);
    for node in model.coordinates(&path) {
        println!("({:.2}, {:.2})", node.x, node.y);
    }
    Ok(())
}
