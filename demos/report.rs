use grid_search::{cell, Algorithm, Outcome, SearchGrid};

// Runs every search on an open 5x5 grid from the top-left to the bottom-right corner
//  _____
// |S    |
// |     |
// |     |
// |     |
// |    G|
//  _____
// and reports what each of them finds.
fn main() {
    const ROWS: usize = 5;
    const COLS: usize = 5;
    let grid = SearchGrid::new(ROWS, COLS);
    let (start, goal) = (cell(0, 0), cell(4, 4));

    println!("Running search algorithms on a {ROWS}x{COLS} grid");
    println!("Start: {start:?}, goal: {goal:?}");
    println!("{}", "=".repeat(40));
    for algorithm in [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Ucs,
        Algorithm::Dls { limit: 10 },
        Algorithm::Iddfs {
            max_depth: grid_search::DEFAULT_MAX_DEPTH,
        },
        Algorithm::Bidirectional,
    ] {
        match algorithm.solve(start, goal, &grid) {
            Outcome::Found(path) => {
                println!("{algorithm}: path found with {} moves", path.len());
                println!("Path: {path}");
                println!("Cost: {}", path.cost_float());
            }
            Outcome::Cutoff => println!("{algorithm}: depth limit reached"),
            Outcome::NotFound => println!("{algorithm}: no path found"),
        }
        println!("{}", "-".repeat(30));
    }
}
