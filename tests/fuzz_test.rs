/// Fuzzes the searches by checking on many random grids that a path is found exactly when the goal
/// is reachable, i.e. part of the same connected component, and that every path found is a valid
/// walk from start to goal. Step-wise runs are checked against the batch results on the way.
use grid_search::*;
use rand::prelude::*;

fn random_grid(rows: usize, cols: usize, rng: &mut StdRng) -> SearchGrid {
    let mut grid = SearchGrid::new(rows, cols);
    for row in 0..rows as i32 {
        for col in 0..cols as i32 {
            grid.set_blocked(cell(row, col), rng.gen_bool(0.35));
        }
    }
    grid.update();
    grid
}

fn random_open_cell(grid: &mut SearchGrid, rng: &mut StdRng) -> Cell {
    let c = cell(
        rng.gen_range(0..grid.rows()) as i32,
        rng.gen_range(0..grid.cols()) as i32,
    );
    grid.set_blocked(c, false);
    c
}

fn visualize_grid(grid: &SearchGrid, start: &Cell, end: &Cell) {
    for row in 0..grid.rows() as i32 {
        for col in 0..grid.cols() as i32 {
            let c = cell(row, col);
            if *start == c {
                print!("S");
            } else if *end == c {
                print!("G");
            } else if grid.is_blocked(c) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

#[test]
fn fuzz() {
    const N: usize = 8;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        let start = random_open_cell(&mut grid, &mut rng);
        let goal = random_open_cell(&mut grid, &mut rng);
        let reachable = grid.reachable(&start, &goal);

        let results = [
            ("BFS", bfs(start, goal, &grid)),
            ("DFS", dfs(start, goal, &grid)),
            ("UCS", ucs(start, goal, &grid)),
            ("Bidirectional", bidirectional(start, goal, &grid)),
        ];
        for (name, path) in &results {
            // Show the grid if the result disagrees with the components
            if path.is_some() != reachable {
                println!("{name}: found {}, reachable {reachable}", path.is_some());
                visualize_grid(&grid, &start, &goal);
            }
            assert_eq!(path.is_some(), reachable);
            if let Some(path) = path {
                assert_eq!(path.replay(start, &grid), Some(goal));
            }
        }
        if let (Some(bfs_path), Some(ucs_path)) = (&results[0].1, &results[2].1) {
            assert!(ucs_path.cost() <= bfs_path.cost());
            assert!(bfs_path.len() <= ucs_path.len());
        }
    }
}

#[test]
fn fuzz_step_wise_matches_batch() {
    const N: usize = 6;
    const N_GRIDS: usize = 200;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        let start = random_open_cell(&mut grid, &mut rng);
        let goal = random_open_cell(&mut grid, &mut rng);
        for algorithm in [
            Algorithm::Bfs,
            Algorithm::Dfs,
            Algorithm::Ucs,
            Algorithm::Dls { limit: 4 },
            Algorithm::Bidirectional,
        ] {
            let events: Vec<SearchEvent> = algorithm.start(start, goal, &grid).collect();
            let terminal = events.iter().filter(|e| e.is_terminal()).count();
            assert_eq!(terminal, 1, "{algorithm} emitted {terminal} path events");
            let outcome = events.last().and_then(|e| e.outcome()).cloned();
            assert_eq!(outcome, Some(algorithm.solve(start, goal, &grid)), "{algorithm}");
        }
    }
}

/// Iterative deepening is exponential in the path length, so it only runs on tiny grids.
#[test]
fn fuzz_iterative_deepening() {
    const N: usize = 3;
    const N_GRIDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        let start = random_open_cell(&mut grid, &mut rng);
        let goal = random_open_cell(&mut grid, &mut rng);
        let reachable = grid.reachable(&start, &goal);
        let path = iddfs(start, goal, &grid, DEFAULT_MAX_DEPTH);
        if path.is_some() != reachable {
            visualize_grid(&grid, &start, &goal);
        }
        assert_eq!(path.is_some(), reachable);
        if let Some(path) = path {
            assert_eq!(path.replay(start, &grid), Some(goal));
            assert_eq!(Some(path.len()), bfs(start, goal, &grid).map(|p| p.len()));
        }
    }
}
