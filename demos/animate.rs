use std::env;
use std::thread;
use std::time::Duration;

use grid_search::{cell, make_search, Cell, SearchEvent, SearchGrid, DEFAULT_DEPTH_LIMIT};

const FRAME_DELAY: Duration = Duration::from_millis(150);

/// Draws one frame: start, goal, walls, the cell being expanded, the frontier and the explored set.
fn render(grid: &SearchGrid, start: Cell, goal: Cell, event: &SearchEvent) -> String {
    let (rows, cols) = grid.size();
    let mut frame = String::new();
    for row in 0..rows as i32 {
        for col in 0..cols as i32 {
            let c = cell(row, col);
            let ch = if c == start {
                'S'
            } else if c == goal {
                'G'
            } else if grid.is_blocked(c) {
                '#'
            } else if event.current() == Some(c) {
                '@'
            } else if event.frontier().contains(&c) {
                'o'
            } else if event.explored().contains(&c) {
                '+'
            } else {
                '.'
            };
            frame.push(ch);
        }
        frame.push('\n');
    }
    frame
}

/// Animates one search in the terminal, e.g. `cargo run --example animate -- UCS`.
fn main() {
    let name = env::args().nth(1).unwrap_or_else(|| "BFS".to_owned());
    let grid = SearchGrid::new(8, 12).with_blocked((1..7).map(|row| cell(row, 5)));
    let (start, goal) = (cell(3, 1), cell(4, 10));

    let process = match make_search(&name, start, goal, &grid, Some(DEFAULT_DEPTH_LIMIT)) {
        Ok(process) => process,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    let mut last_step = None;
    for event in process {
        match &event {
            SearchEvent::Step { .. } => {
                // Clear the screen and move the cursor home before each frame
                print!("\x1b[2J\x1b[H");
                println!("{name}");
                print!("{}", render(&grid, start, goal, &event));
                thread::sleep(FRAME_DELAY);
                last_step = Some(event);
            }
            SearchEvent::Log(message) => println!("{message}"),
            SearchEvent::Path(outcome) => match outcome.path() {
                Some(path) => {
                    let cells = path.cells(start);
                    print!("\x1b[2J\x1b[H");
                    println!("{name}: {} moves, cost {}", path.len(), path.cost_float());
                    let (rows, cols) = grid.size();
                    for row in 0..rows as i32 {
                        let line: String = (0..cols as i32)
                            .map(|col| {
                                let c = cell(row, col);
                                if grid.is_blocked(c) {
                                    '#'
                                } else if cells.contains(&c) {
                                    '*'
                                } else {
                                    '.'
                                }
                            })
                            .collect();
                        println!("{line}");
                    }
                    println!("{path}");
                }
                None => {
                    if let Some(step) = &last_step {
                        print!("{}", render(&grid, start, goal, step));
                    }
                    println!("{name}: {outcome:?}");
                }
            },
        }
    }
}
