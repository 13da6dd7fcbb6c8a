use std::collections::BTreeSet;

use gridpath_core::{CellState, Grid, Layout, Pos};
use gridpath_search::{
    NoObserver, Outcome, SearchReport, UNREACHABLE, component, hop_distances, reset, run_search,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn p(row: i32, col: i32) -> Pos {
    Pos::new(row, col)
}

fn search(grid: &mut Grid, start: Pos, goal: Pos) -> SearchReport {
    run_search(grid, start, goal, &mut NoObserver).unwrap()
}

fn states(grid: &Grid) -> Vec<CellState> {
    grid.positions().map(|q| grid.state(q).unwrap()).collect()
}

#[test]
fn cost_matches_bfs_on_random_grids() {
    for seed in 0..60 {
        let mut rng = StdRng::seed_from_u64(seed);
        let size = 4 + (seed % 9) as i32;
        let layout = Layout::scatter(size, 0.3, &mut rng);
        let mut grid = layout.build().unwrap();
        let (start, goal) = grid.endpoints().unwrap();
        let bfs = hop_distances(&grid, start)[grid.idx(goal).unwrap()];

        let report = search(&mut grid, start, goal);
        match &report.outcome {
            Outcome::Succeeded(path) => {
                assert_eq!(report.cost, Some(bfs), "seed {seed}");
                assert_eq!(path.hops() as u32, bfs, "seed {seed}");
                // Every consecutive pair in the route is adjacent.
                let route = path.start_to_goal();
                for pair in route.windows(2) {
                    assert!(grid.neighbors(pair[0]).contains(&pair[1]), "seed {seed}");
                }
            }
            Outcome::Failed => assert_eq!(bfs, UNREACHABLE, "seed {seed}"),
            Outcome::Cancelled => unreachable!(),
        }
    }
}

#[test]
fn identical_grids_give_identical_runs() {
    let layout = Layout::scatter(14, 0.25, &mut StdRng::seed_from_u64(2024));
    let mut a = layout.build().unwrap();
    let mut b = layout.build().unwrap();
    let ra = search(&mut a, p(0, 0), p(13, 13));
    let rb = search(&mut b, p(0, 0), p(13, 13));
    assert_eq!(ra, rb);
    assert_eq!(states(&a), states(&b));
}

#[test]
fn reset_then_rerun_reproduces_first_run() {
    let mut grid = Layout::delivery_district().build().unwrap();
    let (start, goal) = grid.endpoints().unwrap();
    let first = search(&mut grid, start, goal);
    let first_states = states(&grid);

    reset(&mut grid);
    assert_eq!(grid.count_state(CellState::Unvisited), grid.len());

    let second = search(&mut grid, start, goal);
    assert_eq!(first, second);
    assert_eq!(first_states, states(&grid));
}

#[test]
fn exhausted_search_visits_exactly_the_start_component() {
    // Goal boxed into the bottom-right corner.
    let mut grid = Layout::open(8)
        .with_barriers([p(6, 6), p(6, 7), p(7, 6)])
        .build()
        .unwrap();
    let report = search(&mut grid, p(0, 0), p(7, 7));
    assert_eq!(report.outcome, Outcome::Failed);

    let visited: BTreeSet<Pos> = report.expansions.iter().copied().collect();
    let expected: BTreeSet<Pos> = component(&grid, p(0, 0)).into_iter().collect();
    assert_eq!(visited.len(), report.expansions.len(), "no cell expanded twice");
    assert_eq!(visited, expected);
    assert_eq!(grid.count_state(CellState::OnPath), 0);
}

#[test]
fn full_width_wall_fails() {
    let mut grid = Layout::open(6)
        .with_barriers((0..6).map(|c| p(3, c)))
        .build()
        .unwrap();
    let report = search(&mut grid, p(0, 2), p(5, 2));
    assert_eq!(report.outcome, Outcome::Failed);
    assert_eq!(report.cost, None);
}

#[test]
fn adjacency_is_symmetric() {
    for seed in 0..20 {
        let layout = Layout::scatter(10, 0.35, &mut StdRng::seed_from_u64(seed));
        let grid = layout.build().unwrap();
        for a in grid.positions() {
            for &b in grid.neighbors(a) {
                assert!(grid.is_passable(a) && grid.is_passable(b));
                assert!(grid.neighbors(b).contains(&a), "{a} -> {b} not mirrored");
            }
        }
    }
}

#[test]
fn five_by_five_open_grid() {
    let mut grid = Layout::open(5).build().unwrap();
    let report = search(&mut grid, p(0, 0), p(4, 4));
    let path = report.outcome.path().unwrap();
    assert_eq!(path.hops(), 8);
    for &q in &path.cells {
        assert_eq!(grid.state(q), Some(CellState::OnPath));
    }
    assert_eq!(grid.state(p(0, 0)), Some(CellState::Unvisited));
}

#[test]
fn district_routes_detour_around_blocks() {
    let mut grid = Layout::delivery_district().build().unwrap();
    let start = p(2, 13);
    let goal = p(0, 8);
    let bfs = hop_distances(&grid, start)[grid.idx(goal).unwrap()];
    let report = search(&mut grid, start, goal);
    assert_eq!(report.cost, Some(bfs));
    assert_eq!(bfs, 9, "barriers force a detour beyond the Manhattan distance of 7");
}
