//! The A* driver.

use gridstar_core::{Cell, GridTopology};

use crate::distance::manhattan;
use crate::error::{Endpoint, InvalidInput};
use crate::frontier::PriorityFrontier;
use crate::state::{SearchState, UNREACHABLE};
use crate::traits::{Hooks, SearchObserver, StepRole};

/// How a well-formed run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// A shortest path, `start` first and `end` last.
    Found(Vec<Cell>),
    /// The open set ran dry without reaching `end`.
    NotFound,
    /// The observer asked to stop.
    Canceled,
}

impl SearchOutcome {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// Result of a search request. Only malformed requests are errors.
pub type SearchResult = Result<SearchOutcome, InvalidInput>;

/// How the engine's most recent run ended.
///
/// `run` holds the engine mutably until the run is over, so only terminal
/// states and `Idle` are ever observable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchStatus {
    /// No run has finished yet.
    #[default]
    Idle,
    Found,
    NotFound,
    Canceled,
}

/// Runs A* searches over a [`GridTopology`].
///
/// The engine keeps its score table and open list between runs so repeated
/// searches reuse their allocations; each run still starts from a clean
/// state. After a run, the per-cell scores can be inspected with
/// [`g_score`](Self::g_score) and friends until the next run starts.
#[derive(Debug, Default)]
pub struct SearchEngine {
    pub(crate) state: SearchState,
    frontier: PriorityFrontier,
    status: SearchStatus,
    rows: i32,
    expanded: usize,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a shortest path from `start` to `end`.
    ///
    /// The adjacency is snapshotted once, so `topology` is read only at the
    /// start of the run. `observer` is polled for cancellation before every
    /// expansion and told about every cell that opens, closes, or ends up on
    /// the path.
    pub fn run<O: SearchObserver + ?Sized>(
        &mut self,
        topology: &GridTopology,
        start: Cell,
        end: Cell,
        observer: &mut O,
    ) -> SearchResult {
        let (start_idx, end_idx) = validate(topology, start, end)?;
        let adjacency = topology.adjacency();

        self.state.reset(topology.len());
        self.frontier.clear();
        self.rows = topology.rows();
        self.expanded = 0;

        log::debug!(
            "a* {} -> {} on {}x{} board",
            start,
            end,
            topology.rows(),
            topology.rows()
        );

        let h = manhattan(start, end);
        {
            let n = self.state.node_mut(start_idx);
            n.g = 0;
            n.f = h;
            n.open = true;
        }
        self.frontier.push(start, h);

        let outcome = loop {
            let Some(ci) = self.peek_open(topology) else {
                break SearchOutcome::NotFound;
            };

            if observer.should_cancel() {
                break SearchOutcome::Canceled;
            }
            self.frontier.pop_min();
            self.state.node_mut(ci).open = false;

            if ci == end_idx {
                let mut path = self.reconstruct_path(topology, start_idx, end_idx, observer);
                path.reverse();
                break SearchOutcome::Found(path);
            }

            let current = topology.cell(ci);
            let tentative_g = self.state.node(ci).g + 1;
            log::trace!("expand {} g={}", current, tentative_g - 1);

            for &ni in adjacency.neighbors(ci) {
                let n = self.state.node_mut(ni);
                // Strict improvement only: equal-cost routes keep the
                // parent they were first found through.
                if tentative_g >= n.g {
                    continue;
                }
                let neighbor = topology.cell(ni);
                let was_open = n.open;
                n.g = tentative_g;
                n.f = tentative_g + manhattan(neighbor, end);
                n.parent = Some(ci);
                n.open = true;
                let f = n.f;

                self.frontier.push(neighbor, f);
                if !was_open && ni != end_idx {
                    observer.on_step(neighbor, StepRole::Open);
                }
            }

            self.expanded += 1;
            observer.on_step(current, StepRole::Closed);
        };

        self.status = match outcome {
            SearchOutcome::Found(_) => SearchStatus::Found,
            SearchOutcome::NotFound => SearchStatus::NotFound,
            SearchOutcome::Canceled => SearchStatus::Canceled,
        };
        log::debug!(
            "a* {} -> {}: {:?} after {} expansions",
            start,
            end,
            self.status,
            self.expanded
        );
        Ok(outcome)
    }

    /// Index of the live entry at the top of the frontier, discarding stale
    /// entries above it. Entries are stale when their cell has since been
    /// closed or re-queued with a better score. The live entry stays queued.
    fn peek_open(&mut self, topology: &GridTopology) -> Option<usize> {
        while let Some(&entry) = self.frontier.peek_min() {
            if let Some(i) = topology.index(entry.cell) {
                let n = self.state.node(i);
                if n.open && n.f == entry.priority {
                    return Some(i);
                }
            }
            self.frontier.pop_min();
        }
        None
    }

    /// State of the most recent run.
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Number of cells expanded by the most recent run.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Best known cost from the start to `cell` in the most recent run, or
    /// [`UNREACHABLE`].
    pub fn g_score(&self, cell: Cell) -> i32 {
        match self.idx(cell) {
            Some(i) => self.state.node(i).g,
            None => UNREACHABLE,
        }
    }

    /// `g_score + manhattan(cell, end)` in the most recent run, or
    /// [`UNREACHABLE`].
    pub fn f_score(&self, cell: Cell) -> i32 {
        match self.idx(cell) {
            Some(i) => self.state.node(i).f,
            None => UNREACHABLE,
        }
    }

    /// Predecessor of `cell` on its best known path in the most recent run.
    pub fn came_from(&self, cell: Cell) -> Option<Cell> {
        let i = self.idx(cell)?;
        self.state.node(i).parent.map(|p| self.cell(p))
    }

    /// Whether `cell` was still in the open set when the most recent run
    /// stopped.
    pub fn is_open(&self, cell: Cell) -> bool {
        self.idx(cell).is_some_and(|i| self.state.node(i).open)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers for the last run's board
    // -----------------------------------------------------------------------

    #[inline]
    fn idx(&self, cell: Cell) -> Option<usize> {
        cell.index_in(self.rows)
    }

    #[inline]
    fn cell(&self, idx: usize) -> Cell {
        Cell::from_index(idx, self.rows)
    }
}

fn validate(topology: &GridTopology, start: Cell, end: Cell) -> Result<(usize, usize), InvalidInput> {
    if start == end {
        return Err(InvalidInput::SameEndpoints(start));
    }
    let start_idx = endpoint_index(topology, Endpoint::Start, start)?;
    let end_idx = endpoint_index(topology, Endpoint::End, end)?;
    Ok((start_idx, end_idx))
}

fn endpoint_index(
    topology: &GridTopology,
    endpoint: Endpoint,
    cell: Cell,
) -> Result<usize, InvalidInput> {
    let Some(idx) = topology.index(cell) else {
        return Err(InvalidInput::OutOfBounds {
            endpoint,
            cell,
            rows: topology.rows(),
        });
    };
    if topology.is_blocked(cell) {
        return Err(InvalidInput::Blocked { endpoint, cell });
    }
    Ok(idx)
}

/// One-shot search with closure hooks.
///
/// `step_hook` receives every [`StepRole`] notification; `cancel_hook` is
/// polled once per expansion.
pub fn run_search(
    topology: &GridTopology,
    start: Cell,
    end: Cell,
    step_hook: impl FnMut(Cell, StepRole),
    cancel_hook: impl FnMut() -> bool,
) -> SearchResult {
    let mut hooks = Hooks::new(step_hook, cancel_hook);
    SearchEngine::new().run(topology, start, end, &mut hooks)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::recording::StepLog;

    fn open_board(rows: i32) -> GridTopology {
        GridTopology::new(rows)
    }

    /// Plain breadth-first distance, independent of the engine.
    fn bfs_distance(topo: &GridTopology, from: Cell, to: Cell) -> Option<usize> {
        let mut dist = vec![usize::MAX; topo.len()];
        let mut queue = VecDeque::new();
        let mut nbuf = Vec::new();
        dist[topo.index(from)?] = 0;
        queue.push_back(from);
        while let Some(c) = queue.pop_front() {
            let d = dist[topo.index(c)?];
            if c == to {
                return Some(d);
            }
            nbuf.clear();
            topo.neighbors(c, &mut nbuf);
            for &n in &nbuf {
                let ni = topo.index(n)?;
                if dist[ni] == usize::MAX {
                    dist[ni] = d + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }

    fn assert_valid_path(topo: &GridTopology, path: &[Cell], start: Cell, end: Cell) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for c in path {
            assert!(!topo.is_blocked(*c), "path crosses blocked cell {c}");
        }
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} and {} are not adjacent", w[0], w[1]);
        }
    }

    #[test]
    fn open_five_by_five_corner_to_corner() {
        let topo = open_board(5);
        let start = Cell::new(0, 0);
        let end = Cell::new(4, 4);
        let outcome = run_search(&topo, start, end, |_, _| {}, || false).unwrap();
        let path = outcome.path().unwrap();
        assert_eq!(path.len(), 9);
        assert_valid_path(&topo, path, start, end);
    }

    #[test]
    fn blocked_column_is_not_found() {
        let mut topo = open_board(5);
        for row in 0..5 {
            topo.set_blocked(Cell::new(row, 2), true);
        }
        let mut engine = SearchEngine::new();
        let outcome = engine
            .run(&topo, Cell::new(0, 0), Cell::new(0, 4), &mut ())
            .unwrap();
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert_eq!(engine.status(), SearchStatus::NotFound);
        // Everything on the start side got closed.
        assert_eq!(engine.expanded(), 10);
        assert_eq!(engine.g_score(Cell::new(0, 4)), UNREACHABLE);
    }

    #[test]
    fn exhausted_board_polls_once_per_expansion() {
        let mut topo = open_board(5);
        for row in 0..5 {
            topo.set_blocked(Cell::new(row, 2), true);
        }
        let mut engine = SearchEngine::new();
        let mut polls = 0;
        // Would cancel on an eleventh poll; only ten cells are reachable.
        let mut hooks = Hooks::new(
            |_, _| {},
            || {
                polls += 1;
                polls > 10
            },
        );
        let outcome = engine
            .run(&topo, Cell::new(0, 0), Cell::new(0, 4), &mut hooks)
            .unwrap();
        drop(hooks);
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert_eq!(engine.status(), SearchStatus::NotFound);
        assert_eq!(polls, 10);
        assert_eq!(polls, engine.expanded());
    }

    #[test]
    fn found_run_polls_once_per_pop() {
        let topo = open_board(6);
        let mut engine = SearchEngine::new();
        let mut log = StepLog::new();
        let outcome = engine
            .run(&topo, Cell::new(0, 0), Cell::new(5, 5), &mut log)
            .unwrap();
        assert!(outcome.is_found());
        // Every expansion plus the pop that reached the goal.
        assert_eq!(log.polls(), engine.expanded() + 1);
    }

    #[test]
    fn enclosed_end_is_not_found() {
        let topo: GridTopology = "
            ......
            ......
            ...#..
            ..#.#.
            ...#..
            ......
        "
        .parse()
        .unwrap();
        let outcome = run_search(&topo, Cell::new(0, 0), Cell::new(3, 3), |_, _| {}, || false);
        assert_eq!(outcome, Ok(SearchOutcome::NotFound));
    }

    #[test]
    fn invalid_requests() {
        let mut topo = open_board(4);
        topo.set_blocked(Cell::new(2, 2), true);
        let c = Cell::new(1, 1);

        assert_eq!(
            run_search(&topo, c, c, |_, _| {}, || false),
            Err(InvalidInput::SameEndpoints(c))
        );
        assert_eq!(
            run_search(&topo, Cell::new(-1, 0), c, |_, _| {}, || false),
            Err(InvalidInput::OutOfBounds {
                endpoint: Endpoint::Start,
                cell: Cell::new(-1, 0),
                rows: 4,
            })
        );
        assert_eq!(
            run_search(&topo, c, Cell::new(0, 4), |_, _| {}, || false),
            Err(InvalidInput::OutOfBounds {
                endpoint: Endpoint::End,
                cell: Cell::new(0, 4),
                rows: 4,
            })
        );
        assert_eq!(
            run_search(&topo, c, Cell::new(2, 2), |_, _| {}, || false),
            Err(InvalidInput::Blocked {
                endpoint: Endpoint::End,
                cell: Cell::new(2, 2),
            })
        );
    }

    #[test]
    fn invalid_request_touches_nothing() {
        let topo = open_board(4);
        let mut engine = SearchEngine::new();
        let mut log = StepLog::new();
        let c = Cell::new(0, 0);
        assert!(engine.run(&topo, c, c, &mut log).is_err());
        assert_eq!(engine.status(), SearchStatus::Idle);
        assert_eq!(log.polls(), 0);
        assert!(log.events().is_empty());
        assert_eq!(engine.g_score(c), UNREACHABLE);
    }

    #[test]
    fn cancel_on_first_poll_keeps_initial_state() {
        let topo = open_board(5);
        let start = Cell::new(2, 2);
        let end = Cell::new(4, 0);
        let mut engine = SearchEngine::new();
        let mut log = StepLog::cancel_after(0);
        let outcome = engine.run(&topo, start, end, &mut log).unwrap();

        assert_eq!(outcome, SearchOutcome::Canceled);
        assert_eq!(engine.status(), SearchStatus::Canceled);
        assert_eq!(engine.expanded(), 0);
        assert!(log.events().is_empty());
        assert_eq!(engine.g_score(start), 0);
        assert_eq!(engine.f_score(start), 4);
        assert!(engine.is_open(start));
        for row in 0..5 {
            for col in 0..5 {
                let c = Cell::new(row, col);
                assert_eq!(engine.came_from(c), None);
                if c != start {
                    assert_eq!(engine.g_score(c), UNREACHABLE);
                }
            }
        }
    }

    #[test]
    fn cancel_mid_run() {
        let topo = open_board(10);
        let mut engine = SearchEngine::new();
        let mut log = StepLog::cancel_after(3);
        let outcome = engine
            .run(&topo, Cell::new(0, 0), Cell::new(9, 9), &mut log)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Canceled);
        assert_eq!(engine.expanded(), 3);
        assert_eq!(log.polls(), 4);
        assert_eq!(log.cells(StepRole::Closed).len(), 3);
        assert!(log.cells(StepRole::Path).is_empty());
    }

    #[test]
    fn closure_hooks_can_cancel() {
        let topo = open_board(6);
        let mut polls = 0;
        let outcome = run_search(
            &topo,
            Cell::new(0, 0),
            Cell::new(5, 5),
            |_, _| {},
            || {
                polls += 1;
                polls > 2
            },
        );
        assert_eq!(outcome, Ok(SearchOutcome::Canceled));
        assert_eq!(polls, 3);
    }

    #[test]
    fn step_notifications() {
        let topo: GridTopology = "
            .....
            .###.
            .#...
            .#.#.
            ...#.
        "
        .parse()
        .unwrap();
        let start = Cell::new(4, 2);
        let end = Cell::new(2, 2);
        let mut engine = SearchEngine::new();
        let mut log = StepLog::new();
        let outcome = engine.run(&topo, start, end, &mut log).unwrap();
        let path = outcome.path().unwrap().to_vec();
        assert_valid_path(&topo, &path, start, end);
        assert_eq!(Some(path.len() - 1), bfs_distance(&topo, start, end));

        let closed = log.cells(StepRole::Closed);
        assert_eq!(closed.first(), Some(&start));
        assert_eq!(closed.len(), engine.expanded());
        assert!(!closed.contains(&end));

        assert!(!log.cells(StepRole::Open).contains(&end));

        // Path cells come last, goal side first, endpoints excluded.
        let marked = log.cells(StepRole::Path);
        let mut interior = path[1..path.len() - 1].to_vec();
        interior.reverse();
        assert_eq!(marked, interior);
        let tail: Vec<StepRole> = log.events()[log.events().len() - marked.len()..]
            .iter()
            .map(|e| e.role)
            .collect();
        assert!(tail.iter().all(|&r| r == StepRole::Path));
    }

    #[test]
    fn adjacent_endpoints() {
        let topo = open_board(3);
        let mut log = StepLog::new();
        let outcome = SearchEngine::new()
            .run(&topo, Cell::new(1, 1), Cell::new(1, 2), &mut log)
            .unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::Found(vec![Cell::new(1, 1), Cell::new(1, 2)])
        );
        assert!(log.cells(StepRole::Path).is_empty());
    }

    #[test]
    fn corridor_path_is_exact() {
        let topo: GridTopology = "
            ....
            ###.
            ....
            .###
        "
        .parse()
        .unwrap();
        let outcome = run_search(&topo, Cell::new(0, 0), Cell::new(3, 0), |_, _| {}, || false)
            .unwrap();
        let expected: Vec<Cell> = [
            (0, 0),
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 3),
            (2, 3),
            (2, 2),
            (2, 1),
            (2, 0),
            (3, 0),
        ]
        .into_iter()
        .map(Cell::from)
        .collect();
        assert_eq!(outcome, SearchOutcome::Found(expected));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let topo = open_board(12);
        let start = Cell::new(1, 1);
        let end = Cell::new(10, 10);
        let mut engine = SearchEngine::new();

        let mut first_log = StepLog::new();
        let first = engine.run(&topo, start, end, &mut first_log).unwrap();
        let mut second_log = StepLog::new();
        let second = engine.run(&topo, start, end, &mut second_log).unwrap();
        let mut third_log = StepLog::new();
        let third = SearchEngine::new()
            .run(&topo, start, end, &mut third_log)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(first_log.events(), second_log.events());
        assert_eq!(first_log.events(), third_log.events());
    }

    #[test]
    fn reuse_across_boards_starts_clean() {
        let mut engine = SearchEngine::new();
        let big = open_board(8);
        assert!(
            engine
                .run(&big, Cell::new(0, 0), Cell::new(7, 7), &mut ())
                .unwrap()
                .is_found()
        );
        assert_ne!(engine.g_score(Cell::new(0, 1)), UNREACHABLE);

        let mut walled = open_board(8);
        for row in 0..8 {
            walled.set_blocked(Cell::new(row, 1), true);
        }
        let outcome = engine
            .run(&walled, Cell::new(0, 0), Cell::new(7, 7), &mut ())
            .unwrap();
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert_eq!(engine.g_score(Cell::new(0, 2)), UNREACHABLE);
        assert_eq!(engine.came_from(Cell::new(7, 0)), Some(Cell::new(6, 0)));

        let small = open_board(3);
        let outcome = engine
            .run(&small, Cell::new(0, 0), Cell::new(2, 2), &mut ())
            .unwrap();
        assert_eq!(outcome.path().map(<[Cell]>::len), Some(5));
        assert_eq!(engine.g_score(Cell::new(5, 5)), UNREACHABLE);
    }

    #[test]
    fn scores_are_consistent_after_found() {
        let topo = open_board(6);
        let start = Cell::new(0, 5);
        let end = Cell::new(5, 0);
        let mut engine = SearchEngine::new();
        let outcome = engine.run(&topo, start, end, &mut ()).unwrap();
        let path = outcome.path().unwrap();
        for (i, &c) in path.iter().enumerate() {
            assert_eq!(engine.g_score(c), i as i32);
        }
        for row in 0..6 {
            for col in 0..6 {
                let c = Cell::new(row, col);
                let g = engine.g_score(c);
                if g != UNREACHABLE {
                    assert_eq!(engine.f_score(c), g + manhattan(c, end));
                }
                if engine.is_open(c) {
                    assert_ne!(engine.f_score(c), UNREACHABLE);
                }
            }
        }
        assert_eq!(engine.came_from(start), None);
    }

    #[test]
    fn matches_bfs_on_random_boards() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut found = 0;
        for _ in 0..200 {
            let rows = rng.random_range(2..16);
            let mut topo = GridTopology::new(rows);
            for row in 0..rows {
                for col in 0..rows {
                    if rng.random_bool(0.3) {
                        topo.set_blocked(Cell::new(row, col), true);
                    }
                }
            }
            let start = Cell::new(rng.random_range(0..rows), rng.random_range(0..rows));
            let end = Cell::new(rng.random_range(0..rows), rng.random_range(0..rows));
            if start == end {
                continue;
            }
            topo.set_blocked(start, false);
            topo.set_blocked(end, false);

            let outcome = run_search(&topo, start, end, |_, _| {}, || false).unwrap();
            match bfs_distance(&topo, start, end) {
                Some(d) => {
                    let path = outcome.path().expect("bfs found a path");
                    assert_eq!(path.len() - 1, d, "suboptimal path on\n{topo}");
                    assert_valid_path(&topo, path, start, end);
                    let again = run_search(&topo, start, end, |_, _| {}, || false).unwrap();
                    assert_eq!(outcome, again);
                    found += 1;
                }
                None => assert_eq!(outcome, SearchOutcome::NotFound),
            }
        }
        assert!(found > 0);
    }
}
