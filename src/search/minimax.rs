//! Depth-limited minimax over the `GameRules` contract.
//!
//! Two value semantics are supported:
//!
//! - **Adversarial**: values are the reference participant's scores. The
//!   reference maximizes; every other participant minimizes.
//! - **Selfish**: values are per-participant score vectors. Whoever is to
//!   move picks the child that maximizes its own component.
//!
//! Depth counting starts at 1 for the children of the root. The root does
//! one extra ply above the recursion and never consults the pruning hook.
//! Ties always resolve to the first move in `possible_moves` order.

use smallvec::SmallVec;
use std::time::Instant;
use tracing::debug;

use crate::core::{Marker, TurnOrder};
use crate::error::{Error, Result};
use crate::rules::{GameRules, Score};

use super::config::{SearchConfig, SearchMode};
use super::stats::SearchStats;

/// Best move found by a search, with its value and statistics.
#[derive(Clone, Debug)]
pub struct SearchResult<M> {
    /// Selected move.
    pub best_move: M,

    /// Value of the selected move for the maximizing side of the root
    /// (the reference in adversarial mode, the acting participant in
    /// selfish mode).
    pub value: Score,

    /// Search statistics.
    pub stats: SearchStats,
}

/// Per-participant scores, one component per active marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation(SmallVec<[(Marker, Score); 4]>);

impl Evaluation {
    /// Score of `marker`, `Score::MIN` if it has no component.
    #[must_use]
    pub fn get(&self, marker: Marker) -> Score {
        self.0
            .iter()
            .find(|(m, _)| *m == marker)
            .map_or(Score::MIN, |(_, s)| *s)
    }

    /// Iterate over (marker, score) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Marker, Score)> + '_ {
        self.0.iter().copied()
    }
}

/// Minimax search context.
///
/// Borrows the rules and the turn order; holds no state between calls,
/// so one context can serve any number of searches.
pub struct Minimax<'a, G: GameRules> {
    rules: &'a G,
    order: &'a TurnOrder,
    config: SearchConfig,
}

impl<'a, G: GameRules> Minimax<'a, G> {
    /// Create a new search context.
    pub fn new(rules: &'a G, order: &'a TurnOrder, config: SearchConfig) -> Self {
        Self {
            rules,
            order,
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for `acting` in `state`.
    ///
    /// In adversarial mode `reference` is the participant the tree
    /// maximizes; `None` makes the acting participant the reference.
    /// The reference is ignored in selfish mode.
    pub fn best_move(
        &self,
        state: &G::State,
        acting: Marker,
        reference: Option<Marker>,
    ) -> Result<G::Move> {
        self.search(state, acting, reference).map(|r| r.best_move)
    }

    /// Run a full search from `state` and report the result.
    ///
    /// Fails with [`Error::NoLegalMoves`] if `state` has no legal moves.
    pub fn search(
        &self,
        state: &G::State,
        acting: Marker,
        reference: Option<Marker>,
    ) -> Result<SearchResult<G::Move>> {
        let start = Instant::now();
        let mut stats = SearchStats::new();

        let moves = self.rules.possible_moves(state);
        if moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }

        let next = self.rules.next_marker(self.order, acting);
        let mut best: Option<(G::Move, Score)> = None;

        match self.config.mode {
            SearchMode::Adversarial => {
                let reference = reference.unwrap_or(acting);
                let maximizing = acting == reference;
                for mv in moves {
                    let child = self.rules.apply_move(state, &mv, acting)?;
                    let value = self.adversarial(&child, next, reference, 1, &mut stats)?;
                    if best
                        .as_ref()
                        .map_or(true, |(_, incumbent)| improves(maximizing, value, *incumbent))
                    {
                        best = Some((mv, value));
                    }
                }
            }
            SearchMode::Selfish => {
                for mv in moves {
                    let child = self.rules.apply_move(state, &mv, acting)?;
                    let value = self.selfish(&child, next, 1, &mut stats)?.get(acting);
                    if best
                        .as_ref()
                        .map_or(true, |(_, incumbent)| improves(true, value, *incumbent))
                    {
                        best = Some((mv, value));
                    }
                }
            }
        }

        stats.time_us = start.elapsed().as_micros() as u64;
        let (best_move, value) = best.ok_or(Error::NoLegalMoves)?;

        debug!(
            marker = %acting,
            best_move = %best_move,
            value,
            nodes = stats.nodes,
            pruned = stats.pruned,
            time_us = stats.time_us,
            "search complete"
        );

        Ok(SearchResult {
            best_move,
            value,
            stats,
        })
    }

    /// Recursive value of `state` with `marker` to move, at `depth`.
    ///
    /// Adversarial mode returns the reference's score (`reference: None`
    /// uses `marker`); selfish mode returns `marker`'s own component.
    pub fn minimax(
        &self,
        state: &G::State,
        marker: Marker,
        reference: Option<Marker>,
        depth: u32,
    ) -> Result<Score> {
        let mut stats = SearchStats::new();
        match self.config.mode {
            SearchMode::Adversarial => {
                self.adversarial(state, marker, reference.unwrap_or(marker), depth, &mut stats)
            }
            SearchMode::Selfish => Ok(self.selfish(state, marker, depth, &mut stats)?.get(marker)),
        }
    }

    /// Adversarial (zero-sum) recursion. Values are the reference's scores.
    fn adversarial(
        &self,
        state: &G::State,
        marker: Marker,
        reference: Marker,
        depth: u32,
        stats: &mut SearchStats,
    ) -> Result<Score> {
        stats.visit(depth);

        if self.rules.is_terminal(state) {
            stats.terminal_evals += 1;
            return Ok(self.rules.terminal_score(state, reference, depth));
        }

        if self.config.depth_reached(depth) {
            stats.heuristic_evals += 1;
            return Ok(self.rules.heuristic(state, reference, depth));
        }

        let maximizing = marker == reference;
        let next = self.rules.next_marker(self.order, marker);
        let mut best: Option<Score> = None;

        for mv in self.rules.possible_moves(state) {
            let child = self.rules.apply_move(state, &mv, marker)?;
            let value = self.adversarial(&child, next, reference, depth + 1, stats)?;

            if best.map_or(true, |incumbent| improves(maximizing, value, incumbent)) {
                best = Some(value);
            }

            if self.rules.early_pruning(
                &child,
                depth + 1,
                value,
                self.config.max_depth,
                Some(reference),
            ) {
                stats.pruned += 1;
                break;
            }
        }

        best.ok_or(Error::NoLegalMoves)
    }

    /// Selfish recursion. Values are per-participant vectors.
    ///
    /// The pruning hook sees the mover's component and no reference.
    fn selfish(
        &self,
        state: &G::State,
        marker: Marker,
        depth: u32,
        stats: &mut SearchStats,
    ) -> Result<Evaluation> {
        stats.visit(depth);

        if self.rules.is_terminal(state) {
            stats.terminal_evals += 1;
            return Ok(self.evaluate_all(|m| self.rules.terminal_score(state, m, depth)));
        }

        if self.config.depth_reached(depth) {
            stats.heuristic_evals += 1;
            return Ok(self.evaluate_all(|m| self.rules.heuristic(state, m, depth)));
        }

        let next = self.rules.next_marker(self.order, marker);
        let mut best: Option<Evaluation> = None;

        for mv in self.rules.possible_moves(state) {
            let child = self.rules.apply_move(state, &mv, marker)?;
            let evaluation = self.selfish(&child, next, depth + 1, stats)?;
            let value = evaluation.get(marker);

            if best
                .as_ref()
                .map_or(true, |incumbent| improves(true, value, incumbent.get(marker)))
            {
                best = Some(evaluation);
            }

            if self
                .rules
                .early_pruning(&child, depth + 1, value, self.config.max_depth, None)
            {
                stats.pruned += 1;
                break;
            }
        }

        best.ok_or(Error::NoLegalMoves)
    }

    fn evaluate_all(&self, score: impl Fn(Marker) -> Score) -> Evaluation {
        Evaluation(self.order.active_markers().map(|m| (m, score(m))).collect())
    }
}

/// Strict improvement test; equal values keep the incumbent.
fn improves(maximizing: bool, candidate: Score, incumbent: Score) -> bool {
    if maximizing {
        candidate > incumbent
    } else {
        candidate < incumbent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Moves;
    use std::cell::Cell;

    /// Fixed-shape tree: every node has `branching` children until
    /// `height`; leaf values come from the path.
    struct TreeGame {
        branching: usize,
        height: usize,
        leaf: fn(&[usize]) -> Score,
        prune_always: bool,
        applied: Cell<u32>,
        heuristic_calls: Cell<u32>,
    }

    impl TreeGame {
        fn new(branching: usize, height: usize, leaf: fn(&[usize]) -> Score) -> Self {
            Self {
                branching,
                height,
                leaf,
                prune_always: false,
                applied: Cell::new(0),
                heuristic_calls: Cell::new(0),
            }
        }
    }

    impl GameRules for TreeGame {
        type State = Vec<usize>;
        type Move = usize;

        fn name(&self) -> &str {
            "tree"
        }

        fn possible_moves(&self, state: &Vec<usize>) -> Moves<usize> {
            if state.len() >= self.height {
                Moves::new()
            } else {
                (0..self.branching).collect()
            }
        }

        fn apply_move(&self, state: &Vec<usize>, mv: &usize, marker: Marker) -> Result<Vec<usize>> {
            if !self.is_legal(state, mv) {
                return Err(Error::invalid_move(mv, marker));
            }
            self.applied.set(self.applied.get() + 1);
            let mut next = state.clone();
            next.push(*mv);
            Ok(next)
        }

        fn is_terminal(&self, state: &Vec<usize>) -> bool {
            state.len() >= self.height
        }

        fn winner(&self, _state: &Vec<usize>) -> Option<Marker> {
            None
        }

        // Leaf values are A's; B's is the negation, C's is the raw path sum.
        fn terminal_score(&self, state: &Vec<usize>, subject: Marker, _depth: u32) -> Score {
            let v = (self.leaf)(state);
            match subject.0 {
                'A' => v,
                'B' => -v,
                _ => state.iter().sum::<usize>() as Score,
            }
        }

        fn heuristic(&self, _state: &Vec<usize>, _subject: Marker, _depth: u32) -> Score {
            self.heuristic_calls.set(self.heuristic_calls.get() + 1);
            0
        }

        fn early_pruning(
            &self,
            _state: &Vec<usize>,
            _depth: u32,
            _value: Score,
            _max_depth: Option<u32>,
            _reference: Option<Marker>,
        ) -> bool {
            self.prune_always
        }

        fn snapshot(&self, state: &Vec<usize>) -> String {
            format!("{state:?}")
        }
    }

    fn two_players() -> TurnOrder {
        TurnOrder::new([Marker('A'), Marker('B')]).unwrap()
    }

    // Leaves (A's value) for a 2x2 tree: [0,0]=3 [0,1]=5 [1,0]=2 [1,1]=9
    fn leaf_2x2(path: &[usize]) -> Score {
        [[3, 5], [2, 9]][path[0]][path[1]]
    }

    #[test]
    fn test_adversarial_root_maximizes_reference() {
        let game = TreeGame::new(2, 2, leaf_2x2);
        let order = two_players();
        let search = Minimax::new(&game, &order, SearchConfig::default());

        // B minimizes: move 0 -> 3, move 1 -> 2. A picks move 0.
        let result = search.search(&vec![], Marker('A'), None).unwrap();
        assert_eq!(result.best_move, 0);
        assert_eq!(result.value, 3);
        assert_eq!(result.stats.terminal_evals, 4);
    }

    #[test]
    fn test_adversarial_root_minimizes_for_opponent() {
        let game = TreeGame::new(2, 2, leaf_2x2);
        let order = two_players();
        let search = Minimax::new(&game, &order, SearchConfig::default());

        // B acts against reference A; A maximizes below: 0 -> 5, 1 -> 9.
        let mv = search.best_move(&vec![], Marker('B'), Some(Marker('A'))).unwrap();
        assert_eq!(mv, 0);
    }

    #[test]
    fn test_ties_keep_first_move() {
        let game = TreeGame::new(3, 1, |_| 7);
        let order = two_players();
        let search = Minimax::new(&game, &order, SearchConfig::default());
        assert_eq!(search.best_move(&vec![], Marker('A'), None).unwrap(), 0);
        assert_eq!(search.best_move(&vec![], Marker('B'), Some(Marker('A'))).unwrap(), 0);
    }

    #[test]
    fn test_no_legal_moves_is_error() {
        let game = TreeGame::new(2, 0, |_| 0);
        let order = two_players();
        let search = Minimax::new(&game, &order, SearchConfig::default());
        assert!(matches!(
            search.best_move(&vec![], Marker('A'), None),
            Err(Error::NoLegalMoves)
        ));
    }

    #[test]
    fn test_pruning_returns_first_child_value() {
        let mut game = TreeGame::new(3, 2, |p| (p[0] * 10 + p[1]) as Score);
        game.prune_always = true;
        let order = two_players();
        let search = Minimax::new(&game, &order, SearchConfig::default());

        // Node [2] with B to move: first child [2,0] is worth 20.
        let value = search.minimax(&vec![2], Marker('B'), Some(Marker('A')), 1).unwrap();
        assert_eq!(value, 20);
        assert_eq!(game.applied.get(), 1);
    }

    #[test]
    fn test_pruning_only_cuts_enclosing_node() {
        let mut game = TreeGame::new(2, 2, leaf_2x2);
        game.prune_always = true;
        let order = two_players();
        let search = Minimax::new(&game, &order, SearchConfig::default());

        // Root has no hook: both root children are explored, each
        // inner node stops after its first child.
        let result = search.search(&vec![], Marker('A'), None).unwrap();
        assert_eq!(result.stats.pruned, 2);
        assert_eq!(game.applied.get(), 4);
        // [0,0]=3 vs [1,0]=2
        assert_eq!(result.best_move, 0);
        assert_eq!(result.value, 3);
    }

    #[test]
    fn test_depth_limit_uses_heuristic() {
        let game = TreeGame::new(2, 4, |_| 100);
        let order = two_players();
        let search = Minimax::new(&game, &order, SearchConfig::default().with_max_depth(2));

        let result = search.search(&vec![], Marker('A'), None).unwrap();
        assert_eq!(result.value, 0);
        assert_eq!(result.stats.terminal_evals, 0);
        // Root children at depth 1 expand; grandchildren at depth 2 stop.
        assert_eq!(game.heuristic_calls.get(), 4);
        assert_eq!(result.stats.max_depth, 2);
    }

    #[test]
    fn test_selfish_each_mover_maximizes_own_component() {
        // Three players, height 2. C scores the raw path sum, so at the
        // second ply B picks by -leaf while C's preferences are ignored.
        let game = TreeGame::new(2, 2, leaf_2x2);
        let order = TurnOrder::new([Marker('A'), Marker('B'), Marker('C')]).unwrap();
        let search = Minimax::new(&game, &order, SearchConfig::new(SearchMode::Selfish));

        // B at [0] picks [0,0] (-3 > -5); at [1] picks [1,0] (-2 > -9).
        // A compares 3 vs 2 and takes move 0.
        let result = search.search(&vec![], Marker('A'), None).unwrap();
        assert_eq!(result.best_move, 0);
        assert_eq!(result.value, 3);
    }

    #[test]
    fn test_selfish_pruning_sees_no_reference() {
        struct Recorder(TreeGame, Cell<bool>);
        impl GameRules for Recorder {
            type State = Vec<usize>;
            type Move = usize;
            fn name(&self) -> &str {
                "recorder"
            }
            fn possible_moves(&self, s: &Vec<usize>) -> Moves<usize> {
                self.0.possible_moves(s)
            }
            fn apply_move(&self, s: &Vec<usize>, m: &usize, k: Marker) -> Result<Vec<usize>> {
                self.0.apply_move(s, m, k)
            }
            fn is_terminal(&self, s: &Vec<usize>) -> bool {
                self.0.is_terminal(s)
            }
            fn winner(&self, _s: &Vec<usize>) -> Option<Marker> {
                None
            }
            fn terminal_score(&self, s: &Vec<usize>, m: Marker, d: u32) -> Score {
                self.0.terminal_score(s, m, d)
            }
            fn heuristic(&self, s: &Vec<usize>, m: Marker, d: u32) -> Score {
                self.0.heuristic(s, m, d)
            }
            fn early_pruning(
                &self,
                _s: &Vec<usize>,
                _d: u32,
                _v: Score,
                _max: Option<u32>,
                reference: Option<Marker>,
            ) -> bool {
                if reference.is_some() {
                    self.1.set(true);
                }
                false
            }
            fn snapshot(&self, s: &Vec<usize>) -> String {
                self.0.snapshot(s)
            }
        }

        let game = Recorder(TreeGame::new(2, 3, leaf_2x2_deep), Cell::new(false));
        let order = two_players();
        Minimax::new(&game, &order, SearchConfig::new(SearchMode::Selfish))
            .best_move(&vec![], Marker('A'), None)
            .unwrap();
        assert!(!game.1.get());

        Minimax::new(&game, &order, SearchConfig::default())
            .best_move(&vec![], Marker('A'), None)
            .unwrap();
        assert!(game.1.get());
    }

    fn leaf_2x2_deep(path: &[usize]) -> Score {
        path.iter().sum::<usize>() as Score
    }

    #[test]
    fn test_evaluation_lookup() {
        let ev = Evaluation(SmallVec::from_slice(&[(Marker('A'), 4), (Marker('B'), -4)]));
        assert_eq!(ev.get(Marker('B')), -4);
        assert_eq!(ev.get(Marker('Z')), Score::MIN);
        assert_eq!(ev.iter().count(), 2);
    }
}
