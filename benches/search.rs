use rust_tbg::core::{Marker, TurnOrder};
use rust_tbg::games::nim::Nim;
use rust_tbg::games::tictactoe::{Board, TicTacToe};
use rust_tbg::search::{Minimax, SearchConfig, SearchMode};

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(2));
    targets =
        exhausting_tictactoe_empty_board,
        exhausting_tictactoe_fast_pruning,
        limiting_tictactoe_depth,
        exhausting_nim_selfish,
}

fn exhausting_tictactoe_empty_board(c: &mut criterion::Criterion) {
    let game = TicTacToe::new();
    let order = TurnOrder::new([Marker('X'), Marker('O')]).unwrap();
    let search = Minimax::new(&game, &order, SearchConfig::default());
    c.bench_function("exhaustive search from an empty tic-tac-toe board", |b| {
        b.iter(|| search.best_move(&Board::new(), Marker('X'), None))
    });
}

fn exhausting_tictactoe_fast_pruning(c: &mut criterion::Criterion) {
    let game = TicTacToe::new().with_fast_pruning();
    let order = TurnOrder::new([Marker('X'), Marker('O')]).unwrap();
    let search = Minimax::new(&game, &order, SearchConfig::default());
    c.bench_function("exhaustive search with fast pruning", |b| {
        b.iter(|| search.best_move(&Board::new(), Marker('X'), None))
    });
}

fn limiting_tictactoe_depth(c: &mut criterion::Criterion) {
    let game = TicTacToe::new();
    let order = TurnOrder::new([Marker('X'), Marker('O')]).unwrap();
    let search = Minimax::new(&game, &order, SearchConfig::default().with_max_depth(4));
    c.bench_function("depth 4 search from an empty tic-tac-toe board", |b| {
        b.iter(|| search.best_move(&Board::new(), Marker('X'), None))
    });
}

fn exhausting_nim_selfish(c: &mut criterion::Criterion) {
    let game = Nim::new([1, 3, 5]);
    let state = game.initial_state();
    let order = TurnOrder::new([Marker('a'), Marker('b'), Marker('c')]).unwrap();
    let search = Minimax::new(&game, &order, SearchConfig::new(SearchMode::Selfish));
    c.bench_function("selfish three-player search on nim 1-3-5", |b| {
        b.iter(|| search.best_move(&state, Marker('a'), None))
    });
}
