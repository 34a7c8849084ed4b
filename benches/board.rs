use criterion::{black_box, criterion_group, criterion_main, Criterion};

use osero_duel::{Board, Player, Position};

fn midgame() -> Board {
    Board::from_rows([
        "..W.....",
        "..WB.B..",
        ".WWBBW..",
        "..BWBB..",
        ".BBWWW..",
        "...BW.W.",
        "....B...",
        "........",
    ])
}

fn bench_board(c: &mut Criterion) {
    let board = midgame();

    c.bench_function("legal_moves midgame", |b| {
        b.iter(|| black_box(&board).legal_moves(Player::Black))
    });

    c.bench_function("has_any_legal_move midgame", |b| {
        b.iter(|| black_box(&board).has_any_legal_move(Player::White))
    });

    let target = board.legal_moves(Player::Black)[0];
    c.bench_function("place midgame", |b| {
        b.iter(|| {
            let mut board = board.clone();
            board.place(black_box(target), Player::Black)
        })
    });

    let empty_corner = Position::new(0, 0).unwrap();
    c.bench_function("legal_flips no-op", |b| {
        b.iter(|| black_box(&board).legal_flips(empty_corner, Player::White))
    });
}

criterion_group!(benches, bench_board);
criterion_main!(benches);
