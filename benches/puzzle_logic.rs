use criterion::{black_box, criterion_group, criterion_main, Criterion};
use braintwist::core::validate::check;
use braintwist::core::{PuzzleGenerator, Session, SessionEvent, SessionOptions, TimerCommand};
use braintwist::term::{Overlay, SessionView, Viewport};
use braintwist::types::{Category, Difficulty, SessionCommand};

fn bench_generate(c: &mut Criterion) {
    let mut generator = PuzzleGenerator::with_seed(12345);

    for category in Category::ALL {
        c.bench_function(&format!("generate_{}_hard", category.as_str()), |b| {
            b.iter(|| generator.generate(black_box(category), Difficulty::Hard))
        });
    }
}

fn bench_validate(c: &mut Criterion) {
    let puzzle = PuzzleGenerator::with_seed(7).generate(Category::Word, Difficulty::Hard);
    let answers: Vec<String> = "LABYRINTH".chars().map(String::from).collect();

    c.bench_function("validate_word", |b| {
        b.iter(|| check(black_box(&puzzle), black_box(&answers)))
    });
}

fn bench_round(c: &mut Criterion) {
    c.bench_function("session_full_timeout_round", |b| {
        b.iter(|| {
            let mut session = Session::for_category(Category::Math, SessionOptions::immediate());
            session.open();
            let out = session.dispatch(SessionCommand::Start.into());
            let ticket = out.commands.iter().find_map(|c| match c {
                TimerCommand::StartCountdown { ticket, .. } => Some(*ticket),
                _ => None,
            });
            if let Some(ticket) = ticket {
                while session.dispatch(SessionEvent::CountdownTick(ticket)).applied {}
            }
            session.lives()
        })
    });
}

fn bench_view(c: &mut Criterion) {
    let mut session = Session::for_category(Category::Word, SessionOptions::immediate());
    session.open();
    session.dispatch(SessionCommand::Start.into());
    let snapshot = session.snapshot();
    let view = SessionView;

    c.bench_function("render_word_view_100x30", |b| {
        b.iter(|| view.render(black_box(&snapshot), Overlay::default(), Viewport::new(100, 30)))
    });
}

criterion_group!(benches, bench_generate, bench_validate, bench_round, bench_view);
criterion_main!(benches);
