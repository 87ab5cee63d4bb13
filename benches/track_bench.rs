use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::rc::Rc;
use zaehler::{PseudoNum, Tracker};

fn bench_enter_exit(c: &mut Criterion) {
    c.bench_function("enter_exit_100_handles", |b| {
        let handles: Vec<_> = (0..100).map(Rc::new).collect();
        b.iter_batched(
            || Tracker::new(handles.iter().cloned()),
            |mut t| { t.enter().unwrap(); t.exit().unwrap(); t },
            BatchSize::SmallInput,
        );
    });
}

fn bench_assert_broadcast(c: &mut Criterion) {
    c.bench_function("assert_delta_broadcast_100", |b| {
        let handles: Vec<_> = (0..100).map(Rc::new).collect();
        let mut t = Tracker::new(handles.iter().cloned());
        t.enter().unwrap();
        t.exit().unwrap();
        b.iter(|| t.assert_delta([PseudoNum::Any]).unwrap());
    });
}

fn bench_spawn(c: &mut Criterion) {
    c.bench_function("spawn_100_handles", |b| {
        let handles: Vec<_> = (0..100).map(Rc::new).collect();
        let t = Tracker::new(handles.iter().cloned());
        b.iter(|| t.spawn());
    });
}

criterion_group!(track, bench_enter_exit, bench_assert_broadcast, bench_spawn);
criterion_main!(track);
