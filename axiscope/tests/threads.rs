use std::sync::Barrier;

use axiscope::{Array, AxisSize, Function, Wrap, scope};
use miette::Result;
use rayon::prelude::*;

mod common;
use common::{f32s, float};

#[test]
fn threads_never_see_each_others_bindings() -> Result<()> {
    const THREADS: usize = 4;
    let barrier = Barrier::new(THREADS);
    let b = float("b");
    let bind_then_wait = Function::new("bind_then_wait", move |x: Array| {
        assert!(b.is_instance(&x));
        barrier.wait();
        let own = scope::current_context(|cx| cx.axis("b").cloned());
        let others_rejected = (2..2 + THREADS)
            .filter(|&n| n != x.shape[0])
            .all(|n| !b.is_instance(&f32s(&[n])));
        (own, others_rejected, scope::depth())
    })
    .wrap()?;

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let f = bind_then_wait.clone();
                s.spawn(move || (i + 2, f.call(f32s(&[i + 2]))))
            })
            .collect();
        for handle in handles {
            let (size, (own, others_rejected, depth)) = handle.join().expect("thread panicked");
            assert_eq!(own, Some(Some(AxisSize::Single(size))));
            assert!(others_rejected);
            assert_eq!(depth, 1);
        }
    });
    assert_eq!(scope::depth(), 0);
    Ok(())
}

#[test]
fn rayon_workers_stay_balanced() -> Result<()> {
    let rows = float("n c");
    let cols = float("n");
    let paired = Function::new("paired", move |(x, y): (Array, Array)| {
        rows.is_instance(&x) && cols.is_instance(&y)
    })
    .wrap()?;

    let all_consistent = (1..=256usize)
        .into_par_iter()
        .map(|n| paired.call((f32s(&[n % 7 + 1, 3]), f32s(&[n % 7 + 1]))))
        .all(|ok| ok);
    assert!(all_consistent);

    let none_consistent = (1..=256usize)
        .into_par_iter()
        .map(|n| paired.call((f32s(&[n % 7 + 1, 3]), f32s(&[n % 7 + 2]))))
        .any(|ok| ok);
    assert!(!none_consistent);

    let depths = rayon::broadcast(|_| scope::depth());
    assert!(depths.iter().all(|&d| d == 0));
    Ok(())
}
