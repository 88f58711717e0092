use std::sync::Arc;

use axiscope::{
    Annotation, Class, Constructor, Function, Method, MethodKind, PassThrough, Property, Record,
    RecordVerifier, Value, Wrap, scope, wrap,
};
use miette::Result;

#[test]
fn wrapping_twice_pushes_one_context() -> Result<()> {
    let depth = Function::new("depth", |()| scope::depth());
    let once = wrap(depth.clone())?;
    let twice = wrap(once.clone())?;

    assert!(!depth.is_scoped());
    assert!(once.is_scoped());
    assert!(twice.ptr_eq(&once));
    assert_eq!(depth.call(()), 0);
    assert_eq!(twice.call(()), 1);
    Ok(())
}

#[test]
fn methods_keep_their_kind() -> Result<()> {
    for kind in [MethodKind::Instance, MethodKind::Class, MethodKind::Static] {
        let method = Method::new(kind, Function::new("depth", |()| scope::depth()));
        let wrapped = method.wrap()?.wrap()?;
        assert_eq!(wrapped.kind(), kind);
        assert_eq!(wrapped.call(()), 1);
    }
    Ok(())
}

#[derive(Default)]
struct Counter {
    hits: usize,
    seen_depth: usize,
}

#[test]
fn every_property_accessor_is_scoped_once() -> Result<()> {
    let hits = Property::<Counter, usize>::new("hits")
        .getter(|c| c.hits + scope::depth() * 100)
        .setter(|c, v| {
            c.hits = v;
            c.seen_depth = scope::depth();
        })
        .deleter(|c| c.seen_depth = scope::depth() + 10);
    let wrapped = hits.wrap()?.wrap()?;
    assert!(wrapped.is_scoped());

    let mut counter = Counter::default();
    wrapped.set(&mut counter, 3)?;
    assert_eq!(counter.seen_depth, 1);
    assert_eq!(wrapped.get(&counter)?, 103);
    wrapped.delete(&mut counter)?;
    assert_eq!(counter.seen_depth, 11);
    Ok(())
}

#[test]
fn getter_only_property_is_scoped_and_still_read_only() -> Result<()> {
    let read_only = Property::<Counter, usize>::new("hits")
        .getter(|c| c.hits)
        .wrap()?;
    assert!(read_only.is_scoped());
    let err = read_only
        .set(&mut Counter::default(), 1)
        .expect_err("no setter");
    assert_eq!(err.accessor, "setter");
    Ok(())
}

struct Unit {
    class: Arc<Class>,
    depth: usize,
}

impl Record for Unit {
    fn class(&self) -> &Arc<Class> {
        &self.class
    }

    fn field(&self, _name: &str) -> Option<Value> {
        None
    }
}

#[test]
fn decorated_then_wrapped_record_scopes_init_once() -> Result<()> {
    let class = Class::record("Unit").field("depth", Annotation::Int).build();
    let ctor = Constructor::new(Arc::clone(&class), move |()| {
        Ok(Unit {
            class: Arc::clone(&class),
            depth: scope::depth(),
        })
    });

    let decorated = RecordVerifier::new(PassThrough).decorate(ctor)?;
    let rewrapped = decorated.clone().wrap()?;
    assert!(rewrapped.initializer().ptr_eq(decorated.initializer()));
    assert_eq!(rewrapped.construct(())?.depth, 1);
    Ok(())
}
