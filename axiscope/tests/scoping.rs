use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use axiscope::{
    Annotation, AnnotationChecker, Array, AxisSize, DTypeSpec, Function, Signature, Value, Wrap,
    scope, typechecked,
};
use miette::Result;

mod common;
use common::{f32s, float};

#[test]
fn checks_outside_any_scope_are_ungrounded() {
    assert_eq!(scope::depth(), 0);
    let b = float("b");
    assert!(b.is_instance(&f32s(&[3])));
    assert!(b.is_instance(&f32s(&[5])));
}

#[test]
fn parameters_sharing_an_axis_must_agree() -> Result<()> {
    let x_ann = float("b c1");
    let y_ann = float("b c2");
    let outer_product = Function::new("outer_product", move |(x, y): (Array, Array)| {
        x_ann.is_instance(&x) && y_ann.is_instance(&y)
    })
    .wrap()?;

    assert!(outer_product.call((f32s(&[4, 2]), f32s(&[4, 7]))));
    assert!(!outer_product.call((f32s(&[4, 2]), f32s(&[5, 7]))));
    // A later sibling call may bind `b` to something else.
    assert!(outer_product.call((f32s(&[9, 2]), f32s(&[9, 1]))));
    assert_eq!(scope::depth(), 0);
    Ok(())
}

#[test]
fn nested_call_starts_fresh_and_outer_bindings_survive() -> Result<()> {
    let b = float("b");
    let inner = Function::new("inner", {
        let b = b.clone();
        move |x: Array| (b.is_instance(&x), scope::depth())
    })
    .wrap()?;

    let outer = Function::new("outer", move |()| {
        assert!(b.is_instance(&f32s(&[3])));
        assert_eq!(inner.call(f32s(&[7])), (true, 2));
        assert!(b.is_instance(&f32s(&[3])));
        assert!(!b.is_instance(&f32s(&[7])));
        scope::current_context(|cx| cx.axis("b").cloned())
    })
    .wrap()?;

    assert_eq!(outer.call(()), Some(Some(AxisSize::Single(3))));
    Ok(())
}

#[test]
fn unscoped_helpers_share_the_callers_bindings() -> Result<()> {
    let b = float("b");
    let helper = Function::new("helper", {
        let b = b.clone();
        move |x: Array| b.is_instance(&x)
    });
    let caller = Function::new("caller", move |()| {
        b.is_instance(&f32s(&[3])) && helper.call(f32s(&[3])) && !helper.call(f32s(&[4]))
    })
    .wrap()?;
    assert!(caller.call(()));
    Ok(())
}

#[test]
fn failed_check_leaves_no_residue() {
    scope::scoped(|| {
        assert!(!float("b b").is_instance(&f32s(&[3, 4])));
        assert!(float("b").is_instance(&f32s(&[4])));
        assert_eq!(
            scope::current_context(|cx| cx.axis("b").cloned()),
            Some(Some(AxisSize::Single(4)))
        );
        assert!(!float("b").is_instance(&f32s(&[3])));
    });
}

#[test]
fn manual_checks_join_the_argument_checks() -> Result<()> {
    let sig = Signature::new()
        .param("x", Annotation::array(DTypeSpec::Float, "b c")?)
        .returns(Annotation::array(DTypeSpec::Float, "b")?);
    let row_sums = typechecked("row_sums", sig, Arc::new(AnnotationChecker), |args| {
        let Value::Array(x) = &args[0] else {
            return Value::None;
        };
        // Same axis name as the parameter annotation: must be the row count.
        assert!(float("b _").is_instance(x));
        Value::Array(f32s(&x.shape[..1]))
    })
    .wrap()?;

    assert!(row_sums.call(vec![Value::Array(f32s(&[5, 2]))]).is_ok());

    let truncating = typechecked(
        "truncating",
        Signature::new()
            .param("x", Annotation::array(DTypeSpec::Float, "b c")?)
            .returns(Annotation::array(DTypeSpec::Float, "b")?),
        Arc::new(AnnotationChecker),
        |_| Value::Array(f32s(&[1])),
    )
    .wrap()?;
    let err = truncating.call(vec![Value::Array(f32s(&[5, 2]))]).unwrap_err();
    assert_eq!(err.param, "return");
    Ok(())
}

#[test]
fn errors_and_panics_restore_the_stack() -> Result<()> {
    let fallible = Function::new("fallible", |fail: bool| -> std::result::Result<usize, String> {
        if fail { Err("nope".into()) } else { Ok(scope::depth()) }
    })
    .wrap()?;
    assert_eq!(fallible.call(false), Ok(1));
    assert_eq!(fallible.call(true), Err("nope".to_string()));
    assert_eq!(scope::depth(), 0);

    let boom = Function::<(), ()>::new("boom", |()| panic!("boom")).wrap()?;
    assert!(catch_unwind(AssertUnwindSafe(|| boom.call(()))).is_err());
    assert_eq!(scope::depth(), 0);
    Ok(())
}
