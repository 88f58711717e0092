#![forbid(unsafe_code)]

use std::collections::HashMap;

use axiscope_scope::AxisSize;

use crate::dims::{Dim, ShapeSpec};
use crate::error::ShapeMismatch;

type Bindings = HashMap<String, AxisSize>;

/// Matches `shape` against `spec` given the axes already bound.
///
/// Returns the new bindings the match implies without applying them; the
/// caller commits them only when the whole check succeeds.
pub(crate) fn match_shape(
    spec: &ShapeSpec,
    shape: &[usize],
    bound: &Bindings,
) -> Result<Bindings, ShapeMismatch> {
    let (before, variadic, after) = spec.split();
    let fixed = before.len() + after.len();
    let rank = shape.len();
    let rank_ok = match variadic {
        Some(_) => rank >= fixed,
        None => rank == fixed,
    };
    if !rank_ok {
        let expected = match variadic {
            Some(_) => format!("at least {fixed}"),
            None => fixed.to_string(),
        };
        return Err(ShapeMismatch::Rank {
            expected,
            found: rank,
        });
    }

    let mut staged = Bindings::new();
    for (index, dim) in before.iter().enumerate() {
        match_single(dim, index, shape[index], bound, &mut staged)?;
    }
    let tail = rank - after.len();
    if let Some(dim) = variadic {
        match_variadic(dim, &shape[before.len()..tail], bound, &mut staged)?;
    }
    for (offset, dim) in after.iter().enumerate() {
        let index = tail + offset;
        match_single(dim, index, shape[index], bound, &mut staged)?;
    }
    Ok(staged)
}

fn lookup<'a>(name: &str, bound: &'a Bindings, staged: &'a Bindings) -> Option<&'a AxisSize> {
    staged.get(name).or_else(|| bound.get(name))
}

fn match_single(
    dim: &Dim,
    index: usize,
    found: usize,
    bound: &Bindings,
    staged: &mut Bindings,
) -> Result<(), ShapeMismatch> {
    match dim {
        Dim::Anonymous | Dim::Variadic { .. } => Ok(()),
        Dim::Fixed { size, broadcast } => {
            if found == *size || (*broadcast && found == 1) {
                Ok(())
            } else {
                Err(ShapeMismatch::Fixed {
                    index,
                    expected: *size,
                    found,
                })
            }
        }
        Dim::Named { name, broadcast } => {
            if *broadcast && found == 1 {
                return Ok(());
            }
            match lookup(name, bound, staged) {
                Some(AxisSize::Single(size)) if *size == found => Ok(()),
                Some(other) => Err(ShapeMismatch::Axis {
                    name: name.clone(),
                    bound: other.display(),
                    found: found.to_string(),
                }),
                None => {
                    staged.insert(name.clone(), AxisSize::Single(found));
                    Ok(())
                }
            }
        }
    }
}

fn match_variadic(
    dim: &Dim,
    found: &[usize],
    bound: &Bindings,
    staged: &mut Bindings,
) -> Result<(), ShapeMismatch> {
    let Dim::Variadic {
        name: Some(name),
        broadcast,
    } = dim
    else {
        return Ok(());
    };
    let mismatch = |prior: &AxisSize| ShapeMismatch::Axis {
        name: name.clone(),
        bound: prior.display(),
        found: AxisSize::Multi(found.to_vec()).display(),
    };
    match lookup(name, bound, staged) {
        Some(AxisSize::Multi(sizes)) => {
            let same = sizes.len() == found.len()
                && sizes
                    .iter()
                    .zip(found)
                    .all(|(want, got)| want == got || (*broadcast && *got == 1));
            if same { Ok(()) } else { Err(mismatch(&AxisSize::Multi(sizes.clone()))) }
        }
        Some(other) => Err(mismatch(other)),
        None => {
            staged.insert(name.clone(), AxisSize::Multi(found.to_vec()));
            Ok(())
        }
    }
}
