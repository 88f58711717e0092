#![forbid(unsafe_code)]

use crate::error::ShapeParseError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dim {
    Fixed { size: usize, broadcast: bool },
    Named { name: String, broadcast: bool },
    /// `_` or `_name`: any size, never bound.
    Anonymous,
    /// `*name`, `*_` or `...`: zero or more dimensions.
    Variadic {
        name: Option<String>,
        broadcast: bool,
    },
}

impl Dim {
    fn display(&self) -> String {
        let hash = |b: bool| if b { "#" } else { "" };
        match self {
            Dim::Fixed { size, broadcast } => format!("{}{size}", hash(*broadcast)),
            Dim::Named { name, broadcast } => format!("{}{name}", hash(*broadcast)),
            Dim::Anonymous => "_".to_string(),
            Dim::Variadic { name: None, .. } => "...".to_string(),
            Dim::Variadic {
                name: Some(name),
                broadcast,
            } => format!("{}*{name}", hash(*broadcast)),
        }
    }
}

/// Parsed dimension pattern with at most one variadic dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeSpec {
    dims: Vec<Dim>,
    variadic_at: Option<usize>,
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl ShapeSpec {
    pub fn parse(src: &str) -> Result<Self, ShapeParseError> {
        let invalid = |token: &str| ShapeParseError::InvalidToken {
            token: token.to_string(),
            source_text: src.to_string(),
        };

        let mut dims = Vec::new();
        let mut variadic_at = None;
        for token in src.split_whitespace() {
            let (broadcast, body) = match token.strip_prefix('#') {
                Some(rest) => (true, rest),
                None => (false, token),
            };

            let dim = if body == "..." {
                Dim::Variadic {
                    name: None,
                    broadcast,
                }
            } else if let Some(name) = body.strip_prefix('*') {
                if !is_identifier(name) {
                    return Err(invalid(token));
                }
                let name = (!name.starts_with('_')).then(|| name.to_string());
                Dim::Variadic { name, broadcast }
            } else if body.starts_with('_') && is_identifier(body) {
                Dim::Anonymous
            } else if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) {
                let size = body.parse().map_err(|_| invalid(token))?;
                Dim::Fixed { size, broadcast }
            } else if is_identifier(body) {
                Dim::Named {
                    name: body.to_string(),
                    broadcast,
                }
            } else {
                return Err(invalid(token));
            };

            if matches!(dim, Dim::Variadic { .. }) {
                if variadic_at.is_some() {
                    return Err(ShapeParseError::MultipleVariadic {
                        source_text: src.to_string(),
                    });
                }
                variadic_at = Some(dims.len());
            }
            dims.push(dim);
        }

        Ok(Self { dims, variadic_at })
    }

    pub fn dims(&self) -> &[Dim] {
        &self.dims
    }

    /// Dimensions before the variadic one, the variadic one, and those after.
    pub fn split(&self) -> (&[Dim], Option<&Dim>, &[Dim]) {
        match self.variadic_at {
            Some(at) => (&self.dims[..at], Some(&self.dims[at]), &self.dims[at + 1..]),
            None => (&self.dims, None, &[]),
        }
    }

    pub fn display(&self) -> String {
        self.dims
            .iter()
            .map(Dim::display)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
