#![forbid(unsafe_code)]

use std::sync::Arc;

use crate::annotation::Annotation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassKind {
    /// Named, typed fields that can be enumerated at runtime.
    Record,
    Plain,
}

/// Runtime description of a class: its own annotations plus its parent.
#[derive(Debug)]
pub struct Class {
    name: String,
    kind: ClassKind,
    parent: Option<Arc<Class>>,
    annotations: Vec<(String, Annotation)>,
}

pub struct ClassBuilder {
    class: Class,
}

impl ClassBuilder {
    pub fn extends(mut self, parent: &Arc<Class>) -> Self {
        self.class.parent = Some(Arc::clone(parent));
        self
    }

    /// Declares (or re-declares) an annotated field on this class.
    pub fn field(mut self, name: impl Into<String>, annotation: Annotation) -> Self {
        let name = name.into();
        match self.class.annotations.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = annotation,
            None => self.class.annotations.push((name, annotation)),
        }
        self
    }

    pub fn build(self) -> Arc<Class> {
        Arc::new(self.class)
    }
}

impl Class {
    fn builder(name: impl Into<String>, kind: ClassKind) -> ClassBuilder {
        ClassBuilder {
            class: Class {
                name: name.into(),
                kind,
                parent: None,
                annotations: Vec::new(),
            },
        }
    }

    pub fn record(name: impl Into<String>) -> ClassBuilder {
        Self::builder(name, ClassKind::Record)
    }

    pub fn plain(name: impl Into<String>) -> ClassBuilder {
        Self::builder(name, ClassKind::Plain)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn is_record(&self) -> bool {
        self.kind == ClassKind::Record
    }

    pub fn parent(&self) -> Option<&Arc<Class>> {
        self.parent.as_ref()
    }

    pub fn own_annotation(&self, field: &str) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|(n, _)| n == field)
            .map(|(_, a)| a)
    }

    /// This class, then each ancestor, most-derived first.
    pub fn lineage(&self) -> Lineage<'_> {
        Lineage { next: Some(self) }
    }

    pub fn is_subclass_of(&self, other: &Class) -> bool {
        self.lineage().any(|c| std::ptr::eq(c, other))
    }

    /// Record fields in declaration order: inherited fields first, each at the
    /// position where it was first declared. Annotations on plain ancestors
    /// are not fields.
    pub fn fields(&self) -> Vec<&str> {
        let mut chain: Vec<&Class> = self.lineage().filter(|c| c.is_record()).collect();
        chain.reverse();
        let mut out: Vec<&str> = Vec::new();
        for class in chain {
            for (name, _) in &class.annotations {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
        }
        out
    }

    /// The annotation `field` resolves to, looking at the most-derived class
    /// first, plain ancestors included.
    pub fn resolve_annotation(&self, field: &str) -> Option<(&Class, &Annotation)> {
        self.lineage()
            .find_map(|class| class.own_annotation(field).map(|a| (class, a)))
    }
}

pub struct Lineage<'a> {
    next: Option<&'a Class>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a Class;

    fn next(&mut self) -> Option<&'a Class> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}
