//! The object graph store and reference registry.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use thiserror::Error;

use crate::graph::{Object, ObjectKind, Reference};

/// `archiveVersion` of every generated project.
pub const ARCHIVE_VERSION: u32 = 1;
/// `objectVersion` of every generated project (Xcode 3.2 compatible).
pub const OBJECT_VERSION: u32 = 46;

/// Lookups and insertions that violate the registry's rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Object {reference} is not in the graph")]
    ObjectNotFound { reference: Reference },

    #[error("Object {reference} was inserted twice")]
    DuplicateObject { reference: Reference },
}

/// Reference → object mapping for one generation run.
///
/// References are handed out by [`reserve`](Self::reserve) before the object
/// exists, so objects can link to each other in any creation order. Nothing is
/// ever removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectGraph {
    archive_version: u32,
    object_version: u32,
    objects: BTreeMap<Reference, Object>,
    root_object: Option<Reference>,
    #[serde(skip)]
    taken: HashSet<Reference>,
}

impl ObjectGraph {
    pub fn new() -> Self {
        Self {
            archive_version: ARCHIVE_VERSION,
            object_version: OBJECT_VERSION,
            ..Self::default()
        }
    }

    /// Hand out a fresh reference for an object of `kind` described by
    /// `context`. The same sequence of calls always yields the same
    /// references.
    pub fn reserve(&mut self, kind: ObjectKind, context: &str) -> Reference {
        let mut attempt = 0;
        loop {
            let reference = Reference::derive(kind, context, attempt);
            if self.taken.insert(reference.clone()) {
                return reference;
            }
            attempt += 1;
        }
    }

    /// Store `object` under a previously reserved reference.
    pub fn insert(&mut self, reference: Reference, object: Object) -> Result<(), GraphError> {
        if self.objects.contains_key(&reference) {
            return Err(GraphError::DuplicateObject { reference });
        }
        self.taken.insert(reference.clone());
        self.objects.insert(reference, object);
        Ok(())
    }

    /// Reserve and insert in one step.
    pub fn add(&mut self, object: Object, context: &str) -> Reference {
        let reference = self.reserve(object.kind(), context);
        self.objects.insert(reference.clone(), object);
        reference
    }

    pub fn get(&self, reference: &Reference) -> Option<&Object> {
        self.objects.get(reference)
    }

    /// Like [`get`](Self::get), but a missing object is an error.
    pub fn require(&self, reference: &Reference) -> Result<&Object, GraphError> {
        self.objects
            .get(reference)
            .ok_or_else(|| GraphError::ObjectNotFound {
                reference: reference.clone(),
            })
    }

    pub(crate) fn get_mut(&mut self, reference: &Reference) -> Option<&mut Object> {
        self.objects.get_mut(reference)
    }

    pub fn contains(&self, reference: &Reference) -> bool {
        self.objects.contains_key(reference)
    }

    pub fn set_root(&mut self, reference: Reference) {
        self.root_object = Some(reference);
    }

    pub fn root(&self) -> Option<&Reference> {
        self.root_object.as_ref()
    }

    pub fn archive_version(&self) -> u32 {
        self.archive_version
    }

    pub fn object_version(&self) -> u32 {
        self.object_version
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in reference order.
    pub fn iter(&self) -> impl Iterator<Item = (&Reference, &Object)> {
        self.objects.iter()
    }

    /// Objects of one kind, in reference order.
    pub fn of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = (&Reference, &Object)> {
        self.objects.iter().filter(move |(_, o)| o.kind() == kind)
    }
}
