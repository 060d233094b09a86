//! The seams between the delta engine and the domain model.
//!
//! Domain objects implement [`DeltaSupport`] to compare themselves against
//! another instance and recursively delegate to their children; the caller
//! supplies a [`DeltaComputationOptions`] deciding how associations are
//! matched. The engine itself (see [`crate::ModelObjectDelta`]) operates
//! purely in terms of these two traits.

use std::any::Any;

use crate::delta::ModelObjectDelta;

/// How the elements of an association are matched when computing deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputationMethod {
    /// Elements are matched by positional index; a different object at the
    /// same position is reported as one
    /// [`DeltaKind::DifferentObjectAtPosition`](crate::DeltaKind) delta.
    ByPosition,
    /// Elements are matched by logical identity
    /// ([`DeltaComputationOptions::is_same`]); unmatched elements become
    /// separate removed/added deltas, and matched pairs at different
    /// positions are additionally reported as moved.
    ByObject,
}

/// Capability implemented by every domain object that can be diffed.
///
/// `compute_delta` compares `self` (the original) against `reference` and
/// returns the delta describing the differences, typically built with
/// [`ModelObjectDelta::new_delta`] followed by property marking and
/// `create_child_deltas_*` calls for each association.
pub trait DeltaSupport: Any {
    /// Compute the structural delta from `self` to `reference`.
    fn compute_delta<'a>(
        &'a self,
        reference: &'a dyn DeltaSupport,
        options: &dyn DeltaComputationOptions,
    ) -> ModelObjectDelta<'a>;

    /// Upcast for concrete-type inspection (class-change detection and
    /// downcasting inside `compute_delta` implementations).
    fn as_any(&self) -> &dyn Any;
}

/// Caller-supplied policy for a delta computation pass.
pub trait DeltaComputationOptions {
    /// The matching method to use for the named association.
    fn method(&self, association: &str) -> ComputationMethod;

    /// Decides whether two objects represent the same logical entity
    /// (e.g. by comparing runtime IDs). Only consulted under
    /// [`ComputationMethod::ByObject`] matching and for positional identity
    /// checks; structural comparison of the pair still happens via
    /// [`DeltaSupport::compute_delta`].
    fn is_same(&self, object1: &dyn DeltaSupport, object2: &dyn DeltaSupport) -> bool;

    /// Lets callers suppress specific property comparisons per concrete
    /// type. Consulted by the per-object `compute_delta` implementations,
    /// not by the composition engine itself.
    fn ignore(&self, _type_id: std::any::TypeId, _property: &str) -> bool {
        false
    }
}

/// Minimal options: a fixed method for every association and instance
/// identity (`is_same` is pointer equality). Suitable for tests and for
/// models whose objects are compared in place.
#[derive(Debug, Clone, Copy)]
pub struct SameInstanceOptions {
    method: ComputationMethod,
}

impl SameInstanceOptions {
    pub fn new(method: ComputationMethod) -> Self {
        Self { method }
    }
}

impl DeltaComputationOptions for SameInstanceOptions {
    fn method(&self, _association: &str) -> ComputationMethod {
        self.method
    }

    fn is_same(&self, object1: &dyn DeltaSupport, object2: &dyn DeltaSupport) -> bool {
        std::ptr::eq(
            object1 as *const dyn DeltaSupport as *const (),
            object2 as *const dyn DeltaSupport as *const (),
        )
    }
}
