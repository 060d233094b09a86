//! Structural deltas between two versions of an object graph.
//!
//! A [`ModelObjectDelta`] is a node in a tree of deltas mirroring the object
//! graph: leaf property changes are recorded by name, child additions,
//! removals, moves, and replacements are recorded as tagged child deltas.
//! Empty subtrees are dropped on attachment, so the resulting tree describes
//! only what actually changed.
//!
//! Deltas are mutated exactly once, during the comparison pass that builds
//! them, and are read via getters or a pruning pre-order visitor afterwards.

use std::fmt;

use crate::delta_options::DeltaSupport;

// ============================================================================
// KINDS
// ============================================================================

/// The classification of a single delta node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaKind {
    /// Original and reference are structurally comparable and equal.
    Empty,
    /// Only a reference object exists; it was added.
    Added,
    /// Only an original object exists; it was removed.
    Removed,
    /// The same logical object sits at a different position in the
    /// reference collection.
    Moved,
    /// Under by-position matching, the object at this position is a
    /// different one.
    DifferentObjectAtPosition,
    /// Original and reference differ in properties, class, or children.
    Changed,
}

// ============================================================================
// DELTA NODE
// ============================================================================

/// A node describing the differences between an original and a reference
/// object, recursively composed over the object graph.
///
/// # Examples
///
/// ```
/// use rangedelta::ModelObjectDelta;
/// use rangedelta::{DeltaSupport, DeltaComputationOptions};
/// # use std::any::Any;
/// # struct Tariff;
/// # impl DeltaSupport for Tariff {
/// #     fn compute_delta<'a>(&'a self, reference: &'a dyn DeltaSupport,
/// #         _options: &dyn DeltaComputationOptions) -> ModelObjectDelta<'a> {
/// #         ModelObjectDelta::new_delta(self, reference)
/// #     }
/// #     fn as_any(&self) -> &dyn Any { self }
/// # }
///
/// let (old, new) = (Tariff, Tariff);
/// let mut delta = ModelObjectDelta::new_delta(&old, &new);
/// assert!(delta.is_empty());
///
/// delta.mark_property_changed("premium");
/// assert!(delta.is_property_changed());
/// assert_eq!(delta.changed_properties(), ["premium"]);
/// ```
pub struct ModelObjectDelta<'a> {
    /// Kind as constructed; a base of `Empty` reads as `Changed` once
    /// changes accumulate (see [`ModelObjectDelta::kind`]).
    kind: DeltaKind,
    class_changed: bool,
    original: Option<&'a dyn DeltaSupport>,
    reference: Option<&'a dyn DeltaSupport>,
    /// Name of the association this delta belongs to under its parent;
    /// `None` for a root delta.
    association: Option<String>,
    changed_properties: Vec<String>,
    children: Vec<ModelObjectDelta<'a>>,
}

impl<'a> ModelObjectDelta<'a> {
    // ============================================================================
    // FACTORIES
    // ============================================================================

    fn with_parts(
        kind: DeltaKind,
        original: Option<&'a dyn DeltaSupport>,
        reference: Option<&'a dyn DeltaSupport>,
    ) -> Self {
        Self {
            kind,
            class_changed: false,
            original,
            reference,
            association: None,
            changed_properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A provisionally empty delta between two comparable objects.
    pub fn new_empty_delta(
        original: &'a dyn DeltaSupport,
        reference: &'a dyn DeltaSupport,
    ) -> Self {
        Self::with_parts(DeltaKind::Empty, Some(original), Some(reference))
    }

    /// The general comparison entry point: a provisionally empty delta that
    /// additionally flags a class change when the two objects' concrete
    /// types differ.
    pub fn new_delta(original: &'a dyn DeltaSupport, reference: &'a dyn DeltaSupport) -> Self {
        let mut delta = Self::new_empty_delta(original, reference);
        delta.class_changed = original.as_any().type_id() != reference.as_any().type_id();
        delta
    }

    /// A delta for an object present only in the reference graph.
    pub fn new_add_delta(added: &'a dyn DeltaSupport, association: &str) -> Self {
        Self::with_parts(DeltaKind::Added, None, Some(added)).with_association(association)
    }

    /// A delta for an object present only in the original graph.
    pub fn new_remove_delta(removed: &'a dyn DeltaSupport, association: &str) -> Self {
        Self::with_parts(DeltaKind::Removed, Some(removed), None).with_association(association)
    }

    /// A delta for a logical object matched at a different position of a
    /// to-many association.
    pub fn new_move_delta(
        original: &'a dyn DeltaSupport,
        reference: &'a dyn DeltaSupport,
        association: &str,
    ) -> Self {
        Self::with_parts(DeltaKind::Moved, Some(original), Some(reference))
            .with_association(association)
    }

    /// A delta for a position occupied by a different object under
    /// by-position matching.
    pub fn new_different_object_at_position_delta(
        original: &'a dyn DeltaSupport,
        reference: &'a dyn DeltaSupport,
        association: &str,
    ) -> Self {
        Self::with_parts(
            DeltaKind::DifferentObjectAtPosition,
            Some(original),
            Some(reference),
        )
        .with_association(association)
    }

    pub(crate) fn with_association(mut self, association: &str) -> Self {
        self.association = Some(association.to_string());
        self
    }

    // ============================================================================
    // MUTATION DURING THE COMPARISON PASS
    // ============================================================================

    /// Record a changed leaf property. Idempotent: repeated calls with the
    /// same name keep a single entry, in first-seen order.
    pub fn mark_property_changed(&mut self, property: &str) {
        if !self.changed_properties.iter().any(|p| p == property) {
            self.changed_properties.push(property.to_string());
        }
    }

    /// Attach a child delta. An empty child (no changes anywhere beneath it)
    /// is silently dropped; this is what keeps delta trees minimal.
    pub fn add_child_delta(&mut self, child: ModelObjectDelta<'a>) {
        if !child.is_empty() {
            self.children.push(child);
        }
    }

    // ============================================================================
    // CLASSIFICATION
    // ============================================================================

    /// The effective kind: the constructed kind, except that a provisionally
    /// empty delta that accumulated changes reads as [`DeltaKind::Changed`].
    pub fn kind(&self) -> DeltaKind {
        match self.kind {
            DeltaKind::Empty if self.is_changed() => DeltaKind::Changed,
            kind => kind,
        }
    }

    /// True iff nothing changed: no properties, no class change, and no
    /// non-empty child deltas. Evaluated on demand, transitively.
    pub fn is_empty(&self) -> bool {
        self.kind == DeltaKind::Empty && !self.is_changed()
    }

    /// True iff any property, class, structure, or child change exists.
    pub fn is_changed(&self) -> bool {
        self.is_property_changed()
            || self.is_class_changed()
            || self.is_structure_changed()
            || self.is_child_changed()
    }

    /// True iff at least one leaf property changed on this object.
    pub fn is_property_changed(&self) -> bool {
        !self.changed_properties.is_empty()
    }

    /// True iff the original and reference objects have different concrete
    /// types.
    pub fn is_class_changed(&self) -> bool {
        self.class_changed
    }

    /// True iff a direct child delta reports a structural difference
    /// (added, removed, moved, or a different object at the position).
    pub fn is_structure_changed(&self) -> bool {
        self.children.iter().any(|child| {
            matches!(
                child.kind,
                DeltaKind::Added
                    | DeltaKind::Removed
                    | DeltaKind::Moved
                    | DeltaKind::DifferentObjectAtPosition
            )
        })
    }

    /// True iff a direct child delta reports content changes without being
    /// structural.
    pub fn is_child_changed(&self) -> bool {
        self.children
            .iter()
            .any(|child| child.kind() == DeltaKind::Changed)
    }

    /// True iff this delta describes an added object.
    pub fn is_added(&self) -> bool {
        self.kind == DeltaKind::Added
    }

    /// True iff this delta describes a removed object.
    pub fn is_removed(&self) -> bool {
        self.kind == DeltaKind::Removed
    }

    /// True iff this delta describes a moved object.
    pub fn is_moved(&self) -> bool {
        self.kind == DeltaKind::Moved
    }

    // ============================================================================
    // ACCESSORS
    // ============================================================================

    /// The original object, absent for added objects.
    pub fn original(&self) -> Option<&'a dyn DeltaSupport> {
        self.original
    }

    /// The reference ("new") object, absent for removed objects.
    pub fn reference(&self) -> Option<&'a dyn DeltaSupport> {
        self.reference
    }

    /// The association this delta belongs to under its parent, if any.
    pub fn association(&self) -> Option<&str> {
        self.association.as_deref()
    }

    /// The changed property names, de-duplicated, in first-seen order.
    pub fn changed_properties(&self) -> &[String] {
        &self.changed_properties
    }

    /// The non-empty child deltas, in insertion order.
    pub fn child_deltas(&self) -> &[ModelObjectDelta<'a>] {
        &self.children
    }

    // ============================================================================
    // TRAVERSAL
    // ============================================================================

    /// Pre-order traversal: visits this delta first, then — only if the
    /// visitor returned true — each child delta in insertion order.
    /// Returning false prunes the subtree but does not affect siblings.
    pub fn accept(&self, visitor: &mut dyn DeltaVisitor<'a>) {
        if visitor.visit(self) {
            for child in &self.children {
                child.accept(visitor);
            }
        }
    }
}

impl fmt::Debug for ModelObjectDelta<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelObjectDelta")
            .field("kind", &self.kind())
            .field("class_changed", &self.class_changed)
            .field("association", &self.association)
            .field("changed_properties", &self.changed_properties)
            .field("children", &self.children)
            .finish()
    }
}

/// Callback for [`ModelObjectDelta::accept`].
pub trait DeltaVisitor<'a> {
    /// Return true to descend into the delta's children.
    fn visit(&mut self, delta: &ModelObjectDelta<'a>) -> bool;
}
