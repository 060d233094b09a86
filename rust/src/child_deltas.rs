//! Association comparison: building child deltas for to-one and to-many
//! associations.
//!
//! The engine owns the composition rules (what becomes an added, removed,
//! moved, or replaced child); the per-object leaf comparison is delegated to
//! the domain objects' [`DeltaSupport::compute_delta`] implementations, and
//! the matching policy to the caller's [`DeltaComputationOptions`].

use crate::delta::ModelObjectDelta;
use crate::delta_options::{ComputationMethod, DeltaComputationOptions, DeltaSupport};

impl<'a> ModelObjectDelta<'a> {
    // ============================================================================
    // TO-ONE ASSOCIATIONS
    // ============================================================================

    /// Compare a to-one association and attach the resulting child deltas.
    ///
    /// With both sides absent nothing is attached. A side present only in
    /// the reference yields an added child, only in the original a removed
    /// child. With both sides present the outcome depends on the matching
    /// method for `association`:
    ///
    /// * [`ComputationMethod::ByObject`]: objects with the same logical
    ///   identity recurse via [`DeltaSupport::compute_delta`]; different
    ///   identities yield a removed child followed by an added child.
    /// * [`ComputationMethod::ByPosition`]: same identity recurses as above;
    ///   a different object at the position yields one
    ///   [`DeltaKind::DifferentObjectAtPosition`](crate::DeltaKind) child.
    pub fn create_child_delta(
        &mut self,
        original: Option<&'a dyn DeltaSupport>,
        reference: Option<&'a dyn DeltaSupport>,
        association: &str,
        options: &dyn DeltaComputationOptions,
    ) {
        match (original, reference) {
            (None, None) => {}
            (None, Some(added)) => {
                self.add_child_delta(Self::new_add_delta(added, association));
            }
            (Some(removed), None) => {
                self.add_child_delta(Self::new_remove_delta(removed, association));
            }
            (Some(original), Some(reference)) => {
                if options.is_same(original, reference) {
                    let child = original
                        .compute_delta(reference, options)
                        .with_association(association);
                    self.add_child_delta(child);
                } else {
                    match options.method(association) {
                        ComputationMethod::ByObject => {
                            self.add_child_delta(Self::new_remove_delta(original, association));
                            self.add_child_delta(Self::new_add_delta(reference, association));
                        }
                        ComputationMethod::ByPosition => {
                            self.add_child_delta(Self::new_different_object_at_position_delta(
                                original,
                                reference,
                                association,
                            ));
                        }
                    }
                }
            }
        }
    }

    // ============================================================================
    // TO-MANY ASSOCIATIONS
    // ============================================================================

    /// Compare a to-many association and attach the resulting child deltas.
    ///
    /// Under [`ComputationMethod::ByObject`]: every original without an
    /// identity match in the references becomes a removed child; matched
    /// pairs recurse via [`DeltaSupport::compute_delta`], and a pair matched
    /// at different positions additionally yields a moved child (in addition
    /// to, not instead of, the pair's own delta); every reference without a
    /// match becomes an added child. Removed, recursed, and moved children
    /// are attached in original-collection order, added children in
    /// reference-collection order afterwards.
    ///
    /// Under [`ComputationMethod::ByPosition`] the collections are walked
    /// index by index with the to-one rules; surplus tail elements become
    /// removed or added children.
    pub fn create_child_deltas(
        &mut self,
        originals: &[&'a dyn DeltaSupport],
        references: &[&'a dyn DeltaSupport],
        association: &str,
        options: &dyn DeltaComputationOptions,
    ) {
        match options.method(association) {
            ComputationMethod::ByObject => {
                for (position, original) in originals.iter().enumerate() {
                    let matched = references
                        .iter()
                        .position(|reference| options.is_same(*original, *reference));
                    match matched {
                        None => {
                            self.add_child_delta(Self::new_remove_delta(*original, association));
                        }
                        Some(reference_position) => {
                            let reference = references[reference_position];
                            let child = original
                                .compute_delta(reference, options)
                                .with_association(association);
                            self.add_child_delta(child);
                            if position != reference_position {
                                self.add_child_delta(Self::new_move_delta(
                                    *original,
                                    reference,
                                    association,
                                ));
                            }
                        }
                    }
                }
                for reference in references {
                    let matched = originals
                        .iter()
                        .any(|original| options.is_same(*original, *reference));
                    if !matched {
                        self.add_child_delta(Self::new_add_delta(*reference, association));
                    }
                }
            }
            ComputationMethod::ByPosition => {
                let positions = originals.len().max(references.len());
                for position in 0..positions {
                    self.create_child_delta(
                        originals.get(position).copied(),
                        references.get(position).copied(),
                        association,
                        options,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::DeltaKind;
    use std::any::Any;

    /// A coverage-like leaf object with a stable ID and one property.
    struct Item {
        id: u32,
        value: i32,
    }

    impl Item {
        fn new(id: u32, value: i32) -> Self {
            Self { id, value }
        }
    }

    impl DeltaSupport for Item {
        fn compute_delta<'a>(
            &'a self,
            reference: &'a dyn DeltaSupport,
            _options: &dyn DeltaComputationOptions,
        ) -> ModelObjectDelta<'a> {
            let mut delta = ModelObjectDelta::new_delta(self, reference);
            if let Some(other) = reference.as_any().downcast_ref::<Item>() {
                if self.value != other.value {
                    delta.mark_property_changed("value");
                }
            }
            delta
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Matches items by their ID.
    struct IdOptions {
        method: ComputationMethod,
    }

    impl DeltaComputationOptions for IdOptions {
        fn method(&self, _association: &str) -> ComputationMethod {
            self.method
        }

        fn is_same(&self, object1: &dyn DeltaSupport, object2: &dyn DeltaSupport) -> bool {
            match (
                object1.as_any().downcast_ref::<Item>(),
                object2.as_any().downcast_ref::<Item>(),
            ) {
                (Some(a), Some(b)) => a.id == b.id,
                _ => false,
            }
        }
    }

    fn by_object() -> IdOptions {
        IdOptions {
            method: ComputationMethod::ByObject,
        }
    }

    fn by_position() -> IdOptions {
        IdOptions {
            method: ComputationMethod::ByPosition,
        }
    }

    fn parent<'a>(original: &'a Item, reference: &'a Item) -> ModelObjectDelta<'a> {
        ModelObjectDelta::new_delta(original, reference)
    }

    #[test]
    fn to_one_with_both_sides_absent_adds_nothing() {
        let (a, b) = (Item::new(0, 0), Item::new(0, 0));
        let mut delta = parent(&a, &b);
        delta.create_child_delta(None, None, "risk", &by_object());
        assert!(delta.is_empty());
    }

    #[test]
    fn to_one_add_and_remove() {
        let (a, b) = (Item::new(0, 0), Item::new(0, 0));
        let added = Item::new(1, 1);
        let removed = Item::new(2, 2);

        let mut delta = parent(&a, &b);
        delta.create_child_delta(None, Some(&added), "risk", &by_object());
        delta.create_child_delta(Some(&removed), None, "risk", &by_object());

        let kinds: Vec<_> = delta.child_deltas().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, [DeltaKind::Added, DeltaKind::Removed]);
        assert!(delta.is_structure_changed());
    }

    #[test]
    fn to_one_by_object_same_identity_recurses() {
        let (a, b) = (Item::new(0, 0), Item::new(0, 0));
        let old = Item::new(7, 1);
        let new = Item::new(7, 2);

        let mut delta = parent(&a, &b);
        delta.create_child_delta(Some(&old), Some(&new), "risk", &by_object());

        assert_eq!(delta.child_deltas().len(), 1);
        let child = &delta.child_deltas()[0];
        assert_eq!(child.kind(), DeltaKind::Changed);
        assert_eq!(child.association(), Some("risk"));
        assert_eq!(child.changed_properties(), ["value"]);
    }

    #[test]
    fn to_one_by_object_equal_pair_leaves_parent_empty() {
        let (a, b) = (Item::new(0, 0), Item::new(0, 0));
        let old = Item::new(7, 1);
        let new = Item::new(7, 1);

        let mut delta = parent(&a, &b);
        delta.create_child_delta(Some(&old), Some(&new), "risk", &by_object());
        assert!(delta.is_empty());
    }

    #[test]
    fn to_one_by_object_different_identity_yields_remove_then_add() {
        let (a, b) = (Item::new(0, 0), Item::new(0, 0));
        let old = Item::new(1, 1);
        let new = Item::new(2, 1);

        let mut delta = parent(&a, &b);
        delta.create_child_delta(Some(&old), Some(&new), "risk", &by_object());

        let kinds: Vec<_> = delta.child_deltas().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, [DeltaKind::Removed, DeltaKind::Added]);
    }

    #[test]
    fn to_one_by_position_mismatch_yields_single_different_object_delta() {
        let (a, b) = (Item::new(0, 0), Item::new(0, 0));
        let old = Item::new(1, 1);
        let new = Item::new(2, 1);

        let mut delta = parent(&a, &b);
        delta.create_child_delta(Some(&old), Some(&new), "risk", &by_position());

        assert_eq!(delta.child_deltas().len(), 1);
        assert_eq!(
            delta.child_deltas()[0].kind(),
            DeltaKind::DifferentObjectAtPosition
        );
        assert!(delta.is_structure_changed());
    }

    #[test]
    fn to_many_by_object_swap_yields_two_moved_deltas() {
        let (p1, p2) = (Item::new(0, 0), Item::new(0, 0));
        let a = Item::new(1, 10);
        let b = Item::new(2, 20);

        let originals: Vec<&dyn DeltaSupport> = vec![&a, &b];
        let references: Vec<&dyn DeltaSupport> = vec![&b, &a];

        let mut delta = parent(&p1, &p2);
        delta.create_child_deltas(&originals, &references, "coverages", &by_object());

        assert_eq!(delta.child_deltas().len(), 2);
        for (child, expected) in delta.child_deltas().iter().zip([&a, &b]) {
            assert_eq!(child.kind(), DeltaKind::Moved);
            assert!(std::ptr::eq(
                child.original().unwrap() as *const dyn DeltaSupport as *const (),
                expected as *const Item as *const (),
            ));
            assert!(std::ptr::eq(
                child.reference().unwrap() as *const dyn DeltaSupport as *const (),
                expected as *const Item as *const (),
            ));
        }
    }

    #[test]
    fn to_many_by_object_moved_pair_also_reports_property_delta() {
        let (p1, p2) = (Item::new(0, 0), Item::new(0, 0));
        let stay = Item::new(1, 10);
        let old = Item::new(2, 20);
        let new = Item::new(2, 21); // same identity, new value, new position

        let originals: Vec<&dyn DeltaSupport> = vec![&old, &stay];
        let references: Vec<&dyn DeltaSupport> = vec![&stay, &new];

        let mut delta = parent(&p1, &p2);
        delta.create_child_deltas(&originals, &references, "coverages", &by_object());

        let kinds: Vec<_> = delta.child_deltas().iter().map(|c| c.kind()).collect();
        // Pair delta for id 2 (changed), its move, and the move of id 1.
        assert_eq!(
            kinds,
            [DeltaKind::Changed, DeltaKind::Moved, DeltaKind::Moved]
        );
        assert_eq!(delta.child_deltas()[0].changed_properties(), ["value"]);
    }

    #[test]
    fn to_many_by_object_unmatched_objects_become_removed_and_added() {
        let (p1, p2) = (Item::new(0, 0), Item::new(0, 0));
        let kept_old = Item::new(1, 10);
        let gone = Item::new(2, 20);
        let kept_new = Item::new(1, 10);
        let fresh = Item::new(3, 30);

        let originals: Vec<&dyn DeltaSupport> = vec![&kept_old, &gone];
        let references: Vec<&dyn DeltaSupport> = vec![&kept_new, &fresh];

        let mut delta = parent(&p1, &p2);
        delta.create_child_deltas(&originals, &references, "coverages", &by_object());

        let kinds: Vec<_> = delta.child_deltas().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, [DeltaKind::Removed, DeltaKind::Added]);
        assert!(delta.is_structure_changed());
    }

    #[test]
    fn same_instance_options_match_by_pointer_identity() {
        use crate::delta_options::SameInstanceOptions;

        let (p1, p2) = (Item::new(0, 0), Item::new(0, 0));
        let a = Item::new(1, 10);
        let b = Item::new(2, 20);

        let originals: Vec<&dyn DeltaSupport> = vec![&a, &b];
        let references: Vec<&dyn DeltaSupport> = vec![&b, &a];

        let mut delta = parent(&p1, &p2);
        let options = SameInstanceOptions::new(ComputationMethod::ByObject);
        delta.create_child_deltas(&originals, &references, "coverages", &options);

        // Same instances, swapped order: two moved deltas and nothing else.
        let kinds: Vec<_> = delta.child_deltas().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, [DeltaKind::Moved, DeltaKind::Moved]);

        // A value-equal clone is a different instance to these options.
        let twin = Item::new(1, 10);
        assert!(!options.is_same(&a, &twin));
        assert!(options.is_same(&a, &a));
    }

    #[test]
    fn to_many_by_position_walks_positions_and_tails() {
        let (p1, p2) = (Item::new(0, 0), Item::new(0, 0));
        let a_old = Item::new(1, 10);
        let b_old = Item::new(2, 20);
        let a_new = Item::new(1, 11);
        let c_new = Item::new(3, 30);
        let tail = Item::new(4, 40);

        let originals: Vec<&dyn DeltaSupport> = vec![&a_old, &b_old];
        let references: Vec<&dyn DeltaSupport> = vec![&a_new, &c_new, &tail];

        let mut delta = parent(&p1, &p2);
        delta.create_child_deltas(&originals, &references, "coverages", &by_position());

        let kinds: Vec<_> = delta.child_deltas().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            [
                DeltaKind::Changed,
                DeltaKind::DifferentObjectAtPosition,
                DeltaKind::Added,
            ]
        );
    }
}
