//! Per-relationship deletion policy
//!
//! Each row names a child kind, the reference field on the child that points
//! at the parent, and what happens to the child when the parent is deleted.

use crate::core::identity::EntityKind;

/// Reference fields that can point at another record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefField {
    Material,
    Widget,
}

impl RefField {
    /// JSON field name on the child record
    pub fn as_str(&self) -> &'static str {
        match self {
            RefField::Material => "material",
            RefField::Widget => "widget",
        }
    }

    /// Indexed column in the SQLite `records` table
    pub(crate) fn column(&self) -> &'static str {
        match self {
            RefField::Material => "material_ref",
            RefField::Widget => "widget_ref",
        }
    }
}

/// What happens to a dependent record when its parent is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    /// Delete the dependent too
    Cascade,
    /// Keep the dependent with the reference cleared
    Nullify,
}

/// One parent -> child relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    pub parent: EntityKind,
    pub child: EntityKind,
    pub field: RefField,
    pub on_delete: OnDelete,
}

const fn dep(parent: EntityKind, child: EntityKind, field: RefField, on_delete: OnDelete) -> Dependency {
    Dependency {
        parent,
        child,
        field,
        on_delete,
    }
}

/// The deletion policy. For each parent, cascades precede nullifications.
pub const DELETION_POLICY: &[Dependency] = &[
    dep(EntityKind::Material, EntityKind::Requirement, RefField::Material, OnDelete::Cascade),
    dep(EntityKind::Material, EntityKind::InstallationRequirement, RefField::Material, OnDelete::Cascade),
    dep(EntityKind::Material, EntityKind::MaintenanceRecord, RefField::Material, OnDelete::Cascade),
    dep(EntityKind::Material, EntityKind::InventoryRecord, RefField::Material, OnDelete::Cascade),
    dep(EntityKind::Material, EntityKind::Widget, RefField::Material, OnDelete::Cascade),
    dep(EntityKind::Material, EntityKind::Shipment, RefField::Material, OnDelete::Nullify),
    dep(EntityKind::Material, EntityKind::Inspection, RefField::Material, OnDelete::Nullify),
    dep(EntityKind::Material, EntityKind::CustomerOrder, RefField::Material, OnDelete::Nullify),
    dep(EntityKind::Widget, EntityKind::Shipment, RefField::Widget, OnDelete::Nullify),
    dep(EntityKind::Widget, EntityKind::Inspection, RefField::Widget, OnDelete::Nullify),
    dep(EntityKind::Widget, EntityKind::CustomerOrder, RefField::Widget, OnDelete::Nullify),
];

/// Relationships in which `parent` is the referenced record
pub fn dependents_of(parent: EntityKind) -> impl Iterator<Item = &'static Dependency> {
    DELETION_POLICY.iter().filter(move |d| d.parent == parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_dependents() {
        let cascades: Vec<_> = dependents_of(EntityKind::Material)
            .filter(|d| d.on_delete == OnDelete::Cascade)
            .map(|d| d.child)
            .collect();
        assert_eq!(
            cascades,
            vec![
                EntityKind::Requirement,
                EntityKind::InstallationRequirement,
                EntityKind::MaintenanceRecord,
                EntityKind::InventoryRecord,
                EntityKind::Widget,
            ]
        );

        let nullified: Vec<_> = dependents_of(EntityKind::Material)
            .filter(|d| d.on_delete == OnDelete::Nullify)
            .map(|d| d.child)
            .collect();
        assert_eq!(
            nullified,
            vec![
                EntityKind::Shipment,
                EntityKind::Inspection,
                EntityKind::CustomerOrder
            ]
        );
    }

    #[test]
    fn test_cascades_precede_nullifications() {
        for parent in EntityKind::all() {
            let actions: Vec<_> = dependents_of(*parent).map(|d| d.on_delete).collect();
            let first_nullify = actions.iter().position(|a| *a == OnDelete::Nullify);
            if let Some(pos) = first_nullify {
                assert!(actions[pos..].iter().all(|a| *a == OnDelete::Nullify));
            }
        }
    }

    #[test]
    fn test_leaf_kinds_have_no_dependents() {
        assert_eq!(dependents_of(EntityKind::Shipment).count(), 0);
        assert_eq!(dependents_of(EntityKind::Requirement).count(), 0);
    }
}
