/// Static description of one model: everything the registry needs to sync,
/// load, and associate it. The full set lives in [`crate::registry::catalog`];
/// there is no runtime discovery.
#[derive(Debug, Clone, Copy)]
pub struct ModelDescriptor {
    /// Registry key, e.g. `"User"`. Associations reference this name.
    pub name: &'static str,

    /// Backing table name.
    pub table: &'static str,

    /// Idempotent DDL for the table (and its indexes), executed by schema
    /// sync at startup.
    pub ddl: &'static str,

    /// Declared relations to other models, resolved by name after every
    /// model has loaded.
    pub associations: &'static [AssociationSpec],
}

#[derive(Debug, Clone, Copy)]
pub struct AssociationSpec {
    pub kind: AssociationKind,

    /// Name of the target model. Must exist in the registry; a dangling
    /// target aborts startup.
    pub target: &'static str,

    /// Column on the many side carrying the relation.
    pub foreign_key: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    HasMany,
    BelongsTo,
}
