//! The model registry: one name-keyed map of model definitions, built once at
//! startup and immutable afterwards.
//!
//! Build order is the load-bearing part. Every model load (which awaits table
//! introspection) completes behind an explicit gather barrier before any
//! association is wired, so the association pass always sees the full
//! registry. Wiring against a partially populated map was the failure mode of
//! discovery-ordered loading; it cannot happen here.

pub mod catalog;
pub mod descriptor;
pub mod types;

pub use descriptor::{AssociationKind, AssociationSpec, ModelDescriptor};
pub use types::SqlType;

use crate::db::Store;
use crate::error::AtriumError;
use futures::future::try_join_all;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{debug, info};

/// One introspected column of a model's backing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: SqlType,
    pub not_null: bool,
    pub primary_key: bool,
}

/// A wired relation; `target` is guaranteed to name a registered model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub kind: AssociationKind,
    pub target: String,
    pub foreign_key: String,
}

/// A loaded model: descriptor metadata plus the live table's column layout
/// and the resolved associations.
#[derive(Debug, Clone)]
pub struct ModelDefinition {
    pub name: &'static str,
    pub table: &'static str,
    pub columns: Vec<ColumnDef>,
    pub associations: Vec<Association>,
}

/// Name-keyed registry of every model, plus the shared connection handle.
#[derive(Debug)]
pub struct ModelRegistry {
    models: HashMap<&'static str, ModelDefinition>,
    store: Store,
}

impl ModelRegistry {
    /// Builds the registry from a catalog of descriptors.
    ///
    /// 1. Reject duplicate names.
    /// 2. Launch every model load and join them all; the first failure aborts
    ///    the build.
    /// 3. Only then, run one association pass over the complete map. A target
    ///    that names no registered model is fatal.
    pub async fn build(
        store: &Store,
        catalog: &[ModelDescriptor],
    ) -> Result<Self, AtriumError> {
        let mut models: HashMap<&'static str, ModelDefinition> =
            HashMap::with_capacity(catalog.len());

        // Barrier: all loads finish before any association is considered.
        let loaded = try_join_all(catalog.iter().map(|desc| load_model(store.pool(), desc)))
            .await?;

        for definition in loaded {
            let name = definition.name;
            if models.insert(name, definition).is_some() {
                return Err(AtriumError::DuplicateModel(name));
            }
        }

        for desc in catalog {
            for spec in desc.associations {
                if !models.contains_key(spec.target) {
                    return Err(AtriumError::UnknownAssociationTarget {
                        model: desc.name,
                        target: spec.target,
                    });
                }
                if let Some(definition) = models.get_mut(desc.name) {
                    definition.associations.push(Association {
                        kind: spec.kind,
                        target: spec.target.to_string(),
                        foreign_key: spec.foreign_key.to_string(),
                    });
                    debug!(
                        model = desc.name,
                        target = spec.target,
                        "association wired"
                    );
                }
            }
        }

        info!(models = models.len(), "model registry built");
        Ok(Self {
            models,
            store: store.clone(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&ModelDefinition> {
        self.models.get(name)
    }

    /// The well-known connection entry: the shared store handle every
    /// resolver goes through.
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Registered model names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.models.keys().copied()
    }
}

/// Loads one model by introspecting its backing table. A model whose table is
/// absent (schema never synced, or a malformed descriptor) fails the whole
/// build.
async fn load_model(
    pool: &SqlitePool,
    desc: &ModelDescriptor,
) -> Result<ModelDefinition, AtriumError> {
    let rows: Vec<(i64, String, String, i64, Option<String>, i64)> =
        sqlx::query_as(&format!("PRAGMA table_info({})", desc.table))
            .fetch_all(pool)
            .await?;

    if rows.is_empty() {
        return Err(AtriumError::MissingTable {
            model: desc.name,
            table: desc.table,
        });
    }

    let columns = rows
        .into_iter()
        .map(|(_cid, name, decl, not_null, _default, pk)| ColumnDef {
            name,
            sql_type: SqlType::from_decl(&decl),
            not_null: not_null != 0,
            primary_key: pk != 0,
        })
        .collect();

    Ok(ModelDefinition {
        name: desc.name,
        table: desc.table,
        columns,
        associations: Vec::new(),
    })
}
