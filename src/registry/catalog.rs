//! The compile-time model catalog.
//!
//! Each entry fully describes one model; the registry builder and schema sync
//! both iterate this list. Adding a model means adding a descriptor here,
//! nothing else.

use super::descriptor::{AssociationKind, AssociationSpec, ModelDescriptor};

pub const USER: ModelDescriptor = ModelDescriptor {
    name: "User",
    table: "users",
    ddl: r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL, -- RFC3339
    UNIQUE(email)
);

CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
"#,
    associations: &[],
};

pub const COMPANY: ModelDescriptor = ModelDescriptor {
    name: "Company",
    table: "companies",
    ddl: r#"
CREATE TABLE IF NOT EXISTS companies (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);
"#,
    associations: &[AssociationSpec {
        kind: AssociationKind::HasMany,
        target: "Contact",
        foreign_key: "company_id",
    }],
};

pub const CONTACT: ModelDescriptor = ModelDescriptor {
    name: "Contact",
    table: "contacts",
    ddl: r#"
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    email TEXT NULL,
    company_id INTEGER NULL REFERENCES companies(id),
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_contacts_company_id ON contacts(company_id);
"#,
    associations: &[AssociationSpec {
        kind: AssociationKind::BelongsTo,
        target: "Company",
        foreign_key: "company_id",
    }],
};

/// Catalog order is arbitrary; the registry must produce the same wiring for
/// any permutation.
pub const CATALOG: &[ModelDescriptor] = &[USER, COMPANY, CONTACT];
