use serde::{Deserialize, Serialize};

/// Logical column types the models use, mapped from SQLite column
/// declarations during introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlType {
    Integer,
    Text,
    Real,
    Blob,
    /// Declaration we do not recognize; kept rather than rejected since
    /// SQLite accepts arbitrary type names.
    Other,
}

impl SqlType {
    /// SQLite type affinity rules, simplified to declared-name prefixes.
    pub fn from_decl(decl: &str) -> Self {
        let upper = decl.to_ascii_uppercase();
        if upper.contains("INT") {
            SqlType::Integer
        } else if upper.contains("CHAR") || upper.contains("TEXT") || upper.contains("CLOB") {
            SqlType::Text
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            SqlType::Real
        } else if upper.contains("BLOB") {
            SqlType::Blob
        } else {
            SqlType::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decl_mapping_follows_affinity_prefixes() {
        assert_eq!(SqlType::from_decl("INTEGER"), SqlType::Integer);
        assert_eq!(SqlType::from_decl("BIGINT"), SqlType::Integer);
        assert_eq!(SqlType::from_decl("TEXT"), SqlType::Text);
        assert_eq!(SqlType::from_decl("VARCHAR(255)"), SqlType::Text);
        assert_eq!(SqlType::from_decl("DOUBLE"), SqlType::Real);
        assert_eq!(SqlType::from_decl("BLOB"), SqlType::Blob);
        assert_eq!(SqlType::from_decl("DATETIME"), SqlType::Other);
    }
}
