//! Cache key construction.
//!
//! Endpoints addressed by scalar identifiers use `prefix` + the literal
//! identifiers. Endpoints taking a whole parameter map use `prefix` + a
//! SHA-256 digest of the canonicalized map, so identical maps always
//! produce identical keys regardless of insertion order, and differing
//! maps never collide in practice.

use crate::request::Params;
use sha2::{Digest, Sha256};

/// `prefix` + literal identifier(s), joined with `_`.
///
/// `scalar("company_", &["00000006"])` → `company_00000006`;
/// `scalar("charge_detail_", &["00000006", "abc"])` → `charge_detail_00000006_abc`.
pub fn scalar(prefix: &str, ids: &[&str]) -> String {
    format!("{}{}", prefix, ids.join("_"))
}

/// `prefix` + hex SHA-256 of the canonical JSON encoding of the map.
///
/// `Params` is a BTreeMap, so the canonical encoding is key-sorted and
/// independent of the order the caller inserted entries.
pub fn hashed(prefix: &str, params: &Params) -> String {
    let canonical = serde_json::to_string(params).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    let mut key = String::with_capacity(prefix.len() + digest.len() * 2);
    key.push_str(prefix);
    for byte in digest {
        key.push_str(&format!("{:02x}", byte));
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ParamValue;

    #[test]
    fn scalar_keys_concatenate_literally() {
        assert_eq!(scalar("company_", &["00000006"]), "company_00000006");
        assert_eq!(
            scalar("officer_appointment_", &["00000006", "aBc123"]),
            "officer_appointment_00000006_aBc123"
        );
    }

    #[test]
    fn hashed_keys_ignore_insertion_order() {
        let mut forward = Params::new();
        forward.insert("q".into(), "tesco".into());
        forward.insert("items_per_page".into(), "20".into());

        let mut reverse = Params::new();
        reverse.insert("items_per_page".into(), "20".into());
        reverse.insert("q".into(), "tesco".into());

        assert_eq!(hashed("search_", &forward), hashed("search_", &reverse));
    }

    #[test]
    fn hashed_keys_distinguish_different_maps() {
        let mut tesco = Params::new();
        tesco.insert("q".into(), "tesco".into());
        let mut sainsbury = Params::new();
        sainsbury.insert("q".into(), "sainsbury".into());

        let a = hashed("search_", &tesco);
        let b = hashed("search_", &sainsbury);
        assert_ne!(a, b);
        assert!(a.starts_with("search_"));
        // 64 hex chars after the prefix.
        assert_eq!(a.len(), "search_".len() + 64);
    }

    #[test]
    fn list_values_participate_in_the_hash() {
        let mut one = Params::new();
        one.insert(
            "sic_codes".into(),
            ParamValue::List(vec!["62020".into()]),
        );
        let mut two = Params::new();
        two.insert(
            "sic_codes".into(),
            ParamValue::List(vec!["62020".into(), "62090".into()]),
        );
        assert_ne!(hashed("advanced_", &one), hashed("advanced_", &two));
    }
}
