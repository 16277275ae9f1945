//! Grouping of per-module records into promo sections.

use indexmap::IndexMap;

use crate::promo::PromoLevel;

/// Records that belong to a promo.
pub trait PromoGrouped {
    fn promo_level(&self) -> PromoLevel;

    fn promo_specialty(&self) -> &str;

    fn promo_key(&self) -> String {
        promo_key(self.promo_level(), self.promo_specialty())
    }
}

/// Display key of a promo: level and specialty separated by one space.
pub fn promo_key(level: PromoLevel, specialty: &str) -> String {
    format!("{level} {specialty}")
}

/// Group records by promo key.
///
/// Groups appear in order of first occurrence and keep the input order
/// inside each group. Callers sort by level, specialty and module name
/// beforehand for a stable display.
pub fn group_by_promo<T: PromoGrouped>(
    items: impl IntoIterator<Item = T>,
) -> IndexMap<String, Vec<T>> {
    let mut groups: IndexMap<String, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(item.promo_key()).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        level: PromoLevel,
        specialty: &'static str,
        module: &'static str,
    }

    impl PromoGrouped for Row {
        fn promo_level(&self) -> PromoLevel {
            self.level
        }

        fn promo_specialty(&self) -> &str {
            self.specialty
        }
    }

    fn row(level: PromoLevel, specialty: &'static str, module: &'static str) -> Row {
        Row {
            level,
            specialty,
            module,
        }
    }

    #[test]
    fn key_joins_level_and_specialty() {
        assert_eq!(promo_key(PromoLevel::B1, "Informatique"), "B1 Informatique");
    }

    #[test]
    fn groups_preserve_all_records() {
        let rows = vec![
            row(PromoLevel::B1, "Informatique", "Algo"),
            row(PromoLevel::B1, "Informatique", "Réseaux"),
            row(PromoLevel::M2, "Marketing", "Branding"),
            row(PromoLevel::B1, "Design", "Typo"),
            row(PromoLevel::M2, "Marketing", "Analytics"),
        ];

        let groups = group_by_promo(rows.clone());
        assert_eq!(groups.len(), 3);

        let mut flattened: Vec<Row> = groups.values().flatten().cloned().collect();
        let mut expected = rows;
        let sort_key = |r: &Row| (r.level, r.specialty, r.module);
        flattened.sort_by_key(sort_key);
        expected.sort_by_key(sort_key);
        assert_eq!(flattened, expected);
    }

    #[test]
    fn order_follows_input() {
        let groups = group_by_promo(vec![
            row(PromoLevel::M2, "Marketing", "Branding"),
            row(PromoLevel::B1, "Informatique", "Algo"),
            row(PromoLevel::M2, "Marketing", "Analytics"),
        ]);
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, ["M2 Marketing", "B1 Informatique"]);

        let modules: Vec<&str> = groups["M2 Marketing"].iter().map(|r| r.module).collect();
        assert_eq!(modules, ["Branding", "Analytics"]);
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_by_promo(Vec::<Row>::new()).is_empty());
    }
}
