use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductFamily {
    ConstrucaoCivil,
    EstruturalSerralheria,
    Planos,
    Tubos,
}

impl ProductFamily {
    pub const ALL: [ProductFamily; 4] = [
        ProductFamily::ConstrucaoCivil,
        ProductFamily::EstruturalSerralheria,
        ProductFamily::Planos,
        ProductFamily::Tubos,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProductFamily::ConstrucaoCivil => "vergalhões e arames para construção civil",
            ProductFamily::EstruturalSerralheria => "perfis estruturais e serralheria",
            ProductFamily::Planos => "chapas e telhas",
            ProductFamily::Tubos => "tubos",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub fragment: String,
    pub family: ProductFamily,
}

const BUILTIN_FRAGMENTS: [(&str, ProductFamily); 14] = [
    ("vergalhão", ProductFamily::ConstrucaoCivil),
    ("vergalhao", ProductFamily::ConstrucaoCivil),
    ("arame recozido", ProductFamily::ConstrucaoCivil),
    ("ferro", ProductFamily::ConstrucaoCivil),
    ("tubo industrial", ProductFamily::Tubos),
    ("tubo quadrado", ProductFamily::Tubos),
    ("tubo retangular", ProductFamily::Tubos),
    ("tubo redondo", ProductFamily::Tubos),
    ("metalon", ProductFamily::Tubos),
    ("telha trapezoidal galvanizada", ProductFamily::Planos),
    ("chapa galvanizada", ProductFamily::Planos),
    ("barra chata", ProductFamily::EstruturalSerralheria),
    ("cantoneira", ProductFamily::EstruturalSerralheria),
    ("perfil u", ProductFamily::EstruturalSerralheria),
];

/// Products the distributor sells, as lowercase name fragments.
///
/// Matching is a lenient heuristic: a query matches when it contains a
/// fragment or is contained in one, so `"vergalhão 10mm"` and `"tubo"` both
/// match. Short fragments can produce false positives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductCatalog {
    entries: Vec<CatalogEntry>,
}

impl ProductCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| CatalogEntry { fragment: entry.fragment.trim().to_lowercase(), ..entry })
            .filter(|entry| !entry.fragment.is_empty())
            .collect();
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_FRAGMENTS
                .iter()
                .map(|(fragment, family)| CatalogEntry {
                    fragment: (*fragment).to_owned(),
                    family: *family,
                })
                .collect(),
        )
    }

    /// First entry matching `query` in either substring direction.
    ///
    /// Only an empty string is rejected; a whitespace-only query trims to
    /// `""`, which every fragment contains.
    pub fn find(&self, query: &str) -> Option<&CatalogEntry> {
        if query.is_empty() {
            return None;
        }
        let query = query.trim().to_lowercase();
        self.entries.iter().find(|entry| {
            query.contains(entry.fragment.as_str()) || entry.fragment.contains(query.as_str())
        })
    }

    pub fn is_available(&self, query: Option<&str>) -> bool {
        query.and_then(|query| self.find(query)).is_some()
    }

    /// Families present in the catalog, in declaration order.
    pub fn families(&self) -> Vec<ProductFamily> {
        ProductFamily::ALL
            .into_iter()
            .filter(|family| self.entries.iter().any(|entry| entry.family == *family))
            .collect()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogEntry, ProductCatalog, ProductFamily};

    #[test]
    fn matches_catalog_fragment_inside_query() {
        let catalog = ProductCatalog::builtin();
        assert!(catalog.is_available(Some("Vergalhão")));
        assert!(catalog.is_available(Some("  VERGALHÃO CA-50 10mm ")));
        assert!(catalog.is_available(Some("vergalhao")));
        assert!(catalog.is_available(Some("metalon 30x30")));
        assert_eq!(
            catalog.find("cantoneira 2 polegadas").map(|entry| entry.family),
            Some(ProductFamily::EstruturalSerralheria)
        );
    }

    #[test]
    fn matches_query_inside_catalog_fragment() {
        let catalog = ProductCatalog::builtin();
        assert!(catalog.is_available(Some("tubo")));
        assert!(catalog.is_available(Some("chapa")));
        assert_eq!(catalog.find("telha").map(|entry| entry.family), Some(ProductFamily::Planos));
    }

    #[test]
    fn lenient_matching_accepts_short_queries() {
        let catalog = ProductCatalog::builtin();
        // "u" is contained in "tubo industrial"
        assert!(catalog.is_available(Some("u")));
    }

    #[test]
    fn unknown_or_empty_products_are_unavailable() {
        let catalog = ProductCatalog::builtin();
        assert!(!catalog.is_available(Some("produto_inexistente_xyz")));
        assert!(!catalog.is_available(Some("madeira de lei")));
        assert!(!catalog.is_available(Some("")));
        assert!(!catalog.is_available(None));
    }

    #[test]
    fn whitespace_only_query_matches_like_an_empty_fragment() {
        let catalog = ProductCatalog::builtin();
        assert!(catalog.is_available(Some("   ")));
        assert_eq!(
            catalog.find(" ").map(|entry| entry.family),
            Some(ProductFamily::ConstrucaoCivil)
        );
    }

    #[test]
    fn families_follow_catalog_contents() {
        assert_eq!(ProductCatalog::builtin().families(), ProductFamily::ALL.to_vec());

        let tubes_only = ProductCatalog::new(vec![CatalogEntry {
            fragment: " Tubo Redondo ".to_owned(),
            family: ProductFamily::Tubos,
        }]);
        assert_eq!(tubes_only.families(), vec![ProductFamily::Tubos]);
        assert!(tubes_only.is_available(Some("tubo redondo 2\"")));
    }
}
