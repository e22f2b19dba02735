//! Static catalog: regions and the items sold in each.

use std::collections::HashMap;

use super::price::Price;

/// A grouping of catalog items, picked as the first navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Identifier carried in navigation tokens, e.g. `USA`
    pub id: String,
    /// Button label, e.g. `🇺🇸 USA`
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub label: String,
    pub price: Price,
}

impl CatalogItem {
    pub fn new(label: impl Into<String>, price: Price) -> Self {
        Self {
            label: label.into(),
            price,
        }
    }
}

/// Immutable region → items mapping, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    regions: Vec<Region>,
    items: HashMap<String, Vec<CatalogItem>>,
}

impl Catalog {
    pub fn new(entries: Vec<(Region, Vec<CatalogItem>)>) -> Self {
        let mut regions = Vec::with_capacity(entries.len());
        let mut items = HashMap::with_capacity(entries.len());
        for (region, region_items) in entries {
            items.insert(region.id.clone(), region_items);
            regions.push(region);
        }
        Self { regions, items }
    }

    /// Regions in display order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Items for a region in display order; empty for an unknown region.
    pub fn items_for(&self, region: &str) -> &[CatalogItem] {
        self.items.get(region).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn items(&self) -> impl Iterator<Item = (&Region, &CatalogItem)> {
        self.regions
            .iter()
            .flat_map(move |region| self.items_for(&region.id).iter().map(move |item| (region, item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn region(id: &str) -> Region {
        Region {
            id: id.to_string(),
            label: id.to_string(),
        }
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            (
                region("USA"),
                vec![
                    CatalogItem::new("Amazon ($100)", "$35".parse().unwrap()),
                    CatalogItem::new("Apple ($100)", "$30".parse().unwrap()),
                ],
            ),
            (region("UK"), vec![]),
        ])
    }

    #[test]
    fn test_items_for_known_region_keeps_order() {
        let catalog = sample();
        let labels: Vec<&str> = catalog.items_for("USA").iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Amazon ($100)", "Apple ($100)"]);
    }

    #[test]
    fn test_items_for_unknown_region_is_empty() {
        let catalog = sample();
        for unknown in ["Germany", "", "usa", "enter_shop"] {
            assert!(catalog.items_for(unknown).is_empty(), "{unknown} should have no items");
        }
    }

    #[test]
    fn test_region_without_items_is_listed() {
        let catalog = sample();
        let ids: Vec<&str> = catalog.regions().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["USA", "UK"]);
        assert!(catalog.items_for("UK").is_empty());
    }

    #[test]
    fn test_items_iterates_all_regions() {
        assert_eq!(sample().items().count(), 2);
    }
}
