//! Item catalog: drop, crafting and equipment tables

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{CatalogError, CatalogResult, EquipSlot, Item, ItemKey};

/// Which data table an item list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogTable {
    Drops,
    Crafting,
    Equipment,
}

impl CatalogTable {
    pub const ALL: [CatalogTable; 3] = [Self::Drops, Self::Crafting, Self::Equipment];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Drops => "Drops",
            Self::Crafting => "Crafting",
            Self::Equipment => "Equipment",
        }
    }
}

/// Read-only item reference data
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<CatalogTable, Vec<Item>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from its JSON array and replace any previous contents.
    ///
    /// The equipment table only accepts equipment items.
    pub fn load_table(&mut self, table: CatalogTable, json: &str) -> CatalogResult<usize> {
        let items: Vec<Item> = serde_json::from_str(json)?;

        if table == CatalogTable::Equipment {
            if let Some(bad) = items.iter().find(|i| !i.is_equipment()) {
                return Err(CatalogError::MissingEquipment(bad.name.clone()));
            }
        }

        let count = items.len();
        log::info!("Loaded {} items into {} table", count, table.display_name());
        self.tables.insert(table, items);
        Ok(count)
    }

    pub fn table(&self, table: CatalogTable) -> &[Item] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or_default()
    }

    /// Find an item by identity across all tables
    pub fn get(&self, key: &ItemKey) -> Option<&Item> {
        CatalogTable::ALL
            .iter()
            .flat_map(|t| self.table(*t))
            .find(|i| i.name == key.name && i.sheet == key.sheet)
    }

    /// Case-insensitive name search within one table
    pub fn search(&self, table: CatalogTable, query: &str) -> Vec<&Item> {
        let needle = query.to_lowercase();
        self.table(table)
            .iter()
            .filter(|i| i.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Equipment table entries for one slot
    pub fn equipment_for_slot(&self, slot: EquipSlot) -> Vec<&Item> {
        self.table(CatalogTable::Equipment)
            .iter()
            .filter(|i| i.slot() == Some(slot))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EQUIPMENT: &str = r#"[
        {"Name": "Iron Helm", "Type": 3, "Sheet": "eq", "X": 0, "Y": 0, "Equip": {"Part": 9}},
        {"Name": "Leather Boots", "Type": 3, "Sheet": "eq", "X": 1, "Y": 0, "Equip": {"Part": 8}},
        {"Name": "Steel Helm", "Type": 3, "Sheet": "eq", "X": 2, "Y": 0, "Equip": {"Part": 9}}
    ]"#;

    #[test]
    fn test_load_and_filter_by_slot() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.load_table(CatalogTable::Equipment, EQUIPMENT).unwrap(), 3);

        assert_eq!(catalog.equipment_for_slot(EquipSlot::Head).len(), 2);
        assert_eq!(catalog.equipment_for_slot(EquipSlot::Shoes).len(), 1);
        assert!(catalog.equipment_for_slot(EquipSlot::Mask).is_empty());
    }

    #[test]
    fn test_equipment_table_rejects_plain_items() {
        let json = r#"[{"Name": "Potion", "Type": 1, "Sheet": "it", "X": 0, "Y": 0}]"#;
        let mut catalog = Catalog::new();
        assert!(catalog.load_table(CatalogTable::Equipment, json).is_err());
        assert!(catalog.load_table(CatalogTable::Drops, json).is_ok());
    }

    #[test]
    fn test_lookup_and_search() {
        let mut catalog = Catalog::new();
        catalog.load_table(CatalogTable::Equipment, EQUIPMENT).unwrap();

        assert!(catalog.get(&ItemKey::new("Iron Helm", "eq")).is_some());
        assert!(catalog.get(&ItemKey::new("Iron Helm", "other")).is_none());
        assert_eq!(catalog.search(CatalogTable::Equipment, "helm").len(), 2);
        assert!(catalog.table(CatalogTable::Crafting).is_empty());
    }
}
