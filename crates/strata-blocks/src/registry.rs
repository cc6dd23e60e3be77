use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::NATIVE_NAMESPACE;
use crate::catalogue::{BlockDefinition, Catalogue, display_name_for};
use crate::category::Category;
use crate::identity::EMPTY_ID;

/// A foreign material system that wants every known block registered under its own name.
pub trait ExternalNamespace {
    fn register(&self, namespaced_id: &str, def: &BlockDefinition);
}

#[derive(Default)]
struct IndexTable {
    by_id: HashMap<Arc<str>, u32>,
    by_index: Vec<Arc<str>>,
}

impl IndexTable {
    fn assign(&mut self, id: &str) -> u32 {
        if let Some(&i) = self.by_id.get(id) {
            return i;
        }
        let i = self.by_index.len() as u32;
        let key: Arc<str> = Arc::from(id);
        self.by_index.push(key.clone());
        self.by_id.insert(key, i);
        i
    }
}

/// Shared block registry: the static catalogue plus the id ↔ palette index table.
///
/// Catalogue ids are indexed in catalogue order at construction, with `Empty` at 0.
/// Ids outside the catalogue are assigned the next free index on first use, so their
/// numbers depend on the order in which callers first ask about them.
pub struct BlockRegistry {
    catalogue: Catalogue,
    table: Mutex<IndexTable>,
    all_ids: OnceLock<BTreeSet<String>>,
    // Set only after a registration pass completes; parking_lot locks do not poison.
    external_done: Mutex<bool>,
}

impl BlockRegistry {
    pub fn new(catalogue: Catalogue) -> Self {
        let mut table = IndexTable::default();
        table.assign(EMPTY_ID);
        for def in catalogue.iter() {
            table.assign(&def.id);
        }
        log::info!(target: "registry", "indexed {} catalogue blocks", table.by_index.len());
        Self {
            catalogue,
            table: Mutex::new(table),
            all_ids: OnceLock::new(),
            external_done: Mutex::new(false),
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Stable index for `id`, assigning the next free one on first use.
    pub fn index_of(&self, id: &str) -> u32 {
        let mut table = self.table.lock();
        if let Some(&i) = table.by_id.get(id) {
            return i;
        }
        let i = table.assign(id);
        log::debug!(target: "registry", "assigned index {i} to uncatalogued block {id}");
        i
    }

    /// Id previously assigned to `index`, or `Empty` if the index was never handed out.
    pub fn id_of(&self, index: u32) -> Arc<str> {
        let table = self.table.lock();
        match table.by_index.get(index as usize) {
            Some(id) => id.clone(),
            None => table.by_index[0].clone(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.catalogue.contains(id)
    }

    pub fn category_of(&self, id: &str) -> Option<Category> {
        self.catalogue.get(id).map(|d| d.category)
    }

    pub fn definition(&self, id: &str) -> Option<&BlockDefinition> {
        self.catalogue.get(id)
    }

    /// Every catalogued id, sorted. Computed once.
    pub fn all_ids(&self) -> &BTreeSet<String> {
        self.all_ids
            .get_or_init(|| self.catalogue.iter().map(|d| d.id.clone()).collect())
    }

    pub fn ids_in_category(&self, category: Category) -> Vec<&str> {
        self.catalogue.ids_in_category(category).collect()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.catalogue.categories()
    }

    /// Number of catalogued blocks.
    pub fn len(&self) -> usize {
        self.catalogue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogue.is_empty()
    }

    /// Number of ids that currently hold an index (catalogue plus first-use).
    pub fn indexed_len(&self) -> usize {
        self.table.lock().by_index.len()
    }

    pub fn display_name(&self, id: &str) -> String {
        match self.catalogue.get(id) {
            Some(def) => def.display_name.clone(),
            None => display_name_for(id),
        }
    }

    /// Registers every catalogued block with `ns` under the native namespace prefix.
    ///
    /// Completes at most once per registry; concurrent callers wait for the first.
    /// Returns whether this call did the work. If `ns` panics mid-pass the registry is
    /// left unregistered and a later call starts over.
    pub fn ensure_external_registration(&self, ns: &dyn ExternalNamespace) -> bool {
        let mut done = self.external_done.lock();
        if *done {
            return false;
        }
        let mut count = 0usize;
        for def in self.catalogue.iter() {
            ns.register(&format!("{NATIVE_NAMESPACE}{}", def.id), def);
            count += 1;
        }
        log::debug!(target: "registry", "registered {count} blocks with external namespace");
        *done = true;
        true
    }
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("catalogued", &self.catalogue.len())
            .field("indexed", &self.indexed_len())
            .finish()
    }
}
