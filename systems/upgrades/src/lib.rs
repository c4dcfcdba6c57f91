#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Upgrade currency, ownership and purchase validation.

use std::collections::BTreeSet;

use hype_type_core::{PurchaseError, UpgradeCatalog, UpgradeEffect, UpgradeNode, UpgradeNodeId};

/// Points granted for every enemy defeated.
pub const KILL_REWARD_POINTS: u32 = 1;

/// Player progression against an upgrade catalog.
#[derive(Clone, Debug, Default)]
pub struct Progression {
    catalog: UpgradeCatalog,
    points: u32,
    owned: BTreeSet<UpgradeNodeId>,
}

impl Progression {
    /// Creates a progression over the provided catalog.
    #[must_use]
    pub fn new(catalog: UpgradeCatalog) -> Self {
        Self {
            catalog,
            points: 0,
            owned: BTreeSet::new(),
        }
    }

    /// Swaps the catalog while keeping balance and owned nodes.
    pub fn load_catalog(&mut self, catalog: UpgradeCatalog) {
        self.catalog = catalog;
    }

    /// Clears balance and ownership for a new run.
    pub fn reset(&mut self) {
        self.points = 0;
        self.owned.clear();
    }

    /// Active catalog.
    #[must_use]
    pub fn catalog(&self) -> &UpgradeCatalog {
        &self.catalog
    }

    /// Current balance.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Reports whether the node was purchased.
    #[must_use]
    pub fn owns(&self, node: &UpgradeNodeId) -> bool {
        self.owned.contains(node)
    }

    /// Adds points, returning the new balance.
    pub fn award(&mut self, points: u32) -> u32 {
        self.points = self.points.saturating_add(points);
        self.points
    }

    /// Validates a purchase without performing it.
    pub fn check(&self, id: &UpgradeNodeId) -> Result<&UpgradeNode, PurchaseError> {
        let node = self
            .catalog
            .node(id)
            .ok_or_else(|| PurchaseError::UnknownNode(id.clone()))?;
        if self.owns(id) {
            return Err(PurchaseError::AlreadyOwned(id.clone()));
        }
        if node.cost > self.points {
            return Err(PurchaseError::InsufficientPoints {
                cost: node.cost,
                balance: self.points,
            });
        }
        if !node.requires.is_met(|dependency| self.owns(dependency)) {
            return Err(PurchaseError::Locked(id.clone()));
        }
        Ok(node)
    }

    /// Reports whether the node can be bought right now.
    #[must_use]
    pub fn can_purchase(&self, id: &UpgradeNodeId) -> bool {
        self.check(id).is_ok()
    }

    /// Buys the node, returning the effects the caller must apply.
    pub fn purchase(&mut self, id: &UpgradeNodeId) -> Result<Vec<UpgradeEffect>, PurchaseError> {
        let node = self.check(id)?;
        let cost = node.cost;
        let effects = node.effects.clone();
        self.points -= cost;
        let _ = self.owned.insert(id.clone());
        tracing::debug!(node = %id, cost, balance = self.points, "upgrade purchased");
        Ok(effects)
    }
}
