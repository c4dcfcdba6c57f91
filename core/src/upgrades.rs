//! Upgrade catalog descriptors consumed by the progression system.

use std::fmt;

use serde::{de::IgnoredAny, Deserialize, Serialize};

use crate::StatusOnHit;

/// Arithmetic applied by an upgrade effect to its target value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectOp {
    /// Adds the effect value.
    Add,
    /// Multiplies by the effect value.
    Mul,
}

impl EffectOp {
    /// Applies the operation to `current`.
    #[must_use]
    pub fn apply(self, current: f32, value: f32) -> f32 {
        match self {
            Self::Add => current + value,
            Self::Mul => current * value,
        }
    }
}

/// Which half of a base/multiplier tuning pair an effect edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TuningTable {
    /// Absolute base values.
    #[serde(rename = "status_base_add")]
    Base,
    /// Relative multipliers.
    #[serde(rename = "status_tuning")]
    Multiplier,
}

/// Single effect granted by an upgrade node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UpgradeEffect {
    /// Adjusts a weapon stat; `add` edits the base, `mul` edits the multiplier.
    Stat {
        /// Dotted stat path, optionally prefixed with `weapon.`.
        target: String,
        /// Arithmetic applied to the stat.
        op: EffectOp,
        /// Operand of the arithmetic.
        value: f32,
    },
    /// Adjusts the global status tuning tables.
    Special {
        /// Table edited by the effect.
        #[serde(rename = "type")]
        table: TuningTable,
        /// `<status>.<field>` path into the table.
        path: String,
        /// Arithmetic applied to the table entry.
        op: EffectOp,
        /// Operand of the arithmetic.
        value: f32,
    },
    /// Adds a status effect to every bullet the weapon fires.
    StatusOnHit {
        /// Status applied by the weapon's bullets.
        entry: StatusOnHit,
    },
    /// Effect this build does not understand; skipped when applied.
    #[serde(other)]
    Unsupported,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEffect {
    Known(UpgradeEffect),
    Malformed(IgnoredAny),
}

/// Reads a node's effects, keeping unreadable entries as
/// [`UpgradeEffect::Unsupported`] so one bad effect never drops the catalog.
fn lenient_effects<'de, D>(deserializer: D) -> Result<Vec<UpgradeEffect>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<RawEffect>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|effect| match effect {
            RawEffect::Known(effect) => effect,
            RawEffect::Malformed(_) => UpgradeEffect::Unsupported,
        })
        .collect())
}

/// Identifier of a node inside an upgrade catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpgradeNodeId(String);

impl UpgradeNodeId {
    /// Creates a node identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrowed identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UpgradeNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prerequisite expression guarding an upgrade node.
///
/// Catalogs may spell this as `{"and": [...]}`, `{"or": [...]}` or a bare
/// list (read as `and`). Anything else reads as [`Requirement::None`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRequirement")]
pub enum Requirement {
    /// Always satisfied.
    #[default]
    None,
    /// Satisfied once every listed node is owned.
    All(Vec<UpgradeNodeId>),
    /// Satisfied once any listed node is owned.
    Any(Vec<UpgradeNodeId>),
}

impl Requirement {
    /// Nodes referenced by the expression.
    #[must_use]
    pub fn dependencies(&self) -> &[UpgradeNodeId] {
        match self {
            Self::None => &[],
            Self::All(ids) | Self::Any(ids) => ids,
        }
    }

    /// Evaluates the expression against the owned predicate.
    pub fn is_met(&self, mut owned: impl FnMut(&UpgradeNodeId) -> bool) -> bool {
        match self {
            Self::None => true,
            Self::All(ids) => ids.iter().all(|id| owned(id)),
            Self::Any(ids) => ids.iter().any(|id| owned(id)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRequirement {
    Legacy(Vec<UpgradeNodeId>),
    Expression {
        and: Option<Vec<UpgradeNodeId>>,
        or: Option<Vec<UpgradeNodeId>>,
    },
    Malformed(IgnoredAny),
}

impl From<RawRequirement> for Requirement {
    fn from(raw: RawRequirement) -> Self {
        match raw {
            RawRequirement::Legacy(ids) => Self::All(ids),
            RawRequirement::Expression { and: Some(ids), .. } => Self::All(ids),
            RawRequirement::Expression { or: Some(ids), .. } => Self::Any(ids),
            RawRequirement::Expression { .. } | RawRequirement::Malformed(_) => Self::None,
        }
    }
}

/// Purchasable upgrade.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UpgradeNode {
    /// Unique identifier of the node.
    pub id: UpgradeNodeId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Currency required to purchase the node.
    #[serde(default)]
    pub cost: u32,
    /// Prerequisite expression.
    #[serde(default)]
    pub requires: Requirement,
    /// Effects applied on purchase.
    #[serde(default, deserialize_with = "lenient_effects")]
    pub effects: Vec<UpgradeEffect>,
}

/// Group of related upgrade nodes.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpgradeTree {
    /// Nodes belonging to the tree.
    #[serde(default)]
    pub nodes: Vec<UpgradeNode>,
}

/// Full catalog of upgrade trees.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UpgradeCatalog {
    /// Trees contained in the catalog.
    #[serde(default)]
    pub trees: Vec<UpgradeTree>,
}

impl UpgradeCatalog {
    /// Builds a catalog holding a single tree of the provided nodes.
    #[must_use]
    pub fn from_nodes(nodes: Vec<UpgradeNode>) -> Self {
        Self {
            trees: vec![UpgradeTree { nodes }],
        }
    }

    /// Looks up a node by identifier across every tree.
    #[must_use]
    pub fn node(&self, id: &UpgradeNodeId) -> Option<&UpgradeNode> {
        self.nodes().find(|node| &node.id == id)
    }

    /// Iterates every node in catalog order.
    pub fn nodes(&self) -> impl Iterator<Item = &UpgradeNode> {
        self.trees.iter().flat_map(|tree| tree.nodes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BurnOptions, StatusOptions};

    fn ids(values: &[&str]) -> Vec<UpgradeNodeId> {
        values.iter().copied().map(UpgradeNodeId::new).collect()
    }

    #[test]
    fn requirement_shapes_are_recognised() {
        let and: Requirement = serde_json::from_str(r#"{"and":["a","b"]}"#).expect("and");
        let or: Requirement = serde_json::from_str(r#"{"or":["a"]}"#).expect("or");
        let legacy: Requirement = serde_json::from_str(r#"["c"]"#).expect("legacy");
        assert_eq!(and, Requirement::All(ids(&["a", "b"])));
        assert_eq!(or, Requirement::Any(ids(&["a"])));
        assert_eq!(legacy, Requirement::All(ids(&["c"])));
    }

    #[test]
    fn malformed_requirement_is_permissive() {
        let empty: Requirement = serde_json::from_str("{}").expect("empty object");
        let junk: Requirement = serde_json::from_str(r#""whatever""#).expect("string");
        assert_eq!(empty, Requirement::None);
        assert_eq!(junk, Requirement::None);
        assert!(junk.is_met(|_| false));
    }

    #[test]
    fn any_requirement_needs_one_owned_node() {
        let requirement = Requirement::Any(ids(&["a", "b"]));
        assert!(!requirement.is_met(|_| false));
        assert!(requirement.is_met(|id| id.as_str() == "b"));
    }

    #[test]
    fn catalog_parses_tagged_effects() {
        let catalog: UpgradeCatalog = serde_json::from_str(
            r#"{"trees":[{"nodes":[
                {"id":"dmg","name":"Sharper","cost":1,
                 "effects":[{"kind":"stat","target":"weapon.bulletDamage","op":"add","value":5}]},
                {"id":"fire","cost":2,"requires":{"and":["dmg"]},
                 "effects":[
                    {"kind":"special","type":"status_tuning","path":"burn.dps","op":"mul","value":1.5},
                    {"kind":"statusOnHit","entry":{"type":"burn","dps":3}}
                 ]}
            ]}]}"#,
        )
        .expect("catalog parses");

        let fire = catalog
            .node(&UpgradeNodeId::new("fire"))
            .expect("fire node present");
        assert_eq!(fire.requires, Requirement::All(ids(&["dmg"])));
        assert_eq!(
            fire.effects[0],
            UpgradeEffect::Special {
                table: TuningTable::Multiplier,
                path: "burn.dps".to_owned(),
                op: EffectOp::Mul,
                value: 1.5,
            }
        );
        assert_eq!(
            fire.effects[1],
            UpgradeEffect::StatusOnHit {
                entry: StatusOnHit::always(StatusOptions::Burn(BurnOptions {
                    duration_sec: None,
                    dps: Some(3.0),
                })),
            }
        );
        assert_eq!(catalog.nodes().count(), 2);
    }

    #[test]
    fn unreadable_effects_do_not_drop_the_catalog() {
        let catalog: UpgradeCatalog = serde_json::from_str(
            r#"{"trees":[{"nodes":[
                {"id":"mixed","cost":1,"effects":[
                    {"kind":"stat","target":"bulletDamage","op":"add","value":2},
                    {"kind":"teleport","distance":40},
                    {"kind":"special","type":"status_cosmic","path":"burn.dps","op":"add","value":1},
                    {"kind":"stat","target":"burstCount","op":"mul","value":2}
                ]}
            ]}]}"#,
        )
        .expect("catalog with unknown effects parses");

        let node = catalog
            .node(&UpgradeNodeId::new("mixed"))
            .expect("node present");
        assert_eq!(node.effects.len(), 4);
        assert_eq!(
            node.effects[0],
            UpgradeEffect::Stat {
                target: "bulletDamage".to_owned(),
                op: EffectOp::Add,
                value: 2.0,
            }
        );
        assert_eq!(node.effects[1], UpgradeEffect::Unsupported);
        assert_eq!(node.effects[2], UpgradeEffect::Unsupported);
        assert_eq!(
            node.effects[3],
            UpgradeEffect::Stat {
                target: "burstCount".to_owned(),
                op: EffectOp::Mul,
                value: 2.0,
            }
        );
    }
}
