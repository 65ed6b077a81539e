//! Default passive tree.
//!
//! A small wheel: one start node with three branches (might, arcana,
//! finesse) that meet again in an outer ring.
use game_core::{NodeId, PassiveNode, PassiveTreeData, StatBlock};

struct NodeDef {
    id: &'static str,
    name: &'static str,
    stats: StatBlock,
    connections: &'static [&'static str],
}

const START_NODE: &str = "origin";

fn stat(f: impl FnOnce(&mut StatBlock)) -> StatBlock {
    let mut block = StatBlock::default();
    f(&mut block);
    block
}

fn node_defs() -> Vec<NodeDef> {
    vec![
        NodeDef {
            id: START_NODE,
            name: "Origin",
            stats: stat(|s| s.max_hp = 10.0),
            connections: &["might_1", "arcana_1", "finesse_1"],
        },
        // might
        NodeDef {
            id: "might_1",
            name: "Brawn",
            stats: stat(|s| s.strength = 5.0),
            connections: &[START_NODE, "might_2"],
        },
        NodeDef {
            id: "might_2",
            name: "Thick Skin",
            stats: stat(|s| s.max_hp = 25.0),
            connections: &["might_1", "might_3", "ring_1"],
        },
        NodeDef {
            id: "might_3",
            name: "Heavy Blows",
            stats: stat(|s| {
                s.flat_damage = 4.0;
                s.strength = 5.0;
            }),
            connections: &["might_2"],
        },
        // arcana
        NodeDef {
            id: "arcana_1",
            name: "Insight",
            stats: stat(|s| s.intelligence = 5.0),
            connections: &[START_NODE, "arcana_2"],
        },
        NodeDef {
            id: "arcana_2",
            name: "Deep Reserves",
            stats: stat(|s| s.max_mana = 20.0),
            connections: &["arcana_1", "arcana_3", "ring_1", "ring_2"],
        },
        NodeDef {
            id: "arcana_3",
            name: "Flow",
            stats: stat(|s| {
                s.mana_regen = 2.0;
                s.intelligence = 5.0;
            }),
            connections: &["arcana_2"],
        },
        // finesse
        NodeDef {
            id: "finesse_1",
            name: "Nimble",
            stats: stat(|s| s.dexterity = 5.0),
            connections: &[START_NODE, "finesse_2"],
        },
        NodeDef {
            id: "finesse_2",
            name: "Precision",
            stats: stat(|s| s.increased_damage_pct = 8.0),
            connections: &["finesse_1", "finesse_3", "ring_2"],
        },
        NodeDef {
            id: "finesse_3",
            name: "Fortune",
            stats: stat(|s| {
                s.luck = 5.0;
                s.dexterity = 5.0;
            }),
            connections: &["finesse_2"],
        },
        // outer ring
        NodeDef {
            id: "ring_1",
            name: "Battlemage",
            stats: stat(|s| {
                s.increased_damage_pct = 10.0;
                s.max_mana = 10.0;
            }),
            connections: &["might_2", "arcana_2", "keystone"],
        },
        NodeDef {
            id: "ring_2",
            name: "Spellslinger",
            stats: stat(|s| {
                s.increased_damage_pct = 10.0;
                s.mana_regen = 1.0;
            }),
            connections: &["arcana_2", "finesse_2", "keystone"],
        },
        NodeDef {
            id: "keystone",
            name: "Ascendant",
            stats: stat(|s| {
                s.increased_damage_pct = 20.0;
                s.max_hp = 40.0;
                s.max_mana = 20.0;
            }),
            connections: &["ring_1", "ring_2"],
        },
    ]
}

pub fn default_passive_tree() -> PassiveTreeData {
    PassiveTreeData::from_nodes(node_defs().into_iter().map(|def| PassiveNode {
        id: NodeId::from(def.id),
        name: def.name.to_owned(),
        stats: def.stats,
        connections: def.connections.iter().map(|c| NodeId::from(*c)).collect(),
        is_start: def.id == START_NODE,
    }))
}
