//! Per-action transitions.
use super::inventory::{discard_item, equip_item, sell_all, unequip_slot};
use super::load::load_snapshot;
use crate::action::Action;
use crate::combat::{
    Resolution, auto_skills_tick, channel_tick, mana_regen_tick, purge_expired, resolve_defeats,
    use_skill,
};
use crate::config::GameConfig;
use crate::env::{GameEnv, LootOracle};
use crate::error::{GameError, Rejection};
use crate::skills::{self, SkillOutcome};
use crate::state::{AnimationCommand, Enemy, EnemyId, GameState, NodeId, Player, Rarity, Timestamp};

/// What a transition reports besides the mutated state.
#[derive(Debug, Default)]
pub(super) struct Applied {
    pub rejection: Option<Rejection>,
    pub resolution: Option<Resolution>,
}

impl Applied {
    fn rejected<E: GameError>(state: &mut GameState, error: &E) -> Self {
        state.log.push(error.to_string());
        Self {
            rejection: Some(Rejection::from_error(error)),
            resolution: None,
        }
    }

    fn resolved(resolution: Resolution) -> Self {
        Self {
            rejection: None,
            resolution: (!resolution.is_empty()).then_some(resolution),
        }
    }
}

pub(super) fn apply(
    state: &mut GameState,
    action: &Action,
    env: &GameEnv<'_>,
    now: Timestamp,
) -> Applied {
    let loot = env.loot().ok();

    match action {
        Action::Load(snapshot) => {
            load_snapshot(state, (**snapshot).clone(), env);
            Applied::default()
        }
        Action::Spawn(enemies) => {
            purge_expired(state, now);
            spawn(state, enemies);
            Applied::default()
        }
        Action::Tick { enemy_id, damage } => {
            let Some(resolution) = player_hit(state, *enemy_id, *damage, loot, now) else {
                return Applied::default();
            };
            purge_expired(state, now);
            Applied::resolved(resolution)
        }
        Action::Remove(id) => {
            state.enemies.remove(id);
            state.enemy_positions.remove(id);
            Applied::default()
        }
        Action::Equip(id) => match equip_item(state, *id) {
            Ok(()) => Applied::default(),
            Err(err) => Applied::rejected(state, &err),
        },
        Action::Unequip(slot) => match unequip_slot(state, *slot) {
            Ok(()) => Applied::default(),
            Err(err) => Applied::rejected(state, &err),
        },
        Action::Discard(id) => {
            discard_item(state, *id);
            Applied::default()
        }
        Action::SellAll => {
            sell_all(state);
            Applied::default()
        }
        Action::ToggleAuto => {
            state.auto_combat = !state.auto_combat;
            let mode = if state.auto_combat { "enabled" } else { "disabled" };
            state.log.push(format!("Auto combat {mode}"));
            Applied::default()
        }
        Action::Reset => reset(state, env),
        Action::Log(message) => {
            state.log.push(message.clone());
            Applied::default()
        }
        Action::UnlockSkillGem(id) => {
            let outcome = skills::unlock_skill_gem(&state.player, id);
            settle(state, outcome)
        }
        Action::UnlockSupportGem(id) => {
            let outcome = skills::unlock_support_gem(&state.player, id);
            settle(state, outcome)
        }
        Action::LevelUpSkillGem(id) => {
            let outcome = skills::level_up_skill_gem(&state.player, id);
            settle(state, outcome)
        }
        Action::LevelUpSupportGem(id) => {
            let outcome = skills::level_up_support_gem(&state.player, id);
            settle(state, outcome)
        }
        Action::EquipSkillToBar { skill_id, slot } => {
            let outcome = skills::equip_skill_to_bar(&state.player, skill_id, *slot);
            settle(state, outcome)
        }
        Action::UnequipSkillFromBar { slot } => {
            let outcome = skills::unequip_skill_from_bar(&state.player, *slot);
            settle(state, outcome)
        }
        Action::AttachSupportGem {
            skill_id,
            support_id,
        } => {
            let outcome = skills::attach_support_gem(&state.player, skill_id, support_id);
            settle(state, outcome)
        }
        Action::DetachSupportGem {
            skill_id,
            support_id,
        } => {
            let outcome = skills::detach_support_gem(&state.player, skill_id, support_id);
            settle(state, outcome)
        }
        Action::UseSkill(id) => {
            let applied = match use_skill(state, id, loot, now) {
                Ok(cast) => Applied::resolved(cast.resolution),
                Err(err) => Applied::rejected(state, &err),
            };
            purge_expired(state, now);
            applied
        }
        Action::UpdateEnemyPositions(positions) => {
            state.enemy_positions = positions.clone();
            Applied::default()
        }
        Action::UpdatePlayerPosition(position) => {
            state.player_position = Some(*position);
            Applied::default()
        }
        Action::ChannelWhirlwind => {
            let report = channel_tick(state, loot, now);
            purge_expired(state, now);
            report
                .map(|report| Applied::resolved(report.resolution))
                .unwrap_or_default()
        }
        Action::AutoSkills => {
            let report = auto_skills_tick(state, loot, now);
            purge_expired(state, now);
            Applied::resolved(report.resolution)
        }
        Action::ManaRegen => {
            mana_regen_tick(&mut state.player);
            purge_expired(state, now);
            Applied::default()
        }
        Action::AllocatePassiveNode(node) => allocate_passive(state, node, env),
        Action::AddStone(stone) => {
            state.player.stones.push(stone.clone());
            if let Ok(stones) = env.stones() {
                let owned = std::mem::take(&mut state.player.stones);
                state.player.stones = stones.migrate_player_stones(owned);
            }
            state.log.push(format!("Added {}", stone.name));
            Applied::default()
        }
        Action::RemoveStone(id) => {
            if let Some(index) = state.player.stones.iter().position(|s| &s.id == id) {
                let stone = state.player.stones.remove(index);
                state.log.push(format!("Removed {}", stone.name));
            }
            Applied::default()
        }
        Action::ForceMigrateStones => match env.stones() {
            Ok(stones) => {
                stones.force_migrate_all_stones(&mut state.player.stones);
                state
                    .log
                    .push(format!("Migrated {} stone(s)", state.player.stones.len()));
                Applied::default()
            }
            Err(err) => Applied::rejected(state, &err),
        },
        Action::UpdateEquipment(equipment) => {
            state.player.equipment = equipment.clone();
            Applied::default()
        }
        Action::UpdateCharacterModel(model) => {
            state.player.character_model = Some(model.clone());
            Applied::default()
        }
    }
}

/// Logs the outcome message and adopts the updated player on success.
fn settle(state: &mut GameState, outcome: SkillOutcome) -> Applied {
    state.log.push(outcome.message);
    if let Some(player) = outcome.updated_player {
        state.player = player;
    }
    Applied {
        rejection: outcome.error.as_ref().map(Rejection::from_error),
        resolution: None,
    }
}

/// Adds enemies in order until the field is full; known ids are skipped.
fn spawn(state: &mut GameState, enemies: &[Enemy]) {
    for enemy in enemies {
        if state.enemies.len() >= GameConfig::MAX_ENEMIES {
            break;
        }
        if state.enemies.insert_new(enemy.clone()) && enemy.is_boss {
            state
                .log
                .push(format!("Boss {} (level {}) appeared!", enemy.name, enemy.level));
        }
    }
}

fn player_hit(
    state: &mut GameState,
    enemy_id: EnemyId,
    damage: f64,
    loot: Option<&dyn LootOracle>,
    now: Timestamp,
) -> Option<Resolution> {
    let enemy = state
        .enemies
        .get_mut(&enemy_id)
        .filter(|enemy| enemy.is_alive())?;
    let dealt = enemy.take_damage(damage);

    let (weapon, rarity) = state
        .player
        .equipment
        .weapon()
        .map_or_else(
            || ("fist".to_owned(), Rarity::Common),
            |item| {
                let weapon = if item.base_type.is_empty() {
                    item.slot.to_string()
                } else {
                    item.base_type.clone()
                };
                (weapon, item.rarity)
            },
        );
    state.log.push_command(&AnimationCommand::PlayerHit {
        enemy_id,
        weapon,
        rarity,
        damage: dealt.round() as u64,
    });
    Some(resolve_defeats(state, loot, now))
}

/// Fresh character from the catalog, keeping what is currently equipped.
fn reset(state: &mut GameState, env: &GameEnv<'_>) -> Applied {
    let catalog = match env.catalog() {
        Ok(catalog) => catalog,
        Err(err) => return Applied::rejected(state, &err),
    };
    let equipment = std::mem::take(&mut state.player.equipment);
    let mut player = Player::new(
        catalog.skill_gems(),
        catalog.support_gems(),
        catalog.passive_tree(),
    );
    player.equipment = equipment;
    player.refresh_stats();
    player.hp = player.max_hp;
    player.mana = player.max_mana;

    state.player = player;
    state.enemies = Default::default();
    state.enemy_positions.clear();
    state.inventory.clear();
    state.log.clear();
    state.log.push("Game reset");
    Applied::default()
}

fn allocate_passive(
    state: &mut GameState,
    node: &NodeId,
    env: &GameEnv<'_>,
) -> Applied {
    let passives = match env.passives() {
        Ok(passives) => passives,
        Err(err) => return Applied::rejected(state, &err),
    };
    let player = &state.player;
    match passives.allocate_node(node, &player.passive_tree_data, &player.passive_tree_state) {
        Ok(next) => {
            let name = player
                .passive_tree_data
                .node(node)
                .map_or_else(|| node.to_string(), |n| n.name.clone());
            state.player.passive_tree_state = next;
            state.log.push(format!("Allocated {name}"));
            Applied::default()
        }
        Err(err) => Applied::rejected(state, &err),
    }
}
