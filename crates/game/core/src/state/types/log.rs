//! Combat log and the pipe-delimited animation commands embedded in it.
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::common::{EnemyId, Rarity, SkillId};
use crate::config::GameConfig;

/// Bounded log, most recent entry first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameLog {
    entries: VecDeque<String>,
    /// Number of entries pushed through this value; not persisted.
    #[serde(skip)]
    pushed: u64,
}

impl GameLog {
    /// Prepends `entry`, dropping the oldest lines beyond capacity.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_front(entry.into());
        self.entries.truncate(GameConfig::LOG_CAPACITY);
        self.pushed += 1;
    }

    pub fn push_command(&mut self, command: &AnimationCommand) {
        self.push(command.to_string());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Total pushes over the lifetime of this log value.
    pub fn pushed(&self) -> u64 {
        self.pushed
    }

    /// The `count` most recent entries in the order they were pushed.
    pub fn newest(&self, count: usize) -> Vec<String> {
        self.entries
            .iter()
            .take(count)
            .rev()
            .cloned()
            .collect()
    }
}

impl PartialEq for GameLog {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

/// Structured renderer command carried as a log line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AnimationCommand {
    /// `ANIM_SKILL|<skillId>|<targetIdOrTimestamp>|<durationMs?>`
    Skill {
        skill_id: SkillId,
        /// Enemy id for targeted casts, cast timestamp for area casts.
        target: u64,
        duration_ms: Option<u64>,
    },
    /// `ANIM_PLAYER|<enemyId>|<weaponOrDamageType>|<rarity>|hit|<damage>`
    PlayerHit {
        enemy_id: EnemyId,
        weapon: String,
        rarity: Rarity,
        damage: u64,
    },
}

impl AnimationCommand {
    pub const SKILL_PREFIX: &'static str = "ANIM_SKILL";
    pub const PLAYER_PREFIX: &'static str = "ANIM_PLAYER";
}

impl fmt::Display for AnimationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skill {
                skill_id,
                target,
                duration_ms,
            } => {
                write!(f, "{}|{}|{}", Self::SKILL_PREFIX, skill_id, target)?;
                if let Some(duration) = duration_ms {
                    write!(f, "|{duration}")?;
                }
                Ok(())
            }
            Self::PlayerHit {
                enemy_id,
                weapon,
                rarity,
                damage,
            } => write!(
                f,
                "{}|{}|{}|{}|hit|{}",
                Self::PLAYER_PREFIX,
                enemy_id,
                weapon,
                rarity,
                damage
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseAnimationError {
    #[error("not an animation command")]
    NotACommand,
    #[error("malformed {kind} command: {line}")]
    Malformed { kind: &'static str, line: String },
}

impl FromStr for AnimationCommand {
    type Err = ParseAnimationError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split('|').collect();
        let malformed = |kind| ParseAnimationError::Malformed {
            kind,
            line: line.to_owned(),
        };

        match fields.as_slice() {
            [prefix, skill_id, target, rest @ ..] if *prefix == Self::SKILL_PREFIX => {
                let target = target.parse().map_err(|_| malformed("skill"))?;
                let duration_ms = match rest {
                    [] => None,
                    [duration] => Some(duration.parse().map_err(|_| malformed("skill"))?),
                    _ => return Err(malformed("skill")),
                };
                Ok(Self::Skill {
                    skill_id: SkillId::from(*skill_id),
                    target,
                    duration_ms,
                })
            }
            [prefix, enemy_id, weapon, rarity, "hit", damage] if *prefix == Self::PLAYER_PREFIX => {
                let rarity = rarity.parse::<Rarity>().map_err(|_| malformed("player"))?;
                Ok(Self::PlayerHit {
                    enemy_id: EnemyId(enemy_id.parse().map_err(|_| malformed("player"))?),
                    weapon: (*weapon).to_owned(),
                    rarity,
                    damage: damage.parse().map_err(|_| malformed("player"))?,
                })
            }
            [prefix, ..] if *prefix == Self::SKILL_PREFIX => Err(malformed("skill")),
            [prefix, ..] if *prefix == Self::PLAYER_PREFIX => Err(malformed("player")),
            _ => Err(ParseAnimationError::NotACommand),
        }
    }
}

/// A log entry classified for consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LogLine {
    Text(String),
    Animation(AnimationCommand),
}

impl LogLine {
    /// Classifies a raw log entry. Malformed commands are kept as text.
    pub fn classify(raw: &str) -> Self {
        match raw.parse::<AnimationCommand>() {
            Ok(command) => Self::Animation(command),
            Err(_) => Self::Text(raw.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_most_recent_first_and_bounded() {
        let mut log = GameLog::default();
        for i in 0..(GameConfig::LOG_CAPACITY + 15) {
            log.push(format!("line {i}"));
        }
        assert_eq!(log.len(), GameConfig::LOG_CAPACITY);
        assert_eq!(log.latest(), Some("line 214"));
        assert_eq!(log.iter().last(), Some("line 15"));
        assert_eq!(log.pushed(), 215);
    }

    #[test]
    fn newest_returns_push_order() {
        let mut log = GameLog::default();
        log.push("a");
        log.push("b");
        log.push("c");
        assert_eq!(log.newest(2), vec!["b".to_owned(), "c".to_owned()]);
    }

    #[test]
    fn skill_command_renders_exact_shape() {
        let with_duration = AnimationCommand::Skill {
            skill_id: SkillId::from("fireball"),
            target: 42,
            duration_ms: Some(600),
        };
        assert_eq!(with_duration.to_string(), "ANIM_SKILL|fireball|42|600");

        let without = AnimationCommand::Skill {
            skill_id: SkillId::from("ice_nova"),
            target: 1_700_000,
            duration_ms: None,
        };
        assert_eq!(without.to_string(), "ANIM_SKILL|ice_nova|1700000");
    }

    #[test]
    fn player_hit_renders_exact_shape() {
        let hit = AnimationCommand::PlayerHit {
            enemy_id: EnemyId(7),
            weapon: "sword".into(),
            rarity: Rarity::Epic,
            damage: 18,
        };
        assert_eq!(hit.to_string(), "ANIM_PLAYER|7|sword|epic|hit|18");
        assert_eq!("ANIM_PLAYER|7|sword|epic|hit|18".parse(), Ok(hit));
    }

    #[test]
    fn classify_keeps_plain_and_malformed_text() {
        assert_eq!(
            LogLine::classify("Goblin defeated!"),
            LogLine::Text("Goblin defeated!".into())
        );
        assert!(matches!(
            LogLine::classify("ANIM_SKILL|fireball|nope"),
            LogLine::Text(_)
        ));
        assert!(matches!(
            LogLine::classify("ANIM_SKILL|fireball|3"),
            LogLine::Animation(AnimationCommand::Skill { target: 3, duration_ms: None, .. })
        ));
    }
}
