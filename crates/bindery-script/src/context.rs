//! Game data visible to script calls
//!
//! GameData is the slice of host state scripts may touch. ScriptCallContext is
//! the shared state the registered Rhai functions lock during a call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorData {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: i64,
}

fn default_level() -> i64 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyData {
    #[serde(default)]
    pub gold: i64,
    /// Actor ids in formation order
    #[serde(default)]
    pub members: Vec<i64>,
}

/// Switches, variables, actors and party. Ids are the host's 1-based ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    #[serde(default, with = "id_keys")]
    pub switches: BTreeMap<i64, bool>,
    #[serde(default, with = "id_keys")]
    pub variables: BTreeMap<i64, i64>,
    #[serde(default, with = "id_keys")]
    pub actors: BTreeMap<i64, ActorData>,
    #[serde(default)]
    pub party: PartyData,
}

impl GameData {
    pub fn switch(&self, id: i64) -> bool {
        self.switches.get(&id).copied().unwrap_or(false)
    }

    pub fn variable(&self, id: i64) -> i64 {
        self.variables.get(&id).copied().unwrap_or(0)
    }
}

/// Maps keyed by numeric id, written with string keys so TOML can hold them
mod id_keys {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<T, S>(map: &BTreeMap<i64, T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let keyed: BTreeMap<String, &T> = map.iter().map(|(id, v)| (id.to_string(), v)).collect();
        keyed.serialize(serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<BTreeMap<i64, T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        BTreeMap::<String, T>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, v)| {
                key.trim()
                    .parse::<i64>()
                    .map(|id| (id, v))
                    .map_err(|_| D::Error::custom(format!("expected a numeric id, got '{}'", key)))
            })
            .collect()
    }
}

/// Shared context locked by API functions while a script runs
#[derive(Debug, Default)]
pub struct ScriptCallContext {
    pub data: GameData,
    /// Binding that fired, as `key:<name>` or `mouse:<button>`
    pub source: Option<String>,
}

pub type SharedContext = Arc<Mutex<ScriptCallContext>>;

/// Lock the context. A panic inside a previous call leaves the data usable,
/// so poisoning is ignored.
pub fn lock(ctx: &SharedContext) -> MutexGuard<'_, ScriptCallContext> {
    ctx.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_data_from_toml() {
        let text = r#"
            [switches]
            3 = true

            [variables]
            1 = 40

            [actors.1]
            name = "Reid"
            level = 12

            [actors.2]
            name = "Margit"

            [party]
            gold = 500
            members = [1, 2]
        "#;
        let data: GameData = toml::from_str(text).unwrap();
        assert!(data.switch(3));
        assert!(!data.switch(4));
        assert_eq!(data.variable(1), 40);
        assert_eq!(data.actors[&2].level, 1);
        assert_eq!(data.party.members, vec![1, 2]);

        let again: GameData = toml::from_str(&toml::to_string(&data).unwrap()).unwrap();
        assert_eq!(again, data);
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(toml::from_str::<GameData>("[variables]\nhp = 3").is_err());
    }
}
