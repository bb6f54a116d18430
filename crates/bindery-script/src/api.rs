//! Rhai API registration
//!
//! Script calls see four handles bound as constants: `a` (actors), `p`
//! (party), `s` (switches) and `v` (variables). Each handle reads and writes
//! the shared ScriptCallContext.

use crate::context::{lock, SharedContext};
use rhai::{Array, Dynamic, Engine, EvalAltResult, Position};

/// `a`: actor lookup by id
#[derive(Clone)]
pub struct Actors(pub SharedContext);

/// `p`: the party
#[derive(Clone)]
pub struct Party(pub SharedContext);

/// `s`: switches, `s[id]`
#[derive(Clone)]
pub struct Switches(pub SharedContext);

/// `v`: variables, `v[id]`
#[derive(Clone)]
pub struct Variables(pub SharedContext);

fn unknown_actor(id: i64) -> Box<EvalAltResult> {
    EvalAltResult::ErrorRuntime(format!("unknown actor {}", id).into(), Position::NONE).into()
}

/// Register all handle types on the Rhai engine
pub fn register_all(engine: &mut Engine) {
    register_actor_api(engine);
    register_party_api(engine);
    register_switch_api(engine);
    register_variable_api(engine);
    register_log_api(engine);
}

// ─── Actors ──────────────────────────────────────────────

fn register_actor_api(engine: &mut Engine) {
    engine.register_type_with_name::<Actors>("Actors");

    // a.name(id) -> String
    engine.register_fn("name", |a: &mut Actors, id: i64| -> Result<String, Box<EvalAltResult>> {
        let c = lock(&a.0);
        c.data
            .actors
            .get(&id)
            .map(|actor| actor.name.clone())
            .ok_or_else(|| unknown_actor(id))
    });

    // a.level(id) -> i64
    engine.register_fn("level", |a: &mut Actors, id: i64| -> Result<i64, Box<EvalAltResult>> {
        let c = lock(&a.0);
        c.data
            .actors
            .get(&id)
            .map(|actor| actor.level)
            .ok_or_else(|| unknown_actor(id))
    });

    // a.change_level(id, n): levels are clamped to 1..=99
    engine.register_fn(
        "change_level",
        |a: &mut Actors, id: i64, level: i64| -> Result<(), Box<EvalAltResult>> {
            let mut c = lock(&a.0);
            let actor = c.data.actors.get_mut(&id).ok_or_else(|| unknown_actor(id))?;
            actor.level = level.clamp(1, 99);
            Ok(())
        },
    );
}

// ─── Party ───────────────────────────────────────────────

fn register_party_api(engine: &mut Engine) {
    engine.register_type_with_name::<Party>("Party");

    engine.register_get("gold", |p: &mut Party| -> i64 { lock(&p.0).data.party.gold });

    engine.register_get("size", |p: &mut Party| -> i64 {
        lock(&p.0).data.party.members.len() as i64
    });

    engine.register_get("members", |p: &mut Party| -> Array {
        lock(&p.0)
            .data
            .party
            .members
            .iter()
            .map(|&id| Dynamic::from(id))
            .collect()
    });

    // p.gain_gold(n): gold never drops below zero
    engine.register_fn("gain_gold", |p: &mut Party, amount: i64| {
        let mut c = lock(&p.0);
        c.data.party.gold = c.data.party.gold.saturating_add(amount).max(0);
    });
}

// ─── Switches / Variables ────────────────────────────────

fn register_switch_api(engine: &mut Engine) {
    engine.register_type_with_name::<Switches>("Switches");
    engine.register_indexer_get(|s: &mut Switches, id: i64| -> bool { lock(&s.0).data.switch(id) });
    engine.register_indexer_set(|s: &mut Switches, id: i64, value: bool| {
        lock(&s.0).data.switches.insert(id, value);
    });
}

fn register_variable_api(engine: &mut Engine) {
    engine.register_type_with_name::<Variables>("Variables");
    engine.register_indexer_get(|v: &mut Variables, id: i64| -> i64 { lock(&v.0).data.variable(id) });
    engine.register_indexer_set(|v: &mut Variables, id: i64, value: i64| {
        lock(&v.0).data.variables.insert(id, value);
    });
}

// ─── Log ─────────────────────────────────────────────────

fn register_log_api(engine: &mut Engine) {
    engine.on_print(|text| log::info!("[script] {}", text));
    engine.on_debug(|text, _source, pos| log::debug!("[script] {} ({})", text, pos));
}
