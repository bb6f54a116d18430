//! Replay command: run a scripted input session frame by frame

use super::sim::{MapSpec, PlayerSpec, SimHost};
use anyhow::{Context, Result};
use bindery_core::{KeyCode, KeyCodeTable, MouseButton};
use bindery_runtime::{
    AutoMoveState, BindingConfig, BindingSystem, InputState, KeyMapper, PlayerCharacter,
};
use bindery_script::{GameData, RhaiScriptRunner};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// A session file: the map, the player, script-visible data, and held input per frame
#[derive(Debug, Default, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub map: MapSpec,
    #[serde(default)]
    pub player: PlayerSpec,
    #[serde(default)]
    pub data: GameData,
    #[serde(default)]
    pub frames: Vec<FrameSpec>,
}

/// Input held for `repeat` consecutive frames
#[derive(Debug, Deserialize)]
pub struct FrameSpec {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub mouse: Vec<String>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Binding commands run before the first of these frames
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

fn default_repeat() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    #[serde(default)]
    pub args: HashMap<String, String>,
}

#[derive(Debug)]
pub struct FrameRecord {
    pub frame: u32,
    pub commands: Vec<String>,
    pub dispatch: Option<String>,
    pub host_calls: Vec<String>,
    pub position: (i32, i32),
    pub auto_move: AutoMoveState,
}

fn held_keys(spec: &FrameSpec) -> Result<BTreeSet<KeyCode>> {
    let table = KeyCodeTable::standard();
    spec.keys
        .iter()
        .map(|name| -> Result<KeyCode> { Ok(table.resolve(name)?.1) })
        .collect()
}

fn held_buttons(spec: &FrameSpec) -> Result<BTreeSet<MouseButton>> {
    spec.mouse
        .iter()
        .map(|name| -> Result<MouseButton> { Ok(name.parse()?) })
        .collect()
}

/// Run `session` against a fresh game started from `config`.
pub fn run_session(config: &BindingConfig, session: Session) -> Result<(Vec<FrameRecord>, GameData)> {
    let runner = RhaiScriptRunner::new(session.data);
    let data = runner.context();
    let mut system = BindingSystem::new(&KeyMapper::factory()).with_script_runner(Box::new(runner));
    system.new_game(config);

    let mut host = SimHost::new(&session.map, &session.player);
    let mut input = InputState::new();
    let mut keys = BTreeSet::new();
    let mut buttons = BTreeSet::new();
    let mut records = Vec::new();
    let mut frame = 0;

    for spec in &session.frames {
        let next_keys = held_keys(spec).context("Invalid key in session")?;
        let next_buttons = held_buttons(spec).context("Invalid mouse button in session")?;

        let mut commands: Vec<String> = spec
            .commands
            .iter()
            .map(|command| {
                let applied = system.run_command(&command.name, &command.args);
                format!("{} {}", command.name, if applied { "applied" } else { "skipped" })
            })
            .collect();

        for _ in 0..spec.repeat.max(1) {
            for &code in keys.difference(&next_keys) {
                input.process_key_up(code);
            }
            for &code in next_keys.difference(&keys) {
                input.process_key_down(code);
            }
            for &button in buttons.difference(&next_buttons) {
                input.process_mouse_button_up(button);
            }
            for &button in next_buttons.difference(&buttons) {
                input.process_mouse_button_down(button);
            }
            keys = next_keys.clone();
            buttons = next_buttons.clone();

            let dispatched = system.tick(&mut host, &mut input, |host, input| host.move_by_input(input));
            records.push(FrameRecord {
                frame,
                commands: std::mem::take(&mut commands),
                dispatch: dispatched.map(|d| format!("{} -> {:?}", d.source, d.outcome)),
                host_calls: host.take_log(),
                position: host.player.position,
                auto_move: host.player.auto_move().state(),
            });
            frame += 1;
        }
    }

    let data = bindery_script::context::lock(&data).data.clone();
    Ok((records, data))
}

pub fn run(config_path: &str, session_path: &str) -> Result<()> {
    let config = BindingConfig::load(Path::new(config_path))
        .with_context(|| format!("Failed to load config {}", config_path))?;
    let text = std::fs::read_to_string(session_path)
        .with_context(|| format!("Failed to read session {}", session_path))?;
    let session: Session = toml::from_str(&text).context("Failed to parse session")?;

    let (records, data) = run_session(&config, session)?;

    for record in &records {
        for command in &record.commands {
            println!("      ! {}", command);
        }
        print!(
            "{:>5} ({:>3},{:>3}) {:<6}",
            record.frame,
            record.position.0,
            record.position.1,
            format!("{:?}", record.auto_move)
        );
        if let Some(dispatch) = &record.dispatch {
            print!("  {}", dispatch);
        }
        println!();
        for call in &record.host_calls {
            println!("        {}", call);
        }
    }

    println!("\n{} frames", records.len());
    println!("{}", toml::to_string_pretty(&data)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        overwrite_default = false

        [[key_binds]]
        key = "f"
        action = { actionType = "toggleMoveForward" }

        [[key_binds]]
        key = "g"
        action = { actionType = "commonEvent", commonEventId = "5" }

        [[key_binds]]
        key = "h"
        action = { actionType = "scriptCall", scriptCall = "v[1] += 1; s[2] = true;" }

        [[mouse_binds]]
        button = "middle"
        action = { actionType = "mapEvent", mapEventId = "3", triggerCondition = "isPressed" }
    "#;

    const SESSION: &str = r#"
        [map]
        events = [3]

        [player]
        x = 5
        y = 5
        direction = "right"

        [[frames]]
        keys = ["f"]

        [[frames]]
        repeat = 2

        [[frames]]
        keys = ["g"]

        [[frames]]
        keys = ["ArrowUp"]

        [[frames]]
        keys = ["h"]

        [[frames]]
        mouse = ["middle"]
    "#;

    #[test]
    fn replays_the_auto_move_session() {
        let config = BindingConfig::from_toml_str(CONFIG).unwrap();
        let session: Session = toml::from_str(SESSION).unwrap();
        let (records, data) = run_session(&config, session).unwrap();

        assert_eq!(records.len(), 7);
        assert_eq!(records[0].auto_move, AutoMoveState::Moving);
        assert_eq!(records[0].position, (6, 5));
        assert_eq!(records[2].position, (8, 5));

        assert_eq!(records[3].host_calls, vec!["reserve common event 5".to_string()]);
        assert_eq!(records[3].position, (9, 5));

        assert_eq!(records[4].auto_move, AutoMoveState::Idle);
        assert_eq!(records[4].position, (9, 4));
        assert!(records[4].dispatch.is_none());

        assert!(records[5].dispatch.as_deref().unwrap().starts_with("key:h"));
        assert_eq!(data.variable(1), 1);
        assert!(data.switch(2));

        assert_eq!(records[6].host_calls, vec!["start event 3".to_string()]);
    }

    #[test]
    fn commands_change_bindings_mid_session() {
        let config = BindingConfig::from_toml_str(CONFIG).unwrap();
        let session: Session = toml::from_str(
            r#"
            [[frames]]
            keys = ["g"]
            commands = [{ name = "removeKey", args = { keyName = "g" } }]
            "#,
        )
        .unwrap();
        let (records, _) = run_session(&config, session).unwrap();
        assert_eq!(records[0].commands, vec!["removeKey applied".to_string()]);
        assert!(records[0].dispatch.is_none());
    }

    #[test]
    fn unknown_key_in_session_is_an_error() {
        let config = BindingConfig::default();
        let session: Session = toml::from_str("[[frames]]\nkeys = [\"hyper\"]").unwrap();
        assert!(run_session(&config, session).is_err());
    }
}
