//! Binding commands issued by the host's event scripts
//!
//! Commands arrive as a name plus string arguments; the `action` argument is a
//! JSON-encoded [`ActionConfig`]. Flags compare against the literal `"true"`,
//! so a missing flag reads as off.

use crate::config::ActionConfig;
use bindery_core::{Action, BindError, MouseButton, Result};
use std::collections::HashMap;

/// A parsed binding command
#[derive(Debug, Clone, PartialEq)]
pub enum BindCommand {
    AssignKey {
        key: String,
        action: Action,
        overwrite: bool,
    },
    RemoveKey {
        key: String,
        restore_default: bool,
    },
    AssignMouse {
        button: MouseButton,
        action: Action,
        overwrite: bool,
    },
    RemoveMouse {
        button: MouseButton,
    },
}

fn arg<'a>(args: &'a HashMap<String, String>, name: &str) -> Result<&'a str> {
    args.get(name)
        .map(|s| s.as_str())
        .ok_or_else(|| BindError::MissingArgument(name.to_string()))
}

fn flag(args: &HashMap<String, String>, name: &str) -> bool {
    args.get(name).is_some_and(|v| v == "true")
}

fn action_arg(args: &HashMap<String, String>) -> Result<Action> {
    ActionConfig::from_json(arg(args, "action")?)?.into_action()
}

impl BindCommand {
    /// Parse a command by name (`assignKey`, `removeKey`, `assignMouse`, `removeMouse`).
    pub fn parse(name: &str, args: &HashMap<String, String>) -> Result<Self> {
        match name {
            "assignKey" => Ok(BindCommand::AssignKey {
                key: arg(args, "keyName")?.to_string(),
                action: action_arg(args)?,
                overwrite: flag(args, "overwrite"),
            }),
            "removeKey" => Ok(BindCommand::RemoveKey {
                key: arg(args, "keyName")?.to_string(),
                restore_default: flag(args, "restoreDefault"),
            }),
            "assignMouse" => Ok(BindCommand::AssignMouse {
                button: arg(args, "mouseButton")?.parse()?,
                action: action_arg(args)?,
                overwrite: flag(args, "overwrite"),
            }),
            "removeMouse" => Ok(BindCommand::RemoveMouse {
                button: arg(args, "mouseButton")?.parse()?,
            }),
            other => Err(BindError::UnknownCommand(other.to_string())),
        }
    }
}
