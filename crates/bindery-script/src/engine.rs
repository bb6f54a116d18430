//! RhaiScriptRunner: Rhai engine setup and the script-call entry point
//!
//! Wraps rhai::Engine with the game API registered. Each call runs in a fresh
//! Scope holding the `a`/`p`/`s`/`v` handles and the `source` of the binding.

use crate::api::{self, Actors, Party, Switches, Variables};
use crate::context::{lock, GameData, ScriptCallContext, SharedContext};
use bindery_core::{BindError, Result};
use bindery_runtime::{ScriptContext, ScriptRunner};
use rhai::{Engine, Scope, AST};
use std::sync::{Arc, Mutex};

/// Operation budget for one call; a script that exceeds it faults instead of hanging the frame
pub const DEFAULT_MAX_OPERATIONS: u64 = 100_000;

pub struct RhaiScriptRunner {
    engine: Engine,
    ctx: SharedContext,
}

impl Default for RhaiScriptRunner {
    fn default() -> Self {
        Self::new(GameData::default())
    }
}

impl RhaiScriptRunner {
    pub fn new(data: GameData) -> Self {
        let ctx = Arc::new(Mutex::new(ScriptCallContext { data, source: None }));
        let mut engine = Engine::new();
        engine.set_max_operations(DEFAULT_MAX_OPERATIONS);
        api::register_all(&mut engine);

        Self { engine, ctx }
    }

    pub fn with_max_operations(mut self, limit: u64) -> Self {
        self.engine.set_max_operations(limit);
        self
    }

    /// Handle to the shared game data, for hosts that keep it in sync
    pub fn context(&self) -> SharedContext {
        self.ctx.clone()
    }

    /// Copy of the current game data
    pub fn data(&self) -> GameData {
        lock(&self.ctx).data.clone()
    }

    /// Compile a script, reporting syntax errors as faults
    pub fn compile(&self, code: &str) -> Result<AST> {
        self.engine
            .compile(code)
            .map_err(|e| BindError::ScriptFault(e.to_string()))
    }

    fn scope(&self, source: Option<String>) -> Scope<'static> {
        let mut scope = Scope::new();
        scope.push("a", Actors(self.ctx.clone()));
        scope.push("p", Party(self.ctx.clone()));
        scope.push("s", Switches(self.ctx.clone()));
        scope.push("v", Variables(self.ctx.clone()));
        scope.push_constant("source", source.unwrap_or_default());
        scope
    }
}

impl ScriptRunner for RhaiScriptRunner {
    fn run_script(&mut self, code: &str, ctx: &ScriptContext) -> Result<()> {
        let source = ctx.source.as_ref().map(|s| s.to_string());
        lock(&self.ctx).source = source.clone();

        let ast = self.compile(code)?;
        let mut scope = self.scope(source);
        let result = self.engine.run_ast_with_scope(&mut scope, &ast);

        lock(&self.ctx).source = None;
        result.map_err(|e| BindError::ScriptFault(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ActorData;
    use bindery_core::{KeyCodeTable, MouseButton};
    use bindery_runtime::BindingSource;

    fn data() -> GameData {
        let mut data = GameData::default();
        data.actors.insert(
            1,
            ActorData {
                name: "Reid".into(),
                level: 5,
            },
        );
        data.party.gold = 100;
        data.party.members = vec![1];
        data
    }

    fn run(runner: &mut RhaiScriptRunner, code: &str) -> Result<()> {
        runner.run_script(code, &ScriptContext::default())
    }

    #[test]
    fn switches_and_variables() {
        let mut runner = RhaiScriptRunner::new(data());
        run(&mut runner, "s[3] = !s[3]; v[1] += 2; v[2] = v[1] * 10;").unwrap();
        let d = runner.data();
        assert!(d.switch(3));
        assert_eq!(d.variable(1), 2);
        assert_eq!(d.variable(2), 20);

        run(&mut runner, "s[3] = !s[3];").unwrap();
        assert!(!runner.data().switch(3));
    }

    #[test]
    fn actors_and_party() {
        let mut runner = RhaiScriptRunner::new(data());
        run(
            &mut runner,
            r#"
                if a.name(1) == "Reid" { a.change_level(1, a.level(1) + 1); }
                p.gain_gold(p.size * 50);
                v[1] = p.members[0];
            "#,
        )
        .unwrap();
        let d = runner.data();
        assert_eq!(d.actors[&1].level, 6);
        assert_eq!(d.party.gold, 150);
        assert_eq!(d.variable(1), 1);

        run(&mut runner, "p.gain_gold(-1000);").unwrap();
        assert_eq!(runner.data().party.gold, 0);
    }

    #[test]
    fn source_names_the_binding() {
        let mut runner = RhaiScriptRunner::new(data());
        let ctx = ScriptContext {
            source: Some(BindingSource::Key(KeyCodeTable::standard().resolve("q").unwrap().0)),
        };
        runner
            .run_script(r#"if source == "key:q" { v[9] = 1; }"#, &ctx)
            .unwrap();
        assert_eq!(runner.data().variable(9), 1);

        let ctx = ScriptContext {
            source: Some(BindingSource::Mouse(MouseButton::Middle)),
        };
        runner
            .run_script(r#"if source == "mouse:middle" { v[9] = 2; }"#, &ctx)
            .unwrap();
        assert_eq!(runner.data().variable(9), 2);
    }

    #[test]
    fn faults_are_errors_not_panics() {
        let mut runner = RhaiScriptRunner::new(data());
        assert!(matches!(run(&mut runner, "let x = ;"), Err(BindError::ScriptFault(_))));
        assert!(matches!(run(&mut runner, "a.name(42)"), Err(BindError::ScriptFault(_))));
        assert!(matches!(run(&mut runner, "undefined_fn()"), Err(BindError::ScriptFault(_))));
    }

    #[test]
    fn runaway_script_hits_the_operation_limit() {
        let mut runner = RhaiScriptRunner::new(data()).with_max_operations(1_000);
        let result = run(&mut runner, "loop { v[1] += 1; }");
        assert!(matches!(result, Err(BindError::ScriptFault(_))));
        // Work done before the limit stays applied
        assert!(runner.data().variable(1) > 0);
    }
}
