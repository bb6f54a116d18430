//! Per-frame binding resolution
//!
//! At most one binding fires per frame. Key bindings are checked first, in
//! assignment order; mouse bindings after them, left, right, then middle.
//! Key bindings whose name has no physical key (stale save data) never fire.

use crate::input::InputSource;
use crate::registry::{BindingRegistry, BindingSource};
use bindery_core::{Action, KeyCodeTable, KeyName, MouseButton, TriggerCondition};

/// Whether a key binding's trigger predicate holds this frame
pub fn key_fires(input: &dyn InputSource, name: &KeyName, trigger: TriggerCondition) -> bool {
    match trigger {
        TriggerCondition::Triggered => input.is_triggered(name.as_str()),
        TriggerCondition::Pressed => input.is_pressed(name.as_str()),
        TriggerCondition::Repeated => input.is_repeated(name.as_str()),
    }
}

/// Whether a mouse binding's trigger predicate holds this frame.
///
/// Right-button `Triggered` means the cancel gesture and anything else means
/// held. The middle button has no edge tracking and always reads as held,
/// whatever trigger was configured.
pub fn mouse_fires(input: &dyn InputSource, button: MouseButton, trigger: TriggerCondition) -> bool {
    match (button, trigger) {
        (MouseButton::Left, TriggerCondition::Triggered) => input.is_mouse_triggered(),
        (MouseButton::Left, TriggerCondition::Pressed) => input.is_mouse_pressed(),
        (MouseButton::Left, TriggerCondition::Repeated) => input.is_mouse_repeated(),
        (MouseButton::Right, TriggerCondition::Triggered) => input.is_cancelled(),
        (MouseButton::Right, _) => input.is_right_pressed(),
        (MouseButton::Middle, _) => input.is_middle_pressed(),
    }
}

/// Find the single binding that fires this frame, if any.
pub fn resolve<'r>(
    registry: &'r BindingRegistry,
    input: &dyn InputSource,
) -> Option<(BindingSource, &'r Action)> {
    let table = KeyCodeTable::standard();
    if let Some((name, action)) = registry
        .key_bindings()
        .filter(|(name, _)| table.code_of(name).is_some())
        .find(|(name, action)| key_fires(input, name, action.trigger))
    {
        return Some((BindingSource::Key(name.clone()), action));
    }

    MouseButton::RESOLUTION_ORDER.iter().find_map(|&button| {
        registry
            .mouse_binding(button)
            .filter(|action| mouse_fires(input, button, action.trigger))
            .map(|action| (BindingSource::Mouse(button), action))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::keymap::{DefaultBindingSnapshot, KeyMapper};
    use bindery_core::KeyCode;

    struct Setup {
        snapshot: DefaultBindingSnapshot,
        registry: BindingRegistry,
    }

    impl Setup {
        fn new() -> Self {
            Self {
                snapshot: DefaultBindingSnapshot::capture(&KeyMapper::factory()),
                registry: BindingRegistry::new(),
            }
        }

        fn bind(&mut self, name: &str, action: Action) {
            self.registry.assign_key(name, action, true, &self.snapshot).unwrap();
        }

        fn input(&self, keys: &[u32], buttons: &[MouseButton]) -> InputState {
            let mut input = InputState::new();
            for &code in keys {
                input.process_key_down(KeyCode(code));
            }
            for &button in buttons {
                input.process_mouse_button_down(button);
            }
            input.update(&self.registry.live_table(&self.snapshot));
            input
        }
    }

    fn fired(hit: Option<(BindingSource, &Action)>) -> Option<BindingSource> {
        hit.map(|(source, _)| source)
    }

    #[test]
    fn every_table_key_dispatches_its_action() {
        for (name, code) in bindery_core::KeyCodeTable::standard().entries() {
            let mut setup = Setup::new();
            let action = Action::common_event(code.raw(), false);
            setup.bind(name, action.clone());

            let input = setup.input(&[code.raw()], &[]);
            let (source, hit) = resolve(&setup.registry, &input).unwrap();
            assert_eq!(source.to_string(), format!("key:{}", name));
            assert_eq!(hit, &action);
        }
    }

    #[test]
    fn first_key_in_assignment_order_wins() {
        let mut setup = Setup::new();
        setup.bind("g", Action::common_event(1, false).with_trigger(TriggerCondition::Pressed));
        setup.bind("h", Action::common_event(2, false).with_trigger(TriggerCondition::Pressed));

        let input = setup.input(&[72, 71], &[]);
        let (_, action) = resolve(&setup.registry, &input).unwrap();
        assert_eq!(action, &Action::common_event(1, false).with_trigger(TriggerCondition::Pressed));
    }

    #[test]
    fn keys_take_priority_over_mouse() {
        let mut setup = Setup::new();
        setup.bind("g", Action::common_event(1, false));
        setup
            .registry
            .assign_mouse(MouseButton::Left, Action::common_event(2, false), true);

        let input = setup.input(&[71], &[MouseButton::Left]);
        let source = fired(resolve(&setup.registry, &input));
        assert!(matches!(source, Some(BindingSource::Key(_))));

        let input = setup.input(&[], &[MouseButton::Left]);
        let source = fired(resolve(&setup.registry, &input));
        assert_eq!(source, Some(BindingSource::Mouse(MouseButton::Left)));
    }

    #[test]
    fn mouse_order_is_left_right_middle() {
        let mut setup = Setup::new();
        let pressed = |id| Action::common_event(id, false).with_trigger(TriggerCondition::Pressed);
        setup.registry.assign_mouse(MouseButton::Middle, pressed(3), true);
        setup.registry.assign_mouse(MouseButton::Right, pressed(2), true);

        let input = setup.input(&[], &[MouseButton::Middle, MouseButton::Right]);
        let source = fired(resolve(&setup.registry, &input));
        assert_eq!(source, Some(BindingSource::Mouse(MouseButton::Right)));
    }

    #[test]
    fn right_triggered_means_cancel_gesture() {
        let mut setup = Setup::new();
        setup
            .registry
            .assign_mouse(MouseButton::Right, Action::common_event(2, false), true);

        let mut input = setup.input(&[], &[MouseButton::Right]);
        assert!(fired(resolve(&setup.registry, &input)).is_some());

        // Still held next frame, but the cancel edge is gone
        input.update(&KeyMapper::factory());
        assert!(fired(resolve(&setup.registry, &input)).is_none());
    }

    #[test]
    fn middle_ignores_configured_trigger() {
        let mut setup = Setup::new();
        setup
            .registry
            .assign_mouse(MouseButton::Middle, Action::common_event(3, false), true);

        let mut input = setup.input(&[], &[MouseButton::Middle]);
        input.update(&KeyMapper::factory());
        input.update(&KeyMapper::factory());
        // Configured as Triggered, yet fires on every held frame
        assert_eq!(
            fired(resolve(&setup.registry, &input)),
            Some(BindingSource::Mouse(MouseButton::Middle))
        );
    }

    #[test]
    fn protected_default_key_does_not_fire_custom_action() {
        let mut setup = Setup::new();
        setup
            .registry
            .assign_key("q", Action::common_event(1, false), false, &setup.snapshot)
            .unwrap();
        let input = setup.input(&[81], &[]);
        assert!(resolve(&setup.registry, &input).is_none());
        assert!(input.is_triggered("pageup"));
    }

    #[test]
    fn saved_binding_without_physical_key_never_fires() {
        let setup = Setup::new();
        let registry: BindingRegistry = toml::from_str(
            r#"
            [key_binds.ok]
            kind = { type = "common_event", id = 7 }
            "#,
        )
        .unwrap();

        // Z is a factory "ok" key
        let mut input = InputState::new();
        input.process_key_down(KeyCode(90));
        input.update(&registry.live_table(&setup.snapshot));
        assert!(input.is_triggered("ok"));
        assert!(resolve(&registry, &input).is_none());
    }

    #[test]
    fn triggered_fires_once_while_held() {
        let mut setup = Setup::new();
        setup.bind("g", Action::common_event(1, false));
        let mapper = setup.registry.live_table(&setup.snapshot);

        let mut input = setup.input(&[71], &[]);
        assert!(resolve(&setup.registry, &input).is_some());
        input.update(&mapper);
        assert!(resolve(&setup.registry, &input).is_none());
    }
}
