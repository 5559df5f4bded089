use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// Trigger / touchpad click.
    Grab,
    /// Touch-surface position, `[-1, 1]` on both axes.
    #[actionlike(DualAxis)]
    Touch,
    ToggleMode,
    /// Cycle the active controller: right hand, left hand, head.
    SwitchHand,
    #[actionlike(DualAxis)]
    Look,
    #[actionlike(DualAxis)]
    Move,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<PointerAction>::default());

    app.register_type::<PointerAction>();

    let input_map = InputMap::<PointerAction>::default()
        .with(PointerAction::Grab, MouseButton::Left)
        .with(PointerAction::Grab, GamepadButton::RightTrigger2)
        .with_dual_axis(PointerAction::Touch, VirtualDPad::arrow_keys())
        .with_dual_axis(PointerAction::Touch, GamepadStick::RIGHT)
        .with(PointerAction::ToggleMode, KeyCode::Tab)
        .with(PointerAction::ToggleMode, GamepadButton::North)
        .with(PointerAction::SwitchHand, KeyCode::KeyH)
        .with(PointerAction::SwitchHand, GamepadButton::West)
        .with_dual_axis(PointerAction::Look, MouseMove::default())
        .with_dual_axis(PointerAction::Move, VirtualDPad::wasd())
        .with_dual_axis(PointerAction::Move, GamepadStick::LEFT);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<PointerAction>::default());
}
