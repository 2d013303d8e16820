use glam::Vec2;

use super::{Entity, Role, UpdateContext};
use crate::settings::{MAX_ACTION_QUEUE_LENGTH, PLAYER_ROTATION_SPEED};

/// What the player does to the next NPC it touches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Consume,
    Destroy,
    Throw,
}

impl Action {
    const ALL: [Action; 3] = [Action::Consume, Action::Destroy, Action::Throw];
}

/// Power gained from the last consumed NPC.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EatenPower {
    #[default]
    EmptyStomach,
    BasicSkeleton,
    Damsel,
}

/// Turn input for one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Steer {
    #[default]
    Straight,
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct PlayerState {
    /// Used as a stack: the next action is the last element.
    actions: Vec<Action>,
    eaten_power: EatenPower,
    seed: u64,
}

impl PlayerState {
    pub fn new(seed: u64) -> Self {
        Self { actions: Vec::with_capacity(MAX_ACTION_QUEUE_LENGTH), eaten_power: EatenPower::default(), seed }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn current_action(&self) -> Option<Action> {
        self.actions.last().copied()
    }

    pub fn pop_next_action(&mut self) -> Option<Action> {
        self.actions.pop()
    }

    /// Queue `action` as the next one, ignoring the limit.
    pub fn push_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Top the queue up by one random action if it is below the limit.
    pub fn ensure_full_action_queue(&mut self) {
        if self.actions.len() < MAX_ACTION_QUEUE_LENGTH {
            let pick = (self.next_rand() % Action::ALL.len() as u64) as usize;
            self.actions.push(Action::ALL[pick]);
        }
    }

    pub fn eaten_power(&self) -> EatenPower {
        self.eaten_power
    }

    pub fn set_eaten_power(&mut self, power: EatenPower) {
        self.eaten_power = power;
    }

    fn next_rand(&mut self) -> u64 {
        self.seed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.seed >> 33
    }
}

/// Rotate a heading by `degrees` (positive turns clockwise on screen).
pub fn rotate_compass(compass: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(compass)
}

pub(super) fn update(entity: &mut Entity, ctx: &UpdateContext<'_>) {
    let Role::Player(state) = &mut entity.role else { return };
    let body = &mut entity.body;

    match ctx.steer {
        Steer::Left => body.compass = rotate_compass(body.compass, -PLAYER_ROTATION_SPEED),
        Steer::Right => body.compass = rotate_compass(body.compass, PLAYER_ROTATION_SPEED),
        Steer::Straight => {}
    }

    state.ensure_full_action_queue();
    body.update_facing();
    body.animate();
    body.collide_with_obstacles(ctx.obstacles);
    body.move_by_compass(body.speed);
}
