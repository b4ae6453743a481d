use crate::animation::action::AnimationAction;
use crate::scene::Scene;

/// Drives a set of actions against one scene.
///
/// `time` is the mixer's global clock: it keeps accumulating across loops,
/// while each action wraps its own local time.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
    time: f32,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action and returns its index.
    pub fn add_action(&mut self, action: AnimationAction) -> usize {
        self.actions.push(action);
        self.actions.len() - 1
    }

    #[must_use]
    pub fn action(&self, index: usize) -> Option<&AnimationAction> {
        self.actions.get(index)
    }

    /// Global mixer time in seconds.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advances all actions by `dt` and poses the scene.
    pub fn advance(&mut self, dt: f32, scene: &mut Scene) {
        self.time += dt;
        for action in &mut self.actions {
            action.update(dt);
            action.apply(scene);
        }
    }

    /// Sets the global time and every action's local time to `time`, then
    /// poses the scene. Paused actions are moved too.
    pub fn set_time(&mut self, time: f32, scene: &mut Scene) {
        self.time = time;
        for action in &mut self.actions {
            action.set_time(time);
            action.apply(scene);
        }
    }

    /// Pauses or resumes every action.
    pub fn set_paused(&mut self, paused: bool) {
        for action in &mut self.actions {
            action.paused = paused;
        }
    }
}
