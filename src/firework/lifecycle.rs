// Firework lifecycle: Spawned -> Animating -> Destroyed
use bevy::prelude::*;
use super::material::FireworkMaterial;

/// Linear time-based interpolation of the progress uniform from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireworkTween {
    elapsed: f32,
    duration: f32,
}

impl FireworkTween {
    pub fn new(duration: f32) -> Self {
        Self { elapsed: 0.0, duration }
    }

    /// Moves the tween forward. Negative deltas are ignored so progress never goes back.
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.elapsed = (self.elapsed + delta.max(0.0)).min(self.duration);
        self.progress()
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireworkState {
    Spawned,
    Animating,
    Destroyed,
}

/// Outcome of one frame of a firework's lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireworkStep {
    /// Still animating; write this progress into the material
    Progress(f32),
    /// Progress reached 1 this frame; tear the firework down
    Complete,
    /// Already destroyed; nothing to do
    Idle,
}

/// Live firework burst. The entity also carries its `Mesh3d` and `MeshMaterial3d<FireworkMaterial>`.
#[derive(Component, Debug)]
pub struct Firework {
    pub state: FireworkState,
    pub tween: FireworkTween,
    pub particle_count: usize,
}

impl Firework {
    pub fn new(particle_count: usize, duration: f32) -> Self {
        Self {
            state: FireworkState::Spawned,
            tween: FireworkTween::new(duration),
            particle_count,
        }
    }

    /// The first tick only starts the tween, so a firework gets its full duration
    /// counted from the frame after it spawned.
    pub fn tick(&mut self, delta: f32) -> FireworkStep {
        match self.state {
            FireworkState::Spawned => {
                self.state = FireworkState::Animating;
                FireworkStep::Progress(self.tween.progress())
            }
            FireworkState::Animating => {
                let progress = self.tween.advance(delta);
                if self.tween.finished() {
                    self.state = FireworkState::Destroyed;
                    FireworkStep::Complete
                } else {
                    FireworkStep::Progress(progress)
                }
            }
            FireworkState::Destroyed => FireworkStep::Idle,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state != FireworkState::Destroyed
    }
}

/// Advances every firework's tween by the frame delta and tears down finished ones.
/// Mesh and material assets are released with the entity; the texture is shared and stays.
pub fn animate_fireworks(
    mut commands: Commands,
    time: Res<Time>,
    mut firework_query: Query<(Entity, &mut Firework, &Mesh3d, &MeshMaterial3d<FireworkMaterial>)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<FireworkMaterial>>,
) {
    let delta = time.delta_secs();

    for (entity, mut firework, mesh, material) in firework_query.iter_mut() {
        match firework.tick(delta) {
            FireworkStep::Progress(progress) => {
                if let Some(material) = materials.get_mut(&material.0) {
                    material.progress = progress;
                }
            }
            FireworkStep::Complete => {
                commands.entity(entity).despawn();
                meshes.remove(&mesh.0);
                materials.remove(&material.0);
                debug!("🎆 Firework {:?} finished after {:.2}s ({} particles)",
                       entity, firework.tween.elapsed(), firework.particle_count);
            }
            FireworkStep::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_is_linear_and_clamped() {
        let mut tween = FireworkTween::new(3.0);
        assert_eq!(tween.progress(), 0.0);
        assert_eq!(tween.advance(0.75), 0.25);
        assert_eq!(tween.advance(0.75), 0.5);
        assert_eq!(tween.advance(10.0), 1.0);
        assert!(tween.finished());
        assert_eq!(tween.elapsed(), 3.0);
    }

    #[test]
    fn test_tween_ignores_negative_delta() {
        let mut tween = FireworkTween::new(3.0);
        tween.advance(1.5);
        assert_eq!(tween.advance(-1.0), 0.5);
    }

    #[test]
    fn test_zero_duration_tween_is_complete() {
        let tween = FireworkTween::new(0.0);
        assert_eq!(tween.progress(), 1.0);
        assert!(tween.finished());
    }

    #[test]
    fn test_state_machine_runs_once() {
        let mut firework = Firework::new(500, 3.0);
        assert_eq!(firework.state, FireworkState::Spawned);

        // Spawn frame starts the tween without consuming time
        assert_eq!(firework.tick(0.5), FireworkStep::Progress(0.0));
        assert_eq!(firework.state, FireworkState::Animating);

        let mut last = 0.0;
        let mut completions = 0;
        for _ in 0..20 {
            match firework.tick(0.25) {
                FireworkStep::Progress(p) => {
                    assert!(p >= last, "progress went backwards: {} -> {}", last, p);
                    assert!(p < 1.0);
                    last = p;
                }
                FireworkStep::Complete => completions += 1,
                FireworkStep::Idle => {}
            }
        }

        assert_eq!(completions, 1);
        assert_eq!(firework.state, FireworkState::Destroyed);
        assert!(!firework.is_live());
        assert_eq!(firework.tick(1.0), FireworkStep::Idle);
    }

    #[test]
    fn test_completes_exactly_at_duration() {
        let mut firework = Firework::new(10, 3.0);
        firework.tick(0.0);
        for _ in 0..11 {
            assert!(matches!(firework.tick(0.25), FireworkStep::Progress(_)));
        }
        assert_eq!(firework.tween.elapsed(), 2.75);
        assert_eq!(firework.tick(0.25), FireworkStep::Complete);
    }
}
