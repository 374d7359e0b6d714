//! Flight generation: introduces a new aircraft every generation interval
//! while the airspace is below its aircraft limit.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use airspace_core::components::{FlightIdentity, FlightStatus};
use airspace_core::config::SimConfig;
use airspace_core::events::SimEvent;
use airspace_core::map::Airspace;

use crate::world_setup;

/// Time accumulated toward the next generation attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationClock {
    pub elapsed_secs: f64,
}

impl GenerationClock {
    /// A clock that fires on the very next tick.
    pub fn primed(config: &SimConfig) -> Self {
        Self {
            elapsed_secs: config.generation_interval_secs(),
        }
    }
}

/// Aircraft still in play, grounded ones included.
pub fn live_aircraft(world: &World) -> usize {
    world
        .query::<(&FlightIdentity, &FlightStatus)>()
        .iter()
        .filter(|(_, (_, status))| !status.is_finished())
        .count()
}

/// Advance the clock by `dt` and make at most one generation attempt per
/// elapsed interval.
pub fn run(
    world: &mut World,
    airspace: &Airspace,
    rng: &mut ChaCha8Rng,
    clock: &mut GenerationClock,
    config: &SimConfig,
    dt: f64,
    events: &mut Vec<SimEvent>,
) {
    let interval = config.generation_interval_secs();
    clock.elapsed_secs += dt;
    if clock.elapsed_secs < interval {
        return;
    }
    clock.elapsed_secs -= interval;

    if live_aircraft(world) >= config.max_aircraft {
        return;
    }
    let Some(spec) = world_setup::generate_flight(world, airspace, rng) else {
        debug!("no fair spawn point available, skipping generation");
        return;
    };

    let callsign = spec.callsign.clone();
    let entity = world_setup::spawn_flight(world, airspace, spec, &config.profile());
    let grounded = world
        .get::<&FlightStatus>(entity)
        .map(|status| status.is_grounded())
        .unwrap_or(false);
    debug!(%callsign, grounded, "flight generated");
    events.push(SimEvent::FlightEntered { callsign, grounded });
}
