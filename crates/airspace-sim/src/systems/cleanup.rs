//! Cleanup system: removes aircraft that finished their flight and credits
//! their score. Collided aircraft stay frozen in the world for the host.

use hecs::{Entity, World};
use tracing::{debug, info};

use airspace_core::components::{FlightIdentity, FlightScore, FlightStatus};
use airspace_core::enums::FlightOutcome;
use airspace_core::events::SimEvent;
use airspace_core::state::ScoreView;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    score: &mut ScoreView,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    for (entity, (identity, status, flight_score)) in
        world.query_mut::<(&FlightIdentity, &FlightStatus, &FlightScore)>()
    {
        let Some(outcome) = status.outcome else {
            continue;
        };
        if outcome == FlightOutcome::Collided {
            continue;
        }
        score.total += i64::from(flight_score.points);
        score.flights_completed += 1;
        info!(
            callsign = %identity.callsign,
            ?outcome,
            score = flight_score.points,
            "flight completed"
        );
        events.push(SimEvent::FlightCompleted {
            callsign: identity.callsign.clone(),
            outcome,
            score: flight_score.points,
        });
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        if let Err(err) = world.despawn(entity) {
            debug!(?entity, %err, "finished aircraft already despawned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_with(world: &mut World, callsign: &str, outcome: Option<FlightOutcome>) -> Entity {
        world.spawn((
            FlightIdentity {
                callsign: callsign.into(),
                carrier: "Doge Air".into(),
            },
            FlightStatus {
                outcome,
                ..Default::default()
            },
            FlightScore { points: 150 },
        ))
    }

    #[test]
    fn test_finished_aircraft_removed_once() {
        let mut world = World::new();
        let exited = spawn_with(&mut world, "DG001", Some(FlightOutcome::Exited));
        let collided = spawn_with(&mut world, "DG002", Some(FlightOutcome::Collided));
        let flying = spawn_with(&mut world, "DG003", None);

        let mut buffer = Vec::new();
        let mut score = ScoreView::default();
        let mut events = Vec::new();
        run(&mut world, &mut buffer, &mut score, &mut events);

        assert!(!world.contains(exited));
        assert!(world.contains(collided));
        assert!(world.contains(flying));
        assert_eq!(score.flights_completed, 1);
        assert_eq!(score.total, 150);
        assert_eq!(events.len(), 1);
        assert!(buffer.is_empty());

        // A second pass finds nothing left to credit.
        events.clear();
        run(&mut world, &mut buffer, &mut score, &mut events);
        assert_eq!(score.flights_completed, 1);
        assert_eq!(score.total, 150);
        assert!(events.is_empty());
    }

    #[test]
    fn test_stale_buffer_entries_are_discarded() {
        let mut world = World::new();
        let gone = spawn_with(&mut world, "DG004", None);
        world.despawn(gone).unwrap();

        let mut buffer = vec![gone];
        let mut score = ScoreView::default();
        let mut events = Vec::new();
        run(&mut world, &mut buffer, &mut score, &mut events);

        assert!(buffer.is_empty());
        assert_eq!(score.flights_completed, 0);
        assert!(events.is_empty());
    }
}
