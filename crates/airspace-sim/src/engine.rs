//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world and the airspace map, applies
//! operator commands, runs the aircraft systems in a fixed order and produces
//! `AirspaceSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use airspace_core::commands::OperatorCommand;
use airspace_core::components::*;
use airspace_core::config::{DifficultyProfile, SimConfig};
use airspace_core::enums::{SimPhase, TurnDirection};
use airspace_core::error::SimError;
use airspace_core::events::{CollisionReport, SimEvent};
use airspace_core::map::{Airport, Airspace};
use airspace_core::route::FlightPlan;
use airspace_core::state::{AircraftView, AirspaceSnapshot, ScoreView};
use airspace_core::types::SimTime;

use crate::controls;
use crate::systems;
use crate::systems::flight_generator::GenerationClock;
use crate::systems::snapshot::SnapshotContext;
use crate::world_setup::{self, FlightSpec};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    profile: DifficultyProfile,
    airspace: Airspace,
    time: SimTime,
    phase: SimPhase,
    rng: ChaCha8Rng,
    generation: GenerationClock,
    command_queue: VecDeque<OperatorCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    score: ScoreView,
}

impl SimulationEngine {
    /// Create an engine in `Standby`. An invalid config is fatal.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        info!(
            seed = config.seed,
            difficulty = ?config.difficulty,
            tick_rate = config.tick_rate,
            "simulation engine created"
        );
        Ok(Self {
            world: World::new(),
            profile: config.profile(),
            airspace: Airspace::standard(config.airspace),
            time: SimTime::default(),
            phase: SimPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            generation: GenerationClock::primed(&config),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreView::default(),
            config,
        })
    }

    /// Queue an operator command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: OperatorCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = OperatorCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> AirspaceSnapshot {
        self.process_commands();

        let mut collision = None;
        if self.phase == SimPhase::Active {
            collision = self.run_systems();
            self.time.advance(self.dt());
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotContext {
                time: self.time,
                phase: self.phase,
                difficulty: self.config.difficulty,
                airspace: &self.airspace,
                score: &self.score,
            },
            events,
            collision,
        )
    }

    /// Put a fully specified flight into the airspace.
    pub fn spawn_flight(&mut self, spec: FlightSpec) -> Result<Entity, SimError> {
        spec.validate()?;
        if world_setup::callsign_in_use(&self.world, &spec.callsign) {
            return Err(SimError::DuplicateCallsign(spec.callsign));
        }
        let callsign = spec.callsign.clone();
        let entity = world_setup::spawn_flight(&mut self.world, &self.airspace, spec, &self.profile);
        let grounded = self
            .world
            .get::<&FlightStatus>(entity)
            .map(|status| status.is_grounded())
            .unwrap_or(false);
        debug!(%callsign, grounded, "flight spawned");
        self.events
            .push(SimEvent::FlightEntered { callsign, grounded });
        Ok(entity)
    }

    /// Current view of one aircraft.
    pub fn aircraft(&self, callsign: &str) -> Result<AircraftView, SimError> {
        systems::snapshot::build_aircraft(&self.world, &self.airspace)
            .into_iter()
            .find(|view| view.callsign == callsign)
            .ok_or_else(|| SimError::UnknownAircraft(callsign.to_string()))
    }

    pub fn airport(&self, index: usize) -> Result<&Airport, SimError> {
        self.airspace
            .airports
            .get(index)
            .ok_or(SimError::UnknownAirport(index))
    }

    /// Get the current session phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn airspace(&self) -> &Airspace {
        &self.airspace
    }

    pub fn score(&self) -> &ScoreView {
        &self.score
    }

    /// Fixed timestep (seconds).
    pub fn dt(&self) -> f64 {
        self.config.dt()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a mutable reference to the ECS world (for host-driven setups and tests).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn set_phase(&mut self, phase: SimPhase) {
        if self.phase != phase {
            info!(from = ?self.phase, to = ?phase, "phase change");
            self.phase = phase;
            self.events.push(SimEvent::PhaseChanged { phase });
        }
    }

    /// Handle a single operator command.
    fn handle_command(&mut self, command: OperatorCommand) {
        match command {
            OperatorCommand::Start => {
                if matches!(self.phase, SimPhase::Standby | SimPhase::GameOver) {
                    self.world.clear();
                    self.airspace.reset_airports();
                    self.time = SimTime::default();
                    self.score = ScoreView::default();
                    self.generation = GenerationClock::primed(&self.config);
                    self.set_phase(SimPhase::Active);
                }
            }
            OperatorCommand::Pause => {
                if self.phase == SimPhase::Active {
                    self.set_phase(SimPhase::Paused);
                }
            }
            OperatorCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.set_phase(SimPhase::Active);
                }
            }
            command => self.handle_aircraft_command(command),
        }
    }

    /// Apply a command that targets one aircraft. Only accepted while active.
    fn handle_aircraft_command(&mut self, command: OperatorCommand) {
        if self.phase != SimPhase::Active {
            debug!(?command, phase = ?self.phase, "aircraft command ignored outside active phase");
            return;
        }
        let Some(callsign) = command.callsign().map(str::to_string) else {
            return;
        };
        let Some(entity) = self.find_aircraft(&callsign) else {
            warn!(%callsign, "command for unknown aircraft");
            return;
        };

        let dt = self.dt();
        let airports = &mut self.airspace.airports;
        let Ok((kin, nav, perf, status, score, plan)) = self.world.query_one_mut::<(
            &mut Kinematics,
            &mut Navigation,
            &Performance,
            &mut FlightStatus,
            &mut FlightScore,
            &mut FlightPlan,
        )>(entity) else {
            return;
        };
        if status.is_finished() {
            debug!(%callsign, "command for finished aircraft ignored");
            return;
        }

        let accepted = match command {
            OperatorCommand::TurnLeft { .. } => {
                controls::turn(kin, nav, perf, TurnDirection::Left, dt)
            }
            OperatorCommand::TurnRight { .. } => {
                controls::turn(kin, nav, perf, TurnDirection::Right, dt)
            }
            OperatorCommand::SetAltitudeState { state, .. } => {
                controls::set_altitude_state(kin, status, state)
            }
            OperatorCommand::SetManualBearing { bearing, .. } => {
                controls::set_manual_bearing(nav, bearing)
            }
            OperatorCommand::ToggleManualControl { .. } => {
                controls::toggle_manual_control(kin, nav, status, plan, perf)
            }
            OperatorCommand::Land { .. } => {
                let accepted = controls::land(kin, nav, status, plan, airports);
                if accepted {
                    let airport = plan
                        .destination_airport
                        .and_then(|idx| airports.get(idx))
                        .map(|a| a.name.clone())
                        .unwrap_or_default();
                    info!(%callsign, %airport, "cleared to land");
                    self.events.push(SimEvent::LandingCleared {
                        callsign: callsign.clone(),
                        airport,
                    });
                }
                accepted
            }
            OperatorCommand::TakeOff { .. } => {
                let accepted = controls::take_off(status, plan, airports);
                if accepted {
                    let airport = plan
                        .origin_airport
                        .and_then(|idx| airports.get(idx))
                        .map(|a| a.name.clone())
                        .unwrap_or_default();
                    info!(%callsign, %airport, "cleared for takeoff");
                    self.events.push(SimEvent::TakeOffCleared {
                        callsign: callsign.clone(),
                        airport,
                    });
                }
                accepted
            }
            OperatorCommand::AlterPath {
                stage, waypoint, ..
            } => {
                let name = waypoint.name.clone();
                let accepted = controls::alter_path(kin, nav, plan, score, perf, stage, waypoint);
                if accepted {
                    self.events.push(SimEvent::PathAltered {
                        callsign: callsign.clone(),
                        stage,
                        waypoint: name,
                        score: score.points,
                    });
                }
                accepted
            }
            OperatorCommand::Start | OperatorCommand::Pause | OperatorCommand::Resume => false,
        };

        if !accepted {
            debug!(%callsign, "command rejected");
        }
    }

    fn find_aircraft(&self, callsign: &str) -> Option<Entity> {
        self.world
            .query::<&FlightIdentity>()
            .iter()
            .find(|(_, identity)| identity.callsign == callsign)
            .map(|(entity, _)| entity)
    }

    /// Run all systems in order. Returns the collision resolved this tick, if any.
    fn run_systems(&mut self) -> Option<CollisionReport> {
        let dt = self.dt();

        // 1. Flight generation
        if self.config.auto_generate_flights {
            systems::flight_generator::run(
                &mut self.world,
                &self.airspace,
                &mut self.rng,
                &mut self.generation,
                &self.config,
                dt,
                &mut self.events,
            );
        }
        // 2. Vertical rates (band transitions, landing descent)
        systems::altitude::command(&mut self.world);
        // 3. Movement integration
        systems::movement::run(&mut self.world, dt);
        // 4. Band settle and touchdown
        systems::altitude::settle(&mut self.world, &mut self.airspace.airports);
        // 5. Departure release
        systems::departure::run(&mut self.world, &mut self.airspace.airports);
        // 6. Arrival and route advance
        systems::arrival::run(&mut self.world, &self.airspace.airports);
        // 7. Steering
        systems::steering::run(&mut self.world, dt);
        // 8. Separation and collisions, strictly after all motion
        let separation =
            systems::separation::run(&mut self.world, self.profile.min_separation);
        if !separation.newly_warned.is_empty() {
            debug!(callsigns = ?separation.newly_warned, "separation warning");
            self.events.push(SimEvent::SeparationWarning {
                callsigns: separation.newly_warned,
            });
        }
        if let Some(report) = &separation.collision {
            warn!(first = %report.first, second = %report.second, "collision");
            self.score.collisions += 1;
            self.events.push(SimEvent::Collision {
                first: report.first.clone(),
                second: report.second.clone(),
            });
        }
        // 9. Cleanup
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.score,
            &mut self.events,
        );

        if separation.collision.is_some() {
            self.set_phase(SimPhase::GameOver);
        }
        separation.collision
    }
}
