#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use crate::commands::OperatorCommand;
    use crate::components::*;
    use crate::config::*;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::SimEvent;
    use crate::map::{Airport, Airspace, Waypoint};
    use crate::state::AirspaceSnapshot;
    use crate::types::{Rect, SimTime, Vector3};

    // ---- Vector3 ----

    #[test]
    fn test_normalize_zero_vector_is_zero() {
        assert_eq!(Vector3::ZERO.normalize(), Vector3::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Vector3::new(3.0, 4.0, 0.0).normalize();
        assert!((v.magnitude() - 1.0).abs() < 1e-12);
        assert!((v.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_distance_includes_altitude() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(3.0, 4.0, 12.0);
        assert_eq!(a.distance_squared(b), 169.0);
        assert_eq!(a.horizontal_distance_squared(b), 25.0);
    }

    #[test]
    fn test_rotate_preserves_length_and_z() {
        let v = Vector3::new(30.0, 40.0, 500.0);
        let r = v.rotate_xy(1.234);
        assert!((r.with_z(0.0).magnitude() - 50.0).abs() < 1e-9);
        assert_eq!(r.z, 500.0);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let r = Vector3::new(1.0, 0.0, 0.0).rotate_xy(PI / 2.0);
        assert!(r.x.abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bearing_to() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        assert!((a.bearing_to(Vector3::new(0.0, 10.0, 0.0)) - PI / 2.0).abs() < 1e-12);
    }

    // ---- Rect / SimTime ----

    #[test]
    fn test_rect_contains_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(Vector3::new(10.0, 5.0, 99.0)));
        assert!(!r.contains(Vector3::new(10.1, 5.0, 0.0)));
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        t.advance(0.5);
        t.advance(0.5);
        assert_eq!(t.tick, 2);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-12);
    }

    // ---- Config ----

    #[test]
    fn test_difficulty_profiles() {
        let easy = Difficulty::Easy.profile();
        assert_eq!(easy.min_separation, 64.0);
        assert_eq!(easy.vertical_speed, 500.0);
        let medium = Difficulty::Medium.profile();
        assert_eq!(medium.min_separation, 96.0);
        assert_eq!(medium.speed_multiplier, 2.0);
        let hard = Difficulty::Hard.profile();
        assert_eq!(hard.min_separation, 128.0);
        assert!((hard.turn_speed - PI / 2.0).abs() < 1e-12);
        assert_eq!(hard.vertical_speed, 200.0);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!(matches!(
            "nightmare".parse::<Difficulty>(),
            Err(ConfigError::InvalidDifficulty(_))
        ));
        assert_eq!(Difficulty::try_from(2u8).unwrap(), Difficulty::Hard);
        assert!(Difficulty::try_from(3u8).is_err());
    }

    #[test]
    fn test_config_defaults_validate() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.dt() - 1.0 / 60.0).abs() < 1e-12);
        // 30 / (5 * 1)
        assert!((config.generation_interval_secs() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let mut config = SimConfig {
            tick_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTickRate(_))
        ));
        config.tick_rate = 60.0;
        config.max_aircraft = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMaxAircraft)
        ));
        config.max_aircraft = 3;
        config.airspace.width = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidAirspace)));
    }

    #[test]
    fn test_config_from_json() {
        let config = SimConfig::from_json_str(r#"{"seed": 7, "difficulty": "Hard"}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.max_aircraft, 5, "missing fields use defaults");
    }

    #[test]
    fn test_config_from_json_invalid_difficulty_is_fatal() {
        let err = SimConfig::from_json_str(r#"{"difficulty": "impossible"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDifficulty(ref s) if s == "impossible"));
    }

    #[test]
    fn test_config_from_json_malformed() {
        assert!(matches!(
            SimConfig::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    // ---- Map ----

    #[test]
    fn test_standard_map_layout() {
        let map = Airspace::standard(AirspaceBounds::default());
        assert_eq!(map.entry_points.len(), 4);
        assert!(map.entry_points.iter().all(|w| w.entry_or_exit));
        assert_eq!(map.waypoints.len(), AIRSPACE_WAYPOINTS.len());
        assert!(map.waypoints.iter().all(|w| !w.entry_or_exit));
        assert_eq!(map.airports.len(), 2);
        assert_eq!(map.entry_points[3].location, Vector3::new(884.0, 620.0, 0.0));
        assert!((map.airports[1].location.x - 888.0 * 6.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_airport_rectangles() {
        let airport = Airport::new("Test", Vector3::new(200.0, 300.0, 0.0));
        assert!(airport.is_within_arrivals(Vector3::new(200.0 + 51.0, 300.0 - 26.5, 0.0)));
        assert!(!airport.is_within_arrivals(Vector3::new(200.0 + 52.0, 300.0, 0.0)));
        assert_eq!(airport.departure_point(), Vector3::new(86.0, 259.0, 0.0));
        assert!(airport.is_within_departures(airport.departure_point()));
    }

    #[test]
    fn test_out_of_airspace() {
        let map = Airspace::standard(AirspaceBounds::default());
        assert!(!map.is_out_of_airspace(Vector3::new(8.0, 8.0, 0.0)));
        assert!(map.is_out_of_airspace(Vector3::new(7.9, 100.0, 0.0)));
        assert!(map.is_out_of_airspace(Vector3::new(100.0, 624.0 - 7.0, 0.0)));
    }

    #[test]
    fn test_airport_at() {
        let map = Airspace::standard(AirspaceBounds::default());
        let loc = map.airports[0].location.with_z(28_000.0);
        assert_eq!(map.airport_at(loc), Some(0));
        assert_eq!(map.airport_at(Vector3::new(1.0, 1.0, 0.0)), None);
    }

    // ---- Components ----

    #[test]
    fn test_flight_status_flags() {
        let mut status = FlightStatus {
            departure: DeparturePhase::Grounded,
            ..Default::default()
        };
        assert!(!status.is_active(), "grounded aircraft are not active");
        status.departure = DeparturePhase::Airborne;
        assert!(status.is_active());
        status.outcome = Some(FlightOutcome::Exited);
        assert!(status.is_finished());
        assert!(!status.is_active());
    }

    #[test]
    fn test_score_starts_at_hundred() {
        assert_eq!(FlightScore::default().points, 100);
    }

    // ---- Serde ----

    #[test]
    fn test_command_serde_tagged() {
        let json = r#"{"type":"SetAltitudeState","callsign":"DG001","state":"Climbing"}"#;
        let cmd: OperatorCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            OperatorCommand::SetAltitudeState {
                callsign: "DG001".into(),
                state: AltitudeState::Climbing,
            }
        );
        assert_eq!(cmd.callsign(), Some("DG001"));
    }

    #[test]
    fn test_alter_path_command_serde() {
        let cmd = OperatorCommand::AlterPath {
            callsign: "BA123".into(),
            stage: 1,
            waypoint: Waypoint::new("WP03", Vector3::new(1.0, 2.0, 0.0), false),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: OperatorCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }

    #[test]
    fn test_event_serde_tagged() {
        let event = SimEvent::Collision {
            first: "A".into(),
            second: "B".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"Collision""#));
    }

    #[test]
    fn test_snapshot_default_serializes() {
        let snapshot = AirspaceSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: AirspaceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, SimPhase::Standby);
        assert!(back.aircraft.is_empty());
    }
}
