//! Unit tests for hp-planner.

use hp_core::{Maneuver, VehicleId, VehicleSnapshot};

use crate::{PlannerConfig, PredictionSet};

// ── Helpers ───────────────────────────────────────────────────────────────────

const EPS: f64 = 1e-9;

/// Three lanes, goal lane 1, target 20, max accel 5, one-second ticks.
fn config() -> PlannerConfig {
    PlannerConfig::configure(1_000.0, 5.0, 1)
        .with_target_speed(20.0)
        .with_timestep(1.0)
}

fn ego(lane: u32, s: f64, v: f64, state: Maneuver) -> VehicleSnapshot {
    VehicleSnapshot::new(lane, s, v, 0.0, state)
}

fn car(lane: u32, s: f64, v: f64) -> VehicleSnapshot {
    VehicleSnapshot::traffic(lane, s, v, 0.0)
}

fn predictions(cars: &[VehicleSnapshot]) -> PredictionSet {
    cars.iter()
        .enumerate()
        .map(|(i, &c)| (VehicleId(i as u32), vec![c]))
        .collect()
}

// ── Successor states ──────────────────────────────────────────────────────────

#[cfg(test)]
mod fsm_tests {
    use super::*;
    use crate::successor_states;

    use hp_core::Maneuver::*;

    #[test]
    fn keep_lane_middle_lane() {
        assert_eq!(
            successor_states(KeepLane, 1, 3),
            vec![KeepLane, PrepareLaneChangeRight, PrepareLaneChangeLeft]
        );
    }

    #[test]
    fn keep_lane_boundary_lanes() {
        assert_eq!(successor_states(KeepLane, 0, 3), vec![KeepLane, PrepareLaneChangeRight]);
        assert_eq!(successor_states(KeepLane, 2, 3), vec![KeepLane, PrepareLaneChangeLeft]);
        assert_eq!(successor_states(KeepLane, 0, 1), vec![KeepLane]);
    }

    #[test]
    fn prepare_left() {
        assert_eq!(
            successor_states(PrepareLaneChangeLeft, 1, 3),
            vec![KeepLane, PrepareLaneChangeLeft, LaneChangeLeft]
        );
        assert_eq!(successor_states(PrepareLaneChangeLeft, 0, 3), vec![KeepLane]);
    }

    #[test]
    fn prepare_right() {
        assert_eq!(
            successor_states(PrepareLaneChangeRight, 1, 3),
            vec![KeepLane, PrepareLaneChangeRight, LaneChangeRight]
        );
        assert_eq!(successor_states(PrepareLaneChangeRight, 2, 3), vec![KeepLane]);
    }

    #[test]
    fn lane_changes_collapse_to_keep_lane() {
        for lane in 0..3 {
            assert_eq!(successor_states(LaneChangeLeft, lane, 3), vec![KeepLane]);
            assert_eq!(successor_states(LaneChangeRight, lane, 3), vec![KeepLane]);
            assert_eq!(successor_states(ConstantSpeed, lane, 3), vec![KeepLane]);
        }
    }

    #[test]
    fn every_successor_stays_on_the_road() {
        for lanes_available in 1..6 {
            for lane in 0..lanes_available {
                for state in Maneuver::ALL {
                    let next = successor_states(state, lane, lanes_available);
                    assert_eq!(next[0], KeepLane);
                    for m in &next {
                        assert!(
                            m.target_lane(lane, lanes_available).is_some(),
                            "{state} -> {m} leaves the road from lane {lane}/{lanes_available}"
                        );
                    }
                    let mut dedup = next.clone();
                    dedup.dedup();
                    assert_eq!(dedup.len(), next.len());
                }
            }
        }
    }
}

// ── Scans ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scan_tests {
    use super::*;
    use crate::scan::{lane_occupied, lane_speed, nearest_distance, vehicle_ahead, vehicle_behind};

    #[test]
    fn ahead_picks_closest_in_lane() {
        let p = predictions(&[car(1, 80.0, 5.0), car(1, 40.0, 6.0), car(0, 20.0, 7.0)]);
        let ahead = vehicle_ahead(&p, 1, 10.0, 1_000.0).unwrap();
        assert_eq!(ahead.s, 40.0);
        assert!(vehicle_ahead(&p, 2, 10.0, 1_000.0).is_none());
    }

    #[test]
    fn ahead_ignores_vehicles_past_horizon() {
        let p = predictions(&[car(1, 150.0, 5.0)]);
        assert!(vehicle_ahead(&p, 1, 0.0, 100.0).is_none());
    }

    #[test]
    fn behind_picks_closest_in_lane() {
        let p = predictions(&[car(1, -80.0, 5.0), car(1, -10.0, 6.0), car(1, 30.0, 7.0)]);
        assert_eq!(vehicle_behind(&p, 1, 0.0).unwrap().s, -10.0);
        assert!(vehicle_behind(&p, 0, 0.0).is_none());
    }

    #[test]
    fn lane_speed_empty_lane_is_none() {
        let p = predictions(&[car(0, 10.0, 7.0)]);
        assert_eq!(lane_speed(&p, 1), None);
        assert_eq!(lane_speed(&PredictionSet::new(), 0), None);
    }

    #[test]
    fn lane_speed_reports_tracked_vehicle() {
        let p = predictions(&[car(0, 10.0, 7.0), car(2, 50.0, 13.0)]);
        assert_eq!(lane_speed(&p, 0), Some(7.0));
        assert_eq!(lane_speed(&p, 2), Some(13.0));
    }

    #[test]
    fn lane_speed_independent_of_order() {
        let a = predictions(&[car(1, 10.0, 9.0), car(1, 60.0, 11.0), car(0, 5.0, 3.0)]);
        let b = predictions(&[car(0, 5.0, 3.0), car(1, 60.0, 11.0), car(1, 10.0, 9.0)]);
        assert_eq!(lane_speed(&a, 1), lane_speed(&b, 1));
        assert_eq!(lane_speed(&a, 1), Some(9.0));
    }

    #[test]
    fn vehicles_without_prediction_are_ignored() {
        let mut p = PredictionSet::new();
        p.insert(VehicleId(0), vec![]);
        assert_eq!(lane_speed(&p, 0), None);
        assert!(nearest_distance(&ego(0, 0.0, 0.0, Maneuver::KeepLane), &p, 4.0).is_infinite());
    }

    #[test]
    fn occupancy_exact_match_by_default() {
        let p = predictions(&[car(2, 0.0, 10.0)]);
        assert!(lane_occupied(&p, 2, 0.0, 0.0));
        assert!(!lane_occupied(&p, 2, 0.5, 0.0));
        assert!(lane_occupied(&p, 2, 0.5, 1.0));
        assert!(!lane_occupied(&p, 1, 0.0, 0.0));
    }

    #[test]
    fn nearest_distance_same_lane_is_longitudinal_gap() {
        let p = predictions(&[car(1, 130.0, 0.0), car(1, 60.0, 0.0)]);
        let d = nearest_distance(&ego(1, 100.0, 0.0, Maneuver::KeepLane), &p, 4.0);
        assert!((d - 30.0).abs() < EPS);
    }

    #[test]
    fn nearest_distance_adjacent_lane() {
        let p = predictions(&[car(2, 105.0, 0.0)]);
        let d = nearest_distance(&ego(1, 100.0, 0.0, Maneuver::KeepLane), &p, 4.0);
        assert!((d - 3.0).abs() < EPS);
    }

    #[test]
    fn nearest_distance_degenerate_is_infinite() {
        // dd = 8 > ds = 2: no conflict.
        let p = predictions(&[car(3, 102.0, 0.0)]);
        let d = nearest_distance(&ego(1, 100.0, 0.0, Maneuver::KeepLane), &p, 4.0);
        assert!(d.is_infinite());
        assert!(!d.is_nan());
    }
}

// ── Kinematics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod kinematics_tests {
    use super::*;
    use crate::solve;

    #[test]
    fn clear_lane_accelerates_within_limit() {
        let k = solve(&config(), &PredictionSet::new(), 1, &ego(1, 0.0, 10.0, Maneuver::KeepLane));
        assert!((k.v - 15.0).abs() < EPS);
        assert!((k.a - 5.0).abs() < EPS);
        assert!((k.s - 12.5).abs() < EPS);
    }

    #[test]
    fn clear_lane_caps_at_target_speed() {
        let k = solve(&config(), &PredictionSet::new(), 1, &ego(1, 0.0, 18.0, Maneuver::KeepLane));
        assert!((k.v - 20.0).abs() < EPS);
        assert!((k.a - 2.0).abs() < EPS);
        assert!((k.s - 19.0).abs() < EPS);
    }

    #[test]
    fn boxed_in_matches_leader_speed() {
        let p = predictions(&[car(1, 50.0, 12.0), car(1, -30.0, 12.0)]);
        let k = solve(&config(), &p, 1, &ego(1, 0.0, 10.0, Maneuver::KeepLane));
        assert!((k.v - 12.0).abs() < EPS);
        assert!((k.a - 2.0).abs() < EPS);
    }

    #[test]
    fn closes_gap_to_preferred_buffer() {
        // Stopped leader 15 ahead with a 10 buffer: desired velocity 5.
        let p = predictions(&[car(1, 15.0, 0.0)]);
        let k = solve(&config(), &p, 1, &ego(1, 0.0, 10.0, Maneuver::KeepLane));
        assert!((k.v - 5.0).abs() < EPS);
        assert!((k.a + 5.0).abs() < EPS);
        assert!((k.s - 7.5).abs() < EPS);
    }

    #[test]
    fn braking_limited_by_max_acceleration() {
        let p = predictions(&[car(1, 5.0, 0.0)]);
        let k = solve(&config(), &p, 1, &ego(1, 0.0, 10.0, Maneuver::KeepLane));
        assert!((k.v - 5.0).abs() < EPS);
        assert!((k.a + 5.0).abs() < EPS);
    }

    #[test]
    fn leader_past_goal_is_ignored() {
        let cfg = PlannerConfig { goal_s: 100.0, ..config() };
        let p = predictions(&[car(1, 150.0, 0.0)]);
        let k = solve(&cfg, &p, 1, &ego(1, 0.0, 10.0, Maneuver::KeepLane));
        assert!((k.v - 15.0).abs() < EPS);
    }

    #[test]
    fn solves_for_requested_lane() {
        // Slow leader only in lane 2; lane 1 is clear.
        let p = predictions(&[car(2, 12.0, 0.0)]);
        let ego = ego(1, 0.0, 10.0, Maneuver::KeepLane);
        assert!((solve(&config(), &p, 1, &ego).v - 15.0).abs() < EPS);
        assert!((solve(&config(), &p, 2, &ego).v - 5.0).abs() < EPS);
    }

    #[test]
    fn velocity_bounds_hold_across_inputs() {
        let cfg = config();
        let limit = cfg.max_acceleration * cfg.timestep;
        for v0 in [0.0, 1.0, 5.0, 10.0, 17.5, 20.0] {
            for gap in [-40.0, -5.0, 1.0, 8.0, 15.0, 30.0, 200.0] {
                for lead_v in [0.0, 4.0, 25.0] {
                    let scenarios = [
                        predictions(&[]),
                        predictions(&[car(1, gap, lead_v)]),
                        predictions(&[car(1, gap, lead_v), car(1, -20.0, 30.0)]),
                    ];
                    for p in &scenarios {
                        let k = solve(&cfg, p, 1, &ego(1, 0.0, v0, Maneuver::KeepLane));
                        assert!(k.v >= 0.0 && k.v <= cfg.target_speed + EPS, "v={} from {v0}", k.v);
                        assert!((k.v - v0).abs() <= limit + EPS, "v={} from {v0}", k.v);
                        assert!(k.a.abs() <= cfg.max_acceleration + EPS);
                    }
                }
            }
        }
    }
}

// ── Trajectory generation ─────────────────────────────────────────────────────

#[cfg(test)]
mod trajectory_tests {
    use super::*;
    use crate::generate;

    #[test]
    fn constant_speed_dead_reckons() {
        let start = VehicleSnapshot::new(1, 0.0, 10.0, 2.0, Maneuver::KeepLane);
        let t = generate(&config(), Maneuver::ConstantSpeed, &PredictionSet::new(), &start).unwrap();
        assert_eq!(t.current, start);
        assert!((t.projected.s - 11.0).abs() < EPS);
        assert_eq!(t.projected.v, 10.0);
        assert_eq!(t.projected.a, 0.0);
        assert_eq!(t.projected.lane, 1);
    }

    #[test]
    fn keep_lane_tags_and_stays() {
        let start = ego(1, 0.0, 10.0, Maneuver::PrepareLaneChangeLeft);
        let t = generate(&config(), Maneuver::KeepLane, &PredictionSet::new(), &start).unwrap();
        assert_eq!(t.current, start);
        assert_eq!(t.projected.state, Maneuver::KeepLane);
        assert_eq!(t.projected.lane, 1);
        assert_eq!(t.maneuver(), Maneuver::KeepLane);
    }

    #[test]
    fn lane_change_blocked_by_vehicle_alongside() {
        let p = predictions(&[car(2, 0.0, 10.0)]);
        let start = ego(1, 0.0, 10.0, Maneuver::PrepareLaneChangeRight);
        assert!(generate(&config(), Maneuver::LaneChangeRight, &p, &start).is_none());
    }

    #[test]
    fn lane_change_moves_into_target_lane() {
        let p = predictions(&[car(2, 60.0, 10.0)]);
        let start = ego(1, 0.0, 10.0, Maneuver::PrepareLaneChangeRight);
        let t = generate(&config(), Maneuver::LaneChangeRight, &p, &start).unwrap();
        assert_eq!(t.projected.lane, 2);
        assert_eq!(t.projected.state, Maneuver::LaneChangeRight);

        let t = generate(&config(), Maneuver::LaneChangeLeft, &p, &start).unwrap();
        assert_eq!(t.projected.lane, 0);
    }

    #[test]
    fn lane_change_off_road_is_infeasible() {
        let start = ego(0, 0.0, 10.0, Maneuver::PrepareLaneChangeLeft);
        assert!(generate(&config(), Maneuver::LaneChangeLeft, &PredictionSet::new(), &start).is_none());
    }

    #[test]
    fn clearance_widens_blocking_window() {
        let p = predictions(&[car(2, 3.0, 10.0)]);
        let start = ego(1, 0.0, 10.0, Maneuver::PrepareLaneChangeRight);
        assert!(generate(&config(), Maneuver::LaneChangeRight, &p, &start).is_some());
        let wide = config().with_lane_change_clearance(5.0);
        assert!(generate(&wide, Maneuver::LaneChangeRight, &p, &start).is_none());
    }

    #[test]
    fn prepare_takes_slower_lane_speed() {
        // Boxed-in traffic in lane 2 at 8 m/s; lane 1 clear.
        let p = predictions(&[car(2, 50.0, 8.0), car(2, -50.0, 8.0)]);
        let start = ego(1, 0.0, 10.0, Maneuver::KeepLane);
        let t = generate(&config(), Maneuver::PrepareLaneChangeRight, &p, &start).unwrap();
        assert_eq!(t.projected.lane, 1);
        assert_eq!(t.projected.state, Maneuver::PrepareLaneChangeRight);
        assert!((t.projected.v - 8.0).abs() < EPS);
    }

    #[test]
    fn prepare_with_follower_keeps_current_lane_speed() {
        let p = predictions(&[car(2, 50.0, 8.0), car(2, -50.0, 8.0), car(1, -40.0, 10.0)]);
        let start = ego(1, 0.0, 10.0, Maneuver::KeepLane);
        let t = generate(&config(), Maneuver::PrepareLaneChangeRight, &p, &start).unwrap();
        assert!((t.projected.v - 15.0).abs() < EPS);
    }

    #[test]
    fn jerk_across_step() {
        let start = ego(1, 0.0, 10.0, Maneuver::KeepLane);
        let t = generate(&config(), Maneuver::KeepLane, &PredictionSet::new(), &start).unwrap();
        assert!((t.jerk(1.0) - 5.0).abs() < EPS);
    }
}

// ── Cost ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cost_tests {
    use super::*;
    use crate::cost::{
        buffer_cost, collision_cost, goal_distance_cost, inefficiency_cost, max_accel_cost,
        max_jerk_cost,
    };
    use crate::{CostTerm, CostWeights, Trajectory, TrajectoryData, cost_breakdown, logistic};

    fn step_to(lane: u32, s: f64, a: f64, state: Maneuver) -> Trajectory {
        Trajectory::new(
            ego(1, 0.0, 10.0, Maneuver::KeepLane),
            VehicleSnapshot::new(lane, s, 10.0, a, state),
        )
    }

    #[test]
    fn logistic_shape() {
        assert_eq!(logistic(0.0), 0.0);
        assert!(logistic(50.0) > 0.999 && logistic(50.0) <= 1.0);
        assert!(logistic(-50.0) < -0.999);
        assert!(logistic(f64::INFINITY) == 1.0);
    }

    #[test]
    fn helper_data_follows_lane_convention() {
        let cfg = config();
        let left = TrajectoryData::new(&cfg, &step_to(1, 10.0, 0.0, Maneuver::PrepareLaneChangeLeft));
        let right = TrajectoryData::new(&cfg, &step_to(1, 10.0, 0.0, Maneuver::PrepareLaneChangeRight));
        let keep = TrajectoryData::new(&cfg, &step_to(1, 10.0, 0.0, Maneuver::KeepLane));
        assert_eq!((left.intended_lane, left.final_lane), (0, 1));
        assert_eq!((right.intended_lane, right.final_lane), (2, 1));
        assert_eq!((keep.intended_lane, keep.final_lane), (1, 1));
        assert!((keep.distance_to_goal - 990.0).abs() < EPS);
    }

    #[test]
    fn collision_boundary_at_twenty() {
        let cfg = config();
        let t = step_to(1, 100.0, 0.0, Maneuver::KeepLane);
        assert_eq!(collision_cost(&cfg, &t, &predictions(&[car(1, 120.0, 10.0)])), 0.0);
        assert_eq!(collision_cost(&cfg, &t, &predictions(&[car(1, 119.5, 10.0)])), 1.0);
        assert_eq!(collision_cost(&cfg, &t, &predictions(&[car(1, 80.0, 10.0)])), 0.0);
        assert_eq!(collision_cost(&cfg, &t, &PredictionSet::new()), 0.0);
    }

    #[test]
    fn buffer_grows_as_gap_shrinks() {
        let cfg = config();
        let t = step_to(1, 100.0, 0.0, Maneuver::KeepLane);
        let empty = buffer_cost(&cfg, &t, &PredictionSet::new());
        let far = buffer_cost(&cfg, &t, &predictions(&[car(1, 200.0, 10.0)]));
        let near = buffer_cost(&cfg, &t, &predictions(&[car(1, 103.0, 10.0)]));
        assert_eq!(empty, 0.0);
        assert!(far > 0.0 && far < near && near < 1.0);
    }

    #[test]
    fn goal_distance_saturates_past_goal() {
        let cfg = config();
        let past = TrajectoryData::new(&cfg, &step_to(0, 1_200.0, 0.0, Maneuver::KeepLane));
        assert_eq!(goal_distance_cost(&cfg, &past), 1.0);
    }

    #[test]
    fn goal_distance_prefers_goal_lane() {
        let cfg = config();
        let on_goal = TrajectoryData::new(&cfg, &step_to(1, 10.0, 0.0, Maneuver::KeepLane));
        let off_goal = TrajectoryData::new(&cfg, &step_to(2, 10.0, 0.0, Maneuver::KeepLane));
        assert!((goal_distance_cost(&cfg, &on_goal) + 1.0).abs() < EPS);
        assert!(goal_distance_cost(&cfg, &off_goal) > -1.0);

        // The same mismatch costs more closer to the goal.
        let near_goal = TrajectoryData::new(&cfg, &step_to(2, 990.0, 0.0, Maneuver::KeepLane));
        assert!(goal_distance_cost(&cfg, &near_goal) > goal_distance_cost(&cfg, &off_goal));
    }

    #[test]
    fn inefficiency_uses_target_for_empty_lanes() {
        let cfg = config();
        let data = TrajectoryData::new(&cfg, &step_to(1, 10.0, 0.0, Maneuver::KeepLane));
        assert_eq!(inefficiency_cost(&cfg, &PredictionSet::new(), &data), 0.0);

        let slow = predictions(&[car(1, 300.0, 10.0)]);
        assert!((inefficiency_cost(&cfg, &slow, &data) - 1.0).abs() < EPS);

        let prep = TrajectoryData::new(&cfg, &step_to(1, 10.0, 0.0, Maneuver::PrepareLaneChangeRight));
        assert!((inefficiency_cost(&cfg, &slow, &prep) - 0.5).abs() < EPS);
    }

    #[test]
    fn acceleration_and_jerk_limits() {
        let cfg = config().with_max_jerk(2.0);
        assert_eq!(max_accel_cost(&cfg, &step_to(1, 10.0, 5.0, Maneuver::KeepLane)), 0.0);
        assert_eq!(max_accel_cost(&cfg, &step_to(1, 10.0, -6.0, Maneuver::KeepLane)), 1.0);
        assert_eq!(max_jerk_cost(&cfg, &step_to(1, 10.0, 2.0, Maneuver::KeepLane)), 0.0);
        assert_eq!(max_jerk_cost(&cfg, &step_to(1, 10.0, 3.0, Maneuver::KeepLane)), 1.0);
    }

    #[test]
    fn total_is_weighted_sum() {
        let cfg = config().with_weights(CostWeights {
            collision:    1e7,
            reach_goal:   1e6,
            efficiency:   1e5,
            buffer:       10.0,
            acceleration: 3.0,
            jerk:         7.0,
        });
        let p = predictions(&[car(1, 25.0, 10.0), car(0, 40.0, 8.0)]);
        let t = step_to(1, 10.0, 0.0, Maneuver::PrepareLaneChangeLeft);
        let b = cost_breakdown(&cfg, &p, &t);
        let expected: f64 = CostTerm::ALL.iter().map(|&term| term.weight(&cfg) * b.get(term)).sum();
        assert!((b.total - expected).abs() < 1e-6);
        assert_eq!(b.get(CostTerm::Collision), 1.0);
        assert!(b.total.is_finite());
    }

    #[test]
    fn degenerate_geometry_never_produces_nan() {
        let cfg = config().with_weights(CostWeights { buffer: 1.0, ..CostWeights::default() });
        let p = predictions(&[car(0, 11.0, 10.0), car(2, 9.0, 10.0)]);
        let b = cost_breakdown(&cfg, &p, &step_to(1, 10.0, 0.0, Maneuver::KeepLane));
        assert!(b.terms.iter().all(|x| !x.is_nan()));
        assert_eq!(b.get(CostTerm::Collision), 0.0);
        assert_eq!(b.get(CostTerm::Buffer), 0.0);
    }

    #[test]
    fn zero_radius_on_top_of_a_car_is_finite() {
        let mut cfg = config();
        cfg.vehicle_radius = 0.0;
        let p = predictions(&[car(1, 12.5, 10.0)]);
        let t = step_to(1, 12.5, 5.0, Maneuver::KeepLane);

        let b = cost_breakdown(&cfg, &p, &t);
        assert!(b.terms.iter().all(|x| !x.is_nan()));
        assert_eq!(b.get(CostTerm::Buffer), 0.0);
        assert_eq!(b.get(CostTerm::Collision), 1.0);
        assert!(b.total.is_finite());

        // A real radius at zero gap saturates instead.
        assert!((buffer_cost(&config(), &t, &p) - 1.0).abs() < EPS);
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner_tests {
    use super::*;
    use crate::trajectory::constant_speed;
    use crate::{CostWeights, Planner, PlannerError};

    fn planner(state: Maneuver) -> Planner {
        Planner::new(config(), ego(1, 0.0, 10.0, state)).unwrap()
    }

    #[test]
    fn rejects_ego_off_road() {
        let err = Planner::new(config(), ego(3, 0.0, 10.0, Maneuver::KeepLane)).unwrap_err();
        assert!(matches!(err, PlannerError::Core(hp_core::HpError::LaneOutOfRange { lane: 3, .. })));
    }

    #[test]
    fn rejects_invalid_config() {
        let start = ego(1, 0.0, 10.0, Maneuver::KeepLane);
        assert!(matches!(
            Planner::new(config().with_timestep(0.0), start),
            Err(PlannerError::Config(_))
        ));
        assert!(matches!(
            Planner::new(PlannerConfig::configure(1_000.0, 5.0, 3), start),
            Err(PlannerError::Config(_))
        ));
        assert!(matches!(
            Planner::new(PlannerConfig::configure(1_000.0, -1.0, 1), start),
            Err(PlannerError::Config(_))
        ));
        assert!(matches!(
            Planner::new(config().with_lanes_available(0), start),
            Err(PlannerError::Config(_))
        ));
    }

    #[test]
    fn empty_road_keeps_lane_and_accelerates() {
        let p = planner(Maneuver::KeepLane);
        let t = p.choose_next_state(&PredictionSet::new());
        assert_eq!(t.projected.state, Maneuver::KeepLane);
        assert_eq!(t.projected.lane, 1);
        assert!((t.projected.v - 15.0).abs() < EPS);
        assert!((t.projected.a - 5.0).abs() < EPS);
        assert!((t.projected.s - 12.5).abs() < EPS);
    }

    #[test]
    fn evaluate_lists_feasible_candidates_in_successor_order() {
        let p = planner(Maneuver::KeepLane);
        let maneuvers: Vec<_> = p.evaluate(&PredictionSet::new()).iter().map(|c| c.maneuver).collect();
        assert_eq!(
            maneuvers,
            vec![Maneuver::KeepLane, Maneuver::PrepareLaneChangeRight, Maneuver::PrepareLaneChangeLeft]
        );
    }

    #[test]
    fn blocked_lane_change_is_never_selected() {
        let goal_right = PlannerConfig { goal_lane: 2, ..config() };
        let p = Planner::new(goal_right, ego(1, 0.0, 10.0, Maneuver::PrepareLaneChangeRight)).unwrap();

        // Unblocked, the goal lane pulls the ego right.
        assert_eq!(p.choose_next_state(&PredictionSet::new()).maneuver(), Maneuver::LaneChangeRight);

        let blocked = predictions(&[car(2, 0.0, 10.0)]);
        let candidates = p.evaluate(&blocked);
        assert!(candidates.iter().all(|c| c.maneuver != Maneuver::LaneChangeRight));
        assert_ne!(p.choose_next_state(&blocked).maneuver(), Maneuver::LaneChangeRight);
    }

    #[test]
    fn never_returns_without_a_trajectory() {
        let blockers = predictions(&[car(0, 0.0, 10.0), car(2, 0.0, 10.0), car(1, 0.0, 10.0)]);
        for state in Maneuver::ALL {
            let p = planner(state);
            for set in [PredictionSet::new(), blockers.clone()] {
                let d = p.decide(&set);
                assert!(d.candidates >= 1);
                assert!(!d.fallback);
                assert_eq!(d.trajectory.current, *p.ego());
                assert!(d.cost.is_finite());
            }
        }
    }

    #[test]
    fn empty_candidate_list_falls_back_to_constant_speed() {
        let p = Planner::new(config(), VehicleSnapshot::new(1, 0.0, 10.0, 2.0, Maneuver::KeepLane)).unwrap();
        let d = p.select(&[], &PredictionSet::new());

        assert!(d.fallback);
        assert_eq!(d.candidates, 0);
        assert_eq!(d.trajectory, constant_speed(p.config(), p.ego()));
        assert_eq!(d.trajectory.maneuver(), Maneuver::ConstantSpeed);
        assert_eq!(d.trajectory.projected.lane, 1);
        assert_eq!(d.trajectory.projected.v, 10.0);
        assert!((d.trajectory.projected.s - 11.0).abs() < EPS);
        assert!(d.cost.is_finite());
    }

    #[test]
    fn select_prefers_first_of_equal_costs() {
        let p = planner(Maneuver::KeepLane);
        let set = PredictionSet::new();
        let mut candidates = p.evaluate(&set);
        for c in &mut candidates {
            c.cost.total = 1.0;
        }
        let d = p.select(&candidates, &set);
        assert!(!d.fallback);
        assert_eq!(d.trajectory, candidates[0].trajectory);
        assert_eq!(d.candidates, candidates.len());
    }

    #[test]
    fn realize_commits_projected_point() {
        let mut p = planner(Maneuver::KeepLane);
        let t = p.choose_next_state(&PredictionSet::new());
        p.realize_next_state(&t);
        assert_eq!(*p.ego(), t.projected);
        assert_eq!(p.ego().lane, t.projected.lane);
        assert_eq!(p.ego().s, t.projected.s);
        assert_eq!(p.ego().v, t.projected.v);
        assert_eq!(p.ego().a, t.projected.a);
        assert_eq!(p.ego().state, t.projected.state);
    }

    #[test]
    fn step_chooses_and_commits() {
        let mut p = planner(Maneuver::KeepLane);
        let d = p.step(&PredictionSet::new());
        assert_eq!(*p.ego(), d.trajectory.projected);
        let d2 = p.step(&PredictionSet::new());
        assert!((d2.trajectory.projected.v - 20.0).abs() < EPS);
    }

    #[test]
    fn jerk_weight_changes_selection() {
        // Lane 1 clear (KeepLane accelerates hard); lane 2 boxed in at 10 m/s
        // (PrepareLaneChangeRight holds speed, zero jerk).
        let traffic = predictions(&[car(2, 50.0, 10.0), car(2, -50.0, 10.0)]);
        let base = config().with_max_jerk(2.0);
        let start = ego(1, 0.0, 10.0, Maneuver::PrepareLaneChangeRight);

        let lenient = Planner::new(base.clone(), start).unwrap();
        assert_eq!(lenient.choose_next_state(&traffic).maneuver(), Maneuver::KeepLane);

        let strict_weights = CostWeights { jerk: 1e7, ..CostWeights::default() };
        let strict = Planner::new(base.with_weights(strict_weights), start).unwrap();
        let chosen = strict.choose_next_state(&traffic);
        assert_eq!(chosen.maneuver(), Maneuver::PrepareLaneChangeRight);
        assert!((chosen.projected.v - 10.0).abs() < EPS);
    }

    #[test]
    fn cost_matches_breakdown_total() {
        let p = planner(Maneuver::KeepLane);
        let set = predictions(&[car(1, 40.0, 12.0)]);
        for c in p.evaluate(&set) {
            assert!((p.cost(&set, &c.trajectory) - c.cost.total).abs() < 1e-9);
        }
    }

    #[test]
    fn predictions_project_constant_velocity() {
        let p = Planner::new(config(), VehicleSnapshot::new(1, 100.0, 10.0, 1.0, Maneuver::KeepLane)).unwrap();
        let forecast = p.generate_predictions(3);
        assert_eq!(forecast.len(), 3);
        // The nearest-term entry is already one tick ahead.
        assert!((forecast[0].s - 110.0).abs() < EPS);
        assert!((forecast[1].s - 120.0).abs() < EPS);
        assert!((forecast[2].s - 130.0).abs() < EPS);
        assert!(forecast.iter().all(|f| f.v == 10.0 && f.a == 0.0 && f.lane == 1));
        assert!(p.generate_predictions(0).is_empty());
    }

    #[test]
    fn predictions_cap_at_target_speed() {
        let p = Planner::new(config(), ego(0, 0.0, 25.0, Maneuver::KeepLane)).unwrap();
        let forecast = p.generate_predictions(2);
        assert!((forecast[0].s - 25.0).abs() < EPS);
        assert_eq!(forecast[0].v, 20.0);
        assert!((forecast[0].a + 5.0).abs() < EPS);
        assert!((forecast[1].s - 45.0).abs() < EPS);
        assert_eq!(forecast[1].a, 0.0);
    }
}
