//! Integration tests for buoyancy integration over scripted wave fields.

mod fixtures;

use fixtures::ScriptedEvaluator;
use glam::{Quat, Vec3};
use water_system::buoyancy::{BuoyModel, BuoyancyConfig, BuoyancyIntegrator};
use water_system::geometry::{Pose, StillWaterPlane};
use water_system::sampler::WaveFieldSampler;
use water_system::waves::{WaveContext, WavesPacked};

fn ctx() -> WaveContext {
    WaveContext::new(WavesPacked::default(), 1.0)
}

// ==================== Point mode ====================

#[test]
fn test_point_mode_halves_gap_each_tick() {
    let mut sampler =
        WaveFieldSampler::new(StillWaterPlane::horizontal(0.0), ScriptedEvaluator::constant(2.0));
    let integrator = BuoyancyIntegrator::new(BuoyancyConfig::point().with_hardness(0.5, 0.1)).unwrap();
    let mut pose = Pose::default();

    let mut heights = Vec::new();
    for _ in 0..3 {
        integrator.tick(&mut pose, &mut sampler, &ctx()).unwrap();
        heights.push(pose.position.y);
    }

    assert_eq!(heights, vec![1.0, 1.5, 1.75]);
    assert_eq!(pose.position.x, 0.0);
    assert_eq!(pose.position.z, 0.0);
    assert_eq!(pose.rotation, Quat::IDENTITY);
}

#[test]
fn test_point_mode_converges_monotonically() {
    let height = 3.0;
    let correction = -0.4;
    let hardness = 0.2;
    let target = height + correction;
    let tolerance = 1e-3f32;

    let mut sampler =
        WaveFieldSampler::new(StillWaterPlane::horizontal(0.0), ScriptedEvaluator::constant(height));
    let integrator = BuoyancyIntegrator::new(
        BuoyancyConfig::point()
            .with_hardness(hardness, 0.1)
            .with_sinking_correction(correction),
    )
    .unwrap();
    let mut pose = Pose::from_position(Vec3::new(0.0, -7.4, 0.0));

    let initial_gap = (pose.position.y - target).abs();
    let bound = ((tolerance / initial_gap).ln() / (1.0 - hardness).ln()).ceil() as usize + 1;

    let mut previous_gap = initial_gap;
    let mut converged_at = None;
    for tick in 1..=bound {
        integrator.tick(&mut pose, &mut sampler, &ctx()).unwrap();
        let gap = (pose.position.y - target).abs();
        assert!(gap < previous_gap, "gap grew at tick {tick}: {gap} >= {previous_gap}");
        assert!(pose.position.y < target, "overshot at tick {tick}");
        previous_gap = gap;
        if gap <= tolerance && converged_at.is_none() {
            converged_at = Some(tick);
        }
    }

    assert!(converged_at.is_some(), "did not converge within {bound} ticks");
}

#[test]
fn test_point_mode_uses_anchor_offset() {
    let mut sampler = WaveFieldSampler::new(
        StillWaterPlane::horizontal(0.0),
        ScriptedEvaluator::tilted(std::f32::consts::FRAC_PI_4),
    );
    let config = BuoyancyConfig::point()
        .with_model(BuoyModel::Point {
            anchor: Vec3::new(2.0, 0.0, 0.0),
        })
        .with_hardness(1.0, 1.0);
    let integrator = BuoyancyIntegrator::new(config).unwrap();
    let mut pose = Pose::default();

    integrator.tick(&mut pose, &mut sampler, &ctx()).unwrap();

    // The anchor sits at x = 2 on a 45 degree slope.
    assert!((pose.position.y - 2.0).abs() < 1e-5);
    assert_eq!(pose.position.x, 0.0);
}

// ==================== Surface mode ====================

#[test]
fn test_surface_mode_flat_samples() {
    let mut sampler =
        WaveFieldSampler::new(StillWaterPlane::horizontal(0.0), ScriptedEvaluator::constant(1.0));
    let integrator = BuoyancyIntegrator::new(BuoyancyConfig::surface()).unwrap();
    let pose = Pose::from_position(Vec3::new(4.0, -2.0, 1.0));

    let target = integrator.target(&pose, &mut sampler, &ctx()).unwrap();
    let orientation = target.orientation.unwrap();

    assert!((orientation.normal - Vec3::Y).length() < 1e-6);
    assert!(orientation.tilt.dot(Quat::IDENTITY).abs() > 1.0 - 1e-6);
    assert_eq!(target.position, Vec3::new(4.0, 1.0, 1.0));
}

#[test]
fn test_surface_mode_tilt_matches_wave_angle() {
    let angle = 0.25f32;
    let mut sampler =
        WaveFieldSampler::new(StillWaterPlane::horizontal(0.0), ScriptedEvaluator::tilted(angle));
    let integrator = BuoyancyIntegrator::new(BuoyancyConfig::surface()).unwrap();
    let pose = Pose::default();

    let target = integrator.target(&pose, &mut sampler, &ctx()).unwrap();
    let orientation = target.orientation.unwrap();

    let deviation = orientation.normal.angle_between(Vec3::Y);
    assert!((deviation - angle).abs() < 1e-3, "deviation {deviation}");

    let tilted_up = orientation.rotation * Vec3::Y;
    assert!((tilted_up - orientation.normal).length() < 1e-4);
}

#[test]
fn test_surface_mode_keeps_heading_over_ticks() {
    let mut sampler =
        WaveFieldSampler::new(StillWaterPlane::horizontal(0.0), ScriptedEvaluator::tilted(0.3));
    let integrator = BuoyancyIntegrator::new(BuoyancyConfig::surface().with_hardness(1.0, 1.0)).unwrap();
    let mut pose = Pose::new(Vec3::ZERO, Quat::from_rotation_y(1.1));

    for tick in 0..8 {
        let before = pose.yaw();
        integrator.tick(&mut pose, &mut sampler, &ctx()).unwrap();
        let after = pose.yaw();
        assert!(
            (after - before).abs() < 1e-5,
            "heading drifted at tick {tick}: {before} -> {after}"
        );
    }
    assert!((pose.yaw() - 1.1).abs() < 1e-5);

    // Forward direction projected onto the water keeps pointing the same way.
    let forward = pose.rotation * Vec3::Z;
    let start = Quat::from_rotation_y(1.1) * Vec3::Z;
    let angle = forward.x.atan2(forward.z) - start.x.atan2(start.z);
    assert!(angle.abs() < 0.05, "forward turned by {angle}");
}

#[test]
fn test_surface_target_rotation_is_tilt_then_heading() {
    let mut sampler =
        WaveFieldSampler::new(StillWaterPlane::horizontal(0.0), ScriptedEvaluator::tilted(0.2));
    let integrator = BuoyancyIntegrator::new(BuoyancyConfig::surface()).unwrap();
    let pose = Pose::new(Vec3::ZERO, Quat::from_rotation_z(-0.1) * Quat::from_rotation_y(-0.6));

    let target = integrator.target(&pose, &mut sampler, &ctx()).unwrap();
    let orientation = target.orientation.unwrap();

    let resulting = Pose::new(target.position, orientation.rotation);
    assert!((resulting.yaw() - pose.yaw()).abs() < 1e-5);
    assert!((pose.yaw() + 0.6).abs() < 1e-5);
    assert!((resulting.up() - orientation.normal).length() < 1e-4);
}

#[test]
fn test_surface_mode_moves_position_toward_target() {
    let mut sampler =
        WaveFieldSampler::new(StillWaterPlane::horizontal(0.0), ScriptedEvaluator::constant(2.0));
    let integrator = BuoyancyIntegrator::new(BuoyancyConfig::surface().with_hardness(0.5, 0.5)).unwrap();
    let mut pose = Pose::from_position(Vec3::new(1.0, 0.0, -1.0));

    integrator.tick(&mut pose, &mut sampler, &ctx()).unwrap();
    assert!((pose.position - Vec3::new(1.0, 1.0, -1.0)).length() < 1e-5);

    integrator.tick(&mut pose, &mut sampler, &ctx()).unwrap();
    assert!((pose.position - Vec3::new(1.0, 1.5, -1.0)).length() < 1e-5);
}

#[test]
fn test_surface_mode_slerps_rotation() {
    let angle = 0.4f32;
    let mut sampler =
        WaveFieldSampler::new(StillWaterPlane::horizontal(0.0), ScriptedEvaluator::tilted(angle));
    let integrator = BuoyancyIntegrator::new(BuoyancyConfig::surface().with_hardness(0.0, 0.5)).unwrap();
    let mut pose = Pose::default();

    integrator.tick(&mut pose, &mut sampler, &ctx()).unwrap();

    let tilt = (pose.rotation * Vec3::Y).angle_between(Vec3::Y);
    assert!((tilt - angle * 0.5).abs() < 1e-3, "tilt {tilt}");
    assert!((pose.rotation.length() - 1.0).abs() < 1e-5);
}

#[test]
fn test_each_tick_runs_one_batch() {
    let mut sampler =
        WaveFieldSampler::new(StillWaterPlane::horizontal(0.0), ScriptedEvaluator::constant(0.5));
    let point = BuoyancyIntegrator::new(BuoyancyConfig::point()).unwrap();
    let surface = BuoyancyIntegrator::new(BuoyancyConfig::surface()).unwrap();
    let mut a = Pose::default();
    let mut b = Pose::default();

    for _ in 0..5 {
        point.tick(&mut a, &mut sampler, &ctx()).unwrap();
        surface.tick(&mut b, &mut sampler, &ctx()).unwrap();
    }

    assert_eq!(sampler.stats().dispatches, 10);
    assert_eq!(sampler.evaluator().calls, 10);
}
