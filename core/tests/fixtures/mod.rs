//! Shared test fixtures: scripted wave-height evaluators.

#![allow(dead_code)]

use glam::{Vec2, Vec3};
use std::cell::RefCell;
use std::rc::Rc;
use water_system::waves::{BatchResource, EvaluatorError, WaveContext, WaveHeightEvaluate};

/// Lifecycle events of a recorded batch resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEvent {
    Created(usize),
    Dropped(usize),
}

pub type EventLog = Rc<RefCell<Vec<BatchEvent>>>;

/// Batch that logs its creation and release.
pub struct RecordedBatch {
    capacity: usize,
    log: EventLog,
}

impl BatchResource for RecordedBatch {
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Drop for RecordedBatch {
    fn drop(&mut self) {
        self.log.borrow_mut().push(BatchEvent::Dropped(self.capacity));
    }
}

/// How a scripted evaluator computes the displaced height.
#[derive(Debug, Clone, Copy)]
pub enum HeightRule {
    /// Every sample comes back at this absolute height.
    Constant(f32),
    /// `y = offset + slope.x * x + slope.y * z`.
    Plane { slope: Vec2, offset: f32 },
    /// Moves X, breaking the evaluator contract.
    ShiftX(f32),
}

/// Evaluator returning heights from a [`HeightRule`] and recording batch usage.
pub struct ScriptedEvaluator {
    pub rule: HeightRule,
    pub log: EventLog,
    pub calls: usize,
}

impl ScriptedEvaluator {
    pub fn new(rule: HeightRule) -> Self {
        Self {
            rule,
            log: Rc::new(RefCell::new(Vec::new())),
            calls: 0,
        }
    }

    pub fn constant(height: f32) -> Self {
        Self::new(HeightRule::Constant(height))
    }

    /// Surface tilted by `angle` radians about the world Z axis.
    pub fn tilted(angle: f32) -> Self {
        Self::new(HeightRule::Plane {
            slope: Vec2::new(angle.tan(), 0.0),
            offset: 0.0,
        })
    }

    pub fn events(&self) -> Vec<BatchEvent> {
        self.log.borrow().clone()
    }
}

impl WaveHeightEvaluate for ScriptedEvaluator {
    type Batch = RecordedBatch;

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn create_batch(&mut self, capacity: usize) -> Result<RecordedBatch, EvaluatorError> {
        self.log.borrow_mut().push(BatchEvent::Created(capacity));
        Ok(RecordedBatch {
            capacity,
            log: self.log.clone(),
        })
    }

    fn evaluate(
        &mut self,
        batch: &mut RecordedBatch,
        points: &mut [Vec3],
        _ctx: &WaveContext,
    ) -> Result<(), EvaluatorError> {
        if points.len() != batch.capacity() {
            return Err(EvaluatorError::CapacityMismatch {
                capacity: batch.capacity(),
                requested: points.len(),
            });
        }
        self.calls += 1;

        for p in points.iter_mut() {
            match self.rule {
                HeightRule::Constant(h) => p.y = h,
                HeightRule::Plane { slope, offset } => {
                    p.y = offset + slope.x * p.x + slope.y * p.z;
                }
                HeightRule::ShiftX(dx) => p.x += dx,
            }
        }
        Ok(())
    }
}
