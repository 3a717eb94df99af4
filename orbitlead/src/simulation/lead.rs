//! Trajectory prediction ("lead") buffer
//!
//! Each satellite owns a double-ended queue of predicted states. The front is
//! the prediction closest to now, the back is the prediction horizon.
//! Positions and velocities are stored together in one node, so the two
//! sequences can never get out of step.

use std::collections::VecDeque;

use super::error::{SimError, SimResult};
use super::states::{BodyState, NVec2};

/// One predicted state, stamped with its simulated time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadNode {
    pub state: BodyState,
    pub t: f64,
}

impl LeadNode {
    pub fn position(&self) -> NVec2 {
        self.state.x
    }

    pub fn velocity(&self) -> NVec2 {
        self.state.v
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeadBuffer {
    nodes: VecDeque<LeadNode>,
}

impl LeadBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Drop everything and start from a copy of `state` at time `t`
    pub fn seed(&mut self, state: BodyState, t: f64) {
        self.nodes.clear();
        self.nodes.push_back(LeadNode { state, t });
    }

    pub fn push_back(&mut self, node: LeadNode) {
        self.nodes.push_back(node);
    }

    pub fn pop_front(&mut self) -> SimResult<LeadNode> {
        self.nodes.pop_front().ok_or(SimError::EmptyLead)
    }

    pub fn front(&self) -> Option<&LeadNode> {
        self.nodes.front()
    }

    pub fn back(&self) -> Option<&LeadNode> {
        self.nodes.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LeadNode> {
        self.nodes.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = NVec2> + '_ {
        self.nodes.iter().map(LeadNode::position)
    }

    pub fn velocities(&self) -> impl Iterator<Item = NVec2> + '_ {
        self.nodes.iter().map(LeadNode::velocity)
    }
}

/// Validity of the lead buffers as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadState {
    /// No full lead has been calculated yet
    Uncalculated,
    /// Buffers follow from the live state
    Valid,
    /// A discontinuity (thrust, reparent) happened since the last full lead
    Stale,
}
