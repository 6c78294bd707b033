//! The forward A* search itself.

use tracing::trace;

use crate::action::{Action, Actions};
use crate::agent::Agent;
use crate::goal::Goal;
use crate::planner::node::{Node, NodeId, NodeStatus, OpenEntry};
use crate::planner::{PlanStats, Planner};
use crate::state::WorldState;

impl Planner {
    /// Runs A* from the agent's world toward `goal`. Returns the step
    /// list (sentinel root first) or an empty vector when the open set
    /// drains without reaching the goal.
    pub(crate) fn search(&mut self, agent: &Agent, goal: &Goal, max_depth: u16) -> Vec<Action> {
        self.nodes.clear();
        self.open.clear();
        self.index.clear();
        self.seq = 0;
        self.stats = PlanStats::default();

        let sensors = agent.sensors();
        let actions = agent.actions();

        // Actions whose every effect already holds cannot move the search
        // anywhere new; dropping them once up front prunes the whole tree.
        let impacting: Vec<usize> = actions
            .iter()
            .enumerate()
            .filter(|(_, action)| !action.effects().already_satisfied(agent.world()))
            .map(|(idx, _)| idx)
            .collect();
        trace!(
            registered = actions.len(),
            impacting = impacting.len(),
            "action pre-filter"
        );

        let root = Node {
            action: None,
            world: agent.world().clone(),
            parent: None,
            g: 0.0,
            f: 0.0,
            h: 0.0,
            depth: 0,
            status: NodeStatus::Open,
        };
        self.index.insert(root.world.fingerprint(), 0);
        self.nodes.push(root);
        self.push_open(0);

        while let Some(entry) = self.open.pop() {
            let current = entry.node as usize;
            {
                let node = &self.nodes[current];
                // Entries left behind by re-routing or closing are stale.
                if node.status != NodeStatus::Open || node.f != entry.f {
                    continue;
                }
            }

            if self.nodes[current].depth > max_depth {
                self.nodes[current].status = NodeStatus::Closed;
                continue;
            }

            if goal.satisfied(&self.nodes[current].world, sensors) {
                return self.reconstruct(current, actions);
            }

            self.nodes[current].status = NodeStatus::Closed;
            self.stats.nodes_expanded += 1;

            for &action_idx in &impacting {
                let action = actions.get(action_idx);
                if !action.repeatable() && self.path_contains(current, action_idx) {
                    continue;
                }

                let parent = &self.nodes[current];
                if !action.preconditions().check(&parent.world, sensors) {
                    continue;
                }
                let Some(successor) = simulate(action, &parent.world) else {
                    continue;
                };

                let tentative_g = parent.g + action.cost();
                let depth = parent.depth + 1;
                let fingerprint = successor.fingerprint();

                match self.index.get(&fingerprint).copied() {
                    Some(known_id) => {
                        let known = known_id as usize;
                        if tentative_g < self.nodes[known].g {
                            let reopening = self.nodes[known].status == NodeStatus::Closed;
                            let node = &mut self.nodes[known];
                            node.action = Some(action_idx);
                            node.parent = Some(current as NodeId);
                            node.g = tentative_g;
                            node.f = tentative_g + node.h;
                            node.depth = depth;
                            node.status = NodeStatus::Open;
                            if reopening {
                                self.stats.reopened += 1;
                            }
                            self.push_open(known);
                        }
                    }
                    None => {
                        let h = goal.conditions().distance(&successor, sensors);
                        let node_id = self.nodes.len();
                        self.index.insert(fingerprint, node_id as NodeId);
                        self.nodes.push(Node {
                            action: Some(action_idx),
                            world: successor,
                            parent: Some(current as NodeId),
                            g: tentative_g,
                            f: tentative_g + h,
                            h,
                            depth,
                            status: NodeStatus::Open,
                        });
                        self.push_open(node_id);
                        self.stats.nodes_generated += 1;
                    }
                }
            }
        }

        trace!("open set exhausted without reaching the goal");
        Vec::new()
    }

    fn push_open(&mut self, node_id: usize) {
        let f = self.nodes[node_id].f;
        self.seq += 1;
        self.open.push(OpenEntry {
            f,
            seq: self.seq,
            node: node_id as NodeId,
        });
    }

    /// Whether `action_idx` already occurs on the path from the root to
    /// `node_id`. Non-repeatable actions are rejected per path, not per
    /// search tree: sibling branches may each use the action once.
    fn path_contains(&self, mut node_id: usize, action_idx: usize) -> bool {
        loop {
            let node = &self.nodes[node_id];
            if node.action == Some(action_idx) {
                return true;
            }
            match node.parent {
                Some(parent) => node_id = parent as usize,
                None => return false,
            }
        }
    }

    /// Walks parent links from the goal node back to the root and reverses,
    /// materializing the sentinel for the root slot.
    fn reconstruct(&self, node_id: usize, actions: &Actions) -> Vec<Action> {
        let mut steps = Vec::with_capacity(self.nodes[node_id].depth as usize + 1);
        let mut cursor = Some(node_id);
        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            steps.push(match node.action {
                Some(action_idx) => actions.get(action_idx).clone(),
                None => Action::sentinel(),
            });
            cursor = node.parent.map(|p| p as usize);
        }
        steps.reverse();
        steps
    }
}

/// Clones the parent world and applies the action's effects, maintaining
/// the fingerprint entry by entry. Returns `None` for no-op transitions
/// (every effect already satisfied) and for any effect failure; both mean
/// the branch is infeasible.
fn simulate(action: &Action, world: &WorldState) -> Option<WorldState> {
    if action.effects().already_satisfied(world) {
        return None;
    }
    let mut successor = world.clone();
    match action.effects().apply(&mut successor) {
        Ok(()) => Some(successor),
        Err(error) => {
            trace!(action = action.name(), %error, "successor rejected");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::effect::Effect;
    use crate::goal::Goals;

    fn agent_with(goals: Goals, actions: Vec<Action>) -> Agent {
        Agent::new(goals, Actions::from(actions))
    }

    #[test]
    fn pre_filter_drops_settled_actions() {
        let goals = Goals::new().with(
            "armed",
            Goal::fixed(1.0).with_condition(Condition::eq(1, true)),
        );
        // Key 2 already true: the second action cannot impact the world.
        let mut agent = agent_with(
            goals,
            vec![
                Action::new("arm").with_effect(Effect::set(1, true)),
                Action::new("settled").with_effect(Effect::set(2, true)),
            ],
        );
        agent.set_state(1, false);
        agent.set_state(2, true);

        let mut planner = Planner::new();
        let plan = planner.plan(&agent, 5);
        assert_eq!(plan.len(), 2);
        // Only "arm" was ever simulated.
        assert_eq!(planner.stats().nodes_generated, 1);
    }

    #[test]
    fn cheaper_route_reopens_through_equal_fingerprints() {
        // Both routes land on the same world; the planner must keep the
        // cheaper one no matter which is generated first.
        let goals = Goals::new().with(
            "there",
            Goal::fixed(1.0).with_condition(Condition::eq(1, 100i64)),
        );
        let mut agent = agent_with(
            goals,
            vec![
                Action::new("expensive")
                    .with_cost(10.0)
                    .with_effect(Effect::set(1, 100i64)),
                Action::new("cheap")
                    .with_cost(1.0)
                    .with_effect(Effect::set(1, 100i64)),
            ],
        );
        agent.set_state(1, 0i64);

        let mut planner = Planner::new();
        let plan = planner.plan(&agent, 5);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.next_action().unwrap().name(), "cheap");
        assert_eq!(plan.total_cost(), 1.0);
    }

    #[test]
    fn depth_bound_cuts_the_search_off() {
        let goals = Goals::new().with(
            "far",
            Goal::fixed(1.0).with_condition(Condition::eq(1, 5i64)),
        );
        let mut agent = agent_with(
            goals,
            vec![Action::new("step").with_effect(Effect::add(1, 1i64))],
        );
        agent.set_state(1, 0i64);

        let mut planner = Planner::new();
        assert!(planner.plan(&agent, 3).is_empty());
        assert_eq!(planner.plan(&agent, 5).len(), 6);
    }

    #[test]
    fn buffers_survive_reuse_across_invocations() {
        let goals = Goals::new().with(
            "there",
            Goal::fixed(1.0).with_condition(Condition::eq(1, 3i64)),
        );
        let mut agent = agent_with(
            goals,
            vec![Action::new("step").with_effect(Effect::add(1, 1i64))],
        );
        agent.set_state(1, 0i64);

        let mut planner = Planner::new();
        let first = planner.plan(&agent, 10);
        let second = planner.plan(&agent, 10);
        assert_eq!(first.len(), second.len());
        assert_eq!(first.total_cost(), second.total_cost());
    }
}
