//! UCT search tree over an index-based node arena.
//!
//! Nodes live in a growable `Vec` owned by the tree, with the root at index 0
//! and parent/child links stored as indices. A tree is built for exactly one
//! decision and discarded afterwards.

use log::debug;
use rand::Rng;

use crate::battle::action::GameAction;
use crate::battle::simulator::BattleSimulator;
use crate::mcts::rollout::rollout;

const ROOT: usize = 0;

/// A node in the search tree
#[derive(Debug, Clone)]
struct SearchNode {
    /// Index of the parent node; None only at the root
    parent: Option<usize>,
    /// Action that produced this node from its parent; None only at the root
    incoming: Option<GameAction>,
    /// Legal actions not yet expanded from this node's state snapshot
    untried: Vec<GameAction>,
    /// Indices of child nodes
    children: Vec<usize>,
    /// Number of backpropagations through this node
    visits: usize,
    /// Cumulative reward backpropagated through this node
    total_value: f64,
}

impl SearchNode {
    fn average_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_value / self.visits as f64
        }
    }
}

/// Search tree for one decision
#[derive(Debug)]
pub struct SearchTree {
    exploration: f64,
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Creates a tree whose root holds the live legal actions as untried.
    pub fn new(exploration: f64, untried: Vec<GameAction>) -> Self {
        SearchTree {
            exploration,
            nodes: vec![SearchNode {
                parent: None,
                incoming: None,
                untried,
                children: Vec::new(),
                visits: 0,
                total_value: 0.0,
            }],
        }
    }

    /// One full MCTS iteration against a private simulation clone:
    /// selection, expansion, rollout, backpropagation.
    pub fn step<S: BattleSimulator, R: Rng>(&mut self, sim: &mut S, rng: &mut R) {
        // Selection
        let mut current = ROOT;
        while !sim.ended()
            && self.nodes[current].untried.is_empty()
            && !self.nodes[current].children.is_empty()
        {
            current = self.uct_select(current, rng);
            if let Some(action) = self.nodes[current].incoming {
                sim.apply(&action);
            }
        }

        // Expansion
        if !sim.ended() && !self.nodes[current].untried.is_empty() {
            current = self.expand(current, sim, rng);
        }

        // Rollout
        let reward = rollout(sim, rng);

        // Backpropagation
        self.backpropagate(current, reward);
    }

    /// Selects a child of `parent` by UCB1 score.
    ///
    /// A zero-visit child scores +infinity and therefore always wins over any
    /// visited child, so every freshly expanded node gets one exploratory
    /// rollout before exploitation weighs in. Ties are broken by
    /// first-encountered-max, a deliberate policy so outcomes are
    /// deterministic under a fixed seed.
    fn uct_select<R: Rng>(&self, parent: usize, rng: &mut R) -> usize {
        let node = &self.nodes[parent];
        // Floored at 1 so the logarithm is defined on the first pass
        let parent_visits = node.visits.max(1) as f64;

        let mut best: Option<usize> = None;
        let mut best_score = f64::NEG_INFINITY;
        for &child_index in &node.children {
            let child = &self.nodes[child_index];
            let score = if child.visits > 0 {
                let exploit = child.total_value / child.visits as f64;
                let explore =
                    self.exploration * (parent_visits.ln() / child.visits as f64).sqrt();
                exploit + explore
            } else {
                f64::INFINITY
            };
            if score > best_score {
                best = Some(child_index);
                best_score = score;
            }
        }

        match best {
            Some(index) => index,
            None => node.children[rng.random_range(0..node.children.len())],
        }
    }

    /// Expands one untried action of `parent`, chosen uniformly at random,
    /// and returns the new child's index.
    fn expand<S: BattleSimulator, R: Rng>(
        &mut self,
        parent: usize,
        sim: &mut S,
        rng: &mut R,
    ) -> usize {
        let pick = rng.random_range(0..self.nodes[parent].untried.len());
        let action = self.nodes[parent].untried.swap_remove(pick);
        sim.apply(&action);

        let child_index = self.nodes.len();
        self.nodes.push(SearchNode {
            parent: Some(parent),
            incoming: Some(action),
            untried: sim.legal_actions(),
            children: Vec::new(),
            visits: 0,
            total_value: 0.0,
        });
        self.nodes[parent].children.push(child_index);
        child_index
    }

    /// Adds the reward and increments visits from `node` up to the root,
    /// inclusive.
    fn backpropagate(&mut self, node: usize, reward: f64) {
        let mut current = Some(node);
        while let Some(index) = current {
            self.nodes[index].visits += 1;
            self.nodes[index].total_value += reward;
            current = self.nodes[index].parent;
        }
    }

    /// Incoming action of the root child with the most visits
    /// (first-encountered-max on ties), or None when the root has no
    /// children. Visit count is the criterion rather than average value: it
    /// is less sensitive to variance from few rollouts.
    pub fn best_action(&self) -> Option<GameAction> {
        let mut best: Option<&SearchNode> = None;
        for &child_index in &self.nodes[ROOT].children {
            let child = &self.nodes[child_index];
            if best.is_none_or(|b| child.visits > b.visits) {
                best = Some(child);
            }
        }
        best.and_then(|node| node.incoming)
    }

    /// Dumps the tree at debug level: one line per node with its action,
    /// visit count and average value, indented by depth. Diagnostic only.
    pub fn log_tree(&self) {
        self.log_subtree(ROOT, 0);
    }

    fn log_subtree(&self, index: usize, depth: usize) {
        let node = &self.nodes[index];
        let action = match node.incoming {
            Some(action) => action.to_string(),
            None => "root".to_string(),
        };
        debug!(
            "{:indent$}node action={} visits={} avg={:.3}",
            "",
            action,
            node.visits,
            node.average_value(),
            indent = depth * 2
        );
        for &child_index in &node.children {
            self.log_subtree(child_index, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::card::CardKind;
    use crate::mcts::test_util::ScriptedBattle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn play(kind: CardKind) -> GameAction {
        GameAction::Play(kind)
    }

    fn winning_branch_battle() -> ScriptedBattle {
        ScriptedBattle::branching(
            vec![play(CardKind::Strike), play(CardKind::Defend), GameAction::EndTurn],
            vec![
                (play(CardKind::Strike), (1.0, 1.0)),
                (play(CardKind::Defend), (0.5, 0.0)),
                (GameAction::EndTurn, (0.5, 0.0)),
            ],
        )
    }

    /// Tree with a root and two hand-built children for selection tests
    fn two_child_tree() -> SearchTree {
        let mut tree = SearchTree::new(1.0, Vec::new());
        for kind in [CardKind::Strike, CardKind::Defend] {
            let index = tree.nodes.len();
            tree.nodes.push(SearchNode {
                parent: Some(ROOT),
                incoming: Some(play(kind)),
                untried: Vec::new(),
                children: Vec::new(),
                visits: 0,
                total_value: 0.0,
            });
            tree.nodes[ROOT].children.push(index);
        }
        tree
    }

    #[test]
    fn test_backpropagation_updates_whole_ancestor_chain() {
        let battle = winning_branch_battle();
        let mut tree = SearchTree::new(1.0, battle.legal_actions());
        let mut rng = StdRng::seed_from_u64(1);

        let iterations = 50;
        let mut reward_sum = 0.0;
        for _ in 0..iterations {
            let mut sim = battle.clone_with_fresh_randomness();
            tree.step(&mut sim, &mut rng);
            reward_sum += match sim.applied.first() {
                Some(action) if *action == play(CardKind::Strike) => 1.0,
                _ => 0.0,
            };
        }

        let root = &tree.nodes[ROOT];
        assert_eq!(root.visits, iterations);
        assert!((root.total_value - reward_sum).abs() < 1e-9);

        let child_visits: usize = root
            .children
            .iter()
            .map(|&c| tree.nodes[c].visits)
            .sum();
        assert_eq!(child_visits, iterations);
        for &child_index in &root.children {
            let child = &tree.nodes[child_index];
            assert_eq!(child.parent, Some(ROOT));
            assert!(child.incoming.is_some());
            if child.visits == 0 {
                assert_eq!(child.total_value, 0.0);
            }
        }
    }

    #[test]
    fn test_uct_prefers_unvisited_child() {
        let mut tree = two_child_tree();
        tree.nodes[ROOT].visits = 10;
        let first = tree.nodes[ROOT].children[0];
        tree.nodes[first].visits = 9;
        tree.nodes[first].total_value = 9.0; // perfect record so far

        let mut rng = StdRng::seed_from_u64(0);
        let second = tree.nodes[ROOT].children[1];
        assert_eq!(tree.uct_select(ROOT, &mut rng), second);
    }

    #[test]
    fn test_uct_ties_break_on_first_child() {
        let mut tree = two_child_tree();
        tree.nodes[ROOT].visits = 8;
        for &child in tree.nodes[ROOT].children.clone().iter() {
            tree.nodes[child].visits = 4;
            tree.nodes[child].total_value = 2.0;
        }

        let mut rng = StdRng::seed_from_u64(0);
        let first = tree.nodes[ROOT].children[0];
        assert_eq!(tree.uct_select(ROOT, &mut rng), first);
    }

    #[test]
    fn test_uct_parent_visits_floored_before_log() {
        let mut tree = two_child_tree();
        // Parent never backpropagated yet; children visited once each
        for &child in tree.nodes[ROOT].children.clone().iter() {
            tree.nodes[child].visits = 1;
            tree.nodes[child].total_value = 0.5;
        }

        let mut rng = StdRng::seed_from_u64(0);
        let selected = tree.uct_select(ROOT, &mut rng);
        // ln(max(0, 1)) = 0, so scores are finite and the first child wins
        assert_eq!(selected, tree.nodes[ROOT].children[0]);
    }

    #[test]
    fn test_expansion_consumes_each_action_once() {
        let battle = winning_branch_battle();
        let mut tree = SearchTree::new(1.0, battle.legal_actions());
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..3 {
            let mut sim = battle.clone_with_fresh_randomness();
            tree.step(&mut sim, &mut rng);
        }

        let root = &tree.nodes[ROOT];
        assert!(root.untried.is_empty());
        assert_eq!(root.children.len(), 3);
        let mut expanded: Vec<GameAction> = root
            .children
            .iter()
            .filter_map(|&c| tree.nodes[c].incoming)
            .collect();
        expanded.sort_by_key(|a| a.to_string());
        let mut expected = battle.legal_actions();
        expected.sort_by_key(|a| a.to_string());
        assert_eq!(expanded, expected);
    }

    #[test]
    fn test_best_action_is_most_visited() {
        let battle = winning_branch_battle();
        let mut tree = SearchTree::new(1.0, battle.legal_actions());
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..100 {
            let mut sim = battle.clone_with_fresh_randomness();
            tree.step(&mut sim, &mut rng);
        }

        assert_eq!(tree.best_action(), Some(play(CardKind::Strike)));
        let strike_child = tree.nodes[ROOT]
            .children
            .iter()
            .find(|&&c| tree.nodes[c].incoming == Some(play(CardKind::Strike)))
            .copied()
            .unwrap();
        for &child in &tree.nodes[ROOT].children {
            if child != strike_child {
                assert!(tree.nodes[strike_child].visits >= tree.nodes[child].visits);
            }
        }
    }

    #[test]
    fn test_best_action_none_without_children() {
        let tree = SearchTree::new(1.0, vec![GameAction::EndTurn]);
        assert_eq!(tree.best_action(), None);
    }

    #[test]
    fn test_best_action_tie_breaks_on_first_child() {
        let mut tree = two_child_tree();
        for &child in tree.nodes[ROOT].children.clone().iter() {
            tree.nodes[child].visits = 5;
            tree.nodes[child].total_value = 2.5;
        }
        assert_eq!(tree.best_action(), Some(play(CardKind::Strike)));
    }

    #[test]
    fn test_rollout_reward_zero_when_health_reaches_zero() {
        // Every branch dies with partial score; all rewards must be 0
        let battle = ScriptedBattle::branching(
            vec![play(CardKind::Strike), GameAction::EndTurn],
            vec![
                (play(CardKind::Strike), (0.8, 0.0)),
                (GameAction::EndTurn, (0.6, 0.0)),
            ],
        );
        let mut tree = SearchTree::new(1.0, battle.legal_actions());
        let mut rng = StdRng::seed_from_u64(6);

        for _ in 0..20 {
            let mut sim = battle.clone_with_fresh_randomness();
            tree.step(&mut sim, &mut rng);
        }

        assert_eq!(tree.nodes[ROOT].visits, 20);
        assert_eq!(tree.nodes[ROOT].total_value, 0.0);
    }
}
