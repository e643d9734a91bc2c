use crate::game::PuzzleState;

use super::Path;

/// Index of a state recorded in a [`Trail`].
pub(crate) type Link = usize;

/// Parent-pointer arena. Frontiers hold links instead of whole paths and a
/// path is only materialised once a goal is reached.
#[derive(Default)]
pub(crate) struct Trail {
    nodes: Vec<(PuzzleState, Option<Link>)>,
}

impl Trail {
    pub(crate) fn new() -> Trail {
        Trail { nodes: vec![] }
    }
    pub(crate) fn root(&mut self, state: PuzzleState) -> Link {
        self.push(state, None)
    }
    pub(crate) fn push(&mut self, state: PuzzleState, parent: Option<Link>) -> Link {
        self.nodes.push((state, parent));
        return self.nodes.len() - 1;
    }
    pub(crate) fn state(&self, link: Link) -> &PuzzleState {
        &self.nodes[link].0
    }
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
    pub(crate) fn path_to(&self, mut link: Link) -> Path {
        let mut states = vec![self.nodes[link].0.clone()];
        while let Some(parent) = self.nodes[link].1 {
            states.push(self.nodes[parent].0.clone());
            link = parent;
        }
        states.reverse();
        return Path::new(states);
    }
}
