use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Move,
    Push,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub dir: Dir,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(dir: Dir, kind: ActionKind) -> Self {
        Action { dir, kind }
    }

    pub fn is_push(self) -> bool {
        self.kind == ActionKind::Push
    }
}

/// LURD notation - pushes are uppercase.
impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_push() {
            write!(f, "{}", self.dir.to_string().to_uppercase())
        } else {
            write!(f, "{}", self.dir)
        }
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Actions(Vec<Action>);

impl Actions {
    pub fn new(actions: Vec<Action>) -> Self {
        Actions(actions)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every action, steps and pushes alike, moves the agent.
    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn push_cnt(&self) -> usize {
        self.0.iter().filter(|a| a.is_push()).count()
    }

    pub(crate) fn add(&mut self, action: Action) {
        self.0.push(action);
    }

    pub(crate) fn reverse(&mut self) {
        self.0.reverse();
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Action> {
        self.0.iter()
    }
}

impl IntoIterator for Actions {
    type Item = Action;
    type IntoIter = ::std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Actions {
    type Item = &'a Action;
    type IntoIter = ::std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Actions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for action in self {
            write!(f, "{}", action)?;
        }
        Ok(())
    }
}

impl Debug for Actions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
