use std::fmt::{self, Debug, Display, Formatter};

use crate::actions::Actions;
use crate::level::Level;

/// Writes the initial board followed by the board after every push
/// (or after every action when `include_steps` is set).
pub struct SolutionFormatter<'a> {
    level: &'a Level,
    actions: &'a Actions,
    include_steps: bool,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(level: &'a Level, actions: &'a Actions, include_steps: bool) -> Self {
        Self {
            level,
            actions,
            include_steps,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let grid = &self.level.grid;
        writeln!(f, "{}", self.level.xsb())?;

        let mut agent = self.level.agent;
        let mut boxes = self.level.boxes.clone();
        for &action in self.actions {
            if Level::apply(grid, &mut agent, &mut boxes, action).is_none() {
                // actions from a different level
                return writeln!(f, "Illegal action: {}", action);
            }
            if action.is_push() || self.include_steps {
                writeln!(f, "{}", grid.format_with(Some(agent), &boxes))?;
            }
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::actions::{Action, ActionKind::*, Actions};
    use crate::data::Dir::*;
    use crate::level::Level;

    #[test]
    fn pushes_only() {
        let level: Level = "#@ $.#".parse().unwrap();
        let actions = Actions::new(vec![Action::new(Right, Move), Action::new(Right, Push)]);
        let expected = "#@ $.#\n\n#  @*#\n\n";
        assert_eq!(level.format_solution(&actions, false).to_string(), expected);
    }

    #[test]
    fn with_steps() {
        let level: Level = "#@ $.#".parse().unwrap();
        let actions = Actions::new(vec![Action::new(Right, Move), Action::new(Right, Push)]);
        let expected = "#@ $.#\n\n# @$.#\n\n#  @*#\n\n";
        assert_eq!(level.format_solution(&actions, true).to_string(), expected);
    }

    #[test]
    fn illegal() {
        let level: Level = "#@ $.#".parse().unwrap();
        let actions = Actions::new(vec![Action::new(Left, Move)]);
        let expected = "#@ $.#\n\nIllegal action: l\n";
        assert_eq!(level.format_solution(&actions, false).to_string(), expected);
    }
}
