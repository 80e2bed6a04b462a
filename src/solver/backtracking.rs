use crate::actions::Actions;

use super::a_star::SearchNode;

/// Follows `prev` links from `final_node` to the root.
pub(crate) fn reconstruct_actions(final_node: &SearchNode<'_>) -> Actions {
    let mut actions = Actions::default();
    let mut cur = final_node;
    while let (Some(prev), Some(action)) = (cur.prev, cur.action) {
        actions.add(action);
        cur = prev;
    }
    actions.reverse();
    actions
}
