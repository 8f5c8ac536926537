//! Node colours by type tag.

use crate::graph::NodeKind;

pub fn color_for(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Intent => "#7c3aed",
        NodeKind::Fact => "#0ea5e9",
        NodeKind::Intermediate => "#f59e0b",
        NodeKind::Conclusion => "#10b981",
        NodeKind::Constraint => "#ef4444",
        NodeKind::Context => "#94a3b8",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_kind_has_a_distinct_color() {
        let kinds = [
            NodeKind::Intent,
            NodeKind::Fact,
            NodeKind::Intermediate,
            NodeKind::Conclusion,
            NodeKind::Constraint,
            NodeKind::Context,
        ];
        let colors: HashSet<_> = kinds.iter().map(|&k| color_for(k)).collect();
        assert_eq!(colors.len(), kinds.len());
    }
}
