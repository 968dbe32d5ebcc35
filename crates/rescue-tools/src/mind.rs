use std::collections::BTreeSet;

use rescue_core::Cell;
use rescue_nav::WorldGraph;

/// Borrowed snapshot of everything the agent currently believes.
#[derive(Debug, Clone, Copy)]
pub struct MindView<'a> {
    pub graph: &'a WorldGraph,
    pub position: Cell,
    pub exit: Cell,
    pub plan: &'a [Cell],
    pub candidates: &'a [BTreeSet<Cell>],
}

impl MindView<'_> {
    fn glyph(&self, cell: Cell) -> char {
        if cell == self.position {
            return '@';
        }
        if cell == self.exit {
            return 'E';
        }
        if let Some(goal) = self.candidates.iter().position(|set| set.contains(&cell)) {
            return char::from_digit(goal as u32, 36).unwrap_or('?');
        }
        if self.plan.contains(&cell) {
            return '*';
        }
        ' '
    }
}

/// Draw the believed maze as ASCII.
///
/// Walls are drawn wherever the graph has no edge. Cells show `@` for the agent, `E` for the
/// exit, the goal index for candidate cells and `*` for the remaining plan.
pub fn render_mind(view: &MindView<'_>) -> String {
    let bounds = view.graph.bounds();
    let (width, height) = (bounds.width as i32, bounds.height as i32);
    let mut out = String::new();

    for y in 0..height {
        for x in 0..width {
            let cell = Cell::new(x, y);
            let open = y > 0 && view.graph.has_edge(cell, Cell::new(x, y - 1));
            out.push('+');
            out.push_str(if open { "   " } else { "---" });
        }
        out.push_str("+\n");

        for x in 0..width {
            let cell = Cell::new(x, y);
            let open = x > 0 && view.graph.has_edge(cell, Cell::new(x - 1, y));
            out.push(if open { ' ' } else { '|' });
            out.push(' ');
            out.push(view.glyph(cell));
            out.push(' ');
        }
        out.push_str("|\n");
    }

    for _ in 0..width {
        out.push_str("+---");
    }
    out.push_str("+\n");
    out
}
