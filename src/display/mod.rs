// Terminal and LaTeX renderings of a computation.
mod latex;

pub use latex::Latex;

use std::fmt::{self, Display, Formatter};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::*;

use crate::math::{Matrix, Rational};
use crate::result::{ComputationResult, SpaceResult};

fn grid(matrix: &Matrix) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for row in matrix.rows() {
        table.add_row(
            row.iter()
                .map(|x| Cell::new(x).set_alignment(CellAlignment::Right))
                .collect::<Vec<_>>(),
        );
    }
    table
}

fn vector(v: &[Rational]) -> String {
    let entries: Vec<String> = v.iter().map(ToString::to_string).collect();
    format!("({})ᵀ", entries.join(", "))
}

fn basis_cell(space: &SpaceResult) -> String {
    if space.basis.is_trivial() {
        "{0}".to_string()
    } else {
        space
            .basis
            .vectors()
            .iter()
            .enumerate()
            .map(|(i, v)| format!("v{} = {}", i + 1, vector(v)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ComputationResult {
    pub fn display(&self) -> String {
        let (rows, cols) = self.shape();

        let mut title_table = Table::new();
        title_table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .add_row(vec![
                Cell::new(format!("Four Fundamental Subspaces of a {rows}×{cols} Matrix"))
                    .set_alignment(CellAlignment::Center),
            ]);

        let pivots = self
            .rref
            .pivots
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let mut summary = Table::new();
        summary
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Matrix").set_alignment(CellAlignment::Center),
                Cell::new("RREF").set_alignment(CellAlignment::Center),
            ])
            .add_row(vec![
                Cell::new(grid(&self.matrix.data)),
                Cell::new(grid(&self.rref.reduced)),
            ])
            .add_row(vec![
                Cell::new(format!("rank = {}", self.rank)),
                Cell::new(format!("pivots = [{pivots}]")),
            ]);

        let mut spaces = Table::new();
        spaces
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Subspace").set_alignment(CellAlignment::Center),
                Cell::new("Dimension").set_alignment(CellAlignment::Center),
                Cell::new("Ambient").set_alignment(CellAlignment::Center),
                Cell::new("Basis").set_alignment(CellAlignment::Center),
            ]);

        for (name, space) in [
            ("Column space C(A)", &self.column_space),
            ("Row space C(Aᵀ)", &self.row_space),
            ("Null space N(A)", &self.null_space),
            ("Left null space N(Aᵀ)", &self.left_null_space),
        ] {
            spaces.add_row(vec![
                Cell::new(name).set_alignment(CellAlignment::Left),
                Cell::new(space.dimension).set_alignment(CellAlignment::Right),
                Cell::new(&space.description).set_alignment(CellAlignment::Left),
                Cell::new(basis_cell(space)).set_alignment(CellAlignment::Left),
            ]);
        }

        let check = &self.dimension_check;
        let verdict = if check.valid { "🟢 Rank–nullity holds" } else { "🔴 Rank–nullity violated" };

        let mut checks = Table::new();
        checks
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .add_row(vec![Cell::new(&check.rank_plus_nullity)])
            .add_row(vec![Cell::new(&check.rank_plus_left_nullity)])
            .add_row(vec![Cell::new(verdict)]);

        format!("{title_table}\n{summary}\n{spaces}\n{checks}")
    }
}

impl Display for ComputationResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
