use crate::math::{Matrix, Rational};

/// Math-typeset rendering in the `\left[\begin{matrix} ... \end{matrix}\right]` style.
pub trait Latex {
    fn latex(&self) -> String;
}

impl Latex for Rational {
    /// `3`, `-3`, `\frac{1}{2}`, `- \frac{1}{2}`.
    fn latex(&self) -> String {
        if self.is_integer() {
            return self.numer().to_string();
        }
        let abs = self.abs();
        let frac = format!(r"\frac{{{}}}{{{}}}", abs.numer(), abs.denom());
        if self.is_negative() {
            format!("- {frac}")
        } else {
            frac
        }
    }
}

fn bracket(rows: impl Iterator<Item = String>) -> String {
    let body: Vec<String> = rows.collect();
    format!(r"\left[\begin{{matrix}}{}\end{{matrix}}\right]", body.join(r"\\"))
}

impl Latex for Matrix {
    fn latex(&self) -> String {
        bracket(self.rows().iter().map(|row| {
            row.iter().map(Latex::latex).collect::<Vec<_>>().join(" & ")
        }))
    }
}

/// A vector renders as a column.
impl Latex for [Rational] {
    fn latex(&self) -> String {
        bracket(self.iter().map(Latex::latex))
    }
}
