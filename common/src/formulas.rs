//! Formula reference entries shown next to each simulation

/// An equation with its name and formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equation {
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
}

/// Equations and variable glossary for one topic
#[derive(Debug, Clone, Copy)]
pub struct FormulaSheet {
    pub title: &'static str,
    pub equations: &'static [Equation],
    pub variables: &'static [(&'static str, &'static str)],
}

impl FormulaSheet {
    /// Case-insensitive match against titles, names and formulas
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.equations.iter().any(|eq| {
                eq.name.to_lowercase().contains(&query)
                    || eq.formula.to_lowercase().contains(&query)
                    || eq.description.to_lowercase().contains(&query)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: FormulaSheet = FormulaSheet {
        title: "Simple Pendulum",
        equations: &[Equation {
            name: "Period",
            formula: "T = 2π√(L/g)",
            description: "Small-angle period",
        }],
        variables: &[("T", "Period")],
    };

    #[test]
    fn search_matches_title_and_equations() {
        assert!(SHEET.matches(""));
        assert!(SHEET.matches("pendulum"));
        assert!(SHEET.matches("PERIOD"));
        assert!(SHEET.matches("√(l/g)"));
        assert!(!SHEET.matches("snell"));
    }
}
