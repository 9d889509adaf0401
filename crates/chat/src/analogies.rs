//! Chemistry analogy glossary shown alongside the tutor chat

/// One concept-to-analogy mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analogy {
    pub concept: &'static str,
    pub analogy: &'static str,
    pub description: &'static str,
}

/// The tutor's core analogy table
pub const ANALOGIES: &[Analogy] = &[
    Analogy {
        concept: "Variable",
        analogy: "Labeled beaker ⚗️",
        description: "A container we pour data into and stick a label on.",
    },
    Analogy {
        concept: "Function",
        analogy: "Chemical reaction 💥",
        description: "Takes reactants (parameters) and yields a product (return value).",
    },
    Analogy {
        concept: "Print",
        analogy: "Observation log 📝",
        description: "Writing the outcome of the experiment into the lab notebook.",
    },
    Analogy {
        concept: "Error",
        analogy: "Spill / explosion ⚠️",
        description: "Something went wrong on the bench. No panic: clean up and retry.",
    },
    Analogy {
        concept: "Loop",
        analogy: "Centrifuge 🔄",
        description: "Repeating a step until a condition is met.",
    },
    Analogy {
        concept: "List",
        analogy: "Test tube rack 🧪",
        description: "A shelf holding several samples in order.",
    },
    Analogy {
        concept: "If / Else",
        analogy: "Litmus paper 🏳️‍🌈",
        description: "Deciding between actions depending on the result (acid or base?).",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glossary_covers_core_concepts() {
        assert!(ANALOGIES.iter().any(|a| a.concept == "Variable"));
        assert!(ANALOGIES.iter().any(|a| a.concept == "Function"));
    }
}
