//! Compatibility rule set
//!
//! Every rule ties two categories together and is written once, oriented as
//! `(first, second)`. Checking a candidate for either side looks up the
//! occupant of the other side and runs the same predicate, so a part added
//! later can never silently invalidate one added earlier.
//!
//! Rules are pure: they read the candidate and the build and return a
//! verdict. A missing attribute on either part means "no constraint".

use crate::core::{Build, Category, Part};

/// The attribute a pair rule compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Socket,
    MemoryType,
    FormFactor,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attribute::Socket => write!(f, "socket"),
            Attribute::MemoryType => write!(f, "memory type"),
            Attribute::FormFactor => write!(f, "form factor"),
        }
    }
}

/// Why a placement was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The part belongs to a different category than the slot
    WrongCategory { part: Category, target: Category },
    /// The candidate disagrees with a part already in the build
    Conflict {
        attribute: Attribute,
        candidate: Category,
        candidate_value: String,
        occupant: Category,
        occupant_value: String,
    },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::WrongCategory { part, target } => {
                write!(f, "A {part} part cannot be installed in the {target} slot")
            }
            Rejection::Conflict {
                attribute,
                candidate,
                candidate_value,
                occupant,
                occupant_value,
            } => write!(
                f,
                "Incompatible! {occupant} {attribute} is {occupant_value} but {candidate} {attribute} is {candidate_value}"
            ),
        }
    }
}

impl std::error::Error for Rejection {}

/// `(first value, second value)` of a failed comparison
type Mismatch = (String, String);

/// A symmetric constraint between two categories
#[derive(Clone, Copy)]
pub struct PairRule {
    pub attribute: Attribute,
    pub first: Category,
    pub second: Category,
    check: fn(&Part, &Part) -> Option<Mismatch>,
}

impl std::fmt::Debug for PairRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairRule")
            .field("attribute", &self.attribute)
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

impl PairRule {
    pub const fn new(
        attribute: Attribute,
        first: Category,
        second: Category,
        check: fn(&Part, &Part) -> Option<Mismatch>,
    ) -> PairRule {
        PairRule {
            attribute,
            first,
            second,
            check,
        }
    }

    /// The other side of the pair, if `target` is part of it
    pub fn opposite(&self, target: Category) -> Option<Category> {
        if target == self.first {
            Some(self.second)
        } else if target == self.second {
            Some(self.first)
        } else {
            None
        }
    }

    /// Evaluate `candidate` for `target` against the build's occupant of the
    /// opposite category. An empty opposite slot always passes.
    pub fn evaluate(&self, candidate: &Part, target: Category, build: &Build) -> Result<(), Rejection> {
        let Some(opposite) = self.opposite(target) else {
            return Ok(());
        };
        let Some(occupant) = build.part(opposite).map(|part| part.as_ref()) else {
            return Ok(());
        };

        let outcome = if target == self.first {
            (self.check)(candidate, occupant)
        } else {
            (self.check)(occupant, candidate).map(|(first, second)| (second, first))
        };

        match outcome {
            None => Ok(()),
            Some((candidate_value, occupant_value)) => Err(Rejection::Conflict {
                attribute: self.attribute,
                candidate: target,
                candidate_value,
                occupant: opposite,
                occupant_value,
            }),
        }
    }
}

fn text_mismatch(first: Option<&String>, second: Option<&String>) -> Option<Mismatch> {
    match (first, second) {
        (Some(a), Some(b)) if a != b => Some((a.clone(), b.clone())),
        _ => None,
    }
}

fn socket_mismatch(cpu: &Part, board: &Part) -> Option<Mismatch> {
    text_mismatch(cpu.socket.as_ref(), board.socket.as_ref())
}

fn memory_type_mismatch(memory: &Part, board: &Part) -> Option<Mismatch> {
    text_mismatch(memory.memory_type.as_ref(), board.memory_type.as_ref())
}

fn form_factor_mismatch(board: &Part, case: &Part) -> Option<Mismatch> {
    match (board.parsed_form_factor(), case.parsed_form_factor()) {
        (Some(b), Some(c)) if !b.fits_in(c) => Some((b.to_string(), c.to_string())),
        _ => None,
    }
}

/// Processor and motherboard must share a socket
pub const SOCKET_RULE: PairRule = PairRule::new(
    Attribute::Socket,
    Category::Cpu,
    Category::Motherboard,
    socket_mismatch,
);

/// Memory kit and motherboard must share a memory generation
pub const MEMORY_TYPE_RULE: PairRule = PairRule::new(
    Attribute::MemoryType,
    Category::Memory,
    Category::Motherboard,
    memory_type_mismatch,
);

/// Motherboard must fit inside the case
pub const FORM_FACTOR_RULE: PairRule = PairRule::new(
    Attribute::FormFactor,
    Category::Motherboard,
    Category::Case,
    form_factor_mismatch,
);

/// Ordered list of pair rules, evaluated first to last
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<PairRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    /// Socket and memory-type checks
    pub fn standard() -> RuleSet {
        RuleSet {
            rules: vec![SOCKET_RULE, MEMORY_TYPE_RULE],
        }
    }

    /// Standard rules plus the case/motherboard form factor check
    pub fn strict() -> RuleSet {
        let mut rules = Self::standard();
        rules.push(FORM_FACTOR_RULE);
        rules
    }

    /// Append a rule; it runs after every existing one
    pub fn push(&mut self, rule: PairRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[PairRule] {
        &self.rules
    }

    /// Decide whether `candidate` may occupy `target` given `build`.
    /// Stops at the first failing rule.
    pub fn check(&self, candidate: &Part, target: Category, build: &Build) -> Result<(), Rejection> {
        if candidate.category != target {
            return Err(Rejection::WrongCategory {
                part: candidate.category,
                target,
            });
        }
        self.rules
            .iter()
            .try_for_each(|rule| rule.evaluate(candidate, target, build))
    }
}

/// Check `candidate` against the standard rule set
pub fn check_compatibility(candidate: &Part, target: Category, build: &Build) -> Result<(), Rejection> {
    RuleSet::standard().check(candidate, target, build)
}
