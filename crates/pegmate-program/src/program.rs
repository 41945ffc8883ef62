//! Rule table.

use std::fmt;

use crate::Combinator;

/// Index of a rule in its [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub u16);

impl RuleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// A named, callable rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub body: Combinator,
    /// Whether a call produces its own named node. Uncaptured rules splice
    /// their output into the caller.
    pub capture: bool,
}

impl Rule {
    pub fn new(name: impl Into<String>, body: Combinator) -> Self {
        Self {
            name: name.into(),
            body,
            capture: true,
        }
    }

    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error("program has no rules")]
    Empty,

    #[error("too many rules ({0}), at most {max} are supported", max = u16::MAX)]
    TooManyRules(usize),

    #[error("entry rule {0} is out of range")]
    EntryOutOfRange(RuleId),

    #[error("rule `{rule}` calls {target}, which does not exist")]
    DanglingCall { rule: String, target: RuleId },

    #[error("rule name `{0}` is used twice")]
    DuplicateName(String),
}

/// A compiled parser: rules plus the entry rule a whole-input parse starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    rules: Vec<Rule>,
    entry: RuleId,
}

impl Program {
    /// Build a program, checking that every call target exists.
    pub fn new(rules: Vec<Rule>, entry: RuleId) -> Result<Self, ProgramError> {
        if rules.is_empty() {
            return Err(ProgramError::Empty);
        }
        if rules.len() > u16::MAX as usize {
            return Err(ProgramError::TooManyRules(rules.len()));
        }
        if entry.index() >= rules.len() {
            return Err(ProgramError::EntryOutOfRange(entry));
        }

        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.name == rule.name) {
                return Err(ProgramError::DuplicateName(rule.name.clone()));
            }
            let mut dangling = None;
            rule.body.walk(&mut |c| {
                if let Combinator::Call(target) = c
                    && target.index() >= rules.len()
                {
                    dangling.get_or_insert(*target);
                }
            });
            if let Some(target) = dangling {
                return Err(ProgramError::DanglingCall {
                    rule: rule.name.clone(),
                    target,
                });
            }
        }

        Ok(Self { rules, entry })
    }

    pub fn entry(&self) -> RuleId {
        self.entry
    }

    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id.index()]
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<RuleId> {
        self.rules
            .iter()
            .position(|r| r.name == name)
            .map(|i| RuleId(i as u16))
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, r)| (RuleId(i as u16), r))
    }

    /// Every distinct `(pattern, repeat)` pair in the program, in first-use order.
    pub fn patterns(&self) -> Vec<(&str, u32)> {
        let mut out: Vec<(&str, u32)> = Vec::new();
        for rule in &self.rules {
            rule.body.walk(&mut |c| {
                if let Combinator::Pattern { pattern, repeat } = c {
                    let key = (pattern.as_str(), *repeat);
                    if !out.contains(&key) {
                        out.push(key);
                    }
                }
            });
        }
        out
    }
}
