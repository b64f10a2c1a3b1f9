//! Ordered table of schema-qualification rules
//!
//! Each rule pairs a case-insensitive pattern with a rewrite. The rules run
//! as independent passes, in the order of [`QualifyRule::ALL`], each pass
//! seeing the output of the previous one.
//!
//! A table name counts as already qualified when the captured identifier is
//! immediately followed by `.` (`sales.orders`, `` `sales`.`orders` ``).
//! Only [`QualifyRule::Ddl`] ignores that check.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static UPDATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)UPDATE\s+(`?\w+`?)").unwrap());

static FROM_JOIN_INTO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(FROM|JOIN|INTO)\s+(`?\w+`?)").unwrap());

static DDL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(CREATE|ALTER|DROP)\s+(TABLE|VIEW|TRIGGER|PROCEDURE|FUNCTION)\s+(`?\w+`?)")
        .unwrap()
});

static INSERT_INTO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(INSERT\s+INTO)\s+(`?\w+`?)").unwrap());

/// One pattern-driven qualification rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualifyRule {
    /// `UPDATE <name>`, except in `ON UPDATE ...` column clauses
    Update,
    /// `FROM <name>`, `JOIN <name>`, `INTO <name>`
    FromJoinInto,
    /// `CREATE|ALTER|DROP TABLE|VIEW|TRIGGER|PROCEDURE|FUNCTION <name>`, always rewritten
    Ddl,
    /// `INSERT INTO <name>`
    InsertInto,
}

impl QualifyRule {
    /// All rules in application order
    pub const ALL: [QualifyRule; 4] = [
        QualifyRule::Update,
        QualifyRule::FromJoinInto,
        QualifyRule::Ddl,
        QualifyRule::InsertInto,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QualifyRule::Update => "update",
            QualifyRule::FromJoinInto => "from-join-into",
            QualifyRule::Ddl => "ddl",
            QualifyRule::InsertInto => "insert-into",
        }
    }

    /// The compiled pattern this rule matches with
    pub fn pattern(self) -> &'static Regex {
        match self {
            QualifyRule::Update => &UPDATE_RE,
            QualifyRule::FromJoinInto => &FROM_JOIN_INTO_RE,
            QualifyRule::Ddl => &DDL_RE,
            QualifyRule::InsertInto => &INSERT_INTO_RE,
        }
    }

    /// Capture group holding the table name
    fn name_group(self) -> usize {
        match self {
            QualifyRule::Update => 1,
            QualifyRule::FromJoinInto | QualifyRule::InsertInto => 2,
            QualifyRule::Ddl => 3,
        }
    }

    /// Whether an already-qualified name is left alone
    pub fn checks_qualified(self) -> bool {
        !matches!(self, QualifyRule::Ddl)
    }

    /// Apply this rule to every match in `text`
    pub fn apply(self, text: &str, schema: &str) -> String {
        let mut result = String::with_capacity(text.len() + schema.len() * 2);
        let mut last_end = 0;

        for caps in self.pattern().captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let Some(name) = caps.get(self.name_group()) else {
                continue;
            };

            if self.checks_qualified() && is_qualified(name.as_str(), &text[name.end()..]) {
                continue;
            }
            if self == QualifyRule::Update && follows_on_keyword(&text[..whole.start()]) {
                continue;
            }

            result.push_str(&text[last_end..whole.start()]);
            result.push_str(&self.replacement(&caps, schema, name.as_str()));
            last_end = whole.end();
        }

        result.push_str(&text[last_end..]);
        result
    }

    fn replacement(self, caps: &Captures<'_>, schema: &str, name: &str) -> String {
        let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");
        match self {
            QualifyRule::Update => format!("UPDATE {}.{}", schema, name),
            QualifyRule::FromJoinInto | QualifyRule::InsertInto => {
                format!("{} {}.{}", group(1), schema, name)
            }
            QualifyRule::Ddl => format!("{} {} {}.{}", group(1), group(2), schema, name),
        }
    }
}

/// A name is qualified if it carries a `.` or is the head of a dotted path
fn is_qualified(name: &str, rest: &str) -> bool {
    name.contains('.') || rest.starts_with('.')
}

/// True when `before` ends with `ON` followed by exactly one whitespace character
fn follows_on_keyword(before: &str) -> bool {
    let mut chars = before.chars().rev();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(ws), Some(n), Some(o)) => {
            ws.is_whitespace() && n.eq_ignore_ascii_case(&'N') && o.eq_ignore_ascii_case(&'O')
        }
        _ => false,
    }
}
