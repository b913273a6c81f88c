use std::collections::HashMap;

use serde::Serialize;

/// A single sanitizer or check applied to one form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Strip surrounding whitespace before any check runs
    Trim,
    /// HTML-escape the value after all checks ran
    Escape,
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// Optional sign, digits, at most one decimal point
    Numeric,
    /// Numbers below zero fail; non-numbers are left to `Numeric`
    NonNegative,
    /// Numbers with a fractional part fail; non-numbers are left to `Numeric`
    WholeNumber,
    /// Numbers too large for an `f64` fail
    Finite,
    /// Whole numbers outside the `i64` range fail
    IntegerRange,
}

/// Rule paired with the message reported when it fails
///
/// Sanitizers (`Trim`, `Escape`) never report, their message is empty.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub rule: Rule,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn sanitize(rule: Rule) -> Self {
        Self { rule, message: "" }
    }

    pub const fn check(rule: Rule, message: &'static str) -> Self {
        Self { rule, message }
    }
}

/// Ordered rules for one named field
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [FieldRule],
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Outcome of running a rule table over raw form input
#[derive(Debug, Clone, Default)]
pub struct Validated {
    values: HashMap<String, String>,
    violations: Vec<Violation>,
}

impl Validated {
    /// Sanitized value of a field, empty when the field was not submitted
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Run `table` over the raw `input`
///
/// Every check on a field runs even when an earlier one failed, all against
/// the trimmed value. Sanitizing happens whether or not the field passed.
pub fn validate(table: &[FieldRules], input: &HashMap<String, String>) -> Validated {
    let mut validated = Validated::default();

    for field_rules in table {
        let mut value = input
            .get(field_rules.field)
            .cloned()
            .unwrap_or_default();

        for field_rule in field_rules.rules {
            match field_rule.rule {
                Rule::Trim => value = value.trim().to_string(),
                Rule::Escape => value = escape_html(&value),
                check => {
                    if !passes(check, &value) {
                        validated.violations.push(Violation {
                            field: field_rules.field.to_string(),
                            message: field_rule.message.to_string(),
                        });
                    }
                }
            }
        }

        validated.values.insert(field_rules.field.to_string(), value);
    }

    validated
}

fn passes(rule: Rule, value: &str) -> bool {
    match rule {
        Rule::Trim | Rule::Escape => true,
        Rule::Required => !value.is_empty(),
        Rule::MinLength(min) => value.chars().count() >= min,
        Rule::MaxLength(max) => value.chars().count() <= max,
        Rule::Numeric => is_numeric(value),
        Rule::NonNegative => parse_number(value).is_none_or(|n| n >= 0.0),
        Rule::WholeNumber => {
            !is_numeric(value)
                || value
                    .split_once('.')
                    .is_none_or(|(_, fraction)| fraction.chars().all(|c| c == '0'))
        }
        Rule::Finite => !is_numeric(value) || parse_number(value).is_some(),
        Rule::IntegerRange => {
            !is_numeric(value)
                || !passes(Rule::WholeNumber, value)
                || parse_whole_number(value).is_some()
        }
    }
}

/// Decimal notation only: `12`, `-3`, `+0.5`, `.25`; no exponent, no `inf`
pub fn is_numeric(value: &str) -> bool {
    let digits = value
        .strip_prefix('+')
        .or_else(|| value.strip_prefix('-'))
        .unwrap_or(value);

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    match fraction {
        Some(fraction) => !fraction.is_empty() && all_digits(whole) && all_digits(fraction),
        None => !whole.is_empty() && all_digits(whole),
    }
}

/// Finite `f64` for a numeric value
pub fn parse_number(value: &str) -> Option<f64> {
    if !is_numeric(value) {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Exact `i64` for a numeric value whose fraction is all zeros (`3`, `3.00`)
pub fn parse_whole_number(value: &str) -> Option<i64> {
    if !is_numeric(value) {
        return None;
    }

    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if !fraction.chars().all(|c| c == '0') {
        return None;
    }

    match whole {
        "" | "+" | "-" => Some(0),
        whole => whole.parse().ok(),
    }
}

/// HTML-escape ampersands, angle brackets, quotes, slashes and backticks
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub const CATEGORY_RULES: &[FieldRules] = &[
    FieldRules {
        field: "category_name",
        rules: &[
            FieldRule::sanitize(Rule::Trim),
            FieldRule::check(Rule::Required, "Category name is required"),
            FieldRule::check(
                Rule::MaxLength(30),
                "Category name must be at most 30 characters long",
            ),
            FieldRule::sanitize(Rule::Escape),
        ],
    },
    FieldRules {
        field: "category_description",
        rules: &[
            FieldRule::sanitize(Rule::Trim),
            FieldRule::check(Rule::Required, "Category description is required"),
            FieldRule::check(
                Rule::MaxLength(100),
                "Category description must be at most 100 characters long",
            ),
            FieldRule::sanitize(Rule::Escape),
        ],
    },
];

pub const ITEM_RULES: &[FieldRules] = &[
    FieldRules {
        field: "item_name",
        rules: &[
            FieldRule::sanitize(Rule::Trim),
            FieldRule::check(Rule::Required, "Item name is required"),
            FieldRule::check(
                Rule::MinLength(3),
                "Item name must be at least 3 characters long",
            ),
            FieldRule::check(
                Rule::MaxLength(30),
                "Item name must be at most 30 characters long",
            ),
            FieldRule::sanitize(Rule::Escape),
        ],
    },
    FieldRules {
        field: "item_description",
        rules: &[
            FieldRule::sanitize(Rule::Trim),
            FieldRule::check(Rule::Required, "Item description is required"),
            FieldRule::check(
                Rule::MinLength(3),
                "Item description must be at least 3 characters long",
            ),
            FieldRule::check(
                Rule::MaxLength(100),
                "Item description must be at most 100 characters long",
            ),
            FieldRule::sanitize(Rule::Escape),
        ],
    },
    FieldRules {
        field: "item_category",
        rules: &[
            FieldRule::sanitize(Rule::Trim),
            FieldRule::check(Rule::Required, "Item category is required"),
            FieldRule::sanitize(Rule::Escape),
        ],
    },
    FieldRules {
        field: "item_price",
        rules: &[
            FieldRule::sanitize(Rule::Trim),
            FieldRule::check(Rule::Required, "Item price is required"),
            FieldRule::check(Rule::Numeric, "Item price must be a number"),
            FieldRule::check(Rule::NonNegative, "Item price must not be negative"),
            FieldRule::check(Rule::Finite, "Item price is too large"),
            FieldRule::sanitize(Rule::Escape),
        ],
    },
    FieldRules {
        field: "item_number_in_stock",
        rules: &[
            FieldRule::sanitize(Rule::Trim),
            FieldRule::check(Rule::Required, "Item number in stock is required"),
            FieldRule::check(Rule::Numeric, "Item number in stock must be a number"),
            FieldRule::check(
                Rule::NonNegative,
                "Item number in stock must not be negative",
            ),
            FieldRule::check(
                Rule::WholeNumber,
                "Item number in stock must be a whole number",
            ),
            FieldRule::check(Rule::IntegerRange, "Item number in stock is too large"),
            FieldRule::sanitize(Rule::Escape),
        ],
    },
];
