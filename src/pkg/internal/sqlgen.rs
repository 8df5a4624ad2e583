//! Partial-update clause generation shared by entity mutators.
//!
//! A mutator hands over the ordered `(field, value)` pairs of a patch body
//! plus the entity's [`FieldMap`] and gets back a parameterized `SET` clause
//! and the values to bind, in matching order. User-supplied values never end
//! up in the clause text, only positional placeholders do.

use crate::prelude::{Error, Result};

/// External-to-storage column names for one entity.
///
/// Tables are process-lifetime constants declaring every updatable field
/// explicitly, identity-mapped ones included, so a typo'd field name is
/// caught by [`FieldMap::check_complete`] at startup instead of surfacing as
/// an accidental column name at request time.
pub struct FieldMap {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        FieldMap { entries }
    }

    /// Storage name for an external field, the field itself when unmapped.
    pub fn storage_name<'a>(&self, field: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(external, _)| *external == field)
            .map(|(_, storage)| *storage)
            .unwrap_or(field)
    }

    /// Fails when any of `fields` is missing from the table. Run once at
    /// startup against the entity's known field set.
    pub fn check_complete(&self, fields: &[&str]) -> Result<()> {
        for field in fields {
            if !self.entries.iter().any(|(external, _)| external == field) {
                return Err(Error::Validation(format!(
                    "field map is missing an entry for {field}"
                )));
            }
        }
        Ok(())
    }
}

/// A value destined for a positional parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Text(String),
    Int(i64),
}

/// Ordered `(field, value)` pairs taken from a patch body.
///
/// Pair order is significant: it decides which positional index each column
/// binds to, so it is kept as an explicit sequence rather than a map.
#[derive(Debug, Default)]
pub struct UpdateRequest {
    pairs: Vec<(&'static str, SqlArg)>,
}

impl UpdateRequest {
    pub fn new() -> Self {
        UpdateRequest { pairs: Vec::new() }
    }

    pub fn set(&mut self, field: &'static str, value: SqlArg) {
        self.pairs.push((field, value));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(field, _)| *field)
    }
}

/// A ready-to-splice assignment clause plus its bind values.
#[derive(Debug)]
pub struct UpdateSet {
    pub clause: String,
    pub args: Vec<SqlArg>,
}

impl UpdateSet {
    /// Index for the caller's next positional parameter, e.g. the row id in
    /// the `WHERE` clause.
    pub fn next_index(&self) -> usize {
        self.args.len() + 1
    }
}

/// Turns a sparse update into `"col_a" = $1, "col_b" = $2` and the matching
/// value list. Fails with [`Error::Validation`] on an empty request, before
/// anything touches the store.
pub fn partial_update(request: UpdateRequest, map: &FieldMap) -> Result<UpdateSet> {
    if request.is_empty() {
        return Err(Error::Validation("no data supplied".into()));
    }
    let mut assignments = Vec::with_capacity(request.pairs.len());
    let mut args = Vec::with_capacity(request.pairs.len());
    for (idx, (field, value)) in request.pairs.into_iter().enumerate() {
        assignments.push(format!("{} = ${}", quote_ident(map.storage_name(field)), idx + 1));
        args.push(value);
    }
    Ok(UpdateSet {
        clause: assignments.join(", "),
        args,
    })
}

// Column names only ever come out of a FieldMap, but they are still spliced
// into statement text, so quote them as identifiers regardless.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
