//! Field access on unions of records.
//!
//! Reading `v.f` where `v : {int x, int y} | {int x, bool z}` is allowed
//! for the fields every member has. The intersection keeps the first
//! record's field order, drops fields some member lacks, and widens fields
//! whose types differ to the union of those types.

use super::Subtyping;
use crate::error::Result;
use crate::types::{Field, Type};
use whilec_log::trace;
use whilec_syntax::Span;

impl<'a> Subtyping<'a> {
    /// The field lists of `members` if every member expands to a record.
    ///
    /// # Errors
    ///
    /// `UnknownType` at `span` if a member names an undeclared alias.
    pub fn as_records<'t>(
        &self,
        members: &'t [Type],
        span: Option<Span>,
    ) -> Result<Option<Vec<&'t [Field]>>>
    where
        'a: 't,
    {
        let mut records = Vec::with_capacity(members.len());
        for member in members {
            match self.expand(member, span)? {
                Type::Record(fields) => records.push(fields.as_slice()),
                _ => return Ok(None),
            }
        }
        Ok(Some(records))
    }

    /// Fields common to every record, or `None` if none survive.
    ///
    /// # Errors
    ///
    /// `UnknownType` at `span` if comparing field types meets an undeclared
    /// alias.
    pub fn record_intersection(
        &self,
        records: &[&[Field]],
        span: Option<Span>,
    ) -> Result<Option<Type>> {
        let Some((first, rest)) = records.split_first() else {
            return Ok(None);
        };
        let mut fields: Vec<Field> = first.to_vec();

        for record in rest {
            let mut kept = Vec::with_capacity(fields.len());
            for mut field in fields {
                let Some(other) = record.iter().find(|other| other.name == field.name) else {
                    continue;
                };
                if !self
                    .equivalent(&field.ty, &other.ty)
                    .map_err(|err| err.or_at(span))?
                {
                    field.ty = Type::union([field.ty, other.ty.clone()]);
                }
                kept.push(field);
            }
            fields = kept;
        }

        if fields.is_empty() {
            trace!("record intersection is empty");
            Ok(None)
        } else {
            let record = Type::Record(fields);
            trace!("record intersection: {}", record);
            Ok(Some(record))
        }
    }
}
