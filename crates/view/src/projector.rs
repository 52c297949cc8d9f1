//! Selection of property values out of a subject's triples.

use linkview_primitives::{Canonicalize, Iri, Term, Triple};

use crate::options::{Label, Limit};

/// Values selected for one property view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
	Empty,
	Single(Term),
	/// More than one value, in source order.
	Many(Vec<Term>),
}

impl Projection {
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	pub fn into_values(self) -> Vec<Term> {
		match self {
			Self::Empty => Vec::new(),
			Self::Single(term) => vec![term],
			Self::Many(terms) => terms,
		}
	}
}

/// Objects of `triples` whose predicate is one of `label`, in source order.
pub fn matching_values<C: Canonicalize + ?Sized>(triples: &[Triple], label: &Label, canon: &C) -> Vec<Term> {
	let labels: Vec<Iri> = label.iris().iter().map(|iri| canon.canonical_iri(iri)).collect();
	triples
		.iter()
		.filter(|t| labels.contains(&canon.canonical_iri(&t.predicate)))
		.map(|t| t.object.clone())
		.collect()
}

/// Selects the values of `label` out of `triples`.
///
/// A single match, or a limit of one, yields one value. With a limit of one
/// and several matches the value is picked by `languages`.
pub fn project<C: Canonicalize + ?Sized>(
	triples: &[Triple],
	label: &Label,
	limit: Limit,
	canon: &C,
	languages: &[String],
) -> Projection {
	select(matching_values(triples, label, canon), limit, languages)
}

/// Applies `limit` to already matched values.
pub fn select(mut values: Vec<Term>, limit: Limit, languages: &[String]) -> Projection {
	match values.len() {
		0 => Projection::Empty,
		1 => Projection::Single(values.swap_remove(0)),
		_ if limit.is_one() => {
			let pick = best_lang(&values, languages);
			Projection::Single(values.swap_remove(pick))
		}
		n => {
			values.truncate(limit.take(n));
			Projection::Many(values)
		}
	}
}

/// Index of the first term tagged with the most preferred language.
///
/// Preferences are tried in order and compared case-insensitively. Falls back
/// to the first term when no tag matches.
pub fn best_lang(terms: &[Term], languages: &[String]) -> usize {
	languages
		.iter()
		.find_map(|pref| {
			terms.iter().position(|term| {
				term.as_literal()
					.and_then(|lit| lit.language())
					.is_some_and(|tag| tag.eq_ignore_ascii_case(pref))
			})
		})
		.unwrap_or(0)
}
