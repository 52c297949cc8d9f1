use crate::iri::Iri;

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDF_PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
pub const RDFS_LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";
pub const RDFS_SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

pub fn rdf_type() -> Iri {
	Iri::from(RDF_TYPE)
}

/// Property key of association renderers, which wrap every rendered property.
pub fn rdf_predicate() -> Iri {
	Iri::from(RDF_PREDICATE)
}

pub fn rdf_lang_string() -> Iri {
	Iri::from(RDF_LANG_STRING)
}

/// Type key under which literal renderers are registered by datatype.
pub fn rdfs_literal() -> Iri {
	Iri::from(RDFS_LITERAL)
}

pub fn rdfs_sub_class_of() -> Iri {
	Iri::from(RDFS_SUB_CLASS_OF)
}

pub fn xsd_string() -> Iri {
	Iri::from(XSD_STRING)
}

pub fn xsd_integer() -> Iri {
	Iri::from(XSD_INTEGER)
}
