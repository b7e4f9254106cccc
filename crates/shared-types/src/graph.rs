//! # Linked-Data Graph
//!
//! Minimal subject-predicate-object store used for profile documents and
//! social posts.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Well-known predicate and class IRIs.
pub mod vocab {
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const FOAF_PERSON: &str = "http://xmlns.com/foaf/0.1/Person";
    pub const FOAF_NAME: &str = "http://xmlns.com/foaf/0.1/name";

    /// Explicit link from a profile to its transaction inbox.
    pub const LDP_INBOX: &str = "http://www.w3.org/ns/ldp#inbox";

    /// Legacy inbox coordinates carried directly on a profile.
    pub const SAFE_XOR_NAME: &str = "http://safenetwork.org/safevocab/xorName";
    pub const SAFE_TYPE_TAG: &str = "http://safenetwork.org/safevocab/typeTag";

    pub const AS_OUTBOX: &str = "https://www.w3.org/ns/activitystreams#outbox";
    pub const AS_NOTE: &str = "https://www.w3.org/ns/activitystreams#Note";
    pub const AS_ATTRIBUTED_TO: &str = "https://www.w3.org/ns/activitystreams#attributedTo";
    pub const AS_SUMMARY: &str = "https://www.w3.org/ns/activitystreams#summary";
    pub const AS_PUBLISHED: &str = "https://www.w3.org/ns/activitystreams#published";
    pub const AS_CONTENT: &str = "https://www.w3.org/ns/activitystreams#content";
}

/// Object position of a statement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    Iri(String),
    Literal(String),
}

impl Term {
    pub fn iri(value: impl Into<String>) -> Self {
        Self::Iri(value.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// The IRI, if this term is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Literal(_) => None,
        }
    }

    /// The raw text of either variant.
    pub fn value(&self) -> &str {
        match self {
            Self::Iri(v) | Self::Literal(v) => v,
        }
    }
}

/// One statement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

/// An ordered set of statements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    triples: Vec<Triple>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement; exact duplicates are ignored.
    pub fn add(&mut self, subject: impl Into<String>, predicate: impl Into<String>, object: Term) {
        let triple = Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        };
        if !self.triples.contains(&triple) {
            self.triples.push(triple);
        }
    }

    /// Builder form of [`Graph::add`].
    pub fn with(
        mut self,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: Term,
    ) -> Self {
        self.add(subject, predicate, object);
        self
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// First object for `predicate`, preferring statements about `subject`.
    pub fn object_of(&self, subject: &str, predicate: &str) -> Option<&Term> {
        self.triples
            .iter()
            .find(|t| t.subject == subject && t.predicate == predicate)
            .or_else(|| self.triples.iter().find(|t| t.predicate == predicate))
            .map(|t| &t.object)
    }

    /// Serialize as N-Triples, one statement per line.
    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for triple in &self.triples {
            let object = match &triple.object {
                Term::Iri(iri) => format!("<{}>", iri),
                Term::Literal(text) => format!("\"{}\"", escape_literal(text)),
            };
            // Writing to a String cannot fail.
            let _ = writeln!(out, "<{}> <{}> {} .", triple.subject, triple.predicate, object);
        }
        out
    }
}

fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}
