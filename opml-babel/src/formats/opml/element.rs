//! Generic attributed-element tree
//!
//! The shape the tokenizer hands to the importer, modelled on what a generic XML-to-data
//! mapper produces: attributes in an optional map, child elements as named fields. A name
//! seen once under a parent maps to a single field, a name seen several times maps to a
//! [`Field::List`]. That asymmetry is undone in one place, [`as_list`].

use indexmap::map::Entry;
use indexmap::IndexMap;

/// One element: its attributes, its child elements by name, and its own text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericElement {
    pub attributes: Option<IndexMap<String, String>>,
    pub fields: IndexMap<String, Field>,
    pub text: String,
}

/// A named child slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// An element with neither attributes nor child elements, reduced to its text.
    Text(String),
    Element(GenericElement),
    /// Several same-named children, in document order.
    List(Vec<Field>),
}

impl Field {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Field::Text(_))
    }

    /// Flattens the field to a string: the scalar itself, an element's own text, or for a
    /// list the text of its last item.
    pub fn into_text(self) -> String {
        match self {
            Field::Text(text) => text,
            Field::Element(element) => element.text,
            Field::List(items) => items
                .into_iter()
                .last()
                .map(Field::into_text)
                .unwrap_or_default(),
        }
    }
}

/// Treats a single field as a one-element list.
pub fn as_list(field: Field) -> Vec<Field> {
    match field {
        Field::List(items) => items,
        single => vec![single],
    }
}

impl GenericElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Builder form of [`GenericElement::push_field`].
    pub fn with_field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.push_field(name, field);
        self
    }

    /// Adds a child under `name`. A second child of the same name turns the slot into a list.
    pub fn push_field(&mut self, name: impl Into<String>, field: Field) {
        match self.fields.entry(name.into()) {
            Entry::Vacant(slot) => {
                slot.insert(field);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Field::List(items) => items.push(field),
                existing => {
                    let first = std::mem::replace(existing, Field::List(Vec::new()));
                    *existing = Field::List(vec![first, field]);
                }
            },
        }
    }
}
