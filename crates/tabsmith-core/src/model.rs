//! In-place editing operations over [`SchemaModel`].
//!
//! Every operation returns `true` when it changed the model. Out-of-range
//! indices and contract violations are rejected locally (the model is left
//! untouched and `false` is returned); nothing here fails on user input.
//! Incomplete rows are allowed and filtered later by the request builder.

use serde::{Deserialize, Serialize};
use tabsmith_catalog::{TypeCatalog, TypeDescriptor, preview};

use crate::schema::{FieldReference, FieldSpec, SchemaModel, TableSpec};

/// Operating mode chosen at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    Single,
    Database,
    NaturalLanguage,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Single => "single",
            GenerationMode::Database => "database",
            GenerationMode::NaturalLanguage => "natural_language",
        }
    }

    /// Database and natural-language runs both answer with per-table results.
    pub fn returns_tables(&self) -> bool {
        !matches!(self, GenerationMode::Single)
    }
}

/// Which field list an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    Single,
    Table(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProperty {
    Name(String),
    Type(String),
    Rules(String),
    Example(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableProperty {
    Name(String),
    TotalCount(u64),
    ValidCount(u64),
    InvalidCount(u64),
    AdditionalContext(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleProperty {
    TotalCount(u64),
    ValidCount(u64),
    InvalidCount(u64),
    AdditionalRules(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseProperty {
    Name(String),
    IntelligentMode(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceProperty {
    TargetTable(String),
    TargetField(String),
}

impl SchemaModel {
    pub fn fields(&self, scope: FieldScope) -> Option<&[FieldSpec]> {
        match scope {
            FieldScope::Single => Some(&self.single.fields),
            FieldScope::Table(index) => self
                .database
                .tables
                .get(index)
                .map(|table| table.fields.as_slice()),
        }
    }

    fn fields_mut(&mut self, scope: FieldScope) -> Option<&mut Vec<FieldSpec>> {
        match scope {
            FieldScope::Single => Some(&mut self.single.fields),
            FieldScope::Table(index) => self
                .database
                .tables
                .get_mut(index)
                .map(|table| &mut table.fields),
        }
    }

    fn field_mut(&mut self, scope: FieldScope, index: usize) -> Option<&mut FieldSpec> {
        self.fields_mut(scope)?.get_mut(index)
    }

    pub fn add_field(&mut self, scope: FieldScope) -> bool {
        match self.fields_mut(scope) {
            Some(fields) => {
                fields.push(FieldSpec::default());
                true
            }
            None => false,
        }
    }

    /// Positional removal; later fields shift down by one.
    pub fn remove_field(&mut self, scope: FieldScope, index: usize) -> bool {
        match self.fields_mut(scope) {
            Some(fields) if index < fields.len() => {
                fields.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn set_field_property(
        &mut self,
        scope: FieldScope,
        index: usize,
        property: FieldProperty,
    ) -> bool {
        let Some(field) = self.field_mut(scope, index) else {
            return false;
        };
        match property {
            FieldProperty::Name(value) => field.name = value,
            FieldProperty::Type(value) => field.type_id = value,
            FieldProperty::Rules(value) => field.rules = value,
            FieldProperty::Example(value) => field.example = value,
        }
        true
    }

    /// Select a type and populate the field from its catalog metadata.
    ///
    /// With a descriptor, `example` takes the descriptor example (when it has
    /// one) and `rules` takes the default rule, falling back to the description.
    /// Unknown types only change the type identifier.
    pub fn apply_type(
        &mut self,
        scope: FieldScope,
        index: usize,
        type_id: &str,
        descriptor: Option<&TypeDescriptor>,
    ) -> bool {
        let Some(field) = self.field_mut(scope, index) else {
            return false;
        };
        field.type_id = type_id.to_string();
        if let Some(descriptor) = descriptor {
            if !descriptor.example.is_empty() {
                field.example = descriptor.example.clone();
            }
            field.rules = descriptor
                .default_rule
                .as_deref()
                .filter(|rule| !rule.is_empty())
                .unwrap_or(descriptor.description.as_str())
                .to_string();
        }
        true
    }

    /// [`Self::apply_type`] with the descriptor resolved from `catalog`.
    pub fn apply_catalog_type(
        &mut self,
        scope: FieldScope,
        index: usize,
        type_id: &str,
        catalog: &TypeCatalog,
    ) -> bool {
        self.apply_type(scope, index, type_id, catalog.lookup(type_id))
    }

    pub fn add_table(&mut self) {
        self.database.tables.push(TableSpec::default());
    }

    pub fn remove_table(&mut self, index: usize) -> bool {
        if index < self.database.tables.len() {
            self.database.tables.remove(index);
            true
        } else {
            false
        }
    }

    pub fn set_table_property(&mut self, index: usize, property: TableProperty) -> bool {
        let Some(table) = self.database.tables.get_mut(index) else {
            return false;
        };
        match property {
            TableProperty::Name(value) => table.table_name = value,
            TableProperty::TotalCount(value) => table.total_count = value,
            TableProperty::ValidCount(value) => table.valid_count = value,
            TableProperty::InvalidCount(value) => table.invalid_count = value,
            TableProperty::AdditionalContext(value) => table.additional_context = value,
        }
        true
    }

    pub fn set_single_property(&mut self, property: SingleProperty) {
        let single = &mut self.single;
        match property {
            SingleProperty::TotalCount(value) => single.total_count = value,
            SingleProperty::ValidCount(value) => single.valid_count = value,
            SingleProperty::InvalidCount(value) => single.invalid_count = value,
            SingleProperty::AdditionalRules(value) => single.additional_rules = value,
        }
    }

    /// Toggling intelligent mode never touches stored references.
    pub fn set_database_property(&mut self, property: DatabaseProperty) {
        match property {
            DatabaseProperty::Name(value) => self.database.name = value,
            DatabaseProperty::IntelligentMode(value) => self.database.use_intelligent_mode = value,
        }
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    /// Flip reference presence: none becomes `{"", "id"}`, some becomes none.
    ///
    /// Only available in manual mode.
    pub fn toggle_reference(&mut self, table: usize, field: usize) -> bool {
        if self.database.use_intelligent_mode {
            return false;
        }
        let Some(field) = self.field_mut(FieldScope::Table(table), field) else {
            return false;
        };
        field.reference = match field.reference.take() {
            Some(_) => None,
            None => Some(FieldReference::default()),
        };
        true
    }

    /// Edit an existing reference; rejected when the field has none.
    pub fn set_reference_property(
        &mut self,
        table: usize,
        field: usize,
        property: ReferenceProperty,
    ) -> bool {
        if self.database.use_intelligent_mode {
            return false;
        }
        let Some(reference) = self
            .field_mut(FieldScope::Table(table), field)
            .and_then(|field| field.reference.as_mut())
        else {
            return false;
        };
        match property {
            ReferenceProperty::TargetTable(value) => reference.target_table = value,
            ReferenceProperty::TargetField(value) => reference.target_field = value,
        }
        true
    }

    /// Index of the table called `name`, if any.
    pub fn table_index(&self, name: &str) -> Option<usize> {
        self.database
            .tables
            .iter()
            .position(|table| table.table_name == name)
    }
}

impl FieldSpec {
    /// Display value: the explicit example, else a catalog/generator preview.
    pub fn preview(&self) -> String {
        if self.example.is_empty() {
            preview(&self.type_id)
        } else {
            self.example.clone()
        }
    }
}
