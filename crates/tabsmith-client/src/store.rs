use tabsmith_core::{DatabaseResult, GenerationResponse, Row, TableCounts};

/// Latest generation outcome plus the table picked for display.
///
/// A new result replaces the previous one wholesale; a failure clears both
/// the result and the selection and keeps only the message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    result: Option<GenerationResponse>,
    selected_table: Option<String>,
    error: Option<String>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a successful response. Database-shaped results select their
    /// first table in received order.
    pub fn absorb(&mut self, response: GenerationResponse) {
        self.selected_table = match &response {
            GenerationResponse::Database(result) => result.first_table().map(str::to_string),
            GenerationResponse::Single(_) => None,
        };
        self.result = Some(response);
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.result = None;
        self.selected_table = None;
        self.error = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.result = None;
        self.selected_table = None;
        self.error = None;
    }

    /// Point the selection at `name` if the current result has that table.
    pub fn select_table(&mut self, name: &str) -> bool {
        let known = self
            .database()
            .is_some_and(|result| result.tables.contains_key(name));
        if known {
            self.selected_table = Some(name.to_string());
        }
        known
    }

    pub fn result(&self) -> Option<&GenerationResponse> {
        self.result.as_ref()
    }

    pub fn database(&self) -> Option<&DatabaseResult> {
        match self.result.as_ref()? {
            GenerationResponse::Database(result) => Some(result),
            GenerationResponse::Single(_) => None,
        }
    }

    /// Rows of a single-table result.
    pub fn records(&self) -> Option<&[Row]> {
        match self.result.as_ref()? {
            GenerationResponse::Single(result) => Some(&result.records),
            GenerationResponse::Database(_) => None,
        }
    }

    pub fn selected_table(&self) -> Option<&str> {
        self.selected_table.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn rows_for(&self, table: &str) -> Option<&[Row]> {
        self.database()?.tables.get(table).map(Vec::as_slice)
    }

    pub fn selected_rows(&self) -> Option<&[Row]> {
        self.rows_for(self.selected_table.as_deref()?)
    }

    /// Counts for the selected table; the service may omit them.
    pub fn selected_counts(&self) -> Option<&TableCounts> {
        let table = self.selected_table.as_deref()?;
        self.database()?.counts_by_table.get(table)
    }
}
